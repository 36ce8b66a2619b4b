use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::trace;

use crate::decimal::Money;
use crate::errors::{LoanError, Result};
use crate::types::LoanCategory;

/// why a line of console input was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    NotANumber { expected: &'static str },
    BelowMinimum { minimum: String },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::NotANumber { expected } => {
                write!(f, "Invalid input. Please enter a valid {expected}.")
            }
            InputError::BelowMinimum { minimum } => {
                write!(f, "Please enter a value greater than or equal to {minimum}.")
            }
        }
    }
}

/// numeric types that can be read from the console
pub trait PromptValue: FromStr + PartialOrd + fmt::Display + Copy {
    /// name shown when parsing fails
    const KIND: &'static str;
}

impl PromptValue for Decimal {
    const KIND: &'static str = "number";
}

impl PromptValue for u32 {
    const KIND: &'static str = "whole number";
}

/// parse a raw line and check it against a minimum
pub fn validate<T: PromptValue>(raw: &str, minimum: T) -> std::result::Result<T, InputError> {
    let value: T = raw
        .trim()
        .parse()
        .map_err(|_| InputError::NotANumber { expected: T::KIND })?;

    if value < minimum {
        return Err(InputError::BelowMinimum {
            minimum: minimum.to_string(),
        });
    }
    Ok(value)
}

/// line-oriented console prompts over any reader and writer
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// print a line
    pub fn say(&mut self, line: impl fmt::Display) -> Result<()> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    /// show a prompt and read one line, without its line ending
    pub fn read_line(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(LoanError::EndOfInput);
        }
        let line = line.trim_end_matches(['\r', '\n']).to_string();
        trace!(prompt, input = %line, "read console line");
        Ok(line)
    }

    /// ask until the answer parses and meets the minimum
    pub fn ask<T: PromptValue>(&mut self, prompt: &str, minimum: T) -> Result<T> {
        loop {
            let line = self.read_line(prompt)?;
            match validate(&line, minimum) {
                Ok(value) => return Ok(value),
                Err(e) => self.say(e)?,
            }
        }
    }

    /// ask for a non-negative amount of money
    pub fn ask_money(&mut self, prompt: &str) -> Result<Money> {
        self.ask(prompt, Decimal::ZERO).map(Money::from_decimal)
    }

    /// show the loan menu and read a category
    pub fn choose_category(&mut self) -> Result<LoanCategory> {
        self.say("\nWhich type of loan you want to calculate today:")?;
        for category in LoanCategory::ALL {
            self.say(format_args!("{}) {} Loan", category.menu_key(), category))?;
        }

        loop {
            let choice = self.read_line("Enter your choice (1/2/3): ")?;
            match LoanCategory::from_menu_key(choice.trim()) {
                Some(category) => return Ok(category),
                None => self.say("Invalid choice. Please enter 1, 2, or 3.")?,
            }
        }
    }

    /// ask whether to run another calculation; only an exact Yes or No is accepted
    pub fn confirm_repeat(&mut self) -> Result<bool> {
        loop {
            let answer = self.read_line("\nWould you like to calculate another loan? (Yes/No): ")?;
            match answer.trim() {
                "Yes" => return Ok(true),
                "No" => return Ok(false),
                _ => self.say("Please enter 'Yes' or 'No'.")?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn transcript(p: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(p.into_output()).unwrap()
    }

    #[test]
    fn test_validate() {
        assert_eq!(validate(" 12.5 ", Decimal::ZERO), Ok(dec!(12.5)));
        assert_eq!(
            validate("abc", Decimal::ZERO),
            Err(InputError::NotANumber { expected: "number" })
        );
        assert_eq!(
            validate("-3", Decimal::ZERO),
            Err(InputError::BelowMinimum { minimum: "0".to_string() })
        );
        assert_eq!(validate("30", 1u32), Ok(30));
        assert_eq!(
            validate("2.5", 1u32),
            Err(InputError::NotANumber { expected: "whole number" })
        );
        assert_eq!(
            validate("0", 1u32),
            Err(InputError::BelowMinimum { minimum: "1".to_string() })
        );
    }

    #[test]
    fn test_ask_reprompts_until_valid() {
        let mut p = prompter("ten\n0\n10\n");
        let years: u32 = p.ask("Years: ", 1).unwrap();
        assert_eq!(years, 10);

        let out = transcript(p);
        assert_eq!(
            out,
            "Years: Invalid input. Please enter a valid whole number.\n\
             Years: Please enter a value greater than or equal to 1.\n\
             Years: "
        );
    }

    #[test]
    fn test_ask_money() {
        let mut p = prompter("250000.50\r\n");
        assert_eq!(p.ask_money("Value: $").unwrap(), Money::from_decimal(dec!(250000.50)));
    }

    #[test]
    fn test_choose_category() {
        let mut p = prompter("4\n\n 3 \n");
        assert_eq!(p.choose_category().unwrap(), LoanCategory::Car);

        let out = transcript(p);
        assert!(out.contains("1) Mortgage Loan\n2) Education Loan\n3) Car Loan\n"));
        assert_eq!(out.matches("Invalid choice. Please enter 1, 2, or 3.").count(), 2);
    }

    #[test]
    fn test_confirm_repeat_is_exact() {
        let mut p = prompter("yes\nY\nYes\n");
        assert!(p.confirm_repeat().unwrap());
        assert_eq!(transcript(p).matches("Please enter 'Yes' or 'No'.").count(), 2);

        let mut p = prompter(" No \n");
        assert!(!p.confirm_repeat().unwrap());
    }

    #[test]
    fn test_end_of_input() {
        let mut p = prompter("");
        assert!(matches!(p.read_line("> "), Err(LoanError::EndOfInput)));

        let mut p = prompter("oops\n");
        assert!(matches!(p.ask("> ", Decimal::ZERO), Err(LoanError::EndOfInput)));
    }
}

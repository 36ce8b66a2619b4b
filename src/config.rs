use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// file the schedule is exported to unless overridden
pub const DEFAULT_EXPORT_FILE: &str = "loan_data.txt";

/// timestamp written at the top of every export
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d - %A  %H:%M:%S";

/// how the loan summary is printed after each calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SummaryFormat {
    #[default]
    Text,
    Json,
}

/// calculator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    pub export_path: PathBuf,
    pub timestamp_format: String,
    /// width of the `=` rules framing the exported table
    pub rule_width: usize,
    pub summary_format: SummaryFormat,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            export_path: PathBuf::from(DEFAULT_EXPORT_FILE),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            rule_width: 70,
            summary_format: SummaryFormat::Text,
        }
    }
}

impl CalculatorConfig {
    pub fn with_export_path(mut self, path: impl AsRef<Path>) -> Self {
        self.export_path = path.as_ref().to_path_buf();
        self
    }

    pub fn with_summary_format(mut self, format: SummaryFormat) -> Self {
        self.summary_format = format;
        self
    }

    /// horizontal rule used in the export
    pub fn rule(&self) -> String {
        "=".repeat(self.rule_width)
    }
}

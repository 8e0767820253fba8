//! Configuration structures for receipt processing.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{RcptError, Result};

/// Main configuration for rcpt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RcptConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Output configuration.
    pub output: OutputConfig,

    /// Batch processing configuration.
    pub batch: BatchConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Collect warnings for fields that fell back to their defaults.
    pub collect_warnings: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            collect_warnings: true,
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format.
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            pretty_json: true,
        }
    }
}

/// Output format for parsed receipts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// JSON document.
    #[default]
    Json,
    /// CSV with a header row.
    Csv,
    /// Plain text summary.
    Text,
}

/// Batch processing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// File extensions treated as recognized receipt text.
    pub extensions: Vec<String>,

    /// Number of files parsed concurrently.
    pub jobs: usize,

    /// Keep going when a file cannot be read.
    pub continue_on_error: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["txt".to_string()],
            jobs: 4,
            continue_on_error: false,
        }
    }
}

impl BatchConfig {
    /// Whether `path` has one of the configured extensions (case-insensitive).
    pub fn accepts(&self, path: &Path) -> bool {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext))
    }
}

impl RcptConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject values that cannot be used.
    pub fn validate(&self) -> Result<()> {
        if self.batch.jobs == 0 {
            return Err(RcptError::Config("batch.jobs must be at least 1".to_string()));
        }
        if self.batch.extensions.is_empty() {
            return Err(RcptError::Config(
                "batch.extensions must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Look up a value by dotted key, e.g. `batch.jobs`.
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        let value = serde_json::to_value(self).ok()?;
        key.split('.')
            .try_fold(&value, |current, part| current.get(part))
            .cloned()
    }
}

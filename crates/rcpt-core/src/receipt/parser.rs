//! Rule-based receipt parser.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};

use crate::models::config::ExtractionConfig;
use crate::models::receipt::{ParsedReceipt, PaymentMethod, UNKNOWN};
use crate::models::text::RawText;

use super::rules::{
    DateExtractor, ExtractionMatch, FieldExtractor, LineItemExtractor, PaymentMethodExtractor,
    StoreNameExtractor, TimeExtractor, TotalExtractor,
};
use super::ReceiptParser;

/// Where an extracted field came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSource {
    /// Field name as it appears on [`ParsedReceipt`].
    pub field: &'static str,
    /// Rule that produced the value.
    pub rule: &'static str,
    /// Matched text.
    pub source: String,
}

impl FieldSource {
    fn from_match<T>(field: &'static str, m: &ExtractionMatch<T>) -> Self {
        Self {
            field,
            rule: m.rule,
            source: m.source.clone(),
        }
    }
}

/// Result of receipt extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted receipt.
    pub receipt: ParsedReceipt,
    /// Fields that fell back to defaults and matches that could not be read.
    pub warnings: Vec<String>,
    /// Provenance of every extracted value.
    pub sources: Vec<FieldSource>,
}

/// Receipt parser built from the ordered field rules.
///
/// Holds no state besides its settings, so one instance can be shared
/// between threads.
#[derive(Debug, Clone)]
pub struct RuleBasedParser {
    /// Whether to collect warnings for defaulted fields.
    collect_warnings: bool,
}

impl RuleBasedParser {
    /// Create a new parser with default settings.
    pub fn new() -> Self {
        Self {
            collect_warnings: true,
        }
    }

    /// Create a parser from configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new().with_warnings(config.collect_warnings)
    }

    /// Set warning collection.
    pub fn with_warnings(mut self, collect: bool) -> Self {
        self.collect_warnings = collect;
        self
    }

    /// Parse a plain string.
    pub fn parse_str(&self, text: &str) -> ParsedReceipt {
        self.parse(&RawText::new(text))
    }

    /// Parse and report warnings and value provenance.
    pub fn parse_detailed(&self, text: &RawText<'_>) -> ExtractionResult {
        let text = text.as_str();
        let mut warnings = Vec::new();
        let mut sources = Vec::new();

        info!("Parsing receipt from {} characters of text", text.len());

        let store_name = match StoreNameExtractor::new().extract(text) {
            Some(m) => {
                sources.push(FieldSource::from_match("store_name", &m));
                m.value
            }
            None => {
                warnings.push("Could not extract store name".to_string());
                UNKNOWN.to_string()
            }
        };

        let date_extractor = DateExtractor::new();
        let date = match date_extractor.extract(text) {
            Some(m) => {
                sources.push(FieldSource::from_match("date", &m));
                Some(m.value)
            }
            None => {
                match date_extractor.find_raw(text) {
                    Some((rule, raw)) => warnings.push(format!(
                        "Date '{}' matched {} but is not a valid calendar date",
                        raw.text, rule.name
                    )),
                    None => warnings.push("Could not extract date".to_string()),
                }
                None
            }
        };

        let time = match TimeExtractor::new().extract(text) {
            Some(m) => {
                if m.value == m.source && !is_twelve_hour(&m.value) {
                    warnings.push(format!("Time '{}' kept as printed", m.value));
                }
                sources.push(FieldSource::from_match("time", &m));
                Some(m.value)
            }
            None => {
                warnings.push("Could not extract time".to_string());
                None
            }
        };

        let items: Vec<_> = LineItemExtractor::new()
            .extract_all(text)
            .into_iter()
            .map(|m| {
                sources.push(FieldSource::from_match("items", &m));
                m.value
            })
            .collect();
        if items.is_empty() {
            warnings.push("Could not extract line items".to_string());
        }

        let total = match TotalExtractor::new().extract(text) {
            Some(m) => {
                sources.push(FieldSource::from_match("total", &m));
                m.value
            }
            None => {
                warnings.push("Could not extract total".to_string());
                Decimal::ZERO
            }
        };

        let payment_method = match PaymentMethodExtractor::new().extract(text) {
            Some(m) => {
                sources.push(FieldSource::from_match("payment_method", &m));
                m.value
            }
            None => {
                warnings.push("Could not extract payment method".to_string());
                PaymentMethod::Unknown
            }
        };

        let receipt = ParsedReceipt {
            store_name,
            date,
            time,
            items,
            total,
            payment_method,
        };

        debug!(
            "Extracted receipt from {} with total {} and {} items",
            receipt.store_name,
            receipt.total,
            receipt.items.len()
        );

        if !self.collect_warnings {
            warnings.clear();
        }

        ExtractionResult {
            receipt,
            warnings,
            sources,
        }
    }
}

fn is_twelve_hour(time: &str) -> bool {
    let upper = time.to_ascii_uppercase();
    upper.ends_with("AM") || upper.ends_with("PM")
}

impl Default for RuleBasedParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ReceiptParser for RuleBasedParser {
    fn parse(&self, text: &RawText<'_>) -> ParsedReceipt {
        self.parse_detailed(text).receipt
    }
}

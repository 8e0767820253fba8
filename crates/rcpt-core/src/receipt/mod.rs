//! Receipt extraction module.
//!
//! Turns OCR text into a [`ParsedReceipt`] by running independent field rules.

mod parser;
pub mod rules;

pub use parser::{ExtractionResult, FieldSource, RuleBasedParser};

use crate::models::receipt::ParsedReceipt;
use crate::models::text::RawText;

/// Trait for receipt parsers.
///
/// Parsing is total: any input text yields a receipt, with fields that could
/// not be found left at their defaults.
pub trait ReceiptParser {
    /// Parse raw receipt text into structured fields.
    fn parse(&self, text: &RawText<'_>) -> ParsedReceipt;
}

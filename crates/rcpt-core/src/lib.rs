//! Core library for receipt text extraction.
//!
//! This crate provides:
//! - Receipt data models (store, date, time, items, total, payment method)
//! - Ordered regex rules for each receipt field
//! - A rule-based parser that turns OCR text into a structured receipt
//! - Configuration shared with the command line tool

pub mod error;
pub mod models;
pub mod receipt;

pub use error::{RcptError, Result};
pub use models::config::RcptConfig;
pub use models::receipt::{LineItem, ParsedReceipt, PaymentMethod};
pub use models::text::RawText;
pub use receipt::{ExtractionResult, FieldSource, ReceiptParser, RuleBasedParser};

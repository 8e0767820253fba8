//! Receipt data models.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Placeholder used for text fields that could not be extracted.
pub const UNKNOWN: &str = "Unknown";

/// A structured receipt extracted from OCR text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedReceipt {
    /// Merchant label, or [`UNKNOWN`].
    pub store_name: String,

    /// Transaction date.
    #[serde(default)]
    pub date: Option<NaiveDate>,

    /// Transaction time, `hh:mm AM|PM` when it could be normalized.
    #[serde(default)]
    pub time: Option<String>,

    /// Purchased items in order of appearance.
    #[serde(default)]
    pub items: Vec<LineItem>,

    /// Receipt total. Zero when no total was found.
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,

    /// Payment method.
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

impl ParsedReceipt {
    /// Create a receipt with every field at its default.
    pub fn new() -> Self {
        Self {
            store_name: UNKNOWN.to_string(),
            date: None,
            time: None,
            items: Vec::new(),
            total: Decimal::ZERO,
            payment_method: PaymentMethod::Unknown,
        }
    }

    /// Date in canonical `YYYY-MM-DD` form.
    pub fn date_string(&self) -> Option<String> {
        self.date.map(|d| d.format("%Y-%m-%d").to_string())
    }
}

impl Default for ParsedReceipt {
    fn default() -> Self {
        Self::new()
    }
}

/// A single purchased item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Item description as printed.
    pub name: String,

    /// Quantity printed in front of the description.
    pub quantity: u32,

    /// Price printed after the description.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl LineItem {
    pub fn new(name: impl Into<String>, quantity: u32, price: Decimal) -> Self {
        Self {
            name: name.into(),
            quantity,
            price,
        }
    }
}

/// Payment method vocabulary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    Visa,
    MasterCard,
    Amex,
    Debit,
    Credit,
    /// No vocabulary term was found.
    #[default]
    Unknown,
}

impl PaymentMethod {
    /// Known methods in matching priority order.
    pub const VOCABULARY: [PaymentMethod; 5] = [
        PaymentMethod::Visa,
        PaymentMethod::MasterCard,
        PaymentMethod::Amex,
        PaymentMethod::Debit,
        PaymentMethod::Credit,
    ];

    /// Canonical spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Visa => "Visa",
            PaymentMethod::MasterCard => "MasterCard",
            PaymentMethod::Amex => "Amex",
            PaymentMethod::Debit => "Debit",
            PaymentMethod::Credit => "Credit",
            PaymentMethod::Unknown => UNKNOWN,
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_receipt() {
        let receipt = ParsedReceipt::default();
        assert_eq!(receipt.store_name, "Unknown");
        assert_eq!(receipt.total, Decimal::ZERO);
        assert_eq!(receipt.payment_method, PaymentMethod::Unknown);
        assert!(receipt.date.is_none() && receipt.time.is_none() && receipt.items.is_empty());
    }

    #[test]
    fn test_date_string() {
        let receipt = ParsedReceipt {
            date: NaiveDate::from_ymd_opt(2024, 8, 5),
            ..ParsedReceipt::default()
        };
        assert_eq!(receipt.date_string(), Some("2024-08-05".to_string()));
    }

    #[test]
    fn test_payment_method_serializes_as_vocabulary_term() {
        let json = serde_json::to_string(&PaymentMethod::MasterCard).unwrap();
        assert_eq!(json, "\"MasterCard\"");
        assert_eq!(PaymentMethod::Unknown.to_string(), "Unknown");
    }

    #[test]
    fn test_receipt_json_uses_numbers_for_money() {
        let receipt = ParsedReceipt {
            items: vec![LineItem::new("Widget", 2, Decimal::new(500, 2))],
            total: Decimal::new(1234, 2),
            ..ParsedReceipt::default()
        };
        let value = serde_json::to_value(&receipt).unwrap();
        assert_eq!(value["total"], serde_json::json!(12.34));
        assert_eq!(value["items"][0]["price"], serde_json::json!(5.0));
        assert!(value["date"].is_null());
        assert!(value["time"].is_null());
    }
}

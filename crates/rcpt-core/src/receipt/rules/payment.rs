//! Payment method detection.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::receipt::PaymentMethod;

use super::{ExtractionMatch, FieldExtractor};

lazy_static! {
    /// Case-insensitive matcher per vocabulary term, in vocabulary order.
    static ref PAYMENT_TERMS: Vec<(PaymentMethod, Regex)> = PaymentMethod::VOCABULARY
        .into_iter()
        .map(|method| {
            let pattern = format!("(?i){}", regex::escape(method.as_str()));
            (method, Regex::new(&pattern).unwrap())
        })
        .collect();
}

/// Payment method extractor.
///
/// Searches the whole text for each vocabulary term, case-insensitively, in
/// vocabulary order. The first term present wins regardless of where it
/// appears.
pub struct PaymentMethodExtractor;

impl PaymentMethodExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PaymentMethodExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for PaymentMethodExtractor {
    type Output = ExtractionMatch<PaymentMethod>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    /// Every vocabulary term present, in vocabulary order.
    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        PAYMENT_TERMS
            .iter()
            .filter_map(|(method, pattern)| {
                let m = pattern.find(text)?;
                Some(
                    ExtractionMatch::new(*method, "vocabulary", m.as_str())
                        .with_position(m.start(), m.end()),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method(text: &str) -> Option<PaymentMethod> {
        PaymentMethodExtractor::new().extract(text).map(|m| m.value)
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(method("Card Type: VISA"), Some(PaymentMethod::Visa));
        assert_eq!(method("debitfee $0.35"), Some(PaymentMethod::Debit));
        assert_eq!(method("mastercard ****1234"), Some(PaymentMethod::MasterCard));
        assert_eq!(method("AMEX"), Some(PaymentMethod::Amex));
        assert_eq!(method("credit"), Some(PaymentMethod::Credit));
    }

    #[test]
    fn test_vocabulary_order_beats_text_order() {
        assert_eq!(method("DEBIT $20.36\nTender Visa"), Some(PaymentMethod::Visa));
        assert_eq!(method("Credit card\nDebit"), Some(PaymentMethod::Debit));
    }

    #[test]
    fn test_source_is_original_spelling() {
        let m = PaymentMethodExtractor::new().extract("Paid with VISA").unwrap();
        assert_eq!(m.source, "VISA");
    }

    #[test]
    fn test_source_span_after_non_ascii_text() {
        // "İ" is two bytes and lowercases to three.
        let text = "İİ Café VISA card";
        let m = PaymentMethodExtractor::new().extract(text).unwrap();
        assert_eq!(m.value, PaymentMethod::Visa);
        assert_eq!(m.source, "VISA");
        let (start, end) = m.position.unwrap();
        assert_eq!(&text[start..end], "VISA");
    }

    #[test]
    fn test_no_method() {
        assert_eq!(method("no structure here at all"), None);
        assert_eq!(method("Cash $5.00"), None);
    }
}

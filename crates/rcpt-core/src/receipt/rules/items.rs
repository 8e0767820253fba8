//! Line item extraction.

use tracing::debug;

use crate::models::receipt::LineItem;

use super::amounts::parse_amount;
use super::patterns::LINE_ITEM;
use super::{ExtractionMatch, FieldExtractor};

/// Line item extractor.
///
/// Collects every `<quantity> <name> <price>` occurrence in text order. Items
/// are neither merged nor bounds-checked; a zero quantity or price is kept.
pub struct LineItemExtractor;

impl LineItemExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LineItemExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for LineItemExtractor {
    type Output = ExtractionMatch<LineItem>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();

        for caps in LINE_ITEM.captures_iter(text) {
            let full_match = match caps.get(0) {
                Some(m) => m,
                None => continue,
            };

            let quantity: u32 = match caps[1].parse() {
                Ok(q) => q,
                Err(e) => {
                    debug!("skipping item '{}': quantity {}", full_match.as_str(), e);
                    continue;
                }
            };
            let Some(price) = parse_amount(&caps[3]) else {
                continue;
            };
            let name = caps[2].trim().to_string();

            results.push(
                ExtractionMatch::new(LineItem::new(name, quantity, price), "item", full_match.as_str())
                    .with_position(full_match.start(), full_match.end()),
            );
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    fn items(text: &str) -> Vec<LineItem> {
        LineItemExtractor::new()
            .extract_all(text)
            .into_iter()
            .map(|m| m.value)
            .collect()
    }

    #[test]
    fn test_single_item() {
        assert_eq!(
            items("STORE NAME\n2024-08-15\n2 Widget 5.00\nTotal $12.34"),
            vec![LineItem::new("Widget", 2, Decimal::new(500, 2))]
        );
    }

    #[test]
    fn test_items_in_order_with_multiword_names() {
        let text = "1 Lg Neapolitan Shk 3.85 |\n3 Hash-Browns 1.20\n1 Animal Fries $5.90";
        assert_eq!(
            items(text),
            vec![
                LineItem::new("Lg Neapolitan Shk", 1, Decimal::new(385, 2)),
                LineItem::new("Hash-Browns", 3, Decimal::new(120, 2)),
                LineItem::new("Animal Fries", 1, Decimal::new(590, 2)),
            ]
        );
    }

    #[test]
    fn test_duplicates_are_not_merged() {
        let result = items("1 Coffee 2.00\n1 Coffee 2.00");
        assert_eq!(result.len(), 2);
        assert_eq!(result[0], result[1]);
    }

    #[test]
    fn test_zero_values_accepted() {
        assert_eq!(items("0 Bag 0.00"), vec![LineItem::new("Bag", 0, Decimal::ZERO)]);
    }

    #[test]
    fn test_item_does_not_span_lines() {
        assert!(items("2\nWidget\n5.00").is_empty());
    }

    #[test]
    fn test_digits_glued_to_words_are_not_quantities() {
        assert!(items("1 Db1-Db1 Animal 5.90").is_empty());
    }

    #[test]
    fn test_oversized_quantity_skipped() {
        let result = items("99999999999 Crates 1.00\n2 Widget 5.00");
        assert_eq!(result, vec![LineItem::new("Widget", 2, Decimal::new(500, 2))]);
    }

    #[test]
    fn test_extract_reports_position() {
        let m = LineItemExtractor::new().extract("xx 2 Widget 5.00").unwrap();
        assert_eq!(m.position, Some((3, 16)));
        assert_eq!(m.source, "2 Widget 5.00");
    }

    #[test]
    fn test_no_items() {
        assert!(items("no structure here at all").is_empty());
    }
}

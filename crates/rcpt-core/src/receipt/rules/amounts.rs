//! Total amount extraction.

use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::trace;

use crate::models::text::RawText;

use super::patterns::TOTAL_AMOUNT;
use super::{ExtractionMatch, FieldExtractor};

/// Total amount extractor.
///
/// Totals sit near the end of a receipt, so lines are scanned bottom-up and
/// the first line holding an amount decides. This keeps item prices higher
/// up from being taken for the total.
pub struct TotalExtractor;

impl TotalExtractor {
    pub fn new() -> Self {
        Self
    }

    fn amount_in_line(line: &str) -> Option<(Decimal, &str)> {
        let caps = TOTAL_AMOUNT.captures(line)?;
        let amount = parse_amount(&format!("{}.{}", &caps[1], &caps[2]))?;
        Some((amount, caps.get(0)?.as_str()))
    }
}

impl Default for TotalExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for TotalExtractor {
    type Output = ExtractionMatch<Decimal>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let text = RawText::new(text);
        let line_count = text.lines().count();
        text.lines_rev().enumerate().find_map(|(i, line)| {
            let (amount, source) = Self::amount_in_line(line)?;
            trace!("total candidate {} on line {}", amount, line_count - i);
            Some(ExtractionMatch::new(amount, "amount", source.trim()))
        })
    }

    /// One amount per line, bottom-up.
    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        RawText::new(text)
            .lines_rev()
            .filter_map(Self::amount_in_line)
            .map(|(amount, source)| ExtractionMatch::new(amount, "amount", source.trim()))
            .collect()
    }
}

/// Parse a printed amount such as `$1,234.56` or `12.30`.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .trim()
        .trim_start_matches(['$', '€', '£'])
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    Decimal::from_str(&cleaned).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total(text: &str) -> Option<Decimal> {
        TotalExtractor::new().extract(text).map(|m| m.value)
    }

    #[test]
    fn test_bottom_line_wins() {
        let text = "HEADER\nx\nItem A  $5.00\n\n\n\n\n\nTotal  $12.34";
        assert_eq!(total(text), Some(Decimal::new(1234, 2)));
    }

    #[test]
    fn test_skips_trailing_lines_without_amounts() {
        let text = "1 Tea 2.50\nAmount Due $10.51\nTHANK YOU!\nCall 800-786-1000";
        assert_eq!(total(text), Some(Decimal::new(1051, 2)));
    }

    #[test]
    fn test_currency_symbols() {
        assert_eq!(total("TOTAL €7.99"), Some(Decimal::new(799, 2)));
        assert_eq!(total("TOTAL £ 3.10"), Some(Decimal::new(310, 2)));
        assert_eq!(total("TOTAL 42.00"), Some(Decimal::new(4200, 2)));
    }

    #[test]
    fn test_thousands_separator() {
        assert_eq!(total("Total $1,234.56"), Some(Decimal::new(123456, 2)));
    }

    #[test]
    fn test_requires_two_fraction_digits() {
        assert_eq!(total("PRICE/G: $4.359\nGALLONS : 4,591"), None);
        assert_eq!(total("Change $.00"), None);
    }

    #[test]
    fn test_no_total() {
        assert_eq!(total("no structure here at all"), None);
        assert_eq!(total(""), None);
    }

    #[test]
    fn test_extract_all_bottom_up() {
        let all = TotalExtractor::new().extract_all("A 1.00\nB 2.00\nC 3.00");
        let values: Vec<Decimal> = all.into_iter().map(|m| m.value).collect();
        assert_eq!(values, vec![Decimal::new(300, 2), Decimal::new(200, 2), Decimal::new(100, 2)]);
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("$1,234.56"), Some(Decimal::new(123456, 2)));
        assert_eq!(parse_amount(" 12.30 "), Some(Decimal::new(1230, 2)));
        assert_eq!(parse_amount("abc"), None);
    }
}

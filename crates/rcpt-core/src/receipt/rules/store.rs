//! Store name detection.

use crate::models::text::RawText;

use super::patterns::STORE_NAME_LINE;
use super::{ExtractionMatch, FieldExtractor};

/// Store name extractor.
///
/// Picks the first line made only of capital letters, spaces and hyphens.
/// Receipts print the merchant in a header, so the first such line is
/// usually it.
pub struct StoreNameExtractor;

impl StoreNameExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StoreNameExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for StoreNameExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let text = RawText::new(text);
        text.lines()
            .map(str::trim)
            .filter(|line| STORE_NAME_LINE.is_match(line))
            .map(|line| ExtractionMatch::new(line.to_string(), "capitals line", line))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(text: &str) -> Option<String> {
        StoreNameExtractor::new().extract(text).map(|m| m.value)
    }

    #[test]
    fn test_first_capitals_line() {
        assert_eq!(store("STORE NAME\n2024-08-15"), Some("STORE NAME".to_string()));
        assert_eq!(
            store("\n  ARCO GASOLINE  \nARCO AM/PM 42598"),
            Some("ARCO GASOLINE".to_string())
        );
    }

    #[test]
    fn test_hyphens_allowed() {
        assert_eq!(
            store("94\nIN-N-OUT CARMEL MOUNTAIN\nNB? 2 772"),
            Some("IN-N-OUT CARMEL MOUNTAIN".to_string())
        );
    }

    #[test]
    fn test_rejects_digits_lowercase_and_punctuation() {
        assert_eq!(store("ARCO AM/PM 42598\nStore name\nTRAN#9015169"), None);
    }

    #[test]
    fn test_separator_lines_are_not_names() {
        assert_eq!(store("-----\n   \nWALMART"), Some("WALMART".to_string()));
    }

    #[test]
    fn test_no_store() {
        assert_eq!(store("no structure here at all"), None);
        assert_eq!(store(""), None);
    }
}

//! Recognized receipt text.

use std::borrow::Cow;

/// OCR output for one receipt.
///
/// Text from multi-page sources is concatenated in page order. Lines are
/// exposed as-is; no cleanup is applied, so OCR noise reaches the
/// extractors unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawText<'a> {
    text: Cow<'a, str>,
}

impl<'a> RawText<'a> {
    /// Wrap already-recognized text.
    pub fn new(text: &'a str) -> Self {
        Self {
            text: Cow::Borrowed(text),
        }
    }

    /// Decode bytes that may contain invalid UTF-8 sequences.
    pub fn from_utf8_lossy(bytes: &'a [u8]) -> Self {
        Self {
            text: String::from_utf8_lossy(bytes),
        }
    }

    /// Join per-page OCR output in page order.
    pub fn from_pages<S: AsRef<str>>(pages: &[S]) -> RawText<'static> {
        let joined = pages
            .iter()
            .map(|p| p.as_ref())
            .collect::<Vec<_>>()
            .join("\n");
        RawText {
            text: Cow::Owned(joined),
        }
    }

    /// The full text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Lines from top to bottom.
    pub fn lines(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.text.lines()
    }

    /// Lines from bottom to top.
    pub fn lines_rev(&self) -> impl Iterator<Item = &str> {
        self.text.lines().rev()
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

impl<'a> From<&'a str> for RawText<'a> {
    fn from(text: &'a str) -> Self {
        Self::new(text)
    }
}

impl AsRef<str> for RawText<'_> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_are_joined_in_order() {
        let text = RawText::from_pages(&["PAGE ONE\n1 Tea 2.00", "Total $2.00"]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["PAGE ONE", "1 Tea 2.00", "Total $2.00"]);
    }

    #[test]
    fn test_lines_rev() {
        let text = RawText::new("a\nb\nc");
        let lines: Vec<&str> = text.lines_rev().collect();
        assert_eq!(lines, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_lossy_decoding() {
        let text = RawText::from_utf8_lossy(b"STORE\xff\nTotal $1.00");
        assert_eq!(text.lines().count(), 2);
        assert!(text.as_str().contains('\u{fffd}'));
    }

    #[test]
    fn test_blank_text_is_empty() {
        assert!(RawText::new("  \n\t").is_empty());
        assert!(!RawText::new("x").is_empty());
    }
}

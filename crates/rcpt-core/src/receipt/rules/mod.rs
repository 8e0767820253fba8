//! Rule-based field extractors for receipts.
//!
//! Every extractor reads the whole text on its own; none depends on the
//! outcome of another.

pub mod amounts;
pub mod dates;
pub mod items;
pub mod patterns;
pub mod payment;
pub mod store;
pub mod times;

pub use amounts::{parse_amount, TotalExtractor};
pub use dates::{normalize_date, DateExtractor, DateFormat, DateRule};
pub use items::LineItemExtractor;
pub use payment::PaymentMethodExtractor;
pub use store::StoreNameExtractor;
pub use times::{normalize_time, TimeExtractor, TimeRule};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// An extracted value together with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Name of the rule that matched.
    pub rule: &'static str,
    /// Source text that was matched.
    pub source: String,
    /// Byte span in the source text.
    pub position: Option<(usize, usize)>,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, rule: &'static str, source: impl Into<String>) -> Self {
        Self {
            value,
            rule,
            source: source.into(),
            position: None,
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

/// A recognized substring that has not been normalized yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatch<'t> {
    /// Name of the rule that matched.
    pub rule: &'static str,
    /// Matched substring.
    pub text: &'t str,
    /// Byte offset of the substring.
    pub start: usize,
    pub end: usize,
}

impl<'t> RawMatch<'t> {
    fn from_capture(rule: &'static str, m: regex::Match<'t>) -> Self {
        Self {
            rule,
            text: m.as_str(),
            start: m.start(),
            end: m.end(),
        }
    }

    /// Attach a normalized value.
    pub fn into_match<T>(self, value: T) -> ExtractionMatch<T> {
        ExtractionMatch::new(value, self.rule, self.text).with_position(self.start, self.end)
    }
}

//! Date recognition and normalization for receipts.
//!
//! Recognizer rules and normalization templates share the [`DateFormat`]
//! enum: each rule lists the templates able to read what it matches, so a
//! recognized date can only be dropped when it is not a real calendar date.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, trace};

use super::patterns::{
    DATE_DMONY_DASH, DATE_DMONY_SPACE, DATE_MDY_LONG, DATE_MDY_SHORT, DATE_SLASH_GENERIC,
    DATE_YMD_DASH, DATE_YMD_SLASH,
};
use super::{ExtractionMatch, FieldExtractor, RawMatch};

/// A source date layout.
///
/// Parsing follows strptime conventions: `YYYY` is exactly four digits, `YY`
/// exactly two, `MM`/`DD` one or two, `MON` an English month abbreviation in
/// any case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateFormat {
    /// `YYYY/MM/DD`
    YearMonthDaySlash,
    /// `MM/DD/YYYY`
    MonthDayYearSlash,
    /// `YYYY-MM-DD`
    YearMonthDayDash,
    /// `MM/DD/YY`
    MonthDayShortYearSlash,
    /// `DD/MM/YYYY`
    DayMonthYearSlash,
    /// `DD-MM-YYYY`
    DayMonthYearDash,
    /// `DD MM YYYY`
    DayMonthYearSpace,
    /// `DD-MON-YYYY`
    DayMonthNameYearDash,
    /// `DD MON YYYY`
    DayMonthNameYearSpace,
}

lazy_static! {
    static ref SHAPE_YMD_SLASH: Regex = Regex::new(r"^\d{4}/\d{1,2}/\d{1,2}$").unwrap();
    static ref SHAPE_MDY_SLASH: Regex = Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}$").unwrap();
    static ref SHAPE_YMD_DASH: Regex = Regex::new(r"^\d{4}-\d{1,2}-\d{1,2}$").unwrap();
    static ref SHAPE_MDY_SHORT_SLASH: Regex = Regex::new(r"^\d{1,2}/\d{1,2}/\d{2}$").unwrap();
    static ref SHAPE_DMY_DASH: Regex = Regex::new(r"^\d{1,2}-\d{1,2}-\d{4}$").unwrap();
    static ref SHAPE_DMY_SPACE: Regex = Regex::new(r"^\d{1,2} \d{1,2} \d{4}$").unwrap();
    static ref SHAPE_DMONY_DASH: Regex = Regex::new(r"^\d{1,2}-[A-Za-z]{3}-\d{4}$").unwrap();
    static ref SHAPE_DMONY_SPACE: Regex = Regex::new(r"^\d{1,2} [A-Za-z]{3} \d{4}$").unwrap();
}

impl DateFormat {
    /// Templates in the order the normalizer tries them.
    pub const NORMALIZATION_ORDER: [DateFormat; 9] = [
        DateFormat::YearMonthDaySlash,
        DateFormat::MonthDayYearSlash,
        DateFormat::YearMonthDayDash,
        DateFormat::MonthDayShortYearSlash,
        DateFormat::DayMonthYearSlash,
        DateFormat::DayMonthYearDash,
        DateFormat::DayMonthYearSpace,
        DateFormat::DayMonthNameYearDash,
        DateFormat::DayMonthNameYearSpace,
    ];

    /// Human-readable layout, e.g. `MM/DD/YY`.
    pub fn name(self) -> &'static str {
        match self {
            DateFormat::YearMonthDaySlash => "YYYY/MM/DD",
            DateFormat::MonthDayYearSlash => "MM/DD/YYYY",
            DateFormat::YearMonthDayDash => "YYYY-MM-DD",
            DateFormat::MonthDayShortYearSlash => "MM/DD/YY",
            DateFormat::DayMonthYearSlash => "DD/MM/YYYY",
            DateFormat::DayMonthYearDash => "DD-MM-YYYY",
            DateFormat::DayMonthYearSpace => "DD MM YYYY",
            DateFormat::DayMonthNameYearDash => "DD-MON-YYYY",
            DateFormat::DayMonthNameYearSpace => "DD MON YYYY",
        }
    }

    fn chrono_format(self) -> &'static str {
        match self {
            DateFormat::YearMonthDaySlash => "%Y/%m/%d",
            DateFormat::MonthDayYearSlash => "%m/%d/%Y",
            DateFormat::YearMonthDayDash => "%Y-%m-%d",
            DateFormat::MonthDayShortYearSlash => "%m/%d/%y",
            DateFormat::DayMonthYearSlash => "%d/%m/%Y",
            DateFormat::DayMonthYearDash => "%d-%m-%Y",
            DateFormat::DayMonthYearSpace => "%d %m %Y",
            DateFormat::DayMonthNameYearDash => "%d-%b-%Y",
            DateFormat::DayMonthNameYearSpace => "%d %b %Y",
        }
    }

    // chrono accepts short years for %Y, so digit counts are checked first.
    fn shape(self) -> &'static Regex {
        match self {
            DateFormat::YearMonthDaySlash => &*SHAPE_YMD_SLASH,
            DateFormat::MonthDayYearSlash | DateFormat::DayMonthYearSlash => &*SHAPE_MDY_SLASH,
            DateFormat::YearMonthDayDash => &*SHAPE_YMD_DASH,
            DateFormat::MonthDayShortYearSlash => &*SHAPE_MDY_SHORT_SLASH,
            DateFormat::DayMonthYearDash => &*SHAPE_DMY_DASH,
            DateFormat::DayMonthYearSpace => &*SHAPE_DMY_SPACE,
            DateFormat::DayMonthNameYearDash => &*SHAPE_DMONY_DASH,
            DateFormat::DayMonthNameYearSpace => &*SHAPE_DMONY_SPACE,
        }
    }

    /// Parse `raw` as this layout, rejecting impossible calendar dates.
    pub fn parse(self, raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        if !self.shape().is_match(raw) {
            return None;
        }
        NaiveDate::parse_from_str(raw, self.chrono_format()).ok()
    }

    /// Render `date` in this layout.
    pub fn format(self, date: NaiveDate) -> String {
        date.format(self.chrono_format()).to_string()
    }
}

/// Normalize a raw date substring with the first template that accepts it.
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    DateFormat::NORMALIZATION_ORDER
        .into_iter()
        .find_map(|format| format.parse(raw))
}

/// A date recognizer paired with the templates that can read its matches.
#[derive(Debug)]
pub struct DateRule {
    pub name: &'static str,
    pub pattern: &'static Regex,
    pub formats: &'static [DateFormat],
}

impl DateRule {
    /// First match of this rule in `text`.
    pub fn find<'t>(&self, text: &'t str) -> Option<RawMatch<'t>> {
        self.pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| RawMatch::from_capture(self.name, m))
    }

    /// All non-overlapping matches of this rule in `text`.
    pub fn find_all<'t>(&self, text: &'t str) -> Vec<RawMatch<'t>> {
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| RawMatch::from_capture(self.name, m))
            .collect()
    }

    /// Normalize a substring matched by this rule.
    pub fn normalize(&self, raw: &str) -> Option<NaiveDate> {
        self.formats.iter().find_map(|format| {
            let date = format.parse(raw);
            trace!("date template {} on '{}': {}", format.name(), raw, date.is_some());
            date
        })
    }
}

lazy_static! {
    /// Date rules in priority order.
    pub static ref DATE_RULES: Vec<DateRule> = vec![
        DateRule {
            name: "YYYY/MM/DD",
            pattern: &*DATE_YMD_SLASH,
            formats: &[DateFormat::YearMonthDaySlash],
        },
        DateRule {
            name: "MM/DD/YY",
            pattern: &*DATE_MDY_SHORT,
            formats: &[DateFormat::MonthDayShortYearSlash],
        },
        DateRule {
            name: "MM/DD/YYYY",
            pattern: &*DATE_MDY_LONG,
            formats: &[DateFormat::MonthDayYearSlash, DateFormat::DayMonthYearSlash],
        },
        DateRule {
            name: "YYYY-MM-DD",
            pattern: &*DATE_YMD_DASH,
            formats: &[DateFormat::YearMonthDayDash],
        },
        DateRule {
            name: "M/D/Y",
            pattern: &*DATE_SLASH_GENERIC,
            formats: &[
                DateFormat::MonthDayYearSlash,
                DateFormat::MonthDayShortYearSlash,
                DateFormat::DayMonthYearSlash,
            ],
        },
        DateRule {
            name: "DD-MON-YYYY",
            pattern: &*DATE_DMONY_DASH,
            formats: &[DateFormat::DayMonthNameYearDash],
        },
        DateRule {
            name: "DD MON YYYY",
            pattern: &*DATE_DMONY_SPACE,
            formats: &[DateFormat::DayMonthNameYearSpace],
        },
    ];
}

/// Date field extractor.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Substring selected by the highest-priority matching rule.
    pub fn find_raw<'t>(&self, text: &'t str) -> Option<(&'static DateRule, RawMatch<'t>)> {
        DATE_RULES.iter().find_map(|rule| {
            let found = rule.find(text);
            trace!("date rule {} matched: {}", rule.name, found.is_some());
            found.map(|raw| (rule, raw))
        })
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<NaiveDate>;

    /// The first rule to match decides; if its substring cannot be
    /// normalized the date is absent, later rules are not consulted.
    fn extract(&self, text: &str) -> Option<Self::Output> {
        let (rule, raw) = self.find_raw(text)?;
        match rule.normalize(raw.text) {
            Some(date) => Some(raw.into_match(date)),
            None => {
                debug!("date '{}' matched rule {} but is not a valid date", raw.text, rule.name);
                None
            }
        }
    }

    /// Every normalizable candidate, rules in priority order.
    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        DATE_RULES
            .iter()
            .flat_map(|rule| {
                rule.find_all(text)
                    .into_iter()
                    .filter_map(move |raw| rule.normalize(raw.text).map(|date| raw.into_match(date)))
            })
            .collect()
    }
}

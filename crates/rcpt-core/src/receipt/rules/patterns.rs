//! Compiled regex patterns for receipt field extraction.
//!
//! Priority between patterns of the same field is defined by the rule lists
//! in the field modules, not here.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Date recognizers
    pub static ref DATE_YMD_SLASH: Regex = Regex::new(
        r"\b(\d{4}/\d{2}/\d{2})\b"
    ).unwrap();

    pub static ref DATE_MDY_SHORT: Regex = Regex::new(
        r"\b(\d{2}/\d{2}/\d{2})\b"
    ).unwrap();

    pub static ref DATE_MDY_LONG: Regex = Regex::new(
        r"\b(\d{2}/\d{2}/\d{4})\b"
    ).unwrap();

    pub static ref DATE_YMD_DASH: Regex = Regex::new(
        r"\b(\d{4}-\d{2}-\d{2})\b"
    ).unwrap();

    pub static ref DATE_SLASH_GENERIC: Regex = Regex::new(
        r"\b(\d{1,2}/\d{1,2}/(?:\d{4}|\d{2}))\b"
    ).unwrap();

    pub static ref DATE_DMONY_DASH: Regex = Regex::new(
        r"(?i)\b(\d{1,2}-(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)-\d{4})\b"
    ).unwrap();

    pub static ref DATE_DMONY_SPACE: Regex = Regex::new(
        r"(?i)\b(\d{1,2} (?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec) \d{4})\b"
    ).unwrap();

    // Time recognizers. The leading guard keeps "12:13:45" from matching
    // as "13:45"; the times are read from capture group 1. "14:22:05" is
    // still read as "14:22" by the HH:MM rule.
    pub static ref TIME_12H: Regex = Regex::new(
        r"(?i)(?:^|[^\w:])(\d{1,2}:\d{2} ?[AP]M)\b"
    ).unwrap();

    pub static ref TIME_24H: Regex = Regex::new(
        r"(?:^|[^\w:])(\d{2}:\d{2})\b"
    ).unwrap();

    pub static ref TIME_12H_SECONDS: Regex = Regex::new(
        r"(?i)(?:^|[^\w:])(\d{1,2}:\d{2}:\d{2} ?[AP]M)\b"
    ).unwrap();

    pub static ref TIME_24H_SECONDS_SUFFIX: Regex = Regex::new(
        r"(?:^|[^\w:])(\d{2}:\d{2}:\d{2}[A-Za-z])"
    ).unwrap();

    // Money: optional currency symbol, two fraction digits
    pub static ref TOTAL_AMOUNT: Regex = Regex::new(
        r"[$€£]?\s?(\d{1,3}(?:,\d{3})+|\d+)\.(\d{2})\b"
    ).unwrap();

    // "<qty> <name> <price>" on a single line
    pub static ref LINE_ITEM: Regex = Regex::new(
        r"\b(\d+)[ \t]+([A-Za-z][A-Za-z \t-]*?)[ \t]+[$€£]?(\d+\.\d{2})\b"
    ).unwrap();

    // Whole (trimmed) line of capitals, spaces and hyphens
    pub static ref STORE_NAME_LINE: Regex = Regex::new(
        r"^[A-Z -]*[A-Z][A-Z -]*$"
    ).unwrap();
}

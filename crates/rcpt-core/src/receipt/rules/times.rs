//! Time recognition and normalization.

use chrono::NaiveTime;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, trace};

use super::patterns::{TIME_12H, TIME_12H_SECONDS, TIME_24H, TIME_24H_SECONDS_SUFFIX};
use super::{ExtractionMatch, FieldExtractor, RawMatch};

/// A time recognizer.
#[derive(Debug)]
pub struct TimeRule {
    pub name: &'static str,
    pub pattern: &'static Regex,
}

impl TimeRule {
    pub fn find<'t>(&self, text: &'t str) -> Option<RawMatch<'t>> {
        self.pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| RawMatch::from_capture(self.name, m))
    }

    /// Every match of this rule in `text`, in order.
    ///
    /// The leading guard consumes the character before a time, so each
    /// search resumes at the end of the time itself.
    pub fn find_all<'t>(&self, text: &'t str) -> Vec<RawMatch<'t>> {
        let mut matches = Vec::new();
        let mut start = 0;

        while let Some(m) = self
            .pattern
            .captures_at(text, start)
            .and_then(|caps| caps.get(1))
        {
            start = m.end();
            matches.push(RawMatch::from_capture(self.name, m));
        }

        matches
    }
}

lazy_static! {
    /// Time rules in priority order.
    pub static ref TIME_RULES: Vec<TimeRule> = vec![
        TimeRule { name: "H:MM AM/PM", pattern: &*TIME_12H },
        TimeRule { name: "HH:MM", pattern: &*TIME_24H },
        TimeRule { name: "H:MM:SS AM/PM", pattern: &*TIME_12H_SECONDS },
        TimeRule { name: "HH:MM:SS", pattern: &*TIME_24H_SECONDS_SUFFIX },
    ];
}

/// Bring a raw time substring to `hh:mm AM|PM`.
///
/// Strings that already carry a designator are returned untouched, and
/// anything that is not a 24-hour `HH:MM` time comes back as given.
pub fn normalize_time(raw: &str) -> String {
    let upper = raw.to_ascii_uppercase();
    if upper.contains("AM") || upper.contains("PM") {
        return raw.to_string();
    }

    match NaiveTime::parse_from_str(raw.trim(), "%H:%M") {
        Ok(time) => time.format("%I:%M %p").to_string(),
        Err(e) => {
            debug!("keeping raw time '{}': {}", raw, e);
            raw.to_string()
        }
    }
}

/// Time field extractor.
pub struct TimeExtractor;

impl TimeExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Substring selected by the highest-priority matching rule.
    pub fn find_raw<'t>(&self, text: &'t str) -> Option<RawMatch<'t>> {
        TIME_RULES.iter().find_map(|rule| {
            let found = rule.find(text);
            trace!("time rule {} matched: {}", rule.name, found.is_some());
            found
        })
    }
}

impl Default for TimeExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for TimeExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.find_raw(text).map(|raw| {
            let time = normalize_time(raw.text);
            raw.into_match(time)
        })
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        TIME_RULES
            .iter()
            .flat_map(|rule| rule.find_all(text))
            .map(|raw| {
                let time = normalize_time(raw.text);
                raw.into_match(time)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> Option<String> {
        TimeExtractor::new().extract(text).map(|m| m.value)
    }

    #[test]
    fn test_24_hour_converted() {
        assert_eq!(normalize_time("19:04"), "07:04 PM");
        assert_eq!(normalize_time("00:15"), "12:15 AM");
        assert_eq!(normalize_time("12:00"), "12:00 PM");
    }

    #[test]
    fn test_canonical_time_unchanged() {
        for canonical in ["07:04 PM", "12:13 AM", "11:59 PM"] {
            assert_eq!(normalize_time(canonical), canonical);
        }
    }

    #[test]
    fn test_invalid_time_kept_raw() {
        assert_eq!(normalize_time("25:61"), "25:61");
        assert_eq!(normalize_time("14:22:05Z"), "14:22:05Z");
    }

    #[test]
    fn test_extract_24_hour() {
        assert_eq!(extract("DATE 8/23/24 19:04\nPUMP# 01"), Some("07:04 PM".to_string()));
    }

    #[test]
    fn test_extract_12_hour() {
        assert_eq!(extract("2024-08-15 Lille 12:13 AM"), Some("12:13 AM".to_string()));
    }

    #[test]
    fn test_am_pm_rule_has_priority() {
        // The 24-hour time comes first in the text, AM/PM still wins.
        assert_eq!(extract("Open 09:00\nPrinted 3:45 PM"), Some("3:45 PM".to_string()));
    }

    #[test]
    fn test_seconds_are_not_read_as_minutes() {
        assert_eq!(extract("12:13:45 PM"), Some("12:13:45 PM".to_string()));
    }

    #[test]
    fn test_seconds_without_suffix_read_as_hours_and_minutes() {
        let result = TimeExtractor::new()
            .extract("DATE 08/23/24 14:22:05\nTOTAL 5.00")
            .unwrap();
        assert_eq!(result.value, "02:22 PM");
        assert_eq!(result.source, "14:22");
        assert_eq!(result.rule, "HH:MM");
    }

    #[test]
    fn test_seconds_with_suffix() {
        assert_eq!(extract("at 14:22:05Z"), Some("02:22 PM".to_string()));

        let rule = TIME_RULES.iter().find(|r| r.name == "HH:MM:SS").unwrap();
        let found = rule.find("at 14:22:05Z").unwrap();
        assert_eq!(found.text, "14:22:05Z");
        assert_eq!(normalize_time(found.text), "14:22:05Z");
    }

    #[test]
    fn test_invalid_24_hour_kept_raw() {
        let result = TimeExtractor::new().extract("stamp 27:99 end").unwrap();
        assert_eq!(result.value, "27:99");
        assert_eq!(result.rule, "HH:MM");
    }

    #[test]
    fn test_no_time() {
        assert_eq!(extract("no structure here at all"), None);
        assert_eq!(extract(""), None);
    }

    #[test]
    fn test_extract_all() {
        let all = TimeExtractor::new().extract_all("printed 18:45, ref 3:05:10 PM");
        let values: Vec<&str> = all.iter().map(|m| m.value.as_str()).collect();
        assert_eq!(values, vec!["06:45 PM", "3:05:10 PM"]);
    }

    #[test]
    fn test_extract_all_adjacent_times() {
        let all = TimeExtractor::new().extract_all("open 10:00 11:00 close");
        let values: Vec<&str> = all.iter().map(|m| m.value.as_str()).collect();
        assert_eq!(values, vec!["10:00 AM", "11:00 AM"]);
        assert_eq!(all[1].position, Some((11, 16)));
    }
}

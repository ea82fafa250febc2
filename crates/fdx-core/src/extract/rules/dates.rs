//! Date extraction.
//!
//! Dates are returned as matched, without normalization. Numeric forms are
//! ambiguous: `03/04/2023` satisfies both the month-first and day-first rules
//! and the month-first rule wins because it is tried first.

use regex::Regex;

use super::patterns::{DATE_DMY, DATE_MDY, DATE_MONTH_NAME, DATE_YMD};
use super::{first_match, ExtractionMatch, FieldExtractor, Rule};

/// A named date-shape pattern.
pub struct DateRule {
    name: &'static str,
    pattern: &'static Regex,
}

impl DateRule {
    pub const fn new(name: &'static str, pattern: &'static Regex) -> Self {
        Self { name, pattern }
    }
}

impl Rule for DateRule {
    type Output = ExtractionMatch<String>;

    fn name(&self) -> &str {
        self.name
    }

    fn apply(&self, text: &str) -> Option<Self::Output> {
        self.pattern.find(text).map(|m| {
            ExtractionMatch::new(m.as_str().to_string(), m.as_str())
                .with_position(m.start(), m.end())
        })
    }
}

lazy_static::lazy_static! {
    /// Date rules in priority order.
    pub static ref DATE_RULES: [DateRule; 4] = [
        DateRule::new("month_day_year", &DATE_MDY),
        DateRule::new("day_month_year", &DATE_DMY),
        DateRule::new("year_month_day", &DATE_YMD),
        DateRule::new("month_name", &DATE_MONTH_NAME),
    ];
}

/// Date field extractor.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        first_match(DATE_RULES.as_slice(), text)
    }

    /// Every date the winning rule matched, in order of appearance.
    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        DATE_RULES
            .iter()
            .map(|rule| {
                rule.pattern
                    .find_iter(text)
                    .map(|m| {
                        ExtractionMatch::new(m.as_str().to_string(), m.as_str())
                            .with_position(m.start(), m.end())
                    })
                    .collect::<Vec<_>>()
            })
            .find(|matches| !matches.is_empty())
            .unwrap_or_default()
    }
}

/// Extract the first date from text, verbatim from the case-folded input.
pub fn extract_date(text: &str) -> Option<String> {
    DateExtractor::new()
        .extract(&text.to_lowercase())
        .map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ambiguous_numeric_date_is_month_first() {
        let m = DateExtractor::new().extract("03/04/2023").unwrap();
        assert_eq!(m.value, "03/04/2023");
        assert_eq!(m.position, Some((0, 10)));

        assert_eq!(
            first_match(&DATE_RULES[..1], "03/04/2023").map(|m| m.value),
            Some("03/04/2023".to_string())
        );
    }

    #[test]
    fn test_day_first_when_month_impossible() {
        assert_eq!(extract_date("Issued 25/12/2023"), Some("25/12/2023".to_string()));
        assert!(DATE_RULES[0].apply("25/12/2023").is_none());
        assert!(DATE_RULES[1].apply("25/12/2023").is_some());
    }

    #[test]
    fn test_dashes() {
        assert_eq!(extract_date("due 12-31-2024"), Some("12-31-2024".to_string()));
    }

    #[test]
    fn test_year_first() {
        assert_eq!(extract_date("Date: 2023-04-05"), Some("2023-04-05".to_string()));
        assert_eq!(extract_date("2023/11/30"), Some("2023/11/30".to_string()));
    }

    #[test]
    fn test_month_name() {
        assert_eq!(
            extract_date("Dated January 1, 2023"),
            Some("january 1, 2023".to_string())
        );
        assert!(DATE_RULES[3].apply("MARCH 15, 2024").is_some());
    }

    #[test]
    fn test_numeric_rule_beats_month_name_regardless_of_position() {
        let text = "march 3, 2024 ... paid 04/01/2024";
        assert_eq!(extract_date(text), Some("04/01/2024".to_string()));
    }

    #[test]
    fn test_first_match_within_rule() {
        assert_eq!(
            extract_date("from 01/02/2024 to 01/03/2024"),
            Some("01/02/2024".to_string())
        );
        let all = DateExtractor::new().extract_all("from 01/02/2024 to 01/03/2024");
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_no_date() {
        assert_eq!(extract_date("no dates here, just $5.00"), None);
        assert!(DateExtractor::new().extract_all("nothing").is_empty());
    }
}

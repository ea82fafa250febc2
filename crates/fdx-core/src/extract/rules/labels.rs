//! Labeled field extraction (vendor, description).
//!
//! A label is a keyword such as `vendor:`; the value is the text after its
//! first occurrence, cut at the first line break, period or comma.

use super::{first_match, ExtractionMatch, FieldExtractor, Rule};

/// Vendor labels in priority order.
pub const VENDOR_LABELS: [&str; 6] = [
    "from:",
    "vendor:",
    "supplier:",
    "bill from:",
    "company:",
    "business:",
];

/// Description labels in priority order.
pub const DESCRIPTION_LABELS: [&str; 4] = ["description:", "details:", "item:", "service:"];

const VALUE_TERMINATORS: [char; 4] = ['\n', '\r', '.', ','];

/// A single label keyword.
#[derive(Debug, Clone)]
pub struct LabelRule {
    keyword: String,
}

impl LabelRule {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into().to_lowercase(),
        }
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }
}

impl Rule for LabelRule {
    type Output = ExtractionMatch<Option<String>>;

    fn name(&self) -> &str {
        &self.keyword
    }

    /// Matches whenever the keyword occurs. The value is `None` when nothing
    /// usable follows it; lower-priority labels are still not consulted.
    fn apply(&self, text: &str) -> Option<Self::Output> {
        if self.keyword.is_empty() {
            return None;
        }

        let start = text.find(&self.keyword)?;
        let after = &text[start + self.keyword.len()..];
        let trimmed = after.trim_start();
        let value = trimmed
            .split(&VALUE_TERMINATORS[..])
            .next()
            .unwrap_or("")
            .trim();

        let value_start = start + self.keyword.len() + (after.len() - trimmed.len());
        let end = value_start + value.len();
        let value = (!value.is_empty()).then(|| value.to_string());

        Some(ExtractionMatch::new(value, &text[start..end]).with_position(start, end))
    }
}

/// Extractor over a priority-ordered label list.
#[derive(Debug, Clone)]
pub struct LabelExtractor {
    rules: Vec<LabelRule>,
}

impl LabelExtractor {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rules: keywords.into_iter().map(LabelRule::new).collect(),
        }
    }

    /// Extractor with the default vendor labels.
    pub fn vendor() -> Self {
        Self::new(VENDOR_LABELS)
    }

    /// Extractor with the default description labels.
    pub fn description() -> Self {
        Self::new(DESCRIPTION_LABELS)
    }

    pub fn rules(&self) -> &[LabelRule] {
        &self.rules
    }
}

impl FieldExtractor for LabelExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        first_match(&self.rules, text).and_then(settle)
    }

    /// Values for every label present, in priority order.
    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.rules
            .iter()
            .filter_map(|rule| rule.apply(text))
            .filter_map(settle)
            .collect()
    }
}

fn settle(found: ExtractionMatch<Option<String>>) -> Option<ExtractionMatch<String>> {
    let ExtractionMatch {
        value,
        position,
        source,
    } = found;

    value.map(|value| ExtractionMatch {
        value,
        position,
        source,
    })
}

/// Extract the value following the highest-priority label present in `text`.
pub fn extract_labeled<S: AsRef<str>>(text: &str, keywords: &[S]) -> Option<String> {
    LabelExtractor::new(keywords.iter().map(|k| k.as_ref().to_string()))
        .extract(&text.to_lowercase())
        .map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_vendor_truncated_at_period() {
        assert_eq!(
            extract_labeled("invoice vendor: Acme Supplies. thank you", &VENDOR_LABELS),
            Some("acme supplies".to_string())
        );
    }

    #[test]
    fn test_truncates_at_comma_and_newline() {
        assert_eq!(
            extract_labeled("Supplier: Bob's Timber, Unit 4", &VENDOR_LABELS),
            Some("bob's timber".to_string())
        );
        assert_eq!(
            extract_labeled("Company:   Northside Electrical\nABN 123", &VENDOR_LABELS),
            Some("northside electrical".to_string())
        );
        assert_eq!(
            extract_labeled("details: site cleanup\r\nthanks", &DESCRIPTION_LABELS),
            Some("site cleanup".to_string())
        );
    }

    #[test]
    fn test_value_on_following_line() {
        assert_eq!(
            extract_labeled("Vendor:\n  Acme Plumbing\n", &VENDOR_LABELS),
            Some("acme plumbing".to_string())
        );
    }

    #[test]
    fn test_priority_order_over_position() {
        let text = "Vendor: Second Co\nFrom: First Co";
        assert_eq!(
            extract_labeled(text, &VENDOR_LABELS),
            Some("first co".to_string())
        );
    }

    #[test]
    fn test_bill_from_is_caught_by_from() {
        assert_eq!(
            extract_labeled("Bill From: Harbour Hardware", &VENDOR_LABELS),
            Some("harbour hardware".to_string())
        );
    }

    #[test]
    fn test_empty_value_stops_search() {
        let text = "from: , vendor: Acme";
        assert_eq!(extract_labeled(text, &VENDOR_LABELS), None);
    }

    #[test]
    fn test_absent_when_no_label() {
        assert_eq!(extract_labeled("just a total of $5.00", &VENDOR_LABELS), None);
        assert_eq!(extract_labeled("", &DESCRIPTION_LABELS), None);
    }

    #[test]
    fn test_custom_labels() {
        assert_eq!(
            extract_labeled("PAYEE: City Council", &["payee:"]),
            Some("city council".to_string())
        );
    }

    #[test]
    fn test_match_metadata() {
        let m = LabelExtractor::vendor().extract("vendor: acme. ok").unwrap();
        assert_eq!(m.source, "vendor: acme");
        assert_eq!(m.position, Some((0, 12)));
    }

    #[test]
    fn test_extract_all_lists_each_label() {
        let all = LabelExtractor::description().extract_all("item: tiles\nservice: install");
        let values: Vec<_> = all.into_iter().map(|m| m.value).collect();
        assert_eq!(values, vec!["tiles", "install"]);
    }
}

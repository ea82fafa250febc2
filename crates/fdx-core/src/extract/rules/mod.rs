//! Rule-based field extractors for financial documents.
//!
//! Extractors expect case-folded text; the free functions in each module fold
//! their input themselves.

pub mod amounts;
pub mod category;
pub mod dates;
pub mod labels;
pub mod patterns;

pub use amounts::{extract_amounts, max_amount, parse_amount, AmountExtractor};
pub use category::{classify, CategoryExtractor, CategoryRule, CATEGORY_RULES};
pub use dates::{extract_date, DateExtractor, DateRule, DATE_RULES};
pub use labels::{extract_labeled, LabelExtractor, LabelRule, DESCRIPTION_LABELS, VENDOR_LABELS};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// One entry of a priority-ordered rule list.
pub trait Rule {
    /// The value a successful rule yields.
    type Output;

    /// Short name used in logs and tests.
    fn name(&self) -> &str;

    /// Apply the rule, returning a value when it matches.
    fn apply(&self, text: &str) -> Option<Self::Output>;
}

/// Evaluate `rules` in order and return the first successful result.
pub fn first_match<R: Rule>(rules: &[R], text: &str) -> Option<R::Output> {
    rules.iter().find_map(|rule| {
        let value = rule.apply(text);
        if value.is_some() {
            tracing::trace!("rule '{}' matched", rule.name());
        }
        value
    })
}

/// Extracted value with where it came from.
#[derive(Debug, Clone)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Position in source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Contains(&'static str, u32);

    impl Rule for Contains {
        type Output = u32;

        fn name(&self) -> &str {
            self.0
        }

        fn apply(&self, text: &str) -> Option<u32> {
            text.contains(self.0).then_some(self.1)
        }
    }

    #[test]
    fn test_first_match_honors_order() {
        let rules = [Contains("b", 1), Contains("a", 2)];
        assert_eq!(first_match(&rules, "ab"), Some(1));
        assert_eq!(first_match(&rules, "a"), Some(2));
        assert_eq!(first_match(&rules, "c"), None);
    }

    #[test]
    fn test_first_match_empty_list() {
        let rules: [Contains; 0] = [];
        assert_eq!(first_match(&rules, "anything"), None);
    }
}

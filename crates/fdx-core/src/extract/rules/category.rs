//! Keyword-presence document classification.

use crate::models::record::DocumentCategory;

use super::{first_match, ExtractionMatch, FieldExtractor, Rule};

/// Any of `keywords` present classifies the text as `category`.
#[derive(Debug, Clone, Copy)]
pub struct CategoryRule {
    keywords: &'static [&'static str],
    category: DocumentCategory,
}

impl CategoryRule {
    pub const fn new(keywords: &'static [&'static str], category: DocumentCategory) -> Self {
        Self { keywords, category }
    }

    pub fn category(&self) -> DocumentCategory {
        self.category
    }
}

impl Rule for CategoryRule {
    type Output = ExtractionMatch<DocumentCategory>;

    fn name(&self) -> &str {
        self.category.as_str()
    }

    fn apply(&self, text: &str) -> Option<Self::Output> {
        self.keywords.iter().find_map(|keyword| {
            text.find(keyword).map(|start| {
                ExtractionMatch::new(self.category, *keyword)
                    .with_position(start, start + keyword.len())
            })
        })
    }
}

/// Classification rules in priority order.
pub const CATEGORY_RULES: [CategoryRule; 4] = [
    CategoryRule::new(&["invoice", "inv#"], DocumentCategory::Invoice),
    CategoryRule::new(&["receipt"], DocumentCategory::Receipt),
    CategoryRule::new(&["quote", "estimate"], DocumentCategory::Quote),
    CategoryRule::new(&["bill", "statement"], DocumentCategory::Bill),
];

/// Category field extractor.
pub struct CategoryExtractor;

impl CategoryExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Classify case-folded text, falling back to `Unknown`.
    pub fn classify(&self, text: &str) -> DocumentCategory {
        self.extract(text)
            .map(|m| m.value)
            .unwrap_or(DocumentCategory::Unknown)
    }
}

impl Default for CategoryExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for CategoryExtractor {
    type Output = ExtractionMatch<DocumentCategory>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        first_match(&CATEGORY_RULES, text)
    }

    /// Every category whose keywords appear, in priority order.
    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        CATEGORY_RULES
            .iter()
            .filter_map(|rule| rule.apply(text))
            .collect()
    }
}

/// Classify a document by the keywords it contains.
pub fn classify(text: &str) -> DocumentCategory {
    CategoryExtractor::new().classify(&text.to_lowercase())
}

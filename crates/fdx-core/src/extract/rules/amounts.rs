//! Dollar amount extraction.

use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::warn;

use super::patterns::DOLLAR_AMOUNT;
use super::{ExtractionMatch, FieldExtractor};

/// Amount field extractor.
///
/// Only `$` is recognized as a currency marker.
pub struct AmountExtractor;

impl AmountExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = ExtractionMatch<Decimal>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();

        for caps in DOLLAR_AMOUNT.captures_iter(text) {
            let Some(full_match) = caps.get(0) else {
                continue;
            };
            if let Some(amount) = parse_amount(&caps[1]) {
                results.push(
                    ExtractionMatch::new(amount, full_match.as_str())
                        .with_position(full_match.start(), full_match.end()),
                );
            }
        }

        results
    }
}

/// Extract every dollar amount from text, in order of appearance.
///
/// Duplicates are kept.
pub fn extract_amounts(text: &str) -> Vec<Decimal> {
    AmountExtractor::new()
        .extract_all(&text.to_lowercase())
        .into_iter()
        .map(|m| m.value)
        .collect()
}

/// Largest amount in the sequence, or `None` when it is empty.
pub fn max_amount(amounts: &[Decimal]) -> Option<Decimal> {
    amounts.iter().copied().max()
}

/// Parse a comma-grouped amount such as `1,234.56`.
///
/// Well-formed amounts too large for `Decimal` saturate to `Decimal::MAX`
/// so they still count towards the maximum.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();

    match Decimal::from_str(&cleaned) {
        Ok(amount) => Some(amount),
        Err(_) if is_plain_number(&cleaned) => {
            warn!("Amount {} exceeds the supported range, saturating", cleaned);
            Some(Decimal::MAX)
        }
        Err(_) => None,
    }
}

fn is_plain_number(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_digit())
        && s.chars().all(|c| c.is_ascii_digit() || c == '.')
        && s.matches('.').count() <= 1
}

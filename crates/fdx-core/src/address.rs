//! Australian street address description parsing.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::extract::rules::patterns::{POSTCODE, STREET_NUMBER, SUBURB_POSTCODE};

/// Known street types, full and abbreviated, in canonical casing.
pub const STREET_TYPES: &[&str] = &[
    "Street", "St", "Road", "Rd", "Avenue", "Ave", "Drive", "Dr", "Close", "Cl", "Court", "Ct",
    "Place", "Pl", "Crescent", "Cres", "Terrace", "Tce", "Parade", "Pde", "Highway", "Hwy",
    "Boulevard", "Blvd", "Esplanade", "Espl", "Parkway", "Pkwy", "Lane", "Ln", "Way", "Circuit",
    "Cct", "Rise", "Grove", "Walk", "Loop", "Bend",
];

const ABBREVIATIONS: &[(&str, &str)] = &[
    ("St", "Street"),
    ("Rd", "Road"),
    ("Ave", "Avenue"),
    ("Dr", "Drive"),
    ("Cl", "Close"),
    ("Ct", "Court"),
    ("Pl", "Place"),
    ("Cres", "Crescent"),
    ("Tce", "Terrace"),
    ("Pde", "Parade"),
    ("Hwy", "Highway"),
    ("Blvd", "Boulevard"),
    ("Espl", "Esplanade"),
    ("Pkwy", "Parkway"),
    ("Ln", "Lane"),
    ("Cct", "Circuit"),
];

/// Components of a one-line address. Missing parts are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressComponents {
    pub street_number: String,
    pub street_name: String,
    pub street_type: String,
    pub suburb: String,
    pub postcode: String,
}

fn street_type(word: &str) -> Option<&'static str> {
    STREET_TYPES
        .iter()
        .copied()
        .find(|t| t.eq_ignore_ascii_case(word))
}

/// Split a description such as `"12a Smith St, Paddington 4064, QLD"`.
pub fn parse_address_description(description: &str) -> AddressComponents {
    let mut result = AddressComponents::default();
    let parts: Vec<&str> = description.split(',').map(str::trim).collect();

    let street_part = parts.first().copied().unwrap_or_default();
    if let Some(caps) = STREET_NUMBER.captures(street_part) {
        result.street_number = caps[1].to_string();
        let remainder = caps[2].trim();
        let words: Vec<&str> = remainder.split_whitespace().collect();

        let found = words
            .iter()
            .enumerate()
            .rev()
            .find_map(|(i, w)| street_type(w).map(|t| (i, t)));

        match found {
            Some((index, kind)) if index > 0 => {
                result.street_name = words[..index].join(" ");
                result.street_type = kind.to_string();
            }
            _ => result.street_name = remainder.to_string(),
        }
    } else {
        let words: Vec<&str> = street_part.split_whitespace().collect();
        match words.split_last() {
            Some((last, rest)) if !rest.is_empty() => match street_type(last) {
                Some(kind) => {
                    result.street_name = rest.join(" ");
                    result.street_type = kind.to_string();
                }
                None => result.street_name = street_part.to_string(),
            },
            _ => result.street_name = street_part.to_string(),
        }
    }

    if let Some(suburb_part) = parts.get(1) {
        match SUBURB_POSTCODE.captures(suburb_part) {
            Some(caps) => {
                result.suburb = caps[1].trim().to_string();
                result.postcode = caps[2].to_string();
            }
            None => result.suburb = suburb_part.to_string(),
        }
    }

    if parts.len() >= 3 && result.postcode.is_empty() {
        if let Some(caps) = parts.last().and_then(|p| POSTCODE.captures(p)) {
            result.postcode = caps[1].to_string();
        }
    }

    debug!("Parsed address {:?} into {:?}", description, result);
    result
}

/// Expand a street type abbreviation (`"St"` -> `"Street"`).
///
/// Full names and unknown values are returned unchanged.
pub fn expand_street_type(street_type: &str) -> String {
    ABBREVIATIONS
        .iter()
        .find(|(abbrev, _)| abbrev.eq_ignore_ascii_case(street_type))
        .map(|(_, full)| full.to_string())
        .unwrap_or_else(|| street_type.to_string())
}

//! Common regex patterns for financial document extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Dollar amounts: $1,234.56 / $999 / $12.50
    pub static ref DOLLAR_AMOUNT: Regex = Regex::new(
        r"\$(\d{1,3}(?:,\d{3})*(?:\.\d{2})?)"
    ).unwrap();

    // MM/DD/YYYY or MM-DD-YYYY
    pub static ref DATE_MDY: Regex = Regex::new(
        r"\b(?:0?[1-9]|1[0-2])[/\-](?:0?[1-9]|[12]\d|3[01])[/\-]\d{4}\b"
    ).unwrap();

    // DD/MM/YYYY or DD-MM-YYYY
    pub static ref DATE_DMY: Regex = Regex::new(
        r"\b(?:0?[1-9]|[12]\d|3[01])[/\-](?:0?[1-9]|1[0-2])[/\-]\d{4}\b"
    ).unwrap();

    // YYYY/MM/DD or YYYY-MM-DD
    pub static ref DATE_YMD: Regex = Regex::new(
        r"\b\d{4}[/\-](?:0?[1-9]|1[0-2])[/\-](?:0?[1-9]|[12]\d|3[01])\b"
    ).unwrap();

    // January 1, 2023
    pub static ref DATE_MONTH_NAME: Regex = Regex::new(
        r"(?i)\b(?:january|february|march|april|may|june|july|august|september|october|november|december)\s+\d{1,2},\s+\d{4}\b"
    ).unwrap();

    // Street number followed by the rest of the street part: "12a Smith St"
    pub static ref STREET_NUMBER: Regex = Regex::new(
        r"^(\d+[a-zA-Z]?)\s+(.+)$"
    ).unwrap();

    // Suburb with trailing four-digit postcode: "Paddington 4064"
    pub static ref SUBURB_POSTCODE: Regex = Regex::new(
        r"^(.+?)\s+(\d{4})$"
    ).unwrap();

    pub static ref POSTCODE: Regex = Regex::new(
        r"\b(\d{4})\b"
    ).unwrap();
}

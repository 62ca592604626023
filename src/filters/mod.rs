pub mod extract_budget;
pub mod extract_filter;
pub mod extract_location;

use lazy_static::lazy_static;
use regex::Regex;

// "$1,200", "1200", "1.5k", "900 k"
const AMOUNT: &str = r"\$?\s*(\d{1,3}(?:,\d{3})+|\d+(?:\.\d+)?)\s*(k)?\b";

lazy_static! {
    pub static ref BETWEEN_REGEX: Regex = Regex::new(&format!(
        r"between\s+{}\s+and\s+{}",
        AMOUNT, AMOUNT
    ))
    .unwrap();
    pub static ref MAX_REGEX: Regex = Regex::new(&format!(
        r"(?:under|below|max(?:imum)?|up to|less than|no more than|at most|budget(?:\s+(?:of|is|around))?)\s+{}",
        AMOUNT
    ))
    .unwrap();
    pub static ref MIN_REGEX: Regex = Regex::new(&format!(
        r"(?:over|above|more than|min(?:imum)?|at least|starting at)\s+{}",
        AMOUNT
    ))
    .unwrap();
    // Case-insensitive preposition followed by capitalised words
    pub static ref LOCATION_REGEX: Regex = Regex::new(
        r"\b(?i:in|near|around)\s+(?:(?i:the)\s+)?([A-Z][\w'-]*(?:\s+[A-Z][\w'-]*)*)"
    )
    .unwrap();
}

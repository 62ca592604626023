use crate::filters::extract_budget::extract_budget;
use crate::filters::extract_location::extract_location;
use crate::types::CandidateFilter;

pub fn extract_filter(text: &str) -> CandidateFilter {
    let (min_price, max_price) = extract_budget(text);
    CandidateFilter {
        location: extract_location(text),
        min_price,
        max_price,
    }
}

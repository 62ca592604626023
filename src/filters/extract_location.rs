use super::LOCATION_REGEX;

/// Place name introduced by "in", "near" or "around".
///
/// Runs on the original text since capitalisation is what delimits the place.
pub fn extract_location(text: &str) -> Option<String> {
    LOCATION_REGEX
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .find(|place| place.len() >= 2 && place != "I")
}

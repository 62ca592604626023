use super::{BETWEEN_REGEX, MAX_REGEX, MIN_REGEX};
use regex::Captures;

/// Price bounds mentioned in a message, as `(min, max)`.
pub fn extract_budget(text: &str) -> (Option<f64>, Option<f64>) {
    let text = text.to_lowercase();

    if let Some(caps) = BETWEEN_REGEX.captures(&text) {
        let low = parse_amount(&caps, 1, 2);
        let high = parse_amount(&caps, 3, 4);
        return match (low, high) {
            (Some(a), Some(b)) if a > b => (Some(b), Some(a)),
            bounds => bounds,
        };
    }

    // "no more than" is an upper bound; its "more than" must not count as a lower one
    let max_match = MAX_REGEX.captures(&text);
    let max_span = max_match.as_ref().and_then(|caps| caps.get(0)).map(|m| m.range());
    let max = max_match.and_then(|caps| parse_amount(&caps, 1, 2));

    let min = MIN_REGEX
        .captures_iter(&text)
        .find(|caps| match (&max_span, caps.get(0)) {
            (Some(span), Some(m)) => m.end() <= span.start || m.start() >= span.end,
            _ => true,
        })
        .and_then(|caps| parse_amount(&caps, 1, 2));

    match (min, max) {
        (Some(a), Some(b)) if a > b => (Some(b), Some(a)),
        bounds => bounds,
    }
}

fn parse_amount(caps: &Captures<'_>, number: usize, suffix: usize) -> Option<f64> {
    let raw = caps.get(number)?.as_str().replace(',', "");
    let value: f64 = raw.parse().ok()?;
    let value = if caps.get(suffix).is_some() {
        value * 1000.0
    } else {
        value
    };
    value.is_finite().then_some(value)
}

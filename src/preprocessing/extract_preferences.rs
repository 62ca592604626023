use super::vocabulary::VOCABULARY;
use crate::filters::extract_filter::extract_filter;
use crate::types::{CandidateFilter, PreferenceSet, PreferenceSignal};
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct ProcessedQuery {
    pub preferences: PreferenceSet,
    pub filter: CandidateFilter,
}

impl ProcessedQuery {
    pub fn from_text(text: &str) -> Self {
        Self {
            preferences: extract(text),
            filter: extract_filter(text),
        }
    }
}

/// Extracts preference signals from free text.
///
/// Every vocabulary hit yields a weight of 1.0. Text without any hit gives an
/// empty set, which callers read as "browse without filter".
pub fn extract(text: &str) -> PreferenceSet {
    let folded = Folded::new(text);

    let mut preferences = PreferenceSet::new();
    for entry in VOCABULARY.iter() {
        if preferences.contains(entry.key) {
            continue;
        }
        if let Some(start) = folded.lowered.find(entry.phrase) {
            let span = folded
                .original_span(text, start, start + entry.phrase.len())
                .unwrap_or(entry.phrase);
            preferences.insert(PreferenceSignal::new(entry.key, 1.0, span));
        }
    }

    debug!(
        "Extracted {} preference signal(s) from '{}'",
        preferences.len(),
        text
    );
    preferences
}

/// Lowercased text that remembers, for every byte, where its character
/// started in the original.
struct Folded {
    lowered: String,
    origin: Vec<usize>,
}

impl Folded {
    fn new(text: &str) -> Self {
        let mut lowered = String::with_capacity(text.len());
        let mut origin = Vec::with_capacity(text.len() + 1);
        for (offset, c) in text.char_indices() {
            for lower in c.to_lowercase() {
                lowered.push(lower);
                origin.extend(std::iter::repeat(offset).take(lower.len_utf8()));
            }
        }
        origin.push(text.len());
        Self { lowered, origin }
    }

    fn original_span<'a>(&self, text: &'a str, start: usize, end: usize) -> Option<&'a str> {
        let from = *self.origin.get(start)?;
        let to = *self.origin.get(end)?;
        text.get(from..to).filter(|span| !span.is_empty())
    }
}

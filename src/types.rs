use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Lifestyle and compatibility cues the extractor understands.
///
/// Declaration order is the canonical order of matched signals and of the
/// preference list in generated responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferenceKey {
    Clean,
    Quiet,
    Social,
    Professional,
    Student,
    NonSmoker,
    EarlyRiser,
    NightOwl,
    Vegetarian,
    Active,
    PetFriendly,
}

impl PreferenceKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            PreferenceKey::Clean => "clean",
            PreferenceKey::Quiet => "quiet",
            PreferenceKey::Social => "social",
            PreferenceKey::Professional => "professional",
            PreferenceKey::Student => "student",
            PreferenceKey::NonSmoker => "non_smoker",
            PreferenceKey::EarlyRiser => "early_riser",
            PreferenceKey::NightOwl => "night_owl",
            PreferenceKey::Vegetarian => "vegetarian",
            PreferenceKey::Active => "active",
            PreferenceKey::PetFriendly => "pet_friendly",
        }
    }
}

impl fmt::Display for PreferenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceSignal {
    pub key: PreferenceKey,
    pub weight: f32,
    pub source_span: String,
}

impl PreferenceSignal {
    /// Builds a signal with its weight clamped into `[0, 1]` (NaN becomes 0).
    pub fn new(key: PreferenceKey, weight: f32, source_span: impl Into<String>) -> Self {
        Self {
            key,
            weight: clamp_weight(weight),
            source_span: source_span.into(),
        }
    }
}

fn clamp_weight(weight: f32) -> f32 {
    if weight.is_nan() {
        0.0
    } else {
        weight.clamp(0.0, 1.0)
    }
}

/// Signals keyed by preference, at most one per key.
///
/// Repeated mentions of a key keep the strongest weight instead of adding up,
/// so a user repeating "clean" five times still contributes a weight of 1.0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferenceSet {
    signals: BTreeMap<PreferenceKey, PreferenceSignal>,
}

impl PreferenceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, signal: PreferenceSignal) {
        let signal = PreferenceSignal {
            weight: clamp_weight(signal.weight),
            ..signal
        };
        match self.signals.get_mut(&signal.key) {
            Some(existing) if existing.weight >= signal.weight => {}
            Some(existing) => *existing = signal,
            None => {
                self.signals.insert(signal.key, signal);
            }
        }
    }

    /// Max-merges every signal of `other` into `self`.
    pub fn merge(&mut self, other: &PreferenceSet) {
        for signal in other.signals.values() {
            self.insert(signal.clone());
        }
    }

    pub fn weight(&self, key: PreferenceKey) -> Option<f32> {
        self.signals.get(&key).map(|s| s.weight)
    }

    pub fn contains(&self, key: PreferenceKey) -> bool {
        self.signals.contains_key(&key)
    }

    pub fn keys(&self) -> impl Iterator<Item = PreferenceKey> + '_ {
        self.signals.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PreferenceSignal> {
        self.signals.values()
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }
}

impl FromIterator<PreferenceSignal> for PreferenceSet {
    fn from_iter<I: IntoIterator<Item = PreferenceSignal>>(iter: I) -> Self {
        let mut set = PreferenceSet::new();
        for signal in iter {
            set.insert(signal);
        }
        set
    }
}

/// Hard constraints on the candidate population (location and budget).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateFilter {
    pub location: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl CandidateFilter {
    pub fn is_empty(&self) -> bool {
        self.location.is_none() && self.min_price.is_none() && self.max_price.is_none()
    }

    /// Fields mentioned in `newer` replace the ones already held.
    pub fn merge(&mut self, newer: &CandidateFilter) {
        if newer.location.is_some() {
            self.location = newer.location.clone();
        }
        if newer.min_price.is_some() {
            self.min_price = newer.min_price;
        }
        if newer.max_price.is_some() {
            self.max_price = newer.max_price;
        }
    }

    pub fn accepts(&self, profile: &CandidateProfile) -> bool {
        if let Some(location) = &self.location {
            if !location_matches(&profile.location, location) {
                return false;
            }
        }
        // Candidates without a price are not excluded by budget bounds
        if let Some(price) = profile.price {
            if self.min_price.is_some_and(|min| price < min) {
                return false;
            }
            if self.max_price.is_some_and(|max| price > max) {
                return false;
            }
        }
        true
    }
}

/// True when the words of `place` appear next to each other, in order, among
/// the words of `location`. Case and punctuation are ignored.
pub fn location_matches(location: &str, place: &str) -> bool {
    fn words(text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase)
            .collect()
    }

    let place = words(place);
    if place.is_empty() {
        return true;
    }
    words(location)
        .windows(place.len())
        .any(|window| window == place.as_slice())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateKind {
    #[default]
    Roommate,
    Listing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub id: String,
    #[serde(default)]
    pub kind: CandidateKind,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub lifestyle_tags: BTreeSet<String>,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub occupation: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub interests: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub candidate_id: String,
    pub score: f32,
    pub matched_signals: Vec<PreferenceSignal>,
}

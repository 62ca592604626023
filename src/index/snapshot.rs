use crate::types::{location_matches, CandidateFilter, CandidateProfile};
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// Point-in-time view of the candidate population. Never mutated once built.
#[derive(Debug)]
pub struct IndexSnapshot {
    profiles: Vec<CandidateProfile>,
    by_id: HashMap<String, usize>,
    pub loaded_at: DateTime<Utc>,
}

impl IndexSnapshot {
    pub fn build(raw: Vec<CandidateProfile>) -> Self {
        let mut profiles: Vec<CandidateProfile> = Vec::with_capacity(raw.len());
        let mut seen: HashSet<String> = HashSet::new();

        for mut profile in raw {
            profile.id = profile.id.trim().to_string();
            if profile.id.is_empty() {
                warn!("Dropping candidate without id (name: '{}')", profile.name);
                continue;
            }
            if !seen.insert(profile.id.clone()) {
                warn!("Dropping duplicate candidate id '{}'", profile.id);
                continue;
            }
            profile.lifestyle_tags = profile
                .lifestyle_tags
                .iter()
                .map(|tag| tag.trim().to_lowercase())
                .collect();
            profiles.push(profile);
        }

        profiles.sort_by(|a, b| a.id.cmp(&b.id));
        let by_id = profiles
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.clone(), i))
            .collect();

        Self {
            profiles,
            by_id,
            loaded_at: Utc::now(),
        }
    }

    /// Profiles accepted by `filter`, in ascending id order.
    pub fn query(&self, filter: Option<&CandidateFilter>) -> Vec<&CandidateProfile> {
        match filter {
            Some(filter) if !filter.is_empty() => {
                self.profiles.iter().filter(|p| filter.accepts(p)).collect()
            }
            _ => self.profiles.iter().collect(),
        }
    }

    /// Whether any profile is located in `place`.
    pub fn knows_location(&self, place: &str) -> bool {
        self.profiles
            .iter()
            .any(|p| location_matches(&p.location, place))
    }

    pub fn get(&self, id: &str) -> Option<&CandidateProfile> {
        self.by_id.get(id).map(|&i| &self.profiles[i])
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

use crate::types::{CandidateFilter, PreferenceSet};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    New,
    Active,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::New => "new",
            SessionPhase::Active => "active",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub sender: Sender,
}

/// Everything remembered about one conversation thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    pub thread_id: String,
    /// Identity that opened the thread; empty until claimed.
    pub owner: String,
    pub phase: SessionPhase,
    pub turns: Vec<Turn>,
    pub accumulated_preferences: PreferenceSet,
    pub accumulated_filter: CandidateFilter,
    /// Only ever grows, so later pages never repeat a suggestion.
    pub shown_candidate_ids: BTreeSet<String>,
    pub created_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
    /// Bumped by the store on every write; used to detect concurrent updates.
    pub version: u64,
}

impl ConversationState {
    pub fn new(thread_id: impl Into<String>, owner: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            thread_id: thread_id.into(),
            owner: owner.into(),
            phase: SessionPhase::New,
            turns: Vec::new(),
            accumulated_preferences: PreferenceSet::new(),
            accumulated_filter: CandidateFilter::default(),
            shown_candidate_ids: BTreeSet::new(),
            created_at: now,
            last_active_at: now,
            version: 0,
        }
    }

    pub fn append_turn(&mut self, text: impl Into<String>, sender: Sender) {
        let now = Utc::now();
        self.turns.push(Turn {
            text: text.into(),
            timestamp: now,
            sender,
        });
        self.phase = SessionPhase::Active;
        self.last_active_at = now;
    }

    pub fn merge_preferences(&mut self, preferences: &PreferenceSet) {
        self.accumulated_preferences.merge(preferences);
    }

    pub fn merge_filter(&mut self, filter: &CandidateFilter) {
        self.accumulated_filter.merge(filter);
    }

    pub fn mark_shown<'a, I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.shown_candidate_ids
            .extend(ids.into_iter().map(str::to_string));
    }

    pub fn has_shown(&self, candidate_id: &str) -> bool {
        self.shown_candidate_ids.contains(candidate_id)
    }

    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.last_active_at > ttl
    }
}

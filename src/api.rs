use crate::session::ConversationState;
use crate::types::{CandidateKind, CandidateProfile, MatchResult};
use serde::{Deserialize, Serialize};

/// Identity resolved upstream of this service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
}

impl Identity {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub thread_id: Option<String>,
    pub message: String,
    #[serde(default)]
    pub top_k: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatResponse {
    pub thread_id: String,
    pub response_text: String,
    pub results: Vec<ResultView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultView {
    pub candidate_id: String,
    pub score: f32,
    pub matched_signals: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate: Option<CandidateSummary>,
}

/// Card data for a result, one variant per kind of candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CandidateSummary {
    Roommate {
        name: String,
        occupation: String,
        location: String,
        lifestyle_tags: Vec<String>,
        price: Option<f64>,
    },
    Listing {
        title: String,
        location: String,
        lifestyle_tags: Vec<String>,
        price: Option<f64>,
    },
}

impl From<&CandidateProfile> for CandidateSummary {
    fn from(profile: &CandidateProfile) -> Self {
        let lifestyle_tags = profile.lifestyle_tags.iter().cloned().collect();
        match profile.kind {
            CandidateKind::Roommate => CandidateSummary::Roommate {
                name: profile.name.clone(),
                occupation: profile.occupation.clone(),
                location: profile.location.clone(),
                lifestyle_tags,
                price: profile.price,
            },
            CandidateKind::Listing => CandidateSummary::Listing {
                title: profile.name.clone(),
                location: profile.location.clone(),
                lifestyle_tags,
                price: profile.price,
            },
        }
    }
}

impl ResultView {
    pub fn new(result: &MatchResult, profile: Option<&CandidateProfile>) -> Self {
        Self {
            candidate_id: result.candidate_id.clone(),
            score: result.score,
            matched_signals: result
                .matched_signals
                .iter()
                .map(|s| s.key.as_str().to_string())
                .collect(),
            candidate: profile.map(CandidateSummary::from),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreadSummary {
    pub thread_id: String,
    pub phase: String,
    pub turn_count: usize,
    pub shown_candidate_ids: Vec<String>,
    pub accumulated_preferences: Vec<String>,
}

impl From<&ConversationState> for ThreadSummary {
    fn from(state: &ConversationState) -> Self {
        Self {
            thread_id: state.thread_id.clone(),
            phase: state.phase.as_str().to_string(),
            turn_count: state.turns.len(),
            shown_candidate_ids: state.shown_candidate_ids.iter().cloned().collect(),
            accumulated_preferences: state
                .accumulated_preferences
                .keys()
                .map(|k| k.as_str().to_string())
                .collect(),
        }
    }
}

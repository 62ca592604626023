use super::response;
use crate::config::MatchingConfig;
use crate::error::MatcherResult;
use crate::index::{CandidateIndex, IndexSnapshot};
use crate::preprocessing::ProcessedQuery;
use crate::scoring::{score, validate_profile};
use crate::session::ConversationState;
use crate::types::{CandidateProfile, MatchResult, PreferenceKey};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Results of one matching turn, with the snapshot they were ranked against.
#[derive(Debug)]
pub struct MatchOutcome {
    pub results: Vec<MatchResult>,
    pub response_text: String,
    pub snapshot: Arc<IndexSnapshot>,
}

pub struct Matcher {
    index: Arc<CandidateIndex>,
    settings: MatchingConfig,
}

impl Matcher {
    pub fn new(index: Arc<CandidateIndex>, settings: MatchingConfig) -> Self {
        Self { index, settings }
    }

    pub fn index(&self) -> &Arc<CandidateIndex> {
        &self.index
    }

    pub async fn match_query(
        &self,
        query_text: &str,
        session: &mut ConversationState,
        top_k: usize,
    ) -> MatcherResult<(Vec<MatchResult>, String)> {
        let outcome = self.run(query_text, session, top_k).await?;
        Ok((outcome.results, outcome.response_text))
    }

    /// Extracts signals from `query_text`, folds them into `session` and
    /// ranks the candidates the thread has not been shown yet.
    pub async fn run(
        &self,
        query_text: &str,
        session: &mut ConversationState,
        top_k: usize,
    ) -> MatcherResult<MatchOutcome> {
        let processed = ProcessedQuery::from_text(query_text);
        session.merge_preferences(&processed.preferences);
        session.merge_filter(&processed.filter);

        let snapshot = self.index.snapshot().await?;
        if snapshot.is_empty() {
            warn!(thread_id = %session.thread_id, "Candidate index is empty");
            return Ok(MatchOutcome {
                results: Vec::new(),
                response_text: response::no_candidates(),
                snapshot,
            });
        }

        // Places are guessed from capitalisation; one nobody lives in is not a constraint
        if let Some(place) = session.accumulated_filter.location.clone() {
            if !snapshot.knows_location(&place) {
                warn!(
                    thread_id = %session.thread_id,
                    location = %place,
                    "No candidate is located there, dropping the location filter"
                );
                session.accumulated_filter.location = None;
            }
        }

        let unshown: Vec<&CandidateProfile> = snapshot
            .query(Some(&session.accumulated_filter))
            .into_iter()
            .filter(|p| !session.has_shown(&p.id))
            .collect();
        let keys: Vec<PreferenceKey> = session.accumulated_preferences.keys().collect();

        let (results, response_text) = if keys.is_empty() {
            let results = self.default_page(&unshown, top_k);
            let text = response::fallback(results.len());
            (results, text)
        } else {
            let results = self.rank(session, &unshown, top_k);
            let text = response::ranked(&keys, results.len());
            (results, text)
        };

        session.mark_shown(results.iter().map(|r| r.candidate_id.as_str()));

        info!(
            thread_id = %session.thread_id,
            preferences = ?keys,
            candidates = unshown.len(),
            returned = results.len(),
            "Matched query"
        );
        Ok(MatchOutcome {
            results,
            response_text,
            snapshot,
        })
    }

    // No ranking signal yet: first page in id order
    fn default_page(&self, unshown: &[&CandidateProfile], top_k: usize) -> Vec<MatchResult> {
        let limit = self.settings.fallback_limit.min(top_k);
        unshown
            .iter()
            .filter(|p| match validate_profile(p) {
                Ok(()) => true,
                Err(e) => {
                    warn!("Skipping candidate: {}", e);
                    false
                }
            })
            .take(limit)
            .map(|p| MatchResult {
                candidate_id: p.id.clone(),
                score: 0.0,
                matched_signals: Vec::new(),
            })
            .collect()
    }

    fn rank(
        &self,
        session: &ConversationState,
        unshown: &[&CandidateProfile],
        top_k: usize,
    ) -> Vec<MatchResult> {
        let prefs = &session.accumulated_preferences;
        let mut scored: Vec<MatchResult> = unshown
            .iter()
            .filter_map(|candidate| match score(prefs, candidate) {
                Ok(result) => Some(result),
                Err(e) => {
                    warn!("Skipping candidate: {}", e);
                    None
                }
            })
            .filter(|result| result.score >= self.settings.min_score)
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.candidate_id.cmp(&b.candidate_id))
        });
        scored.truncate(top_k);

        for (i, result) in scored.iter().enumerate() {
            debug!(
                "Match {}: id={}, score={:.4}, signals={:?}",
                i + 1,
                result.candidate_id,
                result.score,
                result.matched_signals.iter().map(|s| s.key).collect::<Vec<_>>()
            );
        }
        scored
    }
}

pub mod auth;
pub mod service;
pub mod start_grpc_server;

use crate::api::{CandidateSummary, ChatResponse, ResultView, ThreadSummary};
use crate::matcher_service::MatchingEngine;
use std::sync::Arc;

pub mod matcher {
    tonic::include_proto!("matcher");
}

pub struct MatcherService {
    engine: Arc<MatchingEngine>,
}

impl MatcherService {
    pub fn new(engine: Arc<MatchingEngine>) -> Self {
        Self { engine }
    }

    fn convert_result(view: ResultView) -> matcher::MatchResult {
        use matcher::match_result::Candidate;

        let candidate = view.candidate.map(|summary| match summary {
            CandidateSummary::Roommate {
                name,
                occupation,
                location,
                lifestyle_tags,
                price,
            } => Candidate::Roommate(matcher::RoommateCard {
                name,
                occupation,
                location,
                lifestyle_tags,
                price,
            }),
            CandidateSummary::Listing {
                title,
                location,
                lifestyle_tags,
                price,
            } => Candidate::Listing(matcher::ListingCard {
                title,
                location,
                lifestyle_tags,
                price,
            }),
        });

        matcher::MatchResult {
            candidate_id: view.candidate_id,
            score: view.score as f64,
            matched_signals: view.matched_signals,
            candidate,
        }
    }

    fn convert_chat_response(response: ChatResponse) -> matcher::ChatResponse {
        matcher::ChatResponse {
            thread_id: response.thread_id,
            response_text: response.response_text,
            results: response
                .results
                .into_iter()
                .map(Self::convert_result)
                .collect(),
        }
    }

    fn convert_thread_summary(summary: ThreadSummary) -> matcher::ThreadSummary {
        matcher::ThreadSummary {
            thread_id: summary.thread_id,
            turn_count: summary.turn_count as u32,
            shown_candidate_ids: summary.shown_candidate_ids,
            accumulated_preferences: summary.accumulated_preferences,
            phase: summary.phase,
        }
    }
}

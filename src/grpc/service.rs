use super::auth::identity_of;
use super::matcher;
use super::MatcherService;
use crate::api::ChatRequest;
use crate::error::{ErrorCode, MatcherError};
use tonic::{Request, Response, Status};
use tracing::{error, info, warn};

use super::matcher::matcher_server::Matcher;

fn to_status(err: MatcherError) -> Status {
    match err.code() {
        ErrorCode::Unavailable | ErrorCode::Internal => error!("Request failed: {}", err),
        _ => warn!("Request rejected: {}", err),
    }
    err.into()
}

#[tonic::async_trait]
impl Matcher for MatcherService {
    async fn chat(
        &self,
        request: Request<matcher::ChatRequest>,
    ) -> Result<Response<matcher::ChatResponse>, Status> {
        let identity = identity_of(&request)?;
        let req = request.into_inner();
        info!(
            "Received chat request - user: {}, thread: {:?}, message length: {}",
            identity.user_id,
            req.thread_id,
            req.message.len()
        );

        let response = self
            .engine
            .handle_chat(
                &identity,
                ChatRequest {
                    thread_id: req.thread_id,
                    message: req.message,
                    top_k: (req.top_k > 0).then_some(req.top_k as usize),
                },
            )
            .await
            .map_err(to_status)?;

        info!(
            "Returning {} result(s) on thread {}",
            response.results.len(),
            response.thread_id
        );
        Ok(Response::new(Self::convert_chat_response(response)))
    }

    async fn get_thread(
        &self,
        request: Request<matcher::GetThreadRequest>,
    ) -> Result<Response<matcher::ThreadSummary>, Status> {
        let identity = identity_of(&request)?;
        let req = request.into_inner();

        let summary = self
            .engine
            .thread_summary(&identity, &req.thread_id)
            .map_err(to_status)?;
        Ok(Response::new(Self::convert_thread_summary(summary)))
    }

    async fn reload_index(
        &self,
        request: Request<matcher::ReloadIndexRequest>,
    ) -> Result<Response<matcher::ReloadIndexResponse>, Status> {
        let identity = identity_of(&request)?;
        info!("Index reload requested by {}", identity.user_id);

        let count = self.engine.reload_index().await.map_err(to_status)?;
        Ok(Response::new(matcher::ReloadIndexResponse {
            candidate_count: count as u32,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Identity;
    use crate::config::Config;
    use crate::index::{CandidateIndex, CandidateSource, StaticCandidateSource};
    use crate::matcher_service::MatchingEngine;
    use crate::session::SessionStore;
    use crate::types::{CandidateKind, CandidateProfile};
    use std::sync::Arc;
    use std::time::Duration;
    use tonic::Code;

    async fn service() -> MatcherService {
        let profiles = vec![
            CandidateProfile {
                id: "1".into(),
                kind: CandidateKind::Roommate,
                name: "Taylor".into(),
                lifestyle_tags: ["quiet".to_string()].into_iter().collect(),
                bio: String::new(),
                occupation: "Nurse".into(),
                location: "SoMa".into(),
                price: Some(1600.0),
                interests: vec![],
            },
            CandidateProfile {
                id: "L1".into(),
                kind: CandidateKind::Listing,
                name: "Sunny room".into(),
                lifestyle_tags: ["quiet".to_string()].into_iter().collect(),
                bio: String::new(),
                occupation: String::new(),
                location: "Lekki".into(),
                price: None,
                interests: vec![],
            },
        ];
        let source: Arc<dyn CandidateSource> = Arc::new(StaticCandidateSource::new(profiles));
        let index = Arc::new(CandidateIndex::open(source).await);
        let sessions = Arc::new(SessionStore::new(Duration::from_secs(60)));
        let engine = MatchingEngine::with_parts(Arc::new(Config::default()), index, sessions);
        MatcherService::new(Arc::new(engine))
    }

    fn authed<T>(message: T) -> Request<T> {
        let mut request = Request::new(message);
        request.extensions_mut().insert(Identity::new("alice"));
        request
    }

    #[tokio::test]
    async fn test_chat_returns_tagged_candidates() {
        let service = service().await;
        let response = service
            .chat(authed(matcher::ChatRequest {
                thread_id: None,
                message: "somewhere quiet".into(),
                top_k: 0,
            }))
            .await
            .unwrap()
            .into_inner();

        assert_eq!(response.results.len(), 2);
        use matcher::match_result::Candidate;
        assert!(matches!(response.results[0].candidate, Some(Candidate::Roommate(_))));
        assert!(matches!(response.results[1].candidate, Some(Candidate::Listing(_))));

        let summary = service
            .get_thread(authed(matcher::GetThreadRequest {
                thread_id: response.thread_id.clone(),
            }))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(summary.turn_count, 2);
        assert_eq!(summary.phase, "active");
    }

    #[tokio::test]
    async fn test_error_codes_reach_the_boundary() {
        let service = service().await;

        let empty = service
            .chat(authed(matcher::ChatRequest {
                thread_id: None,
                message: " ".into(),
                top_k: 0,
            }))
            .await
            .unwrap_err();
        assert_eq!(empty.code(), Code::InvalidArgument);

        let anonymous = service
            .chat(Request::new(matcher::ChatRequest {
                thread_id: None,
                message: "quiet".into(),
                top_k: 0,
            }))
            .await
            .unwrap_err();
        assert_eq!(anonymous.code(), Code::Unauthenticated);

        let missing = service
            .get_thread(authed(matcher::GetThreadRequest {
                thread_id: "unknown".into(),
            }))
            .await
            .unwrap_err();
        assert_eq!(missing.code(), Code::NotFound);

        let reloaded = service
            .reload_index(authed(matcher::ReloadIndexRequest {}))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(reloaded.candidate_count, 2);
    }
}

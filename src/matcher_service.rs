use crate::api::{ChatRequest, ChatResponse, Identity, ResultView, ThreadSummary};
use crate::config::Config;
use crate::error::{MatcherError, MatcherResult};
use crate::index::{CandidateIndex, CandidateSource, YamlCandidateSource};
use crate::matching::Matcher;
use crate::session::{Sender, SessionStore};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Request-level entry point: validates input, serialises turns per thread
/// and runs the matcher against the thread's accumulated state.
pub struct MatchingEngine {
    config: Arc<Config>,
    matcher: Matcher,
    sessions: Arc<SessionStore>,
    #[cfg(test)]
    persist_hook: Option<PersistHook>,
}

#[cfg(test)]
type PersistHook = Box<dyn Fn(&SessionStore, &str) + Send + Sync>;

impl MatchingEngine {
    pub async fn new(config: Arc<Config>) -> Self {
        info!("Opening candidate index from {}", config.candidates.path);
        let source: Arc<dyn CandidateSource> =
            Arc::new(YamlCandidateSource::new(config.candidates.path.clone()));
        let index = Arc::new(CandidateIndex::open(source).await);
        let sessions = Arc::new(SessionStore::new(Duration::from_secs(
            config.session.ttl_secs,
        )));
        Self::with_parts(config, index, sessions)
    }

    pub fn with_parts(
        config: Arc<Config>,
        index: Arc<CandidateIndex>,
        sessions: Arc<SessionStore>,
    ) -> Self {
        let matcher = Matcher::new(index, config.matching.clone());
        Self {
            config,
            matcher,
            sessions,
            #[cfg(test)]
            persist_hook: None,
        }
    }

    pub fn index(&self) -> &Arc<CandidateIndex> {
        self.matcher.index()
    }

    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    pub fn validate_message(&self, message: &str) -> MatcherResult<()> {
        if message.trim().is_empty() {
            return Err(MatcherError::InvalidInput("message is empty".to_string()));
        }
        let len = message.chars().count();
        if len > self.config.matching.max_message_len {
            return Err(MatcherError::InvalidInput(format!(
                "message is {} characters long, the limit is {}",
                len, self.config.matching.max_message_len
            )));
        }
        Ok(())
    }

    pub async fn handle_chat(
        &self,
        identity: &Identity,
        request: ChatRequest,
    ) -> MatcherResult<ChatResponse> {
        check_identity(identity)?;
        self.validate_message(&request.message)?;

        let top_k = request
            .top_k
            .filter(|k| *k > 0)
            .unwrap_or(self.config.matching.top_k);
        let thread_id = match request
            .thread_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
        {
            Some(id) => id.to_string(),
            None => Uuid::new_v4().to_string(),
        };

        let _guard = self.sessions.lock(&thread_id).await;
        let is_new = self.sessions.get(&thread_id).is_none();

        let result = self
            .run_turn(&thread_id, &identity.user_id, &request.message, top_k)
            .await;
        if result.is_err() && is_new {
            debug!(thread_id = %thread_id, "Dropping thread opened by a failed turn");
            self.sessions.remove(&thread_id);
        }
        result
    }

    /// Runs one turn on a local copy of the thread; the store only sees it
    /// through `persist`.
    async fn run_turn(
        &self,
        thread_id: &str,
        owner: &str,
        message: &str,
        top_k: usize,
    ) -> MatcherResult<ChatResponse> {
        let mut state = self.sessions.create_or_resume(Some(thread_id), owner)?;

        let mut attempt = 0;
        loop {
            state.append_turn(message, Sender::User);
            let outcome = self.matcher.run(message, &mut state, top_k).await?;
            state.append_turn(outcome.response_text.clone(), Sender::Assistant);

            let results = outcome
                .results
                .iter()
                .map(|r| ResultView::new(r, outcome.snapshot.get(&r.candidate_id)))
                .collect();

            self.before_persist(thread_id);
            match self.sessions.persist(state) {
                Ok(version) => {
                    debug!(thread_id = %thread_id, version = version, "Persisted thread");
                    return Ok(ChatResponse {
                        thread_id: thread_id.to_string(),
                        response_text: outcome.response_text,
                        results,
                    });
                }
                Err(e @ MatcherError::SessionConflict { .. })
                    if attempt < self.config.session.max_conflict_retries =>
                {
                    attempt += 1;
                    warn!(thread_id = %thread_id, attempt = attempt, "{}; re-merging", e);
                    state = self.sessions.load(thread_id);
                }
                Err(e) => return Err(e),
            }
        }
    }

    #[cfg(test)]
    fn before_persist(&self, thread_id: &str) {
        if let Some(hook) = &self.persist_hook {
            hook(&self.sessions, thread_id);
        }
    }

    #[cfg(not(test))]
    fn before_persist(&self, _thread_id: &str) {}

    pub async fn reload_index(&self) -> MatcherResult<usize> {
        self.index().reload().await
    }

    pub fn thread_summary(
        &self,
        identity: &Identity,
        thread_id: &str,
    ) -> MatcherResult<ThreadSummary> {
        check_identity(identity)?;
        let state = self
            .sessions
            .get(thread_id)
            .ok_or_else(|| MatcherError::ThreadNotFound(thread_id.to_string()))?;
        if !state.owner.is_empty() && state.owner != identity.user_id {
            return Err(MatcherError::Unauthenticated(format!(
                "thread {} belongs to another identity",
                thread_id
            )));
        }
        Ok(ThreadSummary::from(&state))
    }
}

fn check_identity(identity: &Identity) -> MatcherResult<()> {
    if identity.user_id.trim().is_empty() {
        return Err(MatcherError::Unauthenticated(
            "missing user identity".to_string(),
        ));
    }
    Ok(())
}

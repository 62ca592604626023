use super::state::{ConversationState, Sender};
use crate::error::{MatcherError, MatcherResult};
use chrono::{DateTime, Duration, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info};
use uuid::Uuid;

/// In-memory conversation store.
///
/// Writes are versioned: `persist` only succeeds when the state was loaded
/// from the current version. Callers that must not race hold the thread's
/// `lock` for the duration of a turn; requests on different threads never
/// contend.
pub struct SessionStore {
    states: DashMap<String, ConversationState>,
    locks: DashMap<String, Arc<Mutex<()>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: std::time::Duration) -> Self {
        Self {
            states: DashMap::new(),
            locks: DashMap::new(),
            ttl: Duration::from_std(ttl).unwrap_or_else(|_| Duration::days(365 * 100)),
        }
    }

    /// Serialises turns on one thread in arrival order.
    pub async fn lock(&self, thread_id: &str) -> OwnedMutexGuard<()> {
        let slot = self
            .locks
            .entry(thread_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        slot.lock_owned().await
    }

    /// Resumes `thread_id`, or opens a new thread when it is absent or unknown.
    pub fn create_or_resume(
        &self,
        thread_id: Option<&str>,
        owner: &str,
    ) -> MatcherResult<ConversationState> {
        let thread_id = match thread_id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => id.to_string(),
            None => Uuid::new_v4().to_string(),
        };

        match self.states.entry(thread_id.clone()) {
            Entry::Occupied(mut entry) => {
                let state = entry.get_mut();
                if state.owner.is_empty() {
                    state.owner = owner.to_string();
                } else if state.owner != owner {
                    return Err(MatcherError::Unauthenticated(format!(
                        "thread {} belongs to another identity",
                        thread_id
                    )));
                }
                Ok(state.clone())
            }
            Entry::Vacant(entry) => {
                debug!(thread_id = %thread_id, "Opening new thread");
                let state = ConversationState::new(thread_id, owner);
                entry.insert(state.clone());
                Ok(state)
            }
        }
    }

    /// Current state of `thread_id`, created empty if absent.
    pub fn load(&self, thread_id: &str) -> ConversationState {
        self.states
            .entry(thread_id.to_string())
            .or_insert_with(|| ConversationState::new(thread_id, ""))
            .clone()
    }

    pub fn get(&self, thread_id: &str) -> Option<ConversationState> {
        self.states.get(thread_id).map(|s| s.clone())
    }

    /// Appends a turn directly to the stored state and returns the result.
    pub fn append_turn(
        &self,
        thread_id: &str,
        text: &str,
        sender: Sender,
    ) -> MatcherResult<ConversationState> {
        let mut entry = self
            .states
            .entry(thread_id.to_string())
            .or_insert_with(|| ConversationState::new(thread_id, ""));
        entry.append_turn(text, sender);
        entry.version += 1;
        Ok(entry.clone())
    }

    /// Stores `state` if nobody wrote the thread since it was loaded.
    ///
    /// Shown ids are unioned with the stored set so they can never shrink.
    /// Returns the new version.
    pub fn persist(&self, mut state: ConversationState) -> MatcherResult<u64> {
        match self.states.entry(state.thread_id.clone()) {
            Entry::Occupied(mut entry) => {
                let stored = entry.get();
                if stored.version != state.version {
                    return Err(MatcherError::SessionConflict {
                        thread_id: state.thread_id,
                        expected: state.version,
                        found: stored.version,
                    });
                }
                state
                    .shown_candidate_ids
                    .extend(stored.shown_candidate_ids.iter().cloned());
                state.version += 1;
                let version = state.version;
                entry.insert(state);
                Ok(version)
            }
            // Swept while the turn was running; keep the newer state
            Entry::Vacant(entry) => {
                state.version += 1;
                let version = state.version;
                entry.insert(state);
                Ok(version)
            }
        }
    }

    /// Evicts threads idle for longer than the TTL. Threads with a turn in
    /// flight are left alone.
    pub fn sweep_expired(&self, now: DateTime<Utc>) -> usize {
        let expired: Vec<String> = self
            .states
            .iter()
            .filter(|entry| entry.value().is_expired(now, self.ttl))
            .map(|entry| entry.key().clone())
            .collect();

        let mut removed = 0;
        for thread_id in expired {
            // Checked and removed under one shard lock so no turn can grab the slot in between
            let idle = match self
                .locks
                .remove_if(&thread_id, |_, slot| Arc::strong_count(slot) == 1)
            {
                Some(_) => true,
                None => !self.locks.contains_key(&thread_id),
            };
            if !idle {
                continue;
            }
            if self
                .states
                .remove_if(&thread_id, |_, state| state.is_expired(now, self.ttl))
                .is_some()
            {
                removed += 1;
            }
        }
        // Slots left behind by threads that were dropped without a state
        self.locks
            .retain(|id, slot| Arc::strong_count(slot) > 1 || self.states.contains_key(id));

        if removed > 0 {
            info!(
                removed = removed,
                remaining = self.states.len(),
                "Evicted expired conversation threads"
            );
        }
        removed
    }

    /// Forgets `thread_id`. Its lock slot is reclaimed by the next sweep.
    pub fn remove(&self, thread_id: &str) -> Option<ConversationState> {
        self.states.remove(thread_id).map(|(_, state)| state)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

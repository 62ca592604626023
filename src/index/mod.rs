mod snapshot;
mod source;

pub use snapshot::IndexSnapshot;
pub use source::{CandidateSource, StaticCandidateSource, YamlCandidateSource};

use crate::error::{MatcherError, MatcherResult};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

/// Searchable candidate population.
///
/// Readers take an `Arc` to the current snapshot and score against it; a
/// reload builds a new snapshot and swaps the pointer, so a query in flight
/// never sees a half-updated profile.
pub struct CandidateIndex {
    source: Arc<dyn CandidateSource>,
    current: RwLock<Option<Arc<IndexSnapshot>>>,
}

impl CandidateIndex {
    pub fn new(source: Arc<dyn CandidateSource>) -> Self {
        Self {
            source,
            current: RwLock::new(None),
        }
    }

    /// Creates the index and attempts a first load. A failed load leaves the
    /// index unavailable until a later reload succeeds.
    pub async fn open(source: Arc<dyn CandidateSource>) -> Self {
        let index = Self::new(source);
        if let Err(e) = index.reload().await {
            error!("Initial candidate load failed: {}", e);
        }
        index
    }

    pub async fn reload(&self) -> MatcherResult<usize> {
        let profiles = self.source.load().await?;
        let snapshot = Arc::new(IndexSnapshot::build(profiles));
        let count = snapshot.len();

        *self.current.write().await = Some(snapshot);
        info!(
            "Loaded {} candidate(s) from {}",
            count,
            self.source.describe()
        );
        Ok(count)
    }

    pub async fn snapshot(&self) -> MatcherResult<Arc<IndexSnapshot>> {
        self.current.read().await.clone().ok_or_else(|| {
            MatcherError::IndexUnavailable(format!(
                "no candidates loaded from {}",
                self.source.describe()
            ))
        })
    }

    pub async fn is_available(&self) -> bool {
        self.current.read().await.is_some()
    }
}

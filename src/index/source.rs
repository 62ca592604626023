use crate::error::{MatcherError, MatcherResult};
use crate::types::CandidateProfile;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::debug;

/// Backing store the index loads its profile population from.
#[async_trait]
pub trait CandidateSource: Send + Sync {
    async fn load(&self) -> MatcherResult<Vec<CandidateProfile>>;

    fn describe(&self) -> String;
}

#[derive(Debug, Deserialize)]
struct CandidateFile {
    #[serde(default)]
    candidates: Vec<CandidateProfile>,
}

/// Profiles kept in a YAML file, re-read on every reload.
pub struct YamlCandidateSource {
    path: PathBuf,
}

impl YamlCandidateSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CandidateSource for YamlCandidateSource {
    async fn load(&self) -> MatcherResult<Vec<CandidateProfile>> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            MatcherError::IndexUnavailable(format!("cannot read {}: {}", self.path.display(), e))
        })?;
        let file: CandidateFile = serde_yaml::from_str(&raw).map_err(|e| {
            MatcherError::IndexUnavailable(format!("cannot parse {}: {}", self.path.display(), e))
        })?;
        debug!(
            "Read {} candidate(s) from {}",
            file.candidates.len(),
            self.path.display()
        );
        Ok(file.candidates)
    }

    fn describe(&self) -> String {
        format!("yaml:{}", self.path.display())
    }
}

/// Fixed in-memory population.
pub struct StaticCandidateSource {
    profiles: Vec<CandidateProfile>,
}

impl StaticCandidateSource {
    pub fn new(profiles: Vec<CandidateProfile>) -> Self {
        Self { profiles }
    }
}

#[async_trait]
impl CandidateSource for StaticCandidateSource {
    async fn load(&self) -> MatcherResult<Vec<CandidateProfile>> {
        Ok(self.profiles.clone())
    }

    fn describe(&self) -> String {
        format!("static:{} profile(s)", self.profiles.len())
    }
}

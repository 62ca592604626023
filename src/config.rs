use crate::constants::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub address: String,
    pub sweep_interval_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            sweep_interval_secs: DEFAULT_SWEEP_INTERVAL_SECS,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct MatchingConfig {
    /// Results per page when preferences are known.
    pub top_k: usize,
    /// Results per page when the thread has no preferences yet.
    pub fallback_limit: usize,
    /// Ranked candidates scoring below this are left out.
    pub min_score: f32,
    /// Maximum message length, in characters.
    pub max_message_len: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            fallback_limit: DEFAULT_FALLBACK_LIMIT,
            min_score: 0.0,
            max_message_len: DEFAULT_MAX_MESSAGE_LEN,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SessionConfig {
    pub ttl_secs: u64,
    pub max_conflict_retries: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_secs: DEFAULT_SESSION_TTL_SECS,
            max_conflict_retries: DEFAULT_MAX_CONFLICT_RETRIES,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct CandidatesConfig {
    pub path: String,
}

impl Default for CandidatesConfig {
    fn default() -> Self {
        Self {
            path: CANDIDATES_PATH.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub candidates: CandidatesConfig,
}

impl Config {
    pub fn load_from_yaml<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let f = std::fs::File::open(path)?;
        let config: Config = serde_yaml::from_reader(f)?;
        config.validate().map_err(|e| anyhow::anyhow!(e))?;
        Ok(config)
    }

    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate().map_err(|e| anyhow::anyhow!(e))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.matching.top_k == 0 {
            return Err("matching.top_k must be at least 1".to_string());
        }
        if self.matching.fallback_limit == 0 {
            return Err("matching.fallback_limit must be at least 1".to_string());
        }
        if !(0.0..=1.0).contains(&self.matching.min_score) {
            return Err(format!(
                "matching.min_score must be within [0, 1], got {}",
                self.matching.min_score
            ));
        }
        if self.matching.max_message_len == 0 {
            return Err("matching.max_message_len must be at least 1".to_string());
        }
        if self.session.ttl_secs == 0 {
            return Err("session.ttl_secs must be at least 1".to_string());
        }
        if self.server.sweep_interval_secs == 0 {
            return Err("server.sweep_interval_secs must be at least 1".to_string());
        }
        if self.candidates.path.trim().is_empty() {
            return Err("candidates.path must not be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = Config::from_yaml_str("matching:\n  top_k: 7\n").unwrap();
        assert_eq!(config.matching.top_k, 7);
        assert_eq!(config.matching.fallback_limit, DEFAULT_FALLBACK_LIMIT);
        assert_eq!(config.session.ttl_secs, DEFAULT_SESSION_TTL_SECS);
        assert_eq!(config.candidates.path, CANDIDATES_PATH);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let test_cases = vec![
            "matching:\n  top_k: 0\n",
            "matching:\n  min_score: 1.5\n",
            "session:\n  ttl_secs: 0\n",
            "candidates:\n  path: \"  \"\n",
        ];

        for yaml in test_cases {
            assert!(
                Config::from_yaml_str(yaml).is_err(),
                "Should have rejected config: {}",
                yaml
            );
        }
    }
}

pub const CONFIG_PATH: &str = "config.yaml";
pub const CANDIDATES_PATH: &str = "data/candidates.yaml";
pub const DEFAULT_ADDRESS: &str = "[::]:50030";

pub const DEFAULT_TOP_K: usize = 5;
pub const DEFAULT_FALLBACK_LIMIT: usize = 3;
pub const DEFAULT_MAX_MESSAGE_LEN: usize = 5000;

pub const DEFAULT_SESSION_TTL_SECS: u64 = 24 * 60 * 60;
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 5 * 60;
pub const DEFAULT_MAX_CONFLICT_RETRIES: usize = 3;

/// Metadata key carrying the identity resolved by the upstream gateway.
pub const USER_ID_HEADER: &str = "x-user-id";

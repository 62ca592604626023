use thiserror::Error;
use tonic::Status;

pub type MatcherResult<T> = Result<T, MatcherError>;

/// Codes surfaced at the request boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    BadRequest,
    Unauthenticated,
    Unavailable,
    NotFound,
    Internal,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MatcherError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("candidate index unavailable: {0}")]
    IndexUnavailable(String),

    #[error("unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("concurrent update on thread {thread_id}: expected version {expected}, found {found}")]
    SessionConflict {
        thread_id: String,
        expected: u64,
        found: u64,
    },

    #[error("malformed profile '{id}': {reason}")]
    MalformedProfile { id: String, reason: String },

    #[error("thread not found: {0}")]
    ThreadNotFound(String),
}

impl MatcherError {
    pub fn code(&self) -> ErrorCode {
        match self {
            MatcherError::InvalidInput(_) => ErrorCode::BadRequest,
            MatcherError::IndexUnavailable(_) => ErrorCode::Unavailable,
            MatcherError::Unauthenticated(_) => ErrorCode::Unauthenticated,
            MatcherError::ThreadNotFound(_) => ErrorCode::NotFound,
            // Both are handled internally; reaching the boundary means retries ran out
            MatcherError::SessionConflict { .. } | MatcherError::MalformedProfile { .. } => {
                ErrorCode::Internal
            }
        }
    }
}

impl From<MatcherError> for Status {
    fn from(err: MatcherError) -> Self {
        let message = err.to_string();
        match err.code() {
            ErrorCode::BadRequest => Status::invalid_argument(message),
            ErrorCode::Unauthenticated => Status::unauthenticated(message),
            ErrorCode::Unavailable => Status::unavailable(message),
            ErrorCode::NotFound => Status::not_found(message),
            ErrorCode::Internal => Status::internal(message),
        }
    }
}

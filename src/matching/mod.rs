pub mod matcher;
pub mod response;

pub use matcher::{MatchOutcome, Matcher};

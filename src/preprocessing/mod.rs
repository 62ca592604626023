pub mod extract_preferences;
pub mod vocabulary;

pub use extract_preferences::{extract, ProcessedQuery};

pub mod evidence;
pub mod scorer;

pub use scorer::{score, validate_profile};

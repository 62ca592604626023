pub mod state;
pub mod store;

pub use state::{ConversationState, Sender, SessionPhase, Turn};
pub use store::SessionStore;

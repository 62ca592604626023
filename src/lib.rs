pub mod api;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod filters;
pub mod grpc;
pub mod health;
pub mod index;
pub mod matcher_service;
pub mod matching;
pub mod preprocessing;
pub mod scoring;
pub mod session;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export everything that main.rs needs
pub use api::{ChatRequest, ChatResponse, Identity, ThreadSummary};
pub use cli::parse_args;
pub use config::Config;
pub use constants::*;
pub use error::{MatcherError, MatcherResult};
pub use grpc::start_grpc_server::start_grpc_server;
pub use matcher_service::MatchingEngine;

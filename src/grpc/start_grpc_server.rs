use crate::config::Config;
use crate::health::health::health_server::HealthServer;
use crate::health::HealthService;
use crate::matcher_service::MatchingEngine;

use super::auth::check_auth;
use super::matcher::matcher_server::MatcherServer;
use super::MatcherService;

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tonic::transport::Server;
use tonic_reflection::server::Builder as ReflectionBuilder;
use tracing::{debug, info};

pub async fn start_grpc_server(config: Arc<Config>) -> anyhow::Result<()> {
    let addr = config.server.address.parse()?;

    let engine = Arc::new(MatchingEngine::new(config.clone()).await);
    let health_service = HealthService::new(engine.index().clone());
    let matcher_service = MatcherService::new(engine.clone());

    let sweeper = {
        let sessions = engine.sessions().clone();
        let every = Duration::from_secs(config.server.sweep_interval_secs);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            // First tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let removed = sessions.sweep_expired(Utc::now());
                debug!("Session sweep removed {} thread(s)", removed);
            }
        })
    };

    let descriptor_set = include_bytes!(concat!(env!("OUT_DIR"), "/matcher_descriptor.bin"));
    let reflection_service = ReflectionBuilder::configure()
        .register_encoded_file_descriptor_set(descriptor_set)
        .build_v1()?;

    info!("Starting gRPC server on {}", addr);

    let served = Server::builder()
        .add_service(MatcherServer::with_interceptor(matcher_service, check_auth))
        .add_service(HealthServer::new(health_service))
        .add_service(reflection_service)
        .serve_with_shutdown(addr, async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await;

    sweeper.abort();
    served?;
    info!("gRPC server has been shut down");
    Ok(())
}

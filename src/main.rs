use anyhow::Result as AnyhowResult;
use roommate_matcher::{
    parse_args, start_grpc_server, ChatRequest, Config, Identity, MatchingEngine,
};
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> AnyhowResult<()> {
    let args = parse_args();

    let default_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = Arc::new(Config::load_from_yaml(&args.config)?);
    debug!("Loaded configuration from {}: {:?}", args.config, config);

    if args.server {
        info!("Starting in server mode");
        return start_grpc_server(config).await;
    }

    if let Some(query) = args.query {
        let engine = MatchingEngine::new(config).await;
        let response = engine
            .handle_chat(
                &Identity::new(args.user),
                ChatRequest {
                    thread_id: args.thread,
                    message: query,
                    top_k: args.top_k,
                },
            )
            .await?;
        println!("{}", serde_json::to_string_pretty(&response)?);
    }

    Ok(())
}

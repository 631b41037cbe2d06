use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, core_config_from_env, router};
use healthchat_core::ChatService;

/// Main entry point for the HealthChat application
///
/// Loads and validates the disease, intent and alias catalogs once, then serves the REST API.
/// Catalogs are fully loaded before the listener binds, so no request can observe a partial
/// dataset. The server shuts down gracefully on Ctrl-C.
///
/// # Environment Variables
/// - `HEALTHCHAT_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `HEALTHCHAT_DATA_DIR`, `HEALTHCHAT_DISEASES_PATH`, `HEALTHCHAT_INTENTS_PATH`,
///   `HEALTHCHAT_ALIASES_PATH`: catalog locations
/// - `HEALTHCHAT_REPLY_FORMAT`, `HEALTHCHAT_RESPONSE_STRATEGY`, `HEALTHCHAT_SYMPTOM_MATCHING`:
///   reply options
///
/// # Returns
/// * `Ok(())` - If the server starts and shuts down cleanly
/// * `Err(anyhow::Error)` - If configuration, catalog loading or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("healthchat_run=info".parse()?)
                .add_directive("healthchat_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr: SocketAddr = std::env::var("HEALTHCHAT_REST_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:3000".into())
        .parse()?;

    let cfg = core_config_from_env()?;
    let chat_service = ChatService::from_config(&cfg)?;
    tracing::info!(
        diseases = chat_service.knowledge().diseases().len(),
        intents = chat_service.knowledge().intents().rules().len(),
        format = ?cfg.reply_format(),
        strategy = ?cfg.response_strategy(),
        symptom_matching = cfg.symptom_matching(),
        "catalogs loaded"
    );

    tracing::info!("++ Starting HealthChat REST on {}", rest_addr);

    let app = router(AppState::new(chat_service));
    let listener = tokio::net::TcpListener::bind(rest_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("HealthChat REST stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    }
}

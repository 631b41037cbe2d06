//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own.
//!
//! ## Intended use
//! This binary is useful for development and debugging of the HTTP adapter. The workspace's
//! main `healthchat-run` binary serves the same router and is the production entry point.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{core_config_from_env, router, AppState};
use healthchat_core::ChatService;

/// Main entry point for the HealthChat REST API server
///
/// Loads the catalogs, then starts the REST API server on the configured address
/// (default: 0.0.0.0:3000).
///
/// # Environment Variables
/// - `HEALTHCHAT_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - see [`api_rest::core_config_from_env`] for catalog settings
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - a catalog cannot be loaded or validated,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("healthchat_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("HEALTHCHAT_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let cfg = core_config_from_env()?;
    let chat_service = ChatService::from_config(&cfg)?;

    tracing::info!("-- Starting HealthChat REST API on {}", addr);

    let app = router(AppState::new(chat_service));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

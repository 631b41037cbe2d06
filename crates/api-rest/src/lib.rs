//! # API REST
//!
//! REST API implementation for HealthChat.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS)
//! - Resolving `CoreConfig` from environment variables at startup
//!
//! Uses `api-shared` for wire types and `healthchat-core` for every reply.

#![warn(rust_2018_idioms)]

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use std::path::PathBuf;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{ChatReq, ChatRes, HealthRes, HealthService};
use healthchat_core::{
    config::{
        flag_from_env_value, reply_format_from_env_value, resolve_data_dir,
        response_strategy_from_env_value,
    },
    constants::{DISEASES_FILENAME, INTENTS_FILENAME},
    ChatService, CoreConfig,
};

/// Application state shared across REST API handlers
///
/// Holds the chat service (and through it the read-only catalogs) plus the health service.
/// Both are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    chat_service: ChatService,
    health_service: HealthService,
}

impl AppState {
    pub fn new(chat_service: ChatService) -> Self {
        let health_service = HealthService::new(chat_service.knowledge().diseases().len());
        Self {
            chat_service,
            health_service,
        }
    }
}

#[derive(OpenApi)]
#[openapi(paths(health, chat), components(schemas(HealthRes, ChatReq, ChatRes)))]
pub struct ApiDoc;

/// Build the HTTP router.
///
/// Routes:
/// - `GET /health`
/// - `POST /chat`
/// - `GET /swagger-ui` and `GET /api-docs/openapi.json`
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/chat", post(chat))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Resolve `CoreConfig` from environment variables.
///
/// # Environment Variables
/// - `HEALTHCHAT_DATA_DIR`: directory holding the bundled catalogs (default: search for
///   `crates/core/data`)
/// - `HEALTHCHAT_DISEASES_PATH`: disease catalog (default: `<data dir>/contagious_diseases_dataset.json`)
/// - `HEALTHCHAT_INTENTS_PATH`: intent catalog (default: `<data dir>/intents.json`)
/// - `HEALTHCHAT_ALIASES_PATH`: alias file (default: built-in alias table)
/// - `HEALTHCHAT_REPLY_FORMAT`: `plain`, `markdown` or `html` (default: `plain`)
/// - `HEALTHCHAT_RESPONSE_STRATEGY`: `first` or `random` (default: `first`)
/// - `HEALTHCHAT_SYMPTOM_MATCHING`: enable the symptom-overlap tier (default: `false`)
///
/// # Errors
/// Returns an error if a value cannot be parsed or a catalog file cannot be found.
pub fn core_config_from_env() -> anyhow::Result<CoreConfig> {
    let env_path = |key: &str| std::env::var(key).ok().map(PathBuf::from);

    let diseases_path = env_path("HEALTHCHAT_DISEASES_PATH");
    let intents_path = env_path("HEALTHCHAT_INTENTS_PATH");

    let (diseases_path, intents_path) = match (diseases_path, intents_path) {
        (Some(diseases), Some(intents)) => (diseases, intents),
        (diseases, intents) => {
            let data_dir = resolve_data_dir(env_path("HEALTHCHAT_DATA_DIR"))?;
            (
                diseases.unwrap_or_else(|| data_dir.join(DISEASES_FILENAME)),
                intents.unwrap_or_else(|| data_dir.join(INTENTS_FILENAME)),
            )
        }
    };

    let cfg = CoreConfig::new(
        diseases_path,
        intents_path,
        env_path("HEALTHCHAT_ALIASES_PATH"),
        reply_format_from_env_value(std::env::var("HEALTHCHAT_REPLY_FORMAT").ok())?,
        response_strategy_from_env_value(std::env::var("HEALTHCHAT_RESPONSE_STRATEGY").ok())?,
        flag_from_env_value(std::env::var("HEALTHCHAT_SYMPTOM_MATCHING").ok())?,
    )?;

    Ok(cfg)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Returns the current health status of the HealthChat service.
/// This endpoint is used for monitoring and load balancer health checks.
#[axum::debug_handler]
async fn health(State(state): State<AppState>) -> Json<HealthRes> {
    Json(state.health_service.check_health())
}

#[utoipa::path(
    post,
    path = "/chat",
    request_body = ChatReq,
    responses(
        (status = 200, description = "Bot reply", body = ChatRes),
        (status = 400, description = "Malformed JSON body")
    )
)]
/// Answer one chat message
///
/// A blank message gets a fixed warning without being classified.
///
/// # Returns
/// * `Json<ChatRes>` - The rendered reply
#[axum::debug_handler]
async fn chat(State(state): State<AppState>, Json(req): Json<ChatReq>) -> Json<ChatRes> {
    let response = state.chat_service.reply_to_message(&req.message);
    Json(ChatRes { response })
}

//! MediRisk Backend Server
//!
//! Chronic-disease risk assessment: three pre-trained classifiers score a
//! patient's vital panel, a deterministic rule engine summarizes clinical
//! status, and an external text-generation service produces lifestyle
//! advice.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       MEDIRISK SERVER                        │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌──────────────┐  ┌───────────────────────┐  │
//! │  │  API      │  │  Model       │  │  Recommendation       │  │
//! │  │  Gateway  │  │  Registry    │  │  Orchestrator         │  │
//! │  │  (Axum)   │  │  (ONNX x3)   │  │  (Gemini REST)        │  │
//! │  └─────┬─────┘  └──────┬───────┘  └───────────┬───────────┘  │
//! │        └───────────────┼──────────────────────┘              │
//! │                        ▼                                     │
//! │               ┌─────────────────┐                            │
//! │               │ Clinical Rules  │                            │
//! │               └─────────────────┘                            │
//! └──────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;
mod logic;
mod models;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use logic::registry::ModelRegistry;

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize logging; production defaults to info, development to debug
    let default_filter = if config.is_production() {
        "medirisk_server=info,tower_http=info"
    } else {
        "medirisk_server=debug,tower_http=debug"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("MediRisk server starting...");
    tracing::info!("Model directory: {}", config.model_dir);
    if config.gemini_api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY not set; /recommendations will be unavailable");
    }

    // Fail fast: never serve traffic with a partial model set.
    let registry = ModelRegistry::load(&config.model_dir)
        .expect("Failed to load model artifacts");

    // One bounded-timeout client shared by all in-flight requests
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .expect("Failed to create HTTP client");

    let state = AppState {
        config: config.clone(),
        registry: Arc::new(registry),
        http,
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: config::Config,
    pub registry: Arc<ModelRegistry>,
    pub http: reqwest::Client,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/predict_diabetes", post(handlers::predict::diabetes))
        .route("/predict_kidney", post(handlers::predict::kidney))
        .route("/predict_heart", post(handlers::predict::heart))
        .route("/recommendations", post(handlers::recommendations::create))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}

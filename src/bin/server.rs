use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use repscore_rs::{DatasetConfig, Lookup, LookupError, LookupReport, render_page};

/// Server configuration
struct ServerConfig {
    port: u16,
}

impl ServerConfig {
    fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
        }
    }
}

/// Application state shared across all requests
#[derive(Clone)]
struct AppState {
    lookup: Arc<Lookup>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "server=info,repscore_rs=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();
    let datasets = DatasetConfig::from_env();
    tracing::info!(
        "Datasets: zip={} house={} senate={} (timeout {:?})",
        datasets.zip_codes,
        datasets.house,
        datasets.senate,
        datasets.fetch_timeout
    );

    let app = build_app(Arc::new(Lookup::new(datasets)));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind listener")?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// Build the Axum application with routes and middleware
fn build_app(lookup: Arc<Lookup>) -> Router {
    let state = AppState { lookup };

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Search page
        .route("/", get(index_page))
        .route("/lookup", get(lookup_page))
        // API routes
        .route("/api/lookup", post(lookup_api))
        // Middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

/// Empty search form
async fn index_page() -> Html<String> {
    Html(render_page(None, None))
}

#[derive(Deserialize)]
struct LookupQuery {
    #[serde(default)]
    zipcode: String,
}

/// Search form followed by the results for `?zipcode=`
async fn lookup_page(
    State(state): State<AppState>,
    Query(query): Query<LookupQuery>,
) -> Html<String> {
    let report = state.lookup.run(&query.zipcode).await;
    Html(render_page(Some(&report.zipcode), Some(&report.entries)))
}

#[derive(Deserialize)]
struct LookupRequest {
    zipcode: String,
}

#[derive(Serialize)]
struct LookupResponse {
    success: bool,
    #[serde(flatten)]
    report: LookupReport,
}

/// JSON lookup. Errors that end the search map to HTTP errors; House or
/// Senate misses are reported inside a successful response.
async fn lookup_api(
    State(state): State<AppState>,
    Json(request): Json<LookupRequest>,
) -> Result<Json<LookupResponse>, ApiError> {
    tracing::info!("Looking up representatives for ZIP {:?}", request.zipcode);

    let mut report = state.lookup.run(&request.zipcode).await;
    if let Some(err) = report.session_error.take() {
        return Err(ApiError::from(err));
    }

    Ok(Json(LookupResponse {
        success: true,
        report,
    }))
}

/// API error types
enum ApiError {
    BadRequest(String),
    NotFound(String),
    InternalError(String),
}

impl From<LookupError> for ApiError {
    fn from(err: LookupError) -> Self {
        let message = err.user_message().to_string();
        match err {
            LookupError::InvalidInput(_) => ApiError::BadRequest(message),
            LookupError::NotFound(_) => ApiError::NotFound(message),
            LookupError::Load { .. } => {
                tracing::error!("Lookup error: {}", err);
                ApiError::InternalError(message)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "success": false,
            "error": message
        }));

        (status, body).into_response()
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down gracefully...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down gracefully...");
        }
    }
}

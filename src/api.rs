//! HTTP surface: `/api/convert`, `/api/currencies`, `/api/rates/history` and `/api/health`.

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::config::AppConfig;
use crate::core::{ConversionResult, CurrencyCatalog, HistorySeries, RangeCode, RateError};
use crate::providers::frankfurter::FrankfurterProvider;
use crate::service::RateService;

impl IntoResponse for RateError {
    fn into_response(self) -> Response {
        let status = match &self {
            RateError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            RateError::UpstreamCall { .. } | RateError::InvalidUpstreamResponse(_) => {
                StatusCode::BAD_GATEWAY
            }
        };
        if status.is_server_error() {
            error!(error = ?self, "Exchange rate request failed");
        } else {
            warn!(error = %self, "Rejected exchange rate request");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct ConvertParams {
    from: String,
    to: String,
    amount: f64,
}

#[derive(Debug, Deserialize)]
struct HistoryParams {
    base: String,
    target: String,
    #[serde(default)]
    range: Option<String>,
}

// GET /api/convert?from=USD&to=EUR&amount=100
async fn convert(
    State(service): State<RateService>,
    Query(params): Query<ConvertParams>,
) -> Result<Json<ConversionResult>, RateError> {
    let result = service
        .convert(&params.from, &params.to, params.amount)
        .await?;
    Ok(Json(result))
}

// GET /api/currencies
async fn currencies(
    State(service): State<RateService>,
) -> Result<Json<CurrencyCatalog>, RateError> {
    Ok(Json(service.currencies().await?))
}

// GET /api/rates/history?base=USD&target=EUR&range=6M
async fn history(
    State(service): State<RateService>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<HistorySeries>, RateError> {
    let range = params
        .range
        .unwrap_or_else(|| RangeCode::default().to_string());
    let series = service
        .history(&params.base, &params.target, &range)
        .await?;
    Ok(Json(series))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "UP",
        "message": "Currency backend is running",
    }))
}

/// Cross-origin policy for the configured frontend origins, without credentials.
pub fn cors_layer(allowed_origins: &[String]) -> Result<CorsLayer> {
    let origins = allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .with_context(|| format!("Invalid CORS origin: {origin}"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .allow_credentials(false))
}

pub fn router(service: RateService, cors: CorsLayer) -> Router {
    Router::new()
        .route("/api/convert", get(convert))
        .route("/api/currencies", get(currencies))
        .route("/api/rates/history", get(history))
        .route("/api/health", get(health))
        .with_state(service)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Binds the configured address and serves until Ctrl-C.
pub async fn serve(config: &AppConfig) -> Result<()> {
    let provider = FrankfurterProvider::new(config.frankfurter_base_url());
    let service = RateService::new(Arc::new(provider));
    let app = router(service, cors_layer(&config.server.allowed_origins)?);

    let addr = &config.server.bind;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(
        upstream = config.frankfurter_base_url(),
        "Listening on http://{}",
        listener.local_addr()?
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "Failed to listen for shutdown signal");
            }
            info!("Shutting down");
        })
        .await
        .context("Server failed")
}

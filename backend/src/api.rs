//! HTTP surface
//!
//! Serves the HTML price board plus a small JSON API over the same data.

use crate::{
    error::{BoardError, Result},
    page::render_index,
    price_board::PriceBoard,
    types::PriceRecord,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub board: Arc<PriceBoard>,
    pub default_limit: usize,
}

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Page
        .route("/", get(index))
        // JSON endpoints
        .route("/api/cities", get(list_cities))
        .route("/api/city/:city", get(city_price))
        .route("/api/all-prices", get(all_prices))
        .route("/api/health", get(health_check))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ============================================================================
// PAGE
// ============================================================================

/// GET /
///
/// The full board, one row per listed city
async fn index(State(state): State<AppState>) -> Result<Html<String>> {
    let records = state.board.snapshot(None).await?;
    Ok(Html(render_index(&records, chrono::Utc::now())))
}

// ============================================================================
// JSON ENDPOINTS
// ============================================================================

/// GET /api/cities
async fn list_cities(State(state): State<AppState>) -> Result<Json<Vec<String>>> {
    Ok(Json(state.board.cities().await?))
}

/// GET /api/city/:city
///
/// Example: GET /api/city/New%20Delhi
async fn city_price(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Json<PriceRecord>> {
    info!("Fetching price for {}", city);
    Ok(Json(state.board.price_for(&city).await?))
}

/// GET /api/all-prices
///
/// Query params: ?limit=20
///
/// A missing, zero or non-numeric limit falls back to the default.
async fn all_prices(
    State(state): State<AppState>,
    Query(params): Query<AllPricesQuery>,
) -> Result<Json<Vec<PriceRecord>>> {
    let limit = params
        .limit
        .as_deref()
        .and_then(|raw| raw.trim().parse::<usize>().ok())
        .filter(|&limit| limit > 0)
        .unwrap_or(state.default_limit);
    Ok(Json(state.board.snapshot(Some(limit)).await?))
}

/// GET /api/health
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: chrono::Utc::now().timestamp(),
    })
}

// ============================================================================
// REQUEST/RESPONSE TYPES
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct AllPricesQuery {
    pub limit: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: i64,
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

impl IntoResponse for BoardError {
    fn into_response(self) -> Response {
        let status = match &self {
            BoardError::UnknownCity(_) => StatusCode::NOT_FOUND,
            BoardError::CityList { .. } => {
                error!("{}", self);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(serde_json::json!({
            "success": false,
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

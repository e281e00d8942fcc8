//! Products test API
//!
//! Serves a fixed catalog through `GET /products?minPrice=..&maxPrice=..`,
//! returning at most one page of matches together with the true match count.

pub mod generate;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use shared::{Catalog, ErrorBody};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::debug;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
}

impl AppState {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }
}

/// Raw query string; parsed by hand so malformed numbers get the API's own
/// error body instead of axum's rejection text.
#[derive(Debug, Deserialize)]
pub struct ProductsQuery {
    #[serde(rename = "minPrice")]
    pub min_price: Option<String>,
    #[serde(rename = "maxPrice")]
    pub max_price: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/products", get(list_products))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductsQuery>,
) -> Response {
    let min_price = match parse_price("minPrice", query.min_price.as_deref()) {
        Ok(price) => price,
        Err(message) => return bad_request(message),
    };
    let max_price = match parse_price("maxPrice", query.max_price.as_deref()) {
        Ok(price) => price,
        Err(message) => return bad_request(message),
    };

    match state.catalog.query(min_price, max_price) {
        Ok(response) => {
            debug!(
                "products [{}, {}]: total={} count={}",
                min_price, max_price, response.total, response.count
            );
            Json(response).into_response()
        }
        Err(e) => bad_request(e.to_string()),
    }
}

fn parse_price(name: &str, raw: Option<&str>) -> Result<i64, String> {
    let raw = raw.ok_or_else(|| format!("{} is required", name))?;
    raw.trim()
        .parse()
        .map_err(|_| format!("{} must be an integer", name))
}

fn bad_request(error: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorBody { error })).into_response()
}

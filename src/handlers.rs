//! HTTP route handlers for the gateway.
//!
//! This module contains the handler functions behind every route and the router that
//! wires them to the shared application state.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use log::info;
use serde_json::{json, Value};

use crate::cache::{compute_cache_key, ResponseCache};
use crate::error::Result;
use crate::francetravail::{OffersClient, ProxyResponse, SearchFilters};

/// State shared by all handlers.
///
/// The response cache is the only mutable piece; it is safe to use from concurrent
/// requests. Its keys ignore the bearer token, which assumes a single set of credentials
/// per process.
#[derive(Clone)]
pub struct AppState {
    pub offers: Arc<OffersClient>,
    pub cache: Arc<ResponseCache>,
}

impl AppState {
    pub fn new(offers: OffersClient, cache: ResponseCache) -> Self {
        AppState {
            offers: Arc::new(offers),
            cache: Arc::new(cache),
        }
    }
}

/// Builds the application router with all routes.
///
/// # Routes
///
/// - `GET /`: service banner
/// - `GET /health`: health check
/// - `GET /offres`: offer search, filters as query parameters
/// - `GET /offres/{id}`: offer detail
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_root))
        .route("/health", get(handle_health))
        .route("/offres", get(handle_search))
        .route("/offres/:id", get(handle_offer_detail))
        .with_state(state)
}

/// Handles GET requests to the root `/` endpoint.
pub async fn handle_root() -> &'static str {
    "France Travail job search gateway"
}

/// Handles GET requests to the `/health` endpoint.
///
/// # Example Response
///
/// ```json
/// {
///   "status": "healthy",
///   "service": "ftgateway"
/// }
/// ```
pub async fn handle_health() -> Json<Value> {
    Json(json!({"status": "healthy", "service": "ftgateway"}))
}

/// Handles GET requests to `/offres`.
///
/// Responses are cached for the cache TTL under a digest of the set filters. On a miss
/// the request is forwarded to the France Travail search endpoint.
///
/// # Success Response
///
/// With a `Content-Range` header upstream:
///
/// ```json
/// {
///   "data": { "resultats": [ ... ] },
///   "pagination": { "start": 0, "end": 149, "total": 3021 }
/// }
/// ```
///
/// # Error Response
///
/// ```json
/// { "detail": "<upstream message>" }
/// ```
pub async fn handle_search(
    State(state): State<AppState>,
    Query(filters): Query<SearchFilters>,
) -> Result<ProxyResponse> {
    let key = compute_cache_key("search", &filters.to_query_pairs());
    state
        .cache
        .get_or_fetch(&key, || state.offers.search_offers(&filters))
        .await
}

/// Handles GET requests to `/offres/{id}`.
///
/// Relays the upstream status and JSON body. Cached under a digest of `{id}`.
pub async fn handle_offer_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ProxyResponse> {
    info!("Offer detail requested");
    let key = compute_cache_key("detail", &[("id", id.as_str())]);
    state
        .cache
        .get_or_fetch(&key, || state.offers.get_offer(&id))
        .await
}

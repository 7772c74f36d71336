//! HTTP surface over the point registry and the route optimizer.
//! Paths and JSON field names are the contract the map front-end speaks.

mod error;
mod handlers;
mod payload;

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post},
};
use poi_route_core::{OptimizerOptions, PointRegistry};
use tower_http::cors::{Any, CorsLayer};

/// Shared request state. The registry is injected so tests get isolated instances.
#[derive(Debug)]
pub struct AppState {
    pub registry: PointRegistry,
    pub optimizer: OptimizerOptions,
    /// Fixed optimizer seed; `None` draws fresh OS entropy per request.
    pub seed: Option<u64>,
}

impl AppState {
    pub fn new(registry: PointRegistry, optimizer: OptimizerOptions, seed: Option<u64>) -> Self {
        Self {
            registry,
            optimizer,
            seed,
        }
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/generate_route", post(handlers::generate_route))
        .route("/cities", get(handlers::seed_cities))
        .route("/created_cities", get(handlers::created_cities))
        .route("/get_city_data/:name", get(handlers::city_data))
        .route("/add_city", post(handlers::add_city))
        .route("/edit_city", post(handlers::edit_city))
        .route("/delete_city", delete(handlers::delete_city))
        .layer(cors)
        .with_state(state)
}

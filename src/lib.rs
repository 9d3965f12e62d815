use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod catalog;
pub mod config;
pub mod error;
pub mod handlers;
pub mod storage;

use catalog::service::CatalogService;

/// Build the transport router over a catalog service: REST CRUD under
/// /products plus the realtime observer endpoint at /ws.
pub fn app(service: Arc<CatalogService>) -> Router {
    Router::new()
        .route(
            "/products",
            get(handlers::products::get_all).post(handlers::products::create),
        )
        .route(
            "/products/:id",
            get(handlers::products::get_by_id)
                .put(handlers::products::update)
                .delete(handlers::products::delete),
        )
        .route("/ws", get(handlers::ws::upgrade))
        .with_state(service)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

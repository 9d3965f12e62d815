use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::catalog::product::Product;
use crate::catalog::service::CatalogService;
use crate::error::ApiError;

pub async fn create(
    State(service): State<Arc<CatalogService>>,
    Json(product): Json<Product>,
) -> Result<impl IntoResponse, ApiError> {
    let id = product.id;
    service.create(product).await?;

    // Echo the stored record so the client sees the stamped timestamps.
    let stored = service.get_by_id(id).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

pub async fn update(
    State(service): State<Arc<CatalogService>>,
    Path(id): Path<i64>,
    Json(mut product): Json<Product>,
) -> Result<impl IntoResponse, ApiError> {
    // The path id wins over whatever the body carries.
    product.id = id;
    service.update(product).await?;

    let stored = service.get_by_id(id).await?;
    Ok(Json(stored))
}

pub async fn get_all(
    State(service): State<Arc<CatalogService>>,
) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(service.get_all().await?))
}

pub async fn get_by_id(
    State(service): State<Arc<CatalogService>>,
    Path(id): Path<i64>,
) -> Result<Json<Product>, ApiError> {
    Ok(Json(service.get_by_id(id).await?))
}

pub async fn delete(
    State(service): State<Arc<CatalogService>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    service.delete(id).await?;
    Ok(StatusCode::OK)
}

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use super::{api_error, auth::AuthUser, db_error, ApiError};
use crate::models::catalog::{CreateProductRequest, ProductResponse, UpdateProductRequest};
use crate::models::common::CreatedResponse;
use crate::services::catalog;
use crate::AppState;

pub async fn get_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let products = catalog::list_products(&state.db).await.map_err(db_error)?;
    Ok(Json(products.into_iter().map(Into::into).collect()))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductResponse>, ApiError> {
    catalog::get_product(&state.db, &id)
        .await
        .map_err(db_error)?
        .map(|p| Json(p.into()))
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Product not found"))
}

pub async fn create_product(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    if req.id.is_empty() || req.name.is_empty() || req.unit.is_empty() {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "id, name and unit are required",
        ));
    }

    if catalog::get_product(&state.db, &req.id)
        .await
        .map_err(db_error)?
        .is_some()
    {
        return Err(api_error(
            StatusCode::CONFLICT,
            format!("Product {} already exists", req.id),
        ));
    }

    let product = catalog::create_product(&state.db, &req.id, &req.name, &req.unit)
        .await
        .map_err(db_error)?;

    info!(id_product = %product.id_product, "Product created");
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id: product.id_product,
        }),
    ))
}

pub async fn update_product(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateProductRequest>,
) -> Result<Json<ProductResponse>, ApiError> {
    if req.name.is_empty() || req.unit.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "name and unit are required"));
    }

    catalog::update_product(
        &state.db,
        &id,
        &req.name,
        &req.unit,
        req.position_x,
        req.position_y,
    )
    .await
    .map_err(db_error)?
    .map(|p| Json(p.into()))
    .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Product not found"))
}

pub async fn delete_product(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if !catalog::delete_product(&state.db, &id)
        .await
        .map_err(db_error)?
    {
        return Err(api_error(StatusCode::NOT_FOUND, "Product not found"));
    }

    info!(id_product = %id, "Product deleted");
    Ok(StatusCode::NO_CONTENT)
}

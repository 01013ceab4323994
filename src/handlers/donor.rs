use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use super::{api_error, auth::AuthUser, db_error, ApiError};
use crate::models::catalog::{DonorRequest, DonorResponse};
use crate::models::common::CreatedResponse;
use crate::services::catalog;
use crate::AppState;

pub async fn get_donors(
    State(state): State<AppState>,
) -> Result<Json<Vec<DonorResponse>>, ApiError> {
    let donors = catalog::list_donors(&state.db).await.map_err(db_error)?;
    Ok(Json(donors.into_iter().map(Into::into).collect()))
}

pub async fn get_donor(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DonorResponse>, ApiError> {
    catalog::get_donor(&state.db, &id)
        .await
        .map_err(db_error)?
        .map(|d| Json(d.into()))
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Donor not found"))
}

pub async fn create_donor(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(req): Json<DonorRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    if req.id.is_empty() || req.name.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "id and name are required"));
    }

    if catalog::get_donor(&state.db, &req.id)
        .await
        .map_err(db_error)?
        .is_some()
    {
        return Err(api_error(
            StatusCode::CONFLICT,
            format!("Donor {} already exists", req.id),
        ));
    }

    let donor = catalog::create_donor(&state.db, &req.id, &req.name)
        .await
        .map_err(db_error)?;

    info!(id_donor = %donor.id_donor, "Donor created");
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse { id: donor.id_donor }),
    ))
}

pub async fn update_donor(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<DonorRequest>,
) -> Result<Json<DonorResponse>, ApiError> {
    if req.name.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "name is required"));
    }

    catalog::update_donor(&state.db, &id, &req.name)
        .await
        .map_err(db_error)?
        .map(|d| Json(d.into()))
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Donor not found"))
}

pub async fn delete_donor(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if !catalog::delete_donor(&state.db, &id).await.map_err(db_error)? {
        return Err(api_error(StatusCode::NOT_FOUND, "Donor not found"));
    }

    info!(id_donor = %id, "Donor deleted");
    Ok(StatusCode::NO_CONTENT)
}

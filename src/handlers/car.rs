use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use tracing::warn;

use super::{api_error, auth::AuthUser, db_error, ApiError};
use crate::models::car::{CarResponse, CarType, CreateCarRequest, GetCarQuery};
use crate::services::car_ledger::{self, LedgerError};
use crate::AppState;

fn ledger_error(e: LedgerError) -> ApiError {
    match e {
        LedgerError::NotFound { id_car } => {
            api_error(StatusCode::NOT_FOUND, format!("Car {} not found", id_car))
        }
        LedgerError::IdExhausted(_) => {
            warn!(error = %e, "Car id space collision streak");
            api_error(StatusCode::SERVICE_UNAVAILABLE, e.to_string())
        }
        LedgerError::Db(e) => db_error(e),
    }
}

/// POST /cars/create
///
/// Accepts either a shared password or a session token in `password`.
pub async fn create_car(
    State(state): State<AppState>,
    Json(req): Json<CreateCarRequest>,
) -> Result<(StatusCode, Json<CarResponse>), ApiError> {
    let car_type: CarType = req
        .car_type
        .parse()
        .map_err(|e: String| api_error(StatusCode::BAD_REQUEST, e))?;

    if !state.auth.accepts(&req.password).await {
        return Err(api_error(StatusCode::UNAUTHORIZED, "Incorrect password"));
    }

    let car = car_ledger::create_car(&state.db, car_type)
        .await
        .map_err(ledger_error)?;
    Ok((StatusCode::CREATED, Json(car)))
}

/// GET /cars/get?id=
pub async fn get_car(
    State(state): State<AppState>,
    Query(query): Query<GetCarQuery>,
) -> Result<Json<CarResponse>, ApiError> {
    let id_car = query
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "Car id is required"))?;

    car_ledger::get_car(&state.db, &id_car)
        .await
        .map(Json)
        .map_err(ledger_error)
}

/// GET /cars
pub async fn get_all_cars(
    _user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<CarResponse>>, ApiError> {
    car_ledger::get_all_cars(&state.db)
        .await
        .map(Json)
        .map_err(ledger_error)
}

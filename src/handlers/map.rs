use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use tracing::{error, info};

use super::{api_error, auth::AuthUser, ApiError};
use crate::models::map::MapResponse;
use crate::AppState;

/// Largest accepted map upload
pub const MAP_UPLOAD_LIMIT: usize = 10 * 1024 * 1024;

/// Multipart field holding the map image
const MAP_FIELD: &str = "mapa";

/// GET /map
pub async fn get_map(State(state): State<AppState>) -> Json<MapResponse> {
    Json(MapResponse {
        path: state.map_url(),
    })
}

/// POST /map - replaces the warehouse map image
pub async fn upload_map(
    _user: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<MapResponse>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, format!("Invalid upload: {}", e)))?
    {
        if field.name() != Some(MAP_FIELD) {
            continue;
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| api_error(StatusCode::BAD_REQUEST, format!("Invalid upload: {}", e)))?;

        let path = state.map_path();
        let write = async {
            if let Some(dir) = path.parent() {
                tokio::fs::create_dir_all(dir).await?;
            }
            tokio::fs::write(&path, &data).await
        };
        write.await.map_err(|e| {
            error!(path = %path.display(), error = %e, "Failed to store map");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Could not store map")
        })?;

        info!(path = %path.display(), bytes = data.len(), "Map updated");
        return Ok(Json(MapResponse {
            path: state.map_url(),
        }));
    }

    Err(api_error(
        StatusCode::BAD_REQUEST,
        format!("Missing '{}' file field", MAP_FIELD),
    ))
}

use axum::{
    extract::{FromRequestParts, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap, StatusCode},
    Json,
};
use chrono::DateTime;
use tracing::{debug, info, warn};

use super::{api_error, ApiError};
use crate::models::auth::{LoginRequest, LoginResponse, SessionResponse};
use crate::services::auth::{AuthError, Claims};
use crate::AppState;

/// A request carrying a valid session token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub claims: Claims,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| api_error(StatusCode::UNAUTHORIZED, "Missing bearer token"))?;

        let claims = state.auth.verify_token(token).map_err(|e| {
            debug!(error = %e, "Rejected session token");
            api_error(StatusCode::UNAUTHORIZED, "Invalid or expired token")
        })?;

        Ok(AuthUser { claims })
    }
}

pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    match state.auth.authenticate(&req.password).await {
        Ok(()) => {}
        Err(AuthError::InvalidPassword) => {
            warn!("Login attempt with incorrect password");
            return Err(api_error(StatusCode::UNAUTHORIZED, "Incorrect password"));
        }
        Err(e) => {
            return Err(api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Could not check password: {}", e),
            ));
        }
    }

    let (token, expires_at) = state.auth.issue_token().map_err(|e| {
        api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Could not issue token: {}", e),
        )
    })?;

    info!("Session started");
    Ok(Json(LoginResponse { token, expires_at }))
}

/// GET /login - reports whether the caller's token is still valid
pub async fn session(user: AuthUser) -> Json<SessionResponse> {
    let expires_at = DateTime::from_timestamp(user.claims.exp, 0)
        .map(|ts| ts.to_rfc3339())
        .unwrap_or_default();

    Json(SessionResponse {
        logged_in: true,
        expires_at,
    })
}

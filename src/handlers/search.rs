use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use super::{api_error, db_error, ApiError};
use crate::models::catalog::{DonorResponse, ProductResponse, SearchQuery, SearchResponse};
use crate::services::catalog;
use crate::AppState;

enum SearchBy<'a> {
    Id(&'a str),
    Name(&'a str),
}

/// `id` wins when both parameters are present
fn search_by(query: &SearchQuery) -> Result<SearchBy<'_>, ApiError> {
    fn non_empty(v: &Option<String>) -> Option<&str> {
        v.as_deref().filter(|s| !s.is_empty())
    }

    if let Some(id) = non_empty(&query.id) {
        Ok(SearchBy::Id(id))
    } else if let Some(name) = non_empty(&query.name) {
        Ok(SearchBy::Name(name))
    } else {
        Err(api_error(
            StatusCode::BAD_REQUEST,
            "Search parameter 'name' or 'id' is required",
        ))
    }
}

/// GET /search/products?name=|id=
pub async fn search_products(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse<ProductResponse>>, ApiError> {
    let products = match search_by(&query)? {
        SearchBy::Id(id) => catalog::search_products_by_id(&state.db, id).await,
        SearchBy::Name(name) => catalog::search_products_by_name(&state.db, name).await,
    }
    .map_err(db_error)?;

    let results: Vec<ProductResponse> = products.into_iter().map(Into::into).collect();
    Ok(Json(results.into()))
}

/// GET /search/donors?name=|id=
pub async fn search_donors(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse<DonorResponse>>, ApiError> {
    let donors = match search_by(&query)? {
        SearchBy::Id(id) => catalog::search_donors_by_id(&state.db, id).await,
        SearchBy::Name(name) => catalog::search_donors_by_name(&state.db, name).await,
    }
    .map_err(db_error)?;

    let results: Vec<DonorResponse> = donors.into_iter().map(Into::into).collect();
    Ok(Json(results.into()))
}

use std::path::Path;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::warn;

use crate::handlers::{auth, car, car_ws, donor, map, product, search};
use crate::AppState;

pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    let assets = ServeDir::new(Path::new(&state.assets_dir));

    Router::new()
        .route("/health", get(health))
        .route("/login", get(auth::session).post(auth::login))
        .route("/products", get(product::get_products).post(product::create_product))
        .route(
            "/products/{id}",
            get(product::get_product)
                .put(product::update_product)
                .delete(product::delete_product),
        )
        .route("/donors", get(donor::get_donors).post(donor::create_donor))
        .route(
            "/donors/{id}",
            get(donor::get_donor)
                .put(donor::update_donor)
                .delete(donor::delete_donor),
        )
        .route("/search/products", get(search::search_products))
        .route("/search/donors", get(search::search_donors))
        .route("/cars", get(car::get_all_cars))
        .route("/cars/create", post(car::create_car))
        .route("/cars/get", get(car::get_car))
        .route(
            "/map",
            get(map::get_map)
                .post(map::upload_map)
                .layer(DefaultBodyLimit::max(map::MAP_UPLOAD_LIMIT)),
        )
        .route("/ws", get(car_ws::car_websocket))
        .nest_service("/assets", assets)
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|e| warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin"))
                .ok()
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

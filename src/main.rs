use berco_backend::{
    config::AppConfig, jobs::car_sweep::start_car_sweep_job, routes::build_router,
    services::{auth::AuthService, car_registry::CarRegistry},
    AppState,
};
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,berco_backend=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().expect("Invalid configuration");

    // Connect to database
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    // Run migrations
    tracing::info!("Running migrations...");
    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let auth = AuthService::new(
        &config.jwt_secret,
        &[config.admin_password.as_str(), config.volunteer_password.as_str()],
    )
    .expect("Failed to hash passwords");

    let state = AppState {
        db: db.clone(),
        registry: Arc::new(CarRegistry::new()),
        auth: Arc::new(auth),
        assets_dir: config.assets_dir.clone(),
        map_file_name: config.map_file_name.clone(),
    };

    start_car_sweep_job(db, config.car_sweep_interval).await;

    let app = build_router(state, &config.cors_origins);

    // Start server
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .expect("Failed to bind listener");

    tracing::info!("Server listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}

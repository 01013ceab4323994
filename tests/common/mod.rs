#![allow(dead_code)]

use berco_backend::{
    services::{auth::AuthService, car_registry::CarRegistry},
    AppState,
};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use std::env;
use std::sync::Arc;

pub const ADMIN_PASSWORD: &str = "admin-pass";
pub const VOLUNTEER_PASSWORD: &str = "voluntario-pass";
pub const JWT_SECRET: &str = "test-secret";

/// Seeded catalog products, present after migrations
pub const PRODUCT_A: &str = "GAMR0001";
pub const PRODUCT_B: &str = "GAMR0002";

/// Set up a migrated test database.
/// Uses TEST_DATABASE_URL or falls back to a private in-memory SQLite database
pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let database_url = env::var("TEST_DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".to_string());

    let mut options = ConnectOptions::new(database_url.clone());
    if database_url.starts_with("sqlite::memory:") {
        // Every in-memory connection is its own database
        options.max_connections(1).min_connections(1);
    }
    options.sqlx_logging(false);

    let db = Database::connect(options).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub fn test_state(db: DatabaseConnection) -> AppState {
    let auth = AuthService::new(JWT_SECRET, &[ADMIN_PASSWORD, VOLUNTEER_PASSWORD])
        .expect("hash test passwords");

    AppState {
        db,
        registry: Arc::new(CarRegistry::new()),
        auth: Arc::new(auth),
        assets_dir: env::temp_dir().join(format!("berco-assets-{}", std::process::id())),
        map_file_name: "mapa.png".to_string(),
    }
}

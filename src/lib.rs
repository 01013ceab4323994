// src/lib.rs

use sea_orm::DatabaseConnection;
use services::{auth::AuthService, car_registry::CarRegistry};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub registry: Arc<CarRegistry>,
    pub auth: Arc<AuthService>,
    pub assets_dir: PathBuf,
    pub map_file_name: String,
}

impl AppState {
    /// Filesystem location of the warehouse map
    pub fn map_path(&self) -> PathBuf {
        self.assets_dir.join(&self.map_file_name)
    }

    /// URL the map is served under
    pub fn map_url(&self) -> String {
        format!("/assets/{}", self.map_file_name)
    }
}

pub mod entities {
    pub mod prelude;
    pub mod cars;
    pub mod donors;
    pub mod products;
    pub mod products_car;
}

pub mod services {
    pub mod auth;
    pub mod car_dispatcher;
    pub mod car_ledger;
    pub mod car_registry;
    pub mod catalog;
    pub mod text;
}

pub mod config;
pub mod handlers;
pub mod jobs;
pub mod models;
pub mod routes;

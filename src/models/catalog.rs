use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};

use crate::entities::{donors, products};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub unit: String,
    pub position_x: i32,
    pub position_y: i32,
    pub created_at: DateTimeWithTimeZone,
}

impl From<products::Model> for ProductResponse {
    fn from(p: products::Model) -> Self {
        Self {
            id: p.id_product,
            name: p.name,
            unit: p.unit,
            position_x: p.pos_x,
            position_y: p.pos_y,
            created_at: p.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductRequest {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub unit: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProductRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub position_x: i32,
    #[serde(default)]
    pub position_y: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonorResponse {
    pub id: String,
    pub name: String,
    pub created_at: DateTimeWithTimeZone,
}

impl From<donors::Model> for DonorResponse {
    fn from(d: donors::Model) -> Self {
        Self {
            id: d.id_donor,
            name: d.name,
            created_at: d.created_at,
        }
    }
}

/// Used for both create (id + name) and update (name only)
#[derive(Debug, Clone, Deserialize)]
pub struct DonorRequest {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    pub name: Option<String>,
    pub id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse<T> {
    pub results: Vec<T>,
    pub count: usize,
}

impl<T> From<Vec<T>> for SearchResponse<T> {
    fn from(results: Vec<T>) -> Self {
        Self {
            count: results.len(),
            results,
        }
    }
}

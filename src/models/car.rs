//! Car (entry/exit manifest) payloads shared by the HTTP handlers and the
//! live-connection broadcast.

use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};

use crate::entities::{cars, products, products_car};

/// `date_export` value sent for a car that has not been exported yet
pub const NOT_EXPORTED: &str = "0";

/// Direction of a car: goods coming in or going out of the warehouse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CarType {
    #[serde(rename = "Entrada")]
    Incoming,
    #[serde(rename = "Saída")]
    Outgoing,
}

impl std::fmt::Display for CarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CarType::Incoming => write!(f, "Entrada"),
            CarType::Outgoing => write!(f, "Saída"),
        }
    }
}

impl std::str::FromStr for CarType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Entrada" => Ok(CarType::Incoming),
            "Saída" => Ok(CarType::Outgoing),
            _ => Err(format!(
                "Invalid car type '{}', must be 'Entrada' or 'Saída'",
                s
            )),
        }
    }
}

/// A line item as sent to clients. Product fields are only present when the
/// item was read joined with its product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarProduct {
    pub id: i32,
    pub id_car: String,
    pub id_product: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos_x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos_y: Option<i32>,
    pub quantity: f64,
    pub expiration: String,
    pub description: String,
}

impl CarProduct {
    pub fn joined(item: products_car::Model, product: &products::Model) -> Self {
        Self {
            name: Some(product.name.clone()),
            unit: Some(product.unit.clone()),
            pos_x: Some(product.pos_x),
            pos_y: Some(product.pos_y),
            ..CarProduct::from(item)
        }
    }
}

impl From<products_car::Model> for CarProduct {
    fn from(item: products_car::Model) -> Self {
        Self {
            id: item.id,
            id_car: item.id_car,
            id_product: item.id_product,
            name: None,
            unit: None,
            pos_x: None,
            pos_y: None,
            quantity: item.quantity,
            expiration: item.expiration,
            description: item.description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarResponse {
    pub id_car: String,
    #[serde(rename = "type")]
    pub car_type: String,
    pub date_export: String,
    pub products: Vec<CarProduct>,
}

impl CarResponse {
    pub fn new(car: cars::Model, products: Vec<CarProduct>) -> Self {
        Self {
            id_car: car.id_car,
            car_type: car.car_type,
            date_export: export_marker(car.date_export),
            products,
        }
    }
}

/// Wire form of the export timestamp
pub fn export_marker(date_export: Option<DateTimeWithTimeZone>) -> String {
    match date_export {
        Some(ts) => ts.to_rfc3339(),
        None => NOT_EXPORTED.to_string(),
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCarRequest {
    /// One of the shared passwords, or a session token
    pub password: String,
    #[serde(rename = "type")]
    pub car_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GetCarQuery {
    pub id: Option<String>,
}

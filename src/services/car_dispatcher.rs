//! Live car update dispatcher
//!
//! Decodes one inbound live-connection message, applies it to the car ledger
//! and rebroadcasts the refreshed car to every connection watching it.
//!
//! Inbound messages:
//! ```json
//! {"action": "AddProductCar", "id": 0, "id_car": "ABC123", "id_product": "GAMR0001",
//!  "quantity": 2, "expiration": "2025-01-01", "description": "demo"}
//! ```
//!
//! Outbound broadcast:
//! ```json
//! {"action": "UpdateCar", "id_car": "ABC123", "products": [...]}
//! ```

use axum::extract::ws::Message;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::car::CarProduct;
use crate::services::car_ledger::{self, LedgerError};
use crate::services::car_registry::CarRegistry;

/// One inbound message, discriminated by its `action` field
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action")]
pub enum CarAction {
    DeleteCar {
        id_car: String,
    },
    GetCar {
        id_car: String,
    },
    Export {
        id_car: String,
    },
    /// `id == 0` inserts a new line item, any other id updates that item
    AddProductCar {
        id: i32,
        id_car: String,
        id_product: String,
        quantity: f64,
        expiration: String,
        description: String,
    },
    DeleteProductCar {
        id: i32,
        id_car: String,
    },
    EditProductCar {
        id: i32,
        id_car: String,
        quantity: f64,
        expiration: String,
        description: String,
    },
}

impl CarAction {
    pub fn id_car(&self) -> &str {
        match self {
            CarAction::DeleteCar { id_car }
            | CarAction::GetCar { id_car }
            | CarAction::Export { id_car }
            | CarAction::AddProductCar { id_car, .. }
            | CarAction::DeleteProductCar { id_car, .. }
            | CarAction::EditProductCar { id_car, .. } => id_car,
        }
    }

    /// Whether subscribers get a fresh snapshot once the action is applied.
    /// Deleting or exporting a car is not announced.
    pub fn broadcasts(&self) -> bool {
        !matches!(self, CarAction::DeleteCar { .. } | CarAction::Export { .. })
    }
}

/// Messages pushed to live connections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum CarBroadcast {
    UpdateCar {
        id_car: String,
        products: Vec<CarProduct>,
    },
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("malformed message: {0}")]
    Protocol(#[from] serde_json::Error),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

#[derive(Clone)]
pub struct CarDispatcher {
    db: DatabaseConnection,
    registry: Arc<CarRegistry>,
}

impl CarDispatcher {
    pub fn new(db: DatabaseConnection, registry: Arc<CarRegistry>) -> Self {
        Self { db, registry }
    }

    /// Decode and apply one raw message. A decoding failure leaves the ledger
    /// untouched.
    pub async fn handle_message(&self, raw: &str) -> Result<(), DispatchError> {
        let action: CarAction = serde_json::from_str(raw)?;
        self.apply(action).await
    }

    pub async fn apply(&self, action: CarAction) -> Result<(), DispatchError> {
        debug!(action = ?action, "Applying car action");

        match &action {
            CarAction::DeleteCar { id_car } => {
                car_ledger::delete_car(&self.db, id_car).await?;
            }
            CarAction::GetCar { .. } => {}
            CarAction::Export { id_car } => {
                car_ledger::set_exported_now(&self.db, id_car).await?;
            }
            CarAction::AddProductCar {
                id: 0,
                id_car,
                id_product,
                quantity,
                expiration,
                description,
            } => {
                car_ledger::add_line_item(
                    &self.db,
                    id_car,
                    id_product,
                    *quantity,
                    expiration,
                    description,
                )
                .await?;
            }
            CarAction::AddProductCar {
                id,
                quantity,
                expiration,
                description,
                ..
            }
            | CarAction::EditProductCar {
                id,
                quantity,
                expiration,
                description,
                ..
            } => {
                car_ledger::edit_line_item(&self.db, *id, *quantity, expiration, description)
                    .await?;
            }
            CarAction::DeleteProductCar { id, .. } => {
                car_ledger::delete_line_item(&self.db, *id).await?;
            }
        }

        if action.broadcasts() {
            self.broadcast_car(action.id_car()).await?;
        }
        Ok(())
    }

    /// Re-read a car and push it to every connection subscribed to it.
    ///
    /// A car that no longer exists is skipped. Returns how many connections the
    /// snapshot was queued for.
    pub async fn broadcast_car(&self, id_car: &str) -> Result<usize, DispatchError> {
        let car = match car_ledger::get_car(&self.db, id_car).await {
            Ok(car) => car,
            Err(LedgerError::NotFound { .. }) => {
                warn!(id_car = %id_car, "Car no longer exists, skipping broadcast");
                return Ok(0);
            }
            Err(e) => return Err(e.into()),
        };

        let update = CarBroadcast::UpdateCar {
            id_car: car.id_car,
            products: car.products,
        };
        let payload = serde_json::to_string(&update)?;

        let delivered = self.registry.broadcast(id_car, Message::Text(payload.into()));
        debug!(id_car = %id_car, delivered = delivered, "Car update broadcast");
        Ok(delivered)
    }
}

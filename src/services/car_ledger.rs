//! Car Ledger
//!
//! Persistent access layer for cars and their line items. Every function is a
//! thin wrapper over one or a few statements; multi-statement deletes run in a
//! transaction so a car never loses its header while keeping its items.

use std::collections::HashMap;

use chrono::{DateTime, Duration, NaiveTime, Utc};
use rand::Rng;
use sea_orm::{
    sea_query::{Expr, Query},
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, SqlErr, TransactionTrait,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::entities::{cars, prelude::*, products_car};
use crate::models::car::{CarProduct, CarResponse, CarType};

/// Length of a car code, e.g. "K7Q2ZP"
pub const CAR_ID_LENGTH: usize = 6;

const CAR_ID_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// How many fresh codes to try before giving up on a collision streak
const CAR_ID_ATTEMPTS: usize = 8;

/// Exported cars are kept for this many whole days
pub const RETENTION_DAYS: i64 = 7;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("car {id_car} not found")]
    NotFound { id_car: String },
    #[error("could not find a free car id after {0} attempts")]
    IdExhausted(usize),
    #[error("database error: {0}")]
    Db(#[from] DbErr),
}

/// Rows removed by a retention sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub cars: u64,
    pub line_items: u64,
}

pub fn generate_car_id() -> String {
    let mut rng = rand::thread_rng();
    (0..CAR_ID_LENGTH)
        .map(|_| CAR_ID_CHARSET[rng.gen_range(0..CAR_ID_CHARSET.len())] as char)
        .collect()
}

/// Create an empty, unexported car with a fresh code.
///
/// A code that is already taken, including by a concurrent create, is
/// regenerated.
pub async fn create_car(
    db: &DatabaseConnection,
    car_type: CarType,
) -> Result<CarResponse, LedgerError> {
    create_car_with_ids(db, car_type, generate_car_id).await
}

/// `create_car` drawing candidate codes from `next_id`
pub async fn create_car_with_ids<F>(
    db: &DatabaseConnection,
    car_type: CarType,
    mut next_id: F,
) -> Result<CarResponse, LedgerError>
where
    F: FnMut() -> String,
{
    for _ in 0..CAR_ID_ATTEMPTS {
        let id_car = next_id();

        let inserted = cars::ActiveModel {
            id_car: Set(id_car.clone()),
            car_type: Set(car_type.to_string()),
            date_export: Set(None),
        }
        .insert(db)
        .await;

        let car = match inserted {
            Ok(car) => car,
            Err(e) => {
                if is_taken(db, &id_car, &e).await? {
                    debug!(id_car = %id_car, "Car id already taken, generating another");
                    continue;
                }
                return Err(e.into());
            }
        };

        info!(id_car = %car.id_car, car_type = %car.car_type, "Car created");
        return Ok(CarResponse::new(car, Vec::new()));
    }

    Err(LedgerError::IdExhausted(CAR_ID_ATTEMPTS))
}

/// Whether a failed insert hit an existing car code. Not every driver reports
/// primary-key conflicts as unique violations, so the row is looked up too.
async fn is_taken(db: &DatabaseConnection, id_car: &str, err: &DbErr) -> Result<bool, DbErr> {
    if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        return Ok(true);
    }
    Ok(Cars::find_by_id(id_car.to_string()).one(db).await?.is_some())
}

/// Fetch a car with every line item joined with its product's display fields.
///
/// Items whose product no longer exists are left out, as with an inner join.
pub async fn get_car(db: &DatabaseConnection, id_car: &str) -> Result<CarResponse, LedgerError> {
    let car = Cars::find_by_id(id_car.to_string())
        .one(db)
        .await?
        .ok_or_else(|| LedgerError::NotFound {
            id_car: id_car.to_string(),
        })?;

    let rows = ProductsCar::find()
        .find_also_related(Products)
        .filter(products_car::Column::IdCar.eq(id_car))
        .order_by_asc(products_car::Column::Id)
        .all(db)
        .await?;

    let products = rows
        .into_iter()
        .filter_map(|(item, product)| product.map(|p| CarProduct::joined(item, &p)))
        .collect();

    Ok(CarResponse::new(car, products))
}

/// Every car with its raw line items (no product join)
pub async fn get_all_cars(db: &DatabaseConnection) -> Result<Vec<CarResponse>, LedgerError> {
    let cars = Cars::find()
        .order_by_asc(cars::Column::IdCar)
        .all(db)
        .await?;

    let mut items_by_car: HashMap<String, Vec<CarProduct>> = HashMap::new();
    for item in ProductsCar::find()
        .order_by_asc(products_car::Column::Id)
        .all(db)
        .await?
    {
        items_by_car
            .entry(item.id_car.clone())
            .or_default()
            .push(item.into());
    }

    Ok(cars
        .into_iter()
        .map(|car| {
            let products = items_by_car.remove(&car.id_car).unwrap_or_default();
            CarResponse::new(car, products)
        })
        .collect())
}

/// Delete a car and its line items in one transaction.
///
/// Returns whether a car row was removed; deleting an unknown car is not an error.
pub async fn delete_car(db: &DatabaseConnection, id_car: &str) -> Result<bool, LedgerError> {
    let txn = db.begin().await?;

    let items = ProductsCar::delete_many()
        .filter(products_car::Column::IdCar.eq(id_car))
        .exec(&txn)
        .await?;
    let car = Cars::delete_by_id(id_car.to_string()).exec(&txn).await?;

    txn.commit().await?;

    info!(
        id_car = %id_car,
        line_items = items.rows_affected,
        deleted = car.rows_affected > 0,
        "Car deleted"
    );
    Ok(car.rows_affected > 0)
}

/// Start of the UTC day `RETENTION_DAYS` before `now`. Cars exported before
/// this instant are past retention.
pub fn retention_cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
    (now.date_naive() - Duration::days(RETENTION_DAYS))
        .and_time(NaiveTime::MIN)
        .and_utc()
}

/// Delete every car exported before the retention cutoff, its line items, and
/// any line item left without a car.
pub async fn sweep_expired_cars(db: &DatabaseConnection) -> Result<SweepReport, LedgerError> {
    sweep_cars_exported_before(db, retention_cutoff(Utc::now())).await
}

pub async fn sweep_cars_exported_before(
    db: &DatabaseConnection,
    cutoff: DateTime<Utc>,
) -> Result<SweepReport, LedgerError> {
    let txn = db.begin().await?;

    let expired: Vec<String> = Cars::find()
        .filter(cars::Column::DateExport.is_not_null())
        .filter(cars::Column::DateExport.lt(cutoff.fixed_offset()))
        .all(&txn)
        .await?
        .into_iter()
        .map(|car| car.id_car)
        .collect();

    let mut report = SweepReport::default();

    if !expired.is_empty() {
        report.line_items += ProductsCar::delete_many()
            .filter(products_car::Column::IdCar.is_in(expired.clone()))
            .exec(&txn)
            .await?
            .rows_affected;
        report.cars = Cars::delete_many()
            .filter(cars::Column::IdCar.is_in(expired))
            .exec(&txn)
            .await?
            .rows_affected;
    }

    report.line_items += sweep_orphan_line_items(&txn).await?;

    txn.commit().await?;

    info!(
        cutoff = %cutoff,
        cars = report.cars,
        line_items = report.line_items,
        "Retention sweep finished"
    );
    Ok(report)
}

/// Remove line items whose car no longer exists
async fn sweep_orphan_line_items<C: ConnectionTrait>(db: &C) -> Result<u64, DbErr> {
    let result = ProductsCar::delete_many()
        .filter(
            products_car::Column::IdCar.not_in_subquery(
                Query::select()
                    .column(cars::Column::IdCar)
                    .from(Cars)
                    .to_owned(),
            ),
        )
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Mark a car as exported now
pub async fn set_exported_now(db: &DatabaseConnection, id_car: &str) -> Result<(), LedgerError> {
    let result = Cars::update_many()
        .col_expr(cars::Column::DateExport, Expr::value(Utc::now().fixed_offset()))
        .filter(cars::Column::IdCar.eq(id_car))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(LedgerError::NotFound {
            id_car: id_car.to_string(),
        });
    }
    info!(id_car = %id_car, "Car exported");
    Ok(())
}

/// Insert a line item and return the id the store assigned to it
pub async fn add_line_item(
    db: &DatabaseConnection,
    id_car: &str,
    id_product: &str,
    quantity: f64,
    expiration: &str,
    description: &str,
) -> Result<i32, LedgerError> {
    let item = products_car::ActiveModel {
        id_car: Set(id_car.to_string()),
        id_product: Set(id_product.to_string()),
        quantity: Set(quantity),
        expiration: Set(expiration.to_string()),
        description: Set(description.to_string()),
        ..Default::default()
    };
    let id = ProductsCar::insert(item).exec(db).await?.last_insert_id;
    debug!(id_car = %id_car, id = id, "Line item added");
    Ok(id)
}

/// Update a line item's quantity, expiration and description.
///
/// An unknown id updates nothing and is not reported.
pub async fn edit_line_item(
    db: &DatabaseConnection,
    id: i32,
    quantity: f64,
    expiration: &str,
    description: &str,
) -> Result<(), LedgerError> {
    let result = ProductsCar::update_many()
        .col_expr(products_car::Column::Quantity, Expr::value(quantity))
        .col_expr(products_car::Column::Expiration, Expr::value(expiration))
        .col_expr(products_car::Column::Description, Expr::value(description))
        .filter(products_car::Column::Id.eq(id))
        .exec(db)
        .await?;
    debug!(id = id, rows = result.rows_affected, "Line item edited");
    Ok(())
}

pub async fn delete_line_item(db: &DatabaseConnection, id: i32) -> Result<(), LedgerError> {
    let result = ProductsCar::delete_by_id(id).exec(db).await?;
    debug!(id = id, rows = result.rows_affected, "Line item deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_generated_ids_use_six_uppercase_alphanumerics() {
        for _ in 0..100 {
            let id = generate_car_id();
            assert_eq!(id.len(), CAR_ID_LENGTH);
            assert!(id
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_retention_cutoff_is_midnight_seven_days_back() {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 15, 30, 0).unwrap();
        let cutoff = retention_cutoff(now);
        assert_eq!(cutoff, Utc.with_ymd_and_hms(2025, 3, 3, 0, 0, 0).unwrap());
    }
}

//! Car retention sweep
//!
//! Deletes cars exported more than `RETENTION_DAYS` ago, their line items, and
//! any line item left without a car. Runs once at startup and then on a fixed
//! interval.

use sea_orm::DatabaseConnection;
use tokio::time::{interval, Duration};
use tracing::{error, info};

use crate::services::car_ledger;

/// Default sweep interval in seconds (24 hours)
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 86400;

/// Environment variable for the sweep interval
pub const ENV_SWEEP_INTERVAL: &str = "CAR_SWEEP_INTERVAL_SECS";

pub async fn start_car_sweep_job(db: DatabaseConnection, every: Duration) {
    tokio::spawn(async move {
        info!(
            interval_secs = every.as_secs(),
            retention_days = car_ledger::RETENTION_DAYS,
            "Car retention sweep job started"
        );

        // First tick completes immediately
        let mut interval = interval(every);

        loop {
            interval.tick().await;

            match car_ledger::sweep_expired_cars(&db).await {
                Ok(report) => {
                    info!(
                        cars = report.cars,
                        line_items = report.line_items,
                        "Car retention sweep completed"
                    );
                }
                Err(e) => {
                    error!(error = %e, "Car retention sweep failed, retrying next interval");
                }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_interval() {
        assert_eq!(DEFAULT_SWEEP_INTERVAL_SECS, 86400);
    }

    #[test]
    fn test_env_var_name() {
        assert_eq!(ENV_SWEEP_INTERVAL, "CAR_SWEEP_INTERVAL_SECS");
    }
}

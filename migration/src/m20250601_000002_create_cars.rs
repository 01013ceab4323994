//! Cars (entry/exit manifests) and their line items.
//!
//! `date_export` is NULL until the car is exported. Line items reference both
//! their car and the product; the foreign keys are declared inline so the
//! same migration runs on SQLite.

use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250601_000001_create_catalog::Products;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Cars::Table)
                    .if_not_exists()
                    .col(string(Cars::IdCar).primary_key())
                    .col(string(Cars::Type).not_null())
                    .col(timestamp_with_time_zone_null(Cars::DateExport))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProductsCar::Table)
                    .if_not_exists()
                    .col(pk_auto(ProductsCar::Id))
                    .col(string(ProductsCar::IdCar).not_null())
                    .col(string(ProductsCar::IdProduct).not_null())
                    .col(double(ProductsCar::Quantity).default(1.0))
                    .col(string(ProductsCar::Expiration).not_null())
                    .col(string(ProductsCar::Description).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_car_id_car")
                            .from(ProductsCar::Table, ProductsCar::IdCar)
                            .to(Cars::Table, Cars::IdCar),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_car_id_product")
                            .from(ProductsCar::Table, ProductsCar::IdProduct)
                            .to(Products::Table, Products::IdProduct),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_car_id_car")
                    .table(ProductsCar::Table)
                    .col(ProductsCar::IdCar)
                    .to_owned(),
            )
            .await?;

        // Retention sweep filters on export date
        manager
            .create_index(
                Index::create()
                    .name("idx_cars_date_export")
                    .table(Cars::Table)
                    .col(Cars::DateExport)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProductsCar::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Cars::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Cars {
    Table,
    IdCar,
    Type,
    DateExport,
}

#[derive(DeriveIden)]
enum ProductsCar {
    Table,
    Id,
    IdCar,
    IdProduct,
    Quantity,
    Expiration,
    Description,
}

//! Reference catalog tables: products (with their map placement) and donors.

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(string(Products::IdProduct).primary_key())
                    .col(string(Products::Name).not_null())
                    .col(string(Products::NormalizedName).not_null())
                    .col(string(Products::Unit).not_null())
                    .col(integer(Products::PosX).default(0))
                    .col(integer(Products::PosY).default(0))
                    .col(
                        timestamp_with_time_zone(Products::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Search runs LIKE over the folded name
        manager
            .create_index(
                Index::create()
                    .name("idx_products_normalized_name")
                    .table(Products::Table)
                    .col(Products::NormalizedName)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Donors::Table)
                    .if_not_exists()
                    .col(string(Donors::IdDonor).primary_key())
                    .col(string(Donors::Name).not_null())
                    .col(string(Donors::NormalizedName).not_null())
                    .col(
                        timestamp_with_time_zone(Donors::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_donors_normalized_name")
                    .table(Donors::Table)
                    .col(Donors::NormalizedName)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Donors::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Products {
    Table,
    IdProduct,
    Name,
    NormalizedName,
    Unit,
    PosX,
    PosY,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Donors {
    Table,
    IdDonor,
    Name,
    NormalizedName,
    CreatedAt,
}

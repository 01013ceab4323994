//! Product and donor catalog queries

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::{donors, prelude::*, products};
use crate::services::text::normalize_text;

pub async fn list_products(db: &DatabaseConnection) -> Result<Vec<products::Model>, DbErr> {
    Products::find()
        .order_by_asc(products::Column::IdProduct)
        .all(db)
        .await
}

pub async fn get_product(
    db: &DatabaseConnection,
    id: &str,
) -> Result<Option<products::Model>, DbErr> {
    Products::find_by_id(id.to_string()).one(db).await
}

pub async fn create_product(
    db: &DatabaseConnection,
    id: &str,
    name: &str,
    unit: &str,
) -> Result<products::Model, DbErr> {
    products::ActiveModel {
        id_product: Set(id.to_string()),
        name: Set(name.to_string()),
        normalized_name: Set(normalize_text(name)),
        unit: Set(unit.to_string()),
        pos_x: Set(0),
        pos_y: Set(0),
        created_at: Set(Utc::now().fixed_offset()),
    }
    .insert(db)
    .await
}

/// Returns `None` when the product does not exist
pub async fn update_product(
    db: &DatabaseConnection,
    id: &str,
    name: &str,
    unit: &str,
    pos_x: i32,
    pos_y: i32,
) -> Result<Option<products::Model>, DbErr> {
    let Some(existing) = get_product(db, id).await? else {
        return Ok(None);
    };

    let mut active = existing.into_active_model();
    active.name = Set(name.to_string());
    active.normalized_name = Set(normalize_text(name));
    active.unit = Set(unit.to_string());
    active.pos_x = Set(pos_x);
    active.pos_y = Set(pos_y);
    active.update(db).await.map(Some)
}

/// Returns whether a product was deleted
pub async fn delete_product(db: &DatabaseConnection, id: &str) -> Result<bool, DbErr> {
    let result = Products::delete_by_id(id.to_string()).exec(db).await?;
    Ok(result.rows_affected > 0)
}

/// Products whose id contains `fragment`
pub async fn search_products_by_id(
    db: &DatabaseConnection,
    fragment: &str,
) -> Result<Vec<products::Model>, DbErr> {
    Products::find()
        .filter(products::Column::IdProduct.contains(fragment))
        .order_by_asc(products::Column::IdProduct)
        .all(db)
        .await
}

/// Products whose normalized name contains the normalized `fragment`
pub async fn search_products_by_name(
    db: &DatabaseConnection,
    fragment: &str,
) -> Result<Vec<products::Model>, DbErr> {
    Products::find()
        .filter(products::Column::NormalizedName.contains(normalize_text(fragment)))
        .order_by_asc(products::Column::IdProduct)
        .all(db)
        .await
}

pub async fn list_donors(db: &DatabaseConnection) -> Result<Vec<donors::Model>, DbErr> {
    Donors::find()
        .order_by_asc(donors::Column::IdDonor)
        .all(db)
        .await
}

pub async fn get_donor(db: &DatabaseConnection, id: &str) -> Result<Option<donors::Model>, DbErr> {
    Donors::find_by_id(id.to_string()).one(db).await
}

pub async fn create_donor(
    db: &DatabaseConnection,
    id: &str,
    name: &str,
) -> Result<donors::Model, DbErr> {
    donors::ActiveModel {
        id_donor: Set(id.to_string()),
        name: Set(name.to_string()),
        normalized_name: Set(normalize_text(name)),
        created_at: Set(Utc::now().fixed_offset()),
    }
    .insert(db)
    .await
}

pub async fn update_donor(
    db: &DatabaseConnection,
    id: &str,
    name: &str,
) -> Result<Option<donors::Model>, DbErr> {
    let Some(existing) = get_donor(db, id).await? else {
        return Ok(None);
    };

    let mut active = existing.into_active_model();
    active.name = Set(name.to_string());
    active.normalized_name = Set(normalize_text(name));
    active.update(db).await.map(Some)
}

pub async fn delete_donor(db: &DatabaseConnection, id: &str) -> Result<bool, DbErr> {
    let result = Donors::delete_by_id(id.to_string()).exec(db).await?;
    Ok(result.rows_affected > 0)
}

pub async fn search_donors_by_id(
    db: &DatabaseConnection,
    fragment: &str,
) -> Result<Vec<donors::Model>, DbErr> {
    Donors::find()
        .filter(donors::Column::IdDonor.contains(fragment))
        .order_by_asc(donors::Column::IdDonor)
        .all(db)
        .await
}

pub async fn search_donors_by_name(
    db: &DatabaseConnection,
    fragment: &str,
) -> Result<Vec<donors::Model>, DbErr> {
    Donors::find()
        .filter(donors::Column::NormalizedName.contains(normalize_text(fragment)))
        .order_by_asc(donors::Column::IdDonor)
        .all(db)
        .await
}

//! SeaORM Entity for car line items

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products_car")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub id_car: String,
    pub id_product: String,
    #[sea_orm(column_type = "Double")]
    pub quantity: f64,
    pub expiration: String,
    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::cars::Entity",
        from = "Column::IdCar",
        to = "super::cars::Column::IdCar"
    )]
    Cars,
    #[sea_orm(
        belongs_to = "super::products::Entity",
        from = "Column::IdProduct",
        to = "super::products::Column::IdProduct"
    )]
    Products,
}

impl Related<super::cars::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cars.def()
    }
}

impl Related<super::products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

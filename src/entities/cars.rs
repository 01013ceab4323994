//! SeaORM Entity for the cars table
//!
//! `date_export` is `None` until the car is exported.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cars")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id_car: String,
    #[sea_orm(column_name = "type")]
    pub car_type: String,
    pub date_export: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::products_car::Entity")]
    ProductsCar,
}

impl Related<super::products_car::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductsCar.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

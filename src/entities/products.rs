use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id_product: String,
    pub name: String,
    pub normalized_name: String,
    pub unit: String,
    pub pos_x: i32,
    pub pos_y: i32,
    pub created_at: DateTimeWithTimeZone,
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

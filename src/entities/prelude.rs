pub use super::cars::Entity as Cars;
pub use super::donors::Entity as Donors;
pub use super::products::Entity as Products;
pub use super::products_car::Entity as ProductsCar;

pub mod auth;
pub mod car;
pub mod catalog;
pub mod common;
pub mod map;

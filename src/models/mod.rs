//! Data models
//!
//! Rust structs representing database entities.

mod product;
mod shop;

pub use product::{Product, ProductCreate};
pub use shop::{Shop, ShopCreate};

//! Shopping Centre DB Library
//!
//! SQLite data access for a shopping centre's shops and products.
//!
//! Table and column names used in generated SQL are restricted to the
//! allow-lists in [`db::Table`]; values are always bound as parameters.

pub mod build_info;
pub mod config;
pub mod db;
pub mod models;

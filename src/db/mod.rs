//! Database module
//!
//! Handles the SQLite connection, schema and generic table operations.

pub mod connection;
pub mod query;
pub mod schema;
pub mod table;

pub use connection::{Database, DbError, DbResult};
pub use query::{count, delete_all, delete_where, select_all, select_where, update, Record};
pub use schema::{ensure_schema, execute_ddl};
pub use table::{Fields, Table};

//! Product model
//!
//! An item stocked by exactly one shop.

use rusqlite::{params, Connection, Row};
use serde::Serialize;

use crate::db::query::{log_failure, query_records};
use crate::db::{DbResult, Record, Table};

/// A product with stock quantity and price
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub id: i64,
    pub shop_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub number: i64,
    pub price: i64,
}

/// Data for creating a new product
#[derive(Debug, Clone, Serialize)]
pub struct ProductCreate {
    pub shop_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub number: i64,
    pub price: i64,
}

impl Record for Product {
    const TABLE: Table = Table::Products;

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            shop_id: row.get("shop_id")?,
            name: row.get("name")?,
            description: row.get("description")?,
            number: row.get("number")?,
            price: row.get("price")?,
        })
    }
}

/// Escape LIKE wildcards so `text` matches literally
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

impl Product {
    /// Insert a new product, returning its assigned id.
    ///
    /// Fails with a statement error if `shop_id` does not name an existing shop.
    pub fn create(conn: &Connection, data: &ProductCreate) -> DbResult<i64> {
        conn.execute(
            r#"
            INSERT INTO products (shop_id, name, description, number, price)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                data.shop_id,
                data.name,
                data.description,
                data.number,
                data.price,
            ],
        )
        .map_err(|e| log_failure("insert", Table::Products, e))?;

        let id = conn.last_insert_rowid();
        tracing::debug!(id, shop_id = data.shop_id, name = %data.name, "inserted product");
        Ok(id)
    }

    /// Get a product by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let result = conn.query_row("SELECT * FROM products WHERE id = ?1", [id], Self::from_row);
        match result {
            Ok(product) => Ok(Some(product)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(log_failure("get by id", Table::Products, e)),
        }
    }

    /// Products whose name contains `text` (SQLite LIKE, ASCII case-insensitive)
    pub fn search_by_name(conn: &Connection, text: &str) -> DbResult<Vec<Self>> {
        let search_pattern = format!("%{}%", escape_like(text));
        query_records(
            conn,
            r#"
            SELECT * FROM products
            WHERE name LIKE ?1 ESCAPE '\'
            ORDER BY id
            "#,
            params![search_pattern],
        )
    }
}

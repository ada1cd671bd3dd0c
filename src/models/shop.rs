//! Shop model
//!
//! A named retail unit in the shopping centre.

use rusqlite::{params, Connection, Row};
use serde::Serialize;

use crate::db::query::log_failure;
use crate::db::{DbResult, Record, Table};

/// A shop
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shop {
    pub id: i64,
    pub name: String,
    pub specialization: Option<String>,
    pub address: Option<String>,
}

/// Data for creating a new shop
#[derive(Debug, Clone, Serialize)]
pub struct ShopCreate {
    pub name: String,
    pub specialization: Option<String>,
    pub address: Option<String>,
}

impl ShopCreate {
    pub fn new(name: &str, specialization: Option<&str>, address: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            specialization: specialization.map(str::to_string),
            address: address.map(str::to_string),
        }
    }
}

impl Record for Shop {
    const TABLE: Table = Table::Shops;

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            specialization: row.get("specialization")?,
            address: row.get("address")?,
        })
    }
}

impl Shop {
    /// Insert a new shop, returning its assigned id
    pub fn create(conn: &Connection, data: &ShopCreate) -> DbResult<i64> {
        conn.execute(
            "INSERT INTO shops (name, specialization, address) VALUES (?1, ?2, ?3)",
            params![data.name, data.specialization, data.address],
        )
        .map_err(|e| log_failure("insert", Table::Shops, e))?;

        let id = conn.last_insert_rowid();
        tracing::debug!(id, name = %data.name, "inserted shop");
        Ok(id)
    }

    /// Get a shop by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let result = conn.query_row("SELECT * FROM shops WHERE id = ?1", [id], Self::from_row);
        match result {
            Ok(shop) => Ok(Some(shop)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(log_failure("get by id", Table::Shops, e)),
        }
    }
}

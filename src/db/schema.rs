//! Database schema
//!
//! Idempotent creation of the `shops` and `products` tables.

use rusqlite::Connection;

use super::connection::DbResult;

pub const CREATE_SHOPS_SQL: &str = r#"
    -- ============================================
    -- SHOPS
    -- ============================================
    CREATE TABLE IF NOT EXISTS shops (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        specialization TEXT,
        address TEXT
    );
"#;

pub const CREATE_PRODUCTS_SQL: &str = r#"
    -- ============================================
    -- PRODUCTS
    -- Each product belongs to exactly one shop
    -- ============================================
    CREATE TABLE IF NOT EXISTS products (
        id INTEGER PRIMARY KEY,
        shop_id INTEGER NOT NULL,
        name VARCHAR(250) NOT NULL,
        description TEXT,
        number INTEGER NOT NULL,        -- stock quantity
        price INTEGER NOT NULL,
        FOREIGN KEY (shop_id) REFERENCES shops (id)
    );
"#;

/// Run a schema statement
pub fn execute_ddl(conn: &Connection, sql: &str) -> DbResult<()> {
    conn.execute_batch(sql).map_err(|e| {
        tracing::error!(error = %e, "schema statement failed");
        e
    })?;
    Ok(())
}

/// Create both tables if they do not exist yet. Safe to call repeatedly.
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    execute_ddl(conn, CREATE_SHOPS_SQL)?;
    execute_ddl(conn, CREATE_PRODUCTS_SQL)?;
    tracing::info!("schema ready");
    Ok(())
}

/// Number of tables in the database with the given name
pub fn table_count(conn: &Connection, name: &str) -> DbResult<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [name],
        |row| row.get(0),
    )?;
    Ok(count)
}

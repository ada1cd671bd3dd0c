//! Generic table operations
//!
//! Select, update and delete helpers shared by every table. Identifiers are
//! resolved through [`Table`] and its column allow-list; values are bound.

use rusqlite::{Connection, Row, ToSql};

use super::connection::{DbError, DbResult};
use super::table::{Fields, Table};

/// A typed row of one table.
///
/// Selects take their table from the record type, so a runtime [`Table`]
/// (for example one parsed from text) can drive `update`/`delete_*` and
/// `count`, but reading rows needs the matching record type.
pub trait Record: Sized {
    const TABLE: Table;

    /// Build the record from a `SELECT *` row
    fn from_row(row: &Row) -> rusqlite::Result<Self>;
}

/// Log a statement failure where it happens and hand it on
pub(crate) fn log_failure(operation: &'static str, table: Table, e: rusqlite::Error) -> DbError {
    tracing::warn!(operation, %table, error = %e, "statement failed");
    DbError::Statement(e)
}

/// Run a `SELECT *` and map every row into `R`
pub(crate) fn query_records<R: Record>(
    conn: &Connection,
    sql: &str,
    params: &[&dyn ToSql],
) -> DbResult<Vec<R>> {
    let fetch = || -> rusqlite::Result<Vec<R>> {
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
            .query_map(params, R::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    };
    fetch().map_err(|e| log_failure("select", R::TABLE, e))
}

/// Build `a = ?1 AND b = ?2` for a non-empty filter
fn where_clause(table: Table, filter: &Fields, operation: &'static str) -> DbResult<String> {
    if filter.is_empty() {
        return Err(DbError::EmptyFields { operation });
    }
    Ok(filter.placeholders(table, 1)?.join(" AND "))
}

/// Every row of the record's table, in id order
pub fn select_all<R: Record>(conn: &Connection) -> DbResult<Vec<R>> {
    let sql = format!("SELECT * FROM {} ORDER BY id", R::TABLE);
    tracing::debug!(%sql, "select all");

    query_records(conn, &sql, &[])
}

/// Rows whose columns equal every value in `filter`
pub fn select_where<R: Record>(conn: &Connection, filter: &Fields) -> DbResult<Vec<R>> {
    let clause = where_clause(R::TABLE, filter, "select")?;
    let sql = format!("SELECT * FROM {} WHERE {} ORDER BY id", R::TABLE, clause);
    tracing::debug!(%sql, "select where");

    let params: Vec<&dyn ToSql> = filter.values().collect();
    query_records(conn, &sql, &params)
}

/// Apply `changes` to the row with the given id.
///
/// Returns the number of rows changed: 0 when the id does not exist or
/// `changes` is empty.
pub fn update(conn: &Connection, table: Table, id: i64, changes: &Fields) -> DbResult<usize> {
    if changes.is_empty() {
        return Ok(0);
    }
    if changes.columns().any(|c| c == "id") {
        return Err(DbError::UnknownColumn {
            table: table.as_str(),
            column: "id".to_string(),
        });
    }

    let assignments = changes.placeholders(table, 1)?;
    let sql = format!(
        "UPDATE {} SET {} WHERE id = ?{}",
        table,
        assignments.join(", "),
        changes.len() + 1
    );
    tracing::debug!(%sql, id, "update");

    let mut params: Vec<&dyn ToSql> = changes.values().collect();
    params.push(&id);

    let rows = conn
        .execute(&sql, params.as_slice())
        .map_err(|e| log_failure("update", table, e))?;

    Ok(rows)
}

/// Delete every row matching `filter`, returning how many were removed
pub fn delete_where(conn: &Connection, table: Table, filter: &Fields) -> DbResult<usize> {
    let clause = where_clause(table, filter, "delete")?;
    let sql = format!("DELETE FROM {} WHERE {}", table, clause);
    tracing::debug!(%sql, "delete where");

    let params: Vec<&dyn ToSql> = filter.values().collect();
    let rows = conn
        .execute(&sql, params.as_slice())
        .map_err(|e| log_failure("delete", table, e))?;

    Ok(rows)
}

/// Delete every row of `table`
pub fn delete_all(conn: &Connection, table: Table) -> DbResult<usize> {
    let sql = format!("DELETE FROM {}", table);
    tracing::debug!(%sql, "delete all");

    let rows = conn
        .execute(&sql, [])
        .map_err(|e| log_failure("delete all", table, e))?;

    Ok(rows)
}

/// Count rows in `table`
pub fn count(conn: &Connection, table: Table) -> DbResult<i64> {
    let sql = format!("SELECT COUNT(*) FROM {}", table);
    let count: i64 = conn
        .query_row(&sql, [], |row| row.get(0))
        .map_err(|e| log_failure("count", table, e))?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{ensure_schema, Database};
    use crate::models::{Product, ProductCreate, Shop, ShopCreate};

    fn seeded() -> Database {
        let db = Database::open_in_memory().unwrap();
        ensure_schema(db.conn()).unwrap();
        let conn = db.conn();

        let lego = ShopCreate::new("LEGO", Some("toys"), Some("2nd store"));
        let lego = Shop::create(conn, &lego).unwrap();
        let mercedes = ShopCreate::new("Mercedes", Some("cars"), Some("0 store"));
        let mercedes = Shop::create(conn, &mercedes).unwrap();
        let tesco = ShopCreate::new("Tesco", Some("food"), Some("1st store"));
        Shop::create(conn, &tesco).unwrap();

        for (shop_id, name, description, number, price) in [
            (lego, "LEGO1", "lsdkjlfdssfd", 1000, 200),
            (lego, "LEGO2", "lslfk;kfslfdssfd", 2000, 400),
            (lego, "LEGO3", "sdjlksfdl", 1200, 20),
            (mercedes, "Marcedes1", "sdfjisjdfjfsd", 120000, 10),
            (mercedes, "bread", "jsdjsdkfsd", 5, 1000),
        ] {
            Product::create(
                conn,
                &ProductCreate {
                    shop_id,
                    name: name.to_string(),
                    description: Some(description.to_string()),
                    number,
                    price,
                },
            )
            .unwrap();
        }

        db
    }

    #[test]
    fn test_select_all() {
        let db = seeded();
        let shops: Vec<Shop> = select_all(db.conn()).unwrap();
        let names: Vec<_> = shops.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["LEGO", "Mercedes", "Tesco"]);

        let products: Vec<Product> = select_all(db.conn()).unwrap();
        assert_eq!(products.len(), 5);
    }

    #[test]
    fn test_runtime_table_agrees_with_record_type() {
        let db = seeded();
        let table: Table = "products".parse().unwrap();
        assert_eq!(table, Product::TABLE);

        let rows: Vec<Product> = select_all(db.conn()).unwrap();
        assert_eq!(count(db.conn(), table).unwrap(), rows.len() as i64);
    }

    #[test]
    fn test_select_where_single_column() {
        let db = seeded();
        let shops: Vec<Shop> = select_where(db.conn(), &Fields::new().with("id", 1)).unwrap();
        assert_eq!(shops.len(), 1);
        assert_eq!(shops[0].name, "LEGO");

        let products: Vec<Product> =
            select_where(db.conn(), &Fields::new().with("shop_id", 1)).unwrap();
        assert_eq!(products.len(), 3);
        assert!(products.iter().all(|p| p.shop_id == 1));
    }

    #[test]
    fn test_select_where_is_a_conjunction() {
        let db = seeded();
        let filter = Fields::new().with("shop_id", 1).with("price", 400);
        let products: Vec<Product> = select_where(db.conn(), &filter).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "LEGO2");

        let filter = Fields::new().with("shop_id", 2).with("price", 400);
        let products: Vec<Product> = select_where(db.conn(), &filter).unwrap();
        assert!(products.is_empty());
    }

    #[test]
    fn test_select_where_rejects_empty_and_unknown_columns() {
        let db = seeded();
        let err = select_where::<Shop>(db.conn(), &Fields::new()).unwrap_err();
        assert!(matches!(err, DbError::EmptyFields { operation: "select" }));

        let injected = Fields::new().with("1=1 OR name", "x");
        let err = select_where::<Shop>(db.conn(), &injected).unwrap_err();
        assert!(matches!(err, DbError::UnknownColumn { table: "shops", .. }));
    }

    #[test]
    fn test_update_changes_only_target_row() {
        let db = seeded();
        let before: Vec<Product> = select_all(db.conn()).unwrap();

        let changes = Fields::new().with("description", "bestseller");
        let rows = update(db.conn(), Table::Products, 2, &changes).unwrap();
        assert_eq!(rows, 1);

        let after: Vec<Product> = select_all(db.conn()).unwrap();
        assert_eq!(before.len(), after.len());
        for (old, new) in before.iter().zip(after.iter()) {
            if new.id == 2 {
                assert_eq!(new.description.as_deref(), Some("bestseller"));
                assert_eq!(
                    Product { description: old.description.clone(), ..new.clone() },
                    *old
                );
            } else {
                assert_eq!(old, new);
            }
        }
    }

    #[test]
    fn test_update_edge_cases() {
        let db = seeded();
        let conn = db.conn();

        assert_eq!(update(conn, Table::Products, 2, &Fields::new()).unwrap(), 0);
        assert_eq!(
            update(conn, Table::Products, 999, &Fields::new().with("price", 1)).unwrap(),
            0
        );

        let unknown = Fields::new().with("colour", "red");
        let err = update(conn, Table::Products, 2, &unknown).unwrap_err();
        assert!(matches!(err, DbError::UnknownColumn { .. }));

        let err = update(conn, Table::Products, 2, &Fields::new().with("id", 7)).unwrap_err();
        assert!(matches!(err, DbError::UnknownColumn { .. }));

        // NOT NULL violation comes back from the engine
        let null_name = Fields::new().with("name", rusqlite::types::Null);
        let err = update(conn, Table::Products, 2, &null_name).unwrap_err();
        assert!(matches!(err, DbError::Statement(_)));
    }

    #[test]
    fn test_delete_where_returns_count() {
        let db = seeded();
        let filter = Fields::new().with("shop_id", 2);
        let removed = delete_where(db.conn(), Table::Products, &filter).unwrap();
        assert_eq!(removed, 2);
        assert_eq!(count(db.conn(), Table::Products).unwrap(), 3);

        let err = delete_where(db.conn(), Table::Products, &Fields::new()).unwrap_err();
        assert!(matches!(err, DbError::EmptyFields { operation: "delete" }));
        assert_eq!(count(db.conn(), Table::Products).unwrap(), 3);
    }

    #[test]
    fn test_delete_all_leaves_other_table() {
        let db = seeded();
        assert_eq!(delete_all(db.conn(), Table::Products).unwrap(), 5);

        let products: Vec<Product> = select_all(db.conn()).unwrap();
        assert!(products.is_empty());
        assert_eq!(count(db.conn(), Table::Shops).unwrap(), 3);
    }

    #[test]
    fn test_delete_all_shops_with_products_is_rejected() {
        let db = seeded();
        let err = delete_all(db.conn(), Table::Shops).unwrap_err();
        assert!(matches!(err, DbError::Statement(_)));
        assert_eq!(count(db.conn(), Table::Shops).unwrap(), 3);
    }
}

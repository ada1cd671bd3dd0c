//! Table identifiers and column/value mappings
//!
//! Table and column names are spliced into SQL text, so they only ever come
//! from the static allow-lists here. Values always go through parameter binding.

use std::fmt;
use std::str::FromStr;

use rusqlite::ToSql;

use super::connection::{DbError, DbResult};

/// A table managed by the data access layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Shops,
    Products,
}

impl Table {
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Shops => "shops",
            Table::Products => "products",
        }
    }

    /// Columns in declaration order, `id` first
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Table::Shops => &["id", "name", "specialization", "address"],
            Table::Products => &["id", "shop_id", "name", "description", "number", "price"],
        }
    }

    /// Resolve a column name against this table's allow-list
    pub fn column(&self, name: &str) -> DbResult<&'static str> {
        self.columns()
            .iter()
            .copied()
            .find(|c| *c == name)
            .ok_or_else(|| DbError::UnknownColumn {
                table: self.as_str(),
                column: name.to_string(),
            })
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Table {
    type Err = DbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shops" => Ok(Table::Shops),
            "products" => Ok(Table::Products),
            other => Err(DbError::UnknownTable(other.to_string())),
        }
    }
}

/// Ordered column-name to value pairs.
///
/// Used both as an equality filter (ANDed together) and as a set of
/// assignments for updates. Setting the same column twice keeps the last value.
#[derive(Default)]
pub struct Fields {
    pairs: Vec<(String, Box<dyn ToSql>)>,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a column value
    pub fn with<V: ToSql + 'static>(mut self, column: &str, value: V) -> Self {
        self.set(column, value);
        self
    }

    pub fn set<V: ToSql + 'static>(&mut self, column: &str, value: V) {
        let value: Box<dyn ToSql> = Box::new(value);
        match self.pairs.iter_mut().find(|(c, _)| c == column) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((column.to_string(), value)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(c, _)| c.as_str())
    }

    /// Render `col = ?N` fragments for `table`, numbering from `first_param`.
    ///
    /// Fails if any column is not on the table's allow-list.
    pub(crate) fn placeholders(&self, table: Table, first_param: usize) -> DbResult<Vec<String>> {
        self.pairs
            .iter()
            .enumerate()
            .map(|(i, (c, _))| {
                let column = table.column(c)?;
                Ok(format!("{} = ?{}", column, first_param + i))
            })
            .collect()
    }

    pub(crate) fn values(&self) -> impl Iterator<Item = &dyn ToSql> {
        self.pairs.iter().map(|(_, v)| v.as_ref())
    }
}

impl fmt::Debug for Fields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.columns()).finish()
    }
}

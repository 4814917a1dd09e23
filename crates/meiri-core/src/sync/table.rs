use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{MeiriError, Result};

/// A table row as column name → JSON value.
pub type Row = Map<String, Value>;

/// Comparison applied by a [`Filter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOp {
    Eq,
    Neq,
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eq => write!(f, "eq"),
            Self::Neq => write!(f, "neq"),
        }
    }
}

/// Single-column row predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: String,
    pub op: FilterOp,
    pub value: Value,
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            op: FilterOp::Eq,
            value: value.into(),
        }
    }

    pub fn neq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            op: FilterOp::Neq,
            value: value.into(),
        }
    }

    /// Predicate matching every row holding a store-assigned id.
    #[must_use]
    pub fn all_rows() -> Self {
        Self::neq("id", 0)
    }

    /// Evaluates the filter against a row.
    ///
    /// As in SQL, a missing or null column matches neither `eq` nor `neq`.
    #[must_use]
    pub fn matches(&self, row: &Row) -> bool {
        match row.get(&self.column) {
            None | Some(Value::Null) => false,
            Some(v) => match self.op {
                FilterOp::Eq => *v == self.value,
                FilterOp::Neq => *v != self.value,
            },
        }
    }
}

/// A remote table store without transactions.
pub trait RemoteTable {
    /// Deletes every row of `table` matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns `MeiriError::Table` if the store rejects the request.
    fn delete(&self, table: &str, filter: &Filter) -> Result<()>;

    /// Inserts one row; the store assigns its id.
    ///
    /// # Errors
    ///
    /// Returns `MeiriError::Table` if the store rejects the row.
    fn insert(&self, table: &str, row: &Row) -> Result<()>;

    /// Returns up to `limit` rows of `table` matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns `MeiriError::Table` if the store rejects the request.
    fn select(&self, table: &str, filter: &Filter, limit: Option<usize>) -> Result<Vec<Row>>;
}

impl<T: RemoteTable + ?Sized> RemoteTable for &T {
    fn delete(&self, table: &str, filter: &Filter) -> Result<()> {
        (**self).delete(table, filter)
    }

    fn insert(&self, table: &str, row: &Row) -> Result<()> {
        (**self).insert(table, row)
    }

    fn select(&self, table: &str, filter: &Filter, limit: Option<usize>) -> Result<Vec<Row>> {
        (**self).select(table, filter, limit)
    }
}

impl<T: RemoteTable + ?Sized> RemoteTable for Box<T> {
    fn delete(&self, table: &str, filter: &Filter) -> Result<()> {
        (**self).delete(table, filter)
    }

    fn insert(&self, table: &str, row: &Row) -> Result<()> {
        (**self).insert(table, row)
    }

    fn select(&self, table: &str, filter: &Filter, limit: Option<usize>) -> Result<Vec<Row>> {
        (**self).select(table, filter, limit)
    }
}

/// Serializes a struct into a [`Row`].
///
/// # Errors
///
/// Returns `MeiriError::Json` if serialization fails, or
/// `MeiriError::Table` if the value is not a JSON object.
pub fn to_row<T: Serialize>(value: &T) -> Result<Row> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(MeiriError::table(
            "-",
            format!("row must serialize to an object, got {other}"),
        )),
    }
}

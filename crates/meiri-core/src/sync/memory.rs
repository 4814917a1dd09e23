use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use serde_json::Value;

use super::table::{Filter, RemoteTable, Row};
use crate::error::{MeiriError, Result};

#[derive(Debug)]
struct TableData {
    next_id: i64,
    rows: Vec<Row>,
}

impl Default for TableData {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: Vec::new(),
        }
    }
}

/// In-process [`RemoteTable`] with store-assigned, ever-increasing ids.
#[derive(Debug, Default)]
pub struct MemoryTable {
    tables: Mutex<HashMap<String, TableData>>,
}

impl MemoryTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every row of `table`, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `MeiriError::Table` if the lock is poisoned.
    pub fn rows(&self, table: &str) -> Result<Vec<Row>> {
        let tables = self.lock(table)?;
        Ok(tables.get(table).map(|d| d.rows.clone()).unwrap_or_default())
    }

    fn lock(&self, table: &str) -> Result<MutexGuard<'_, HashMap<String, TableData>>> {
        self.tables
            .lock()
            .map_err(|_| MeiriError::table(table, "memory table lock poisoned"))
    }
}

impl RemoteTable for MemoryTable {
    fn delete(&self, table: &str, filter: &Filter) -> Result<()> {
        let mut tables = self.lock(table)?;
        if let Some(data) = tables.get_mut(table) {
            data.rows.retain(|row| !filter.matches(row));
        }
        Ok(())
    }

    fn insert(&self, table: &str, row: &Row) -> Result<()> {
        let mut tables = self.lock(table)?;
        let data = tables.entry(table.to_string()).or_default();

        let mut row = row.clone();
        row.insert("id".to_string(), Value::from(data.next_id));
        data.next_id += 1;
        data.rows.push(row);
        Ok(())
    }

    fn select(&self, table: &str, filter: &Filter, limit: Option<usize>) -> Result<Vec<Row>> {
        let tables = self.lock(table)?;
        let Some(data) = tables.get(table) else {
            return Ok(Vec::new());
        };
        Ok(data
            .rows
            .iter()
            .filter(|row| filter.matches(row))
            .take(limit.unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }
}

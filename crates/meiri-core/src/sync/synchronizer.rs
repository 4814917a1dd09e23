use std::fmt;

use tracing::{debug, info, warn};

use super::table::{Filter, RemoteTable, to_row};
use crate::error::{MeiriError, Result};
use crate::types::{CanonicalRecord, RemoteRow};

/// Default name of the remote table holding the catalog.
pub const CHARACTERS_TABLE: &str = "characters";

/// Row counts of one synchronization pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub success: usize,
    pub failure: usize,
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} inserted, {} failed", self.success, self.failure)
    }
}

/// Rebuilds a remote table from a set of records.
///
/// Every pass first clears the whole table and then inserts the records one
/// by one. A failing insert is logged and counted but does not stop the pass.
/// The pass is not atomic: readers may observe an empty or partially filled
/// table, and rerunning the pass from the same records restores it.
pub struct TableSynchronizer<'a> {
    table: &'a dyn RemoteTable,
    name: String,
}

impl<'a> TableSynchronizer<'a> {
    pub fn new(table: &'a dyn RemoteTable, name: impl Into<String>) -> Self {
        Self {
            table,
            name: name.into(),
        }
    }

    /// Name of the target table.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Deletes every row of the target table.
    ///
    /// # Errors
    ///
    /// Returns `MeiriError::Table` if the store rejects the delete.
    pub fn clear(&self) -> Result<()> {
        info!(table = %self.name, "clearing table");
        self.table.delete(&self.name, &Filter::all_rows())
    }

    /// Clears the table and inserts `records`.
    ///
    /// # Errors
    ///
    /// Only a failed clear is returned as an error; row failures are
    /// reported through [`SyncReport::failure`].
    pub fn sync(&self, records: &[CanonicalRecord]) -> Result<SyncReport> {
        self.clear()?;

        let mut report = SyncReport::default();
        for record in records {
            match self.insert(record) {
                Ok(()) => {
                    debug!(table = %self.name, serial = %record.sequence, character = %record.character, "row inserted");
                    report.success += 1;
                }
                Err(e) => {
                    warn!(
                        table = %self.name,
                        serial = %record.sequence,
                        character = %record.character,
                        error = %e,
                        "row insert failed"
                    );
                    report.failure += 1;
                }
            }
        }

        info!(table = %self.name, %report, "sync finished");
        Ok(report)
    }

    fn insert(&self, record: &CanonicalRecord) -> Result<()> {
        let row = to_row(&RemoteRow::from(record))
            .map_err(|e| MeiriError::table(&self.name, e))?;
        self.table.insert(&self.name, &row)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::sync::{MemoryTable, Row};
    use crate::types::RadicalCode;

    fn record(sequence: &str, character: &str, radical: &str) -> CanonicalRecord {
        CanonicalRecord {
            volume: "0".into(),
            sequence: sequence.into(),
            character: character.into(),
            radical: RadicalCode::from(radical),
            url: format!("https://www.youtube.com/watch?v=v{sequence}"),
        }
    }

    fn records() -> Vec<CanonicalRecord> {
        vec![
            record("0001", "一", "1"),
            record("0010", "既", "72"),
            record("1423", "閶", ""),
            record("0085", "水", "85"),
        ]
    }

    /// Memory table that rejects rows for one character.
    struct RejectingTable {
        inner: MemoryTable,
        reject: &'static str,
    }

    impl RemoteTable for RejectingTable {
        fn delete(&self, table: &str, filter: &Filter) -> Result<()> {
            self.inner.delete(table, filter)
        }

        fn insert(&self, table: &str, row: &Row) -> Result<()> {
            if row["character"] == json!(self.reject) {
                return Err(MeiriError::table(table, "409 duplicate key"));
            }
            self.inner.insert(table, row)
        }

        fn select(&self, table: &str, filter: &Filter, limit: Option<usize>) -> Result<Vec<Row>> {
            self.inner.select(table, filter, limit)
        }
    }

    struct UnclearableTable;

    impl RemoteTable for UnclearableTable {
        fn delete(&self, table: &str, _filter: &Filter) -> Result<()> {
            Err(MeiriError::table(table, "permission denied"))
        }

        fn insert(&self, _table: &str, _row: &Row) -> Result<()> {
            panic!("insert after failed clear");
        }

        fn select(&self, _table: &str, _filter: &Filter, _limit: Option<usize>) -> Result<Vec<Row>> {
            Ok(Vec::new())
        }
    }

    /// Table contents without the store-assigned ids.
    fn contents(table: &MemoryTable) -> Vec<Row> {
        table
            .rows(CHARACTERS_TABLE)
            .unwrap()
            .into_iter()
            .map(|mut row| {
                row.remove("id");
                row
            })
            .collect()
    }

    #[test]
    fn sync_inserts_every_record() {
        let table = MemoryTable::new();
        let report = TableSynchronizer::new(&table, CHARACTERS_TABLE)
            .sync(&records())
            .unwrap();

        assert_eq!(report, SyncReport { success: 4, failure: 0 });

        let rows = contents(&table);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[1]["serial"], json!("0010"));
        assert_eq!(rows[1]["chapter"], json!("0"));
        assert_eq!(rows[1]["radical"], json!(72));
        assert_eq!(rows[2]["radical"], Value::Null);
    }

    #[test]
    fn one_failing_row_does_not_abort_the_rest() {
        let table = RejectingTable {
            inner: MemoryTable::new(),
            reject: "既",
        };
        let report = TableSynchronizer::new(&table, CHARACTERS_TABLE)
            .sync(&records())
            .unwrap();

        assert_eq!(report, SyncReport { success: 3, failure: 1 });

        let chars: Vec<_> = table
            .inner
            .rows(CHARACTERS_TABLE)
            .unwrap()
            .iter()
            .map(|r| r["character"].clone())
            .collect();
        assert_eq!(chars, [json!("一"), json!("閶"), json!("水")]);
    }

    #[test]
    fn sync_clears_stale_rows() {
        let table = MemoryTable::new();
        let sync = TableSynchronizer::new(&table, CHARACTERS_TABLE);

        sync.sync(&records()).unwrap();
        sync.sync(&records()[..1]).unwrap();

        assert_eq!(contents(&table).len(), 1);
    }

    #[test]
    fn repeated_sync_is_idempotent() {
        let table = MemoryTable::new();
        let sync = TableSynchronizer::new(&table, CHARACTERS_TABLE);

        let first_report = sync.sync(&records()).unwrap();
        let first = contents(&table);
        let second_report = sync.sync(&records()).unwrap();
        let second = contents(&table);

        assert_eq!(first_report, second_report);
        assert_eq!(first, second);
    }

    #[test]
    fn failed_clear_is_fatal() {
        let err = TableSynchronizer::new(&UnclearableTable, CHARACTERS_TABLE)
            .sync(&records())
            .unwrap_err();
        assert!(matches!(err, MeiriError::Table { .. }));
    }

    #[test]
    fn empty_sync_only_clears() {
        let table = MemoryTable::new();
        let sync = TableSynchronizer::new(&table, CHARACTERS_TABLE);
        sync.sync(&records()).unwrap();

        let report = sync.sync(&[]).unwrap();
        assert_eq!(report, SyncReport::default());
        assert!(contents(&table).is_empty());
        assert_eq!(report.to_string(), "0 inserted, 0 failed");
    }
}

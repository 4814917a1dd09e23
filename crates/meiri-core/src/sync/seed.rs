use std::fmt;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::table::{Filter, RemoteTable, to_row};
use crate::error::Result;
use crate::radical::KangXiRadical;

/// Default name of the radical reference table.
pub const RADICAL_TABLE: &str = "radical";

#[derive(Debug, Serialize)]
struct RadicalRow {
    #[serde(rename = "char")]
    character: String,
    radicalnumber: u16,
    stroke_count: u8,
}

impl From<&KangXiRadical> for RadicalRow {
    fn from(radical: &KangXiRadical) -> Self {
        Self {
            character: radical.character.to_string(),
            radicalnumber: radical.number,
            stroke_count: radical.strokes,
        }
    }
}

/// Row counts of one seeding pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub inserted: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl fmt::Display for SeedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} inserted, {} already present, {} failed",
            self.inserted, self.skipped, self.failed
        )
    }
}

/// Fills the radical reference table with the Kang Xi radicals.
pub struct RadicalSeeder<'a> {
    table: &'a dyn RemoteTable,
    name: String,
}

impl<'a> RadicalSeeder<'a> {
    pub fn new(table: &'a dyn RemoteTable, name: impl Into<String>) -> Self {
        Self {
            table,
            name: name.into(),
        }
    }

    /// Clears the table, then inserts each radical whose number is not
    /// present yet. Per-radical failures are counted, not returned.
    ///
    /// # Errors
    ///
    /// Returns `MeiriError::Table` if the table cannot be cleared.
    pub fn seed(&self, radicals: &[KangXiRadical]) -> Result<SeedReport> {
        info!(table = %self.name, "clearing table");
        self.table.delete(&self.name, &Filter::all_rows())?;

        let mut report = SeedReport::default();
        for radical in radicals {
            match self.seed_one(radical) {
                Ok(true) => report.inserted += 1,
                Ok(false) => {
                    debug!(character = %radical.character, number = radical.number, "radical already present");
                    report.skipped += 1;
                }
                Err(e) => {
                    warn!(character = %radical.character, number = radical.number, error = %e, "radical insert failed");
                    report.failed += 1;
                }
            }
        }

        info!(table = %self.name, %report, "radical table seeded");
        Ok(report)
    }

    /// Returns `Ok(false)` if the radical number already exists.
    fn seed_one(&self, radical: &KangXiRadical) -> Result<bool> {
        let existing = self.table.select(
            &self.name,
            &Filter::eq("radicalnumber", radical.number),
            Some(1),
        )?;
        if !existing.is_empty() {
            return Ok(false);
        }

        self.table
            .insert(&self.name, &to_row(&RadicalRow::from(radical))?)?;
        Ok(true)
    }
}

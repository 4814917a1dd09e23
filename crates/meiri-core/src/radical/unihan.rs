use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info};

use super::{
    CharacterLookup, CharacterRecord, FIELD_RS_KANGXI, FIELD_RS_UNICODE, single_char,
};
use crate::error::{MeiriError, Result};

/// Unihan fields kept in memory after bootstrap.
pub const RETAINED_FIELDS: &[&str] = &[FIELD_RS_KANGXI, FIELD_RS_UNICODE, "kTotalStrokes"];

/// In-memory index over the Unicode Han database.
///
/// Built once by [`bootstrap`](Self::bootstrap) from an extracted `Unihan.zip`
/// directory, then shared read-only by the resolver.
#[derive(Debug, Clone, Default)]
pub struct UnihanDatabase {
    records: HashMap<char, CharacterRecord>,
}

impl UnihanDatabase {
    /// Loads every `Unihan*.txt` file found in `dir`.
    ///
    /// # Errors
    ///
    /// Returns `MeiriError::Lookup` if the directory holds no Unihan files,
    /// or `MeiriError::Io` if a file cannot be read.
    pub fn bootstrap(dir: &Path) -> Result<Self> {
        let mut files: Vec<_> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with("Unihan") && n.ends_with(".txt"))
            })
            .collect();
        files.sort();

        if files.is_empty() {
            return Err(MeiriError::Lookup(format!(
                "no Unihan*.txt files in {}",
                dir.display()
            )));
        }

        let mut db = Self::default();
        for path in &files {
            debug!(file = %path.display(), "loading Unihan file");
            db.load(BufReader::new(File::open(path)?))?;
        }

        info!(
            files = files.len(),
            characters = db.len(),
            "Unihan database bootstrapped"
        );
        Ok(db)
    }

    /// Builds a database from a single Unihan-format reader.
    ///
    /// # Errors
    ///
    /// Returns `MeiriError::Io` if reading fails.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut db = Self::default();
        db.load(reader)?;
        Ok(db)
    }

    /// Number of characters with at least one retained field.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn load<R: BufRead>(&mut self, reader: R) -> Result<()> {
        let mut skipped = 0usize;

        for line in reader.lines() {
            let line = line?;
            let line = line.trim_end();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut parts = line.splitn(3, '\t');
            let (Some(code), Some(field), Some(value)) = (parts.next(), parts.next(), parts.next())
            else {
                skipped += 1;
                continue;
            };

            if !RETAINED_FIELDS.contains(&field) {
                continue;
            }

            let Some(character) = parse_codepoint(code) else {
                skipped += 1;
                continue;
            };

            self.records
                .entry(character)
                .or_insert_with(|| CharacterRecord::new(character.to_string()))
                .fields
                .insert(field.to_string(), value.to_string());
        }

        if skipped > 0 {
            debug!(skipped, "skipped malformed Unihan lines");
        }
        Ok(())
    }
}

/// "U+95B6" -> '閶'
fn parse_codepoint(code: &str) -> Option<char> {
    let hex = code.strip_prefix("U+")?;
    u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
}

impl CharacterLookup for UnihanDatabase {
    fn lookup(&self, character: &str) -> Result<Vec<CharacterRecord>> {
        Ok(single_char(character)
            .and_then(|c| self.records.get(&c))
            .cloned()
            .into_iter()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::radical::{RadicalResolver, Resolution};
    use crate::types::RadicalCode;

    const SAMPLE: &str = "\
# Unihan_IRGSources.txt
#
U+4E00\tkRSUnicode\t1.0
U+4E00\tkTotalStrokes\t1
U+4E00\tkIRG_GSource\tG0-523B
U+95B6\tkRSUnicode\t169.8
U+95B6\tkRSKangXi\t169.8
U+65E2\tkRSKangXi\t71.5
U+65E2\tkRSUnicode\t72.5
U+7E9F\tkRSUnicode\t120'.0
not a unihan line
U+ZZZZ\tkRSUnicode\t1.0
";

    fn db() -> UnihanDatabase {
        UnihanDatabase::from_reader(SAMPLE.as_bytes()).unwrap()
    }

    #[test]
    fn loads_retained_fields_only() {
        let db = db();
        assert_eq!(db.len(), 4);

        let records = db.lookup("一").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get(FIELD_RS_UNICODE), Some("1.0"));
        assert_eq!(records[0].get("kTotalStrokes"), Some("1"));
        assert_eq!(records[0].get("kIRG_GSource"), None);
    }

    #[test]
    fn lookup_is_exact_character_match() {
        let db = db();
        assert!(db.lookup("閶").unwrap().len() == 1);
        assert!(db.lookup("閶一").unwrap().is_empty());
        assert!(db.lookup("永").unwrap().is_empty());
        assert!(db.lookup("").unwrap().is_empty());
    }

    #[test]
    fn resolver_prefers_unicode_field() {
        let resolver = RadicalResolver::new(db());
        assert_eq!(
            resolver.resolve("既"),
            Resolution::Resolved(RadicalCode::from("72"))
        );
        assert_eq!(
            resolver.resolve("閶"),
            Resolution::Resolved(RadicalCode::from("169"))
        );
        assert_eq!(
            resolver.resolve("纟"),
            Resolution::Resolved(RadicalCode::from("120'"))
        );
    }

    #[test]
    fn bootstrap_reads_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("Unihan_IRGSources.txt"),
            "U+95B6\tkRSUnicode\t169.8\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("Unihan_DictionaryLikeData.txt"),
            "U+95B6\tkRSKangXi\t169.8\n",
        )
        .unwrap();
        fs::write(dir.path().join("README.txt"), "U+4E00\tkRSUnicode\t1.0\n").unwrap();

        let db = UnihanDatabase::bootstrap(dir.path()).unwrap();
        assert_eq!(db.len(), 1);

        let record = &db.lookup("閶").unwrap()[0];
        assert_eq!(record.get(FIELD_RS_KANGXI), Some("169.8"));
        assert_eq!(record.get(FIELD_RS_UNICODE), Some("169.8"));
    }

    #[test]
    fn bootstrap_without_files_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = UnihanDatabase::bootstrap(dir.path()).unwrap_err();
        assert!(matches!(err, MeiriError::Lookup(_)));
    }

    #[test]
    fn parses_codepoints() {
        assert_eq!(parse_codepoint("U+95B6"), Some('閶'));
        assert_eq!(parse_codepoint("U+20000"), Some('\u{20000}'));
        assert_eq!(parse_codepoint("95B6"), None);
        assert_eq!(parse_codepoint("U+D800"), None);
    }
}

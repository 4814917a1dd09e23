//! # Radical Resolution
//!
//! Maps a character to its radical code through a [`CharacterLookup`]
//! source. Two sources ship with the crate: the [`UnihanDatabase`] loaded from
//! the Unicode Han database files, and the offline [`StaticRadicalTable`] of
//! the 214 Kang Xi radicals.

pub mod kangxi;
pub mod resolver;
pub mod unihan;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use kangxi::{KANGXI_RADICALS, KangXiRadical, StaticRadicalTable};
pub use resolver::{RadicalResolver, Resolution, UnresolvedReason};
pub use unihan::UnihanDatabase;

/// Unihan field with the Kang Xi dictionary radical/stroke count.
pub const FIELD_RS_KANGXI: &str = "kRSKangXi";

/// Unihan field with the Unicode-standard radical/stroke count.
pub const FIELD_RS_UNICODE: &str = "kRSUnicode";

/// Reference data for one character, keyed by Unihan field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub character: String,
    pub fields: BTreeMap<String, String>,
}

impl CharacterRecord {
    #[must_use]
    pub fn new(character: impl Into<String>) -> Self {
        Self {
            character: character.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style setter for a field.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Returns a non-blank field value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }
}

/// A source of character reference data.
///
/// Implementations return zero, one or more records for the queried
/// character; the resolver uses the first one.
pub trait CharacterLookup {
    /// Looks up reference records for `character`.
    ///
    /// # Errors
    ///
    /// Returns `MeiriError::Lookup` if the source cannot answer the query.
    fn lookup(&self, character: &str) -> Result<Vec<CharacterRecord>>;
}

impl<T: CharacterLookup + ?Sized> CharacterLookup for &T {
    fn lookup(&self, character: &str) -> Result<Vec<CharacterRecord>> {
        (**self).lookup(character)
    }
}

impl<T: CharacterLookup + ?Sized> CharacterLookup for Box<T> {
    fn lookup(&self, character: &str) -> Result<Vec<CharacterRecord>> {
        (**self).lookup(character)
    }
}

/// Returns the single `char` of `s`, or `None` if it holds zero or several.
pub(crate) fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

use std::fmt;

use tracing::debug;

use super::{CharacterLookup, CharacterRecord, FIELD_RS_KANGXI, FIELD_RS_UNICODE};
use crate::types::RadicalCode;

/// Why a character could not be given a radical code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnresolvedReason {
    /// The lookup returned no records for the character.
    NoRecord,
    /// The first record carries no usable radical/stroke field.
    NoRadicalField,
    /// The lookup itself failed.
    LookupFailed(String),
}

impl fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoRecord => write!(f, "no reference record"),
            Self::NoRadicalField => write!(f, "no radical/stroke field"),
            Self::LookupFailed(msg) => write!(f, "lookup failed: {msg}"),
        }
    }
}

/// Outcome of a radical lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Resolution {
    Resolved(RadicalCode),
    Unresolved(UnresolvedReason),
}

impl Resolution {
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

/// Resolves characters to radical codes.
///
/// Resolution is best effort: every failure of the underlying source is
/// reported as [`Resolution::Unresolved`] and never as an error.
pub struct RadicalResolver<L> {
    source: L,
}

impl<L: CharacterLookup> RadicalResolver<L> {
    /// Wraps an initialized lookup source.
    pub fn new(source: L) -> Self {
        Self { source }
    }

    /// Returns the underlying lookup source.
    pub fn source(&self) -> &L {
        &self.source
    }

    pub fn resolve(&self, character: &str) -> Resolution {
        let records = match self.source.lookup(character) {
            Ok(records) => records,
            Err(e) => {
                debug!(character, error = %e, "radical lookup failed");
                return Resolution::Unresolved(UnresolvedReason::LookupFailed(e.to_string()));
            }
        };

        let Some(first) = records.first() else {
            return Resolution::Unresolved(UnresolvedReason::NoRecord);
        };

        match radical_of(first) {
            Some(code) => Resolution::Resolved(code),
            None => Resolution::Unresolved(UnresolvedReason::NoRadicalField),
        }
    }
}

/// Picks the radical code of a reference record.
///
/// `kRSUnicode` overrides `kRSKangXi` when both are present.
fn radical_of(record: &CharacterRecord) -> Option<RadicalCode> {
    let value = record
        .get(FIELD_RS_UNICODE)
        .or_else(|| record.get(FIELD_RS_KANGXI))?;
    radical_part(value).map(RadicalCode::from)
}

/// "169.8" -> "169". Fields may list several space-separated values; the
/// first one is used.
fn radical_part(value: &str) -> Option<&str> {
    let first = value.split_whitespace().next()?;
    let radical = first.split('.').next()?.trim();
    if radical.is_empty() { None } else { Some(radical) }
}

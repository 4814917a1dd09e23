use std::fmt;

use serde::{Deserialize, Serialize};

/// Radical classification code of a character, e.g. `"169"` for 閶.
///
/// The code is kept as text: Unihan codes for simplified radicals carry a
/// trailing apostrophe (`"120'"`), and hand-edited checkpoints may hold any
/// string. Conversion to a number happens at the storage boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RadicalCode(String);

impl RadicalCode {
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The code written for characters whose radical could not be resolved.
    #[must_use]
    pub fn empty() -> Self {
        Self(String::new())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Integer value of the code, `None` if it is empty or not numeric.
    #[must_use]
    pub fn to_number(&self) -> Option<i64> {
        self.0.trim().parse().ok()
    }
}

impl fmt::Display for RadicalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RadicalCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for RadicalCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

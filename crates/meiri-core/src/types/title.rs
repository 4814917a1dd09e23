use std::fmt;

use serde::{Deserialize, Serialize};

/// A video as listed by the catalog: its id and raw title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VideoRef {
    pub id: String,
    pub title: String,
}

impl VideoRef {
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// Structured fields extracted from a daily-character title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParsedTitle {
    /// Sequence number exactly as written, zero padding kept ("0010").
    pub sequence: String,

    /// The character taught in the video.
    pub character: String,

    /// Volume number without leading zeros; `"0"` when the title has none.
    pub volume: String,
}

impl ParsedTitle {
    /// The volume value used when a title carries no volume marker.
    pub const NO_VOLUME: &'static str = "0";

    /// Returns `true` if the title carried a non-zero volume marker.
    #[must_use]
    pub fn has_volume(&self) -> bool {
        self.volume != Self::NO_VOLUME
    }
}

impl fmt::Display for ParsedTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ParsedTitle(seq={}, char={}, vol={})",
            self.sequence, self.character, self.volume
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_volume_distinguishes_sentinel() {
        let mut parsed = ParsedTitle {
            sequence: "0001".into(),
            character: "一".into(),
            volume: "0".into(),
        };
        assert!(!parsed.has_volume());
        parsed.volume = "9".into();
        assert!(parsed.has_volume());
    }

    #[test]
    fn parsed_title_display() {
        let parsed = ParsedTitle {
            sequence: "1423".into(),
            character: "閶".into(),
            volume: "9".into(),
        };
        let display = parsed.to_string();
        assert!(display.contains("1423"));
        assert!(display.contains("閶"));
    }
}

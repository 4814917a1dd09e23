use serde::{Deserialize, Serialize};

use super::radical_code::RadicalCode;

/// A fully enriched catalog entry, the unit written to the checkpoint and
/// mirrored into the remote table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanonicalRecord {
    /// Volume number, `"0"` when the title has none.
    pub volume: String,

    /// Zero-padded sequence number.
    pub sequence: String,

    pub character: String,

    /// Radical code, empty when unresolved.
    pub radical: RadicalCode,

    /// Watch URL of the video.
    pub url: String,
}

/// Row shape of the remote `characters` table.
///
/// The store assigns the `id` column, so it is not part of the insert payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteRow {
    pub chapter: String,
    pub serial: String,
    pub character: String,
    pub radical: Option<i64>,
    pub video_url: String,
}

impl From<&CanonicalRecord> for RemoteRow {
    fn from(record: &CanonicalRecord) -> Self {
        Self {
            chapter: record.volume.clone(),
            serial: record.sequence.clone(),
            character: record.character.clone(),
            radical: record.radical.to_number(),
            video_url: record.url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(radical: &str) -> CanonicalRecord {
        CanonicalRecord {
            volume: "9".into(),
            sequence: "1423".into(),
            character: "閶".into(),
            radical: RadicalCode::from(radical),
            url: "https://www.youtube.com/watch?v=abc123".into(),
        }
    }

    #[test]
    fn remote_row_uses_storage_names() {
        let row = RemoteRow::from(&record("169"));
        let json = serde_json::to_value(&row).unwrap();

        assert_eq!(json["chapter"], "9");
        assert_eq!(json["serial"], "1423");
        assert_eq!(json["character"], "閶");
        assert_eq!(json["radical"], 169);
        assert_eq!(json["video_url"], "https://www.youtube.com/watch?v=abc123");
    }

    #[test]
    fn unparseable_radical_becomes_null() {
        assert_eq!(RemoteRow::from(&record("")).radical, None);
        assert_eq!(RemoteRow::from(&record("120'")).radical, None);

        let json = serde_json::to_value(RemoteRow::from(&record(""))).unwrap();
        assert!(json["radical"].is_null());
    }
}

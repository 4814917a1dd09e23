use crate::types::{CanonicalRecord, ParsedTitle, RadicalCode, VideoRef};

/// Prefix of the public watch URL of a video.
pub const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";

/// Returns the watch URL for a video id.
#[must_use]
pub fn watch_url(video_id: &str) -> String {
    format!("{WATCH_URL_PREFIX}{video_id}")
}

/// Combines a video, its parsed title and its radical code into a record.
#[must_use]
pub fn build_record(video: &VideoRef, parsed: ParsedTitle, radical: RadicalCode) -> CanonicalRecord {
    CanonicalRecord {
        volume: parsed.volume,
        sequence: parsed.sequence,
        character: parsed.character,
        radical,
        url: watch_url(&video.id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_record_from_parts() {
        let video = VideoRef::new("dQw4w9WgXcQ", "趙孟頫 每日一字 1423閶~全集09篇");
        let parsed = ParsedTitle {
            sequence: "1423".into(),
            character: "閶".into(),
            volume: "9".into(),
        };

        let record = build_record(&video, parsed, RadicalCode::from("169"));

        assert_eq!(record.volume, "9");
        assert_eq!(record.sequence, "1423");
        assert_eq!(record.character, "閶");
        assert_eq!(record.radical.as_str(), "169");
        assert_eq!(record.url, "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
    }
}

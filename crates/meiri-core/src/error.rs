use thiserror::Error;

/// Errors that can occur while extracting or synchronizing the catalog.
#[derive(Debug, Error)]
pub enum MeiriError {
    /// A required credential or identifier is missing.
    #[error("missing required configuration: {0}")]
    Config(String),

    /// The video catalog could not be listed.
    #[error("catalog error: {0}")]
    Catalog(String),

    /// The checkpoint file does not carry the expected header row.
    #[error("checkpoint header mismatch: expected {expected:?}, found {found:?}")]
    Format {
        /// The header the reader requires.
        expected: Vec<String>,
        /// The header found in the file.
        found: Vec<String>,
    },

    /// The character reference data could not be loaded or queried.
    #[error("reference lookup error: {0}")]
    Lookup(String),

    /// A remote table operation failed.
    #[error("table `{table}`: {message}")]
    Table {
        /// Name of the remote table.
        table: String,
        /// Failure description from the table client.
        message: String,
    },

    /// A regex pattern failed to compile (should not happen with static patterns).
    #[error("regex compilation error: {0}")]
    Regex(#[from] regex::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MeiriError {
    /// Builds a [`MeiriError::Table`] for the named table.
    pub fn table(table: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Table {
            table: table.into(),
            message: message.to_string(),
        }
    }
}

/// Result type alias for Meiri operations.
pub type Result<T> = std::result::Result<T, MeiriError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = MeiriError::Config("YOUTUBE_API_KEY".into());
        assert_eq!(
            err.to_string(),
            "missing required configuration: YOUTUBE_API_KEY"
        );

        let err = MeiriError::table("characters", "409 Conflict");
        assert_eq!(err.to_string(), "table `characters`: 409 Conflict");

        let err = MeiriError::Format {
            expected: vec!["篇".into()],
            found: vec!["volume".into()],
        };
        assert!(err.to_string().contains("volume"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MeiriError>();
    }
}

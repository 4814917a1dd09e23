//! # Meiri Core
//!
//! Extraction and synchronization engine for the "每日一字" calligraphy
//! catalog. Parses video titles, enriches each character with its radical
//! code, checkpoints the records to CSV and mirrors them into a remote table.
//!
//! ## Quick Start
//!
//! ```rust
//! use meiri_core::parser::TitleParser;
//!
//! let parser = TitleParser::new().unwrap();
//! let parsed = parser.parse("趙孟頫 每日一字 1423閶~全集09篇").unwrap();
//!
//! assert_eq!(parsed.sequence, "1423");
//! assert_eq!(parsed.character, "閶");
//! assert_eq!(parsed.volume, "9");
//! ```
pub mod catalog;
pub mod checkpoint;
pub mod classifier;
pub mod error;
pub mod extract;
pub mod parser;
pub mod radical;
pub mod record;
pub mod sync;
pub mod types;

// Re-export primary API
pub use catalog::VideoCatalog;
pub use checkpoint::{CHECKPOINT_HEADER, read_checkpoint, write_checkpoint};
pub use classifier::{Category, TitleClassifier};
pub use error::{MeiriError, Result};
pub use extract::{ExtractReport, Extractor};
pub use parser::{TitleForm, TitleMatch, TitleParser};
pub use radical::{
    CharacterLookup, CharacterRecord, RadicalResolver, Resolution, StaticRadicalTable,
    UnihanDatabase, UnresolvedReason,
};
pub use record::build_record;
pub use sync::{
    Filter, MemoryTable, RadicalSeeder, RemoteTable, Row, SeedReport, SyncReport,
    TableSynchronizer,
};
pub use types::{CanonicalRecord, ParsedTitle, RadicalCode, RemoteRow, VideoRef};

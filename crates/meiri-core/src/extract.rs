//! # Extraction Stage
//!
//! Turns a catalog listing into canonical records: parse every title, drop
//! the ones that match no pattern, and attach the radical code of the rest.

use tracing::{debug, info};

use crate::catalog::VideoCatalog;
use crate::error::Result;
use crate::parser::TitleParser;
use crate::radical::{CharacterLookup, RadicalResolver, Resolution};
use crate::record::build_record;
use crate::types::{CanonicalRecord, RadicalCode, VideoRef};

/// Records produced by one extraction pass, with the miss counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractReport {
    pub records: Vec<CanonicalRecord>,
    /// Number of videos examined.
    pub total: usize,
    /// Videos whose title matched no pattern.
    pub unparsed: usize,
    /// Records written with an empty radical code.
    pub unresolved: usize,
}

/// Parses titles and enriches them with radical codes.
pub struct Extractor<L> {
    parser: TitleParser,
    resolver: RadicalResolver<L>,
}

impl<L: CharacterLookup> Extractor<L> {
    pub fn new(parser: TitleParser, resolver: RadicalResolver<L>) -> Self {
        Self { parser, resolver }
    }

    /// Lists the channel and extracts every matching video.
    ///
    /// # Errors
    ///
    /// Propagates `MeiriError::Catalog` from the catalog; nothing else fails.
    pub fn run(&self, catalog: &dyn VideoCatalog, channel_id: &str) -> Result<ExtractReport> {
        info!(channel_id, "listing channel videos");
        let videos = catalog.list_videos(channel_id)?;
        Ok(self.extract(&videos))
    }

    /// Extracts records from an already listed set of videos, keeping their order.
    pub fn extract(&self, videos: &[VideoRef]) -> ExtractReport {
        let mut report = ExtractReport {
            total: videos.len(),
            ..ExtractReport::default()
        };

        for video in videos {
            let Some(parsed) = self.parser.parse(&video.title) else {
                debug!(id = %video.id, title = %video.title, "title matched no pattern");
                report.unparsed += 1;
                continue;
            };

            let radical = match self.resolver.resolve(&parsed.character) {
                Resolution::Resolved(code) => code,
                Resolution::Unresolved(reason) => {
                    debug!(character = %parsed.character, %reason, "radical unresolved");
                    report.unresolved += 1;
                    RadicalCode::empty()
                }
            };

            report.records.push(build_record(video, parsed, radical));
        }

        info!(
            total = report.total,
            records = report.records.len(),
            unparsed = report.unparsed,
            unresolved = report.unresolved,
            "extraction finished"
        );
        report
    }
}

//! Meiri Sync Tool
//!
//! Lists the calligraphy channel, writes the canonical records to a CSV
//! checkpoint, and mirrors that checkpoint into the Supabase `characters`
//! table.

mod cli;

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use meiri_core::radical::KANGXI_RADICALS;
use meiri_core::{
    CanonicalRecord, CharacterLookup, Extractor, MemoryTable, ParsedTitle, RadicalResolver,
    RadicalSeeder, RemoteTable, StaticRadicalTable, SyncReport, TableSynchronizer,
    TitleClassifier, TitleForm, TitleParser, UnihanDatabase, VideoCatalog, read_checkpoint,
    write_checkpoint,
};
use meiri_remote::{PostgrestTable, YouTubeCatalog};
use serde::Serialize;
use tracing::{info, warn};

use crate::cli::{Cli, Commands};

/// Titles listed per category by `classify`.
const CLASSIFY_PREVIEW: usize = 5;

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Extract => extract(&cli).map(|_| ()),
        Commands::Sync { dry_run } => sync(&cli, *dry_run).map(|_| ()),
        Commands::Run { dry_run } => {
            if !dry_run {
                // Fail on missing table settings before spending API quota.
                cli.supabase_url()?;
                cli.supabase_key()?;
            }
            let (catalog, lookup, channel_id) = open_extract(&cli)?;
            refresh(&cli, &catalog, lookup, channel_id, *dry_run).map(|_| ())
        }
        Commands::SeedRadicals { radical_table } => seed_radicals(&cli, radical_table),
        Commands::Parse => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            parse_lines(stdin.lock(), stdout.lock())
        }
        Commands::Classify => classify(&cli),
    }
}

/// What an extraction left on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExtractOutcome {
    /// The channel listed no videos.
    EmptyCatalog,
    /// Videos were listed but no title matched; the checkpoint is untouched.
    NoRecords,
    /// The checkpoint was rewritten with this many records.
    Written(usize),
}

fn open_extract(cli: &Cli) -> Result<(YouTubeCatalog, Box<dyn CharacterLookup>, &str)> {
    let api_key = cli.youtube_api_key()?;
    let channel_id = cli.channel_id()?;

    let lookup = open_lookup(cli.unihan_dir.as_deref())?;
    let catalog = YouTubeCatalog::new(api_key, cli.timeout())?;
    Ok((catalog, lookup, channel_id))
}

fn extract(cli: &Cli) -> Result<ExtractOutcome> {
    let (catalog, lookup, channel_id) = open_extract(cli)?;
    extract_with(cli, &catalog, lookup, channel_id)
}

fn extract_with(
    cli: &Cli,
    catalog: &dyn VideoCatalog,
    lookup: impl CharacterLookup,
    channel_id: &str,
) -> Result<ExtractOutcome> {
    let extractor = Extractor::new(TitleParser::new()?, RadicalResolver::new(lookup));

    let report = extractor.run(catalog, channel_id)?;
    if report.total == 0 {
        warn!(channel_id, "channel has no videos, nothing to extract");
        return Ok(ExtractOutcome::EmptyCatalog);
    }
    if report.records.is_empty() {
        warn!(
            total = report.total,
            "no title matched a known pattern, checkpoint left untouched"
        );
        return Ok(ExtractOutcome::NoRecords);
    }

    write_checkpoint(&cli.checkpoint, &report.records)
        .with_context(|| format!("failed to write {}", cli.checkpoint.display()))?;
    Ok(ExtractOutcome::Written(report.records.len()))
}

/// Extracts, then syncs the fresh checkpoint. Returns `None` when nothing
/// was extracted, in which case the table is left alone.
fn refresh(
    cli: &Cli,
    catalog: &dyn VideoCatalog,
    lookup: impl CharacterLookup,
    channel_id: &str,
    dry_run: bool,
) -> Result<Option<SyncReport>> {
    match extract_with(cli, catalog, lookup, channel_id)? {
        ExtractOutcome::Written(records) => {
            info!(records, "checkpoint refreshed, syncing");
            sync(cli, dry_run).map(Some)
        }
        outcome => {
            warn!(?outcome, "nothing extracted, sync skipped");
            Ok(None)
        }
    }
}

/// Opens the Unihan database when a directory is configured, otherwise the
/// static radical table, which only knows the radicals themselves.
fn open_lookup(unihan_dir: Option<&Path>) -> Result<Box<dyn CharacterLookup>> {
    match unihan_dir {
        Some(dir) => {
            let db = UnihanDatabase::bootstrap(dir)
                .with_context(|| format!("failed to load Unihan data from {}", dir.display()))?;
            Ok(Box::new(db))
        }
        None => {
            warn!("UNIHAN_DIR not set, resolving radicals from the static Kang Xi table only");
            Ok(Box::new(StaticRadicalTable::new()))
        }
    }
}

fn sync(cli: &Cli, dry_run: bool) -> Result<SyncReport> {
    let records = read_checkpoint(&cli.checkpoint)
        .with_context(|| format!("failed to read {}", cli.checkpoint.display()))?;

    let report = if dry_run {
        let table = MemoryTable::new();
        let report = sync_into(&table, &cli.table, &records)?;
        info!(rows = table.rows(&cli.table)?.len(), "dry run, nothing sent");
        report
    } else {
        let table = open_table(cli)?;
        sync_into(&table, &cli.table, &records)?
    };

    info!(table = %cli.table, %report, "sync finished");
    Ok(report)
}

fn sync_into(
    table: &dyn RemoteTable,
    name: &str,
    records: &[CanonicalRecord],
) -> Result<SyncReport> {
    let report = TableSynchronizer::new(table, name)
        .sync(records)
        .with_context(|| format!("failed to sync table `{name}`"))?;
    if report.failure > 0 {
        warn!(failed = report.failure, "some rows were rejected");
    }
    Ok(report)
}

fn open_table(cli: &Cli) -> Result<PostgrestTable> {
    let url = cli.supabase_url()?;
    let key = cli.supabase_key()?;
    Ok(PostgrestTable::new(url, key, cli.timeout())?)
}

fn seed_radicals(cli: &Cli, radical_table: &str) -> Result<()> {
    let table = open_table(cli)?;
    let report = RadicalSeeder::new(&table, radical_table)
        .seed(&KANGXI_RADICALS)
        .with_context(|| format!("failed to seed table `{radical_table}`"))?;

    info!(table = radical_table, %report, "radical table seeded");
    Ok(())
}

fn classify(cli: &Cli) -> Result<()> {
    let api_key = cli.youtube_api_key()?;
    let channel_id = cli.channel_id()?;

    let catalog = YouTubeCatalog::new(api_key, cli.timeout())?;
    let classifier = TitleClassifier::new()?;
    let videos = catalog.list_videos(channel_id)?;
    if videos.is_empty() {
        warn!(channel_id, "channel has no videos");
        return Ok(());
    }

    let groups = classifier.group(&videos);
    let mut out = io::stdout().lock();
    writeln!(out, "{} videos in {} categories", videos.len(), groups.len())?;
    for (category, members) in &groups {
        writeln!(out, "\n{category} ({})", members.len())?;
        for video in members.iter().take(CLASSIFY_PREVIEW) {
            writeln!(out, "  - {}", video.title)?;
        }
        if members.len() > CLASSIFY_PREVIEW {
            writeln!(out, "  ... {} more", members.len() - CLASSIFY_PREVIEW)?;
        }
    }
    Ok(())
}

/// One output line of `parse`.
#[derive(Debug, Serialize)]
struct ParseLine<'a> {
    input: &'a str,
    form: Option<TitleForm>,
    #[serde(flatten)]
    title: Option<ParsedTitle>,
}

/// Parses every non-blank input line and writes one JSON object per line.
fn parse_lines<R: BufRead, W: Write>(input: R, mut output: W) -> Result<()> {
    let parser = TitleParser::new()?;
    for line in input.lines() {
        let line = line.context("failed to read input")?;
        let title = line.trim();
        if title.is_empty() {
            continue;
        }
        let matched = parser.match_title(title);
        let out = ParseLine {
            input: title,
            form: matched.as_ref().map(|m| m.form),
            title: matched.map(|m| m.title),
        };
        serde_json::to_writer(&mut output, &out)?;
        writeln!(output)?;
    }
    output.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use meiri_core::{RadicalCode, VideoRef};
    use serde_json::Value;

    fn record(sequence: &str, character: &str) -> CanonicalRecord {
        CanonicalRecord {
            volume: "9".into(),
            sequence: sequence.into(),
            character: character.into(),
            radical: RadicalCode::new("169"),
            url: format!("https://www.youtube.com/watch?v={sequence}"),
        }
    }

    #[test]
    fn parse_emits_one_json_line_per_title() {
        let input = "趙孟頫 每日一字 1423閶~全集09篇\n\n開箱 新毛筆\n趙孟頫 每日一字 0001一\n";
        let mut out = Vec::new();
        parse_lines(input.as_bytes(), &mut out).unwrap();

        let lines: Vec<Value> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 3);

        assert_eq!(lines[0]["form"], "Full");
        assert_eq!(lines[0]["sequence"], "1423");
        assert_eq!(lines[0]["character"], "閶");
        assert_eq!(lines[0]["volume"], "9");

        assert_eq!(lines[1]["input"], "開箱 新毛筆");
        assert!(lines[1]["form"].is_null());
        assert!(lines[1].get("sequence").is_none());

        assert_eq!(lines[2]["form"], "Bare");
        assert_eq!(lines[2]["volume"], "0");
    }

    #[test]
    fn dry_run_sync_loads_checkpoint_into_memory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calligraphy_videos.csv");
        write_checkpoint(&path, &[record("1423", "閶"), record("1424", "闔")]).unwrap();

        let cli = Cli::try_parse_from([
            "meiri-sync",
            "--checkpoint",
            path.to_str().unwrap(),
            "--table",
            "characters",
            "sync",
            "--dry-run",
        ])
        .unwrap();

        let report = sync(&cli, true).unwrap();
        assert_eq!(report, SyncReport { success: 2, failure: 0 });
    }

    #[test]
    fn sync_without_checkpoint_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.csv");
        let cli = Cli::try_parse_from([
            "meiri-sync",
            "--checkpoint",
            path.to_str().unwrap(),
            "sync",
            "--dry-run",
        ])
        .unwrap();

        let err = sync(&cli, true).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    struct FixedCatalog(Vec<VideoRef>);

    impl VideoCatalog for FixedCatalog {
        fn list_videos(&self, _channel_id: &str) -> meiri_core::Result<Vec<VideoRef>> {
            Ok(self.0.clone())
        }
    }

    fn cli_for(checkpoint: &Path) -> Cli {
        Cli::try_parse_from([
            "meiri-sync",
            "--checkpoint",
            checkpoint.to_str().unwrap(),
            "--table",
            "characters",
            "run",
            "--dry-run",
        ])
        .unwrap()
    }

    #[test]
    fn extract_writes_matching_titles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calligraphy_videos.csv");
        let catalog = FixedCatalog(vec![
            VideoRef::new("a1", "趙孟頫 每日一字 0085水~全集02篇"),
            VideoRef::new("b2", "channel trailer"),
        ]);

        let outcome =
            extract_with(&cli_for(&path), &catalog, StaticRadicalTable::new(), "UC").unwrap();

        assert_eq!(outcome, ExtractOutcome::Written(1));
        let records = read_checkpoint(&path).unwrap();
        assert_eq!(records[0].character, "水");
        assert_eq!(records[0].radical.as_str(), "85");
    }

    #[test]
    fn unmatched_titles_keep_previous_checkpoint() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calligraphy_videos.csv");
        write_checkpoint(&path, &[record("1423", "閶")]).unwrap();
        let catalog = FixedCatalog(vec![VideoRef::new("b2", "channel trailer")]);

        let outcome =
            extract_with(&cli_for(&path), &catalog, StaticRadicalTable::new(), "UC").unwrap();

        assert_eq!(outcome, ExtractOutcome::NoRecords);
        assert_eq!(read_checkpoint(&path).unwrap().len(), 1);
    }

    #[test]
    fn empty_catalog_ends_run_before_sync() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calligraphy_videos.csv");
        // A stale checkpoint from an earlier run must not be synced.
        write_checkpoint(&path, &[record("1423", "閶")]).unwrap();

        let report = refresh(
            &cli_for(&path),
            &FixedCatalog(Vec::new()),
            StaticRadicalTable::new(),
            "UC",
            true,
        )
        .unwrap();

        assert_eq!(report, None);
    }

    #[test]
    fn run_syncs_fresh_checkpoint() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calligraphy_videos.csv");
        let catalog = FixedCatalog(vec![
            VideoRef::new("a1", "趙孟頫 每日一字 0085水~全集02篇"),
            VideoRef::new("c3", "趙孟頫 每日一字 0001一"),
        ]);

        let report = refresh(&cli_for(&path), &catalog, StaticRadicalTable::new(), "UC", true)
            .unwrap();

        assert_eq!(report, Some(SyncReport { success: 2, failure: 0 }));
    }

    #[test]
    fn static_lookup_is_used_without_unihan_dir() {
        let lookup = open_lookup(None).unwrap();
        let records = lookup.lookup("門").unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn missing_unihan_dir_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        assert!(open_lookup(Some(&dir.path().join("absent"))).is_err());
    }
}

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use meiri_core::MeiriError;
use meiri_core::sync::{CHARACTERS_TABLE, RADICAL_TABLE};

/// Default checkpoint file, relative to the working directory.
pub const DEFAULT_CHECKPOINT: &str = "calligraphy_videos.csv";

/// CLI arguments
#[derive(Debug, Parser)]
#[command(name = "meiri-sync")]
#[command(about = "Extract the 每日一字 catalog to CSV and sync it to Supabase")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// YouTube Data API key
    #[arg(long, env = "YOUTUBE_API_KEY", hide_env_values = true)]
    pub youtube_api_key: Option<String>,

    /// Channel whose uploads are cataloged
    #[arg(short, long, env = "TARGET_CHANNEL_ID")]
    pub channel_id: Option<String>,

    /// Supabase project URL
    #[arg(long, env = "SUPABASE_URL")]
    pub supabase_url: Option<String>,

    /// Supabase API key
    #[arg(long, env = "SUPABASE_KEY", hide_env_values = true)]
    pub supabase_key: Option<String>,

    /// Directory holding the extracted Unihan*.txt files; without it the
    /// static Kang Xi radical table is used
    #[arg(short = 'u', long, env = "UNIHAN_DIR")]
    pub unihan_dir: Option<PathBuf>,

    /// Checkpoint CSV file
    #[arg(short = 'o', long, env = "MEIRI_CHECKPOINT", default_value = DEFAULT_CHECKPOINT)]
    pub checkpoint: PathBuf,

    /// Target table for the catalog rows
    #[arg(short, long, env = "MEIRI_TABLE", default_value = CHARACTERS_TABLE)]
    pub table: String,

    /// HTTP request timeout in seconds
    #[arg(long, env = "MEIRI_HTTP_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the channel and write the checkpoint CSV
    Extract,
    /// Replace the table contents with the checkpoint CSV
    Sync {
        /// Sync into an in-memory table instead of Supabase
        #[arg(long)]
        dry_run: bool,
    },
    /// Extract, then sync (full refresh)
    Run {
        /// Sync into an in-memory table instead of Supabase
        #[arg(long)]
        dry_run: bool,
    },
    /// Fill the radical reference table with the 214 Kang Xi radicals
    SeedRadicals {
        /// Radical table name
        #[arg(long, default_value = RADICAL_TABLE)]
        radical_table: String,
    },
    /// Parse titles read from stdin and print one JSON line per title
    Parse,
    /// Group every channel video by keyword category
    Classify,
}

impl Cli {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    pub fn youtube_api_key(&self) -> Result<&str, MeiriError> {
        require(self.youtube_api_key.as_deref(), "YOUTUBE_API_KEY")
    }

    pub fn channel_id(&self) -> Result<&str, MeiriError> {
        require(self.channel_id.as_deref(), "TARGET_CHANNEL_ID")
    }

    pub fn supabase_url(&self) -> Result<&str, MeiriError> {
        require(self.supabase_url.as_deref(), "SUPABASE_URL")
    }

    pub fn supabase_key(&self) -> Result<&str, MeiriError> {
        require(self.supabase_key.as_deref(), "SUPABASE_KEY")
    }
}

/// Returns the trimmed value, or `MeiriError::Config` naming the variable.
pub fn require<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str, MeiriError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| MeiriError::Config(name.to_string()))
}

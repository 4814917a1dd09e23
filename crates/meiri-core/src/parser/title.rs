use std::fmt;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::ParsedTitle;

/// Series label that opens every title of the channel.
pub const SERIES_LABEL: &str = "趙孟頫";

/// Subtitle following the series label.
pub const SERIES_SUBTITLE: &str = "每日一字";

/// Which title convention produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TitleForm {
    /// `趙孟頫 每日一字 1423閶~全集09篇`
    Full,
    /// `趙孟頫 每日一字 0010既~xxxxxx`
    Tilde,
    /// `趙孟頫 每日一字 0001一`
    Bare,
}

impl fmt::Display for TitleForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => write!(f, "full"),
            Self::Tilde => write!(f, "tilde"),
            Self::Bare => write!(f, "bare"),
        }
    }
}

/// A parsed title together with the form that matched it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleMatch {
    pub form: TitleForm,
    pub title: ParsedTitle,
}

struct Matcher {
    form: TitleForm,
    pattern: Regex,
}

impl Matcher {
    fn new(form: TitleForm, tail: &str) -> Result<Self> {
        let pattern = Regex::new(&format!(r"{SERIES_LABEL}\s+{SERIES_SUBTITLE}\s+{tail}"))?;
        Ok(Self { form, pattern })
    }

    fn apply(&self, input: &str) -> Option<TitleMatch> {
        let caps = self.pattern.captures(input)?;
        let volume = match self.form {
            TitleForm::Full => strip_volume(&caps[3]),
            TitleForm::Tilde | TitleForm::Bare => ParsedTitle::NO_VOLUME.to_string(),
        };
        Some(TitleMatch {
            form: self.form,
            title: fields(&caps, volume),
        })
    }
}

fn fields(caps: &Captures<'_>, volume: String) -> ParsedTitle {
    ParsedTitle {
        sequence: caps[1].to_string(),
        character: caps[2].to_string(),
        volume,
    }
}

/// "09" -> "9", "00" -> "0"
fn strip_volume(raw: &str) -> String {
    let stripped = raw.trim_start_matches('0');
    if stripped.is_empty() {
        ParsedTitle::NO_VOLUME.to_string()
    } else {
        stripped.to_string()
    }
}

/// Extracts sequence, character and volume from the channel's
/// daily-character titles.
///
/// The parser only understands the one naming convention used by the
/// channel. Three patterns are tried in a fixed order and the first one that
/// matches wins, even when a later pattern would also match:
///
/// 1. full form with a `~全集NN篇` volume marker,
/// 2. tilde form, anything after `~` is ignored,
/// 3. bare form, the character group runs to the next whitespace.
pub struct TitleParser {
    matchers: Vec<Matcher>,
}

impl TitleParser {
    /// Constructs a new `TitleParser` with pre-compiled patterns.
    ///
    /// # Errors
    ///
    /// Returns `MeiriError::Regex` if any pattern fails to compile
    /// (should never happen with the static patterns defined here).
    pub fn new() -> Result<Self> {
        Ok(Self {
            matchers: vec![
                Matcher::new(TitleForm::Full, r"(\d+)([^\s~]+)~全集(\d+)篇")?,
                Matcher::new(TitleForm::Tilde, r"(\d+)([^\s~]+)~")?,
                Matcher::new(TitleForm::Bare, r"(\d+)([^\s]+)")?,
            ],
        })
    }

    /// Parses a raw video title. Returns `None` when no pattern matches.
    #[must_use]
    pub fn parse(&self, title: &str) -> Option<ParsedTitle> {
        self.match_title(title).map(|m| m.title)
    }

    /// Like [`parse`](Self::parse), but also reports which form matched.
    #[must_use]
    pub fn match_title(&self, title: &str) -> Option<TitleMatch> {
        self.matchers.iter().find_map(|m| m.apply(title))
    }
}

//! Keyword categorization of arbitrary channel titles.

use std::collections::BTreeMap;
use std::fmt;

use regex::Regex;
use serde::Serialize;

use crate::error::Result;
use crate::types::VideoRef;

/// Broad content category of a video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Category {
    Unboxing,
    Tutorial,
    Vlog,
    Gameplay,
    Uncategorized,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unboxing => write!(f, "開箱評測"),
            Self::Tutorial => write!(f, "教學技巧"),
            Self::Vlog => write!(f, "生活紀錄"),
            Self::Gameplay => write!(f, "遊戲實況"),
            Self::Uncategorized => write!(f, "未分類"),
        }
    }
}

/// Assigns a [`Category`] from keywords in a title. Rules are checked in
/// order on the lower-cased title.
pub struct TitleClassifier {
    re_vlog: Regex,
}

impl TitleClassifier {
    /// # Errors
    ///
    /// Returns `MeiriError::Regex` if the static pattern fails to compile.
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_vlog: Regex::new(r"vlog|日常|生活")?,
        })
    }

    #[must_use]
    pub fn classify(&self, title: &str) -> Category {
        let title = title.to_lowercase();
        let has = |keywords: &[&str]| keywords.iter().any(|k| title.contains(k));

        if has(&["開箱", "unboxing"]) {
            Category::Unboxing
        } else if has(&["教學", "tutorial", "怎麼做"]) {
            Category::Tutorial
        } else if self.re_vlog.is_match(&title) {
            Category::Vlog
        } else if has(&["遊戲", "gameplay"]) {
            Category::Gameplay
        } else {
            Category::Uncategorized
        }
    }

    /// Groups videos by category, keeping listing order inside each group.
    #[must_use]
    pub fn group<'v>(&self, videos: &'v [VideoRef]) -> BTreeMap<Category, Vec<&'v VideoRef>> {
        let mut groups: BTreeMap<Category, Vec<&VideoRef>> = BTreeMap::new();
        for video in videos {
            groups.entry(self.classify(&video.title)).or_default().push(video);
        }
        groups
    }
}

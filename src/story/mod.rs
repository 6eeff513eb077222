// SPDX-License-Identifier: MPL-2.0
//! Stories and the page deck they expose to the book.
//!
//! A story file is either the JSON document produced by the story service
//! (camelCase fields, many of them ignored here) or a hand-written TOML file
//! with `[[pages]]` tables. Only the page list matters to the viewer; it is
//! frozen into an immutable [`Deck`] for the lifetime of a reading session.

use crate::error::{Error, Result, StoryError};
use rust_embed::RustEmbed;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

#[derive(RustEmbed)]
#[folder = "assets/stories/"]
pub(crate) struct StoryAsset;

/// Name of the story bundled with the application.
const DEMO_STORY: &str = "demo.json";

/// One page of a story.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRecord {
    /// Unique, stable identifier.
    pub id: u32,
    /// 1-based number printed at the bottom of the page.
    #[serde(alias = "page_number")]
    pub page_number: u32,
    /// Text shown on the front face.
    #[serde(default)]
    pub content: String,
    /// Illustration location; `None` or blank renders the placeholder.
    #[serde(default, alias = "image_url")]
    pub image_url: Option<String>,
}

impl PageRecord {
    /// Returns the illustration URL if it is present and not blank.
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.image_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

/// Immutable, cheaply clonable ordered list of pages.
#[derive(Debug, Clone, Default)]
pub struct Deck {
    pages: Arc<[PageRecord]>,
}

impl Deck {
    #[must_use]
    pub fn new(pages: Vec<PageRecord>) -> Self {
        Self {
            pages: pages.into(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Highest valid position, or `0` for an empty deck.
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.pages.len().saturating_sub(1)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&PageRecord> {
        self.pages.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PageRecord> {
        self.pages.iter()
    }

    /// Position of the page with the given id.
    #[must_use]
    pub fn position_of(&self, id: u32) -> Option<usize> {
        self.pages.iter().position(|page| page.id == id)
    }
}

/// A story as read from disk. Fields other than the title and pages are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub pages: Vec<PageRecord>,
}

impl Story {
    /// Freezes the page list into a deck.
    #[must_use]
    pub fn deck(&self) -> Deck {
        Deck::new(self.pages.clone())
    }

    fn validate(self) -> Result<Self> {
        let mut seen = HashSet::with_capacity(self.pages.len());
        for page in &self.pages {
            if !seen.insert(page.id) {
                return Err(StoryError::DuplicatePageId(page.id).into());
            }
        }
        Ok(self)
    }
}

/// Parses a JSON story document.
pub fn from_json(content: &str) -> Result<Story> {
    let story: Story = serde_json::from_str(content)
        .map_err(|e| StoryError::Malformed(e.to_string()))?;
    story.validate()
}

/// Parses a TOML story document.
pub fn from_toml(content: &str) -> Result<Story> {
    let story: Story =
        toml::from_str(content).map_err(|e| StoryError::Malformed(e.to_string()))?;
    story.validate()
}

/// Loads a story file, choosing the parser from the file extension.
pub fn load_from_path(path: &Path) -> Result<Story> {
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let parse: fn(&str) -> Result<Story> = match extension.as_str() {
        "json" => from_json,
        "toml" => from_toml,
        other => return Err(StoryError::UnsupportedFormat(other.to_string()).into()),
    };

    let content = fs::read_to_string(path)?;
    let story = parse(&content)?;
    tracing::info!(
        path = %path.display(),
        title = %story.title,
        pages = story.pages.len(),
        "story loaded"
    );
    Ok(story)
}

/// Returns the story bundled with the application.
#[must_use]
pub fn demo() -> Story {
    let parsed = StoryAsset::get(DEMO_STORY)
        .ok_or_else(|| Error::from(StoryError::Malformed(format!("missing {DEMO_STORY}"))))
        .and_then(|file| from_json(&String::from_utf8_lossy(file.data.as_ref())));

    match parsed {
        Ok(story) => story,
        Err(err) => {
            tracing::warn!(error = %err, "bundled story unavailable");
            Story::default()
        }
    }
}

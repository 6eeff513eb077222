// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::book::{self, Ticket};
use crate::error::Error;
use crate::media::ImageData;
use crate::story::Story;
use crate::ui::book_view;
use std::time::Instant;

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    /// Navigation request from the keyboard.
    Navigate(book::Message),
    /// Click on one half of the book.
    Book(book_view::Message),
    /// The settle delay for `Ticket` has elapsed.
    SettleElapsed(Ticket),
    /// An illustration finished loading.
    ImageLoaded {
        url: String,
        result: Result<ImageData, Error>,
    },
    /// Animation frame while leaves are turning.
    Frame(Instant),
    /// Re-read the story file from disk.
    ReloadStory,
    StoryReloaded(Result<Story, Error>),
    /// Window close was requested (user clicked X or pressed Alt+F4).
    WindowCloseRequested(iced::window::Id),
}

/// Runtime flags passed in from the CLI.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional 1-based page to open.
    pub page: Option<usize>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `FLIPBOOK_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
    /// Story file to open; the bundled story is shown when absent.
    pub story_path: Option<String>,
}

// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Svg(String),
    Config(String),
    Story(StoryError),
    Fetch(String),
}

/// Reasons a story file could not be turned into a deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoryError {
    /// The file extension is neither `.json` nor `.toml`.
    UnsupportedFormat(String),

    /// The file parsed but does not match the story shape.
    Malformed(String),

    /// Two pages share the same id.
    DuplicatePageId(u32),
}

impl StoryError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            StoryError::UnsupportedFormat(_) => "error-story-unsupported-format",
            StoryError::Malformed(_) => "error-story-malformed",
            StoryError::DuplicatePageId(_) => "error-story-duplicate-page",
        }
    }
}

impl fmt::Display for StoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoryError::UnsupportedFormat(ext) => {
                write!(f, "Unsupported story format: {}", ext)
            }
            StoryError::Malformed(msg) => write!(f, "Malformed story: {}", msg),
            StoryError::DuplicatePageId(id) => write!(f, "Duplicate page id: {}", id),
        }
    }
}

impl Error {
    /// Returns the i18n message key used when surfacing this error to the reader.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Error::Io(_) => "error-story-io",
            Error::Svg(_) | Error::Fetch(_) => "error-image-load",
            Error::Config(_) => "error-config",
            Error::Story(err) => err.i18n_key(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Svg(e) => write!(f, "SVG Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Story(e) => write!(f, "Story Error: {}", e),
            Error::Fetch(e) => write!(f, "Fetch Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<StoryError> for Error {
    fn from(err: StoryError) -> Self {
        Error::Story(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Fetch(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

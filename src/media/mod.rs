// SPDX-License-Identifier: MPL-2.0
//! Illustration sources, fetching and decoding.
//!
//! A page's `imageUrl` is resolved into an [`ImageSource`] before anything is
//! read: remote URLs must pass the [`remote::RemotePolicy`] allow-list, relative
//! paths resolve next to the story file, and `embedded:` names point into the
//! bundled demo story.

pub mod image;
pub mod prefetch;
pub mod remote;

pub use image::{decode, ImageData};
pub use prefetch::{CacheConfig, ImageCache};
pub use remote::{RemotePattern, RemotePolicy};

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

/// Prefix for illustrations bundled with the demo story.
pub const EMBEDDED_SCHEME: &str = "embedded:";

/// Where an illustration's bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Local(PathBuf),
    Embedded(String),
    Remote(reqwest::Url),
}

impl ImageSource {
    /// Resolves a page's image reference.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Fetch`] for remote hosts outside the allow-list or for
    /// schemes other than `http`, `https` and `file`.
    pub fn resolve(raw: &str, base_dir: Option<&Path>, policy: &RemotePolicy) -> Result<Self> {
        let raw = raw.trim();
        if let Some(name) = raw.strip_prefix(EMBEDDED_SCHEME) {
            return Ok(ImageSource::Embedded(name.to_string()));
        }

        match reqwest::Url::parse(raw) {
            Ok(url) => match url.scheme() {
                "http" | "https" => {
                    policy.check(&url)?;
                    Ok(ImageSource::Remote(url))
                }
                "file" => url
                    .to_file_path()
                    .map(ImageSource::Local)
                    .map_err(|()| Error::Fetch(format!("invalid file URL: {raw}"))),
                // Windows drive letters parse as a one-letter scheme.
                scheme if scheme.len() == 1 => Ok(Self::local(raw, base_dir)),
                scheme => Err(Error::Fetch(format!("unsupported scheme: {scheme}"))),
            },
            Err(_) => Ok(Self::local(raw, base_dir)),
        }
    }

    fn local(raw: &str, base_dir: Option<&Path>) -> Self {
        let path = PathBuf::from(raw);
        match base_dir {
            Some(base) if path.is_relative() => ImageSource::Local(base.join(path)),
            _ => ImageSource::Local(path),
        }
    }
}

/// Upper bound for one remote request, body included.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(20);

fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, "falling back to default HTTP client");
                reqwest::Client::new()
            })
    })
}

fn check_size(len: usize, max_bytes: usize) -> Result<()> {
    if len > max_bytes {
        return Err(Error::Fetch(format!(
            "illustration too large: {len} bytes (limit {max_bytes})"
        )));
    }
    Ok(())
}

/// Reads an illustration's encoded bytes, refusing anything over `max_bytes`.
///
/// # Errors
///
/// Returns [`Error::Io`] for unreadable files or unknown embedded names and
/// [`Error::Fetch`] for failed, timed out, non-success or oversized
/// responses.
pub async fn read_bytes(source: &ImageSource, max_bytes: usize) -> Result<Vec<u8>> {
    let bytes = match source {
        ImageSource::Local(path) => tokio::fs::read(path).await?,
        ImageSource::Embedded(name) => crate::story::StoryAsset::get(name)
            .map(|file| file.data.into_owned())
            .ok_or_else(|| Error::Io(format!("missing embedded illustration: {name}")))?,
        ImageSource::Remote(url) => {
            let response = http_client()
                .get(url.clone())
                .send()
                .await?
                .error_for_status()?;
            if let Some(len) = response.content_length() {
                check_size(usize::try_from(len).unwrap_or(usize::MAX), max_bytes)?;
            }
            response.bytes().await?.to_vec()
        }
    };
    check_size(bytes.len(), max_bytes)?;
    Ok(bytes)
}

/// Fetches and decodes an illustration off the UI thread.
///
/// # Errors
///
/// Propagates errors from [`read_bytes`] and [`decode`].
pub async fn load(source: ImageSource, allow_svg: bool, max_bytes: usize) -> Result<ImageData> {
    let bytes = read_bytes(&source, max_bytes).await?;
    tokio::task::spawn_blocking(move || decode(&bytes, allow_svg))
        .await
        .unwrap_or_else(|e| Err(Error::Io(format!("Decode task failed: {e}"))))
}

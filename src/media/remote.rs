// SPDX-License-Identifier: MPL-2.0
//! Allow-list for remote illustrations.
//!
//! Each pattern names a protocol, a hostname and a pathname. Hostnames may
//! start with `*.` (exactly one extra label) or `**.` (one or more labels).
//! Pathnames are matched segment by segment, where `*` stands for one
//! segment and `**` for any number of them.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// One allowed remote location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RemotePattern {
    #[serde(default = "default_protocol")]
    pub protocol: String,
    pub hostname: String,
    #[serde(default = "default_pathname")]
    pub pathname: String,
}

fn default_protocol() -> String {
    "https".to_string()
}

fn default_pathname() -> String {
    "/**".to_string()
}

impl RemotePattern {
    #[must_use]
    pub fn new(protocol: &str, hostname: &str, pathname: &str) -> Self {
        Self {
            protocol: protocol.to_string(),
            hostname: hostname.to_string(),
            pathname: pathname.to_string(),
        }
    }

    /// Whether `url` falls under this pattern.
    #[must_use]
    pub fn matches(&self, url: &reqwest::Url) -> bool {
        let Some(host) = url.host_str() else {
            return false;
        };
        self.protocol.eq_ignore_ascii_case(url.scheme())
            && host_matches(&self.hostname, host)
            && path_matches(&self.pathname, url.path())
    }
}

fn host_matches(pattern: &str, host: &str) -> bool {
    let pattern = pattern.to_ascii_lowercase();
    let host = host.to_ascii_lowercase();

    if let Some(suffix) = pattern.strip_prefix("**.") {
        return host
            .strip_suffix(suffix)
            .and_then(|rest| rest.strip_suffix('.'))
            .is_some_and(|labels| !labels.is_empty());
    }
    if let Some(suffix) = pattern.strip_prefix("*.") {
        return host
            .strip_suffix(suffix)
            .and_then(|rest| rest.strip_suffix('.'))
            .is_some_and(|label| !label.is_empty() && !label.contains('.'));
    }
    pattern == host
}

fn path_matches(pattern: &str, path: &str) -> bool {
    let pattern: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    let path: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    segments_match(&pattern, &path)
}

fn segments_match(pattern: &[&str], path: &[&str]) -> bool {
    match pattern.split_first() {
        None => path.is_empty(),
        Some((&"**", rest)) => (0..=path.len()).any(|skip| segments_match(rest, &path[skip..])),
        Some((&"*", rest)) => !path.is_empty() && segments_match(rest, &path[1..]),
        Some((segment, rest)) => {
            path.first() == Some(segment) && segments_match(rest, &path[1..])
        }
    }
}

/// Rules deciding which illustrations may be fetched and decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemotePolicy {
    patterns: Vec<RemotePattern>,
    allow_svg: bool,
}

impl Default for RemotePolicy {
    fn default() -> Self {
        let images = crate::config::ImagesConfig::default();
        Self::new(
            images.remote_patterns,
            images.allow_svg.unwrap_or(crate::config::DEFAULT_ALLOW_SVG),
        )
    }
}

impl RemotePolicy {
    #[must_use]
    pub fn new(patterns: Vec<RemotePattern>, allow_svg: bool) -> Self {
        Self {
            patterns,
            allow_svg,
        }
    }

    #[must_use]
    pub fn from_config(images: &crate::config::ImagesConfig) -> Self {
        Self::new(
            images.remote_patterns.clone(),
            images.allow_svg.unwrap_or(crate::config::DEFAULT_ALLOW_SVG),
        )
    }

    #[must_use]
    pub fn allow_svg(&self) -> bool {
        self.allow_svg
    }

    #[must_use]
    pub fn allows(&self, url: &reqwest::Url) -> bool {
        self.patterns.iter().any(|pattern| pattern.matches(url))
    }

    /// Rejects URLs outside the allow-list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Fetch`] naming the host when no pattern matches.
    pub fn check(&self, url: &reqwest::Url) -> Result<()> {
        if self.allows(url) {
            Ok(())
        } else {
            Err(Error::Fetch(format!(
                "host not allowed: {}",
                url.host_str().unwrap_or_default()
            )))
        }
    }
}

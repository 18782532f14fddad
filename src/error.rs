//! Fetch error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur between reading the URL and writing the body.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("URL is required")]
    MissingUrl,

    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("GET {url} failed: {cause}")]
    Transport { url: String, cause: String },

    #[error("cannot write {}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    pub(crate) fn invalid_url(url: &str, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn transport(url: &str, cause: impl std::fmt::Display) -> Self {
        Self::Transport {
            url: url.to_string(),
            cause: cause.to_string(),
        }
    }

    /// True for errors caused by bad command-line input, which are reported
    /// together with the usage text.
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::MissingUrl | Self::InvalidUrl { .. })
    }
}

//! Fetch configuration
//!
//! A [`FetchConfig`] is built once per invocation from the command line and
//! passed by reference into the fetch core. It never changes afterwards.

use crate::error::FetchError;
use crate::url;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default per-attempt timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default attempt budget
pub const DEFAULT_RETRY_COUNT: u32 = 3;

/// Default number of times the whole fetch runs
pub const DEFAULT_REPEAT: u32 = 1;

/// Pause between a failed attempt and the next one
pub const RETRY_DELAY: Duration = Duration::from_secs(1);

/// Immutable settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    url: String,
    /// Per-attempt deadline in seconds (0 = no deadline)
    timeout_secs: u64,
    /// Attempt budget (0 still means one attempt)
    retry_count: u32,
    /// Output file (stdout if not specified)
    output: Option<PathBuf>,
    /// How many times to run the fetch
    repeat: u32,
    /// Suppress diagnostics on stderr
    quiet: bool,
}

impl FetchConfig {
    /// Create a config for `raw_url` with default settings.
    ///
    /// The URL is validated and normalized here, so every config holds a URL
    /// starting with `http://` or `https://`.
    pub fn new(raw_url: &str) -> Result<Self, FetchError> {
        if raw_url.is_empty() {
            return Err(FetchError::MissingUrl);
        }

        Ok(Self {
            url: url::normalize(raw_url)?,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            retry_count: DEFAULT_RETRY_COUNT,
            output: None,
            repeat: DEFAULT_REPEAT,
            quiet: false,
        })
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_retry(mut self, count: u32) -> Self {
        self.retry_count = count;
        self
    }

    /// Set the output file. An empty path means stdout.
    pub fn with_output(mut self, path: Option<PathBuf>) -> Self {
        self.output = path.filter(|p| !p.as_os_str().is_empty());
        self
    }

    pub fn with_repeat(mut self, count: u32) -> Self {
        self.repeat = count;
        self
    }

    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// The normalized URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Attempt budget as configured (0 still means one attempt)
    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    pub fn repeat(&self) -> u32 {
        self.repeat
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }
}

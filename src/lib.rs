//! HTTP fetch with timeouts and retries
//!
//! `rfetch` performs one HTTP GET, retrying transport failures a bounded
//! number of times with a fixed one-second pause, and hands the full body to
//! an output sink (a file, or stdout plus a newline).
//!
//! # Example
//!
//! ```no_run
//! use rfetch::{run, FetchConfig};
//!
//! let config = FetchConfig::new("example.com")?
//!     .with_timeout(10)
//!     .with_retry(5);
//! run(&config)?;
//! # Ok::<(), rfetch::FetchError>(())
//! ```
//!
//! # Pipeline
//!
//! - [`url::normalize`] - validate the raw URL, add `http://` when needed
//! - [`fetch::Fetch`] - one bounded-timeout GET
//! - [`retry::Retry`] - sequential attempts with a fixed delay
//! - [`sink::write_output`] - route the body to a file or stdout

pub mod config;
pub mod error;
pub mod fetch;
pub mod output;
pub mod retry;
pub mod sink;
pub mod url;

pub use config::FetchConfig;
pub use error::FetchError;
pub use fetch::{Fetch, FetchResult, HttpFetcher};
pub use retry::{fetch_with_retry, Retry};

/// Fetch the configured URL once (with retries) and write the body out.
pub fn run(config: &FetchConfig) -> Result<(), FetchError> {
    let fetcher = HttpFetcher::new().quiet(config.is_quiet());
    run_with(config, &fetcher)
}

/// Same as [`run`], with the fetcher supplied by the caller.
pub fn run_with<F: Fetch + ?Sized>(config: &FetchConfig, fetcher: &F) -> Result<(), FetchError> {
    let body = Retry::new(config.retry_count())
        .quiet(config.is_quiet())
        .run(fetcher, config.url(), config.timeout())?;
    sink::write_output(&body, config.output())
}

//! Single-attempt HTTP GET
//!
//! One call is one network round trip: connect, send, read the whole body.
//! Any transport problem (DNS, connect, TLS, timeout, broken body) is a
//! failure. HTTP status codes are not: a 404 page is still a body.

use crate::error::FetchError;
use crate::output;
use std::io::Read;
use std::time::Duration;

/// Outcome of one attempt: the full body, or why it failed.
pub type FetchResult = Result<Vec<u8>, FetchError>;

/// Something that can perform one GET attempt.
pub trait Fetch {
    /// Fetch `url` once, giving up after `timeout` (zero = no deadline).
    fn execute(&self, url: &str, timeout: Duration) -> FetchResult;
}

/// User-Agent sent with every request
const USER_AGENT: &str = concat!("rfetch/", env!("CARGO_PKG_VERSION"));

/// Longer timeouts are treated as no deadline; ureq adds the timeout to
/// `Instant::now()` and fails the request if that overflows
const MAX_DEADLINE: Duration = Duration::from_secs(u32::MAX as u64);

/// The deadline ureq should enforce for `timeout`, if any.
fn deadline(timeout: Duration) -> Option<Duration> {
    if timeout.is_zero() || timeout > MAX_DEADLINE {
        None
    } else {
        Some(timeout)
    }
}

/// The real fetcher, backed by a blocking ureq agent.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    quiet: bool,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hide the in-flight spinner.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// A fresh agent per attempt, so no pooled connection outlives it.
    fn agent(timeout: Duration) -> ureq::Agent {
        let mut builder = ureq::AgentBuilder::new().user_agent(USER_AGENT);
        if let Some(timeout) = deadline(timeout) {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }
}

impl Fetch for HttpFetcher {
    fn execute(&self, url: &str, timeout: Duration) -> FetchResult {
        let pb = output::fetch_spinner(&format!("GET {}", url), self.quiet);
        let result = get_body(&Self::agent(timeout), url);
        pb.finish_and_clear();
        result
    }
}

/// Issue the request and read the body into memory.
fn get_body(agent: &ureq::Agent, url: &str) -> FetchResult {
    let response = match agent.get(url).call() {
        Ok(response) => response,
        // Status codes outside 2xx/3xx still carry a body worth returning
        Err(ureq::Error::Status(_, response)) => response,
        Err(e) => return Err(FetchError::transport(url, e)),
    };

    // The reader owns the connection; it is dropped on every path out
    let mut reader = response.into_reader();
    let mut body = Vec::new();
    reader
        .read_to_end(&mut body)
        .map_err(|e| FetchError::transport(url, format!("failed to read response: {}", e)))?;

    Ok(body)
}

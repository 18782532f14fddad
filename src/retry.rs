//! Retry loop around single fetch attempts
//!
//! Attempts run strictly one after another on the calling thread. After a
//! failed attempt the loop sleeps for a fixed delay before trying again;
//! there is no backoff curve and no jitter. When every attempt fails only
//! the last failure is kept.

use crate::config::RETRY_DELAY;
use crate::fetch::{Fetch, FetchResult, HttpFetcher};
use crate::output;
use std::time::Duration;

/// Bounded retry policy with a fixed delay.
#[derive(Debug, Clone)]
pub struct Retry {
    retry_count: u32,
    delay: Duration,
    quiet: bool,
}

impl Retry {
    /// Policy allowing `retry_count` attempts (at least one) one second apart.
    pub fn new(retry_count: u32) -> Self {
        Self {
            retry_count,
            delay: RETRY_DELAY,
            quiet: false,
        }
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Do not report failed attempts on stderr.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Number of attempts this policy makes before giving up.
    pub fn attempts(&self) -> u32 {
        self.retry_count.max(1)
    }

    /// Run `fetcher` until it succeeds or the budget is spent, sleeping on
    /// the current thread between attempts.
    pub fn run<F: Fetch + ?Sized>(&self, fetcher: &F, url: &str, timeout: Duration) -> FetchResult {
        self.run_with_pause(fetcher, url, timeout, std::thread::sleep)
    }

    /// Same as [`Retry::run`], with the pause between attempts supplied by
    /// the caller.
    pub fn run_with_pause<F, P>(
        &self,
        fetcher: &F,
        url: &str,
        timeout: Duration,
        mut pause: P,
    ) -> FetchResult
    where
        F: Fetch + ?Sized,
        P: FnMut(Duration),
    {
        let attempts = self.attempts();
        let mut attempt = 1;

        loop {
            match fetcher.execute(url, timeout) {
                Ok(body) => return Ok(body),
                Err(e) if attempt < attempts => {
                    if !self.quiet {
                        output::warning(&format!(
                            "attempt {}/{} failed: {}, retrying in {}s",
                            attempt,
                            attempts,
                            e,
                            self.delay.as_secs_f32()
                        ));
                    }
                    pause(self.delay);
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Fetch `url` over HTTP with up to `retry_count` attempts, one second apart.
pub fn fetch_with_retry(url: &str, timeout: Duration, retry_count: u32) -> FetchResult {
    Retry::new(retry_count).run(&HttpFetcher::new(), url, timeout)
}

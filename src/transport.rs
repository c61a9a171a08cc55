//! Timeout-aware HTTP transport.
//!
//! Wraps construction of a blocking HTTP client so that establishing the
//! connection and reading/writing over it are each bounded by an independent
//! timeout. The read/write timeout is a hard deadline on the whole exchange,
//! not a sliding per-read window.

use std::time::Duration;

/// Default for both the connect and the read/write timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Configuration for a blocking HTTP client with connect and read/write
/// timeouts.
///
/// Both timeouts default to one second. There is no retry logic and no
/// connection pooling beyond what the underlying HTTP stack provides; dial
/// and deadline errors propagate unchanged to the caller.
#[derive(Debug, Clone)]
pub struct TimeoutClient {
    /// Maximum time allowed to establish the connection
    pub connect_timeout: Duration,
    /// Hard deadline for the request once the connection is up
    pub read_write_timeout: Duration,
}

impl Default for TimeoutClient {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_TIMEOUT,
            read_write_timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl TimeoutClient {
    /// Sets the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the read/write deadline.
    pub fn read_write_timeout(mut self, timeout: Duration) -> Self {
        self.read_write_timeout = timeout;
        self
    }

    /// Builds a `reqwest` blocking client with the configured timeouts.
    pub fn build(&self) -> Result<reqwest::blocking::Client, reqwest::Error> {
        reqwest::blocking::Client::builder()
            .connect_timeout(self.connect_timeout)
            .timeout(self.read_write_timeout)
            .build()
    }
}

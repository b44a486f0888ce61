//! Configuration options for the Touchbase client

use std::time::Duration;

/// Configuration options for the Touchbase client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout applied to the underlying HTTP client.
    ///
    /// `None` means no timeout at all, matching the historical behavior of
    /// the client: a hung network call blocks that operation indefinitely.
    /// Callers opt in to a timeout explicitly.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: None,
        }
    }
}

impl ClientOptions {
    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }
}

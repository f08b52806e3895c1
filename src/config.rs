// src/config.rs
// =============================================================================
// Settings shared by every network request this tool makes.
//
// There is no config file: everything comes from the command line, and any
// value the user doesn't supply falls back to the defaults below.
//
// Rust concepts:
// - Default trait: A standard way to say "the normal value for this type"
// - Duration: A typed span of time (no guessing whether a number is ms or s)
// =============================================================================

use std::time::Duration;

/// Browser-like identification sent with every request.
///
/// Some servers refuse or reshape responses for unknown clients, so we look
/// like an ordinary desktop browser.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 6.1; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/72.0.3626.119 Safari/537.36";

/// Per-request timeout used when the user doesn't pass --timeout-ms.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Size of each block written to disk while saving a response body.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

// How every request is made: timeout, identification header and write block size
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub timeout: Duration,
    pub user_agent: String,
    pub chunk_size: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl FetchConfig {
    /// Returns a copy of this config with a different timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// src/logging.rs
// =============================================================================
// Sets up structured logging with `tracing`.
//
// Log lines go to stderr so they never mix with the report (or the --json
// output) printed on stdout. RUST_LOG overrides the default filter.
// =============================================================================

use tracing_subscriber::EnvFilter;

/// Default filter: quiet for dependencies, informative for this crate
const DEFAULT_FILTER: &str = "warn,download_files=info";

/// Default filter when --verbose is passed
const VERBOSE_FILTER: &str = "warn,download_files=debug";

// Installs the global subscriber. Must be called once, before any logging.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

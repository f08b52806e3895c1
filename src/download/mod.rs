// src/download/mod.rs
// =============================================================================
// The download pass: fetch each candidate, filter it, save the matches.
//
// Submodules:
// - executor: The sequential download loop
// - outcome: Per-address outcomes and the aggregated batch result
// - location: Save directory and filename derivation
// =============================================================================

mod executor;
mod location;
mod outcome;

pub use executor::{execute, ExecuteError};
pub use location::save_location;
pub use outcome::BatchResult;

// src/download/outcome.rs
// =============================================================================
// What happened to each candidate address, and the batch that collects them.
//
// Every address ends up as exactly one of:
// - Saved: the body was written to disk
// - Skipped: the filter rejected it (before or after the request)
// - Failed: the request or the file write went wrong
//
// Failures never stop the batch; they're recorded here in the order the
// addresses were processed.
// =============================================================================

use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::fetch::FetchError;
use crate::filter::{FilterSpec, SkipReason};

// Why a single download failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DownloadError {
    /// The request failed (status, timeout, transport or broken body)
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The response arrived but could not be written locally
    #[error("Error writing to file {}: {message}", .path.display())]
    Write { path: PathBuf, message: String },
}

impl DownloadError {
    pub fn write(path: &Path, error: std::io::Error) -> Self {
        DownloadError::Write {
            path: path.to_path_buf(),
            message: error.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DownloadOutcome {
    Saved {
        address: String,
        path: PathBuf,
        bytes: u64,
    },
    Skipped {
        address: String,
        reason: SkipReason,
    },
    Failed {
        address: String,
        #[serde(serialize_with = "as_display")]
        error: DownloadError,
    },
}

fn as_display<T: Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

// The aggregated result of one download pass
#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    /// Extension or MIME category this pass filtered on
    pub filter: String,
    pub save_location: PathBuf,
    pub saved_count: usize,
    pub skipped_count: usize,
    /// Saves that replaced a file written earlier in the same pass
    pub overwritten_count: usize,
    /// One entry per candidate, in processing order
    pub outcomes: Vec<DownloadOutcome>,
    #[serde(skip)]
    saved_paths: HashSet<PathBuf>,
}

impl BatchResult {
    pub fn new(filter: &FilterSpec, save_location: &Path) -> Self {
        Self {
            filter: filter.descriptor().to_string(),
            save_location: save_location.to_path_buf(),
            saved_count: 0,
            skipped_count: 0,
            overwritten_count: 0,
            outcomes: Vec::new(),
            saved_paths: HashSet::new(),
        }
    }

    /// Whether an earlier outcome in this pass was saved to `path`
    pub fn has_saved(&self, path: &Path) -> bool {
        self.saved_paths.contains(path)
    }

    pub fn record(&mut self, outcome: DownloadOutcome) {
        match &outcome {
            DownloadOutcome::Saved { path, .. } => {
                self.saved_count += 1;
                if !self.saved_paths.insert(path.clone()) {
                    self.overwritten_count += 1;
                }
            }
            DownloadOutcome::Skipped { .. } => self.skipped_count += 1,
            DownloadOutcome::Failed { .. } => {}
        }
        self.outcomes.push(outcome);
    }

    /// (address, error) for every failed candidate, in processing order
    pub fn failures(&self) -> Vec<(&str, &DownloadError)> {
        self.outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                DownloadOutcome::Failed { address, error } => Some((address.as_str(), error)),
                _ => None,
            })
            .collect()
    }

    pub fn error_count(&self) -> usize {
        self.outcomes.len() - self.saved_count - self.skipped_count
    }
}

// src/filter/mod.rs
// =============================================================================
// Decides which candidate addresses get saved.
//
// Submodules:
// - category: The enumerated MIME top-level types
// - predicates: The extension and Content-Type matching functions
//
// A FilterSpec is checked at one of two points in the download pass:
// - Extension filters look at the address string, BEFORE any request
// - Content-Type filters look at the response headers, AFTER the request
// =============================================================================

mod category;
mod predicates;

pub use category::ContentCategory;

use predicates::{content_type, content_type_matches, extension_matches};

use reqwest::header::HeaderMap;
use serde::Serialize;
use std::fmt;

// What the user asked to download
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterSpec {
    /// Files whose address ends with ".<extension>" (stored without the dot)
    Extension(String),
    /// Responses whose Content-Type starts with the category token
    ContentType(ContentCategory),
}

// Why a candidate was passed over
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    ExtensionMismatch { extension: String },
    ContentTypeMismatch {
        expected: String,
        found: Option<String>,
    },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::ExtensionMismatch { extension } => {
                write!(f, "address does not end with .{}", extension)
            }
            SkipReason::ContentTypeMismatch {
                expected,
                found: Some(found),
            } => write!(f, "content-type '{}' is not {}", found, expected),
            SkipReason::ContentTypeMismatch {
                expected,
                found: None,
            } => write!(f, "no content-type header (wanted {})", expected),
        }
    }
}

impl FilterSpec {
    /// Builds an extension filter, dropping any leading '.' the user typed
    pub fn extension(raw: &str) -> Self {
        FilterSpec::Extension(raw.trim().trim_start_matches('.').to_string())
    }

    /// The word used in the save directory name: `downloaded_<descriptor>_files`
    pub fn descriptor(&self) -> &str {
        match self {
            FilterSpec::Extension(ext) => ext,
            FilterSpec::ContentType(category) => category.mime_token(),
        }
    }

    /// The extension, for extension filters
    pub fn as_extension(&self) -> Option<&str> {
        match self {
            FilterSpec::Extension(ext) => Some(ext),
            FilterSpec::ContentType(_) => None,
        }
    }

    // Pre-request check. Returns a reason when the address should be skipped
    // without ever being fetched. Content-Type filters always let it through.
    pub fn reject_address(&self, address: &str) -> Option<SkipReason> {
        match self {
            FilterSpec::Extension(ext) if !extension_matches(address, ext) => {
                Some(SkipReason::ExtensionMismatch {
                    extension: ext.clone(),
                })
            }
            _ => None,
        }
    }

    // Post-request check. Returns a reason when the response should be
    // discarded instead of written. Extension filters always let it through.
    pub fn reject_response(&self, headers: &HeaderMap) -> Option<SkipReason> {
        match self {
            FilterSpec::ContentType(category)
                if !content_type_matches(headers, category.mime_token()) =>
            {
                Some(SkipReason::ContentTypeMismatch {
                    expected: category.mime_token().to_string(),
                    found: content_type(headers).map(str::to_string),
                })
            }
            _ => None,
        }
    }
}

impl fmt::Display for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterSpec::Extension(ext) => write!(f, "{}", ext),
            FilterSpec::ContentType(category) => write!(f, "{}", category),
        }
    }
}

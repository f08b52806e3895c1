// src/extract/mod.rs
// =============================================================================
// Turns a web page into a list of candidate download addresses.
//
// Submodules:
// - address: Makes page-relative addresses absolute
// - links: Fetches the page and pulls out <img src> and <a href> values
// =============================================================================

mod address;
mod links;

pub use links::extract_links;

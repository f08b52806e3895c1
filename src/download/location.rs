// src/download/location.rs
// =============================================================================
// Where downloaded files go, and what they're called.
//
// Save directory:  <output_dir>/<page segment>/downloaded_<descriptor>_files
// File name:       last path segment of the FINAL url (after redirects)
//
// URLs don't always have a usable last segment ("http://x.com/",
// "http://x.com/?id=4"), so file names fall back to download_<n>.
// =============================================================================

use std::io;
use std::path::{Path, PathBuf};
use url::Url;

use crate::filter::FilterSpec;

// Builds the save directory for one pass.
//
// Example:
//   output_dir = ".", page_url = "http://example.test/gallery", filter = png
//   -> "./gallery/downloaded_png_files"
pub fn save_location(output_dir: &Path, page_url: &str, filter: &FilterSpec) -> PathBuf {
    let mut path = output_dir.to_path_buf();
    if let Some(segment) = page_segment(page_url) {
        path.push(segment);
    }
    path.push(format!("downloaded_{}_files", filter.descriptor()));
    path
}

/// Names the page: its last non-empty path segment, or the host for a bare
/// site URL. `None` when neither is usable.
pub fn page_segment(page_url: &str) -> Option<String> {
    let url = Url::parse(page_url).ok()?;
    last_segment(&url).or_else(|| url.host_str().map(str::to_string))
}

// Picks the file name for a saved response.
//
// Parameters:
//   final_url: the response URL, after any redirects
//   index: 1-based position of the candidate in the batch
//   filter: used to give fallback names the expected extension
pub fn filename_for(final_url: &Url, index: usize, filter: &FilterSpec) -> String {
    last_segment(final_url).unwrap_or_else(|| match filter.as_extension() {
        Some(ext) => format!("download_{}.{}", index, ext),
        None => format!("download_{}", index),
    })
}

// Creates the save directory (and any missing parents).
//
// An existing directory is fine; anything else (a file in the way, no
// permission, read-only filesystem) is returned to the caller.
pub fn ensure_save_location(path: &Path) -> io::Result<()> {
    std::fs::create_dir_all(path)
}

fn last_segment(url: &Url) -> Option<String> {
    let segment = url.path_segments()?.filter(|s| !s.is_empty()).last()?;
    if segment == "." || segment == ".." || segment.contains(['\\', '\0']) {
        return None;
    }
    Some(segment.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::ContentCategory;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_filename_from_final_url() {
        let filter = FilterSpec::extension("zip");
        assert_eq!(filename_for(&url("http://x.com/files/a.zip"), 1, &filter), "a.zip");
        assert_eq!(
            filename_for(&url("http://x.com/files/a.zip?token=abc#top"), 1, &filter),
            "a.zip"
        );
        assert_eq!(filename_for(&url("http://x.com/dir/"), 1, &filter), "dir");
    }

    #[test]
    fn test_filename_fallback() {
        let ext = FilterSpec::extension("zip");
        let mime = FilterSpec::ContentType(ContentCategory::Image);
        assert_eq!(filename_for(&url("http://x.com/"), 3, &ext), "download_3.zip");
        assert_eq!(filename_for(&url("http://x.com/?id=9"), 4, &mime), "download_4");
    }

    #[test]
    fn test_page_segment() {
        assert_eq!(page_segment("http://x.com/gallery").as_deref(), Some("gallery"));
        assert_eq!(page_segment("http://x.com/a/b/").as_deref(), Some("b"));
        assert_eq!(page_segment("http://x.com/").as_deref(), Some("x.com"));
        assert_eq!(page_segment("http://x.com").as_deref(), Some("x.com"));
        assert_eq!(page_segment("not a url"), None);
    }

    #[test]
    fn test_save_location() {
        let filter = FilterSpec::ContentType(ContentCategory::Audio);
        assert_eq!(
            save_location(Path::new("out"), "http://x.com/music", &filter),
            Path::new("out").join("music").join("downloaded_audio_files")
        );
    }

    #[test]
    fn test_ensure_save_location_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("page").join("downloaded_png_files");
        ensure_save_location(&target).unwrap();
        ensure_save_location(&target).unwrap();
        assert!(target.is_dir());
    }

    #[test]
    fn test_ensure_save_location_blocked_by_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("page");
        std::fs::write(&blocker, b"not a directory").unwrap();
        assert!(ensure_save_location(&blocker.join("downloaded_png_files")).is_err());
    }
}

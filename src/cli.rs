// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// There are no subcommands: one invocation targets one page. Whatever the
// user leaves out (the URL, or both filters) is asked for interactively.
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

use crate::filter::ContentCategory;

// #[derive(Parser)] generates the parsing code, --help and --version
#[derive(Parser, Debug)]
#[command(
    name = "download-files",
    version,
    about = "Download all files of a given extension or MIME Content-Type linked from a web page",
    long_about = "download-files fetches a single web page, collects the addresses of its \
                  <a href> and <img src> elements, and downloads the ones matching a file \
                  extension and/or a MIME Content-Type. Links are not followed recursively."
)]
pub struct Cli {
    /// The URL to download from (prompted for if omitted)
    ///
    /// http:// is assumed when no scheme is given
    #[arg(short, long)]
    pub url: Option<String>,

    /// Specific file extension to download (e.g. png, .zip)
    #[arg(short = 'f', long)]
    pub file_extension: Option<String>,

    /// The MIME Content-Type to download
    ///
    /// Matched against the start of each response's Content-Type header
    #[arg(short = 'c', long, value_enum, ignore_case = true)]
    pub content_type: Option<ContentCategory>,

    /// Base directory for the downloaded_<type>_files folders
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Don't ask for confirmation when both filters are given
    #[arg(short, long)]
    pub yes: bool,

    /// Output the download report in JSON format
    #[arg(long)]
    pub json: bool,

    /// Per-request timeout in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub timeout_ms: u64,

    /// Log every request and skipped link
    #[arg(short, long)]
    pub verbose: bool,
}

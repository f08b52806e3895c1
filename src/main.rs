// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Ask for anything left out (URL, what to download)
// 3. Extract candidate links from the page, once
// 4. Run one download pass per filter and print a report for each
// 5. Exit with proper code:
//      0 = passes completed (individual download failures are only tallied)
//      1 = nothing could be downloaded (page fetch failed, save dir failed)
//      2 = unexpected error (e.g. stdin closed while prompting)
// =============================================================================

mod cli;
mod config;
mod download;
mod extract;
mod fetch;
mod filter;
mod logging;
mod prompt;

use anyhow::{bail, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use cli::Cli;
use config::FetchConfig;
use download::{BatchResult, ExecuteError};
use filter::{ContentCategory, FilterSpec};
use prompt::MenuChoice;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// What one invocation will do
#[derive(Debug, Clone, PartialEq, Eq)]
struct Plan {
    /// Extension used to pre-filter links during extraction
    prefilter: Option<String>,
    /// Download passes, run in order over the same candidates
    passes: Vec<FilterSpec>,
}

// Everything a pass needs besides its filter
struct Job {
    config: FetchConfig,
    url: String,
    output_dir: PathBuf,
    json: bool,
}

impl Job {
    // Progress chatter goes to `out`, except in --json mode where stdout
    // must only carry the report
    fn say<W: Write>(&self, out: &mut W, message: &str) -> io::Result<()> {
        if !self.json {
            writeln!(out, "{}", message)?;
        }
        Ok(())
    }
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    // All prompting happens up front, before any network traffic
    let (url, plan) = {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut output = io::stdout();

        let raw_url = match &cli.url {
            Some(url) => url.clone(),
            None => prompt::ask(&mut input, &mut output, "\nURL to target")?,
        };

        let plan = choose_plan(
            cli.file_extension.as_deref(),
            cli.content_type,
            cli.yes,
            &mut input,
            &mut output,
        )?;
        (ensure_scheme(&raw_url), plan)
    };

    let plan = match plan {
        Some(plan) => plan,
        None => {
            println!("Nothing to download.");
            return Ok(0);
        }
    };

    let job = Job {
        config: FetchConfig::default().with_timeout(Duration::from_millis(cli.timeout_ms)),
        url,
        output_dir: cli.output_dir,
        json: cli.json,
    };

    let all_ok = run_plan(&job, &plan, &mut io::stdout()).await?;
    Ok(if all_ok { 0 } else { 1 })
}

// Adds http:// when the user typed a bare host ("example.com/page").
// Other schemes (ftp://, ...) aren't expected and get no special treatment.
fn ensure_scheme(url: &str) -> String {
    let url = url.trim();
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("http://{}", url.trim_start_matches('/'))
    }
}

// Turns the filter options (or the interactive menu) into a Plan.
//
// Returns Ok(None) when the user quits from the menu or declines the
// confirmation for downloading by extension AND content-type.
fn choose_plan<R: BufRead, W: Write>(
    file_extension: Option<&str>,
    content_type: Option<ContentCategory>,
    assume_yes: bool,
    input: &mut R,
    output: &mut W,
) -> Result<Option<Plan>> {
    let extension = file_extension.map(FilterSpec::extension);

    let plan = match (extension, content_type) {
        (Some(extension), Some(category)) => {
            let question = format!(
                "You have selected to download {} files and all {} files. Is this correct?",
                extension, category
            );
            if !assume_yes && !prompt::confirm(input, output, &question)? {
                return Ok(None);
            }
            Plan {
                prefilter: extension.as_extension().map(str::to_string),
                passes: vec![extension, FilterSpec::ContentType(category)],
            }
        }
        (Some(extension), None) => Plan {
            prefilter: extension.as_extension().map(str::to_string),
            passes: vec![extension],
        },
        (None, Some(category)) => Plan {
            prefilter: None,
            passes: vec![FilterSpec::ContentType(category)],
        },
        (None, None) => {
            writeln!(output, "\nYou didn't specify what type of content to download!")?;
            match prompt::menu(input, output)? {
                MenuChoice::Extension => {
                    let answer = prompt::ask(
                        input,
                        output,
                        "Enter the file extension you wish to download (e.g. wav, jpg, png)",
                    )?;
                    let extension = FilterSpec::extension(&answer);
                    Plan {
                        prefilter: extension.as_extension().map(str::to_string),
                        passes: vec![extension],
                    }
                }
                MenuChoice::ContentType => Plan {
                    prefilter: None,
                    passes: vec![FilterSpec::ContentType(prompt::ask_category(input, output)?)],
                },
                MenuChoice::Quit => return Ok(None),
            }
        }
    };

    if plan.prefilter.as_deref() == Some("") {
        bail!("the file extension must not be empty");
    }

    Ok(Some(plan))
}

// Extracts the page's links once, then runs every pass over them.
//
// Returns: true if every pass got to run, false if any pass was fatal
async fn run_plan<W: Write>(job: &Job, plan: &Plan, out: &mut W) -> Result<bool> {
    job.say(out, &format!("having a look at {}...", job.url))?;
    match &plan.prefilter {
        Some(extension) => job.say(out, &format!("Getting links for {} files...", extension))?,
        None => job.say(out, "Getting links...")?,
    }

    let candidates = extract::extract_links(&job.config, &job.url, plan.prefilter.as_deref()).await;
    if let Err(err) = &candidates {
        eprintln!("\n❌ {}\n", err);
    }

    let mut all_ok = true;

    for filter in &plan.passes {
        let save_location = download::save_location(&job.output_dir, &job.url, filter);

        // Announced before the pass runs, unless there is nothing to run
        if candidates.is_ok() {
            job.say(out, &format!("\n⬇️  I'm going to download some {} files!\n", filter))?;
        }

        match download::execute(&job.config, &candidates, filter, &save_location).await {
            Ok(batch) => print_report(&batch, job.json, out)?,
            Err(ExecuteError::NoLinksFound(_)) => {
                eprintln!("No links with {} found on the supplied URL.\n", filter);
                all_ok = false;
            }
            Err(err) => {
                eprintln!("❌ {}", err);
                all_ok = false;
            }
        }
    }

    Ok(all_ok)
}

// Prints one pass's report either as a summary or as JSON
fn print_report<W: Write>(batch: &BatchResult, json: bool, out: &mut W) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(batch)?;
        writeln!(out, "{}", json_output)?;
    } else {
        print_summary(batch, out)?;
    }
    Ok(())
}

fn print_summary<W: Write>(batch: &BatchResult, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "📊 Summary for {} files ({}):",
        batch.filter,
        batch.save_location.display()
    )?;
    writeln!(out, "   ✅ Saved: {}", batch.saved_count)?;
    if batch.overwritten_count > 0 {
        writeln!(out, "   ♻️  Overwritten: {}", batch.overwritten_count)?;
    }
    writeln!(out, "   ⏭️  Skipped: {}", batch.skipped_count)?;
    writeln!(out, "   ❌ Failed: {}", batch.error_count())?;
    writeln!(out, "   📋 Total: {}", batch.outcomes.len())?;

    let failures = batch.failures();
    if !failures.is_empty() {
        writeln!(out, "\nThere were {} errors:", failures.len())?;
        for (address, error) in failures {
            writeln!(out, "Address: {}", address)?;
            writeln!(out, "{}", error)?;
        }
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan_from(
        extension: Option<&str>,
        category: Option<ContentCategory>,
        yes: bool,
        answers: &str,
    ) -> Option<Plan> {
        let mut input = answers.as_bytes();
        choose_plan(extension, category, yes, &mut input, &mut io::sink()).unwrap()
    }

    #[test]
    fn test_ensure_scheme() {
        assert_eq!(ensure_scheme("example.com/page"), "http://example.com/page");
        assert_eq!(ensure_scheme("//example.com"), "http://example.com");
        assert_eq!(ensure_scheme("https://example.com"), "https://example.com");
        assert_eq!(ensure_scheme(" http://example.com "), "http://example.com");
    }

    #[test]
    fn test_plan_extension_only() {
        let plan = plan_from(Some(".png"), None, false, "").unwrap();
        assert_eq!(plan.prefilter.as_deref(), Some("png"));
        assert_eq!(plan.passes, vec![FilterSpec::Extension("png".into())]);
    }

    #[test]
    fn test_plan_content_type_only_has_no_prefilter() {
        let plan = plan_from(None, Some(ContentCategory::Text), false, "").unwrap();
        assert_eq!(plan.prefilter, None);
        assert_eq!(plan.passes, vec![FilterSpec::ContentType(ContentCategory::Text)]);
    }

    #[test]
    fn test_plan_both_requires_confirmation() {
        assert_eq!(
            plan_from(Some("jpg"), Some(ContentCategory::Image), false, "n\n"),
            None
        );

        let plan = plan_from(Some("jpg"), Some(ContentCategory::Image), false, "y\n").unwrap();
        assert_eq!(plan.prefilter.as_deref(), Some("jpg"));
        assert_eq!(
            plan.passes,
            vec![
                FilterSpec::Extension("jpg".into()),
                FilterSpec::ContentType(ContentCategory::Image)
            ]
        );

        // --yes skips the question entirely (no input needed)
        assert!(plan_from(Some("jpg"), Some(ContentCategory::Image), true, "").is_some());
    }

    #[test]
    fn test_plan_from_menu() {
        let plan = plan_from(None, None, false, "1\n.wav\n").unwrap();
        assert_eq!(plan.passes, vec![FilterSpec::Extension("wav".into())]);

        let plan = plan_from(None, None, false, "2\nvideo\n").unwrap();
        assert_eq!(plan.passes, vec![FilterSpec::ContentType(ContentCategory::Video)]);

        assert_eq!(plan_from(None, None, false, "3\n"), None);
    }

    #[test]
    fn test_plan_rejects_empty_extension() {
        let mut input = "".as_bytes();
        assert!(choose_plan(Some("."), None, false, &mut input, &mut io::sink()).is_err());
    }

    #[tokio::test]
    async fn test_run_plan_end_to_end() {
        let mut server = mockito::Server::new_async().await;
        let _page = server
            .mock("GET", "/page")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(r#"<a href="/files/a.zip">a</a><a href="/files/b.txt">b</a>"#)
            .create_async()
            .await;
        let _zip = server
            .mock("GET", "/files/a.zip")
            .with_status(200)
            .with_header("content-type", "application/zip")
            .with_body("PK\x03\x04")
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let job = Job {
            config: FetchConfig::default(),
            url: format!("{}/page", server.url()),
            output_dir: dir.path().to_path_buf(),
            json: true,
        };
        let plan = Plan {
            prefilter: Some("zip".into()),
            passes: vec![
                FilterSpec::Extension("zip".into()),
                FilterSpec::ContentType(ContentCategory::Application),
            ],
        };

        assert!(run_plan(&job, &plan, &mut io::sink()).await.unwrap());

        let page_dir = dir.path().join("page");
        assert_eq!(
            std::fs::read(page_dir.join("downloaded_zip_files").join("a.zip")).unwrap(),
            b"PK\x03\x04"
        );
        assert!(page_dir
            .join("downloaded_application_files")
            .join("a.zip")
            .is_file());
    }

    #[tokio::test]
    async fn test_run_plan_announces_pass_before_it_runs() {
        let mut server = mockito::Server::new_async().await;
        let _page = server
            .mock("GET", "/page")
            .with_status(200)
            .with_body(r#"<img src="/cat.png">"#)
            .create_async()
            .await;
        let _cat = server
            .mock("GET", "/cat.png")
            .with_status(200)
            .with_body("png")
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let job = Job {
            config: FetchConfig::default(),
            url: format!("{}/page", server.url()),
            output_dir: dir.path().to_path_buf(),
            json: false,
        };
        let plan = Plan {
            prefilter: Some("png".into()),
            passes: vec![FilterSpec::Extension("png".into())],
        };

        let mut out = Vec::new();
        assert!(run_plan(&job, &plan, &mut out).await.unwrap());

        let text = String::from_utf8(out).unwrap();
        let banner = text.find("I'm going to download some png files!").unwrap();
        let summary = text.find("Summary for png files").unwrap();
        assert!(banner < summary);
        assert!(text.contains("✅ Saved: 1"));
    }

    #[tokio::test]
    async fn test_run_plan_page_unreachable() {
        let dir = tempfile::tempdir().unwrap();
        let job = Job {
            config: FetchConfig::default(),
            url: "http://127.0.0.1:1/page".to_string(),
            output_dir: dir.path().to_path_buf(),
            json: true,
        };
        let plan = Plan {
            prefilter: Some("zip".into()),
            passes: vec![FilterSpec::Extension("zip".into())],
        };

        let mut out = Vec::new();
        assert!(!run_plan(&job, &plan, &mut out).await.unwrap());
        assert!(!dir.path().join("page").exists());
        // No pass is announced when there is nothing to download
        assert!(out.is_empty());
    }
}

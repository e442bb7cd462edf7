//! `gleaner` is the diagnostic command-line front end for `gleaner-lib`.
//!
//! It fetches a single page, runs the HTML link extractor over the
//! response, and prints each discovered outlink as `target HOP context`:
//!
//! ```sh
//! gleaner https://example.com/
//! gleaner --robots ignore https://example.com/
//! ```
//!
//! Exits 0 on success and 1 on usage or fetch errors.
#![warn(clippy::all, clippy::pedantic)]

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use clap::error::ErrorKind as ClapErrorKind;
use gleaner_lib::{Document, ExtractorOptions, HtmlExtractor, Recorder};

mod options;

use options::Options;

fn main() -> ExitCode {
    env_logger::init();
    let options = match Options::try_parse() {
        Ok(options) => options,
        Err(e) => {
            let code = match e.kind() {
                ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };
    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("gleaner: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(options: &Options) -> Result<()> {
    let response = reqwest::blocking::get(&options.url)
        .with_context(|| format!("failed to fetch {}", options.url))?;

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("text/html")
        .to_string();
    // resolve against where we actually landed, not where we started
    let final_url = response.url().clone();
    let body = response
        .bytes()
        .context("failed to read response body")?
        .to_vec();

    let mut doc = Document::new(final_url, content_type, Recorder::from_bytes(body));
    let extractor = HtmlExtractor::new(ExtractorOptions {
        robots_policy: options.robots,
        ..ExtractorOptions::default()
    });
    extractor.extract(&mut doc);

    for link in doc.outlinks() {
        println!("{link}");
    }
    Ok(())
}

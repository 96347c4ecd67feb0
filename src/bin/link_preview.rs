//! Command-line link preview.
//!
//! Prints one JSON object per URL on stdout. With `--stdin`, the HTML is
//! read from stdin instead of being fetched, and the single URL argument is
//! only used as the fallback canonical URL.
//!
//! Log verbosity follows `RUST_LOG` (default `warn`), written to stderr.

use link_preview::PreviewExtractor;
use std::io::{self, Read};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: link-preview <URL>...\n       link-preview --stdin [URL]";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        None | Some("-h" | "--help") => {
            eprintln!("{USAGE}");
            ExitCode::from(2)
        }
        Some("--stdin") => preview_stdin(args.get(1).map(String::as_str)),
        Some(_) => preview_urls(&args),
    }
}

fn preview_stdin(url: Option<&str>) -> ExitCode {
    let mut html = Vec::new();
    if io::stdin().read_to_end(&mut html).is_err() {
        eprintln!("Failed to read from stdin");
        return ExitCode::FAILURE;
    }

    let mut extractor = PreviewExtractor::new(None);
    extractor.load_html(url, &html);
    println!("{}", serde_json::to_string(&extractor.preview()).unwrap_or_default());
    ExitCode::SUCCESS
}

fn preview_urls(urls: &[String]) -> ExitCode {
    let mut extractor = PreviewExtractor::new(None);
    let mut failed = false;

    for url in urls {
        if let Err(err) = extractor.try_fetch(Some(url.as_str())) {
            eprintln!("{url}: {err}");
            failed = true;
            continue;
        }
        println!("{}", serde_json::to_string(&extractor.preview()).unwrap_or_default());
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

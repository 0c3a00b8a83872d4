//! Simple CLI that reads HTML from stdin and prints the extraction report as
//! JSON on stdout.
//!
//! Usage: `extract_stdin <base-url> < page.html`
//!
//! Logs go to stderr; set `RUST_LOG` (e.g. `RUST_LOG=rs_news_extract=debug`)
//! to see strategy counts and fallback decisions.

use std::io::{self, Read};

use rs_news_extract::{extract_articles, Options};
use tracing::{error, info};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();

    let Some(base_url) = std::env::args().nth(1) else {
        error!("missing base URL argument");
        eprintln!("usage: extract_stdin <base-url> < page.html");
        std::process::exit(2);
    };

    let mut html = String::new();
    if let Err(err) = io::stdin().read_to_string(&mut html) {
        error!(%err, "failed to read from stdin");
        std::process::exit(1);
    }

    let report = extract_articles(&html, &base_url, &Options::default());
    info!(records = report.len(), used_readability = report.used_readability, "done");

    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            error!(%err, "failed to serialize report");
            std::process::exit(1);
        }
    }
}

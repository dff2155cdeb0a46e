//! KrackedRepo CLI - repo-to-MVP synthesis from the command line.
//!
//! Scans a directory tree, sends the collected file previews to the
//! generative backend, and prints the synthesized report as pretty JSON
//! on stdout. All diagnostics go to stderr; the exit code is 1 whenever
//! no report was produced.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use krackedrepo_core::logging::{self, LogLevel};
use krackedrepo_core::{collect_files, CollectorConfig};
use krackedrepo_llm::{FallbackPlan, GeminiClient, RepoAnalyzer};

const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Parser)]
#[command(name = "krackedrepo")]
#[command(about = "KrackedRepo - Convert a repository into a structured MVP showcase")]
#[command(version)]
struct Cli {
    /// Directory tree to analyze
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Google AI Studio API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Override the model fallback order (repeatable, tried in order)
    #[arg(short = 'm', long = "model")]
    models: Vec<String>,

    /// Per-attempt request timeout in seconds (unbounded when omitted)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Base URL of the generative API
    #[arg(long, default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Additional file extensions to collect (repeatable, e.g. --ext rs)
    #[arg(long = "ext")]
    extensions: Vec<String>,

    /// Fail the scan on unreadable files instead of skipping them
    #[arg(long)]
    strict_read: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Worker failed: {message}");
    std::process::exit(1);
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let level = if cli.debug {
        LogLevel::Debug
    } else {
        LogLevel::Warning
    };
    if let Err(err) = logging::init(level) {
        eprintln!("warning: {err}");
    }

    let mut config = CollectorConfig::default();
    config.extensions.extend(cli.extensions.iter().cloned());
    if cli.strict_read {
        config.skip_unreadable = false;
    }

    let files = match collect_files(&cli.path, &config) {
        Ok(files) => files,
        Err(err) => fail(err),
    };

    if files.is_empty() {
        eprintln!("No files found to analyze. Pass a path like `krackedrepo ./path/to/repo`");
        std::process::exit(1);
    }

    let Some(api_key) = cli.api_key.filter(|key| !key.is_empty()) else {
        fail("GEMINI_API_KEY environment variable is not set");
    };

    println!(
        "Collected {} files from {}. Sending to Gemini...",
        files.len(),
        cli.path.display()
    );

    let mut client = GeminiClient::new(api_key).with_base_url(cli.api_url.clone());
    if let Some(secs) = cli.timeout_secs {
        client = client.with_request_timeout(Duration::from_secs(secs));
    }

    let analyzer = if cli.models.is_empty() {
        RepoAnalyzer::new(client)
    } else {
        match FallbackPlan::new(cli.models.clone()) {
            Ok(plan) => RepoAnalyzer::with_plan(client, plan),
            Err(err) => fail(err),
        }
    };

    match analyzer.convert(&files).await {
        Ok(report) => match serde_json::to_string_pretty(&report) {
            Ok(rendered) => {
                println!("\n=== Synthesis result ===\n");
                println!("{rendered}");
            }
            Err(err) => fail(err),
        },
        Err(err) => fail(err),
    }
}

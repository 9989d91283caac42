//! hn-digest main entry point
//!
//! This is the command-line interface for the Hacker News digest builder.

use anyhow::Context;
use clap::Parser;
use hn_digest::config::{load_config, validate, Config, DriverKind};
use hn_digest::output::print_statistics;
use hn_digest::Coordinator;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// hn-digest: Hacker News top stories digest
///
/// Scrapes the top stories from the Hacker News front page, fetches the
/// top comment of each (unless skipped), and writes out.json, out.csv and
/// digest.md to the output directory.
#[derive(Parser, Debug)]
#[command(name = "hn-digest")]
#[command(version = "1.0.0")]
#[command(about = "Hacker News top stories digest", long_about = None)]
struct Cli {
    /// Number of stories to extract
    #[arg(long, value_name = "N")]
    limit: Option<usize>,

    /// Output directory
    #[arg(long, value_name = "PATH")]
    output_dir: Option<PathBuf>,

    /// Run the browser with a visible window
    #[arg(long)]
    headful: bool,

    /// Selector wait timeout (milliseconds)
    #[arg(long, value_name = "MS")]
    timeout: Option<u64>,

    /// Skip fetching top comments
    #[arg(long)]
    skip_comments: bool,

    /// Minimum delay between requests (seconds)
    #[arg(long, value_name = "SEC")]
    min_delay: Option<f64>,

    /// Maximum delay between requests (seconds)
    #[arg(long, value_name = "SEC")]
    max_delay: Option<f64>,

    /// Attempts per discussion page (1 disables retrying)
    #[arg(long, value_name = "N")]
    retries: Option<u32>,

    /// Base of the exponential backoff between attempts
    #[arg(long, value_name = "F")]
    backoff_factor: Option<f64>,

    /// Page driver backend
    #[arg(long, value_enum)]
    driver: Option<DriverArg>,

    /// Site root to scrape
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Path to a TOML configuration file
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Show the resolved configuration without fetching anything
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum DriverArg {
    Chrome,
    Http,
}

impl From<DriverArg> for DriverKind {
    fn from(arg: DriverArg) -> Self {
        match arg {
            DriverArg::Chrome => DriverKind::Chrome,
            DriverArg::Http => DriverKind::Http,
        }
    }
}

impl Cli {
    /// Overlays command-line values on a file or default configuration
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(limit) = self.limit {
            config.site.limit = limit;
        }
        if let Some(timeout) = self.timeout {
            config.site.timeout_ms = timeout;
        }
        if let Some(base_url) = &self.base_url {
            config.site.base_url = base_url.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            config.output.output_dir = output_dir.clone();
        }
        if self.headful {
            config.browser.headful = true;
        }
        if let Some(driver) = self.driver {
            config.browser.driver = driver.into();
        }
        if self.skip_comments {
            config.comments.skip = true;
        }
        if let Some(retries) = self.retries {
            config.comments.retries = retries;
        }
        if let Some(backoff_factor) = self.backoff_factor {
            config.comments.backoff_factor = backoff_factor;
        }
        if let Some(min_delay) = self.min_delay {
            config.pacing.min_delay = min_delay;
        }
        if let Some(max_delay) = self.max_delay {
            config.pacing.max_delay = max_delay;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };
    cli.apply_overrides(&mut config);
    validate(&config).context("Invalid configuration")?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_digest(config, cli.quiet).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("hn_digest=info,warn"),
            1 => EnvFilter::new("hn_digest=debug,info"),
            2 => EnvFilter::new("hn_digest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows what a run would do
fn handle_dry_run(config: &Config) {
    println!("=== hn-digest Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  Story limit: {}", config.site.limit);
    println!("  Wait timeout: {}ms", config.site.timeout_ms);

    println!("\nBrowser:");
    println!("  Driver: {}", config.browser.driver);
    println!(
        "  Mode: {}",
        if config.browser.headful { "headful" } else { "headless" }
    );
    println!("  User agent: {}", config.browser.user_agent);

    println!("\nComments:");
    if config.comments.skip {
        println!("  Skipped");
    } else {
        println!("  Attempts: {}", config.comments.retries);
        println!("  Backoff factor: {}", config.comments.backoff_factor);
        println!(
            "  Delay: {:.1}s - {:.1}s",
            config.pacing.min_delay, config.pacing.max_delay
        );
    }

    println!("\nOutput:");
    println!("  Directory: {}", config.output.output_dir.display());

    println!("\n✓ Configuration is valid");
}

/// Handles the main digest operation
async fn handle_digest(config: Config, quiet: bool) -> anyhow::Result<()> {
    let output_dir = config.output.output_dir.clone();

    let mut coordinator = Coordinator::new(config);
    let report = match coordinator.run().await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Digest failed: {}", e);
            return Err(e.into());
        }
    };

    if !quiet {
        print_statistics(&report.statistics);
        println!("✓ Done. Outputs written to '{}/'", output_dir.display());
    }

    Ok(())
}

//! prodscrape main entry point
//!
//! This is the command-line front end: it submits one product URL to the
//! scrape service, shows the record, and writes the requested exports.

use clap::Parser;
use prodscrape::config::{load_or_default, Config};
use prodscrape::export::{export_record, DirectorySink, ExportFormat};
use prodscrape::session::{ScrapeSession, SessionHandle, SessionStatus, TracingNotifier};
use prodscrape::{HttpScrapeClient, UrlRules};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// prodscrape: scrape a product page and export it
///
/// The URL is sent to the configured scrape service. On success the product
/// record is printed and saved as CSV and/or XLSX.
#[derive(Parser, Debug)]
#[command(name = "prodscrape")]
#[command(version)]
#[command(about = "Scrape a product page and export it", long_about = None)]
struct Cli {
    /// Product page URL
    #[arg(value_name = "URL")]
    url: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the delimited-text export
    #[arg(long)]
    csv: bool,

    /// Write the spreadsheet export
    #[arg(long)]
    xlsx: bool,

    /// Directory to write exports into (overrides the config)
    #[arg(short, long, value_name = "DIR")]
    out: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match load_or_default(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };
    tracing::debug!("Scrape endpoint: {}", config.endpoint.scrape_url());

    let handle = build_session(&config)?;
    handle.set_input_url(cli.url.as_str());

    let status = handle.submit_input().await?;
    if status != SessionStatus::Succeeded {
        return Err(format!("scrape of {} failed", cli.url).into());
    }

    let Some(record) = handle.exportable_record() else {
        return Ok(());
    };
    if !cli.quiet {
        println!("{}", record);
    }

    let out_dir = cli
        .out
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.export.output_dir));
    let sink = DirectorySink::new(out_dir);

    for (format, filename) in requested_formats(&cli, &config) {
        if export_record(Some(record.as_ref()), format, &filename, &sink)?.is_some() && !cli.quiet {
            println!("✓ Saved {}", sink.path_for(&filename).display());
        }
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("prodscrape=info,warn"),
            1 => EnvFilter::new("prodscrape=debug,info"),
            2 => EnvFilter::new("prodscrape=trace,debug"),
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

/// Wires the session to the HTTP scrape client and the tracing notifier
fn build_session(config: &Config) -> Result<SessionHandle, Box<dyn std::error::Error>> {
    let client = HttpScrapeClient::new(config)?;
    let session = ScrapeSession::new(
        UrlRules::from(&config.validator),
        Arc::new(TracingNotifier),
    );
    Ok(SessionHandle::new(session, Arc::new(client)))
}

/// Export formats to write; both when neither flag is given
fn requested_formats(cli: &Cli, config: &Config) -> Vec<(ExportFormat, String)> {
    let both = !cli.csv && !cli.xlsx;
    let mut formats = Vec::new();

    if cli.csv || both {
        formats.push((ExportFormat::DelimitedText, config.export.csv_filename.clone()));
    }
    if cli.xlsx || both {
        formats.push((ExportFormat::Spreadsheet, config.export.xlsx_filename.clone()));
    }

    formats
}

mod output;

use anyhow::Context;
use asokit_core::{AppConfig, Platform};
use asokit_scraper::{
    analyze_gplay, analyze_ios, ChromiumSession, IosClient, PlayStoreScraper, Progress,
    RunOptions,
};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::output::OutputFormat;

const EXAMPLES: &str = "\
Examples:
  asokit \"soccer,football\" --platform gplay
  asokit \"soccer,football\" --platform gplay --app-id com.sofascore.app
  asokit \"soccer,football\" --platform ios --country US --app-id 1176147574";

#[derive(Debug, Parser)]
#[command(name = "asokit")]
#[command(about = "ASO keyword analyzer: keyword popularity and app rank from Google Play and the App Store")]
#[command(after_help = EXAMPLES)]
struct Cli {
    /// Comma-separated list of keywords to analyze
    keywords: String,

    /// Platform to analyze: gplay (Google Play) or ios (App Store)
    #[arg(short, long, value_enum)]
    platform: PlatformArg,

    /// Your app's ID to check ranking (package name or numeric track id)
    #[arg(short, long)]
    app_id: Option<String>,

    /// Country code
    #[arg(short, long, default_value = "US")]
    country: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PlatformArg {
    /// Google Play (headless Chrome)
    Gplay,
    /// iOS App Store (HTTP)
    Ios,
}

impl From<PlatformArg> for Platform {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Gplay => Platform::Gplay,
            PlatformArg::Ios => Platform::Ios,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = asokit_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let report = run(&cli, &config).await?;
    println!("{report}");
    Ok(())
}

/// Analyse the requested keywords and return the rendered report.
///
/// # Errors
///
/// Fails when the keyword list is empty, when the browser cannot be started
/// for a Google Play run, or when a configured endpoint is invalid. Per-keyword
/// fetch failures never fail the run.
async fn run(cli: &Cli, config: &AppConfig) -> anyhow::Result<String> {
    let keywords = asokit_core::parse_keywords(&cli.keywords)?;
    let platform = Platform::from(cli.platform);
    let country = platform.normalize_country(&cli.country);
    let options = RunOptions {
        app_id: cli
            .app_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty()),
        country: &country,
    };

    let records = match platform {
        Platform::Gplay => {
            let scraper = PlayStoreScraper::new(&config.gplay)?;
            eprintln!("Starting Chrome browser for Google Play analysis...");
            let browser = ChromiumSession::launch(&config.browser)
                .await
                .context("browser automation is unavailable; install Chrome or Chromium or set ASOKIT_CHROME_EXECUTABLE")?;
            let records = analyze_gplay(
                browser,
                &scraper,
                &config.scoring,
                &keywords,
                options,
                report_progress,
            )
            .await;
            eprintln!("Chrome browser closed.");
            records
        }
        Platform::Ios => {
            let client = IosClient::new(&config.ios)?;
            eprintln!("Analyzing iOS App Store keywords...");
            analyze_ios(&client, &config.scoring, &keywords, options, report_progress).await
        }
    };

    tracing::debug!(records = records.len(), %platform, "analysis finished");
    Ok(output::render(&records, cli.output)?)
}

fn report_progress(progress: Progress<'_>) {
    eprintln!("  {progress}");
}

#[cfg(test)]
mod tests;

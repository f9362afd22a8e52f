//! Mapstitch CLI - Command-line interface
//!
//! Parses the invocation arguments, initializes logging, builds the Tokio
//! runtime, and hands off to the library pipeline. The exit status only
//! communicates success or fatal failure; tile gaps are reported through
//! log messages.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

use mapstitch::{AppConfig, AppError, RunSummary};

#[derive(Parser)]
#[command(name = "mapstitch", version, about)]
struct Args {
    /// Path to the job file: one line `lat1, lon1, lat2, lon2, zoom`
    #[arg(short, long, default_value = "config.csv")]
    config: PathBuf,

    /// Directory for downloaded tile files
    #[arg(long, default_value = "tiles")]
    tiles_dir: PathBuf,

    /// Directory for the mosaic and GeoTIFF outputs
    #[arg(long, default_value = "map")]
    output_dir: PathBuf,

    /// Maximum number of tile downloads in flight
    #[arg(long, default_value_t = 10)]
    concurrency: usize,

    /// Verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbosity: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(match args.verbosity {
            0 => tracing::Level::INFO,
            1 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        })
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default tracing subscriber failed");

    let config = AppConfig::new()
        .with_job_file(args.config)
        .with_tiles_dir(args.tiles_dir)
        .with_output_dir(args.output_dir)
        .with_fetch_concurrency(args.concurrency);

    match execute(&config) {
        Ok(summary) => {
            info!(
                mosaic = %summary.mosaic_path.display(),
                geotiff = %summary.geotiff_path.display(),
                tiles_fetched = summary.tiles_fetched,
                gaps = summary.gaps,
                "done"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn execute(config: &AppConfig) -> Result<RunSummary, AppError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| AppError::RuntimeCreation(e.to_string()))?;

    runtime.block_on(mapstitch::run(config))
}

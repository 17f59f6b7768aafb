//! Laundry Monitor - Entry Point
//!
//! Polls one laundry room every minute and writes its status page, latest
//! snapshot and raw data log for a static file server.

use clap::Parser;
use tracing::{error, info};

use laundry_monitor::app::options::AppOptions;
use laundry_monitor::app::run::run;
use laundry_monitor::filesys::file::File;
use laundry_monitor::logs::{init_logging, LogLevel, LogOptions};
use laundry_monitor::storage::settings::{settings_path, Settings};
use laundry_monitor::utils::version_info;

/// Room the monitor watches when none is given
const DEFAULT_ROOM_NUMBER: u32 = 5015;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Room number to monitor
    #[arg(default_value_t = DEFAULT_ROOM_NUMBER)]
    room_number: u32,

    /// Report every cycle on stdout
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Retrieve the settings file
    let settings_file = File::new(settings_path());
    let settings = match Settings::load(&settings_file).await {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!(
                "Unable to read settings file {}: {}",
                settings_file.path().display(),
                e
            );
            return;
        }
    };

    // Initialize logging
    let mut log_level = settings.log_level.clone();
    if cli.verbose {
        log_level = log_level.at_least(LogLevel::Debug);
    }
    let log_options = LogOptions {
        log_level,
        log_dir: settings.log_dir.clone(),
        ..Default::default()
    };
    let _log_guard = match init_logging(log_options) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            None
        }
    };

    let options = match AppOptions::from_settings(&settings, cli.room_number, cli.verbose) {
        Ok(options) => options,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return;
        }
    };

    let version = version_info();
    info!(
        "Running laundry monitor {} ({}) for room {}",
        version.version, version.git_hash, cli.room_number
    );

    if let Err(e) = run(options, await_shutdown_signal()).await {
        error!("Failed to run the monitor: {e}");
    }
}

async fn await_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(sigterm) => sigterm,
            Err(e) => {
                error!("Unable to listen for SIGTERM: {e}");
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };

        tokio::select! {
            _ = sigterm.recv() => {
                info!("SIGTERM received, shutting down...");
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Ctrl+C received, shutting down...");
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
        info!("Ctrl+C received, shutting down...");
    }
}

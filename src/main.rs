//! dbstruct - Main entry point.
//!
//! Generates a Go struct from a database table's columns and prints it to
//! standard output. Progress and diagnostics are logged to standard error.

use clap::Parser;
use dbstruct::{Config, Generator};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the tracing subscriber for logging.
fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if config.json_logs {
        subscriber
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse configuration from command line and environment
    let config = Config::parse();

    // Initialize logging
    init_tracing(&config);

    info!(
        config = %config.config_path,
        profile = %config.profile,
        "Starting dbstruct v{}",
        env!("CARGO_PKG_VERSION")
    );

    let mut generator = Generator::new();
    match generator.run(&config.config_path, &config.profile).await {
        Ok(output) => {
            info!("Successfully generated struct");
            println!("{output}");
            Ok(())
        }
        Err(e) => {
            if let Some(suggestion) = e.suggestion() {
                error!(suggestion = %suggestion, "Hint");
            }
            Err(e.into())
        }
    }
}

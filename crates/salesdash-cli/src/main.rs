//! Salesdash CLI - single-page sales dashboard.

mod check;
mod colors;
mod serve;
mod summary;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use salesdash_core::{DatePolicy, LoadOptions};

/// Dataset loaded when `--data` is not given.
const DEFAULT_DATASET: &str = "sales_uk.csv";

#[derive(Parser)]
#[command(name = "salesdash")]
#[command(about = "Single-page sales dashboard")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the dashboard server
    Serve {
        /// Path to the sales CSV file
        #[arg(short, long, default_value = DEFAULT_DATASET)]
        data: PathBuf,

        /// Host address to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value = "8050")]
        port: u16,

        /// Skip rows whose date cannot be parsed instead of failing
        #[arg(long)]
        drop_invalid_dates: bool,

        /// Do not watch the dataset for changes
        #[arg(long)]
        no_watch: bool,
    },

    /// Print the headline metrics and per-category totals
    Summary {
        /// Path to the sales CSV file
        #[arg(short, long, default_value = DEFAULT_DATASET)]
        data: PathBuf,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,

        /// Skip rows whose date cannot be parsed instead of failing
        #[arg(long)]
        drop_invalid_dates: bool,
    },

    /// Validate a dataset without starting the server
    Check {
        /// Path to the sales CSV file
        #[arg(short, long, default_value = DEFAULT_DATASET)]
        data: PathBuf,

        /// Skip rows whose date cannot be parsed instead of failing
        #[arg(long)]
        drop_invalid_dates: bool,
    },
}

fn load_options(drop_invalid_dates: bool) -> LoadOptions {
    LoadOptions {
        date_policy: if drop_invalid_dates {
            DatePolicy::DropInvalid
        } else {
            DatePolicy::Strict
        },
        ..Default::default()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::from_default_env()
            .add_directive(tracing::Level::DEBUG.into())
    } else {
        tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Helper to format salesdash-core errors with recovery hints
    let format_error = |err: anyhow::Error| -> anyhow::Error {
        if let Some(core_err) = err.downcast_ref::<salesdash_core::Error>() {
            anyhow::anyhow!("{}", core_err.with_hint())
        } else {
            err
        }
    };

    match cli.command {
        Commands::Serve {
            data,
            host,
            port,
            drop_invalid_dates,
            no_watch,
        } => {
            let config = salesdash_server::ServerConfig {
                host,
                port,
                watch_dataset: !no_watch,
            };
            serve::execute(&data, &load_options(drop_invalid_dates), config)
                .await
                .map_err(format_error)?;
        }

        Commands::Summary {
            data,
            json,
            drop_invalid_dates,
        } => {
            summary::execute(&data, &load_options(drop_invalid_dates), json)
                .map_err(format_error)?;
        }

        Commands::Check {
            data,
            drop_invalid_dates,
        } => {
            check::execute(&data, &load_options(drop_invalid_dates)).map_err(format_error)?;
        }
    }

    Ok(())
}

//! Serve command implementation for the salesdash CLI.
//!
//! Loads the dataset once, builds every chart, then starts the server.

use std::path::Path;

use salesdash_core::{DashboardContext, LoadOptions};
use salesdash_server::ServerConfig;

use crate::colors;

/// Start the dashboard server.
pub async fn execute(
    data_path: &Path,
    options: &LoadOptions,
    config: ServerConfig,
) -> anyhow::Result<()> {
    // Fail before binding so a bad dataset never yields a half-working server
    let context = DashboardContext::load(data_path, options)?;

    println!(
        "\n{}Sales Dashboard{} - Analyze Your Sales Performance",
        colors::BOLD,
        colors::RESET
    );
    println!("{}", "─".repeat(50));

    println!(
        "{}  ◆ Dataset:{} {} ({} rows)",
        colors::CYAN,
        colors::RESET,
        data_path.display(),
        context.rows()
    );
    if context.dropped_rows() > 0 {
        println!(
            "{}  ◆ Skipped:{} {} row(s) with invalid dates",
            colors::YELLOW,
            colors::RESET,
            context.dropped_rows()
        );
    }
    println!(
        "{}  ◆ Server:{} http://{}:{}",
        colors::CYAN,
        colors::RESET,
        config.host,
        config.port
    );
    println!(
        "{}  ◆ WebSocket:{} ws://{}:{}/ws",
        colors::CYAN,
        colors::RESET,
        config.host,
        config.port
    );
    println!("{}", "─".repeat(50));
    println!("{}Press Ctrl+C to stop{}", colors::GREEN, colors::RESET);
    println!();

    salesdash_server::serve(context, config).await?;

    Ok(())
}

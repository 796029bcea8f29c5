//! Check command implementation for the salesdash CLI.

use std::path::Path;

use salesdash_core::{DashboardContext, LoadOptions};

use crate::colors;

/// Load the dataset and build every chart, reporting the first problem found.
pub fn execute(data_path: &Path, options: &LoadOptions) -> anyhow::Result<()> {
    let context = DashboardContext::load(data_path, options)?;

    println!(
        "{}✓{} {}: {} rows, {} charts",
        colors::GREEN,
        colors::RESET,
        data_path.display(),
        context.rows(),
        context.catalog().charts().len()
    );
    if context.dropped_rows() > 0 {
        println!(
            "{}!{} skipped {} row(s) with invalid dates",
            colors::YELLOW,
            colors::RESET,
            context.dropped_rows()
        );
    }

    Ok(())
}

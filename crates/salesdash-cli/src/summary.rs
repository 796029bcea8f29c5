//! Summary command implementation for the salesdash CLI.
//!
//! Prints the KPI cards and the per-category totals behind each chart.

use std::path::Path;

use salesdash_core::{
    Dimension, Grouped, LoadOptions, Measure, SalesTable, SummaryMetrics, distribution,
    format_currency, group_sum,
};

use crate::colors;

/// Print the dashboard's numbers without starting the server.
pub fn execute(data_path: &Path, options: &LoadOptions, json: bool) -> anyhow::Result<()> {
    let table = SalesTable::load(data_path, options)?;
    let metrics = SummaryMetrics::compute(&table)?;

    let by_product_line = group_sum(&table, Dimension::ProductLine, Measure::Total);
    let by_city = group_sum(&table, Dimension::City, Measure::Total);
    let by_customer_type = distribution(&table, Dimension::CustomerType);
    let by_payment = distribution(&table, Dimension::Payment);

    if json {
        let report = serde_json::json!({
            "source": data_path.display().to_string(),
            "rows": table.len(),
            "dropped_rows": table.dropped_rows(),
            "metrics": metrics,
            "kpis": metrics.kpi_cards(),
            "by_product_line": by_product_line,
            "by_city": by_city,
            "by_customer_type": by_customer_type,
            "by_payment_method": by_payment,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "\n{}Sales Summary{} {}({} rows){}",
        colors::BOLD,
        colors::RESET,
        colors::DIM,
        table.len(),
        colors::RESET
    );
    println!("{}", "─".repeat(50));
    for card in metrics.kpi_cards() {
        println!(
            "{}  {:<22}{} {}",
            colors::CYAN,
            card.label,
            colors::RESET,
            card.value
        );
    }

    print_totals("Total Sales by Product Line", &by_product_line);
    print_totals("Total Sales by City", &by_city);
    print_counts("Customer Type Distribution", &by_customer_type);
    print_counts("Payment Method Distribution", &by_payment);
    println!();

    Ok(())
}

fn print_totals(heading: &str, grouped: &Grouped<f64>) {
    println!("\n{}{}{}", colors::BOLD, heading, colors::RESET);
    for entry in grouped.entries() {
        println!("  {:<24} {:>14}", entry.key.to_string(), format_currency(entry.value));
    }
}

fn print_counts(heading: &str, grouped: &Grouped<u64>) {
    println!("\n{}{}{}", colors::BOLD, heading, colors::RESET);
    for (entry, share) in grouped.entries().iter().zip(grouped.proportions()) {
        println!(
            "  {:<24} {:>6} {}({:.1}%){}",
            entry.key.to_string(),
            entry.value,
            colors::DIM,
            share.value * 100.0,
            colors::RESET
        );
    }
}

//! Summary metrics and the KPI cards shown above the charts.

use serde::Serialize;

use crate::aggregate::{Measure, mean, total};
use crate::dataset::SalesTable;
use crate::error::Result;

/// The three headline scalars of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryMetrics {
    pub total_sales: f64,
    pub total_gross_income: f64,
    pub average_rating: f64,
}

/// Card accent, mapped to a CSS class by the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Accent {
    Primary,
    Success,
    Info,
}

/// A formatted KPI card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiCard {
    pub label: &'static str,
    pub value: String,
    pub accent: Accent,
}

impl SummaryMetrics {
    /// Compute the metrics once from a loaded table.
    ///
    /// # Errors
    /// Returns [`crate::Error::EmptyAggregate`] when the table has no rows,
    /// since the average rating is undefined.
    pub fn compute(table: &SalesTable) -> Result<Self> {
        Ok(Self {
            total_sales: total(table, Measure::Total),
            total_gross_income: total(table, Measure::GrossIncome),
            average_rating: mean(table, Measure::Rating)?,
        })
    }

    pub fn kpi_cards(&self) -> Vec<KpiCard> {
        vec![
            KpiCard {
                label: "Total Sales",
                value: format_currency(self.total_sales),
                accent: Accent::Primary,
            },
            KpiCard {
                label: "Total Gross Income",
                value: format_currency(self.total_gross_income),
                accent: Accent::Success,
            },
            KpiCard {
                label: "Average Rating",
                value: format!("{:.2}", self.average_rating),
                accent: Accent::Info,
            },
        ]
    }
}

/// Format an amount as `$1,234.56`.
pub fn format_currency(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    // "-0.00" would read oddly after rounding
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::SalesRecord;
    use chrono::NaiveDate;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(999.999), "$1,000.00");
        assert_eq!(format_currency(322966.749), "$322,966.75");
        assert_eq!(format_currency(1234567.5), "$1,234,567.50");
        assert_eq!(format_currency(-15379.37), "-$15,379.37");
        assert_eq!(format_currency(-0.001), "$0.00");
    }

    #[test]
    fn test_compute_and_cards() {
        let timestamp = NaiveDate::from_ymd_opt(2019, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let record = |total: f64, rating: f64| SalesRecord {
            timestamp,
            total,
            gross_income: total / 10.0,
            rating,
            product_line: "Food".to_string(),
            city: "Yangon".to_string(),
            customer_type: "Normal".to_string(),
            payment: "Cash".to_string(),
        };
        let table = SalesTable::from_records(vec![record(1000.0, 7.0), record(500.0, 8.0)]);

        let metrics = SummaryMetrics::compute(&table).unwrap();
        assert_eq!(metrics.total_sales, 1500.0);
        assert_eq!(metrics.total_gross_income, 150.0);
        assert_eq!(metrics.average_rating, 7.5);

        let cards = metrics.kpi_cards();
        let values: Vec<&str> = cards.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, ["$1,500.00", "$150.00", "7.50"]);
        assert_eq!(cards[0].label, "Total Sales");
        assert_eq!(cards[2].accent, Accent::Info);
    }

    #[test]
    fn test_compute_empty_table_fails() {
        assert!(SummaryMetrics::compute(&SalesTable::default()).is_err());
    }
}

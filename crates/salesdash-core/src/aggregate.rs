//! Aggregation engine.
//!
//! Single-pass descriptive aggregates over a [`SalesTable`]. Every function
//! is pure and deterministic for a fixed row order:
//!
//! - [`Dimension::Date`] groups by calendar day in ascending order.
//! - Nominal dimensions keep first-appearance order.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rustc_hash::FxHashMap;
use serde::{Serialize, Serializer};

use crate::dataset::{SalesRecord, SalesTable};
use crate::error::{Error, Result};

/// Numeric column that can be summed or averaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Measure {
    Total,
    GrossIncome,
    Rating,
}

impl Measure {
    pub fn name(&self) -> &'static str {
        match self {
            Measure::Total => "Total",
            Measure::GrossIncome => "gross income",
            Measure::Rating => "Rating",
        }
    }

    fn value(&self, row: &SalesRecord) -> f64 {
        match self {
            Measure::Total => row.total,
            Measure::GrossIncome => row.gross_income,
            Measure::Rating => row.rating,
        }
    }
}

/// Column rows can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// Calendar day of the timestamp (ordinal).
    Date,
    ProductLine,
    City,
    CustomerType,
    Payment,
}

impl Dimension {
    pub fn name(&self) -> &'static str {
        match self {
            Dimension::Date => "Date",
            Dimension::ProductLine => "Product line",
            Dimension::City => "City",
            Dimension::CustomerType => "Customer type",
            Dimension::Payment => "Payment",
        }
    }

    fn label<'a>(&self, row: &'a SalesRecord) -> Option<&'a str> {
        match self {
            Dimension::Date => None,
            Dimension::ProductLine => Some(&row.product_line),
            Dimension::City => Some(&row.city),
            Dimension::CustomerType => Some(&row.customer_type),
            Dimension::Payment => Some(&row.payment),
        }
    }
}

/// Key of one group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GroupKey {
    Day(NaiveDate),
    Label(String),
}

impl std::fmt::Display for GroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupKey::Day(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            GroupKey::Label(label) => f.write_str(label),
        }
    }
}

impl Serialize for GroupKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One `(key, value)` pair of a grouped aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupEntry<V> {
    pub key: GroupKey,
    pub value: V,
}

/// Ordered mapping from group key to an aggregated value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grouped<V> {
    dimension: &'static str,
    entries: Vec<GroupEntry<V>>,
}

impl<V: Copy> Grouped<V> {
    fn from_pairs(dimension: Dimension, pairs: impl IntoIterator<Item = (GroupKey, V)>) -> Self {
        Self {
            dimension: dimension.name(),
            entries: pairs
                .into_iter()
                .map(|(key, value)| GroupEntry { key, value })
                .collect(),
        }
    }

    /// Name of the grouping column.
    pub fn dimension(&self) -> &'static str {
        self.dimension
    }

    pub fn entries(&self) -> &[GroupEntry<V>] {
        &self.entries
    }

    pub fn keys(&self) -> impl Iterator<Item = &GroupKey> {
        self.entries.iter().map(|e| &e.key)
    }

    pub fn values(&self) -> impl Iterator<Item = V> + '_ {
        self.entries.iter().map(|e| e.value)
    }

    /// Look a group up by its display label (`YYYY-MM-DD` for days).
    pub fn get(&self, label: &str) -> Option<V> {
        self.entries
            .iter()
            .find(|e| match &e.key {
                GroupKey::Label(l) => l == label,
                GroupKey::Day(_) => e.key.to_string() == label,
            })
            .map(|e| e.value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Grouped<f64> {
    /// Sum over every group.
    pub fn sum(&self) -> f64 {
        self.values().sum()
    }
}

impl Grouped<u64> {
    /// Row count over every group.
    pub fn count(&self) -> u64 {
        self.values().sum()
    }

    /// Share of rows per group, in the same order. Empty when there are no rows.
    pub fn proportions(&self) -> Vec<GroupEntry<f64>> {
        let count = self.count();
        if count == 0 {
            return Vec::new();
        }
        self.entries
            .iter()
            .map(|e| GroupEntry {
                key: e.key.clone(),
                value: e.value as f64 / count as f64,
            })
            .collect()
    }
}

/// Sum of a numeric column. Zero for an empty table.
pub fn total(table: &SalesTable, measure: Measure) -> f64 {
    table.rows().iter().map(|row| measure.value(row)).sum()
}

/// Arithmetic mean of a numeric column.
///
/// # Errors
/// Returns [`Error::EmptyAggregate`] for an empty table.
pub fn mean(table: &SalesTable, measure: Measure) -> Result<f64> {
    if table.is_empty() {
        return Err(Error::EmptyAggregate {
            operation: "mean",
            field: measure.name(),
        });
    }
    Ok(total(table, measure) / table.len() as f64)
}

/// Per-group sum of `measure`, keyed by `dimension`.
pub fn group_sum(table: &SalesTable, dimension: Dimension, measure: Measure) -> Grouped<f64> {
    fold_groups(table, dimension, 0.0, |acc, row| *acc += measure.value(row))
}

/// Row count per distinct value of `dimension`.
pub fn distribution(table: &SalesTable, dimension: Dimension) -> Grouped<u64> {
    fold_groups(table, dimension, 0u64, |acc, _| *acc += 1)
}

fn fold_groups<V: Copy>(
    table: &SalesTable,
    dimension: Dimension,
    init: V,
    mut step: impl FnMut(&mut V, &SalesRecord),
) -> Grouped<V> {
    if dimension == Dimension::Date {
        let mut days: BTreeMap<NaiveDate, V> = BTreeMap::new();
        for row in table.rows() {
            step(days.entry(row.timestamp.date()).or_insert(init), row);
        }
        return Grouped::from_pairs(
            dimension,
            days.into_iter().map(|(day, v)| (GroupKey::Day(day), v)),
        );
    }

    let mut index: FxHashMap<&str, usize> = FxHashMap::default();
    let mut groups: Vec<(&str, V)> = Vec::new();
    for row in table.rows() {
        let Some(label) = dimension.label(row) else {
            continue;
        };
        let slot = *index.entry(label).or_insert_with(|| {
            groups.push((label, init));
            groups.len() - 1
        });
        step(&mut groups[slot].1, row);
    }

    Grouped::from_pairs(
        dimension,
        groups
            .into_iter()
            .map(|(label, v)| (GroupKey::Label(label.to_string()), v)),
    )
}

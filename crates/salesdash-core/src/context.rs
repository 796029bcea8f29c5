//! The immutable dashboard context built at startup.

use std::path::{Path, PathBuf};

use crate::catalog::Catalog;
use crate::dataset::{LoadOptions, SalesTable};
use crate::error::Result;
use crate::metrics::SummaryMetrics;

/// Everything derived from the dataset, computed once and then only read.
///
/// Share it as `Arc<DashboardContext>` between request handlers; nothing
/// mutates it after construction.
#[derive(Debug, Clone)]
pub struct DashboardContext {
    source: Option<PathBuf>,
    rows: usize,
    dropped_rows: usize,
    metrics: SummaryMetrics,
    catalog: Catalog,
}

impl DashboardContext {
    /// Load the dataset and derive metrics and charts.
    ///
    /// # Errors
    /// Any data-load error from [`SalesTable::load`], or
    /// [`crate::Error::EmptyAggregate`] if the file has no data rows.
    pub fn load(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Self> {
        let table = SalesTable::load(path, options)?;
        Self::from_table(&table)
    }

    /// Derive metrics and charts from an already loaded table.
    pub fn from_table(table: &SalesTable) -> Result<Self> {
        let metrics = SummaryMetrics::compute(table)?;
        let catalog = Catalog::build(table);

        tracing::info!(
            "Dashboard ready: {} rows, {} charts",
            table.len(),
            catalog.charts().len()
        );

        Ok(Self {
            source: table.source().map(Path::to_path_buf),
            rows: table.len(),
            dropped_rows: table.dropped_rows(),
            metrics,
            catalog,
        })
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn dropped_rows(&self) -> usize {
        self.dropped_rows
    }

    pub fn metrics(&self) -> &SummaryMetrics {
        &self.metrics
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

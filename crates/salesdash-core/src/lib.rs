//! Core engine for the salesdash sales dashboard.
//!
//! This crate provides:
//! - Dataset loading from CSV with date normalisation
//! - Single-pass aggregates (totals, means, group sums, distributions)
//! - The chart catalog, built once per process
//! - The view-state controller that decides which charts are shown
//!
//! Data flows one way:
//!
//! ```text
//! CSV ──► SalesTable ──► aggregates ──► Catalog ─┐
//!                   └──► SummaryMetrics ─────────┴─► DashboardContext (read-only)
//!
//! trigger ──► controller::transition ──► RenderInstruction
//! ```

pub mod aggregate;
pub mod catalog;
pub mod context;
pub mod controller;
pub mod dataset;
pub mod error;
pub mod figure;
pub mod metrics;
pub mod style;
pub mod view;

pub use aggregate::{
    Dimension, GroupEntry, GroupKey, Grouped, Measure, distribution, group_sum, mean, total,
};
pub use catalog::{Catalog, Chart, ViewData};
pub use context::DashboardContext;
pub use controller::{
    ClickCounts, ControllerState, Event, HelpDialog, RenderInstruction, Trigger, select,
    toggle_help, transition,
};
pub use dataset::{ColumnNames, DatePolicy, LoadOptions, SalesRecord, SalesTable};
pub use error::{Error, ErrorKind, Result};
pub use metrics::{KpiCard, SummaryMetrics, format_currency};
pub use view::{DisplaySelection, ViewId};

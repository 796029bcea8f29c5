//! End-to-end tests: CSV file on disk to charts and controller output.

use std::fs;
use std::path::PathBuf;

use salesdash_core::{
    ControllerState, DashboardContext, Dimension, DisplaySelection, Error, ErrorKind, Event,
    LoadOptions, Measure, SalesTable, ViewId, group_sum, mean, total, transition,
};
use tempfile::TempDir;

// =============================================================================
// Test Helpers
// =============================================================================

/// A CSV file in a temporary directory.
struct TestDataset {
    _temp_dir: TempDir,
    path: PathBuf,
}

impl TestDataset {
    fn new(contents: &str) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("sales.csv");
        fs::write(&path, contents).expect("Failed to write dataset");
        Self {
            _temp_dir: temp_dir,
            path,
        }
    }
}

const HEADER: &str = "Date,Total,gross income,Rating,Product line,City,Customer type,Payment\n";

fn four_row_dataset() -> TestDataset {
    TestDataset::new(&format!(
        "{HEADER}\
         2019-01-05,10,0.5,7,A,Yangon,Member,Cash\n\
         2019-01-05,20,1.0,8,A,Mandalay,Normal,Ewallet\n\
         2019-01-05,30,1.5,9,B,Yangon,Member,Cash\n\
         2019-01-05,40,2.0,6,B,Naypyitaw,Normal,Credit card\n"
    ))
}

fn sample_dataset_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/sales_sample.csv")
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_four_row_scenario() {
    let dataset = four_row_dataset();
    let table = SalesTable::load(&dataset.path, &LoadOptions::default()).unwrap();

    assert_eq!(total(&table, Measure::Total), 100.0);

    let by_line = group_sum(&table, Dimension::ProductLine, Measure::Total);
    let pairs: Vec<(String, f64)> = by_line
        .entries()
        .iter()
        .map(|e| (e.key.to_string(), e.value))
        .collect();
    assert_eq!(pairs, [("A".to_string(), 30.0), ("B".to_string(), 70.0)]);

    let by_day = group_sum(&table, Dimension::Date, Measure::Total);
    assert_eq!(by_day.len(), 1);
    assert_eq!(by_day.get("2019-01-05"), Some(100.0));

    let (_, render) = transition(ControllerState::default(), Event::parse("pick-2"));
    assert_eq!(render.views.views(), &[ViewId::ByProductLine]);
}

#[test]
fn test_empty_table_scenario() {
    let dataset = TestDataset::new(HEADER);
    let table = SalesTable::load(&dataset.path, &LoadOptions::default()).unwrap();

    assert_eq!(total(&table, Measure::Total), 0.0);
    let err = mean(&table, Measure::Rating).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyAggregate);

    // No dashboard is built from an empty table.
    let err = DashboardContext::from_table(&table).unwrap_err();
    assert!(matches!(err, Error::EmptyAggregate { .. }));
}

#[test]
fn test_context_from_sample_dataset() {
    let context = DashboardContext::load(sample_dataset_path(), &LoadOptions::default())
        .expect("sample dataset should load");

    assert_eq!(context.rows(), 20);
    assert_eq!(context.dropped_rows(), 0);
    assert!(context.source().is_some());

    let metrics = context.metrics();
    assert!(metrics.total_sales > metrics.total_gross_income);
    assert!((0.0..=10.0).contains(&metrics.average_rating));

    for view in ViewId::ALL {
        let chart = context.catalog().get(view);
        assert_eq!(chart.view, view);
        assert!(!chart.figure.data.is_empty(), "{view} has no traces");
    }
}

#[test]
fn test_sample_dataset_partition_law() {
    let table = SalesTable::load(sample_dataset_path(), &LoadOptions::default()).unwrap();
    let expected = total(&table, Measure::Total);

    for dimension in [
        Dimension::Date,
        Dimension::ProductLine,
        Dimension::City,
        Dimension::CustomerType,
        Dimension::Payment,
    ] {
        let grouped = group_sum(&table, dimension, Measure::Total);
        assert!(
            (grouped.sum() - expected).abs() < 1e-6,
            "{dimension:?}: {} != {}",
            grouped.sum(),
            expected
        );

        let mut keys: Vec<String> = grouped.keys().map(|k| k.to_string()).collect();
        let before = keys.len();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), before, "{dimension:?} has duplicate keys");
    }

    let cities = group_sum(&table, Dimension::City, Measure::Total);
    let order: Vec<String> = cities.keys().map(|k| k.to_string()).collect();
    assert_eq!(order, ["Yangon", "Naypyitaw", "Mandalay"]);
}

#[test]
fn test_missing_column_aborts_load() {
    let dataset = TestDataset::new("Date,Total\n2019-01-01,5\n");
    let err = DashboardContext::load(&dataset.path, &LoadOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DataLoad);
}

#[test]
fn test_initial_render_shows_everything() {
    let (_, render) = transition(ControllerState::default(), Event::Initial);
    assert_eq!(render.views, DisplaySelection::all());
    assert!(!render.help_open);
}

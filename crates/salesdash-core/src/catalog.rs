//! Visualization catalog.
//!
//! Each [`ViewId`] maps to exactly one [`Chart`], built once from the loaded
//! table and reused for the lifetime of the process.

use serde::Serialize;

use crate::aggregate::{Dimension, Grouped, Measure, distribution, group_sum};
use crate::dataset::SalesTable;
use crate::figure::{
    Axis, BarTrace, Figure, Font, Layout, Line, Margin, Marker, Pad, PieMarker, PieTrace,
    PlotConfig, ScatterTrace, Title, Trace,
};
use crate::style::{ChartKind, ChartStyle, DARK, style_for};
use crate::view::{DisplaySelection, ViewId};

/// The aggregate behind one view.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewData {
    /// Summed totals per group.
    Series(Grouped<f64>),
    /// Row counts per group.
    Split(Grouped<u64>),
}

impl ViewData {
    /// Aggregate `table` for `view`.
    pub fn for_view(table: &SalesTable, view: ViewId) -> Self {
        match view {
            ViewId::TimeSeries => Self::Series(group_sum(table, Dimension::Date, Measure::Total)),
            ViewId::ByProductLine => {
                Self::Series(group_sum(table, Dimension::ProductLine, Measure::Total))
            }
            ViewId::ByCity => Self::Series(group_sum(table, Dimension::City, Measure::Total)),
            ViewId::ByCustomerType => Self::Split(distribution(table, Dimension::CustomerType)),
            ViewId::ByPaymentMethod => Self::Split(distribution(table, Dimension::Payment)),
        }
    }

    fn labels_and_values(&self) -> (Vec<String>, Vec<f64>) {
        match self {
            ViewData::Series(grouped) => (
                grouped.keys().map(|k| k.to_string()).collect(),
                grouped.values().collect(),
            ),
            ViewData::Split(grouped) => (
                grouped.keys().map(|k| k.to_string()).collect(),
                grouped.values().map(|v| v as f64).collect(),
            ),
        }
    }
}

/// A rendered chart plus its client-side options.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub view: ViewId,
    pub title: String,
    pub figure: Figure,
    pub config: PlotConfig,
}

/// Build the chart of `view` from its aggregate.
pub fn build(view: ViewId, data: &ViewData) -> Chart {
    let style = style_for(view);
    let (labels, values) = data.labels_and_values();

    let data = match style.kind {
        ChartKind::Area => vec![Trace::Scatter(ScatterTrace {
            x: labels,
            y: values,
            mode: "lines",
            fill: Some("tozeroy"),
            line: Line {
                color: style.color(0).to_string(),
            },
            name: "Total".to_string(),
        })],
        // One trace per category so every bar gets its own colour and legend entry
        ChartKind::Bar => labels
            .into_iter()
            .zip(values)
            .enumerate()
            .map(|(i, (label, value))| {
                Trace::Bar(BarTrace {
                    x: vec![label.clone()],
                    y: vec![value],
                    name: label.clone(),
                    marker: Marker {
                        color: style.color(i).to_string(),
                    },
                    legend_group: label,
                })
            })
            .collect(),
        ChartKind::Pie => {
            let colors = (0..labels.len())
                .map(|i| style.color(i).to_string())
                .collect();
            vec![Trace::Pie(PieTrace {
                labels,
                values,
                marker: PieMarker { colors },
                sort: false,
            })]
        }
    };

    Chart {
        view,
        title: style.title.to_string(),
        figure: Figure {
            data,
            layout: layout(&style),
        },
        config: PlotConfig::default(),
    }
}

fn layout(style: &ChartStyle) -> Layout {
    let axis = |label: Option<&'static str>| {
        label.map(|text| Axis {
            title: Title {
                text: text.to_string(),
                font: style.axis_title_size.map(|size| Font {
                    family: None,
                    size: Some(size),
                    color: DARK.text,
                }),
                pad: None,
            },
            gridcolor: DARK.grid,
            zerolinecolor: DARK.grid,
        })
    };

    Layout {
        title: Title {
            text: style.title.to_string(),
            font: style.title_size.map(|size| Font {
                family: None,
                size: Some(size),
                color: DARK.text,
            }),
            pad: style.title_size.map(|_| Pad { t: 20, b: 20 }),
        },
        xaxis: axis(style.x_label),
        yaxis: axis(style.y_label),
        font: Font {
            family: Some("Arial"),
            size: Some(12),
            color: DARK.text,
        },
        margin: Margin {
            l: 40,
            r: 40,
            t: style.top_margin,
            b: 40,
        },
        hovermode: (style.kind == ChartKind::Bar).then_some("x unified"),
        paper_bgcolor: DARK.paper_bgcolor,
        plot_bgcolor: DARK.plot_bgcolor,
        showlegend: style.kind != ChartKind::Area,
    }
}

/// Every chart of the dashboard, indexed by [`ViewId`].
#[derive(Debug, Clone)]
pub struct Catalog {
    charts: [Chart; ViewId::COUNT],
}

impl Catalog {
    /// Aggregate the table and build each chart exactly once.
    pub fn build(table: &SalesTable) -> Self {
        let charts = ViewId::ALL.map(|view| {
            let chart = build(view, &ViewData::for_view(table, view));
            tracing::debug!("Built chart {} ({} traces)", view, chart.figure.data.len());
            chart
        });
        Self { charts }
    }

    /// The chart of `view`. Total: every view has a chart.
    pub fn get(&self, view: ViewId) -> &Chart {
        &self.charts[view.index()]
    }

    /// All charts in canonical order.
    pub fn charts(&self) -> &[Chart] {
        &self.charts
    }

    /// Charts of `selection`, in selection order.
    pub fn select<'a>(&'a self, selection: &DisplaySelection) -> Vec<&'a Chart> {
        selection.views().iter().map(|&view| self.get(view)).collect()
    }
}

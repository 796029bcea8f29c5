//! Chart objects.
//!
//! A [`Figure`] serialises to the `{ data, layout }` JSON accepted by
//! Plotly.js, which draws it in the browser. Only the attributes the
//! dashboard sets are modelled.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Scatter(ScatterTrace),
    Bar(BarTrace),
    Pie(PieTrace),
}

/// Line/area trace; `fill = "tozeroy"` turns it into an area chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterTrace {
    pub x: Vec<String>,
    pub y: Vec<f64>,
    pub mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<&'static str>,
    pub line: Line,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarTrace {
    pub x: Vec<String>,
    pub y: Vec<f64>,
    pub name: String,
    pub marker: Marker,
    #[serde(rename = "legendgroup")]
    pub legend_group: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieTrace {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub marker: PieMarker,
    pub sort: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieMarker {
    pub colors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pad {
    pub t: u32,
    pub b: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pad: Option<Pad>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: Title,
    pub gridcolor: &'static str,
    pub zerolinecolor: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub t: u32,
    pub b: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: Title,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    pub font: Font,
    pub margin: Margin,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovermode: Option<&'static str>,
    pub paper_bgcolor: &'static str,
    pub plot_bgcolor: &'static str,
    pub showlegend: bool,
}

/// Client-side options passed alongside the figure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotConfig {
    #[serde(rename = "displayModeBar")]
    pub display_mode_bar: bool,
    pub responsive: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            display_mode_bar: false,
            responsive: true,
        }
    }
}

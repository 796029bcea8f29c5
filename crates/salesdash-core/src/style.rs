//! Fixed chart styling: dark theme, palettes, titles and axis labels.

use crate::view::ViewId;

/// Plotly qualitative "Set2".
pub const SET2: &[&str] = &[
    "rgb(102,194,165)",
    "rgb(252,141,98)",
    "rgb(141,160,203)",
    "rgb(231,138,195)",
    "rgb(166,216,84)",
    "rgb(255,217,47)",
    "rgb(229,196,148)",
    "rgb(179,179,179)",
];

/// Plotly qualitative default sequence.
pub const PLOTLY: &[&str] = &[
    "#636EFA", "#EF553B", "#00CC96", "#AB63FA", "#FFA15A", "#19D3F3", "#FF6692", "#B6E880",
    "#FF97FF", "#FECB52",
];

/// ColorBrewer "RdBu" sequential.
pub const RDBU: &[&str] = &[
    "rgb(103,0,31)",
    "rgb(178,24,43)",
    "rgb(214,96,77)",
    "rgb(244,165,130)",
    "rgb(253,219,199)",
    "rgb(247,247,247)",
    "rgb(209,229,240)",
    "rgb(146,197,222)",
    "rgb(67,147,195)",
    "rgb(33,102,172)",
    "rgb(5,48,97)",
];

/// CARTO "Emrld" sequential.
pub const EMRLD: &[&str] = &[
    "rgb(211,242,163)",
    "rgb(151,225,150)",
    "rgb(108,192,139)",
    "rgb(76,155,130)",
    "rgb(33,122,121)",
    "rgb(16,89,101)",
    "rgb(7,64,80)",
];

/// Area colour of the time-series chart.
pub const AREA_GREEN: &[&str] = &["#00CC96"];

/// Colours of the dark template.
pub struct Theme {
    pub paper_bgcolor: &'static str,
    pub plot_bgcolor: &'static str,
    pub text: &'static str,
    pub grid: &'static str,
}

pub const DARK: Theme = Theme {
    paper_bgcolor: "rgb(17,17,17)",
    plot_bgcolor: "rgb(17,17,17)",
    text: "white",
    grid: "#283442",
};

/// How a view's aggregate is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Area,
    Bar,
    Pie,
}

/// Styling of one chart.
#[derive(Debug, Clone)]
pub struct ChartStyle {
    pub kind: ChartKind,
    pub title: &'static str,
    pub x_label: Option<&'static str>,
    pub y_label: Option<&'static str>,
    pub palette: &'static [&'static str],
    /// Headline size; `None` keeps the theme default.
    pub title_size: Option<u32>,
    pub axis_title_size: Option<u32>,
    pub top_margin: u32,
}

impl ChartStyle {
    /// Colour of the `i`-th series, cycling through the palette.
    pub fn color(&self, i: usize) -> &'static str {
        self.palette[i % self.palette.len()]
    }
}

/// The fixed style of `view`.
pub fn style_for(view: ViewId) -> ChartStyle {
    match view {
        ViewId::TimeSeries => ChartStyle {
            kind: ChartKind::Area,
            title: "Total Sales Over Time (Daily Totals)",
            x_label: Some("Date"),
            y_label: Some("Total Sales ($)"),
            palette: AREA_GREEN,
            title_size: Some(24),
            axis_title_size: Some(18),
            top_margin: 60,
        },
        ViewId::ByProductLine => bar("Total Sales by Product Line", "Product Line", SET2),
        ViewId::ByCity => bar("Total Sales by City", "City", PLOTLY),
        ViewId::ByCustomerType => pie("Customer Type Distribution", RDBU),
        ViewId::ByPaymentMethod => pie("Payment Method Distribution", EMRLD),
    }
}

fn bar(title: &'static str, x_label: &'static str, palette: &'static [&'static str]) -> ChartStyle {
    ChartStyle {
        kind: ChartKind::Bar,
        title,
        x_label: Some(x_label),
        y_label: Some("Total Sales ($)"),
        palette,
        title_size: None,
        axis_title_size: None,
        top_margin: 40,
    }
}

fn pie(title: &'static str, palette: &'static [&'static str]) -> ChartStyle {
    ChartStyle {
        kind: ChartKind::Pie,
        title,
        x_label: None,
        y_label: None,
        palette,
        title_size: None,
        axis_title_size: None,
        top_margin: 40,
    }
}

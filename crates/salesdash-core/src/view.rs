//! View identifiers and display selections.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One chart of the dashboard.
///
/// The declaration order is the canonical display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewId {
    TimeSeries,
    ByProductLine,
    ByCity,
    ByCustomerType,
    ByPaymentMethod,
}

impl ViewId {
    /// Number of views.
    pub const COUNT: usize = 5;

    /// Every view, in canonical order.
    pub const ALL: [ViewId; Self::COUNT] = [
        ViewId::TimeSeries,
        ViewId::ByProductLine,
        ViewId::ByCity,
        ViewId::ByCustomerType,
        ViewId::ByPaymentMethod,
    ];

    /// Zero-based index into [`ViewId::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// One-based position, as used by `pick-N` triggers.
    pub fn position(self) -> usize {
        self.index() + 1
    }

    /// The view at one-based `position`, if any.
    pub fn from_position(position: usize) -> Option<Self> {
        position
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i).copied())
    }

    /// Stable identifier used in URLs and protocol messages.
    pub fn slug(self) -> &'static str {
        match self {
            ViewId::TimeSeries => "time-series",
            ViewId::ByProductLine => "by-product-line",
            ViewId::ByCity => "by-city",
            ViewId::ByCustomerType => "by-customer-type",
            ViewId::ByPaymentMethod => "by-payment-method",
        }
    }

    /// Caption of the button that selects this view.
    pub fn button_label(self) -> &'static str {
        match self {
            ViewId::TimeSeries => "Total Sales Over Time",
            ViewId::ByProductLine => "Total Sales by Product Line",
            ViewId::ByCity => "Total Sales by City",
            ViewId::ByCustomerType => "Customer Type Distribution",
            ViewId::ByPaymentMethod => "Payment Method Distribution",
        }
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ViewId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|v| v.slug() == s).ok_or(())
    }
}

/// Ordered sequence of views currently shown.
///
/// Always replaced wholesale by the controller, never merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplaySelection(Vec<ViewId>);

impl DisplaySelection {
    /// All five views in canonical order.
    pub fn all() -> Self {
        Self(ViewId::ALL.to_vec())
    }

    pub fn single(view: ViewId) -> Self {
        Self(vec![view])
    }

    pub fn views(&self) -> &[ViewId] {
        &self.0
    }

    pub fn contains(&self, view: ViewId) -> bool {
        self.0.contains(&view)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for DisplaySelection {
    fn default() -> Self {
        Self::all()
    }
}

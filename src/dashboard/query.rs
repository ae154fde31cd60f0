//! The filter selection carried in the dashboard URL.
//!
//! Every control on the dashboard is a field of one form, so the query string
//! of a request fully describes the view and can be shared as a link.

use std::ops::RangeInclusive;

use serde::Deserialize;

use crate::sales::Region;

/// The years the remote dataset covers.
pub(super) const YEARS: RangeInclusive<i32> = 2020..=2023;

/// The allowed number of sellers in the top sellers charts.
pub(super) const TOP_SELLERS: RangeInclusive<i64> = 2..=10;

const DEFAULT_TOP_SELLERS: usize = 5;

/// The raw query parameters of a dashboard request.
///
/// Missing or empty parameters fall back to their defaults in
/// [DashboardQuery::normalize].
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// The region to fetch sales for.
    pub region: Option<Region>,
    /// Whether to show all years or a single year.
    pub period: Option<Period>,
    /// The year to show when `period` is [Period::Year].
    pub year: Option<i32>,
    /// The sellers to include, repeated once per seller.
    #[serde(default, rename = "seller")]
    pub sellers: Vec<String>,
    /// How many sellers the top sellers charts show.
    pub top: Option<i64>,
    /// The active tab.
    pub tab: Option<Tab>,
}

/// Whether the dashboard covers every year or a single year.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Period {
    /// Every year in the dataset.
    #[default]
    #[serde(rename = "todos")]
    All,
    /// The year selected with the slider.
    #[serde(rename = "ano")]
    Year,
}

impl Period {
    /// The value of the `period` query parameter.
    pub fn as_query_value(self) -> &'static str {
        match self {
            Period::All => "todos",
            Period::Year => "ano",
        }
    }
}

/// The tabs of the dashboard.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Tab {
    /// Charts of the revenue.
    #[default]
    #[serde(rename = "receita")]
    Revenue,
    /// Charts of the number of sales.
    #[serde(rename = "vendas")]
    SalesCount,
    /// The top sellers charts and the seller table.
    #[serde(rename = "vendedores")]
    Sellers,
}

impl Tab {
    /// All tabs in the order they are shown.
    pub const ALL: [Tab; 3] = [Tab::Revenue, Tab::SalesCount, Tab::Sellers];

    /// The value of the `tab` query parameter.
    pub fn as_query_value(self) -> &'static str {
        match self {
            Tab::Revenue => "receita",
            Tab::SalesCount => "vendas",
            Tab::Sellers => "vendedores",
        }
    }

    /// The name shown on the tab.
    pub fn label(self) -> &'static str {
        match self {
            Tab::Revenue => "Receita",
            Tab::SalesCount => "Quantidade de vendas",
            Tab::Sellers => "Vendedores",
        }
    }
}

/// A filter selection with every value resolved and in range.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct DashboardFilters {
    pub region: Region,
    pub period: Period,
    /// The year shown on the slider, used only when `period` is [Period::Year].
    pub year: i32,
    pub sellers: Vec<String>,
    pub top: usize,
    pub tab: Tab,
}

impl DashboardFilters {
    /// The year to fetch sales for, or `None` for every year.
    pub fn selected_year(&self) -> Option<i32> {
        match self.period {
            Period::All => None,
            Period::Year => Some(self.year),
        }
    }
}

impl DashboardQuery {
    /// Resolves defaults and clamps out-of-range values.
    ///
    /// Values outside the allowed ranges are not errors, they are clamped
    /// to the nearest allowed value and logged.
    pub(super) fn normalize(self) -> DashboardFilters {
        let year = match self.year {
            None => *YEARS.start(),
            Some(year) if YEARS.contains(&year) => year,
            Some(year) => {
                let clamped = year.clamp(*YEARS.start(), *YEARS.end());
                tracing::warn!("Year {year} is out of range, showing {clamped} instead");
                clamped
            }
        };

        let top = match self.top {
            None => DEFAULT_TOP_SELLERS,
            Some(top) => {
                let clamped = top.clamp(*TOP_SELLERS.start(), *TOP_SELLERS.end());
                if clamped != top {
                    tracing::warn!("Top sellers {top} is out of range, showing {clamped} instead");
                }
                // The clamped value is between 2 and 10.
                clamped as usize
            }
        };

        let mut sellers = self.sellers;
        sellers.retain(|seller| !seller.is_empty());

        DashboardFilters {
            region: self.region.unwrap_or_default(),
            period: self.period.unwrap_or_default(),
            year,
            sellers,
            top,
            tab: self.tab.unwrap_or_default(),
        }
    }
}

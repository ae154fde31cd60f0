//! Dashboard module
//!
//! Provides the sales dashboard page: headline metrics and charts of the
//! sales, filtered by region, period and seller.

mod aggregation;
mod charts;
mod export;
mod handlers;
mod metrics;
mod query;
mod tables;
mod view;

pub use handlers::{DashboardState, export_sales_csv, get_dashboard_page};

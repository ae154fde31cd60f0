//! The URIs of the app's routes.

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The sales dashboard.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The filtered sales as a CSV file.
pub const DASHBOARD_EXPORT: &str = "/dashboard/export.csv";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";

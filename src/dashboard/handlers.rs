//! Dashboard HTTP handlers.
//!
//! This module contains:
//! - The route handler for the dashboard page and its HTMX partial
//! - The CSV export of the filtered sales
//! - The state type used by the handlers

use axum::{
    extract::{FromRef, State},
    http::{
        StatusCode,
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    },
    response::{IntoResponse, Response},
};
use axum_extra::extract::Query;
use axum_htmx::HxRequest;

use crate::{
    AppState, Error,
    dashboard::{
        export::sales_to_csv,
        query::{DashboardFilters, DashboardQuery},
        view::{dashboard_body, dashboard_form, dashboard_page, error_panel},
    },
    sales::{Sale, SalesClient, distinct_sellers, filter_by_sellers},
};

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The client for the remote sales endpoint.
    pub sales_client: SalesClient,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            sales_client: state.sales_client.clone(),
        }
    }
}

/// Display the dashboard for the filters in the query string.
///
/// HTMX requests get only the dashboard form so that it can be swapped into
/// the current page. If the sales cannot be fetched, a full page request
/// still gets the filters with an error panel and an HTMX request gets an
/// alert, both with the status 502 Bad Gateway.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    HxRequest(is_htmx_request): HxRequest,
    Query(query): Query<DashboardQuery>,
) -> Response {
    let filters = query.normalize();

    let sales = match fetch_filtered_sales(&state.sales_client, &filters).await {
        Ok(sales) => sales,
        Err(error) if is_htmx_request => return error.into_alert_response(),
        Err(Error::DataUnavailable(cause)) => {
            tracing::error!("Sales data unavailable: {cause}");
            let form = dashboard_form(&filters, &filters.sellers, error_panel());
            return (StatusCode::BAD_GATEWAY, dashboard_page(form)).into_response();
        }
        Err(error) => return error.into_response(),
    };

    let form = dashboard_form(
        &filters,
        &sales.seller_options,
        dashboard_body(&filters, &sales.sales),
    );

    if is_htmx_request {
        form.into_response()
    } else {
        dashboard_page(form).into_response()
    }
}

/// Download the sales matching the filters in the query string as CSV.
pub async fn export_sales_csv(
    State(state): State<DashboardState>,
    Query(query): Query<DashboardQuery>,
) -> Response {
    let filters = query.normalize();

    let sales = match fetch_filtered_sales(&state.sales_client, &filters).await {
        Ok(sales) => sales.sales,
        Err(error) => return error.into_response(),
    };

    match sales_to_csv(&sales) {
        Ok(csv) => {
            tracing::debug!("Exporting {} sales as CSV", sales.len());
            (
                [
                    (CONTENT_TYPE, "text/csv; charset=utf-8"),
                    (CONTENT_DISPOSITION, "attachment; filename=\"vendas.csv\""),
                ],
                csv,
            )
                .into_response()
        }
        Err(error) => error.into_response(),
    }
}

/// The sales left after filtering and the sellers the user can pick from.
struct FilteredSales {
    sales: Vec<Sale>,
    seller_options: Vec<String>,
}

/// Fetches the sales for the region and period, then applies the seller filter.
///
/// The seller options come from the sales before the seller filter and also
/// include any selected seller that has no sales, so that a selection is
/// never dropped silently.
async fn fetch_filtered_sales(
    client: &SalesClient,
    filters: &DashboardFilters,
) -> Result<FilteredSales, Error> {
    let sales = client
        .fetch_sales(filters.region, filters.selected_year())
        .await?;

    let mut seller_options = distinct_sellers(&sales);
    for seller in &filters.sellers {
        if let Err(position) = seller_options.binary_search(seller) {
            seller_options.insert(position, seller.clone());
        }
    }

    let sales = filter_by_sellers(sales, &filters.sellers);

    Ok(FilteredSales {
        sales,
        seller_options,
    })
}

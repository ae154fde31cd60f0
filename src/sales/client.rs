//! The HTTP client for the remote sales endpoint.

use std::time::Duration;

use serde::Serialize;

use crate::{
    Error,
    sales::{Region, Sale},
};

/// The endpoint that serves the sales dataset.
pub const DEFAULT_SALES_URL: &str = "https://labdados.com/produtos";

/// The query parameters understood by the sales endpoint.
///
/// A parameter that is `None` is left out of the query string, which the
/// endpoint treats as "no filter".
#[derive(Debug, Serialize)]
struct SalesQuery {
    #[serde(rename = "regiao", skip_serializing_if = "Option::is_none")]
    region: Option<&'static str>,
    #[serde(rename = "ano", skip_serializing_if = "Option::is_none")]
    year: Option<i32>,
}

/// Fetches sales from the remote endpoint.
///
/// Cloning is cheap, the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct SalesClient {
    client: reqwest::Client,
    url: String,
}

impl SalesClient {
    /// Create a client for the endpoint at `url`.
    ///
    /// Requests that take longer than `timeout` fail with
    /// [Error::DataUnavailable].
    ///
    /// # Errors
    /// Returns [Error::HttpClientError] if the TLS backend cannot be
    /// initialised.
    pub fn new(url: &str, timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| Error::HttpClientError(error.to_string()))?;

        Ok(Self {
            client,
            url: url.to_owned(),
        })
    }

    /// The URL of the sales endpoint.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the sales for `region` and `year` with a single request.
    ///
    /// [Region::Brasil] and a `year` of `None` leave the respective filter
    /// out of the request.
    ///
    /// # Errors
    /// Returns [Error::DataUnavailable] if the endpoint cannot be reached,
    /// responds with a non-2xx status, or returns a body that is not a JSON
    /// array of sales. A sale with a negative price is also rejected.
    pub async fn fetch_sales(&self, region: Region, year: Option<i32>) -> Result<Vec<Sale>, Error> {
        let query = SalesQuery {
            region: region.query_value(),
            year,
        };
        tracing::debug!("Fetching sales from {} with {query:?}", self.url);

        let response = self
            .client
            .get(&self.url)
            .query(&query)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|error| {
                Error::DataUnavailable(format!("request to {} failed: {error}", self.url))
            })?;

        let sales: Vec<Sale> = response.json().await.map_err(|error| {
            Error::DataUnavailable(format!(
                "could not decode sales from {}: {error}",
                self.url
            ))
        })?;

        if let Some(sale) = sales.iter().find(|sale| sale.price < 0.0) {
            return Err(Error::DataUnavailable(format!(
                "sale by {} on {} has a negative price {}",
                sale.seller, sale.date, sale.price
            )));
        }

        tracing::debug!("Fetched {} sales", sales.len());

        Ok(sales)
    }
}

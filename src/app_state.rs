//! Implements a struct that holds the state of the REST server.

use std::time::Duration;

use crate::{Error, SalesClient};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The client for the remote sales endpoint.
    pub sales_client: SalesClient,
}

impl AppState {
    /// Create a new [AppState] that fetches sales from `sales_url`.
    ///
    /// Requests to the sales endpoint fail after `timeout`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(sales_url: &str, timeout: Duration) -> Result<Self, Error> {
        let sales_client = SalesClient::new(sales_url, timeout)?;

        Ok(Self { sales_client })
    }
}

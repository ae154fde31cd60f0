//! A stand-in for the remote sales endpoint and helpers for building sales.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    Router,
    extract::Query,
    http::{StatusCode, header::CONTENT_TYPE},
    routing::get,
};
use axum_test::TestServer;
use time::Date;

use crate::sales::Sale;

/// A sales endpoint listening on a random local port.
///
/// The endpoint stops when this is dropped.
pub(crate) struct StubSalesServer {
    /// The URL to pass to the sales client.
    pub url: String,
    queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
    _server: TestServer,
}

impl StubSalesServer {
    /// The query parameters of every request received so far.
    pub fn queries(&self) -> Vec<HashMap<String, String>> {
        self.queries.lock().unwrap().clone()
    }
}

/// Start a server that answers every request with `status` and `body`.
pub(crate) async fn spawn_stub_sales_server(status: StatusCode, body: String) -> StubSalesServer {
    let queries = Arc::new(Mutex::new(Vec::new()));
    let recorded = queries.clone();

    let app = Router::new().route(
        "/produtos",
        get(move |Query(params): Query<HashMap<String, String>>| {
            let recorded = recorded.clone();
            let body = body.clone();

            async move {
                recorded.lock().unwrap().push(params);
                (status, [(CONTENT_TYPE, "application/json")], body)
            }
        }),
    );

    // The sales client needs a real socket to connect to.
    let server = TestServer::builder()
        .http_transport()
        .try_build(app)
        .expect("Could not create stub sales server.");
    let url = server
        .server_url("/produtos")
        .expect("Stub sales server has no address.");

    StubSalesServer {
        url: url.to_string(),
        queries,
        _server: server,
    }
}

/// A sale with the fields the dashboard aggregates over.
///
/// The coordinates are derived from `location` so that every sale in the
/// same place has the same coordinates.
pub(crate) fn test_sale(
    seller: &str,
    location: &str,
    category: &str,
    price: f64,
    date: Date,
) -> Sale {
    let offset = location.bytes().map(f64::from).sum::<f64>() / 10.0;

    Sale {
        product: Some(format!("{category} item")),
        category: category.to_owned(),
        price,
        shipping: Some(0.0),
        date,
        seller: seller.to_owned(),
        location: location.to_owned(),
        rating: Some(5),
        payment_type: Some("boleto".to_owned()),
        installments: Some(1),
        latitude: -offset,
        longitude: -30.0 - offset,
    }
}

/// The JSON body the remote endpoint would send for `sales`.
pub(crate) fn sales_json(sales: &[Sale]) -> String {
    serde_json::to_string(sales).unwrap()
}

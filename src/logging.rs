//! Middleware for logging requests and responses.

use axum::{
    body::Body,
    extract::Request,
    http::{request, response},
    middleware::Next,
    response::Response,
};

/// The number of characters of a response body that are logged.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// The request line and the response status and size are logged at the
/// `info` level. The start of the response body, truncated to
/// [LOG_BODY_LENGTH_LIMIT] characters, is logged at the `debug` level.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    log_request(&parts);

    let response = next.run(Request::from_parts(parts, body)).await;

    let (parts, body) = response.into_parts();
    let body_bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("Could not read response body: {error}");
            return Response::from_parts(parts, Body::empty());
        }
    };

    log_response(&parts, &String::from_utf8_lossy(&body_bytes));

    Response::from_parts(parts, Body::from(body_bytes))
}

fn log_request(parts: &request::Parts) {
    tracing::info!("Received request: {} {}", parts.method, parts.uri);
}

fn log_response(parts: &response::Parts, body: &str) {
    tracing::info!("Sending response: {} ({} bytes)", parts.status, body.len());

    if body.chars().count() > LOG_BODY_LENGTH_LIMIT {
        let start: String = body.chars().take(LOG_BODY_LENGTH_LIMIT).collect();
        tracing::debug!("Response body: {start}...");
    } else {
        tracing::debug!("Response body: {body:?}");
    }
}

#[cfg(test)]
mod tests {
    use axum::{Router, http::StatusCode, middleware, routing::get};
    use axum_test::TestServer;

    use crate::logging::logging_middleware;

    #[tokio::test]
    async fn passes_response_through_unchanged() {
        let body = "Olá, ".repeat(40);
        let expected = body.clone();
        let app = Router::new()
            .route(
                "/hello",
                get(move || async move { (StatusCode::CREATED, body) }),
            )
            .layer(middleware::from_fn(logging_middleware));
        let server = TestServer::try_new(app).expect("Could not create test server.");

        let response = server.get("/hello").await;

        response.assert_status(StatusCode::CREATED);
        assert_eq!(response.text(), expected);
    }
}

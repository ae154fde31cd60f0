//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::{alert::Alert, html::error_view, internal_server_error::InternalServerError};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The sales data could not be fetched or decoded.
    ///
    /// This covers an unreachable endpoint, a timeout, a non-2xx status and
    /// a response body that does not match the expected record shape.
    /// The string holds the underlying cause for the server logs.
    #[error("sales data is unavailable: {0}")]
    DataUnavailable(String),

    /// The HTTP client used to fetch the sales data could not be built.
    #[error("could not create the HTTP client: {0}")]
    HttpClientError(String),

    /// The filtered sales could not be written as CSV.
    #[error("could not export the sales as CSV: {0}")]
    CsvExport(String),
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        Error::CsvExport(value.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::DataUnavailable(cause) => {
                tracing::error!("Sales data unavailable: {cause}");
                (
                    StatusCode::BAD_GATEWAY,
                    Html(
                        error_view(
                            "Dados indisponíveis",
                            "502",
                            "Não foi possível carregar os dados de vendas.",
                            "Tente novamente em alguns instantes.",
                        )
                        .into_string(),
                    ),
                )
                    .into_response()
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::DataUnavailable(cause) => {
                tracing::error!("Sales data unavailable: {cause}");
                (
                    StatusCode::BAD_GATEWAY,
                    Alert::error(
                        "Dados indisponíveis",
                        "Não foi possível carregar os dados de vendas. \
                        Tente novamente ou altere os filtros.",
                    ),
                )
            }
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::error(
                        "Algo deu errado",
                        "Ocorreu um erro inesperado, verifique os logs do servidor.",
                    ),
                )
            }
        };

        (status_code, alert.into_html()).into_response()
    }
}

//! Defines the app level error type and its conversion to rendered alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{alert::Alert, api::ApiError, sign_in};

/// The message shown when the wallet API reports an internal error.
pub(crate) const UNKNOWN_ERROR_MSG: &str = "Erro desconhecido! Tente novamente";
/// The message shown when the wallet API cannot be reached at all.
pub(crate) const OFFLINE_ERROR_MSG: &str = "Servidor offline";
/// The message shown when the wallet API answers with a status code the app
/// does not recognise.
pub(crate) const UNEXPECTED_ERROR_MSG: &str = "Erro inesperado! Tente novamente";

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The user submitted a value that could not be parsed as a currency
    /// amount.
    #[error("could not parse {0:?} as a currency amount")]
    InvalidAmount(String),

    /// A wallet API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// The user-facing message for a failed wallet API call.
///
/// [ApiError::Unauthorized] is included for completeness, but callers should
/// normally redirect to the sign-in page instead of showing it in place.
pub(crate) fn api_failure_message(error: &ApiError) -> &'static str {
    match error {
        ApiError::Unauthorized => sign_in::SESSION_EXPIRED_MSG,
        ApiError::Server => UNKNOWN_ERROR_MSG,
        ApiError::Offline(_) => OFFLINE_ERROR_MSG,
        ApiError::Unexpected(_) => UNEXPECTED_ERROR_MSG,
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::InvalidAmount(value) => (
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Valor inválido!",
                    &format!("\"{value}\" não é um valor válido, use o formato 1.234,56."),
                ),
            ),
            Error::Api(ApiError::Server) => (
                StatusCode::BAD_GATEWAY,
                Alert::error_simple(UNKNOWN_ERROR_MSG),
            ),
            Error::Api(ApiError::Offline(reason)) => {
                tracing::error!("Could not reach the wallet API: {reason}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Alert::error_simple(OFFLINE_ERROR_MSG),
                )
            }
            Error::Api(ApiError::Unexpected(status)) => {
                tracing::error!("The wallet API returned an unexpected status code {status}");
                (
                    StatusCode::BAD_GATEWAY,
                    Alert::error_simple(UNEXPECTED_ERROR_MSG),
                )
            }
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::error_simple(UNEXPECTED_ERROR_MSG),
                )
            }
        };

        (status_code, alert.into_html()).into_response()
    }
}

#[cfg(test)]
mod error_tests {
    use axum::http::StatusCode;
    use scraper::{Html, Selector};

    use crate::api::ApiError;

    use super::{Error, OFFLINE_ERROR_MSG, UNEXPECTED_ERROR_MSG, UNKNOWN_ERROR_MSG};

    async fn alert_text(response: axum::response::Response) -> String {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let fragment = Html::parse_fragment(&String::from_utf8_lossy(&body));
        let selector = Selector::parse("div[data-alert]").unwrap();

        fragment
            .select(&selector)
            .next()
            .expect("expected an alert in the response body")
            .text()
            .collect::<String>()
    }

    #[tokio::test]
    async fn invalid_amount_is_a_bad_request_with_alert() {
        let response = Error::InvalidAmount("abc".to_owned()).into_alert_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(alert_text(response).await.contains("Valor inválido!"));
    }

    #[tokio::test]
    async fn api_failures_map_to_their_alert_messages() {
        let cases = [
            (
                ApiError::Server,
                StatusCode::BAD_GATEWAY,
                UNKNOWN_ERROR_MSG,
            ),
            (
                ApiError::Offline("connection refused".to_owned()),
                StatusCode::SERVICE_UNAVAILABLE,
                OFFLINE_ERROR_MSG,
            ),
            (
                ApiError::Unexpected(418),
                StatusCode::BAD_GATEWAY,
                UNEXPECTED_ERROR_MSG,
            ),
        ];

        for (error, want_status, want_message) in cases {
            let response = Error::from(error).into_alert_response();

            assert_eq!(response.status(), want_status);
            assert!(alert_text(response).await.contains(want_message));
        }
    }
}

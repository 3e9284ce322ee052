//! Defines the endpoint for creating a new transaction through the wallet API.
use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::{Form, PrivateCookieJar, cookie::Key};
use axum_htmx::HxRedirect;
use serde::Deserialize;

use crate::{
    AppState, Error, endpoints,
    api::{ApiError, NewTransaction, TransactionKind, WalletApi},
    money::Amount,
    session::get_session_token,
    sign_in::expired_sign_in_url,
};

/// The state needed to create a transaction.
#[derive(Clone)]
pub struct CreateTransactionState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The client for the wallet API that stores transactions.
    pub wallet_api: Arc<dyn WalletApi>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            wallet_api: state.wallet_api.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<CreateTransactionState> for Key {
    fn from_ref(state: &CreateTransactionState) -> Self {
        state.cookie_key.clone()
    }
}

/// The form data for creating a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// The value of the transaction as entered by the user, e.g. "R$ 1.234,56".
    pub value: String,
    /// Text detailing the transaction.
    pub description: String,
    /// Whether the transaction is an income or an outcome.
    pub kind: TransactionKind,
}

/// A route handler for creating a new transaction, redirects to the wallet
/// view on success.
///
/// The value is parsed from the Brazilian currency format before it is sent
/// to the wallet API. Invalid values return the form error as an alert
/// without calling the API.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    jar: PrivateCookieJar,
    Form(form): Form<TransactionForm>,
) -> Response {
    let Some(token) = get_session_token(&jar) else {
        return (
            HxRedirect(endpoints::SIGN_IN_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response();
    };

    let value = match Amount::parse_brl(&form.value) {
        Ok(value) => value,
        Err(_) => return Error::InvalidAmount(form.value).into_alert_response(),
    };

    let transaction = NewTransaction {
        value,
        description: form.description,
        kind: form.kind,
    };

    match state.wallet_api.create_transaction(&token, transaction).await {
        Ok(()) => (
            HxRedirect(endpoints::WALLET_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(ApiError::Unauthorized) => {
            (HxRedirect(expired_sign_in_url()), StatusCode::SEE_OTHER).into_response()
        }
        Err(error) => {
            tracing::error!("Could not create transaction: {error}");
            Error::from(error).into_alert_response()
        }
    }
}

#[cfg(test)]
mod create_transaction_tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        extract::State,
        http::{Response, StatusCode},
    };
    use axum_extra::extract::{Form, PrivateCookieJar};
    use axum_htmx::HX_REDIRECT;

    use crate::{
        api::{ApiError, SessionToken, TransactionKind},
        app_state::create_cookie_key,
        endpoints,
        error::OFFLINE_ERROR_MSG,
        money::Amount,
        session::{DEFAULT_COOKIE_DURATION, set_session_cookie},
        sign_in::expired_sign_in_url,
        test_utils::StubWalletApi,
    };

    use super::{CreateTransactionState, TransactionForm, create_transaction_endpoint};

    fn get_test_state(api: Arc<StubWalletApi>) -> CreateTransactionState {
        CreateTransactionState {
            cookie_key: create_cookie_key("foobar"),
            wallet_api: api,
        }
    }

    fn jar_with_session(state: &CreateTransactionState) -> PrivateCookieJar {
        set_session_cookie(
            PrivateCookieJar::new(state.cookie_key.clone()),
            &SessionToken::new("abc123"),
            DEFAULT_COOKIE_DURATION,
        )
    }

    fn test_form() -> TransactionForm {
        TransactionForm {
            value: "R$ 1.234,56".to_owned(),
            description: "Mercado".to_owned(),
            kind: TransactionKind::Outcome,
        }
    }

    #[track_caller]
    fn assert_hx_redirect(response: &Response<Body>, want_location: &str) {
        let redirect_location = response.headers().get(HX_REDIRECT).unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(redirect_location, want_location);
    }

    #[tokio::test]
    async fn can_create_transaction() {
        let api = Arc::new(StubWalletApi::default());
        let state = get_test_state(api.clone());
        let jar = jar_with_session(&state);

        let response = create_transaction_endpoint(State(state), jar, Form(test_form())).await;

        assert_hx_redirect(&response, endpoints::WALLET_VIEW);

        let created = api.created_transactions();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].value, Amount::from_centavos(123_456));
        assert_eq!(created[0].description, "Mercado");
        assert_eq!(created[0].kind, TransactionKind::Outcome);
    }

    #[tokio::test]
    async fn invalid_value_returns_alert_without_calling_api() {
        let api = Arc::new(StubWalletApi::default());
        let state = get_test_state(api.clone());
        let jar = jar_with_session(&state);

        let form = TransactionForm {
            value: "abc".to_owned(),
            ..test_form()
        };

        let response = create_transaction_endpoint(State(state), jar, Form(form)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(api.created_transactions().is_empty());
    }

    #[tokio::test]
    async fn missing_session_redirects_to_sign_in() {
        let api = Arc::new(StubWalletApi::default());
        let state = get_test_state(api.clone());
        let jar = PrivateCookieJar::new(state.cookie_key.clone());

        let response = create_transaction_endpoint(State(state), jar, Form(test_form())).await;

        assert_hx_redirect(&response, endpoints::SIGN_IN_VIEW);
        assert!(api.created_transactions().is_empty());
    }

    #[tokio::test]
    async fn rejected_session_redirects_to_sign_in_with_reason() {
        let api = Arc::new(
            StubWalletApi::default().with_create_error(ApiError::Unauthorized),
        );
        let state = get_test_state(api);
        let jar = jar_with_session(&state);

        let response = create_transaction_endpoint(State(state), jar, Form(test_form())).await;

        assert_hx_redirect(&response, &expired_sign_in_url());
    }

    #[tokio::test]
    async fn offline_server_returns_alert() {
        let api = Arc::new(StubWalletApi::default().with_create_error(ApiError::Offline(
            "connection refused".to_owned(),
        )));
        let state = get_test_state(api);
        let jar = jar_with_session(&state);

        let response = create_transaction_endpoint(State(state), jar, Form(test_form())).await;

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8_lossy(&body).to_string();
        assert!(text.contains(OFFLINE_ERROR_MSG), "body should show {OFFLINE_ERROR_MSG:?}");
    }
}

//! Defines the route handler for the wallet page.

use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};

use crate::{
    AppState,
    alert::Alert,
    api::{ApiError, WalletApi},
    endpoints,
    error::api_failure_message,
    session::get_session_token,
    sign_in::expired_sign_in_url,
};

use super::view::wallet_view;

/// The state needed for the wallet page.
#[derive(Clone)]
pub struct WalletPageState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The client for the wallet API that owns the transaction data.
    pub wallet_api: Arc<dyn WalletApi>,
}

impl FromRef<AppState> for WalletPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            wallet_api: state.wallet_api.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<WalletPageState> for Key {
    fn from_ref(state: &WalletPageState) -> Self {
        state.cookie_key.clone()
    }
}

/// Render the wallet page with the user's transactions and balance.
///
/// Clients without a session cookie are redirected to the sign-in page before
/// any wallet API call is made. A session rejected by the wallet API redirects
/// to the sign-in page with an explanation, while other API failures keep the
/// client on the wallet page and show an alert in place of the table.
pub async fn get_wallet_page(
    State(state): State<WalletPageState>,
    jar: PrivateCookieJar,
) -> Response {
    let Some(token) = get_session_token(&jar) else {
        return Redirect::to(endpoints::SIGN_IN_VIEW).into_response();
    };

    match state.wallet_api.get_transactions(&token).await {
        Ok(transactions) => wallet_view(Some(&transactions), None).into_response(),
        Err(ApiError::Unauthorized) => Redirect::to(&expired_sign_in_url()).into_response(),
        Err(error) => {
            tracing::error!("Could not fetch transactions: {error}");
            wallet_view(None, Some(Alert::error_simple(api_failure_message(&error))))
                .into_response()
        }
    }
}

//! Implements a struct that holds the state of the web server.

use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};
use time::Duration;

use crate::{api::WalletApi, session::DEFAULT_COOKIE_DURATION};

/// The state of the web server.
#[derive(Clone)]
pub struct AppState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,

    /// The duration for which cookies used for authentication are valid.
    pub cookie_duration: Duration,

    /// The client for the wallet API that owns the transaction data.
    pub wallet_api: Arc<dyn WalletApi>,
}

impl AppState {
    /// Create a new [AppState].
    ///
    /// `cookie_secret` should be a securely generated random string.
    pub fn new(cookie_secret: &str, wallet_api: Arc<dyn WalletApi>) -> Self {
        Self {
            cookie_key: create_cookie_key(cookie_secret),
            cookie_duration: DEFAULT_COOKIE_DURATION,
            wallet_api,
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

/// Create a signing key for cookies from a `secret` string.
pub fn create_cookie_key(secret: &str) -> Key {
    let hash = Sha512::digest(secret);

    Key::from(&hash)
}

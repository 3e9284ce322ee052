//! The HTTP implementation of the wallet API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, redirect};

use super::{ApiError, NewTransaction, SessionToken, SignInData, SignInResponse, Transaction, WalletApi};

/// A [WalletApi] client that talks JSON over HTTP with bearer-token
/// authorization.
pub struct HttpWalletApi {
    client: Client,
    base_url: String,
}

impl HttpWalletApi {
    /// Create a client for the wallet API at `base_url`.
    ///
    /// `timeout` bounds each request from connection to the end of the
    /// response body.
    ///
    /// # Errors
    ///
    /// Returns a [reqwest::Error] if the underlying HTTP client cannot be
    /// built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(redirect::Policy::limited(10))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl WalletApi for HttpWalletApi {
    async fn sign_in(&self, credentials: SignInData) -> Result<SignInResponse, ApiError> {
        let response = self
            .client
            .post(self.url("/sign-in"))
            .json(&credentials)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    async fn get_transactions(&self, token: &SessionToken) -> Result<Vec<Transaction>, ApiError> {
        let response = self
            .client
            .get(self.url("/transactions"))
            .bearer_auth(token.as_str())
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    async fn create_transaction(
        &self,
        token: &SessionToken,
        transaction: NewTransaction,
    ) -> Result<(), ApiError> {
        self.client
            .post(self.url("/transactions"))
            .bearer_auth(token.as_str())
            .json(&transaction)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        match error.status() {
            Some(StatusCode::UNAUTHORIZED) => ApiError::Unauthorized,
            Some(StatusCode::INTERNAL_SERVER_ERROR) => ApiError::Server,
            Some(status) => ApiError::Unexpected(status.as_u16()),
            // Connection, timeout and body decode failures have no status.
            None => ApiError::Offline(error.to_string()),
        }
    }
}

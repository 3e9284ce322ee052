//! The client interface for the external wallet REST API.
//!
//! The API owns all persistence: credentials, sessions and transactions.
//! Route handlers depend on the [WalletApi] trait so that tests can swap in a
//! stub, and the server wires in [HttpWalletApi] at startup.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::money::Amount;

mod http;

pub use http::HttpWalletApi;

/// The operations the external wallet API offers.
#[async_trait]
pub trait WalletApi: Send + Sync {
    /// Exchange the user's credentials for a session token.
    async fn sign_in(&self, credentials: SignInData) -> Result<SignInResponse, ApiError>;

    /// Fetch all of the user's transactions, oldest first.
    async fn get_transactions(&self, token: &SessionToken) -> Result<Vec<Transaction>, ApiError>;

    /// Record a new transaction.
    async fn create_transaction(
        &self,
        token: &SessionToken,
        transaction: NewTransaction,
    ) -> Result<(), ApiError>;
}

/// The ways a wallet API call can fail, grouped by how the app should react.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The API rejected the credentials or session token (HTTP 401).
    #[error("the wallet API rejected the credentials or session token")]
    Unauthorized,

    /// The API reported an internal error (HTTP 500).
    #[error("the wallet API reported an internal error")]
    Server,

    /// The request never produced an HTTP status: the connection failed, the
    /// request timed out, or the response body could not be decoded.
    #[error("could not reach the wallet API: {0}")]
    Offline(String),

    /// The API returned a status code this client does not recognise.
    #[error("the wallet API returned an unexpected status code {0}")]
    Unexpected(u16),
}

/// An opaque session token issued by the wallet API at sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap a raw token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token string, for bearer authorization and cookie storage.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Whether a transaction brings money in or takes money out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming in.
    Income,
    /// Money going out.
    Outcome,
}

impl TransactionKind {
    /// The wire and form value for the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Outcome => "outcome",
        }
    }
}

/// A transaction as reported by the wallet API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The date when the transaction happened.
    #[serde(with = "wire_date")]
    pub date: Date,
    /// Text detailing the transaction.
    pub description: String,
    /// The magnitude of the transaction. The sign of its effect on the
    /// balance comes from `kind`, not from this value.
    pub value: Amount,
    /// Whether the transaction is an income or an outcome.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

/// The data sent to the wallet API to record a transaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTransaction {
    /// The magnitude of the transaction.
    pub value: Amount,
    /// Text detailing the transaction.
    pub description: String,
    /// Whether the transaction is an income or an outcome.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

/// The credentials sent to the wallet API at sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignInData {
    /// The user's e-mail address.
    pub email: String,
    /// The user's password, sent as-is for the API to verify.
    pub password: String,
}

/// The wallet API's response to a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignInResponse {
    /// The user's display name.
    pub name: String,
    /// The session token for subsequent requests.
    pub token: SessionToken,
}

/// Serde adapter for the API's date strings.
///
/// Accepts "YYYY-MM-DD" with or without a trailing time component, e.g. both
/// "2021-06-08" and "2021-06-08T14:00:00.000Z".
mod wire_date {
    use serde::{Deserialize, Deserializer, Serializer, de};
    use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

    const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

    pub fn serialize<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let formatted = date.format(DATE_FORMAT).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Date, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        let date_part = text.get(..10).unwrap_or(&text);

        Date::parse(date_part, DATE_FORMAT).map_err(de::Error::custom)
    }
}

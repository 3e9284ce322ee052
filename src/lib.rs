//! MyWallet is a web app for tracking personal income and outgoings.
//!
//! This library serves HTML pages directly. It owns no data: transactions and
//! credentials live behind the external wallet REST API, which this crate
//! talks to through the [WalletApi] trait.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod alert;
mod api;
mod app_state;
mod endpoints;
mod error;
mod html;
mod internal_server_error;
mod log_out;
mod logging;
mod money;
mod navigation;
mod new_transaction;
mod not_found;
mod routing;
mod session;
mod sign_in;
#[cfg(test)]
mod test_utils;
mod wallet;

pub use api::{
    ApiError, HttpWalletApi, NewTransaction, SessionToken, SignInData, SignInResponse, Transaction,
    TransactionKind, WalletApi,
};
pub use app_state::AppState;
pub use error::Error;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use money::Amount;
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    endpoints,
    internal_server_error::get_internal_server_error_page,
    log_out::get_log_out,
    new_transaction::{create_transaction_endpoint, get_new_income_page, get_new_outcome_page},
    not_found::get_404_not_found,
    sign_in::{get_sign_in_page, post_sign_in},
    wallet::get_wallet_page,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::SIGN_IN_VIEW, get(get_sign_in_page))
        .route(endpoints::SIGN_IN_API, post(post_sign_in))
        .route(endpoints::LOG_OUT, get(get_log_out))
        .route(endpoints::WALLET_VIEW, get(get_wallet_page))
        .route(endpoints::NEW_INCOME_VIEW, get(get_new_income_page))
        .route(endpoints::NEW_OUTCOME_VIEW, get(get_new_outcome_page))
        .route(endpoints::TRANSACTIONS_API, post(create_transaction_endpoint))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the wallet page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::WALLET_VIEW)
}

//! The app's endpoint URIs.

/// The root route which redirects to the wallet page.
pub const ROOT: &str = "/";
/// The page listing the user's transactions and their balance.
pub const WALLET_VIEW: &str = "/wallet";
/// The page for signing in to the wallet.
pub const SIGN_IN_VIEW: &str = "/signin";
/// The page for recording money coming in.
pub const NEW_INCOME_VIEW: &str = "/newtransaction/income";
/// The page for recording money going out.
pub const NEW_OUTCOME_VIEW: &str = "/newtransaction/outcome";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route for signing in a user.
pub const SIGN_IN_API: &str = "/api/signin";
/// The route for the client to end the current session.
pub const LOG_OUT: &str = "/api/logout";
/// The route to create transactions.
pub const TRANSACTIONS_API: &str = "/api/transactions";

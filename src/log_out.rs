//! Log-out route handler that invalidates the session cookie and redirects users.

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::PrivateCookieJar;

use crate::{endpoints, session::invalidate_session_cookie};

/// Invalidate the session cookie and redirect the client to the sign-in page.
pub async fn get_log_out(jar: PrivateCookieJar) -> Response {
    let jar = invalidate_session_cookie(jar);

    (jar, Redirect::to(endpoints::SIGN_IN_VIEW)).into_response()
}

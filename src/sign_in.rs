//! This file defines the routes for displaying the sign-in page and handling sign-in requests.
//! The session module handles the lower level cookie logic.

use std::sync::Arc;

use axum::{
    Form,
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use serde::Deserialize;
use time::Duration;

use crate::{
    AppState,
    api::{ApiError, SignInData, WalletApi},
    app_state::create_cookie_key,
    endpoints,
    error::api_failure_message,
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, auth_card, base,
        loading_spinner, password_input},
    session::{DEFAULT_COOKIE_DURATION, set_session_cookie},
};

/// The message shown when the wallet API rejects the stored session token.
pub const SESSION_EXPIRED_MSG: &str = "Sessão inválida! Entre novamente.";

pub const INVALID_CREDENTIALS_ERROR_MSG: &str = "E-mail ou senha incorretos!";

/// The URL for the sign-in page with the query string that makes it explain
/// the user was signed out.
pub(crate) fn expired_sign_in_url() -> String {
    format!("{}?reason=expired", endpoints::SIGN_IN_VIEW)
}

fn sign_in_form(email: &str, error_message: Option<&str>) -> Markup {
    html! {
        form
            hx-post=(endpoints::SIGN_IN_API)
            hx-indicator="#indicator"
            hx-disabled-elt="#email, #password, #submit-button"
            class="space-y-4 md:space-y-6"
        {
            div
            {
                label
                    for="email"
                    class=(FORM_LABEL_STYLE)
                {
                    "E-mail"
                }

                input
                    type="email"
                    name="email"
                    id="email"
                    placeholder="nome@exemplo.com"
                    class=(FORM_TEXT_INPUT_STYLE)
                    required
                    value=(email);
            }

            (password_input("", error_message))

            button
                type="submit" id="submit-button" tabindex="0"
                class=(BUTTON_PRIMARY_STYLE)
            {
                span class="inline htmx-indicator" id="indicator"
                {
                    (loading_spinner())
                }
                "Entrar"
            }
        }
    }
}

#[derive(Deserialize)]
pub struct ReasonQuery {
    pub reason: Option<String>,
}

/// Display the sign-in page.
///
/// When the query string carries `reason=expired`, the page explains that the
/// previous session was rejected by the wallet API.
pub async fn get_sign_in_page(Query(query): Query<ReasonQuery>) -> Response {
    let alert = match query.reason.as_deref() {
        Some("expired") => Some(crate::alert::Alert::error_simple(SESSION_EXPIRED_MSG)),
        _ => None,
    };

    let content = html! {
        @if let Some(alert) = alert {
            div class="flex flex-col items-center pt-4" { (alert.into_inline_html()) }
        }

        (auth_card("Entre na sua conta", &sign_in_form("", None)))
    };

    base("Entrar", &content).into_response()
}

/// The state needed to sign a user in.
#[derive(Clone)]
pub struct SignInState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The duration for which cookies used for authentication are valid.
    pub cookie_duration: Duration,
    /// The client for the wallet API that verifies credentials.
    pub wallet_api: Arc<dyn WalletApi>,
}

impl SignInState {
    /// Create the cookie key from a string and set the default cookie duration.
    pub fn new(cookie_secret: &str, wallet_api: Arc<dyn WalletApi>) -> Self {
        Self {
            cookie_key: create_cookie_key(cookie_secret),
            cookie_duration: DEFAULT_COOKIE_DURATION,
            wallet_api,
        }
    }
}

impl FromRef<AppState> for SignInState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
            wallet_api: state.wallet_api.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<SignInState> for Key {
    fn from_ref(state: &SignInState) -> Self {
        state.cookie_key.clone()
    }
}

/// The raw data entered by the user in the sign-in form.
#[derive(Clone, Deserialize)]
pub struct SignInForm {
    /// E-mail address entered during sign-in.
    pub email: String,
    /// Password entered during sign-in.
    pub password: String,
}

/// Handler for sign-in requests via the POST method.
///
/// On a successful sign-in request, the session token returned by the wallet
/// API is stored in a private cookie and the client is redirected to the
/// wallet page. Otherwise, the form is returned with an error message
/// explaining the problem.
pub async fn post_sign_in(
    State(state): State<SignInState>,
    jar: PrivateCookieJar,
    Form(form): Form<SignInForm>,
) -> Response {
    let credentials = SignInData {
        email: form.email.clone(),
        password: form.password,
    };

    match state.wallet_api.sign_in(credentials).await {
        Ok(session) => {
            let jar = set_session_cookie(jar, &session.token, state.cookie_duration);

            (
                StatusCode::SEE_OTHER,
                HxRedirect(endpoints::WALLET_VIEW.to_owned()),
                jar,
            )
                .into_response()
        }
        Err(ApiError::Unauthorized) => {
            sign_in_form(&form.email, Some(INVALID_CREDENTIALS_ERROR_MSG)).into_response()
        }
        Err(error) => {
            tracing::error!("Could not sign in: {error}");
            sign_in_form(&form.email, Some(api_failure_message(&error))).into_response()
        }
    }
}


#[cfg(test)]
mod sign_in_tests {
    use std::sync::Arc;

    use axum::{
        Form,
        body::Body,
        extract::State,
        http::{Response, StatusCode, header::SET_COOKIE},
    };
    use axum_extra::extract::{PrivateCookieJar, cookie::Cookie};
    use axum_htmx::HX_REDIRECT;
    use time::OffsetDateTime;

    use crate::{
        api::{ApiError, SessionToken, SignInResponse},
        endpoints,
        error::{OFFLINE_ERROR_MSG, UNKNOWN_ERROR_MSG},
        session::COOKIE_TOKEN,
        test_utils::StubWalletApi,
    };

    use super::{INVALID_CREDENTIALS_ERROR_MSG, SignInForm, SignInState, post_sign_in};

    fn get_test_state(api: Arc<StubWalletApi>) -> SignInState {
        SignInState::new("foobar", api)
    }

    async fn new_sign_in_request(state: SignInState, form: SignInForm) -> Response<Body> {
        let jar = PrivateCookieJar::new(state.cookie_key.clone());

        post_sign_in(State(state), jar, Form(form)).await
    }

    fn test_form() -> SignInForm {
        SignInForm {
            email: "test@test.com".to_owned(),
            password: "hunter2".to_owned(),
        }
    }

    #[tokio::test]
    async fn sign_in_sets_cookie_and_redirects_to_wallet() {
        let api = Arc::new(StubWalletApi::default().with_sign_in_result(Ok(SignInResponse {
            name: "Maria".to_owned(),
            token: SessionToken::new("abc123"),
        })));

        let response = new_sign_in_request(get_test_state(api), test_form()).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(HX_REDIRECT).unwrap(),
            endpoints::WALLET_VIEW
        );

        let mut found_token_cookie = false;

        for cookie_header in response.headers().get_all(SET_COOKIE) {
            let cookie = Cookie::parse(cookie_header.to_str().unwrap()).unwrap();

            if cookie.name() == COOKIE_TOKEN {
                assert!(cookie.expires_datetime() > Some(OffsetDateTime::now_utc()));
                found_token_cookie = true;
            }
        }

        assert!(found_token_cookie, "could not find cookie '{COOKIE_TOKEN}'");
    }

    #[tokio::test]
    async fn sign_in_fails_with_incorrect_credentials() {
        let api = Arc::new(
            StubWalletApi::default().with_sign_in_result(Err(ApiError::Unauthorized)),
        );

        let response = new_sign_in_request(get_test_state(api), test_form()).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_body_contains_message(response, INVALID_CREDENTIALS_ERROR_MSG).await;
    }

    #[tokio::test]
    async fn sign_in_reports_server_errors() {
        let api = Arc::new(StubWalletApi::default().with_sign_in_result(Err(ApiError::Server)));

        let response = new_sign_in_request(get_test_state(api), test_form()).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_body_contains_message(response, UNKNOWN_ERROR_MSG).await;
    }

    #[tokio::test]
    async fn sign_in_reports_offline_server() {
        let api = Arc::new(StubWalletApi::default().with_sign_in_result(Err(ApiError::Offline(
            "connection refused".to_owned(),
        ))));

        let response = new_sign_in_request(get_test_state(api), test_form()).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_body_contains_message(response, OFFLINE_ERROR_MSG).await;
    }

    async fn assert_body_contains_message(response: Response<Body>, message: &str) {
        let body = response.into_body();
        let body = axum::body::to_bytes(body, usize::MAX).await.unwrap();
        let text = String::from_utf8_lossy(&body).to_string();
        let fragment = scraper::Html::parse_fragment(&text);
        let error_selector = scraper::Selector::parse("p.text-red-500.text-base").unwrap();
        let error = fragment
            .select(&error_selector)
            .next()
            .expect("expected error message paragraph");
        let error_text = error.text().collect::<String>();
        assert_eq!(
            error_text.trim(),
            message,
            "response body should include error message \"{message}\", got \"{error_text}\""
        );
    }
}

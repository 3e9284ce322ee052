//! Defines functions for storing the wallet API session token in a private
//! cookie.

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use time::{Duration, OffsetDateTime};

use crate::api::SessionToken;

pub(crate) const COOKIE_TOKEN: &str = "token";
/// The default duration for which session cookies are valid.
pub(crate) const DEFAULT_COOKIE_DURATION: Duration = Duration::days(1);

/// Add the session cookie to the cookie jar, indicating that a user is signed
/// in.
///
/// Sets the expiry of the cookie to `duration` from the current time.
///
/// Returns the cookie jar with the cookie added.
pub(crate) fn set_session_cookie(
    jar: PrivateCookieJar,
    token: &SessionToken,
    duration: Duration,
) -> PrivateCookieJar {
    let expiry = OffsetDateTime::now_utc() + duration;

    jar.add(
        Cookie::build((COOKIE_TOKEN, token.as_str().to_owned()))
            .expires(expiry)
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    )
}

/// Get the session token from the cookie jar, if the user is signed in.
pub(crate) fn get_session_token(jar: &PrivateCookieJar) -> Option<SessionToken> {
    jar.get(COOKIE_TOKEN)
        .map(|cookie| SessionToken::new(cookie.value_trimmed()))
}

/// Set the session cookie to an invalid value and set its max age to zero,
/// which should delete the cookie on the client side.
pub(crate) fn invalidate_session_cookie(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.add(
        Cookie::build((COOKIE_TOKEN, "deleted"))
            .expires(OffsetDateTime::UNIX_EPOCH)
            .max_age(Duration::ZERO)
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    )
}

#[cfg(test)]
mod session_cookie_tests {
    use axum_extra::extract::{PrivateCookieJar, cookie::Key};
    use sha2::{Digest, Sha512};
    use time::{Duration, OffsetDateTime};

    use crate::api::SessionToken;

    use super::{
        COOKIE_TOKEN, DEFAULT_COOKIE_DURATION, get_session_token, invalidate_session_cookie,
        set_session_cookie,
    };

    fn get_jar() -> PrivateCookieJar {
        let hash = Sha512::digest(b"foobar");
        let key = Key::from(&hash);

        PrivateCookieJar::new(key)
    }

    /// Test helper macro to assert that two date times are within one second
    /// of each other. Used instead of a function so that the file and line
    /// number of the caller is included in the error message instead of the
    /// helper.
    macro_rules! assert_date_time_close {
        ($left:expr, $right:expr) => {
            assert!(
                ($left - $right).abs() < Duration::seconds(1),
                "got date time {:?}, want {:?}",
                $left,
                $right
            );
        };
    }

    #[test]
    fn can_set_and_get_session_cookie() {
        let token = SessionToken::new("abc123");

        let jar = set_session_cookie(get_jar(), &token, DEFAULT_COOKIE_DURATION);
        let cookie = jar.get(COOKIE_TOKEN).unwrap();

        assert_eq!(get_session_token(&jar), Some(token));
        assert_date_time_close!(
            cookie.expires_datetime().unwrap(),
            OffsetDateTime::now_utc() + DEFAULT_COOKIE_DURATION
        );
    }

    #[test]
    fn get_session_token_returns_none_without_cookie() {
        assert_eq!(get_session_token(&get_jar()), None);
    }

    #[test]
    fn session_cookie_is_restricted_to_https_and_same_site() {
        let jar = set_session_cookie(get_jar(), &SessionToken::new("abc123"), Duration::hours(1));
        let cookie = jar.get(COOKIE_TOKEN).unwrap();

        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(
            cookie.same_site(),
            Some(axum_extra::extract::cookie::SameSite::Strict)
        );
    }

    #[test]
    fn invalidate_session_cookie_succeeds() {
        let jar = set_session_cookie(
            get_jar(),
            &SessionToken::new("abc123"),
            DEFAULT_COOKIE_DURATION,
        );

        let jar = invalidate_session_cookie(jar);
        let cookie = jar.get(COOKIE_TOKEN).unwrap();

        assert_eq!(cookie.value(), "deleted");
        assert_eq!(cookie.expires_datetime(), Some(OffsetDateTime::UNIX_EPOCH));
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
    }
}

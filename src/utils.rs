use axum::http::{header::SET_COOKIE, HeaderValue};
use axum::response::{IntoResponse, Response};

use crate::{
    extractors::BrowserSession,
    names,
    rejections::{AppError, ResultExt},
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Session cookie header value. Parsing only fails on control characters,
/// which ulid tokens never contain.
pub fn cookie(
    name: &str,
    value: &str,
    secure: bool,
) -> Result<HeaderValue, axum::http::header::InvalidHeaderValue> {
    let secure_attr = if secure { "; Secure" } else { "" };
    format!("{name}={value}; HttpOnly; Max-Age=604800; Path=/; SameSite=Lax{secure_attr}").parse()
}

/// Attach the session cookie to a response when the session was just minted.
pub fn with_session_cookie(
    response: impl IntoResponse,
    session: &BrowserSession,
    secure: bool,
) -> Result<Response, AppError> {
    let mut response = response.into_response();
    if session.is_new {
        let cookie = cookie(names::SESSION_COOKIE_NAME, &session.token, secure)
            .reject("could not build session cookie")?;
        response.headers_mut().insert(SET_COOKIE, cookie);
    }
    Ok(response)
}

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::CookieJar;

use crate::{names, store::SessionStore};

/// Extracts whether the request is an HTMX request by checking the
/// `HX-Request` header.
pub struct IsHtmx(pub bool);

impl<S: Send + Sync> FromRequestParts<S> for IsHtmx {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let is_htmx = parts
            .headers
            .get("HX-Request")
            .and_then(|v: &axum::http::HeaderValue| v.to_str().ok())
            .is_some_and(|v| v == "true");
        Ok(IsHtmx(is_htmx))
    }
}

/// The browser session token from the session cookie, minted fresh when the
/// cookie is missing. A handler that receives a fresh token is responsible
/// for setting the cookie on its response.
pub struct BrowserSession {
    pub token: String,
    pub is_new: bool,
}

impl<S: Send + Sync> FromRequestParts<S> for BrowserSession {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        Ok(match jar.get(names::SESSION_COOKIE_NAME) {
            Some(cookie) => BrowserSession {
                token: cookie.value().to_owned(),
                is_new: false,
            },
            None => BrowserSession {
                token: SessionStore::new_token(),
                is_new: true,
            },
        })
    }
}

use axum::{extract::State, response::Response, routing::get, Router};

use crate::{
    extractors::{BrowserSession, IsHtmx},
    rejections::AppError,
    utils, views,
    views::homepage as homepage_views,
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(homepage))
}

async fn homepage(
    State(state): State<AppState>,
    session: BrowserSession,
    IsHtmx(is_htmx): IsHtmx,
) -> Result<Response, AppError> {
    let page = views::render(is_htmx, "UniMatch", homepage_views::landing());
    utils::with_session_cookie(page, &session, state.secure_cookies)
}

use axum::{
    extract::{Form, State},
    response::Response,
    routing::get,
    Router,
};
use maud::Markup;

use crate::{
    extractors::{BrowserSession, IsHtmx},
    names,
    rejections::AppError,
    services::chance::{ChanceForm, ChanceOutcome},
    utils, views,
    views::chance::{chance_page as chance_view, ChanceState},
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route(names::CHANCE_URL, get(chance_page).post(chance_post))
}

async fn chance_page(
    State(state): State<AppState>,
    session: BrowserSession,
    IsHtmx(is_htmx): IsHtmx,
) -> Result<Response, AppError> {
    let content = chance_view(&ChanceForm::default(), ChanceState::Blank);
    utils::with_session_cookie(
        views::render(is_htmx, "ChanceMe", content),
        &session,
        state.secure_cookies,
    )
}

async fn chance_post(State(state): State<AppState>, Form(form): Form<ChanceForm>) -> Markup {
    let content = match state.chance.estimate(&form).await {
        ChanceOutcome::Prediction(text) => chance_view(&form, ChanceState::Prediction(&text)),
        ChanceOutcome::Invalid(message) => chance_view(&form, ChanceState::Error(message)),
        ChanceOutcome::Rejected(message) => chance_view(&form, ChanceState::Error(&message)),
        ChanceOutcome::Unavailable => chance_view(
            &form,
            ChanceState::Error("Failed to connect to the prediction service. Please try again."),
        ),
    };

    views::titled("ChanceMe", content)
}

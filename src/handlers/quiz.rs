use axum::{
    extract::{Form, State},
    http::HeaderValue,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use maud::Markup;
use serde::Deserialize;

use crate::{
    extractors::{BrowserSession, IsHtmx},
    names,
    rejections::{AppError, ResultExt},
    services::scoring::SubmitOutcome,
    utils, views,
    views::matches as match_views,
    views::quiz as quiz_views,
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::QUIZ_URL, get(quiz_page))
        .route(names::RECORD_ANSWER_URL, post(record_answer))
        .route(names::RESET_QUIZ_URL, post(reset_quiz))
        .route(names::SUBMIT_QUIZ_URL, post(submit_quiz))
}

async fn quiz_page(
    State(state): State<AppState>,
    session: BrowserSession,
    IsHtmx(is_htmx): IsHtmx,
) -> Result<Response, AppError> {
    let answers = state.store.answers(&session.token);
    let content = quiz_views::quiz_page(&state.catalog, &answers, None);
    utils::with_session_cookie(
        views::render(is_htmx, "MatchMe", content),
        &session,
        state.secure_cookies,
    )
}

#[derive(Deserialize)]
struct RecordAnswerBody {
    question: String,
    value: String,
}

/// Record one answer and re-render the questionnaire: dependent questions
/// may have appeared or disappeared, and the completion gate may have moved.
async fn record_answer(
    State(state): State<AppState>,
    session: BrowserSession,
    Form(body): Form<RecordAnswerBody>,
) -> Result<Markup, AppError> {
    let question = state
        .catalog
        .question(&body.question)
        .ok_or(AppError::Validation("unknown question"))?;

    state
        .store
        .record_answer(&session.token, question, &body.value)
        .reject_input("invalid answer value")?;

    let answers = state.store.answers(&session.token);
    Ok(quiz_views::questionnaire(&state.catalog, &answers, None))
}

async fn reset_quiz(State(state): State<AppState>, session: BrowserSession) -> Markup {
    state.store.clear(&session.token);
    let answers = state.store.answers(&session.token);
    views::titled(
        "MatchMe",
        quiz_views::quiz_page(&state.catalog, &answers, None),
    )
}

async fn submit_quiz(
    State(state): State<AppState>,
    session: BrowserSession,
) -> Result<Response, AppError> {
    let answers = state.store.answers(&session.token);

    match state.matches.submit(&state.catalog, &answers).await {
        SubmitOutcome::Matched(results) => {
            state.store.save_results(&session.token, results.clone());
            let weights = state.store.weights(&session.token);
            let exporting = state.store.is_exporting(&session.token);
            let content = match_views::results_page(&results, None, &[], weights, exporting, None);
            let mut resp = views::titled("Your Matches", content).into_response();
            resp.headers_mut()
                .insert("hx-push-url", HeaderValue::from_static(names::MATCHES_URL));
            Ok(resp)
        }
        SubmitOutcome::Incomplete => {
            tracing::warn!("submit attempted with an incomplete quiz");
            let content = quiz_views::quiz_page(
                &state.catalog,
                &answers,
                Some("Please answer every question before submitting."),
            );
            Ok(views::titled("MatchMe", content).into_response())
        }
        SubmitOutcome::Unavailable => {
            let content = quiz_views::quiz_page(
                &state.catalog,
                &answers,
                Some("Could not reach the match service. Your answers are saved; please try again."),
            );
            Ok(views::titled("MatchMe", content).into_response())
        }
    }
}

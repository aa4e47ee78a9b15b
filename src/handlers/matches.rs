use axum::{
    extract::{Form, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use maud::Markup;
use serde::Deserialize;

use crate::{
    extractors::{BrowserSession, IsHtmx},
    matches::MatchWeights,
    names,
    rejections::AppError,
    services::report::ExportOutcome,
    utils, views,
    views::matches as match_views,
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::MATCHES_URL, get(matches_page))
        .route(names::SELECT_MATCH_URL, post(select_match))
        .route(names::SAVE_WEIGHTS_URL, post(save_weights))
        .route(names::EXPORT_REPORT_URL, post(export_report))
}

fn results_content(state: &AppState, token: &str, notice: Option<&str>) -> Markup {
    match state.store.results(token) {
        Some(results) => {
            let selection = state.store.selection(token);
            let mentors = state.store.mentors(token);
            let weights = state.store.weights(token);
            let exporting = state.store.is_exporting(token);
            match_views::results_page(
                &results,
                selection.as_ref(),
                &mentors,
                weights,
                exporting,
                notice,
            )
        }
        None => match_views::empty_results(),
    }
}

async fn matches_page(
    State(state): State<AppState>,
    session: BrowserSession,
    IsHtmx(is_htmx): IsHtmx,
) -> Result<Response, AppError> {
    let content = results_content(&state, &session.token, None);
    utils::with_session_cookie(
        views::render(is_htmx, "Your Matches", content),
        &session,
        state.secure_cookies,
    )
}

#[derive(Deserialize)]
struct SelectMatchBody {
    index: usize,
}

async fn select_match(
    State(state): State<AppState>,
    session: BrowserSession,
    Form(body): Form<SelectMatchBody>,
) -> Result<Markup, AppError> {
    let results = state
        .store
        .results(&session.token)
        .ok_or(AppError::Validation("no match results to select from"))?;
    let selected = results
        .get(body.index)
        .ok_or(AppError::Validation("no such match"))?
        .clone();

    // Selecting clears the previous program's mentors before the fetch
    // starts; the generation tag decides whether this fetch may still land
    // once it resolves.
    let generation = state.store.select(&session.token, Some(selected.clone()));
    let mentors = state
        .mentors
        .fetch_mentors(&selected.school, &selected.program)
        .await;
    if !state.store.apply_mentors(&session.token, generation, mentors) {
        tracing::debug!("stale mentor response for '{}' discarded", selected.program);
    }

    let selection = state.store.selection(&session.token);
    let mentors = state.store.mentors(&session.token);
    Ok(match_views::detail_panel(selection.as_ref(), &mentors))
}

#[derive(Deserialize)]
struct SaveWeightsBody {
    wa: f64,
    wc: f64,
    wso: f64,
}

async fn save_weights(
    State(state): State<AppState>,
    session: BrowserSession,
    Form(body): Form<SaveWeightsBody>,
) -> Result<Markup, AppError> {
    if body.wa < 0.0 || body.wc < 0.0 || body.wso < 0.0 {
        return Err(AppError::Validation("weights must be non-negative"));
    }

    state.store.save_weights(
        &session.token,
        MatchWeights {
            academic: body.wa,
            campus: body.wc,
            social: body.wso,
        },
    );

    Ok(views::titled(
        "Your Matches",
        results_content(&state, &session.token, Some("Preferences saved.")),
    ))
}

async fn export_report(
    State(state): State<AppState>,
    session: BrowserSession,
) -> Result<Response, AppError> {
    let answers = state.store.answers(&session.token);
    if answers.is_empty() {
        return Err(AppError::Validation("take the quiz before exporting a report"));
    }

    // Second line of defense behind the self-disabling button.
    if !state.store.begin_export(&session.token) {
        let content =
            results_content(&state, &session.token, Some("An export is already in progress."));
        return Ok(views::page("Your Matches", content).into_response());
    }

    let weights = state.store.weights(&session.token);
    let outcome = state.report.export(&answers, weights).await;
    state.store.end_export(&session.token);

    match outcome {
        ExportOutcome::Report(download) => {
            let disposition = format!("attachment; filename=\"{}\"", download.filename);
            Ok((
                [
                    (CONTENT_TYPE, "application/pdf".to_owned()),
                    (CONTENT_DISPOSITION, disposition),
                ],
                download.bytes,
            )
                .into_response())
        }
        ExportOutcome::Unavailable => {
            let content = results_content(
                &state,
                &session.token,
                Some("Could not generate the report. Please try again."),
            );
            Ok(views::page("Your Matches", content).into_response())
        }
    }
}

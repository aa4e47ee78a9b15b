pub mod answers;
pub mod catalog;
pub mod extractors;
pub mod handlers;
pub mod matches;
pub mod names;
pub mod rejections;
pub mod services;
pub mod statics;
pub mod store;
pub mod utils;
pub mod views;

use std::sync::Arc;

use axum::Router;

use crate::{
    catalog::Catalog,
    services::{
        chance::{ChanceService, HttpChanceApi},
        mentors::{HttpMentorDirectory, MentorService},
        report::{HttpReportRenderer, ReportService},
        scoring::{HttpScoringApi, MatchService},
    },
    store::SessionStore,
};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub store: SessionStore,
    pub matches: MatchService,
    pub mentors: MentorService,
    pub report: ReportService,
    pub chance: ChanceService,
    pub secure_cookies: bool,
}

impl AppState {
    /// Wire every collaborator client against one API base URL, sharing a
    /// single connection pool.
    pub fn new(catalog: Catalog, api_base_url: &str, secure_cookies: bool) -> Self {
        let client = reqwest::Client::new();
        let base_url = api_base_url.trim_end_matches('/');

        Self {
            catalog: Arc::new(catalog),
            store: SessionStore::new(),
            matches: MatchService::new(HttpScoringApi::new(client.clone(), base_url)),
            mentors: MentorService::new(HttpMentorDirectory::new(client.clone(), base_url)),
            report: ReportService::new(
                HttpScoringApi::new(client.clone(), base_url),
                HttpReportRenderer::new(client.clone(), base_url),
            ),
            chance: ChanceService::new(HttpChanceApi::new(client, base_url)),
            secure_cookies,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(handlers::homepage::routes())
        .merge(handlers::quiz::routes())
        .merge(handlers::matches::routes())
        .merge(handlers::chance::routes())
        .nest("/static", statics::routes())
        .with_state(state)
}

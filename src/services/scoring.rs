use color_eyre::{eyre::bail, Result};

use crate::{
    answers::{is_complete, AnswerSet},
    catalog::Catalog,
    matches::{Match, MatchPayload},
    names,
};

// ---------------------------------------------------------------------------
// ScoringApi trait (DIP: service defines the abstraction it needs)
// ---------------------------------------------------------------------------

#[cfg_attr(test, mockall::automock)]
pub trait ScoringApi: Send + Sync {
    /// Score an answer set, returning the ranked display list.
    fn score(
        &self,
        answers: &AnswerSet,
    ) -> impl std::future::Future<Output = Result<Vec<Match>>> + Send;

    /// The full, unfiltered match set for the same answers. Typically much
    /// larger than the displayed list.
    fn full_matches(
        &self,
        answers: &AnswerSet,
    ) -> impl std::future::Future<Output = Result<Vec<Match>>> + Send;
}

#[derive(Clone)]
pub struct HttpScoringApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpScoringApi {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

impl ScoringApi for HttpScoringApi {
    async fn score(&self, answers: &AnswerSet) -> Result<Vec<Match>> {
        let resp = self
            .client
            .post(format!("{}{}", self.base_url, names::MATCH_API_PATH))
            .json(answers)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            tracing::error!("match API error: {status} - {text}");
            bail!("match API returned {status}");
        }

        // Accept both historical response shapes.
        let payload: MatchPayload = resp.json().await?;
        Ok(payload.into_matches())
    }

    async fn full_matches(&self, answers: &AnswerSet) -> Result<Vec<Match>> {
        let resp = self
            .client
            .post(format!("{}{}", self.base_url, names::FULL_MATCHES_API_PATH))
            .json(answers)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            tracing::error!("full-matches API error: {status} - {text}");
            bail!("full-matches API returned {status}");
        }

        let payload: MatchPayload = resp.json().await?;
        Ok(payload.into_matches())
    }
}

// ---------------------------------------------------------------------------
// MatchService
// ---------------------------------------------------------------------------

pub enum SubmitOutcome {
    /// Scoring succeeded; the ranked display list.
    Matched(Vec<Match>),
    /// A visible question is still unanswered. Nothing was sent.
    Incomplete,
    /// The scoring service failed or returned an unusable payload.
    Unavailable,
}

pub struct MatchService<S: ScoringApi = HttpScoringApi> {
    api: S,
}

impl<S: ScoringApi + Clone> Clone for MatchService<S> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
        }
    }
}

impl<S: ScoringApi> MatchService<S> {
    pub fn new(api: S) -> Self {
        Self { api }
    }

    /// Submit the quiz. Completion is checked first: an incomplete quiz is a
    /// local validation failure and never reaches the network. A collaborator
    /// failure is reported once; the caller decides whether to resubmit.
    pub async fn submit(&self, catalog: &Catalog, answers: &AnswerSet) -> SubmitOutcome {
        if !is_complete(catalog, answers) {
            return SubmitOutcome::Incomplete;
        }

        match self.api.score(answers).await {
            Ok(matches) => {
                tracing::info!("scoring returned {} matches", matches.len());
                SubmitOutcome::Matched(matches)
            }
            Err(e) => {
                tracing::error!("could not score answers: {e}");
                SubmitOutcome::Unavailable
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

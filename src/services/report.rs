use bytes::Bytes;
use color_eyre::{eyre::bail, Result};
use serde::Serialize;

use crate::{
    answers::AnswerSet,
    matches::{Match, MatchWeights},
    names,
    services::scoring::{HttpScoringApi, ScoringApi},
};

/// One line of the report: `(overall, academic, campus, social, school,
/// program)`. The report collaborator depends on this field order.
#[derive(Debug, PartialEq, Serialize)]
pub struct ReportRow(pub f64, pub f64, pub f64, pub f64, pub String, pub String);

impl From<&Match> for ReportRow {
    fn from(m: &Match) -> Self {
        Self(
            m.overall,
            m.academic,
            m.campus,
            m.social,
            m.school.clone(),
            m.program.clone(),
        )
    }
}

#[derive(Serialize)]
struct ReportRequest<'a> {
    results: &'a [ReportRow],
    weights: &'a MatchWeights,
}

// ---------------------------------------------------------------------------
// ReportRenderer trait (DIP: service defines the abstraction it needs)
// ---------------------------------------------------------------------------

#[cfg_attr(test, mockall::automock)]
pub trait ReportRenderer: Send + Sync {
    fn render(
        &self,
        rows: &[ReportRow],
        weights: &MatchWeights,
    ) -> impl std::future::Future<Output = Result<Bytes>> + Send;
}

#[derive(Clone)]
pub struct HttpReportRenderer {
    client: reqwest::Client,
    base_url: String,
}

impl HttpReportRenderer {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

impl ReportRenderer for HttpReportRenderer {
    async fn render(&self, rows: &[ReportRow], weights: &MatchWeights) -> Result<Bytes> {
        let resp = self
            .client
            .post(format!("{}{}", self.base_url, names::REPORT_API_PATH))
            .json(&ReportRequest {
                results: rows,
                weights,
            })
            .send()
            .await?;

        if !resp.status().is_success() {
            bail!("report API returned {}", resp.status());
        }

        Ok(resp.bytes().await?)
    }
}

// ---------------------------------------------------------------------------
// ReportService
// ---------------------------------------------------------------------------

pub struct ReportDownload {
    pub filename: String,
    pub bytes: Bytes,
}

pub enum ExportOutcome {
    Report(ReportDownload),
    /// Any step failed. Nothing was delivered; no partial artifact exists.
    Unavailable,
}

pub struct ReportService<S: ScoringApi = HttpScoringApi, R: ReportRenderer = HttpReportRenderer> {
    scoring: S,
    renderer: R,
}

impl<S: ScoringApi + Clone, R: ReportRenderer + Clone> Clone for ReportService<S, R> {
    fn clone(&self) -> Self {
        Self {
            scoring: self.scoring.clone(),
            renderer: self.renderer.clone(),
        }
    }
}

impl<S: ScoringApi, R: ReportRenderer> ReportService<S, R> {
    pub fn new(scoring: S, renderer: R) -> Self {
        Self { scoring, renderer }
    }

    /// Produce the downloadable report for the session's original answers.
    ///
    /// The displayed result set may be truncated, so the full match set is
    /// re-fetched from the scoring service first. Either collaborator failing
    /// aborts the whole export.
    pub async fn export(&self, answers: &AnswerSet, weights: MatchWeights) -> ExportOutcome {
        let full = match self.scoring.full_matches(answers).await {
            Ok(matches) => matches,
            Err(e) => {
                tracing::error!("could not fetch full match set: {e}");
                return ExportOutcome::Unavailable;
            }
        };

        let rows: Vec<ReportRow> = full.iter().map(ReportRow::from).collect();

        match self.renderer.render(&rows, &weights).await {
            Ok(bytes) => {
                let filename = format!(
                    "unimatch_report_{}.pdf",
                    chrono::Local::now().format("%Y-%m-%d")
                );
                tracing::info!("report generated: {filename} ({} bytes)", bytes.len());
                ExportOutcome::Report(ReportDownload { filename, bytes })
            }
            Err(e) => {
                tracing::error!("could not generate report: {e}");
                ExportOutcome::Unavailable
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::services::scoring::MockScoringApi;

    fn sample_match() -> Match {
        Match {
            school: "Queen's".to_string(),
            program: "Commerce".to_string(),
            overall: 0.82,
            academic: 0.7,
            campus: 0.9,
            social: 0.95,
        }
    }

    #[test]
    fn report_rows_serialize_in_fixed_order() {
        let row = ReportRow::from(&sample_match());
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(
            json,
            serde_json::json!([0.82, 0.7, 0.9, 0.95, "Queen's", "Commerce"])
        );
    }

    #[tokio::test]
    async fn export_fetches_full_set_and_renders() {
        let mut scoring = MockScoringApi::new();
        scoring
            .expect_full_matches()
            .times(1)
            .returning(|_| Box::pin(async { Ok(vec![sample_match()]) }));

        let mut renderer = MockReportRenderer::new();
        renderer
            .expect_render()
            .times(1)
            .withf(|rows, weights| {
                rows.len() == 1 && rows[0].4 == "Queen's" && weights.academic == 0.6
            })
            .returning(|_, _| Box::pin(async { Ok(Bytes::from_static(b"%PDF-1.4")) }));

        let svc = ReportService::new(scoring, renderer);
        let outcome = svc.export(&AnswerSet::default(), MatchWeights::default()).await;

        match outcome {
            ExportOutcome::Report(download) => {
                assert!(download.filename.starts_with("unimatch_report_"));
                assert!(download.filename.ends_with(".pdf"));
                assert_eq!(&download.bytes[..4], b"%PDF");
            }
            ExportOutcome::Unavailable => panic!("expected a report"),
        }
    }

    #[tokio::test]
    async fn rapid_double_export_issues_one_call_per_collaborator() {
        use crate::store::SessionStore;

        let mut scoring = MockScoringApi::new();
        scoring
            .expect_full_matches()
            .times(1)
            .returning(|_| Box::pin(async { Ok(vec![sample_match()]) }));

        let mut renderer = MockReportRenderer::new();
        renderer
            .expect_render()
            .times(1)
            .returning(|_, _| Box::pin(async { Ok(Bytes::from_static(b"%PDF-1.4")) }));

        let svc = ReportService::new(scoring, renderer);
        let store = SessionStore::new();

        // First trigger claims the flag; the second, arriving while the
        // first is in flight, is refused before any collaborator call.
        assert!(store.begin_export("t"));
        assert!(!store.begin_export("t"));

        let outcome = svc.export(&AnswerSet::default(), MatchWeights::default()).await;
        store.end_export("t");

        assert!(matches!(outcome, ExportOutcome::Report(_)));
    }

    #[tokio::test]
    async fn full_match_failure_aborts_before_rendering() {
        let mut scoring = MockScoringApi::new();
        scoring
            .expect_full_matches()
            .returning(|_| Box::pin(async { Err(color_eyre::eyre::eyre!("timeout")) }));

        let mut renderer = MockReportRenderer::new();
        renderer.expect_render().never();

        let svc = ReportService::new(scoring, renderer);
        let outcome = svc.export(&AnswerSet::default(), MatchWeights::default()).await;

        assert!(matches!(outcome, ExportOutcome::Unavailable));
    }

    #[tokio::test]
    async fn renderer_failure_leaves_no_artifact()  {
        let mut scoring = MockScoringApi::new();
        scoring
            .expect_full_matches()
            .returning(|_| Box::pin(async { Ok(vec![sample_match()]) }));

        let mut renderer = MockReportRenderer::new();
        renderer
            .expect_render()
            .returning(|_, _| Box::pin(async { Err(color_eyre::eyre::eyre!("500")) }));

        let svc = ReportService::new(scoring, renderer);
        let outcome = svc.export(&AnswerSet::default(), MatchWeights::default()).await;

        assert!(matches!(outcome, ExportOutcome::Unavailable));
    }
}

use color_eyre::{eyre::bail, Result};
use serde::{Deserialize, Serialize};

use crate::names;

/// Raw form input, exactly as the user typed it.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ChanceForm {
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub program: String,
    #[serde(default)]
    pub top6: String,
    #[serde(default)]
    pub ecs: String,
}

/// A validated chance-estimate request.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChanceRequest {
    pub school: String,
    pub program: String,
    pub top6: f64,
    pub ecs: String,
}

#[derive(Debug, Deserialize)]
pub struct ChanceReply {
    pub success: bool,
    #[serde(default)]
    pub prediction: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Check the form locally. Invalid input never reaches the estimator.
fn validate(form: &ChanceForm) -> Result<ChanceRequest, &'static str> {
    let school = form.school.trim();
    if school.is_empty() {
        return Err("School is required");
    }

    let program = form.program.trim();
    if program.is_empty() {
        return Err("Program is required");
    }

    let top6: f64 = form
        .top6
        .trim()
        .parse()
        .map_err(|_| "Top-6 average must be a number")?;
    if !(0.0..=100.0).contains(&top6) {
        return Err("Top-6 average must be between 0 and 100");
    }

    Ok(ChanceRequest {
        school: school.to_owned(),
        program: program.to_owned(),
        top6,
        ecs: form.ecs.trim().to_owned(),
    })
}

// ---------------------------------------------------------------------------
// ChanceApi trait (DIP: service defines the abstraction it needs)
// ---------------------------------------------------------------------------

#[cfg_attr(test, mockall::automock)]
pub trait ChanceApi: Send + Sync {
    fn estimate(
        &self,
        request: &ChanceRequest,
    ) -> impl std::future::Future<Output = Result<ChanceReply>> + Send;
}

#[derive(Clone)]
pub struct HttpChanceApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpChanceApi {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

impl ChanceApi for HttpChanceApi {
    async fn estimate(&self, request: &ChanceRequest) -> Result<ChanceReply> {
        let resp = self
            .client
            .post(format!("{}{}", self.base_url, names::CHANCE_API_PATH))
            .json(request)
            .send()
            .await?;

        if !resp.status().is_success() {
            // The estimator reports its own errors in the body when it can.
            if let Ok(reply) = resp.json::<ChanceReply>().await {
                return Ok(reply);
            }
            bail!("chance API request failed");
        }

        Ok(resp.json().await?)
    }
}

// ---------------------------------------------------------------------------
// ChanceService
// ---------------------------------------------------------------------------

pub enum ChanceOutcome {
    Prediction(String),
    /// The form failed local validation. Nothing was sent.
    Invalid(&'static str),
    /// The estimator processed the request but declined it.
    Rejected(String),
    /// The estimator could not be reached.
    Unavailable,
}

pub struct ChanceService<A: ChanceApi = HttpChanceApi> {
    api: A,
}

impl<A: ChanceApi + Clone> Clone for ChanceService<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
        }
    }
}

impl<A: ChanceApi> ChanceService<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub async fn estimate(&self, form: &ChanceForm) -> ChanceOutcome {
        let request = match validate(form) {
            Ok(request) => request,
            Err(message) => return ChanceOutcome::Invalid(message),
        };

        match self.api.estimate(&request).await {
            Ok(reply) if reply.success => {
                ChanceOutcome::Prediction(reply.prediction.unwrap_or_default())
            }
            Ok(reply) => {
                let message = reply.error.unwrap_or_else(|| "An error occurred".to_owned());
                tracing::warn!("chance estimate rejected: {message}");
                ChanceOutcome::Rejected(message)
            }
            Err(e) => {
                tracing::error!("could not reach chance estimator: {e}");
                ChanceOutcome::Unavailable
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

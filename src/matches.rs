use serde::{Deserialize, Serialize};

/// One school + program candidate as returned by the scoring service.
/// Each dimension is a ratio in [0, 1]; `overall` is informational and no
/// cross-field arithmetic is checked on this side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub school: String,
    pub program: String,
    pub overall: f64,
    pub academic: f64,
    pub campus: f64,
    pub social: f64,
}

/// The scoring service has returned match lists in two shapes over time:
/// a bare array, and an object wrapping the array under `matches`. Both are
/// accepted wherever a result set is decoded; everything downstream sees the
/// normalized array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MatchPayload {
    Wrapped { matches: Vec<Match> },
    Bare(Vec<Match>),
}

impl MatchPayload {
    pub fn into_matches(self) -> Vec<Match> {
        match self {
            MatchPayload::Wrapped { matches } => matches,
            MatchPayload::Bare(matches) => matches,
        }
    }
}

/// Relative importance of the three match dimensions. Stored with the wire
/// field names the scoring service uses; each field falls back to the
/// documented default independently, so a partially-saved preference object
/// still reads cleanly.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchWeights {
    #[serde(rename = "wa", default = "default_academic")]
    pub academic: f64,
    #[serde(rename = "wc", default = "default_campus")]
    pub campus: f64,
    #[serde(rename = "wso", default = "default_social")]
    pub social: f64,
}

fn default_academic() -> f64 {
    0.6
}

fn default_campus() -> f64 {
    0.2
}

fn default_social() -> f64 {
    0.2
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            academic: default_academic(),
            campus: default_campus(),
            social: default_social(),
        }
    }
}

/// Format a ratio in [0, 1] for display: `0.655` → `"66%"` (half rounds up).
pub fn percent(ratio: f64) -> String {
    format!("{}%", (ratio * 100.0).round() as i64)
}

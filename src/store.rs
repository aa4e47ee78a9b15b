use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::{
    answers::{AnswerSet, RecordError},
    catalog::Question,
    matches::{Match, MatchWeights},
    services::mentors::Mentor,
};

#[derive(Default)]
struct SessionState {
    answers: AnswerSet,
    results: Option<Vec<Match>>,
    weights: Option<MatchWeights>,
    selection: Option<Match>,
    // Bumped on every selection change; a mentor fetch may only land if it
    // still carries the current value.
    selection_gen: u64,
    mentors: Vec<Mentor>,
    exporting: bool,
}

/// Per-browser-session state: the answer set, the last match result set, the
/// weight preferences, and the transient result-view state (selection,
/// mentors, export flag). Keyed by the session cookie token.
///
/// All writes are whole-value replacements; readers get clones. The lock is
/// never held across an await point.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, SessionState>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh session cookie token.
    pub fn new_token() -> String {
        ulid::Ulid::new().to_string().to_lowercase()
    }

    fn with<T>(&self, token: &str, f: impl FnOnce(&mut SessionState) -> T) -> T {
        let mut sessions = self.inner.write().expect("session store lock poisoned");
        f(sessions.entry(token.to_owned()).or_default())
    }

    // ----- answers -----

    pub fn answers(&self, token: &str) -> AnswerSet {
        self.with(token, |s| s.answers.clone())
    }

    pub fn record_answer(
        &self,
        token: &str,
        question: &Question,
        raw: &str,
    ) -> Result<(), RecordError> {
        self.with(token, |s| s.answers.record(question, raw))
    }

    // ----- match results -----

    pub fn results(&self, token: &str) -> Option<Vec<Match>> {
        self.with(token, |s| s.results.clone())
    }

    /// Replace the stored result set. Selection and mentors belong to the old
    /// set and are reset with it.
    pub fn save_results(&self, token: &str, results: Vec<Match>) {
        self.with(token, |s| {
            s.results = Some(results);
            s.selection = None;
            s.mentors.clear();
            s.selection_gen += 1;
        });
    }

    // ----- weight preferences -----

    pub fn weights(&self, token: &str) -> MatchWeights {
        self.with(token, |s| s.weights.unwrap_or_default())
    }

    pub fn save_weights(&self, token: &str, weights: MatchWeights) {
        self.with(token, |s| s.weights = Some(weights));
    }

    // ----- selection + mentor enrichment -----

    pub fn selection(&self, token: &str) -> Option<Match> {
        self.with(token, |s| s.selection.clone())
    }

    /// Change the current selection. The mentor list is cleared immediately;
    /// the detail panel must never show the previous program's mentors while
    /// a new fetch is in flight. Returns the generation tag the caller must
    /// present to `apply_mentors`.
    pub fn select(&self, token: &str, selection: Option<Match>) -> u64 {
        self.with(token, |s| {
            s.selection = selection;
            s.mentors.clear();
            s.selection_gen += 1;
            s.selection_gen
        })
    }

    pub fn mentors(&self, token: &str) -> Vec<Mentor> {
        self.with(token, |s| s.mentors.clone())
    }

    /// Apply a resolved mentor fetch. A fetch tagged with a superseded
    /// generation is discarded; only the fetch matching the current selection
    /// may update state. Returns whether the list was applied.
    pub fn apply_mentors(&self, token: &str, generation: u64, mentors: Vec<Mentor>) -> bool {
        self.with(token, |s| {
            if s.selection_gen != generation {
                return false;
            }
            s.mentors = mentors;
            true
        })
    }

    // ----- export single-flight -----

    /// Claim the export flag. Returns false if an export is already running,
    /// in which case the caller must not start another one.
    pub fn begin_export(&self, token: &str) -> bool {
        self.with(token, |s| {
            if s.exporting {
                false
            } else {
                s.exporting = true;
                true
            }
        })
    }

    pub fn end_export(&self, token: &str) {
        self.with(token, |s| s.exporting = false);
    }

    pub fn is_exporting(&self, token: &str) -> bool {
        self.with(token, |s| s.exporting)
    }

    // ----- lifecycle -----

    /// Drop everything recorded for a session.
    pub fn clear(&self, token: &str) {
        let mut sessions = self.inner.write().expect("session store lock poisoned");
        sessions.remove(token);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn match_for(program: &str) -> Match {
        Match {
            school: "Waterloo".to_string(),
            program: program.to_string(),
            overall: 0.9,
            academic: 0.9,
            campus: 0.9,
            social: 0.9,
        }
    }

    fn mentor(name: &str) -> Mentor {
        Mentor {
            name: name.to_string(),
            details: String::new(),
            avatar: String::new(),
            contact_link: String::new(),
        }
    }

    #[test]
    fn stale_mentor_response_is_discarded() {
        let store = SessionStore::new();

        // Select P1 and start a fetch, then switch to P2 before it resolves.
        let gen1 = store.select("t", Some(match_for("P1")));
        let gen2 = store.select("t", Some(match_for("P2")));

        // P1's fetch resolves late: discarded.
        assert!(!store.apply_mentors("t", gen1, vec![mentor("from-p1")]));
        assert!(store.mentors("t").is_empty());

        // P2's fetch resolves: applied.
        assert!(store.apply_mentors("t", gen2, vec![mentor("from-p2")]));
        assert_eq!(store.mentors("t")[0].name, "from-p2");
    }

    #[test]
    fn selection_change_clears_mentors_immediately() {
        let store = SessionStore::new();

        let generation = store.select("t", Some(match_for("P1")));
        assert!(store.apply_mentors("t", generation, vec![mentor("ada")]));
        assert_eq!(store.mentors("t").len(), 1);

        // Switching selection empties the list before any new fetch lands.
        store.select("t", Some(match_for("P2")));
        assert!(store.mentors("t").is_empty());
    }

    #[test]
    fn new_results_reset_selection() {
        let store = SessionStore::new();

        store.save_results("t", vec![match_for("P1")]);
        store.select("t", Some(match_for("P1")));
        assert!(store.selection("t").is_some());

        store.save_results("t", vec![match_for("P2")]);
        assert!(store.selection("t").is_none());
        assert!(store.mentors("t").is_empty());
    }

    #[test]
    fn export_flag_is_single_flight() {
        let store = SessionStore::new();

        assert!(store.begin_export("t"));
        assert!(store.is_exporting("t"));
        // A second claim while the first is in flight fails.
        assert!(!store.begin_export("t"));

        store.end_export("t");
        assert!(store.begin_export("t"));
    }

    #[test]
    fn weights_default_when_unset() {
        let store = SessionStore::new();
        assert_eq!(store.weights("t"), MatchWeights::default());

        let custom = MatchWeights {
            academic: 0.5,
            campus: 0.3,
            social: 0.2,
        };
        store.save_weights("t", custom);
        assert_eq!(store.weights("t"), custom);
    }

    #[test]
    fn sessions_are_isolated_by_token() {
        let store = SessionStore::new();
        store.save_results("a", vec![match_for("P1")]);

        assert!(store.results("b").is_none());
        store.clear("a");
        assert!(store.results("a").is_none());
    }
}

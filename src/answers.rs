use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Question, QuestionKind};

/// A recorded response to one question. The variant is fixed by the
/// question's kind: multi-choice answers are selection lists, single-choice
/// and scale answers are single values, numeric answers are numbers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Selections(Vec<String>),
    Choice(String),
    Number(f64),
}

impl Answer {
    /// Whether this answer satisfies a dependency requiring `value`.
    /// Only a single value can equal the required string; a selection list
    /// or a number never does.
    fn satisfies(&self, value: &str) -> bool {
        matches!(self, Answer::Choice(v) if v == value)
    }

    fn is_given(&self) -> bool {
        match self {
            Answer::Selections(values) => !values.is_empty(),
            Answer::Choice(value) => !value.is_empty(),
            Answer::Number(value) => value.is_finite(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("'{0}' is not a number")]
    InvalidNumber(String),
}

/// All answers a user has given so far, keyed by question id.
///
/// Answers for questions that have since become hidden are kept: reverting
/// the upstream answer brings them back. They are simply ignored by
/// visibility and completion checks.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    values: BTreeMap<String, Answer>,
}

impl AnswerSet {
    pub fn get(&self, question_id: &str) -> Option<&Answer> {
        self.values.get(question_id)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Record a raw form value against a question, dispatching on its kind.
    ///
    /// Multi-choice toggles the value: a present value is removed, an absent
    /// one appended unless the selection is already at `maxSelections` (then
    /// the toggle is dropped on the floor: a capacity guard, not an error).
    /// Single-choice and scale replace the prior value. Numeric parses and
    /// replaces; range clamping is left to the caller.
    pub fn record(&mut self, question: &Question, raw: &str) -> Result<(), RecordError> {
        match question.kind {
            QuestionKind::MultiChoice => {
                let max = question.max_selections.unwrap_or(1);
                let entry = self
                    .values
                    .entry(question.id.clone())
                    .or_insert_with(|| Answer::Selections(Vec::new()));
                // A leftover value of another variant is replaced outright.
                if !matches!(entry, Answer::Selections(_)) {
                    *entry = Answer::Selections(Vec::new());
                }
                let Answer::Selections(selections) = entry else {
                    unreachable!()
                };
                if let Some(idx) = selections.iter().position(|v| v == raw) {
                    selections.remove(idx);
                } else if selections.len() < max {
                    selections.push(raw.to_owned());
                }
            }
            QuestionKind::SingleChoice | QuestionKind::Scale => {
                self.values
                    .insert(question.id.clone(), Answer::Choice(raw.to_owned()));
            }
            QuestionKind::Number => {
                let value: f64 = raw
                    .trim()
                    .parse()
                    .map_err(|_| RecordError::InvalidNumber(raw.to_owned()))?;
                if !value.is_finite() {
                    return Err(RecordError::InvalidNumber(raw.to_owned()));
                }
                self.values.insert(question.id.clone(), Answer::Number(value));
            }
        }
        Ok(())
    }

    /// Whether the question has a usable answer: a non-empty selection list,
    /// a non-empty value, or a finite number.
    pub fn is_answered(&self, question_id: &str) -> bool {
        self.values.get(question_id).is_some_and(Answer::is_given)
    }

    pub fn is_selected(&self, question_id: &str, value: &str) -> bool {
        match self.values.get(question_id) {
            Some(Answer::Selections(values)) => values.iter().any(|v| v == value),
            Some(Answer::Choice(v)) => v == value,
            _ => false,
        }
    }

    pub fn selection_count(&self, question_id: &str) -> usize {
        match self.values.get(question_id) {
            Some(Answer::Selections(values)) => values.len(),
            _ => 0,
        }
    }

    pub fn number(&self, question_id: &str) -> Option<f64> {
        match self.values.get(question_id) {
            Some(Answer::Number(value)) => Some(*value),
            _ => None,
        }
    }
}

/// Whether a question is part of the active questionnaire under the current
/// answers: either it has no dependency, or the answer it depends on equals
/// the required value.
pub fn is_visible(question: &Question, answers: &AnswerSet) -> bool {
    match &question.dependency {
        Some(dep) => answers
            .get(&dep.depends_on)
            .is_some_and(|a| a.satisfies(&dep.required_value)),
        None => true,
    }
}

/// Questions currently part of the active questionnaire, in catalog order.
/// Pure in `(catalog, answers)`; re-derived after every mutation.
pub fn visible_questions<'a>(
    catalog: &'a Catalog,
    answers: &'a AnswerSet,
) -> impl Iterator<Item = &'a Question> + 'a {
    catalog
        .questions()
        .filter(move |question| is_visible(question, answers))
}

/// True iff every visible question is answered. Answers recorded for
/// currently-hidden questions do not count either way.
pub fn is_complete(catalog: &Catalog, answers: &AnswerSet) -> bool {
    visible_questions(catalog, answers).all(|q| answers.is_answered(&q.id))
}

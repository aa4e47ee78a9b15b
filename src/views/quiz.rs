use maud::{html, Markup};

use crate::{
    answers::{self, AnswerSet},
    catalog::{Catalog, Question},
    names,
};

fn hx_vals(question_id: &str, value: &str) -> String {
    format!(r#"{{"question":"{question_id}","value":"{value}"}}"#)
}

fn multi_choice(question: &Question, answers: &AnswerSet) -> Markup {
    let max = question.max_selections.unwrap_or(1);
    let count = answers.selection_count(&question.id);

    html! {
        h3 { (question.question) }
        p.question-hint {
            "Select up to " (max) " option" @if max > 1 { "s" }
            " (" (count) "/" (max) " selected)"
        }
        div.option-grid {
            @for opt in &question.options {
                @let selected = answers.is_selected(&question.id, &opt.value);
                @let at_cap = count >= max && !selected;
                label.option-card.selected[selected].dimmed[at_cap] {
                    input type="checkbox"
                          checked[selected]
                          disabled[at_cap]
                          hx-post=(names::RECORD_ANSWER_URL)
                          hx-vals=(hx_vals(&question.id, &opt.value))
                          hx-target="#questionnaire"
                          hx-swap="outerHTML";
                    (opt.label)
                }
            }
        }
    }
}

fn single_choice(question: &Question, answers: &AnswerSet) -> Markup {
    html! {
        h3 { (question.question) }
        div.option-stack {
            @for opt in &question.options {
                @let selected = answers.is_selected(&question.id, &opt.value);
                label.option-card.selected[selected] {
                    input type="radio"
                          name=(format!("question_{}", question.id))
                          checked[selected]
                          hx-post=(names::RECORD_ANSWER_URL)
                          hx-vals=(hx_vals(&question.id, &opt.value))
                          hx-target="#questionnaire"
                          hx-swap="outerHTML";
                    (opt.label)
                }
            }
        }
    }
}

fn scale(question: &Question, answers: &AnswerSet) -> Markup {
    html! {
        h3.likert-question { (question.question) }
        div.likert-options {
            p { (question.left_label.as_deref().unwrap_or("")) }
            @for opt in &question.options {
                @let selected = answers.is_selected(&question.id, &opt.value);
                label.likert-option {
                    input type="radio"
                          name=(format!("question_{}", question.id))
                          checked[selected]
                          hx-post=(names::RECORD_ANSWER_URL)
                          hx-vals=(hx_vals(&question.id, &opt.value))
                          hx-target="#questionnaire"
                          hx-swap="outerHTML";
                    div.likert-button.selected[selected] { (opt.label) }
                }
            }
            p { (question.right_label.as_deref().unwrap_or("")) }
        }
    }
}

fn number(question: &Question, answers: &AnswerSet) -> Markup {
    html! {
        h3 { (question.question) }
        // htmx sends the input's own value under its name.
        input type="number"
              name="value"
              min=[question.min]
              max=[question.max]
              placeholder=[question.placeholder.as_deref()]
              value=[answers.number(&question.id)]
              hx-post=(names::RECORD_ANSWER_URL)
              hx-vals=(format!(r#"{{"question":"{}"}}"#, question.id))
              hx-trigger="change"
              hx-target="#questionnaire"
              hx-swap="outerHTML";
    }
}

fn question_block(question: &Question, answers: &AnswerSet) -> Markup {
    use crate::catalog::QuestionKind::*;
    html! {
        div.question-block {
            @match question.kind {
                MultiChoice => { (multi_choice(question, answers)) }
                SingleChoice => { (single_choice(question, answers)) }
                Scale => { (scale(question, answers)) }
                Number => { (number(question, answers)) }
            }
        }
    }
}

/// The questionnaire body. Swapped wholesale on every recorded answer, so
/// visibility and the completion gate are always freshly derived.
pub fn questionnaire(catalog: &Catalog, answers: &AnswerSet, notice: Option<&str>) -> Markup {
    let complete = answers::is_complete(catalog, answers);

    html! {
        div id="questionnaire" {
            @for section in &catalog.sections {
                section.section-container {
                    h2 { (section.title) }
                    @for question in &section.questions {
                        @if answers::is_visible(question, answers) {
                            (question_block(question, answers))
                        }
                    }
                }
            }

            div.submit-area {
                button id="submit-quiz"
                       disabled[!complete]
                       hx-post=(names::SUBMIT_QUIZ_URL)
                       hx-target="main"
                       hx-swap="innerHTML" {
                    "Submit Quiz"
                }
                @if !complete {
                    p.submit-hint { "Please answer all questions to submit" }
                }
                @if let Some(notice) = notice {
                    p.notice { (notice) }
                }
            }
        }
    }
}

pub fn quiz_page(catalog: &Catalog, answers: &AnswerSet, notice: Option<&str>) -> Markup {
    html! {
        div.quiz-header {
            h1 { "get matched for free" }
            p.subtext { "Based on Ontario university data" }
        }

        (questionnaire(catalog, answers, notice))

        p.quiz-footer {
            button.secondary hx-post=(names::RESET_QUIZ_URL)
                   hx-target="main"
                   hx-swap="innerHTML"
                   hx-confirm="Clear all your answers and start over?" {
                "Start over"
            }
        }
    }
}

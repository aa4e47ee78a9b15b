use maud::{html, Markup};

use crate::{
    matches::{percent, Match, MatchWeights},
    names,
    services::mentors::Mentor,
};

pub fn results_page(
    matches: &[Match],
    selection: Option<&Match>,
    mentors: &[Mentor],
    weights: MatchWeights,
    exporting: bool,
    notice: Option<&str>,
) -> Markup {
    html! {
        div.matches-header {
            h1 { "your matches" }
            p.subtext { "Ranked by overall fit. Click a match for the breakdown." }
            @if let Some(notice) = notice {
                p.notice { (notice) }
            }
        }

        div.matches-container {
            div.match-list {
                @for (index, m) in matches.iter().enumerate() {
                    div.match-card hx-post=(names::SELECT_MATCH_URL)
                         hx-vals=(format!(r#"{{"index":{index}}}"#))
                         hx-target="#match-detail"
                         hx-swap="outerHTML" {
                        p.match-school { (m.school) }
                        p.match-program { (m.program) }
                        p.match-overall { "Overall: " (percent(m.overall)) }
                    }
                }
            }

            (detail_panel(selection, mentors))
        }

        div.matches-tools {
            (weights_form(weights))
            (export_form(exporting))
        }
    }
}

pub fn detail_panel(selection: Option<&Match>, mentors: &[Mentor]) -> Markup {
    html! {
        div id="match-detail" {
            @match selection {
                Some(m) => {
                    article.match-popup {
                        h3 { (m.program) }
                        p.match-school { (m.school) }
                        p { "Academic: " (percent(m.academic)) }
                        p { "Campus: " (percent(m.campus)) }
                        p { "Social: " (percent(m.social)) }

                        h4 { "Talk to a current student" }
                        @if mentors.is_empty() {
                            p.no-mentors { "No mentors for this program yet. Check back soon!" }
                        } @else {
                            div.mentor-list {
                                @for mentor in mentors {
                                    div.mentor-card {
                                        img src=(mentor.avatar) alt=(mentor.name);
                                        strong { (mentor.name) }
                                        p { (mentor.details) }
                                        a href=(mentor.contact_link) target="_blank" rel="noopener" {
                                            "Say hello"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
                None => {
                    p.detail-hint { "Select a match to see the breakdown." }
                }
            }
        }
    }
}

fn weights_form(weights: MatchWeights) -> Markup {
    html! {
        form.weights-form hx-post=(names::SAVE_WEIGHTS_URL)
             hx-target="main"
             hx-swap="innerHTML" {
            fieldset {
                legend { "What matters most to you?" }
                label {
                    "Academics"
                    input type="number" name="wa" step="0.1" min="0" value=(weights.academic);
                }
                label {
                    "Campus"
                    input type="number" name="wc" step="0.1" min="0" value=(weights.campus);
                }
                label {
                    "Social"
                    input type="number" name="wso" step="0.1" min="0" value=(weights.social);
                }
            }
            button type="submit" { "Save preferences" }
        }
    }
}

fn export_form(exporting: bool) -> Markup {
    // Plain form post so the browser handles the file download; the button
    // disables itself, and the store's export flag backs that up.
    html! {
        form.export-form method="post" action=(names::EXPORT_REPORT_URL)
             onsubmit="document.getElementById('export-btn').disabled = true" {
            button id="export-btn" type="submit" disabled[exporting] {
                "Download PDF report"
            }
        }
    }
}

pub fn empty_results() -> Markup {
    html! {
        h1 { "your matches" }
        p { "No match results yet. Take the quiz to get matched." }
        a role="button" href=(names::QUIZ_URL) { "Take the quiz" }
    }
}

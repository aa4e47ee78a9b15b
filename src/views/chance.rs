use maud::{html, Markup};

use crate::{names, services::chance::ChanceForm};

#[derive(Clone, Copy)]
pub enum ChanceState<'a> {
    Blank,
    Error(&'a str),
    Prediction(&'a str),
}

pub fn chance_page(form: &ChanceForm, state: ChanceState) -> Markup {
    html! {
        div.chance-header {
            h1 { "calculate your chances" }
            p.subtext {
                "Estimates based on real admissions data. "
                "These results do not guarantee your acceptance."
            }
        }

        article style="width: fit-content;" {
            form hx-post=(names::CHANCE_URL)
                 hx-target="main"
                 hx-swap="innerHTML" {
                label {
                    "University / school"
                    input name="school"
                          type="text"
                          placeholder="e.g. Waterloo"
                          value=(form.school);
                }
                label {
                    "Program"
                    input name="program"
                          type="text"
                          placeholder="e.g. Software Engineering"
                          value=(form.program);
                }
                label {
                    "Top-6 average (%)"
                    input name="top6"
                          type="number"
                          min="0"
                          max="100"
                          step="0.1"
                          placeholder="e.g. 95.5"
                          value=(form.top6);
                }
                label {
                    "Extracurriculars (optional)"
                    input name="ecs"
                          type="text"
                          placeholder="e.g. robotics, student council, volunteering"
                          value=(form.ecs);
                    small { "Separate multiple activities with commas" }
                }
                button type="submit" { "Calculate my chances" }
            }

            @match state {
                ChanceState::Error(message) => {
                    p.error-message { (message) }
                }
                ChanceState::Prediction(text) => {
                    article.result-container {
                        h3 { "Your admission prediction" }
                        pre { (text) }
                        p.disclaimer {
                            "This prediction is based on historical data and "
                            "should be used as a general guide only."
                        }
                    }
                }
                ChanceState::Blank => {}
            }
        }
    }
}

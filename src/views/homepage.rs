use maud::{html, Markup};

use crate::names;

pub fn landing() -> Markup {
    html! {
        section.landing-hero {
            h1 { "UniMatch" }
            p { "Your personal digital guidance counselor" }
            div.landing-cta {
                a role="button" href=(names::QUIZ_URL) { "MatchMe" }
                a role="button" href=(names::CHANCE_URL) class="outline" { "ChanceMe" }
            }
        }

        section.landing-feature {
            h2 { "MatchMe" }
            p {
                "Only 5 minutes: find a university and program that uniquely "
                "matches you, and get connected with a current student."
            }
            a role="button" href=(names::QUIZ_URL) { "Take the test" }
        }

        section.landing-feature {
            h2 { "ChanceMe" }
            p {
                "Only 3 minutes: estimate your chances of getting into your "
                "dream university program."
            }
            a role="button" href=(names::CHANCE_URL) { "Take the test" }
        }
    }
}

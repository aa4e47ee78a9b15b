use maud::{html, Markup, DOCTYPE};

use crate::{names, utils};

fn css() -> Markup {
    html! {
        link rel="stylesheet" href="/static/index.css";
    }
}

fn js() -> Markup {
    html! {
        script src="https://unpkg.com/htmx.org@2.0.4" {}
    }
}

fn icon() -> Markup {
    html! {
        link rel="icon" href="/static/img/icon.svg" type="image/svg+xml";
    }
}

/// htmx navigation link with href fallback + hx-get for in-page swap.
fn nav_link(href: &str, label: &str) -> Markup {
    html! {
        a href=(href)
          hx-get=(href)
          hx-target="main"
          hx-push-url="true"
          hx-swap="innerHTML" {
            (label)
        }
    }
}

fn header() -> Markup {
    html! {
        header {
            nav {
                ul {
                    li."secondary" {
                        a href="/" {
                            strong { "UniMatch" }
                        }
                    }
                }
                ul {
                    li { (nav_link(names::QUIZ_URL, "MatchMe")) }
                    li { (nav_link(names::MATCHES_URL, "Matches")) }
                    li { (nav_link(names::CHANCE_URL, "ChanceMe")) }
                    li."secondary" { (utils::VERSION) }
                }
            }
        }
    }
}

fn main(body: Markup) -> Markup {
    html! {
        main { (body) }
    }
}

pub fn page(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        head {
            meta charset="utf-8";
            meta name="viewport" content="width=device-width, initial-scale=1";
            meta name="color-scheme" content="light dark";

            (css())
            (js())
            (icon())

            title { (format!("{title} - UniMatch")) }
        }

        body."container" {
            (header())
            (main(body))
        }
    }
}

pub fn titled(title: &str, body: Markup) -> Markup {
    html! {
        title { (title) " - UniMatch" }
        (body)
    }
}

/// Fragment for htmx requests, full page otherwise.
pub fn render(is_htmx: bool, title: &str, body: Markup) -> Markup {
    if is_htmx {
        titled(title, body)
    } else {
        page(title, body)
    }
}

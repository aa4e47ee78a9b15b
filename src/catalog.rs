use color_eyre::{eyre::bail, Result};
use serde::Deserialize;

use std::collections::HashSet;

/// The questionnaire shipped with the binary. Loaded once at startup and
/// immutable afterwards.
static CATALOG_JSON: &str = include_str!("../data/questions.json");

#[derive(Deserialize)]
pub struct Catalog {
    pub title: String,
    pub sections: Vec<Section>,
}

#[derive(Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub questions: Vec<Question>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub question: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(default)]
    pub options: Vec<ChoiceOption>,
    pub max_selections: Option<usize>,
    pub left_label: Option<String>,
    pub right_label: Option<String>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub placeholder: Option<String>,
    #[serde(rename = "conditional")]
    pub dependency: Option<Dependency>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum QuestionKind {
    #[serde(rename = "checkbox")]
    MultiChoice,
    #[serde(rename = "radio")]
    SingleChoice,
    #[serde(rename = "likert")]
    Scale,
    #[serde(rename = "number")]
    Number,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceOption {
    pub id: String,
    pub label: String,
    #[serde(deserialize_with = "deserialize_string_or_number")]
    pub value: String,
}

/// A question is only shown while the question it depends on is answered
/// with the required value.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    pub depends_on: String,
    pub required_value: String,
}

/// Deserialize a value that may be either a JSON string or a number.
/// Likert option values are numbers in the catalog but compare as strings
/// everywhere else.
fn deserialize_string_or_number<'de, D: serde::Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    struct Vis;
    impl serde::de::Visitor<'_> for Vis {
        type Value = String;
        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            f.write_str("string or number")
        }
        fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }
        fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }
        fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<String, E> {
            Ok(v.to_string())
        }
        fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_owned())
        }
    }
    d.deserialize_any(Vis)
}

impl Catalog {
    /// All questions in catalog order, sections flattened.
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.sections.iter().flat_map(|s| s.questions.iter())
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions().find(|q| q.id == id)
    }

    fn validate(&self) -> Result<()> {
        let mut seen: HashSet<&str> = HashSet::new();

        for question in self.questions() {
            if !seen.insert(question.id.as_str()) {
                bail!("duplicate question id '{}'", question.id);
            }

            if let Some(max) = question.max_selections {
                if question.kind != QuestionKind::MultiChoice {
                    bail!("question '{}' has maxSelections but is not multi-choice", question.id);
                }
                if max < 1 {
                    bail!("question '{}' has maxSelections < 1", question.id);
                }
            }

            let mut values: HashSet<&str> = HashSet::new();
            for option in &question.options {
                if !values.insert(option.value.as_str()) {
                    bail!(
                        "question '{}' has duplicate option value '{}'",
                        question.id,
                        option.value
                    );
                }
            }

            // A dependency may only point backwards, at a question the user
            // has already passed.
            if let Some(dep) = &question.dependency {
                if !seen.contains(dep.depends_on.as_str()) {
                    bail!(
                        "question '{}' depends on '{}', which does not appear earlier in the catalog",
                        question.id,
                        dep.depends_on
                    );
                }
            }
        }

        Ok(())
    }
}

pub fn load() -> Result<Catalog> {
    let catalog: Catalog = serde_json::from_str(CATALOG_JSON)?;
    catalog.validate()?;
    Ok(catalog)
}

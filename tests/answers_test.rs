use unimatch::answers::{is_complete, visible_questions, AnswerSet};
use unimatch::catalog::Catalog;

fn catalog() -> Catalog {
    serde_json::from_str(
        r#"{
            "title": "test",
            "sections": [{
                "id": "s1",
                "title": "Section one",
                "questions": [
                    {
                        "id": "1",
                        "question": "pick up to two",
                        "type": "checkbox",
                        "maxSelections": 2,
                        "options": [
                            { "id": "o1", "label": "a", "value": "a" },
                            { "id": "o2", "label": "b", "value": "b" },
                            { "id": "o3", "label": "c", "value": "c" },
                            { "id": "o4", "label": "d", "value": "d" }
                        ]
                    },
                    {
                        "id": "2",
                        "question": "pick one",
                        "type": "radio",
                        "options": [
                            { "id": "o5", "label": "x", "value": "x" },
                            { "id": "o6", "label": "y", "value": "y" }
                        ]
                    },
                    {
                        "id": "3",
                        "question": "average",
                        "type": "number"
                    }
                ]
            }, {
                "id": "s2",
                "title": "Section two",
                "questions": [
                    {
                        "id": "B",
                        "question": "only when 2 is x",
                        "type": "radio",
                        "conditional": { "dependsOn": "2", "requiredValue": "x" },
                        "options": [
                            { "id": "o7", "label": "b1", "value": "b1" },
                            { "id": "o8", "label": "b2", "value": "b2" }
                        ]
                    }
                ]
            }]
        }"#,
    )
    .expect("test catalog parses")
}

#[test]
fn multi_choice_selection_never_exceeds_the_cap() {
    let catalog = catalog();
    let question = catalog.question("1").unwrap();
    let mut answers = AnswerSet::default();

    // Hammer the toggle with every value repeatedly; the cap must hold
    // after every single step.
    for value in ["a", "b", "c", "d", "c", "a", "d", "b", "a", "c"] {
        answers.record(question, value).unwrap();
        assert!(answers.selection_count("1") <= 2);
    }
}

#[test]
fn toggling_a_selected_value_always_removes_it() {
    let catalog = catalog();
    let question = catalog.question("1").unwrap();
    let mut answers = AnswerSet::default();

    answers.record(question, "a").unwrap();
    answers.record(question, "b").unwrap();
    assert_eq!(answers.selection_count("1"), 2);

    // At the cap, "c" is silently rejected but "a" still toggles off.
    answers.record(question, "c").unwrap();
    assert_eq!(answers.selection_count("1"), 2);
    assert!(!answers.is_selected("1", "c"));

    answers.record(question, "a").unwrap();
    assert!(!answers.is_selected("1", "a"));
    assert_eq!(answers.selection_count("1"), 1);
}

#[test]
fn freed_capacity_accepts_new_selections() {
    let catalog = catalog();
    let question = catalog.question("1").unwrap();
    let mut answers = AnswerSet::default();

    answers.record(question, "a").unwrap();
    answers.record(question, "b").unwrap();
    answers.record(question, "a").unwrap();
    answers.record(question, "c").unwrap();

    assert!(answers.is_selected("1", "b"));
    assert!(answers.is_selected("1", "c"));
    assert_eq!(answers.selection_count("1"), 2);
}

#[test]
fn single_choice_replaces_unconditionally() {
    let catalog = catalog();
    let question = catalog.question("2").unwrap();
    let mut answers = AnswerSet::default();

    answers.record(question, "x").unwrap();
    answers.record(question, "y").unwrap();

    assert!(answers.is_selected("2", "y"));
    assert!(!answers.is_selected("2", "x"));
}

#[test]
fn malformed_number_is_rejected_and_nothing_is_recorded() {
    let catalog = catalog();
    let question = catalog.question("3").unwrap();
    let mut answers = AnswerSet::default();

    assert!(answers.record(question, "eighty").is_err());
    assert!(answers.record(question, "").is_err());
    assert!(answers.record(question, "NaN").is_err());
    assert!(!answers.is_answered("3"));

    answers.record(question, " 72 ").unwrap();
    assert_eq!(answers.number("3"), Some(72.0));
    assert!(answers.is_answered("3"));
}

#[test]
fn visibility_is_a_pure_function_of_catalog_and_answers() {
    let catalog = catalog();
    let mut answers = AnswerSet::default();
    answers.record(catalog.question("2").unwrap(), "x").unwrap();

    let first: Vec<&str> = visible_questions(&catalog, &answers)
        .map(|q| q.id.as_str())
        .collect();
    let second: Vec<&str> = visible_questions(&catalog, &answers)
        .map(|q| q.id.as_str())
        .collect();

    assert_eq!(first, second);
    assert_eq!(first, vec!["1", "2", "3", "B"]);
}

#[test]
fn dependent_question_appears_and_disappears_with_the_upstream_answer() {
    let catalog = catalog();
    let mut answers = AnswerSet::default();

    let visible_ids = |answers: &AnswerSet| -> Vec<String> {
        visible_questions(&catalog, answers)
            .map(|q| q.id.clone())
            .collect()
    };

    assert!(!visible_ids(&answers).contains(&"B".to_string()));

    answers.record(catalog.question("2").unwrap(), "x").unwrap();
    assert!(visible_ids(&answers).contains(&"B".to_string()));

    // Answer B, then flip the upstream answer: B hides but keeps its answer.
    answers.record(catalog.question("B").unwrap(), "b1").unwrap();
    answers.record(catalog.question("2").unwrap(), "y").unwrap();

    assert!(!visible_ids(&answers).contains(&"B".to_string()));
    assert!(answers.is_selected("B", "b1"));

    // Reverting the upstream answer restores B with its old answer intact.
    answers.record(catalog.question("2").unwrap(), "x").unwrap();
    assert!(visible_ids(&answers).contains(&"B".to_string()));
    assert!(answers.is_selected("B", "b1"));
}

#[test]
fn completion_ignores_answers_of_hidden_questions() {
    let catalog = catalog();
    let mut answers = AnswerSet::default();

    answers.record(catalog.question("1").unwrap(), "a").unwrap();
    answers.record(catalog.question("2").unwrap(), "y").unwrap();
    answers.record(catalog.question("3").unwrap(), "88").unwrap();

    // "B" is hidden ("2" is "y"), so the quiz is complete without it.
    assert!(is_complete(&catalog, &answers));

    // Making "B" visible reopens the quiz until it is answered.
    answers.record(catalog.question("2").unwrap(), "x").unwrap();
    assert!(!is_complete(&catalog, &answers));

    answers.record(catalog.question("B").unwrap(), "b2").unwrap();
    assert!(is_complete(&catalog, &answers));
}

#[test]
fn completion_requires_every_visible_question() {
    let catalog = catalog();
    let mut answers = AnswerSet::default();
    assert!(!is_complete(&catalog, &answers));

    answers.record(catalog.question("1").unwrap(), "a").unwrap();
    answers.record(catalog.question("1").unwrap(), "b").unwrap();
    answers.record(catalog.question("2").unwrap(), "y").unwrap();
    assert!(!is_complete(&catalog, &answers), "number question still open");

    answers.record(catalog.question("3").unwrap(), "72").unwrap();
    assert!(is_complete(&catalog, &answers));
}

#[test]
fn answers_serialize_keyed_by_question_id() {
    let catalog = catalog();
    let mut answers = AnswerSet::default();

    answers.record(catalog.question("1").unwrap(), "a").unwrap();
    answers.record(catalog.question("1").unwrap(), "b").unwrap();
    answers.record(catalog.question("2").unwrap(), "x").unwrap();
    answers.record(catalog.question("3").unwrap(), "72").unwrap();

    let json = serde_json::to_value(&answers).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "1": ["a", "b"],
            "2": "x",
            "3": 72.0
        })
    );
}

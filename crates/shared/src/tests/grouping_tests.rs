use super::*;
use crate::domain::GroupKey;
use serde_json::{json, Value};

fn players() -> Vec<Value> {
    vec![
        json!({"name": "Steve", "team": "blue"}),
        json!({"name": "Jack", "team": "red"}),
        json!({"name": "Carol", "team": "blue"}),
    ]
}

fn names(records: &[Value]) -> Vec<&str> {
    records
        .iter()
        .map(|r| r["name"].as_str().expect("name"))
        .collect()
}

#[test]
fn groups_by_field_name_in_key_order() {
    let grouped = group_by(players(), Selector::field("team"));

    let keys: Vec<_> = grouped.keys().cloned().collect();
    assert_eq!(keys, vec![GroupKey::from("blue"), GroupKey::from("red")]);
    assert_eq!(
        names(grouped.get(&GroupKey::from("blue")).expect("blue")),
        vec!["Steve", "Carol"]
    );
    assert_eq!(
        names(grouped.get(&GroupKey::from("red")).expect("red")),
        vec!["Jack"]
    );
}

#[test]
fn groups_by_key_function() {
    let records = vec![json!({"n": 1}), json!({"n": 2}), json!({"n": 1})];

    let grouped = group_by(records, Selector::key(|r: &Value| r.field("n")));

    assert_eq!(
        grouped.into_inner(),
        vec![
            (GroupKey::Number(1.0), vec![json!({"n": 1}), json!({"n": 1})]),
            (GroupKey::Number(2.0), vec![json!({"n": 2})]),
        ]
    );
}

#[test]
fn empty_input_yields_no_groups() {
    let grouped = group_by(Vec::<Value>::new(), Selector::field("team"));

    assert!(grouped.is_empty());
    assert_eq!(grouped.record_count(), 0);
    assert_eq!(grouped, Grouped::default());
}

#[test]
fn single_shared_key_keeps_whole_sequence() {
    let records: Vec<Value> = (0..5).map(|i| json!({"i": i, "k": "same"})).collect();

    let grouped = group_by(records.clone(), Selector::field("k"));

    assert_eq!(grouped.len(), 1);
    assert_eq!(grouped.get(&GroupKey::from("same")), Some(records.as_slice()));
}

#[test]
fn missing_field_forms_its_own_group_first() {
    let records = vec![
        json!({"name": "a", "team": "red"}),
        json!({"name": "b"}),
        json!({"name": "c", "team": null}),
        json!({"name": "d"}),
    ];

    let grouped = group_by(records, Selector::field("team"));

    let keys: Vec<_> = grouped.keys().cloned().collect();
    assert_eq!(
        keys,
        vec![GroupKey::Missing, GroupKey::Null, GroupKey::from("red")]
    );
    assert_eq!(
        names(grouped.get(&GroupKey::Missing).expect("missing")),
        vec!["b", "d"]
    );
}

#[test]
fn works_over_borrowed_records() {
    let records = players();

    let grouped = group_by(records.iter(), Selector::field("team"));

    assert_eq!(grouped.record_count(), 3);
    let red = grouped.get(&GroupKey::from("red")).expect("red");
    assert!(std::ptr::eq(red[0], &records[1]));
}

#[test]
fn key_function_runs_once_per_record() {
    let calls = std::cell::Cell::new(0);
    let records = players();

    let grouped = group_by_key(records, |r| {
        calls.set(calls.get() + 1);
        r["team"].as_str().unwrap_or_default().to_string()
    });

    assert_eq!(calls.get(), 3);
    assert_eq!(grouped.len(), 2);
}

#[test]
fn group_by_key_accepts_plain_structs() {
    #[derive(Debug, PartialEq)]
    struct Item {
        label: &'static str,
        weight: u8,
    }

    let grouped = group_by_key(
        vec![
            Item { label: "x", weight: 3 },
            Item { label: "y", weight: 1 },
            Item { label: "z", weight: 3 },
        ],
        |item| item.weight,
    );

    let shape: Vec<(u8, Vec<&str>)> = grouped
        .iter()
        .map(|(k, items)| (*k, items.iter().map(|i| i.label).collect()))
        .collect();
    assert_eq!(shape, vec![(1, vec!["y"]), (3, vec!["x", "z"])]);
}

#[test]
fn serializes_as_object_in_key_order() {
    let grouped = group_by(players(), Selector::field("team"));

    let encoded = serde_json::to_string(&grouped).expect("encode");

    assert_eq!(
        encoded,
        r#"{"blue":[{"name":"Steve","team":"blue"},{"name":"Carol","team":"blue"}],"red":[{"name":"Jack","team":"red"}]}"#
    );
}

#[test]
fn selector_converts_from_field_name() {
    let selector: Selector<'_, Value, GroupKey> = "team".into();

    assert!(matches!(selector, Selector::Field(ref name) if name == "team"));
    assert_eq!(format!("{selector:?}"), r#"Field("team")"#);
}

#[test]
fn key_selector_works_on_records_with_fields() {
    use crate::protocol::WordRecord;

    let grouped = group_by(
        vec![
            WordRecord::new("hat"),
            WordRecord::new("cheerful"),
            WordRecord::new("bat"),
        ],
        Selector::key(|r: &WordRecord| GroupKey::from(r.word.len() as u32)),
    );

    let keys: Vec<String> = grouped.keys().map(ToString::to_string).collect();
    assert_eq!(keys, vec!["3", "8"]);
}

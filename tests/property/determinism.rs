//! Property-based tests for merge determinism guarantees

use proptest::prelude::*;
use serde_json::{json, Value};
use settle::document::Document;
use settle::merge::{deep_merge, get_path, shallow_set, KeyPath};

fn value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1000i64..1000).prop_map(|n| json!(n)),
        "[a-z]{0,6}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 12, 4, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            proptest::collection::vec(("[a-z]{1,6}", inner), 0..4).prop_map(|pairs| {
                let mut map = Document::new();
                for (key, value) in pairs {
                    map.insert(key, value);
                }
                Value::Object(map)
            }),
        ]
    })
}

fn document_strategy() -> impl Strategy<Value = Document> {
    proptest::collection::vec(("[a-z]{1,6}", value_strategy()), 0..6).prop_map(|pairs| {
        let mut document = Document::new();
        for (key, value) in pairs {
            document.insert(key, value);
        }
        document
    })
}

/// Test that deep_merge produces identical results on repeated runs
#[test]
fn test_deep_merge_determinism_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(document_strategy(), document_strategy()),
            |(base, overlay)| {
                let first = deep_merge(&base, &overlay);
                let second = deep_merge(&base, &overlay);

                // Same inputs always produce the same report.
                assert_eq!(first, second);

                Ok(())
            },
        )
        .unwrap();
}

/// Test that re-applying an overlay to its own merge result changes nothing
#[test]
fn test_deep_merge_idempotence_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(document_strategy(), document_strategy()),
            |(base, overlay)| {
                let first = deep_merge(&base, &overlay);
                let second = deep_merge(&first.document, &overlay);

                assert!(second.changed_keys.is_empty());
                assert!(second.conflicts.is_empty());
                assert_eq!(second.document, first.document);

                Ok(())
            },
        )
        .unwrap();
}

/// Test that every conflict path also appears among the changed keys
#[test]
fn test_conflicts_are_recorded_as_changed_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(document_strategy(), document_strategy()),
            |(base, overlay)| {
                let result = deep_merge(&base, &overlay);

                for conflict in &result.conflicts {
                    assert!(
                        result.changed_keys.contains(&conflict.path),
                        "conflict at '{}' missing from changed keys",
                        conflict.path
                    );
                }

                Ok(())
            },
        )
        .unwrap();
}

/// Test that the overlay wins wherever no object-to-object recursion applies
#[test]
fn test_overlay_wins_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(document_strategy(), document_strategy()),
            |(base, overlay)| {
                let result = deep_merge(&base, &overlay);

                for (key, value) in &overlay {
                    let recursed = value.is_object()
                        && base.get(key).map_or(false, |b| b.is_object());
                    if !recursed {
                        assert_eq!(result.document.get(key), Some(value));
                    }
                }

                Ok(())
            },
        )
        .unwrap();
}

/// Test that base keys absent from the overlay survive the merge untouched
#[test]
fn test_untouched_base_keys_survive_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(document_strategy(), document_strategy()),
            |(base, overlay)| {
                let result = deep_merge(&base, &overlay);

                for (key, value) in &base {
                    if !overlay.contains_key(key) {
                        assert_eq!(result.document.get(key), Some(value));
                    }
                }

                Ok(())
            },
        )
        .unwrap();
}

/// Test that a value set at a generated key path reads back identically
#[test]
fn test_shallow_set_then_get_round_trip_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    let segments = proptest::collection::vec("[a-z]{1,6}", 1..4);
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1000i64..1000).prop_map(|n| json!(n)),
        "[a-z]{0,6}".prop_map(Value::String),
    ];

    runner
        .run(&(segments, leaf), |(segments, value)| {
            let path = KeyPath::parse(&segments.join(".")).unwrap();
            let base = Document::new();

            let result = shallow_set(&base, &path, value.clone()).unwrap();
            assert_eq!(get_path(&result.document, &path), Some(&value));
            assert_eq!(
                result.changed_keys.iter().collect::<Vec<_>>(),
                [path.as_str()]
            );

            Ok(())
        })
        .unwrap();
}

/// Test a fixed merge twice to pin the exact report shape
#[test]
fn test_fixed_merge_report_is_stable() {
    let base = match json!({"editor": {"theme": "light", "font": 12}, "keep": true}) {
        Value::Object(map) => map,
        _ => unreachable!(),
    };
    let overlay = match json!({"editor": {"theme": "dark"}}) {
        Value::Object(map) => map,
        _ => unreachable!(),
    };

    let first = deep_merge(&base, &overlay);
    let second = deep_merge(&base, &overlay);

    assert_eq!(first, second);
    assert_eq!(first.changed_keys.iter().collect::<Vec<_>>(), ["editor.theme"]);
    assert_eq!(first.conflicts.len(), 1);
    assert_eq!(first.conflicts[0].old, json!("light"));
}

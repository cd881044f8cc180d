//! Property-based tests using QuickCheck

use quickcheck::{QuickCheck, TestResult};
use serde_json::{json, Value};
use treepath::{path, resolve, Error, Path, Step, Tree};

/// Property: a path of plain keys equals manually chained lookups
#[test]
fn prop_key_chain_equals_chained_lookups() {
    fn prop(keys: Vec<String>) -> TestResult {
        if keys.is_empty() || keys.len() > 8 {
            return TestResult::discard();
        }

        // Nest one object per key around a known leaf.
        let mut root = json!(42);
        for key in keys.iter().rev() {
            let mut map = serde_json::Map::new();
            map.insert(key.clone(), root);
            root = Value::Object(map);
        }

        let mut expected = &root;
        for key in &keys {
            expected = match expected.child_by_name(key) {
                Some(child) => child,
                None => return TestResult::failed(),
            };
        }

        let got = match resolve(&root, Path::new(keys.clone()).unwrap()) {
            Ok(got) => got,
            Err(_) => return TestResult::failed(),
        };
        TestResult::from_bool(got.as_one() == Some(expected))
    }

    QuickCheck::new()
        .tests(100)
        .quickcheck(prop as fn(Vec<String>) -> TestResult);
}

/// Property: a missing final key raises exactly when the chained lookup would
#[test]
fn prop_key_chain_raises_like_chained_lookups() {
    fn prop(keys: Vec<String>) -> TestResult {
        if keys.is_empty() || keys.len() > 8 || keys.contains(&String::from("absent")) {
            return TestResult::discard();
        }

        let mut root = json!(42);
        for key in keys.iter().rev() {
            let mut map = serde_json::Map::new();
            map.insert(key.clone(), root);
            root = Value::Object(map);
        }

        let probe = Path::new(keys).unwrap().then("absent");
        TestResult::from_bool(matches!(
            resolve(&root, probe),
            Err(Error::KeyNotFound { .. })
        ))
    }

    QuickCheck::new()
        .tests(100)
        .quickcheck(prop as fn(Vec<String>) -> TestResult);
}

/// Property: two wildcards over a list of lists flatten exactly one level
#[test]
fn prop_flatten_depth_is_one() {
    fn prop(rows: Vec<Vec<i64>>) -> TestResult {
        let expected: Vec<Value> = rows.iter().flatten().map(|n| json!(n)).collect();
        let root = json!(rows);
        let got = match resolve(&root, (.., ..)) {
            Ok(got) => got,
            Err(_) => return TestResult::failed(),
        };
        let flat: Vec<Value> = got.into_vec().into_iter().cloned().collect();
        TestResult::from_bool(flat == expected && !flat.iter().any(Value::is_array))
    }

    QuickCheck::new()
        .tests(100)
        .quickcheck(prop as fn(Vec<Vec<i64>>) -> TestResult);
}

/// Property: wildcard branches missing the rest of the path are dropped in
/// order, never erred
#[test]
fn prop_skip_keeps_surviving_branches_in_order() {
    fn prop(marks: Vec<bool>) -> TestResult {
        let elements: Vec<Value> = marks
            .iter()
            .enumerate()
            .map(|(i, has_name)| {
                if *has_name {
                    json!({"name": i})
                } else {
                    json!({"id": i})
                }
            })
            .collect();
        let root = json!(elements);

        let got = match resolve(&root, (.., "name")) {
            Ok(got) => got,
            Err(_) => return TestResult::failed(),
        };

        let expected: Vec<Value> = marks
            .iter()
            .enumerate()
            .filter(|(_, has_name)| **has_name)
            .map(|(i, _)| json!(i))
            .collect();
        let flat: Vec<Value> = got.into_vec().into_iter().cloned().collect();
        TestResult::from_bool(flat == expected)
    }

    QuickCheck::new()
        .tests(100)
        .quickcheck(prop as fn(Vec<bool>) -> TestResult);
}

/// Property: a wildcard enumerates map values in the map's own order
/// Using manual test cases instead of QuickCheck to keep documents readable
#[test]
fn prop_wildcard_equals_child_enumeration() {
    let test_cases = vec![
        json!({}),
        json!({"a": 1}),
        json!({"z": 1, "a": 2, "m": 3}),
        json!({"nested": {"x": 1}, "flat": 2}),
        json!([1, 2, 3]),
        json!([[1], [], [2, 3]]),
    ];

    for root in test_cases {
        let got = resolve(&root, ..).unwrap();
        assert_eq!(
            got.into_vec(),
            root.children().unwrap(),
            "wildcard must enumerate children of {} in order",
            root
        );
    }
}

/// Property: a one-step path behaves exactly like its single step
/// Using manual test cases instead of QuickCheck to cover every step kind
#[test]
fn prop_single_step_composite_reduces() {
    let root = json!({
        "things": [{"name": "cat"}, {"name": "dog"}],
        "count": 2,
    });

    let cases: Vec<Step> = vec![
        Step::from("things"),
        Step::from("count"),
        Step::Wildcard,
        Step::Deep,
    ];

    for step in cases {
        let composite = resolve(&root, Path::new([step.clone()]).unwrap());
        let plain = resolve(&root, Path::from(step.clone()));
        assert_eq!(
            composite, plain,
            "one-step composite must equal its step: {:?}",
            step
        );
    }
}

/// Property: a deep wildcard tries the rest of the path at zero levels too,
/// before every deeper level
/// Using manual test cases instead of QuickCheck to pick readable documents
#[test]
fn prop_deep_wildcard_includes_zero_level_matches() {
    let test_cases = vec![
        (json!({"a": 1, "b": 2}), vec![json!(1)]),
        (json!({"b": {"a": 7}}), vec![json!(7)]),
        (json!({"a": 1, "b": {"a": 7}}), vec![json!(1), json!(7)]),
        (json!([{"a": 3}, {"b": 4}]), vec![json!(3)]),
        (json!({"b": true}), vec![]),
        (json!([1, 2, 3]), vec![]),
    ];

    for (root, expected) in test_cases {
        let got = resolve(&root, path![**, "a"]).unwrap();
        let flat: Vec<Value> = got.into_vec().into_iter().cloned().collect();
        assert_eq!(flat, expected, "deep wildcard over {}", root);
    }
}

/// Property: deep wildcard equals plain wildcard when the key matches at no
/// level at all
/// Using manual test cases instead of QuickCheck to pick flat documents
#[test]
fn prop_deep_wildcard_equals_wildcard_when_nothing_matches() {
    let test_cases = vec![
        json!({"a": 1, "b": 2}),
        json!({"a": "text", "b": true}),
        json!([1, 2, 3]),
    ];

    for root in test_cases {
        assert_eq!(
            resolve(&root, path![**, "missing"]).unwrap(),
            resolve(&root, path![*, "missing"]).unwrap(),
            "document {} has no match at any level",
            root
        );
    }
}

/// Property: an empty composite is rejected for every caller
#[test]
fn prop_empty_composite_always_invalid() {
    assert_eq!(Path::new(Vec::<Step>::new()), Err(Error::EmptyPath));
    assert_eq!(Path::new(Vec::<&str>::new()), Err(Error::EmptyPath));
    assert_eq!(Path::new(Vec::<i64>::new()), Err(Error::EmptyPath));
}

use super::*;
use crate::expression::definitions::Registry;
use crate::expression::evaluation_context::{Feature, GlobalProperties};
use crate::expression::parsing_context::parse_expression;
use serde_json::json;

fn eval(raw: Json) -> Result<Value, RuntimeError> {
    eval_with(raw, json!({}))
}

fn eval_with(raw: Json, properties: Json) -> Result<Value, RuntimeError> {
    let e = parse_expression(Registry::standard(), &raw, None).unwrap();
    let globals = GlobalProperties::default();
    let feature = Feature::with_properties(properties.as_object().cloned().unwrap_or_default());
    e.evaluate(&EvaluationContext::new(&globals).with_feature(&feature))
}

#[test]
fn string_positions_count_characters() {
    assert_eq!(eval(json!(["index-of", "b", "🙂ab"])).unwrap(), Value::Number(2.0));
    assert_eq!(eval(json!(["index-of", "a", "banana", 2])).unwrap(), Value::Number(3.0));
    assert_eq!(eval(json!(["index-of", "z", "banana"])).unwrap(), Value::Number(-1.0));
    assert_eq!(eval(json!(["index-of", "", "abc"])).unwrap(), Value::Number(0.0));
}

#[test]
fn from_index_past_the_end_finds_nothing() {
    assert_eq!(eval(json!(["index-of", "a", "abc", 10])).unwrap(), Value::Number(-1.0));
}

#[test]
fn array_search_uses_value_equality() {
    let raw = json!(["index-of", 3, ["literal", [1, 2, 3, 3]], 2]);
    assert_eq!(eval(raw).unwrap(), Value::Number(2.0));

    let raw = json!(["index-of", 3, ["literal", [1, 2, 3, 3]], 3]);
    assert_eq!(eval(raw).unwrap(), Value::Number(3.0));

    let raw = json!(["index-of", "3", ["literal", [1, 2, 3]]]);
    assert_eq!(eval(raw).unwrap(), Value::Number(-1.0));

    let raw = json!(["index-of", null, ["literal", [1, null]]]);
    assert_eq!(eval(raw).unwrap(), Value::Number(1.0));
}

#[test]
fn negative_array_from_index_counts_back() {
    let raw = json!(["index-of", 1, ["literal", [1, 2, 1]], -1]);
    assert_eq!(eval(raw).unwrap(), Value::Number(2.0));

    let raw = json!(["index-of", 1, ["literal", [1, 2, 1]], -10]);
    assert_eq!(eval(raw).unwrap(), Value::Number(0.0));
}

#[test]
fn feature_values_are_searched_at_runtime() {
    let raw = json!(["index-of", "x", ["get", "tags"]]);
    let got = eval_with(raw.clone(), json!({"tags": ["a", "x"]})).unwrap();
    assert_eq!(got, Value::Number(1.0));

    let got = eval_with(raw, json!({"tags": "xyz"})).unwrap();
    assert_eq!(got, Value::Number(0.0));
}

#[test]
fn arity_violation_is_one_error() {
    for raw in [json!(["index-of", "a"]), json!(["index-of", "a", "b", 1, 2])] {
        let errors = parse_expression(Registry::standard(), &raw, None).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.starts_with("Expected 2 or 3 arguments, but found"));
    }
}

#[test]
fn non_numeric_from_index_is_rejected() {
    let errors = parse_expression(
        Registry::standard(),
        &json!(["index-of", "a", "abc", true]),
        None,
    )
    .unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].key(), "[3]");
    assert_eq!(errors[0].message, "Expected number but found boolean instead.");
}

#[test]
fn structured_needle_is_rejected_when_parsing() {
    let errors = parse_expression(
        Registry::standard(),
        &json!(["index-of", ["literal", [1]], ["literal", [[1]]]]),
        None,
    )
    .unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(errors[0]
        .message
        .starts_with("Expected first argument to be of type boolean, string, number or null"));
}

#[test]
fn structured_needle_fails_at_runtime() {
    let err = eval_with(
        json!(["index-of", ["get", "n"], "abc"]),
        json!({"n": {"k": 1}}),
    )
    .unwrap_err();
    assert_eq!(
        err.message,
        "Expected first argument to be of type boolean, string, number or null, but found object instead."
    );
}

#[test]
fn non_searchable_haystack_fails_at_runtime() {
    let err = eval_with(json!(["index-of", "a", ["get", "n"]]), json!({"n": 5})).unwrap_err();
    assert_eq!(
        err.message,
        "Expected second argument to be of type array or string, but found number instead."
    );
}

#[test]
fn index_of_is_a_number() {
    let e = parse_expression(Registry::standard(), &json!(["index-of", "a", ["get", "s"]]), None)
        .unwrap();
    assert_eq!(*e.ty(), Type::Number);
}

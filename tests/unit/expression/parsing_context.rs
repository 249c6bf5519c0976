use super::*;
use crate::expression::evaluation_context::Feature;
use crate::values::{Color, Value};
use serde_json::json;

fn compile(v: Json) -> Result<Box<dyn Expression>, Vec<ParsingError>> {
    parse_expression(Registry::standard(), &v, None)
}

fn compile_errors(v: Json) -> Vec<ParsingError> {
    match compile(v) {
        Ok(e) => panic!("expected errors, compiled {e:?}"),
        Err(errors) => errors,
    }
}

fn eval(e: &dyn Expression) -> Result<Value, crate::expression::error::RuntimeError> {
    let globals = GlobalProperties::default();
    e.evaluate(&EvaluationContext::new(&globals))
}

#[test]
fn bare_literals_compile_to_constants() {
    let e = compile(json!(3)).unwrap();
    assert_eq!(e.literal_value(), Some(&Value::Number(3.0)));
    assert_eq!(*e.ty(), Type::Number);

    let e = compile(json!("x")).unwrap();
    assert_eq!(e.literal_value(), Some(&Value::from("x")));

    let e = compile(json!(null)).unwrap();
    assert_eq!(*e.ty(), Type::Null);
}

#[test]
fn empty_array_is_rejected() {
    let errors = compile_errors(json!([]));
    assert_eq!(errors.len(), 1);
    assert!(errors[0].path.is_empty());
    assert!(errors[0].message.starts_with("Expected an array with at least one element."));
}

#[test]
fn bare_object_is_rejected() {
    let errors = compile_errors(json!({"a": 1}));
    assert_eq!(
        errors[0].message,
        r#"Bare objects invalid. Use ["literal", {...}] instead."#
    );
}

#[test]
fn operator_name_must_be_a_string() {
    let errors = compile_errors(json!([1, 2]));
    assert_eq!(errors[0].path, vec![0]);
    assert!(errors[0]
        .message
        .starts_with("Expression name must be a string, but found number instead."));
}

#[test]
fn unknown_operator_is_reported_at_its_name() {
    let errors = compile_errors(json!(["frobnicate", 1]));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].key(), "[0]");
    assert_eq!(
        errors[0].message,
        r#"Unknown expression "frobnicate". If you wanted a literal array, use ["literal", [...]]."#
    );
}

#[test]
fn errors_are_collected_across_sibling_branches() {
    let errors = compile_errors(json!(["index-of", ["nope"], ["nada"]]));
    let keys: Vec<String> = errors.iter().map(ParsingError::key).collect();
    assert_eq!(keys, vec!["[1][0]", "[2][0]"]);
}

#[test]
fn nested_error_paths_chain_argument_indices() {
    let errors = compile_errors(json!(["let", "a", ["index-of", 1], ["var", "a"]]));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].path, vec![2]);
    assert_eq!(
        errors[0].message,
        "Expected 2 or 3 arguments, but found 1 instead."
    );
}

#[test]
fn expected_type_mismatch_is_a_parse_error() {
    let errors = parse_expression(Registry::standard(), &json!("x"), Some(&Type::Number))
        .unwrap_err();
    assert_eq!(errors[0].message, "Expected number but found string instead.");
}

#[test]
fn value_typed_argument_gets_a_runtime_assertion() {
    let e = parse_expression(Registry::standard(), &json!(["get", "x"]), Some(&Type::Number))
        .unwrap();
    assert_eq!(*e.ty(), Type::Number);

    let globals = GlobalProperties::default();
    let feature = Feature::with_properties(
        json!({"x": "s"}).as_object().cloned().unwrap_or_default(),
    );
    let err = e
        .evaluate(&EvaluationContext::new(&globals).with_feature(&feature))
        .unwrap_err();
    assert_eq!(
        err.message,
        "Expected value to be of type number, but found string instead."
    );
}

#[test]
fn color_strings_are_coerced_and_folded() {
    let e = parse_expression(Registry::standard(), &json!("red"), Some(&Type::Color)).unwrap();
    assert_eq!(*e.ty(), Type::Color);
    assert_eq!(e.literal_value(), Some(&Value::Color(Color::new(1.0, 0.0, 0.0, 1.0))));
}

#[test]
fn invalid_color_literal_fails_while_folding() {
    let errors =
        parse_expression(Registry::standard(), &json!("not-a-color"), Some(&Type::Color))
            .unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("Could not parse color"));
}

#[test]
fn constant_subtrees_fold_to_literals() {
    let e = compile(json!(["index-of", "b", "🙂ab"])).unwrap();
    assert_eq!(e.literal_value(), Some(&Value::Number(2.0)));
}

#[test]
fn feature_reads_are_not_folded() {
    let e = compile(json!(["index-of", "b", ["get", "name"]])).unwrap();
    assert!(e.literal_value().is_none());
    assert!(crate::expression::is_feature_dependent(e.as_ref()));
}

#[test]
fn child_scope_shadows_without_mutating_parent() {
    let one: Arc<dyn Expression> = Arc::new(Literal::new(Value::Number(1.0), Type::Number));
    let two: Arc<dyn Expression> = Arc::new(Literal::new(Value::Number(2.0), Type::Number));

    let unit: Arc<dyn Expression> = Arc::new(Literal::new(Value::Null, Type::Null));

    let parent = Scope::default().concat(vec![("a".to_owned(), one)]);
    let child = parent.concat(vec![("a".to_owned(), two), ("b".to_owned(), unit)]);

    let a = child.get("a").unwrap();
    assert_eq!(eval(a.as_ref()).unwrap(), Value::Number(2.0));
    assert!(child.has("b"));

    let a = parent.get("a").unwrap();
    assert_eq!(eval(a.as_ref()).unwrap(), Value::Number(1.0));
    assert!(!parent.has("b"));
    assert!(!Scope::default().has("a"));
}

#[test]
fn let_bindings_do_not_leak_into_siblings() {
    let errors = compile_errors(json!([
        "==",
        ["let", "a", 1, ["var", "a"]],
        ["var", "a"]
    ]));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].key(), "[2][1]");
}

fn parse_answer(args: &[Json], ctx: &mut ParsingContext<'_>) -> Option<Box<dyn Expression>> {
    if args.len() != 1 {
        return ctx.error("Expected no arguments.");
    }
    Some(Box::new(Literal::new(Value::Number(42.0), Type::Number)))
}

#[test]
fn registries_accept_new_operators() {
    let mut registry = Registry::with_standard_operators();
    registry.register("answer", parse_answer);

    let e = parse_expression(&registry, &json!(["index-of", ["answer"], ["literal", [1, 42]]]), None)
        .unwrap();
    assert_eq!(eval(e.as_ref()).unwrap(), Value::Number(1.0));

    assert!(parse_expression(Registry::standard(), &json!(["answer"]), None).is_err());
}

#[test]
fn js_typeof_matches_host_names() {
    assert_eq!(js_typeof(&json!(null)), "object");
    assert_eq!(js_typeof(&json!([1])), "object");
    assert_eq!(js_typeof(&json!(true)), "boolean");
    assert_eq!(js_typeof(&json!(1.5)), "number");
}

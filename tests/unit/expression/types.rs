use super::*;
use serde_json::json;

#[test]
fn type_names_match_style_spec() {
    assert_eq!(type_to_string(&Type::Number), "number");
    assert_eq!(type_to_string(&Type::NumberArray), "numberArray");
    assert_eq!(type_to_string(&Type::array(Type::Value, None)), "array");
    assert_eq!(
        type_to_string(&Type::array(Type::String, None)),
        "array<string>"
    );
    assert_eq!(
        type_to_string(&Type::array(Type::Number, Some(2))),
        "array<number, 2>"
    );
}

#[test]
fn value_type_is_valid_everywhere() {
    let allowed = [Type::Boolean, Type::String];
    assert!(is_valid_type(&Type::String, &allowed));
    assert!(is_valid_type(&Type::Value, &allowed));
    assert!(!is_valid_type(&Type::Color, &allowed));
}

#[test]
fn is_valid_type_compares_kinds_only() {
    let allowed = [Type::array(Type::Value, None)];
    assert!(is_valid_type(&Type::array(Type::Number, Some(3)), &allowed));
}

#[test]
fn native_check_uses_dynamic_shape() {
    let v = Value::from_json(&json!("x"));
    assert!(is_valid_native_type(&v, &[NativeType::String]));
    assert!(!is_valid_native_type(&v, &[NativeType::Number, NativeType::Null]));
    assert!(is_valid_native_type(&Value::Null, &[NativeType::Null]));
}

#[test]
fn check_subtype_accepts_members_of_value() {
    assert_eq!(check_subtype(&Type::Value, &Type::Color), None);
    assert_eq!(check_subtype(&Type::Value, &Type::Value), None);
    assert_eq!(
        check_subtype(&Type::Value, &Type::array(Type::Number, None)),
        None
    );
    assert_eq!(check_subtype(&Type::Value, &Type::Collator).as_deref(),
        Some("Expected value but found collator instead."));
}

#[test]
fn check_subtype_arrays() {
    let expected = Type::array(Type::Number, Some(2));
    assert_eq!(check_subtype(&expected, &Type::array(Type::Number, Some(2))), None);
    assert!(check_subtype(&expected, &Type::array(Type::Number, Some(3))).is_some());
    assert!(check_subtype(&expected, &Type::array(Type::String, Some(2))).is_some());
    assert_eq!(
        check_subtype(&Type::array(Type::Number, None), &Type::array(Type::Value, Some(0))),
        None
    );
    assert_eq!(
        check_subtype(&Type::Number, &Type::String).as_deref(),
        Some("Expected number but found string instead.")
    );
}

#[test]
fn error_type_is_subtype_of_everything() {
    assert_eq!(check_subtype(&Type::Number, &Type::Error), None);
}

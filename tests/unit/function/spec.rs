use super::*;
use serde_json::json;

#[test]
fn property_spec_reads_style_json() {
    let spec = PropertySpec::from_json(&json!({
        "type": "enum",
        "default": "butt",
        "values": {"butt": {}, "round": {}, "square": {}},
        "expression": {"interpolated": false, "parameters": ["zoom"]}
    }))
    .unwrap();
    assert_eq!(spec.ty, "enum");
    assert_eq!(spec.default, Some(json!("butt")));
    assert!(spec.has_enum_value("round"));
    assert!(!spec.has_enum_value("miter"));
    assert!(!spec.supports_interpolation());
    assert_eq!(spec.expected_type(), Type::String);
}

#[test]
fn enum_values_accept_a_list() {
    let spec = PropertySpec {
        values: Some(json!(["left", "right"])),
        ..PropertySpec::new("enum")
    };
    assert_eq!(spec.enum_values(), vec!["left", "right"]);
}

#[test]
fn expected_types_follow_the_value_type() {
    assert_eq!(PropertySpec::new("color").expected_type(), Type::Color);
    assert_eq!(PropertySpec::new("padding").expected_type(), Type::Padding);
    assert_eq!(PropertySpec::new("mystery").expected_type(), Type::Value);

    let spec = PropertySpec {
        value: Some("number".to_owned()),
        length: Some(2),
        ..PropertySpec::new("array")
    };
    assert_eq!(spec.expected_type(), Type::array(Type::Number, Some(2)));
    assert_eq!(
        PropertySpec::new("array").expected_type(),
        Type::array(Type::Value, None)
    );
}

#[test]
fn builders_set_fields() {
    let spec = PropertySpec::new("number").with_default(json!(1)).interpolatable();
    assert_eq!(spec.default, Some(json!(1)));
    assert!(spec.supports_interpolation());
}

#[test]
fn values_parse_by_property_type() {
    let color = PropertySpec::new("color");
    assert_eq!(
        color.parse_value(&json!("#ff0000")),
        Some(Value::Color(Color::new(1.0, 0.0, 0.0, 1.0)))
    );
    assert_eq!(color.parse_value(&json!("nope")), None);
    assert_eq!(color.parse_value(&json!(3)), None);

    let padding = PropertySpec::new("padding");
    assert_eq!(
        padding.parse_value(&json!([1, 2])),
        Some(Value::Padding(Padding::new([1.0, 2.0, 1.0, 2.0])))
    );

    let plain = PropertySpec::new("string");
    assert_eq!(plain.parse_value(&json!("x")), Some(Value::from("x")));
    assert!(!plain.has_value_parser());
    assert!(color.has_value_parser());
}

#[test]
fn interpolatable_value_types() {
    for ty in ["number", "color", "padding", "numberArray", "colorArray", "array"] {
        assert!(PropertySpec::new(ty).is_interpolatable(), "{ty}");
    }
    for ty in ["string", "enum", "boolean", "formatted"] {
        assert!(!PropertySpec::new(ty).is_interpolatable(), "{ty}");
    }
}

#[test]
fn function_parameters_read_camel_case() {
    let params = FunctionParameters::from_json(&json!({
        "type": "exponential",
        "base": 2,
        "colorSpace": "lab",
        "property": "height",
        "default": 0,
        "stops": [[0, 0], [10, 100]]
    }))
    .unwrap();
    assert_eq!(params.kind.as_deref(), Some("exponential"));
    assert_eq!(params.base, Some(2.0));
    assert_eq!(params.color_space.as_deref(), Some("lab"));
    assert_eq!(params.stops[1], Stop(json!(10), json!(100)));
    assert!(!params.is_zoom_and_feature_dependent());
}

#[test]
fn object_stop_keys_mark_composite_functions() {
    let params = FunctionParameters::from_json(&json!({
        "property": "p",
        "stops": [[{"zoom": 0, "value": 1}, 2]]
    }))
    .unwrap();
    assert!(params.is_zoom_and_feature_dependent());
}

#[test]
fn malformed_parameters_are_serde_errors() {
    let err = FunctionParameters::from_json(&json!({"stops": 3})).unwrap_err();
    assert!(matches!(err, crate::StyleError::Serde(_)));
}

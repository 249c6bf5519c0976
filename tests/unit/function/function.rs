use super::*;
use serde_json::json;

fn params(raw: Json) -> FunctionParameters {
    FunctionParameters::from_json(&raw).unwrap()
}

fn feature(properties: Json) -> Feature {
    Feature::with_properties(properties.as_object().cloned().unwrap_or_default())
}

fn at_zoom(f: &CompiledFunction, zoom: f64) -> Option<Value> {
    f.evaluate(&GlobalProperties::at_zoom(zoom), None)
}

#[test]
fn interval_camera_function_steps() {
    let f = create_function(
        &params(json!({"stops": [[0, "a"], [10, "b"]]})),
        &PropertySpec::new("string"),
    )
    .unwrap();
    assert_eq!(f.kind(), FunctionKind::Camera);
    assert_eq!(f.interpolation_type(), None);
    assert_eq!(f.zoom_stops(), &[0.0, 10.0]);
    assert_eq!(at_zoom(&f, -5.0), Some(Value::from("a")));
    assert_eq!(at_zoom(&f, 5.0), Some(Value::from("a")));
    assert_eq!(at_zoom(&f, 10.0), Some(Value::from("b")));
    assert_eq!(at_zoom(&f, 15.0), Some(Value::from("b")));
    assert_eq!(f.interpolation_factor(5.0, 0.0, 10.0), 0.0);
}

#[test]
fn interpolatable_properties_default_to_exponential() {
    let spec = PropertySpec::new("number").interpolatable();
    let f = create_function(&params(json!({"stops": [[0, 0], [10, 100]]})), &spec).unwrap();
    assert_eq!(f.interpolation_type(), Some(InterpolationType::Exponential { base: 1.0 }));
    assert_eq!(at_zoom(&f, 5.0), Some(Value::Number(50.0)));
    assert_eq!(f.interpolation_factor(5.0, 0.0, 10.0), 0.5);
}

#[test]
fn exponential_base_shapes_the_curve() {
    let f = create_function(
        &params(json!({"type": "exponential", "base": 2, "stops": [[0, 0], [2, 30]]})),
        &PropertySpec::new("number"),
    )
    .unwrap();
    // (2^1 - 1) / (2^2 - 1) = 1/3
    let Some(Value::Number(v)) = at_zoom(&f, 1.0) else {
        panic!("expected a number");
    };
    assert!((v - 10.0).abs() < 1e-9);
}

#[test]
fn exponential_colors_blend_in_the_requested_space() {
    let spec = PropertySpec::new("color");
    let f = create_function(
        &params(json!({"type": "exponential", "stops": [[0, "#000000"], [10, "#ffffff"]]})),
        &spec,
    )
    .unwrap();
    assert_eq!(
        at_zoom(&f, 5.0),
        Some(Value::Color(Color::new(0.5, 0.5, 0.5, 1.0)))
    );

    let lab = create_function(
        &params(json!({
            "type": "exponential",
            "colorSpace": "lab",
            "stops": [[0, "#000000"], [10, "#ffffff"]]
        })),
        &spec,
    )
    .unwrap();
    assert_ne!(at_zoom(&lab, 5.0), at_zoom(&f, 5.0));
}

#[test]
fn non_interpolatable_outputs_hold_the_lower_stop() {
    let f = create_function(
        &params(json!({"type": "exponential", "stops": [[0, "a"], [10, "b"]]})),
        &PropertySpec::new("string"),
    )
    .unwrap();
    assert_eq!(at_zoom(&f, 9.0), Some(Value::from("a")));
}

#[test]
fn categorical_matches_without_coercion() {
    let f = create_function(
        &params(json!({
            "type": "categorical",
            "property": "kind",
            "default": 0,
            "stops": [["a", 1], ["b", 2], ["a", 3]]
        })),
        &PropertySpec::new("number"),
    )
    .unwrap();
    assert_eq!(f.kind(), FunctionKind::Source);
    assert!(f.zoom_stops().is_empty());

    let eval = |props: Json| f.evaluate(&GlobalProperties::default(), Some(&feature(props)));
    assert_eq!(eval(json!({"kind": "b"})), Some(Value::Number(2.0)));
    assert_eq!(eval(json!({"kind": "a"})), Some(Value::Number(3.0)));
    assert_eq!(eval(json!({"kind": "c"})), Some(Value::Number(0.0)));
    assert_eq!(eval(json!({"kind": 1})), Some(Value::Number(0.0)));
    assert_eq!(eval(json!({})), Some(Value::Number(0.0)));
}

#[test]
fn categorical_numeric_and_boolean_keys() {
    let f = create_function(
        &params(json!({"type": "categorical", "property": "n", "stops": [[1, "one"], [2, "two"]]})),
        &PropertySpec::new("string").with_default(json!("none")),
    )
    .unwrap();
    let eval = |props: Json| f.evaluate(&GlobalProperties::default(), Some(&feature(props)));
    assert_eq!(eval(json!({"n": 2})), Some(Value::from("two")));
    assert_eq!(eval(json!({"n": 2.0})), Some(Value::from("two")));
    assert_eq!(eval(json!({"n": "2"})), Some(Value::from("none")));

    let f = create_function(
        &params(json!({"type": "categorical", "property": "b", "stops": [[true, 1], [false, 0]]})),
        &PropertySpec::new("number"),
    )
    .unwrap();
    let got = f.evaluate(&GlobalProperties::default(), Some(&feature(json!({"b": false}))));
    assert_eq!(got, Some(Value::Number(0.0)));
}

#[test]
fn missing_input_falls_back_to_defaults() {
    let f = create_function(
        &params(json!({"property": "h", "stops": [[0, 1], [10, 2]]})),
        &PropertySpec::new("number").with_default(json!(7)),
    )
    .unwrap();
    assert_eq!(f.evaluate(&GlobalProperties::default(), None), Some(Value::Number(7.0)));

    let got = f.evaluate(&GlobalProperties::default(), Some(&feature(json!({"h": "tall"}))));
    assert_eq!(got, Some(Value::Number(7.0)));

    let bare = create_function(
        &params(json!({"property": "h", "stops": [[0, 1]]})),
        &PropertySpec::new("number"),
    )
    .unwrap();
    assert_eq!(bare.evaluate(&GlobalProperties::default(), None), None);
}

#[test]
fn identity_converts_to_the_property_type() {
    let color = create_function(
        &params(json!({"type": "identity", "property": "c"})),
        &PropertySpec::new("color").with_default(json!("black")),
    )
    .unwrap();
    let eval = |props: Json| color.evaluate(&GlobalProperties::default(), Some(&feature(props)));
    assert_eq!(
        eval(json!({"c": "red"})),
        Some(Value::Color(Color::new(1.0, 0.0, 0.0, 1.0)))
    );
    assert_eq!(eval(json!({"c": "nope"})), Some(Value::Color(Color::BLACK)));

    let number = create_function(
        &params(json!({"type": "identity", "property": "n", "default": -1})),
        &PropertySpec::new("number"),
    )
    .unwrap();
    let eval = |props: Json| number.evaluate(&GlobalProperties::default(), Some(&feature(props)));
    assert_eq!(eval(json!({"n": 4})), Some(Value::Number(4.0)));
    assert_eq!(eval(json!({"n": "4"})), Some(Value::Number(-1.0)));
}

#[test]
fn identity_enum_checks_membership() {
    let spec = PropertySpec {
        values: Some(json!({"left": {}, "right": {}})),
        ..PropertySpec::new("enum").with_default(json!("left"))
    };
    let f = create_function(&params(json!({"type": "identity", "property": "a"})), &spec).unwrap();
    let eval = |props: Json| f.evaluate(&GlobalProperties::default(), Some(&feature(props)));
    assert_eq!(eval(json!({"a": "right"})), Some(Value::from("right")));
    assert_eq!(eval(json!({"a": "up"})), Some(Value::from("left")));
}

#[test]
fn composite_blends_per_zoom_functions() {
    let f = create_function(
        &params(json!({
            "property": "p",
            "stops": [
                [{"zoom": 0, "value": 0}, 0],
                [{"zoom": 0, "value": 10}, 10],
                [{"zoom": 10, "value": 0}, 100],
                [{"zoom": 10, "value": 10}, 200]
            ]
        })),
        &PropertySpec::new("number").interpolatable(),
    )
    .unwrap();
    assert_eq!(f.kind(), FunctionKind::Composite);
    assert_eq!(f.interpolation_type(), Some(InterpolationType::Linear));
    assert_eq!(f.zoom_stops(), &[0.0, 10.0]);
    assert!(f.is_zoom_dependent() && f.is_feature_dependent());

    let p5 = feature(json!({"p": 5}));
    let eval = |zoom: f64| f.evaluate(&GlobalProperties::at_zoom(zoom), Some(&p5));
    assert_eq!(eval(0.0), Some(Value::Number(5.0)));
    assert_eq!(eval(-3.0), Some(Value::Number(5.0)));
    assert_eq!(eval(10.0), Some(Value::Number(150.0)));
    assert_eq!(eval(20.0), Some(Value::Number(150.0)));
    assert_eq!(eval(5.0), Some(Value::Number(77.5)));
}

#[test]
fn composite_at_one_zoom_matches_the_inner_function() {
    let composite = create_function(
        &params(json!({
            "type": "interval",
            "property": "p",
            "stops": [[{"zoom": 3, "value": 0}, "low"], [{"zoom": 3, "value": 5}, "high"]]
        })),
        &PropertySpec::new("string"),
    )
    .unwrap();
    let inner = create_function(
        &params(json!({"type": "interval", "property": "p", "stops": [[0, "low"], [5, "high"]]})),
        &PropertySpec::new("string"),
    )
    .unwrap();
    for p in [-1, 0, 4, 5, 9] {
        let feat = feature(json!({ "p": p }));
        for zoom in [0.0, 3.0, 8.0] {
            let globals = GlobalProperties::at_zoom(zoom);
            assert_eq!(
                composite.evaluate(&globals, Some(&feat)),
                inner.evaluate(&globals, Some(&feat))
            );
        }
    }
}

#[test]
fn composite_without_zoom_uses_the_default() {
    let f = create_function(
        &params(json!({
            "property": "p",
            "default": 9,
            "stops": [[{"zoom": 0, "value": 0}, 0], [{"zoom": 1, "value": 0}, 1]]
        })),
        &PropertySpec::new("number"),
    )
    .unwrap();
    let got = f.evaluate(&GlobalProperties::default(), Some(&feature(json!({"p": 0}))));
    assert_eq!(got, Some(Value::Number(9.0)));
}

#[test]
fn construction_errors() {
    let number = PropertySpec::new("number");
    let err = |raw: Json, spec: &PropertySpec| create_function(&params(raw), spec).unwrap_err();

    assert_eq!(
        err(json!({"type": "bogus", "stops": [[0, 1]]}), &number),
        FunctionError::UnknownType("bogus".to_owned())
    );
    assert_eq!(
        err(json!({"colorSpace": "hsl", "stops": [[0, 1]]}), &number),
        FunctionError::UnknownColorSpace("hsl".to_owned())
    );
    assert_eq!(err(json!({"stops": []}), &number), FunctionError::EmptyStops);
    assert_eq!(
        err(json!({"stops": [[0, 1], ["x", 2]]}), &number),
        FunctionError::NonNumericStop { index: 1 }
    );
    assert_eq!(
        err(json!({"stops": [[5, 1], [0, 2]]}), &number),
        FunctionError::UnsortedStops { index: 1 }
    );
    assert!(matches!(
        err(json!({"stops": [[0, "nope"]]}), &PropertySpec::new("color")),
        FunctionError::InvalidStopOutput { index: 0, .. }
    ));
    assert!(matches!(
        err(json!({"default": "nope", "stops": [[0, "red"]]}), &PropertySpec::new("color")),
        FunctionError::InvalidDefault { .. }
    ));
    assert_eq!(
        err(json!({"property": "p", "stops": [[{"zoom": 0}, 1]]}), &number),
        FunctionError::MalformedCompositeKey { index: 0 }
    );
    assert_eq!(
        err(
            json!({"property": "p", "stops": [[{"zoom": 5, "value": 0}, 1], [{"zoom": 1, "value": 0}, 2]]}),
            &number
        ),
        FunctionError::UnsortedStops { index: 1 }
    );
}

#[test]
fn function_type_names() {
    for ty in [
        FunctionType::Exponential,
        FunctionType::Interval,
        FunctionType::Categorical,
        FunctionType::Identity,
    ] {
        assert_eq!(FunctionType::parse(ty.as_str()), Ok(ty));
    }
}

#[test]
fn features_evaluate_in_parallel() {
    let f = create_function(
        &params(json!({"property": "h", "stops": [[0, 0], [10, 10]]})),
        &PropertySpec::new("number"),
    )
    .unwrap();
    let features: Vec<Feature> = (0..64).map(|i| feature(json!({ "h": i }))).collect();
    let got = f.evaluate_features(&GlobalProperties::default(), &features);
    assert_eq!(got.len(), 64);
    assert_eq!(got[3], Some(Value::Number(0.0)));
    assert_eq!(got[12], Some(Value::Number(10.0)));
}

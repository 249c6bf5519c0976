use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        StyleError::runtime("x")
            .to_string()
            .contains("runtime error:")
    );
    assert!(
        StyleError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert!(
        StyleError::from(FunctionError::EmptyStops)
            .to_string()
            .contains("function error:")
    );
}

#[test]
fn parse_errors_render_with_key_trail() {
    let err = StyleError::from(vec![
        ParsingError::new(vec![1, 2], "first"),
        ParsingError::new(vec![], "second"),
    ]);
    let s = err.to_string();
    assert!(s.starts_with("parse error:"));
    assert!(s.contains("[1][2]: first"));
    assert!(s.contains("second"));
}

#[test]
fn serde_json_errors_convert() {
    let e = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    assert!(matches!(StyleError::from(e), StyleError::Serde(_)));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = StyleError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

use super::*;

fn assert_color_close(actual: Color, expected: Color) {
    let eps = 1e-3;
    assert!(
        (actual.r - expected.r).abs() < eps
            && (actual.g - expected.g).abs() < eps
            && (actual.b - expected.b).abs() < eps
            && (actual.a - expected.a).abs() < eps,
        "{actual:?} != {expected:?}"
    );
}

#[test]
fn names_round_trip() {
    for space in [ColorSpace::Rgb, ColorSpace::Hcl, ColorSpace::Lab] {
        assert_eq!(ColorSpace::parse(space.as_str()), Some(space));
    }
    assert_eq!(ColorSpace::parse("hsl"), None);
    assert_eq!(ColorSpace::default(), ColorSpace::Rgb);
}

#[test]
fn serde_uses_lower_case() {
    let space: ColorSpace = serde_json::from_str(r#""lab""#).unwrap();
    assert_eq!(space, ColorSpace::Lab);
    assert_eq!(serde_json::to_string(&ColorSpace::Hcl).unwrap(), r#""hcl""#);
}

#[test]
fn rgb_blends_premultiplied_components() {
    let red = Color::new(1.0, 0.0, 0.0, 1.0);
    let clear = Color::TRANSPARENT;
    let mid = ColorSpace::Rgb.interpolate(&red, &clear, 0.5);
    assert_color_close(mid, Color::new(0.5, 0.0, 0.0, 0.5));
}

#[test]
fn every_space_hits_its_endpoints() {
    let a = Color::from_straight(0.2, 0.4, 0.8, 1.0);
    let b = Color::from_straight(0.9, 0.5, 0.1, 1.0);
    for space in [ColorSpace::Rgb, ColorSpace::Hcl, ColorSpace::Lab] {
        assert_color_close(space.interpolate(&a, &b, 0.0), a);
        assert_color_close(space.interpolate(&a, &b, 1.0), b);
    }
}

#[test]
fn lab_midpoint_of_black_and_white_is_neutral() {
    let mid = ColorSpace::Lab.interpolate(&Color::BLACK, &Color::WHITE, 0.5);
    assert!((mid.r - mid.g).abs() < 1e-6 && (mid.g - mid.b).abs() < 1e-6);
    assert!(mid.r > 0.0 && mid.r < 1.0);
}

#[test]
fn hue_takes_the_shorter_arc() {
    assert!((interpolate_hue(350.0, 10.0, 0.5) - 360.0).abs() < 1e-9);
    assert!((interpolate_hue(10.0, 350.0, 0.5) - 0.0).abs() < 1e-9);
    assert!((interpolate_hue(0.0, 90.0, 0.5) - 45.0).abs() < 1e-9);
}

#[test]
fn achromatic_end_borrows_the_other_hue() {
    assert_eq!(interpolate_hue(f64::NAN, 120.0, 0.3), 120.0);
    assert_eq!(interpolate_hue(40.0, f64::NAN, 0.3), 40.0);
    assert!(interpolate_hue(f64::NAN, f64::NAN, 0.3).is_nan());
}

use super::*;
use serde_json::json;

#[test]
fn parses_hex_rgb_and_rgba() {
    let c: Rgba8 = serde_json::from_value(json!("#FFF0F5")).unwrap();
    assert_eq!(c, Rgba8::rgb(0xFF, 0xF0, 0xF5));

    let c: Rgba8 = serde_json::from_value(json!("#0000ff80")).unwrap();
    assert_eq!(c, Rgba8::rgba(0, 0, 255, 128));
}

#[test]
fn parses_css_rgba_function() {
    let c = parse_color("rgba(232,83,109,0.28)").unwrap();
    assert_eq!(c, Rgba8::rgba(232, 83, 109, 71));

    let c = parse_color("rgb(1, 2, 3)").unwrap();
    assert_eq!(c, Rgba8::rgb(1, 2, 3));

    assert!(parse_color("rgba(1,2)").is_err());
    assert!(parse_color("rgba(1,2,3,nan)").is_err());
    assert!(parse_color("#12345").is_err());
}

#[test]
fn parses_object_and_array() {
    let c: Rgba8 =
        serde_json::from_value(json!({"r": 255, "g": 255, "b": 255, "a": 0.85})).unwrap();
    assert_eq!(c, Rgba8::rgba(255, 255, 255, 217));

    let c: Rgba8 = serde_json::from_value(json!([10, 20, 30])).unwrap();
    assert_eq!(c, Rgba8::rgb(10, 20, 30));
}

#[test]
fn serializes_to_hex() {
    assert_eq!(
        serde_json::to_value(Rgba8::rgb(0xE8, 0x53, 0x6D)).unwrap(),
        json!("#E8536D")
    );
    assert_eq!(
        serde_json::to_value(Rgba8::rgba(0, 0, 0, 20)).unwrap(),
        json!("#00000014")
    );
}

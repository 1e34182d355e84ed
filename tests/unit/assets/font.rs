use super::*;

#[test]
fn none_source_resolves_to_no_faces() {
    let fonts = FontSource::None.resolve(700, 500).unwrap();
    assert!(fonts.is_empty());
}

#[test]
fn missing_font_file_is_a_font_error() {
    let err = FontSource::File("target/no-such-font.ttf".into())
        .resolve(700, 500)
        .unwrap_err();
    assert!(err.to_string().contains("font error:"));
}

#[test]
fn empty_font_bytes_are_rejected() {
    let err = FontSource::Bytes(Arc::new(Vec::new()))
        .resolve(700, 500)
        .unwrap_err();
    assert!(matches!(err, CardError::Font(_)));
}

#[test]
fn explicit_bytes_share_one_face_for_both_lines() {
    let fonts = FontSource::Bytes(Arc::new(vec![0u8; 16]))
        .resolve(700, 500)
        .unwrap();
    let heading = fonts.heading.as_ref().unwrap();
    let sub = fonts.subheading.as_ref().unwrap();
    assert!(Arc::ptr_eq(&heading.bytes, &sub.bytes));
}

#[test]
fn layout_rejects_non_positive_size() {
    let font = ResolvedFont::new(vec![0u8; 16], 0);
    let mut engine = TextLayoutEngine::new();
    assert!(
        engine
            .layout_line("hi", &font, 0.0, 400, Rgba8::rgb(0, 0, 0))
            .is_err()
    );
    assert!(
        engine
            .layout_line("hi", &font, f32::NAN, 400, Rgba8::rgb(0, 0, 0))
            .is_err()
    );
}

const FIXTURE_FONT: &str = "tests/data/fonts/Tuffy.ttf";

#[test]
fn installed_font_outside_preferred_families_is_still_used() {
    // Tuffy matches neither the preferred script face nor fontdb's generic family names.
    let mut db = fontdb::Database::new();
    db.load_font_data(std::fs::read(FIXTURE_FONT).unwrap());

    let fonts = system_fonts(&db, 700, 500);
    assert!(!fonts.is_empty());
    let heading = fonts.heading.unwrap();
    assert_eq!(heading.data.index, 0);
    assert!(fonts.subheading.is_some());
}

#[test]
fn empty_font_database_yields_no_faces() {
    let fonts = system_fonts(&fontdb::Database::new(), 700, 500);
    assert!(fonts.is_empty());
}

#[test]
fn fixture_font_lays_out_a_line() {
    let fonts = FontSource::File(FIXTURE_FONT.into()).resolve(700, 500).unwrap();
    let font = fonts.heading.unwrap();

    let mut engine = TextLayoutEngine::new();
    let layout = engine
        .layout_line("Thank You", &font, 48.0, 700, Rgba8::rgb(0x8B, 0x5A, 0x6A))
        .unwrap();
    assert!(layout.width() > 48.0);
    assert!(layout.height() > 40.0);
}

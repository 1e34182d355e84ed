use super::*;

fn frame_2x1() -> CardFrame {
    // Opaque red, then half-transparent white (premultiplied).
    CardFrame {
        width: 2,
        height: 1,
        data: vec![255, 0, 0, 255, 128, 128, 128, 128],
    }
}

#[test]
fn png_has_straight_alpha() {
    let artifact = frame_2x1().encode_png().unwrap();
    assert_eq!((artifact.width(), artifact.height()), (2, 1));
    assert_eq!(&artifact.bytes()[..8], b"\x89PNG\r\n\x1a\n");

    let img = image::load_from_memory(artifact.bytes()).unwrap().to_rgba8();
    assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 255]);
    assert_eq!(img.get_pixel(1, 0).0, [255, 255, 255, 128]);
}

#[test]
fn encoding_is_deterministic() {
    let a = frame_2x1().encode_png().unwrap();
    let b = frame_2x1().encode_png().unwrap();
    assert_eq!(a, b);
}

#[test]
fn short_buffer_is_an_encode_error() {
    let err = encode_png_rgba8_premul(&[0u8; 4], 2, 1).unwrap_err();
    assert!(matches!(err, CardError::Encode(_)));
}

#[test]
fn frame_pixel_unpremultiplies_and_bounds_checks() {
    let f = frame_2x1();
    assert_eq!(f.pixel(1, 0), Some([255, 255, 255, 128]));
    assert_eq!(f.pixel(2, 0), None);
}

#[test]
fn save_creates_parent_dirs_and_default_name() {
    let dir = PathBuf::from("target").join("png_unit_save");
    let _ = std::fs::remove_dir_all(&dir);
    let artifact = frame_2x1().encode_png().unwrap();
    let path = artifact.save_in_dir(&dir).unwrap();
    assert!(path.ends_with(DEFAULT_FILE_NAME));
    assert_eq!(std::fs::read(&path).unwrap(), artifact.bytes());
}

use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CardError::decode(2, "x")
            .to_string()
            .contains("decode error: photo 2:")
    );
    assert!(
        CardError::surface("x")
            .to_string()
            .contains("surface error:")
    );
    assert!(CardError::encode("x").to_string().contains("encode error:"));
    assert!(CardError::font("x").to_string().contains("font error:"));
    assert!(
        CardError::validation("x")
            .to_string()
            .contains("validation error:")
    );
}

#[test]
fn failed_slot_only_for_decode() {
    assert_eq!(CardError::decode(3, "bad").failed_slot(), Some(3));
    assert_eq!(CardError::encode("bad").failed_slot(), None);
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CardError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

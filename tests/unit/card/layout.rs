use super::*;

#[test]
fn default_geometry_matches_card_constants() {
    let l = CardLayout::default();
    assert_eq!((l.width, l.height), (960, 1100));
    assert_eq!(l.cell_size(), 420);
    assert_eq!(l.photo_bottom(), 912.0);
}

#[test]
fn cells_are_row_major() {
    let l = CardLayout::default();
    assert_eq!(l.cell_origin(0), (48, 48));
    assert_eq!(l.cell_origin(1), (492, 48));
    assert_eq!(l.cell_origin(2), (48, 492));
    assert_eq!(l.cell_origin(3), (492, 492));
    assert_eq!(l.cell_rect(3), Rect::new(492.0, 492.0, 912.0, 912.0));
}

#[test]
fn grid_is_horizontally_symmetric() {
    let l = CardLayout::default();
    let right = l.cell_rect(1).x1;
    assert_eq!(f64::from(l.width) - right, f64::from(l.padding));
}

#[test]
fn validate_rejects_unallocatable_surfaces() {
    let zero = CardLayout {
        width: 0,
        ..CardLayout::default()
    };
    assert!(matches!(zero.validate(), Err(CardError::Surface(_))));

    let huge = CardLayout {
        height: 70_000,
        ..CardLayout::default()
    };
    assert!(matches!(huge.validate(), Err(CardError::Surface(_))));
    assert!(huge.size_u16().is_err());
}

#[test]
fn validate_rejects_degenerate_grids() {
    let cramped = CardLayout {
        padding: 480,
        ..CardLayout::default()
    };
    assert!(matches!(cramped.validate(), Err(CardError::Validation(_))));

    let short = CardLayout {
        height: 500,
        ..CardLayout::default()
    };
    assert!(short.validate().is_err());

    let bad_radius = CardLayout {
        photo_radius: f64::NAN,
        ..CardLayout::default()
    };
    assert!(bad_radius.validate().is_err());
}

#[test]
fn oversized_margins_are_a_validation_error() {
    for layout in [
        CardLayout {
            padding: u32::MAX,
            ..CardLayout::default()
        },
        CardLayout {
            gap: u32::MAX,
            ..CardLayout::default()
        },
        CardLayout {
            padding: u32::MAX / 2,
            gap: u32::MAX,
            ..CardLayout::default()
        },
    ] {
        assert_eq!(layout.cell_size(), 0);
        assert!(layout.photo_bottom() > f64::from(layout.height));
        assert!(matches!(layout.validate(), Err(CardError::Validation(_))));
    }
}

#[test]
fn oversized_margins_parse_then_fail_validation() {
    let l: CardLayout = serde_json::from_str(r#"{"padding": 4294967295}"#).unwrap();
    assert!(matches!(l.validate(), Err(CardError::Validation(_))));
}

#[test]
fn partial_json_fills_defaults() {
    let l: CardLayout = serde_json::from_str(r#"{"gap": 10}"#).unwrap();
    assert_eq!(l.gap, 10);
    assert_eq!(l.width, 960);
    assert_eq!(l.cell_size(), (960 - 96 - 10) / 2);
}

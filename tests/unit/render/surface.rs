use super::*;
use crate::foundation::core::Rect;
use kurbo::Shape as _;

fn px(pixmap: &vello_cpu::Pixmap, x: usize, y: usize) -> [u8; 4] {
    let w = pixmap.width() as usize;
    let i = (y * w + x) * 4;
    let d = pixmap.data_as_u8_slice();
    [d[i], d[i + 1], d[i + 2], d[i + 3]]
}

#[test]
fn clip_scope_limits_drawing_and_is_released() {
    let mut surface = Surface::with_size(16, 16);
    {
        let mut scope = surface.clip(&Rect::new(0.0, 0.0, 8.0, 16.0).to_path(0.1));
        scope.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 0, 0, 255));
        scope.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, 16.0, 8.0));
    }
    // Outside any scope: unclipped.
    surface
        .ctx()
        .set_paint(vello_cpu::peniko::Color::from_rgba8(0, 0, 255, 255));
    surface
        .ctx()
        .fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 8.0, 16.0, 16.0));
    let pm = surface.finish();

    assert_eq!(px(&pm, 2, 2), [255, 0, 0, 255]);
    assert_eq!(px(&pm, 12, 2)[3], 0);
    assert_eq!(px(&pm, 12, 12), [0, 0, 255, 255]);
}

#[test]
fn opacity_scope_scales_alpha() {
    let mut surface = Surface::with_size(4, 4);
    {
        let mut scope = surface.opacity(0.5);
        scope.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
        scope.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, 4.0, 4.0));
    }
    let pm = surface.finish();
    let a = px(&pm, 1, 1)[3];
    assert!((i32::from(a) - 128).abs() <= 2);
}

#[test]
fn surface_new_rejects_invalid_layout() {
    let layout = CardLayout {
        width: 0,
        ..CardLayout::default()
    };
    assert!(matches!(Surface::new(&layout), Err(CardError::Surface(_))));
}

#[test]
fn pixmap_from_bytes_checks_len() {
    assert!(pixmap_from_premul_bytes(&[0u8; 15], 2, 2).is_err());
    let pm = pixmap_from_premul_bytes(&[1u8; 16], 2, 2).unwrap();
    assert_eq!((pm.width(), pm.height()), (2, 2));
    assert!(image_paint(&[0u8; 16], 2, 2).is_ok());
}

#[test]
fn bezpath_conversion_keeps_elements() {
    let path = kurbo::RoundedRect::new(0.0, 0.0, 10.0, 10.0, 2.0).to_path(0.1);
    let cpu = bezpath_to_cpu(&path);
    assert_eq!(cpu.elements().len(), path.elements().len());
}

use std::io::Cursor;

use super::*;

fn png_bytes(img: &RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    DynamicImage::ImageRgba8(img.clone())
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_png_dimensions() {
    let img = RgbaImage::from_pixel(7, 3, image::Rgba([100, 50, 200, 128]));
    let decoded = decode_image(&png_bytes(&img)).unwrap();
    assert_eq!((decoded.width, decoded.height), (7, 3));
    assert_eq!(decoded.rgba.get_pixel(0, 0).0, [100, 50, 200, 128]);
}

#[test]
fn decode_rejects_garbage() {
    assert!(decode_image(b"definitely not an image").is_err());
    assert!(decode_image(&[]).is_err());
}

#[test]
fn crop_window_landscape_crops_width() {
    let w = cover_crop_window(800, 600);
    assert_eq!(
        w,
        CropWindow {
            x: 100.0,
            y: 0.0,
            side: 600.0
        }
    );
}

#[test]
fn crop_window_portrait_crops_height() {
    let w = cover_crop_window(300, 600);
    assert_eq!(
        w,
        CropWindow {
            x: 0.0,
            y: 150.0,
            side: 300.0
        }
    );
}

#[test]
fn crop_window_square_is_whole_image() {
    let w = cover_crop_window(500, 500);
    assert_eq!(
        w,
        CropWindow {
            x: 0.0,
            y: 0.0,
            side: 500.0
        }
    );
}

#[test]
fn crop_window_scale_is_uniform_for_any_ratio() {
    for (w, h) in [(1, 1000), (1000, 1), (333, 777), (4032, 3024), (420, 420)] {
        let window = cover_crop_window(w, h);
        let (sx, sy) = window.scale_to(420.0);
        assert_eq!(sx, sy);
        assert!(window.x + window.side <= f64::from(w));
        assert!(window.y + window.side <= f64::from(h));
    }
}

#[test]
fn fit_cover_keeps_center_of_portrait() {
    // 30x60: top quarter blue, middle half red, bottom quarter green.
    let img = RgbaImage::from_fn(30, 60, |_, y| {
        if y < 15 {
            image::Rgba([0, 0, 255, 255])
        } else if y < 45 {
            image::Rgba([255, 0, 0, 255])
        } else {
            image::Rgba([0, 255, 0, 255])
        }
    });
    let decoded = DecodedImage {
        width: 30,
        height: 60,
        rgba: img,
    };
    let fitted = fit_cover(&decoded, 30);
    assert_eq!(fitted.dimensions(), (30, 30));
    assert!(fitted.pixels().all(|p| p.0 == [255, 0, 0, 255]));
}

#[test]
fn fit_cover_resamples_to_cell() {
    let decoded = DecodedImage {
        width: 50,
        height: 80,
        rgba: RgbaImage::from_pixel(50, 80, image::Rgba([9, 9, 9, 255])),
    };
    let fitted = fit_cover(&decoded, 20);
    assert_eq!(fitted.dimensions(), (20, 20));
    let px = fitted.get_pixel(10, 10).0;
    assert!(px[..3].iter().all(|&c| (i32::from(c) - 9).abs() <= 1));
    assert_eq!(px[3], 255);
}

use std::io::Cursor;

use anyhow::Context;
use image::{DynamicImage, ImageDecoder as _, ImageReader, RgbaImage, imageops::FilterType};

use crate::foundation::error::{CardError, CardResult};

/// Photo decoded into straight-alpha RGBA8 pixels.
///
/// Owned by a single compositing run and dropped once the card is encoded.
#[derive(Clone, Debug)]
pub struct DecodedImage {
    /// Natural width in pixels (after EXIF orientation).
    pub width: u32,
    /// Natural height in pixels (after EXIF orientation).
    pub height: u32,
    /// Pixel data.
    pub rgba: RgbaImage,
}

/// Centered square region of a source image, in source pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CropWindow {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Side length (the window is always square).
    pub side: f64,
}

impl CropWindow {
    /// Scale factors that map the window onto a `cell`×`cell` frame.
    pub fn scale_to(self, cell: f64) -> (f64, f64) {
        (cell / self.side, cell / self.side)
    }
}

/// Decode encoded bytes, honouring EXIF orientation where the format carries it.
pub fn decode_image(bytes: &[u8]) -> CardResult<DecodedImage> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .context("guess image format")?;
    let mut decoder = reader.into_decoder().context("open image decoder")?;
    let orientation = decoder.orientation().context("read image orientation")?;
    let mut dyn_img = DynamicImage::from_decoder(decoder).context("decode image from memory")?;
    dyn_img.apply_orientation(orientation);

    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(CardError::validation("decoded image has zero area"));
    }
    Ok(DecodedImage {
        width,
        height,
        rgba,
    })
}

/// Cover-fit window: crop the longer axis, center on it, keep the shorter axis whole.
pub fn cover_crop_window(width: u32, height: u32) -> CropWindow {
    let (w, h) = (f64::from(width), f64::from(height));
    if w > h {
        CropWindow {
            x: (w - h) / 2.0,
            y: 0.0,
            side: h,
        }
    } else {
        CropWindow {
            x: 0.0,
            y: (h - w) / 2.0,
            side: w,
        }
    }
}

/// Crop `img` to its centered square and resample it to exactly `cell`×`cell`.
pub fn fit_cover(img: &DecodedImage, cell: u32) -> RgbaImage {
    let window = cover_crop_window(img.width, img.height);
    let side = window.side as u32;
    let cropped = image::imageops::crop_imm(
        &img.rgba,
        window.x.floor() as u32,
        window.y.floor() as u32,
        side,
        side,
    )
    .to_image();
    if side == cell {
        return cropped;
    }
    image::imageops::resize(&cropped, cell, cell, FilterType::CatmullRom)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;

use std::path::{Path, PathBuf};

use image::ImageEncoder as _;

use crate::foundation::core::unpremultiply_rgba8_in_place;
use crate::foundation::error::{CardError, CardResult};

/// File name the card is offered under when no other name is chosen.
pub const DEFAULT_FILE_NAME: &str = "valentine-card.png";

/// A rendered card as RGBA8 pixels.
///
/// Pixels are **premultiplied alpha**, as produced by the rasterizer; the PNG encoder converts
/// them to straight alpha.
#[derive(Clone, Debug)]
pub struct CardFrame {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major, premultiplied.
    pub data: Vec<u8>,
}

impl CardFrame {
    /// Straight-alpha RGBA pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + x as usize) * 4;
        let mut px = [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ];
        unpremultiply_rgba8_in_place(&mut px);
        Some(px)
    }

    /// Encode as PNG.
    pub fn encode_png(&self) -> CardResult<CardArtifact> {
        let png = encode_png_rgba8_premul(&self.data, self.width, self.height)?;
        Ok(CardArtifact {
            width: self.width,
            height: self.height,
            png,
        })
    }
}

/// The finished keepsake card: PNG bytes and nothing else.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardArtifact {
    width: u32,
    height: u32,
    png: Vec<u8>,
}

impl CardArtifact {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Encoded PNG bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.png
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.png
    }

    /// Write the PNG to `path`, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> CardResult<PathBuf> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                CardError::Other(
                    anyhow::Error::new(e)
                        .context(format!("create output dir '{}'", parent.display())),
                )
            })?;
        }
        std::fs::write(path, &self.png).map_err(|e| {
            CardError::Other(
                anyhow::Error::new(e).context(format!("write png '{}'", path.display())),
            )
        })?;
        Ok(path.to_path_buf())
    }

    /// Write the PNG into `dir` as [`DEFAULT_FILE_NAME`].
    pub fn save_in_dir(&self, dir: impl AsRef<Path>) -> CardResult<PathBuf> {
        self.save(dir.as_ref().join(DEFAULT_FILE_NAME))
    }
}

pub(crate) fn encode_png_rgba8_premul(
    data: &[u8],
    width: u32,
    height: u32,
) -> CardResult<Vec<u8>> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| CardError::encode("frame size overflow"))?;
    if data.len() != expected {
        return Err(CardError::encode(format!(
            "frame has {} bytes, expected {expected} for {width}x{height}",
            data.len()
        )));
    }
    let mut straight = data.to_vec();
    unpremultiply_rgba8_in_place(&mut straight);

    let mut png = Vec::new();
    image::codecs::png::PngEncoder::new(&mut png)
        .write_image(&straight, width, height, image::ExtendedColorType::Rgba8)
        .map_err(|e| CardError::encode(e.to_string()))?;
    Ok(png)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;

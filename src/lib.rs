//! Keepsake composes four photos into a single Valentine's card PNG.
//!
//! The card is a fixed-size 2×2 photo grid on a soft pink gradient, with a tinted overlay, two
//! centered text lines and small corner hearts. The public API is small:
//!
//! - Describe each photo as an [`ImageSource`] (or collect them in [`PhotoSlots`])
//! - Build a [`Compositor`] from [`CompositorOpts`], or call [`composite`] directly
//! - Keep the resulting [`CardArtifact`] bytes, or [`CardArtifact::save`] them
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod assets;
pub(crate) mod card;
pub(crate) mod encode;
pub(crate) mod render;

pub use crate::foundation::core::{
    Affine, BezPath, Point, Rect, Rgba8, Rgba8Premul, Vec2, premultiply_rgba8_in_place,
    unpremultiply_rgba8_in_place,
};
pub use crate::foundation::error::{CardError, CardResult};

pub use crate::assets::color::parse_color;
pub use crate::assets::decode::{
    CropWindow, DecodedImage, cover_crop_window, decode_image, fit_cover,
};
pub use crate::assets::font::{CardFonts, FontSource, PREFERRED_FAMILY, ResolvedFont};
pub use crate::assets::source::ImageSource;
pub use crate::card::layout::{CardLayout, PHOTO_COUNT};
pub use crate::card::slots::PhotoSlots;
pub use crate::card::style::{CardStyle, GradientStop, TextLine, TextShadow};
pub use crate::encode::png::{CardArtifact, CardFrame, DEFAULT_FILE_NAME};
pub use crate::render::compositor::{Compositor, CompositorOpts, composite};

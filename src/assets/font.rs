use std::path::PathBuf;
use std::sync::Arc;

use usvg::fontdb;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{CardError, CardResult};

/// Script face the card was designed around; tried first when resolving system fonts.
pub const PREFERRED_FAMILY: &str = "Great Vibes";

/// Where the card's text face comes from.
#[derive(Clone, Debug, Default)]
pub enum FontSource {
    /// Skip text rendering entirely.
    None,
    /// Look up an installed face: [`PREFERRED_FAMILY`], then cursive, serif, sans-serif, then
    /// the installed upright face closest in weight.
    #[default]
    System,
    /// Font file on disk (TTF/OTF).
    File(PathBuf),
    /// Font bytes already in memory.
    Bytes(Arc<Vec<u8>>),
}

/// Font bytes ready for shaping and glyph rasterization.
#[derive(Clone)]
pub struct ResolvedFont {
    pub(crate) bytes: Arc<Vec<u8>>,
    pub(crate) data: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for ResolvedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedFont")
            .field("len", &self.bytes.len())
            .field("index", &self.data.index)
            .finish()
    }
}

impl ResolvedFont {
    fn new(bytes: Vec<u8>, index: u32) -> Self {
        let data =
            vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes.clone()), index);
        Self {
            bytes: Arc::new(bytes),
            data,
        }
    }
}

/// Faces for the two text lines. `None` entries render no text.
#[derive(Clone, Debug, Default)]
pub struct CardFonts {
    pub(crate) heading: Option<ResolvedFont>,
    pub(crate) subheading: Option<ResolvedFont>,
}

impl CardFonts {
    /// No text faces.
    pub fn none() -> Self {
        Self::default()
    }

    /// Return `true` when neither line has a face.
    pub fn is_empty(&self) -> bool {
        self.heading.is_none() && self.subheading.is_none()
    }
}

impl FontSource {
    /// Resolve to font bytes. `heading_weight`/`subheading_weight` steer system face selection.
    pub fn resolve(&self, heading_weight: u16, subheading_weight: u16) -> CardResult<CardFonts> {
        match self {
            Self::None => Ok(CardFonts::none()),
            Self::File(path) => {
                let bytes = std::fs::read(path).map_err(|e| {
                    CardError::font(format!("failed to read font '{}': {e}", path.display()))
                })?;
                Ok(Self::shared(bytes))
            }
            Self::Bytes(bytes) => {
                if bytes.is_empty() {
                    return Err(CardError::font("font bytes are empty"));
                }
                Ok(Self::shared(bytes.as_ref().clone()))
            }
            Self::System => {
                let mut db = fontdb::Database::new();
                db.load_system_fonts();
                Ok(system_fonts(&db, heading_weight, subheading_weight))
            }
        }
    }

    fn shared(bytes: Vec<u8>) -> CardFonts {
        let font = ResolvedFont::new(bytes, 0);
        CardFonts {
            heading: Some(font.clone()),
            subheading: Some(font),
        }
    }
}

/// Pick faces for both lines from `db`, warning when nothing is installed at all.
pub(crate) fn system_fonts(
    db: &fontdb::Database,
    heading_weight: u16,
    subheading_weight: u16,
) -> CardFonts {
    let heading = query_system(db, heading_weight);
    let subheading = query_system(db, subheading_weight);
    if heading.is_none() && subheading.is_none() {
        tracing::warn!(
            faces = db.len(),
            "no usable system font found; card text will be skipped"
        );
    }
    CardFonts {
        heading,
        subheading,
    }
}

fn query_system(db: &fontdb::Database, weight: u16) -> Option<ResolvedFont> {
    let families = [
        fontdb::Family::Name(PREFERRED_FAMILY),
        fontdb::Family::Cursive,
        fontdb::Family::Serif,
        fontdb::Family::SansSerif,
    ];
    let query = fontdb::Query {
        families: &families,
        weight: fontdb::Weight(weight),
        ..fontdb::Query::default()
    };
    // fontdb's generic families name Windows/macOS faces; fall back to whatever is installed.
    let id = db.query(&query).or_else(|| closest_installed(db, weight))?;
    let (bytes, index) = db.with_face_data(id, |data, index| (data.to_vec(), index))?;
    tracing::debug!(?id, index, weight, "resolved system font");
    Some(ResolvedFont::new(bytes, index))
}

/// Upright face nearest to `weight`, ties broken by family name so the pick is stable.
fn closest_installed(db: &fontdb::Database, weight: u16) -> Option<fontdb::ID> {
    let key = |f: &fontdb::FaceInfo| {
        let upright = f.style == fontdb::Style::Normal;
        let distance = (i32::from(f.weight.0) - i32::from(weight)).abs();
        let family = f.families.first().map(|(name, _)| name.clone());
        (!upright, distance, family, f.index)
    };
    db.faces().min_by_key(|f| key(f)).map(|f| f.id)
}

/// Reusable Parley contexts for shaping single-line card text.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgba8>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Shape one unwrapped line of text.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        font: &ResolvedFont,
        size_px: f32,
        weight: u16,
        brush: Rgba8,
    ) -> CardResult<parley::Layout<Rgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(CardError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let families = self.font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(font.bytes.as_ref().clone()),
            None,
        );
        // Collections register one family per face; shape with the face we rasterize.
        let family_id = families
            .iter()
            .find(|(_, faces)| faces.iter().any(|f| f.index() == font.data.index))
            .or_else(|| families.first())
            .map(|(id, _)| *id)
            .ok_or_else(|| CardError::font("no font families registered from font bytes"))?;

        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| CardError::font("registered font family has no name"))?
            .to_string();

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::new(f32::from(weight)),
        ));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<Rgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/font.rs"]
mod tests;

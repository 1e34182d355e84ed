use std::path::PathBuf;
use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose};

use crate::foundation::error::{CardError, CardResult};

/// Reference to encoded photo bytes.
///
/// Sources are resolved lazily, inside the compositor, so that a failing source is reported as a
/// decode failure for its grid slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageSource {
    /// Encoded image bytes already in memory.
    Bytes(Arc<[u8]>),
    /// Encoded image file on disk.
    Path(PathBuf),
    /// `data:image/<format>;base64,<payload>` URL, as produced by browser file readers.
    DataUrl(String),
}

impl ImageSource {
    /// Wrap in-memory bytes.
    pub fn from_bytes(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self::Bytes(bytes.into())
    }

    /// Reference a file path.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    /// Wrap a `data:` URL.
    pub fn from_data_url(url: impl Into<String>) -> Self {
        Self::DataUrl(url.into())
    }

    /// Resolve the source to encoded bytes.
    pub fn load(&self) -> CardResult<Arc<[u8]>> {
        match self {
            Self::Bytes(b) => Ok(Arc::clone(b)),
            Self::Path(p) => std::fs::read(p).map(Arc::from).map_err(|e| {
                CardError::validation(format!("failed to read photo '{}': {e}", p.display()))
            }),
            Self::DataUrl(url) => parse_data_url(url).map(Arc::from),
        }
    }

    /// Short label used in logs.
    pub fn describe(&self) -> String {
        match self {
            Self::Bytes(b) => format!("{} bytes", b.len()),
            Self::Path(p) => p.display().to_string(),
            Self::DataUrl(url) => {
                let head = url.split(',').next().unwrap_or_default();
                format!("{head},…")
            }
        }
    }
}

impl From<Vec<u8>> for ImageSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes.into())
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

fn parse_data_url(data: &str) -> CardResult<Vec<u8>> {
    let data = data.trim();
    if !data.starts_with("data:image/") {
        return Err(CardError::validation(
            "data url must start with \"data:image/\"",
        ));
    }
    let base64_start = data
        .find(";base64,")
        .ok_or_else(|| CardError::validation("data url is missing the \";base64,\" marker"))?;

    general_purpose::STANDARD
        .decode(&data[base64_start + ";base64,".len()..])
        .map_err(|e| CardError::validation(format!("invalid base64 payload: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;

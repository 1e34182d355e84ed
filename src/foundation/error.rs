/// Convenience result type used across keepsake.
pub type CardResult<T> = Result<T, CardError>;

/// Top-level error taxonomy for card composition.
///
/// Every failure is surfaced to the caller of [`crate::composite`]; the compositor never retries
/// and never returns a partially drawn card.
#[derive(thiserror::Error, Debug)]
pub enum CardError {
    /// One of the four photo sources could not be loaded or decoded into pixels.
    #[error("decode error: photo {slot}: {reason}")]
    Decode {
        /// Grid slot (0..=3) of the failing source.
        slot: usize,
        /// Human-readable cause.
        reason: String,
    },

    /// The raster surface could not be created at the requested size.
    #[error("surface error: {0}")]
    Surface(String),

    /// The finished surface could not be serialized to PNG.
    #[error("encode error: {0}")]
    Encode(String),

    /// A configured font could not be loaded or shaped.
    #[error("font error: {0}")]
    Font(String),

    /// Invalid caller-provided data (style, slots, layout).
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CardError {
    /// Build a [`CardError::Decode`] value.
    pub fn decode(slot: usize, reason: impl Into<String>) -> Self {
        Self::Decode {
            slot,
            reason: reason.into(),
        }
    }

    /// Build a [`CardError::Surface`] value.
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    /// Build a [`CardError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`CardError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`CardError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Slot index for decode failures.
    pub fn failed_slot(&self) -> Option<usize> {
        match self {
            Self::Decode { slot, .. } => Some(*slot),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

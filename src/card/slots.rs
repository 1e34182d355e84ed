use crate::assets::source::ImageSource;
use crate::card::layout::PHOTO_COUNT;
use crate::foundation::error::{CardError, CardResult};

/// Four photo slots filled one at a time, in any order, before a card can be composed.
///
/// Slot `i` becomes grid cell `i` (0 top-left, 1 top-right, 2 bottom-left, 3 bottom-right).
#[derive(Clone, Debug, Default)]
pub struct PhotoSlots {
    slots: [Option<ImageSource>; PHOTO_COUNT],
}

impl PhotoSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a photo in `index`, returning the one it replaced.
    pub fn set(&mut self, index: usize, source: ImageSource) -> CardResult<Option<ImageSource>> {
        let slot = self.slots.get_mut(index).ok_or_else(|| {
            CardError::validation(format!(
                "photo slot {index} out of range 0..{PHOTO_COUNT}"
            ))
        })?;
        Ok(slot.replace(source))
    }

    /// Empty slot `index`.
    pub fn clear(&mut self, index: usize) -> Option<ImageSource> {
        self.slots.get_mut(index).and_then(Option::take)
    }

    pub fn get(&self, index: usize) -> Option<&ImageSource> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Number of filled slots.
    pub fn filled(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Indices of the slots still waiting for a photo.
    pub fn missing(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.is_none().then_some(i))
            .collect()
    }

    /// `true` once every slot has a photo.
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Hand over the four sources in grid order.
    pub fn into_sources(self) -> CardResult<[ImageSource; PHOTO_COUNT]> {
        let missing = self.missing();
        if !missing.is_empty() {
            return Err(CardError::validation(format!(
                "photo slots {missing:?} are empty"
            )));
        }
        let [a, b, c, d] = self.slots;
        match (a, b, c, d) {
            (Some(a), Some(b), Some(c), Some(d)) => Ok([a, b, c, d]),
            _ => Err(CardError::validation("photo slots changed while collecting")),
        }
    }
}

impl TryFrom<Vec<ImageSource>> for PhotoSlots {
    type Error = CardError;

    fn try_from(sources: Vec<ImageSource>) -> CardResult<Self> {
        if sources.len() != PHOTO_COUNT {
            return Err(CardError::validation(format!(
                "expected exactly {PHOTO_COUNT} photos, got {}",
                sources.len()
            )));
        }
        let mut slots = Self::new();
        for (i, s) in sources.into_iter().enumerate() {
            slots.set(i, s)?;
        }
        Ok(slots)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/card/slots.rs"]
mod tests;

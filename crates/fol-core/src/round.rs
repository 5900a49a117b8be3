//! The four-image set shown for one guess

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{Error, Result};
use crate::types::{ImageBytes, ImageDescriptor, ImageId};

/// Number of slots in every round
pub const ROUND_SIZE: usize = 4;

/// How many times the repeated image appears
pub const REPEAT_COUNT: usize = ROUND_SIZE - 1;

/// Tag assigned to the image fetched first (shown once)
pub const UNIQUE_IMAGE_ID: ImageId = ImageId(0);

/// Tag assigned to the image fetched second (shown three times)
pub const REPEATED_IMAGE_ID: ImageId = ImageId(1);

/// An image that has been described and downloaded but not yet tagged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedImage {
    pub descriptor: ImageDescriptor,
    pub bytes: ImageBytes,
}

/// One slot of a round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundImage {
    pub id: ImageId,
    pub descriptor: ImageDescriptor,
    pub bytes: ImageBytes,
}

impl RoundImage {
    fn tagged(id: ImageId, image: FetchedImage) -> Self {
        Self {
            id,
            descriptor: image.descriptor,
            bytes: image.bytes,
        }
    }
}

/// Ordered set of [`ROUND_SIZE`] images: one singleton and one image repeated
/// [`REPEAT_COUNT`] times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    slots: Vec<RoundImage>,
}

impl Round {
    /// Build `[unique, repeated, repeated, repeated]` and shuffle it.
    pub fn assemble<R: Rng + ?Sized>(
        unique: FetchedImage,
        repeated: FetchedImage,
        rng: &mut R,
    ) -> Self {
        let repeated = RoundImage::tagged(REPEATED_IMAGE_ID, repeated);
        let mut slots = Vec::with_capacity(ROUND_SIZE);
        slots.push(RoundImage::tagged(UNIQUE_IMAGE_ID, unique));
        slots.extend(std::iter::repeat(repeated).take(REPEAT_COUNT));
        slots.shuffle(rng);
        Self { slots }
    }

    /// Build a round from pre-tagged slots, checking the one-plus-three shape.
    pub fn from_slots(slots: Vec<RoundImage>) -> Result<Self> {
        if slots.len() != ROUND_SIZE {
            return Err(Error::invalid_round(format!(
                "expected {} slots, got {}",
                ROUND_SIZE,
                slots.len()
            )));
        }

        let round = Self { slots };
        let mut counts: Vec<usize> = round
            .distinct_ids()
            .into_iter()
            .map(|id| round.count_of(id))
            .collect();
        counts.sort_unstable();

        if counts != [1, REPEAT_COUNT] {
            return Err(Error::invalid_round(format!(
                "expected multiplicities [1, {}], got {:?}",
                REPEAT_COUNT, counts
            )));
        }

        Ok(round)
    }

    pub fn slots(&self) -> &[RoundImage] {
        &self.slots
    }

    pub fn get(&self, index: usize) -> Option<&RoundImage> {
        self.slots.get(index)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// How many slots share the tag of the image at `index`
    pub fn multiplicity(&self, index: usize) -> Option<usize> {
        self.get(index).map(|image| self.count_of(image.id))
    }

    /// `Some(true)` when `index` holds one of the repeated images,
    /// `Some(false)` for the singleton, `None` when out of range.
    pub fn is_correct_guess(&self, index: usize) -> Option<bool> {
        self.multiplicity(index).map(|count| count > 1)
    }

    /// Position of the odd one out
    pub fn singleton_index(&self) -> Option<usize> {
        (0..self.slots.len()).find(|&i| self.multiplicity(i) == Some(1))
    }

    fn count_of(&self, id: ImageId) -> usize {
        self.slots.iter().filter(|image| image.id == id).count()
    }

    fn distinct_ids(&self) -> Vec<ImageId> {
        let mut ids: Vec<ImageId> = self.slots.iter().map(|image| image.id).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

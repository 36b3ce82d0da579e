use image::GrayImage;

use crate::shared::constants::{
    EYE_MIN_NEIGHBORS, EYE_SCALE_FACTOR, FACE_MIN_NEIGHBORS, FACE_SCALE_FACTOR,
};
use crate::shared::region::Region;

/// Multi-scale scan parameters for a cascade classifier.
///
/// `scale_factor` is the window growth between scan passes (> 1.0).
/// Higher `min_neighbors` suppresses spurious boxes at the cost of recall.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScanParams {
    pub scale_factor: f64,
    pub min_neighbors: i32,
}

impl ScanParams {
    pub fn new(scale_factor: f64, min_neighbors: i32) -> Self {
        Self {
            scale_factor,
            min_neighbors,
        }
    }

    pub fn face() -> Self {
        Self::new(FACE_SCALE_FACTOR, FACE_MIN_NEIGHBORS)
    }

    pub fn eye() -> Self {
        Self::new(EYE_SCALE_FACTOR, EYE_MIN_NEIGHBORS)
    }
}

/// Domain interface for an object classifier scanning an intensity image.
///
/// Returned regions are in the coordinate space of `image`. Implementations
/// hold a loaded model and never modify it, hence repeated calls on the same
/// image return the same regions.
pub trait RegionDetector {
    fn detect(
        &mut self,
        image: &GrayImage,
        params: ScanParams,
    ) -> Result<Vec<Region>, Box<dyn std::error::Error>>;
}

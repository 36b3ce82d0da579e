use image::GrayImage;

use crate::shared::constants::{EYE_COLOR, EYE_THICKNESS, FACE_COLOR, FACE_THICKNESS};
use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Color and stroke width of a drawn bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    /// BGR.
    pub color: [u8; 3],
    pub thickness: i32,
}

impl StrokeStyle {
    pub fn face() -> Self {
        Self {
            color: FACE_COLOR,
            thickness: FACE_THICKNESS,
        }
    }

    pub fn eye() -> Self {
        Self {
            color: EYE_COLOR,
            thickness: EYE_THICKNESS,
        }
    }
}

/// Pixel operations the detector needs from an image backend.
///
/// Implementations:
/// - `NdarrayCanvas`: pure Rust, no native dependencies
/// - `ImgprocCanvas`: OpenCV `imgproc` (feature `opencv`)
pub trait FrameCanvas {
    /// Converts a BGR(A) or single-channel frame into an intensity image.
    fn to_gray(&self, frame: &Frame) -> Result<GrayImage, Box<dyn std::error::Error>>;

    /// Draws the outline of `region`, from `(x, y)` to `(x + width, y + height)`
    /// inclusive, onto `frame` in place. Parts outside the frame are clipped.
    fn draw_rect(
        &self,
        frame: &mut Frame,
        region: &Region,
        style: &StrokeStyle,
    ) -> Result<(), Box<dyn std::error::Error>>;
}

use image::GrayImage;
use ndarray::{ArrayView3, ArrayViewMut3};

/// Fixed-point BT.601 luma weights with 14 fractional bits.
const LUMA_SHIFT: u32 = 14;
const R_WEIGHT: u32 = 4899;
const G_WEIGHT: u32 = 9617;
const B_WEIGHT: u32 = 1868;

/// A single camera frame: contiguous bytes in row-major order.
///
/// Three-channel frames are BGR, the order cameras deliver through OpenCV.
/// Conversion to other layouts happens at I/O boundaries only.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            index,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    pub fn as_ndarray_mut(&mut self) -> ArrayViewMut3<'_, u8> {
        ArrayViewMut3::from_shape(self.shape(), &mut self.data)
            .expect("Frame data length must match dimensions")
    }

    /// Single-channel intensity image used by the cascade classifiers.
    ///
    /// BGR and BGRA pixels are weighted like OpenCV's `COLOR_BGR2GRAY`;
    /// alpha is ignored. Single-channel frames are copied as-is.
    pub fn to_grayscale(&self) -> GrayImage {
        let channels = self.channels.max(1) as usize;
        let luma: Vec<u8> = if channels < 3 {
            self.data.iter().step_by(channels).copied().collect()
        } else {
            self.data
                .chunks_exact(channels)
                .map(|px| bgr_to_luma(px[0], px[1], px[2]))
                .collect()
        };
        // Length always matches width * height, so from_raw cannot fail here.
        GrayImage::from_raw(self.width, self.height, luma)
            .unwrap_or_else(|| GrayImage::new(self.width, self.height))
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}

pub fn bgr_to_luma(b: u8, g: u8, r: u8) -> u8 {
    let y = R_WEIGHT * r as u32 + G_WEIGHT * g as u32 + B_WEIGHT * b as u32;
    ((y + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_construction_and_accessors() {
        let data = vec![0u8; 12]; // 2x2x3
        let frame = Frame::new(data.clone(), 2, 2, 3, 5);
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.channels(), 3);
        assert_eq!(frame.index(), 5);
        assert_eq!(frame.data(), &data[..]);
    }

    #[test]
    fn test_clone_is_independent() {
        let frame = Frame::new(vec![100u8; 12], 2, 2, 3, 0);
        let mut cloned = frame.clone();
        cloned.data_mut()[0] = 0;
        assert_eq!(frame.data()[0], 100);
        assert_eq!(cloned.data()[0], 0);
    }

    #[test]
    #[should_panic(expected = "data length must equal width * height * channels")]
    fn test_mismatched_data_length_panics_in_debug() {
        Frame::new(vec![0u8; 10], 2, 2, 3, 0);
    }

    #[test]
    fn test_as_ndarray_is_height_width_channels() {
        let frame = Frame::new(vec![0u8; 24], 4, 2, 3, 0);
        assert_eq!(frame.as_ndarray().shape(), &[2, 4, 3]);
    }

    #[test]
    fn test_as_ndarray_mut_writes_through() {
        let mut frame = Frame::new(vec![0u8; 12], 2, 2, 3, 0);
        frame.as_ndarray_mut()[[1, 0, 2]] = 200;
        assert_eq!(frame.data()[8], 200);
    }

    #[rstest]
    #[case::black(0, 0, 0, 0)]
    #[case::white(255, 255, 255, 255)]
    #[case::pure_blue(255, 0, 0, 29)]
    #[case::pure_green(0, 255, 0, 150)]
    #[case::pure_red(0, 0, 255, 76)]
    fn test_bgr_to_luma(#[case] b: u8, #[case] g: u8, #[case] r: u8, #[case] expected: u8) {
        assert_eq!(bgr_to_luma(b, g, r), expected);
    }

    #[test]
    fn test_grayscale_of_bgr_frame() {
        // 2x1: one red pixel, one green pixel
        let frame = Frame::new(vec![0, 0, 255, 0, 255, 0], 2, 1, 3, 0);
        let gray = frame.to_grayscale();
        assert_eq!(gray.dimensions(), (2, 1));
        assert_eq!(gray.as_raw(), &vec![76, 150]);
    }

    #[test]
    fn test_grayscale_ignores_alpha() {
        let opaque = Frame::new(vec![10, 20, 30, 255], 1, 1, 4, 0);
        let clear = Frame::new(vec![10, 20, 30, 0], 1, 1, 4, 0);
        assert_eq!(opaque.to_grayscale(), clear.to_grayscale());
    }

    #[test]
    fn test_grayscale_of_single_channel_is_copy() {
        let data: Vec<u8> = (0..12).collect();
        let frame = Frame::new(data.clone(), 4, 3, 1, 0);
        assert_eq!(frame.to_grayscale().into_raw(), data);
    }

    #[test]
    fn test_grayscale_does_not_modify_frame() {
        let frame = Frame::new(vec![7u8; 27], 3, 3, 3, 0);
        let before = frame.data().to_vec();
        let _ = frame.to_grayscale();
        assert_eq!(frame.data(), &before[..]);
    }
}

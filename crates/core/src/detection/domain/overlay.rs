use std::ops::Range;

use image::GrayImage;
use ndarray::{aview1, s, ArrayViewMut3, Axis};

use crate::detection::domain::frame_canvas::{FrameCanvas, StrokeStyle};
use crate::shared::frame::{bgr_to_luma, Frame};
use crate::shared::region::Region;

/// Pure-Rust canvas over `Frame`'s ndarray view.
///
/// Grayscale uses OpenCV's fixed-point BGR weights. Strokes are square
/// bands, so thick corners differ slightly from `ImgprocCanvas`.
#[derive(Clone, Copy, Debug, Default)]
pub struct NdarrayCanvas;

impl FrameCanvas for NdarrayCanvas {
    fn to_gray(&self, frame: &Frame) -> Result<GrayImage, Box<dyn std::error::Error>> {
        Ok(frame.to_grayscale())
    }

    fn draw_rect(
        &self,
        frame: &mut Frame,
        region: &Region,
        style: &StrokeStyle,
    ) -> Result<(), Box<dyn std::error::Error>> {
        draw_rectangle(frame, region, style);
        Ok(())
    }
}

/// Pixel value written for a frame with `channels` channels.
fn stroke_pixel(style: &StrokeStyle, channels: usize) -> Vec<u8> {
    let [b, g, r] = style.color;
    match channels {
        1 => vec![bgr_to_luma(b, g, r)],
        3 => vec![b, g, r],
        4 => vec![b, g, r, 255],
        n => vec![bgr_to_luma(b, g, r); n],
    }
}

/// Draws the outline of `region` onto `frame` in place.
///
/// The stroke is centred on the outline running from `(x, y)` to
/// `(x + width, y + height)` inclusive, as OpenCV's `rectangle` draws it.
/// Each edge covers `thickness` pixels starting `thickness / 2` before the
/// edge. Parts outside the frame are clipped.
pub fn draw_rectangle(frame: &mut Frame, region: &Region, style: &StrokeStyle) {
    if style.thickness <= 0 || region.width < 0 || region.height < 0 {
        return;
    }
    let t = style.thickness as i64;
    let half = t / 2;
    let x0 = region.x as i64 - half;
    let y0 = region.y as i64 - half;
    let x1 = region.right() as i64 - half;
    let y1 = region.bottom() as i64 - half;

    let pixel = stroke_pixel(style, frame.channels() as usize);
    let mut view = frame.as_ndarray_mut();

    // top, bottom, left, right
    fill(&mut view, y0..y0 + t, x0..x1 + t, &pixel);
    fill(&mut view, y1..y1 + t, x0..x1 + t, &pixel);
    fill(&mut view, y0..y1 + t, x0..x0 + t, &pixel);
    fill(&mut view, y0..y1 + t, x1..x1 + t, &pixel);
}

fn fill(view: &mut ArrayViewMut3<'_, u8>, rows: Range<i64>, cols: Range<i64>, pixel: &[u8]) {
    let (height, width, _) = view.dim();
    let r0 = rows.start.clamp(0, height as i64) as usize;
    let r1 = rows.end.clamp(0, height as i64) as usize;
    let c0 = cols.start.clamp(0, width as i64) as usize;
    let c1 = cols.end.clamp(0, width as i64) as usize;
    if r0 >= r1 || c0 >= c1 {
        return;
    }
    let value = aview1(pixel);
    let mut band = view.slice_mut(s![r0..r1, c0..c1, ..]);
    for mut px in band.lanes_mut(Axis(2)) {
        px.assign(&value);
    }
}

use image::GrayImage;
use opencv::core::{Mat, Rect, Scalar};
use opencv::imgproc;
use opencv::prelude::*;

use crate::capture::infrastructure::mat_convert::frame_to_mat;
use crate::detection::domain::frame_canvas::{FrameCanvas, StrokeStyle};
use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Canvas backed by OpenCV's `cvtColor` and `rectangle`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImgprocCanvas;

impl FrameCanvas for ImgprocCanvas {
    fn to_gray(&self, frame: &Frame) -> Result<GrayImage, Box<dyn std::error::Error>> {
        let code = match frame.channels() {
            1 => {
                return GrayImage::from_raw(frame.width(), frame.height(), frame.data().to_vec())
                    .ok_or_else(|| "frame buffer does not match its dimensions".into());
            }
            3 => imgproc::COLOR_BGR2GRAY,
            4 => imgproc::COLOR_BGRA2GRAY,
            n => return Err(format!("unsupported channel count {n}").into()),
        };

        let mat = frame_to_mat(frame)?;
        let mut gray = Mat::default();
        imgproc::cvt_color(&mat, &mut gray, code, 0)?;
        GrayImage::from_raw(frame.width(), frame.height(), gray.data_bytes()?.to_vec())
            .ok_or_else(|| "grayscale buffer does not match frame dimensions".into())
    }

    fn draw_rect(
        &self,
        frame: &mut Frame,
        region: &Region,
        style: &StrokeStyle,
    ) -> Result<(), Box<dyn std::error::Error>> {
        // Negative thickness would make OpenCV fill the box.
        if style.thickness <= 0 || region.width < 0 || region.height < 0 {
            return Ok(());
        }
        let [b, g, r] = style.color;
        let mut mat = frame_to_mat(frame)?;
        // Rect's bottom-right is exclusive; the outline ends at (x + w, y + h).
        imgproc::rectangle(
            &mut mat,
            Rect::new(region.x, region.y, region.width + 1, region.height + 1),
            Scalar::new(b as f64, g as f64, r as f64, 255.0),
            style.thickness,
            imgproc::LINE_8,
            0,
        )?;
        frame.data_mut().copy_from_slice(mat.data_bytes()?);
        Ok(())
    }
}

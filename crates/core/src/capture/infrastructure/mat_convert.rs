use opencv::core::{Mat, Scalar, CV_8U, CV_8UC1, CV_8UC3, CV_8UC4};
use opencv::prelude::*;

use crate::shared::frame::Frame;

/// Copies an 8-bit OpenCV matrix into a `Frame`, keeping its channel order.
pub fn mat_to_frame(mat: &Mat, index: usize) -> Result<Frame, Box<dyn std::error::Error>> {
    if mat.empty() {
        return Err("empty frame".into());
    }
    if mat.depth() != CV_8U {
        return Err(format!("unsupported pixel depth {}", mat.depth()).into());
    }
    let width = mat.cols() as u32;
    let height = mat.rows() as u32;
    let channels = mat.channels() as u8;

    // data_bytes requires contiguous storage; ROI views are not.
    let data = if mat.is_continuous() {
        mat.data_bytes()?.to_vec()
    } else {
        mat.try_clone()?.data_bytes()?.to_vec()
    };
    Ok(Frame::new(data, width, height, channels, index))
}

/// Copies a `Frame` into a newly allocated OpenCV matrix.
pub fn frame_to_mat(frame: &Frame) -> Result<Mat, Box<dyn std::error::Error>> {
    bytes_to_mat(frame.data(), frame.width(), frame.height(), frame.channels())
}

pub fn bytes_to_mat(
    data: &[u8],
    width: u32,
    height: u32,
    channels: u8,
) -> Result<Mat, Box<dyn std::error::Error>> {
    let typ = match channels {
        1 => CV_8UC1,
        3 => CV_8UC3,
        4 => CV_8UC4,
        n => return Err(format!("unsupported channel count {n}").into()),
    };
    let mut mat =
        Mat::new_rows_cols_with_default(height as i32, width as i32, typ, Scalar::all(0.0))?;
    mat.data_bytes_mut()?.copy_from_slice(data);
    Ok(mat)
}

use opencv::core::Mat;
use opencv::prelude::*;
use opencv::videoio::{self, VideoCapture};

use crate::capture::domain::frame_source::FrameSource;
use crate::capture::infrastructure::mat_convert::mat_to_frame;
use crate::shared::frame::Frame;
use crate::shared::stream_info::StreamInfo;

/// Reads BGR frames from a local camera through OpenCV's `VideoCapture`.
pub struct OpenCvCamera {
    device_index: i32,
    capture: Option<VideoCapture>,
    frame: Mat,
    frame_count: usize,
}

impl OpenCvCamera {
    pub fn new(device_index: i32) -> Self {
        Self {
            device_index,
            capture: None,
            frame: Mat::default(),
            frame_count: 0,
        }
    }
}

impl FrameSource for OpenCvCamera {
    fn device(&self) -> String {
        format!("camera {}", self.device_index)
    }

    fn open(&mut self) -> Result<StreamInfo, Box<dyn std::error::Error>> {
        let capture = VideoCapture::new(self.device_index, videoio::CAP_ANY)?;
        if !capture.is_opened()? {
            return Err(format!("{} is not available", self.device()).into());
        }

        let info = StreamInfo {
            device: self.device(),
            width: capture.get(videoio::CAP_PROP_FRAME_WIDTH)?.max(0.0) as u32,
            height: capture.get(videoio::CAP_PROP_FRAME_HEIGHT)?.max(0.0) as u32,
            fps: capture.get(videoio::CAP_PROP_FPS)?,
        };
        self.capture = Some(capture);
        self.frame_count = 0;
        Ok(info)
    }

    fn read(&mut self) -> Result<Frame, Box<dyn std::error::Error>> {
        let capture = self.capture.as_mut().ok_or("camera is not open")?;
        if !capture.read(&mut self.frame)? || self.frame.empty() {
            return Err("camera returned no frame".into());
        }
        let frame = mat_to_frame(&self.frame, self.frame_count)?;
        self.frame_count += 1;
        Ok(frame)
    }

    fn release(&mut self) {
        if let Some(mut capture) = self.capture.take() {
            if let Err(e) = capture.release() {
                log::warn!("Failed to release {}: {e}", self.device());
            }
        }
    }
}

use opencv::highgui;

use crate::capture::domain::frame_display::FrameDisplay;
use crate::capture::infrastructure::mat_convert::frame_to_mat;
use crate::shared::frame::Frame;

/// Shows frames in a titled OpenCV HighGUI window.
///
/// The window is created on the first `show`, so a session that never
/// streams never opens one.
pub struct HighGuiDisplay {
    title: String,
    window_open: bool,
}

impl HighGuiDisplay {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            window_open: false,
        }
    }
}

impl FrameDisplay for HighGuiDisplay {
    fn show(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        if !self.window_open {
            highgui::named_window(&self.title, highgui::WINDOW_AUTOSIZE)?;
            self.window_open = true;
        }
        let mat = frame_to_mat(frame)?;
        highgui::imshow(&self.title, &mat)?;
        Ok(())
    }

    fn poll_key(&mut self, timeout_ms: i32) -> Result<Option<i32>, Box<dyn std::error::Error>> {
        let key = highgui::wait_key(timeout_ms)?;
        Ok((key >= 0).then_some(key))
    }

    fn close(&mut self) {
        if !self.window_open {
            return;
        }
        self.window_open = false;
        if let Err(e) = highgui::destroy_window(&self.title) {
            log::warn!("Failed to close window '{}': {e}", self.title);
        }
    }
}

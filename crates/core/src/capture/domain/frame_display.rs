use crate::shared::frame::Frame;

/// Shows annotated frames and reports user key presses.
pub trait FrameDisplay {
    fn show(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>>;

    /// Waits up to `timeout_ms` for a key press. Returns the raw key code,
    /// or `None` if no key was pressed.
    fn poll_key(&mut self, timeout_ms: i32) -> Result<Option<i32>, Box<dyn std::error::Error>>;

    /// Closes the display. Calling it more than once has no further effect.
    fn close(&mut self);
}

use crate::capture::domain::frame_display::FrameDisplay;
use crate::capture::domain::frame_source::FrameSource;

/// Releases the frame source and closes the display when dropped.
///
/// Held for the whole capture session so every exit path, including early
/// returns and unwinding, gives the devices back exactly once.
#[must_use = "`ReleaseGuard` should be assigned to a variable, or it will release immediately"]
pub(crate) struct ReleaseGuard<'a> {
    pub(crate) source: &'a mut dyn FrameSource,
    pub(crate) display: &'a mut dyn FrameDisplay,
}

impl<'a> ReleaseGuard<'a> {
    pub(crate) fn new(source: &'a mut dyn FrameSource, display: &'a mut dyn FrameDisplay) -> Self {
        Self { source, display }
    }
}

impl Drop for ReleaseGuard<'_> {
    fn drop(&mut self) {
        self.source.release();
        self.display.close();
        log::debug!("Released {} and closed display", self.source.device());
    }
}

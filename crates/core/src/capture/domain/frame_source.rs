use crate::shared::frame::Frame;
use crate::shared::stream_info::StreamInfo;

/// Produces frames from a live device.
///
/// Implementations handle device I/O and pixel layout conversion while the
/// capture loop works with the abstract `Frame` type.
pub trait FrameSource {
    /// Human-readable device name used in diagnostics.
    fn device(&self) -> String;

    /// Acquires the device and reports its stream properties.
    fn open(&mut self) -> Result<StreamInfo, Box<dyn std::error::Error>>;

    /// Blocks until the next frame is available.
    fn read(&mut self) -> Result<Frame, Box<dyn std::error::Error>>;

    /// Releases the device. Calling it more than once has no further effect.
    fn release(&mut self);
}

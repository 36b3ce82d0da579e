use std::fmt;

/// Properties a frame source reports once it is open.
///
/// Cameras may report `0` for any property they do not expose.
#[derive(Clone, Debug, PartialEq)]
pub struct StreamInfo {
    pub device: String,
    pub width: u32,
    pub height: u32,
    pub fps: f64,
}

impl fmt::Display for StreamInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}x{} @ {:.1} fps)",
            self.device, self.width, self.height, self.fps
        )
    }
}

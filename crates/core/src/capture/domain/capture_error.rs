use thiserror::Error;

/// Failures that end a capture session.
///
/// A frame that cannot be read mid-stream is not among them: it ends the
/// loop normally and is reported through the loop's exit reason.
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("could not open {device}: {source}")]
    CameraUnavailable {
        device: String,
        #[source]
        source: Box<dyn std::error::Error>,
    },
    #[error("display failed: {0}")]
    Display(#[source] Box<dyn std::error::Error>),
    #[error("face detection failed: {0}")]
    Detection(#[source] Box<dyn std::error::Error>),
}

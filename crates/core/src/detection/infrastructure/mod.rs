#[cfg(feature = "opencv")]
pub mod haar_cascade_detector;
#[cfg(feature = "opencv")]
pub mod imgproc_canvas;

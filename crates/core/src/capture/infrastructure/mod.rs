#[cfg(feature = "opencv")]
pub mod highgui_display;
#[cfg(feature = "opencv")]
pub mod mat_convert;
#[cfg(feature = "opencv")]
pub mod opencv_camera;

pub const FACE_CASCADE_NAME: &str = "haarcascade_frontalface_default.xml";
pub const EYE_CASCADE_NAME: &str = "haarcascade_eye.xml";

/// Directory searched first for cascade files, relative to the working directory.
pub const DEFAULT_FEATURES_DIR: &str = "features";

/// Locations where OpenCV installs its pretrained cascades.
pub const SYSTEM_CASCADE_DIRS: &[&str] = &[
    "/usr/share/opencv4/haarcascades",
    "/usr/local/share/opencv4/haarcascades",
    "/usr/share/opencv/haarcascades",
];

pub const CAMERA_INDEX: i32 = 0;
pub const WINDOW_TITLE: &str = "Face Recognition";

pub const QUIT_KEY: char = 'q';
pub const KEY_POLL_MS: i32 = 1;

pub const FACE_SCALE_FACTOR: f64 = 1.2;
pub const FACE_MIN_NEIGHBORS: i32 = 5;
pub const EYE_SCALE_FACTOR: f64 = 1.1;
pub const EYE_MIN_NEIGHBORS: i32 = 3;

/// Overlay colors are BGR, matching the camera's channel order.
pub const FACE_COLOR: [u8; 3] = [0, 255, 0];
pub const FACE_THICKNESS: i32 = 3;
pub const EYE_COLOR: [u8; 3] = [255, 255, 0];
pub const EYE_THICKNESS: i32 = 2;

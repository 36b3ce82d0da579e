use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;

use facecam_core::capture::domain::capture_error::CaptureError;
use facecam_core::capture::infrastructure::highgui_display::HighGuiDisplay;
use facecam_core::capture::infrastructure::opencv_camera::OpenCvCamera;
use facecam_core::detection::domain::face_annotator::FaceAnnotator;
use facecam_core::detection::domain::region_detector::ScanParams;
use facecam_core::detection::infrastructure::haar_cascade_detector::HaarCascadeDetector;
use facecam_core::detection::infrastructure::imgproc_canvas::ImgprocCanvas;
use facecam_core::pipeline::capture_loop_use_case::{
    CaptureLoopUseCase, ExitReason, LoopOptions, LoopReport,
};
use facecam_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use facecam_core::shared::constants::{
    CAMERA_INDEX, DEFAULT_FEATURES_DIR, EYE_MIN_NEIGHBORS, EYE_SCALE_FACTOR, FACE_MIN_NEIGHBORS,
    FACE_SCALE_FACTOR, WINDOW_TITLE,
};
use facecam_core::shared::model_resolver;

/// Live webcam face detection with Haar cascades. Press 'q' to quit.
#[derive(Parser)]
#[command(name = "facecam")]
struct Cli {
    /// Also detect eyes inside each detected face.
    #[arg(long)]
    eyes: bool,

    /// Directory containing the Haar cascade XML files.
    #[arg(long, default_value = DEFAULT_FEATURES_DIR)]
    features_dir: PathBuf,

    /// Window growth between face scan passes (must be > 1.0).
    #[arg(long, default_value_t = FACE_SCALE_FACTOR)]
    face_scale_factor: f64,

    /// Overlapping detections required to accept a face.
    #[arg(long, default_value_t = FACE_MIN_NEIGHBORS)]
    face_min_neighbors: i32,

    /// Window growth between eye scan passes (must be > 1.0).
    #[arg(long, default_value_t = EYE_SCALE_FACTOR)]
    eye_scale_factor: f64,

    /// Overlapping detections required to accept an eye.
    #[arg(long, default_value_t = EYE_MIN_NEIGHBORS)]
    eye_min_neighbors: i32,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let annotator = build_annotator(&cli)?;
    let mut use_case = CaptureLoopUseCase::new(
        Box::new(OpenCvCamera::new(CAMERA_INDEX)),
        Box::new(HighGuiDisplay::new(WINDOW_TITLE)),
        annotator,
        LoopOptions {
            detect_eyes: cli.eyes,
            ..LoopOptions::default()
        },
        Box::new(StdoutPipelineLogger::default()),
    );

    report_outcome(use_case.execute(), &mut io::stdout())
}

/// Turns the loop outcome into the process result. A camera that cannot be
/// opened is reported on `out` and is not an error exit.
fn report_outcome(
    outcome: Result<LoopReport, CaptureError>,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    match outcome {
        Ok(report) => {
            let reason = match report.exit_reason {
                ExitReason::QuitKey => "quit key",
                ExitReason::ReadFailure(_) => "read failure",
            };
            log::info!(
                "Stopped after {} frames ({reason})",
                report.frames_displayed
            );
            Ok(())
        }
        Err(CaptureError::CameraUnavailable { source, .. }) => {
            log::debug!("Camera open failed: {source}");
            writeln!(out, "Error: Could not open the webcam.")?;
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Loads both cascades up front; nothing is loaded lazily or reloaded later.
fn build_annotator(cli: &Cli) -> Result<FaceAnnotator, Box<dyn std::error::Error>> {
    let paths = model_resolver::resolve_cascades(&cli.features_dir)?;
    let face = HaarCascadeDetector::load(&paths.face)?;
    let eye = HaarCascadeDetector::load(&paths.eye)?;

    Ok(FaceAnnotator::new(Box::new(face), Box::new(eye))
        .with_canvas(Box::new(ImgprocCanvas))
        .with_face_params(ScanParams::new(
            cli.face_scale_factor,
            cli.face_min_neighbors,
        ))
        .with_eye_params(ScanParams::new(cli.eye_scale_factor, cli.eye_min_neighbors)))
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.face_scale_factor <= 1.0 {
        return Err(format!(
            "Face scale factor must be greater than 1.0, got {}",
            cli.face_scale_factor
        )
        .into());
    }
    if cli.eye_scale_factor <= 1.0 {
        return Err(format!(
            "Eye scale factor must be greater than 1.0, got {}",
            cli.eye_scale_factor
        )
        .into());
    }
    if cli.face_min_neighbors < 0 {
        return Err(format!(
            "Face min neighbors must be non-negative, got {}",
            cli.face_min_neighbors
        )
        .into());
    }
    if cli.eye_min_neighbors < 0 {
        return Err(format!(
            "Eye min neighbors must be non-negative, got {}",
            cli.eye_min_neighbors
        )
        .into());
    }
    Ok(())
}

use image::imageops;

use crate::detection::domain::frame_canvas::{FrameCanvas, StrokeStyle};
use crate::detection::domain::overlay::NdarrayCanvas;
use crate::detection::domain::region_detector::{RegionDetector, ScanParams};
use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// A detected face and the eyes found inside it, in full-frame coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct AnnotatedFace {
    pub face: Region,
    pub eyes: Vec<Region>,
}

/// What was drawn onto one frame. Lives for a single loop iteration.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Annotation {
    pub faces: Vec<AnnotatedFace>,
}

impl Annotation {
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn eye_count(&self) -> usize {
        self.faces.iter().map(|f| f.eyes.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

/// Finds faces (and optionally eyes) and draws their bounding boxes in place.
///
/// Owns both classifier models for the lifetime of the process; they are
/// loaded before construction and never replaced.
pub struct FaceAnnotator {
    face_detector: Box<dyn RegionDetector>,
    eye_detector: Box<dyn RegionDetector>,
    canvas: Box<dyn FrameCanvas>,
    face_params: ScanParams,
    eye_params: ScanParams,
    face_style: StrokeStyle,
    eye_style: StrokeStyle,
}

impl FaceAnnotator {
    pub fn new(
        face_detector: Box<dyn RegionDetector>,
        eye_detector: Box<dyn RegionDetector>,
    ) -> Self {
        Self {
            face_detector,
            eye_detector,
            canvas: Box::new(NdarrayCanvas),
            face_params: ScanParams::face(),
            eye_params: ScanParams::eye(),
            face_style: StrokeStyle::face(),
            eye_style: StrokeStyle::eye(),
        }
    }

    /// Replaces the pure-Rust canvas used for grayscale and drawing.
    pub fn with_canvas(mut self, canvas: Box<dyn FrameCanvas>) -> Self {
        self.canvas = canvas;
        self
    }

    pub fn with_face_params(mut self, params: ScanParams) -> Self {
        self.face_params = params;
        self
    }

    pub fn with_eye_params(mut self, params: ScanParams) -> Self {
        self.eye_params = params;
        self
    }

    pub fn with_face_style(mut self, style: StrokeStyle) -> Self {
        self.face_style = style;
        self
    }

    /// Detects faces in `frame` and draws a box around each one.
    ///
    /// When `detect_eyes` is set, each face's grayscale region is scanned
    /// for eyes, which are drawn in frame coordinates. A frame without faces
    /// is left byte-for-byte unchanged.
    pub fn annotate(
        &mut self,
        frame: &mut Frame,
        detect_eyes: bool,
    ) -> Result<Annotation, Box<dyn std::error::Error>> {
        let gray = self.canvas.to_gray(frame)?;
        let faces = self.face_detector.detect(&gray, self.face_params)?;
        if faces.is_empty() {
            return Ok(Annotation::default());
        }

        let mut annotation = Annotation {
            faces: Vec::with_capacity(faces.len()),
        };
        for face in faces {
            self.canvas.draw_rect(frame, &face, &self.face_style)?;

            let mut eyes = Vec::new();
            if detect_eyes {
                if let Some(roi) = face.clamp_to(gray.width(), gray.height()) {
                    let face_gray = imageops::crop_imm(
                        &gray,
                        roi.x as u32,
                        roi.y as u32,
                        roi.width as u32,
                        roi.height as u32,
                    )
                    .to_image();
                    for local in self.eye_detector.detect(&face_gray, self.eye_params)? {
                        let eye = local.translate(roi.x, roi.y);
                        self.canvas.draw_rect(frame, &eye, &self.eye_style)?;
                        eyes.push(eye);
                    }
                }
            }
            annotation.faces.push(AnnotatedFace { face, eyes });
        }

        log::trace!(
            "Frame {}: {} faces, {} eyes",
            frame.index(),
            annotation.face_count(),
            annotation.eye_count()
        );
        Ok(annotation)
    }
}

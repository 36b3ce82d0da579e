use std::path::{Path, PathBuf};

use image::GrayImage;
use opencv::core::{Rect, Size, Vector};
use opencv::objdetect::CascadeClassifier;
use opencv::prelude::*;
use thiserror::Error;

use crate::capture::infrastructure::mat_convert::bytes_to_mat;
use crate::detection::domain::region_detector::{RegionDetector, ScanParams};
use crate::shared::region::Region;

#[derive(Error, Debug)]
pub enum ClassifierLoadError {
    #[error("cascade file does not exist: {0}")]
    Missing(PathBuf),
    #[error("cascade file could not be parsed: {0}")]
    Empty(PathBuf),
    #[error("OpenCV error loading {path}: {source}")]
    OpenCv {
        path: PathBuf,
        #[source]
        source: opencv::Error,
    },
}

/// A pretrained Haar cascade evaluated with OpenCV's `detectMultiScale`.
pub struct HaarCascadeDetector {
    classifier: CascadeClassifier,
}

impl HaarCascadeDetector {
    /// Loads a cascade XML file. OpenCV silently yields an empty classifier
    /// for unreadable files, so that case is reported as an error here.
    pub fn load(path: &Path) -> Result<Self, ClassifierLoadError> {
        if !path.is_file() {
            return Err(ClassifierLoadError::Missing(path.to_path_buf()));
        }
        let opencv_err = |source| ClassifierLoadError::OpenCv {
            path: path.to_path_buf(),
            source,
        };
        let filename = path.to_string_lossy();
        let classifier = CascadeClassifier::new(&filename).map_err(opencv_err)?;
        if classifier.empty().map_err(opencv_err)? {
            return Err(ClassifierLoadError::Empty(path.to_path_buf()));
        }
        log::info!("Loaded cascade {}", path.display());
        Ok(Self { classifier })
    }
}

impl RegionDetector for HaarCascadeDetector {
    fn detect(
        &mut self,
        image: &GrayImage,
        params: ScanParams,
    ) -> Result<Vec<Region>, Box<dyn std::error::Error>> {
        let mat = bytes_to_mat(image.as_raw(), image.width(), image.height(), 1)?;
        let mut found: Vector<Rect> = Vector::new();
        self.classifier.detect_multi_scale(
            &mat,
            &mut found,
            params.scale_factor,
            params.min_neighbors,
            0,
            Size::default(),
            Size::default(),
        )?;
        Ok(found
            .iter()
            .map(|r| Region::new(r.x, r.y, r.width, r.height))
            .collect())
    }
}

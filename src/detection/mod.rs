pub mod contours;
pub mod measure;
pub mod moments;
pub mod preprocessing;
pub mod steps;
pub mod strategy;

use image::GrayImage;
use imageproc::point::Point;
use std::sync::Arc;
use thiserror::Error;

use crate::config::FilterConfig;
use crate::models::{Candidate, Detection};
use crate::pipeline::Pipeline;
use steps::{BlurStep, FixedThresholdStep, GrayscaleStep, OtsuThresholdStep};
pub use strategy::SelectionStrategy;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DetectionError {
    #[error("no candidates found")]
    NoCandidates,
}

/// Contours and measured candidates of a single binary frame.
#[derive(Debug, Clone)]
pub struct FrameDetections {
    /// Every external contour, degenerate ones included
    pub contours: Vec<Vec<Point<i32>>>,
    pub candidates: Vec<Candidate>,
}

impl FrameDetections {
    /// Extract external contours from `binary` and measure each one.
    pub fn analyze(binary: &GrayImage) -> Self {
        let (width, height) = binary.dimensions();
        let contours = contours::find_external_contours(binary);

        let candidates = contours
            .iter()
            .filter_map(|contour| measure::measure(contour, width, height))
            .map(|(bbox, centroid)| (Detection::new(bbox), centroid))
            .collect();

        Self { contours, candidates }
    }

    /// Apply a strategy to a copy of this frame's candidates.
    pub fn select(&self, strategy: SelectionStrategy) -> Result<Vec<Candidate>, DetectionError> {
        strategy.select(self.candidates.clone())
    }
}

/// Measure every external contour of a binary image.
///
/// Contours with zero area are skipped. The result follows contour
/// extraction order, which is stable for a given image.
pub fn build_detections(binary: &GrayImage) -> Vec<Candidate> {
    FrameDetections::analyze(binary).candidates
}

/// Build detections for `binary` and pick one with `strategy`.
pub fn select_candidates(binary: &GrayImage, strategy: SelectionStrategy) -> Result<Vec<Candidate>, DetectionError> {
    let detections = build_detections(binary);
    if detections.is_empty() {
        return Err(DetectionError::NoCandidates);
    }
    strategy.select(detections)
}

/// Build the standard filter pipeline: grayscale, blur, then threshold
pub fn build_standard_pipeline(config: &FilterConfig) -> Pipeline {
    let mut pipeline = Pipeline::new().add_step(Arc::new(GrayscaleStep));

    if config.blur_sigma > 0.0 {
        pipeline = pipeline.add_step(Arc::new(BlurStep { sigma: config.blur_sigma }));
    }

    match config.threshold {
        Some(level) => pipeline.add_step(Arc::new(FixedThresholdStep {
            level,
            invert: config.invert,
        })),
        None => pipeline.add_step(Arc::new(OtsuThresholdStep { invert: config.invert })),
    }
}

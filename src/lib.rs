pub mod annotate;
pub mod capture;
pub mod config;
pub mod detection;
pub mod models;
pub mod pipeline;
pub mod report;

pub use capture::{CaptureLoop, CaptureSession, FrameSource, ImageSequenceSource, MemorySource};
pub use config::{CaptureConfig, FilterConfig, ReportFormat};
pub use detection::{
    DetectionError, FrameDetections, SelectionStrategy, build_detections, build_standard_pipeline, select_candidates,
};
pub use models::{BoundingBox, Candidate, Centroid, Detection};
pub use pipeline::{Pipeline, PipelineContext, PipelineStep};
pub use report::{CaptureSummary, FrameReport, StrategyOutcome};

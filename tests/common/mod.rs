#![allow(dead_code)]

mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from cansight for tests
pub use cansight::{
    BoundingBox, Candidate, CaptureConfig, CaptureLoop, Centroid, Detection, DetectionError, FilterConfig,
    MemorySource, ReportFormat, SelectionStrategy,
};

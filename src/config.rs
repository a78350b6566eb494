use clap::ValueEnum;
use std::path::PathBuf;

use crate::detection::SelectionStrategy;

/// Parameters of the standard filter pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct FilterConfig {
    /// Gaussian blur sigma; 0 disables blurring
    pub blur_sigma: f32,
    /// Fixed threshold level; `None` picks one per frame with Otsu's method
    pub threshold: Option<u8>,
    /// Treat dark pixels as foreground
    pub invert: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            blur_sigma: 1.0,
            threshold: None,
            invert: false,
        }
    }
}

impl FilterConfig {
    pub fn with_blur_sigma(mut self, sigma: f32) -> Self {
        self.blur_sigma = sigma;
        self
    }

    pub fn with_threshold(mut self, level: Option<u8>) -> Self {
        self.threshold = level;
        self
    }

    pub fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Capture loop settings
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    pub mirror: bool,
    pub max_frames: Option<u64>,
    /// Consecutive failed reads tolerated before the loop gives up
    pub max_consecutive_failures: u32,
    /// Where annotated and filtered frames are written
    pub output_dir: Option<PathBuf>,
    pub strategies: Vec<SelectionStrategy>,
    pub format: ReportFormat,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            mirror: true,
            max_frames: None,
            max_consecutive_failures: 3,
            output_dir: None,
            strategies: SelectionStrategy::ALL.to_vec(),
            format: ReportFormat::Text,
        }
    }
}

impl CaptureConfig {
    pub fn with_mirror(mut self, mirror: bool) -> Self {
        self.mirror = mirror;
        self
    }

    pub fn with_max_frames(mut self, max_frames: Option<u64>) -> Self {
        self.max_frames = max_frames;
        self
    }

    pub fn with_max_consecutive_failures(mut self, limit: u32) -> Self {
        self.max_consecutive_failures = limit;
        self
    }

    pub fn with_output_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.output_dir = dir;
        self
    }

    /// An empty list keeps the default of running every strategy
    pub fn with_strategies(mut self, strategies: Vec<SelectionStrategy>) -> Self {
        if !strategies.is_empty() {
            self.strategies = strategies;
        }
        self
    }

    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }
}

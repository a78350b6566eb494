use crate::detection::preprocessing;
use crate::pipeline::{PipelineContext, PipelineStep};
use anyhow::Result;
use image::DynamicImage;

/// Convert image to grayscale
pub struct GrayscaleStep;

impl PipelineStep for GrayscaleStep {
    fn process(&self, image: DynamicImage, _context: &PipelineContext) -> Result<DynamicImage> {
        Ok(DynamicImage::ImageLuma8(preprocessing::to_grayscale(&image)))
    }

    fn name(&self) -> &str {
        "Grayscale Conversion"
    }
}

/// Apply Gaussian blur
pub struct BlurStep {
    pub sigma: f32,
}

impl PipelineStep for BlurStep {
    fn process(&self, image: DynamicImage, _context: &PipelineContext) -> Result<DynamicImage> {
        if self.sigma <= 0.0 {
            anyhow::bail!("Blur sigma must be positive, got {}", self.sigma);
        }
        let gray = image.to_luma8();
        Ok(DynamicImage::ImageLuma8(preprocessing::apply_blur(&gray, self.sigma)))
    }

    fn name(&self) -> &str {
        "Gaussian Blur"
    }
}

/// Binarize at the Otsu level of each frame
pub struct OtsuThresholdStep {
    pub invert: bool,
}

impl PipelineStep for OtsuThresholdStep {
    fn process(&self, image: DynamicImage, _context: &PipelineContext) -> Result<DynamicImage> {
        let gray = image.to_luma8();
        Ok(DynamicImage::ImageLuma8(preprocessing::binarize_otsu(&gray, self.invert)))
    }

    fn name(&self) -> &str {
        "Otsu Threshold"
    }
}

/// Binarize at a fixed level
pub struct FixedThresholdStep {
    pub level: u8,
    pub invert: bool,
}

impl PipelineStep for FixedThresholdStep {
    fn process(&self, image: DynamicImage, _context: &PipelineContext) -> Result<DynamicImage> {
        let gray = image.to_luma8();
        Ok(DynamicImage::ImageLuma8(preprocessing::binarize(&gray, self.level, self.invert)))
    }

    fn name(&self) -> &str {
        "Fixed Threshold"
    }
}

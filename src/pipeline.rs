use anyhow::Result;
use image::{DynamicImage, GrayImage};
use std::path::PathBuf;
use std::sync::Arc;

/// Debug configuration for pipeline execution
#[derive(Clone, Debug)]
pub struct DebugConfig {
    /// Root directory for debug outputs
    pub output_dir: PathBuf,
}

/// Context available to all pipeline steps
#[derive(Clone, Debug, Default)]
pub struct PipelineContext {
    pub debug: Option<DebugConfig>,
}

/// A single image transformation in the filter pipeline
pub trait PipelineStep: Send + Sync {
    fn process(&self, image: DynamicImage, context: &PipelineContext) -> Result<DynamicImage>;

    /// Human-readable name for this step (used in logs and debug directory names)
    fn name(&self) -> &str;
}

/// Composable filter pipeline turning a raw frame into a binary image
pub struct Pipeline {
    steps: Vec<Arc<dyn PipelineStep>>,
    context: PipelineContext,
}

impl Pipeline {
    /// Create a new empty pipeline
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            context: PipelineContext::default(),
        }
    }

    /// Enable debug mode with output directory
    /// The directory must be empty or non-existent
    pub fn with_debug(mut self, output_dir: PathBuf) -> Result<Self> {
        if output_dir.exists() {
            let entries = std::fs::read_dir(&output_dir)?;
            if entries.count() > 0 {
                return Err(anyhow::anyhow!(
                    "Debug directory is not empty: {}",
                    output_dir.display()
                ));
            }
        } else {
            std::fs::create_dir_all(&output_dir)?;
        }

        self.context.debug = Some(DebugConfig { output_dir });
        Ok(self)
    }

    /// Add a processing step to the pipeline
    pub fn add_step(mut self, step: Arc<dyn PipelineStep>) -> Self {
        self.steps.push(step);
        self
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Run all steps on `input`, naming debug outputs after `label`
    pub fn run_labeled(&self, input: DynamicImage, label: &str) -> Result<DynamicImage> {
        let mut image = input;

        for (step_idx, step) in self.steps.iter().enumerate() {
            log::trace!("Running step: {}", step.name());
            image = step.process(image, &self.context)?;
            self.save_debug_output(step_idx, step.name(), label, &image)?;
        }

        Ok(image)
    }

    /// Run all steps and return the single-channel result.
    ///
    /// Fails if a step changed the frame's dimensions.
    pub fn binarize(&self, frame: &DynamicImage, label: &str) -> Result<GrayImage> {
        let (width, height) = (frame.width(), frame.height());
        let binary = self.run_labeled(frame.clone(), label)?.to_luma8();
        if binary.dimensions() != (width, height) {
            anyhow::bail!(
                "Filter pipeline changed frame size from {}x{} to {}x{}",
                width,
                height,
                binary.width(),
                binary.height()
            );
        }
        Ok(binary)
    }

    fn save_debug_output(&self, step_idx: usize, step_name: &str, label: &str, image: &DynamicImage) -> Result<()> {
        let Some(debug_config) = &self.context.debug else {
            return Ok(());
        };

        let step_dir_name = format!("{:02}_{}", step_idx + 1, step_name.to_lowercase().replace(' ', "_"));
        let step_dir = debug_config.output_dir.join(&step_dir_name);
        std::fs::create_dir_all(&step_dir)?;

        let filename = format!("{}.png", label);
        image
            .save(step_dir.join(&filename))
            .map_err(|e| anyhow::anyhow!("Failed to save debug image: {}", e))?;
        log::debug!("Debug: saved {}/{}", step_dir_name, filename);

        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

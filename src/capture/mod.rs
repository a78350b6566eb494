pub mod source;

use anyhow::{Context, Result, bail};
use image::{DynamicImage, GrayImage, RgbImage};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::annotate;
use crate::config::CaptureConfig;
use crate::detection::{FrameDetections, preprocessing};
use crate::pipeline::Pipeline;
use crate::report::{CaptureSummary, FrameReport, StrategyOutcome};
pub use source::{FrameSource, ImageSequenceSource, MemorySource};

/// Owns an opened frame source and releases it when dropped.
pub struct CaptureSession<S: FrameSource> {
    source: S,
}

impl<S: FrameSource> CaptureSession<S> {
    pub fn open(mut source: S) -> Result<Self> {
        if let Err(e) = source.open() {
            source.release();
            return Err(e.context(format!("Failed to open {}", source.describe())));
        }
        log::info!("Opened {}", source.describe());
        Ok(Self { source })
    }

    pub fn read(&mut self) -> Result<Option<DynamicImage>> {
        self.source.read()
    }
}

impl<S: FrameSource> Drop for CaptureSession<S> {
    fn drop(&mut self) {
        self.source.release();
        log::info!("Released {}", self.source.describe());
    }
}

/// Everything produced for a single frame
pub struct ProcessedFrame {
    pub report: FrameReport,
    /// Mirrored frame with contour rectangles and centroids drawn on it
    pub annotated: RgbImage,
    pub filtered: GrayImage,
}

impl ProcessedFrame {
    /// Write the annotated and filtered images into `dir`
    pub fn save(&self, dir: &Path) -> Result<()> {
        let index = self.report.frame_index;
        let original_path = dir.join(format!("frame_{:06}_original.png", index));
        let filtered_path = dir.join(format!("frame_{:06}_filtered.png", index));

        self.annotated
            .save(&original_path)
            .map_err(|e| anyhow::anyhow!("Failed to save {}: {}", original_path.display(), e))?;
        self.filtered
            .save(&filtered_path)
            .map_err(|e| anyhow::anyhow!("Failed to save {}: {}", filtered_path.display(), e))?;
        Ok(())
    }
}

/// Sequential read → filter → measure → select loop
pub struct CaptureLoop {
    pipeline: Pipeline,
    config: CaptureConfig,
    quit: Arc<AtomicBool>,
}

impl CaptureLoop {
    pub fn new(pipeline: Pipeline, config: CaptureConfig) -> Self {
        Self {
            pipeline,
            config,
            quit: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Share a quit flag with the caller; setting it ends the loop before
    /// the next frame is read.
    pub fn with_quit_flag(mut self, quit: Arc<AtomicBool>) -> Self {
        self.quit = quit;
        self
    }

    pub fn quit_flag(&self) -> Arc<AtomicBool> {
        self.quit.clone()
    }

    /// Mirror, binarize, annotate and run every configured strategy on one frame.
    pub fn process_frame(&self, frame: DynamicImage, frame_index: u64) -> Result<ProcessedFrame> {
        let frame = if self.config.mirror {
            preprocessing::mirror(&frame)
        } else {
            frame
        };
        let (width, height) = (frame.width(), frame.height());

        let filtered = self.pipeline.binarize(&frame, &format!("frame_{:06}", frame_index))?;
        let detections = FrameDetections::analyze(&filtered);

        let mut annotated = frame.to_rgb8();
        annotate::draw_contours(&mut annotated, &detections.contours);

        let selections = self
            .config
            .strategies
            .iter()
            .map(|&strategy| StrategyOutcome::from_selection(strategy, detections.select(strategy)))
            .collect();

        log::debug!(
            "Frame {}: {} contours, {} candidates",
            frame_index,
            detections.contours.len(),
            detections.candidates.len()
        );

        Ok(ProcessedFrame {
            report: FrameReport {
                frame_index,
                width,
                height,
                detections: detections.candidates.len(),
                selections,
            },
            annotated,
            filtered,
        })
    }

    /// Process frames from `source` until it runs dry, the quit flag is set,
    /// or `max_frames` frames have been handled. Reports go to `out`.
    pub fn run<S: FrameSource>(&self, source: S, out: &mut dyn Write) -> Result<CaptureSummary> {
        if let Some(dir) = &self.config.output_dir {
            std::fs::create_dir_all(dir).with_context(|| format!("Failed to create output directory {}", dir.display()))?;
        }

        let mut session = CaptureSession::open(source)?;
        let mut summary = CaptureSummary::default();
        let mut consecutive_failures = 0u32;

        loop {
            if self.quit.load(Ordering::SeqCst) {
                log::info!("Quit requested, stopping capture");
                break;
            }
            if self.config.max_frames.is_some_and(|max| summary.frames >= max) {
                log::info!("Reached frame limit of {}", summary.frames);
                break;
            }

            let read = match session.read() {
                Ok(Some(frame)) if frame.width() == 0 || frame.height() == 0 => Err(anyhow::anyhow!("Empty frame")),
                other => other,
            };

            let frame = match read {
                Ok(Some(frame)) => frame,
                Ok(None) => {
                    log::info!("Frame source exhausted");
                    break;
                }
                Err(e) => {
                    summary.skipped += 1;
                    consecutive_failures += 1;
                    log::warn!("Skipping frame: {:#}", e);
                    if consecutive_failures > self.config.max_consecutive_failures {
                        bail!("Giving up after {} consecutive failed reads", consecutive_failures);
                    }
                    continue;
                }
            };
            consecutive_failures = 0;

            let processed = self.process_frame(frame, summary.frames)?;
            processed.report.write_to(self.config.format, out)?;
            if let Some(dir) = &self.config.output_dir {
                processed.save(dir)?;
            }

            if processed.report.detections > 0 {
                summary.with_candidates += 1;
            }
            summary.frames += 1;
        }

        log::info!(
            "Processed {} frames ({} skipped, {} with candidates)",
            summary.frames,
            summary.skipped,
            summary.with_candidates
        );
        Ok(summary)
    }
}

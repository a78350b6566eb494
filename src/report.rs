use anyhow::Result;
use serde::Serialize;
use std::io::Write;

use crate::config::ReportFormat;
use crate::detection::{DetectionError, SelectionStrategy};
use crate::models::Candidate;

/// Result of one strategy on one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyOutcome {
    pub strategy: SelectionStrategy,
    /// `None` when the frame had no candidates
    pub candidate: Option<Candidate>,
}

impl StrategyOutcome {
    pub fn from_selection(strategy: SelectionStrategy, selection: Result<Vec<Candidate>, DetectionError>) -> Self {
        let candidate = selection.ok().and_then(|selected| selected.into_iter().next());
        Self { strategy, candidate }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameReport {
    pub frame_index: u64,
    pub width: u32,
    pub height: u32,
    pub detections: usize,
    pub selections: Vec<StrategyOutcome>,
}

impl FrameReport {
    pub fn write_to(&self, format: ReportFormat, out: &mut dyn Write) -> Result<()> {
        match format {
            ReportFormat::Text => {
                writeln!(
                    out,
                    "frame {} ({}x{}): {} detections",
                    self.frame_index, self.width, self.height, self.detections
                )?;
                for outcome in &self.selections {
                    match &outcome.candidate {
                        Some((detection, centroid)) => {
                            writeln!(out, "  {}: {} centroid {}", outcome.strategy, detection, centroid)?
                        }
                        None => writeln!(out, "  {}: {}", outcome.strategy, DetectionError::NoCandidates)?,
                    }
                }
                writeln!(out)?;
            }
            ReportFormat::Json => {
                serde_json::to_writer(&mut *out, self)?;
                writeln!(out)?;
            }
        }
        Ok(())
    }
}

/// Totals for a finished capture run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CaptureSummary {
    /// Frames read and processed
    pub frames: u64,
    /// Failed reads that were skipped
    pub skipped: u64,
    /// Processed frames with at least one candidate
    pub with_candidates: u64,
}

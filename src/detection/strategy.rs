use clap::ValueEnum;
use serde::Serialize;
use std::fmt;

use crate::detection::DetectionError;
use crate::models::Candidate;

/// How a single candidate is picked from a frame's detections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionStrategy {
    /// Largest `width * height`
    LargestArea,
    /// Smallest centered `x` offset. The vertical offset is ignored.
    ClosestToCenterX,
}

impl SelectionStrategy {
    pub const ALL: [SelectionStrategy; 2] = [SelectionStrategy::LargestArea, SelectionStrategy::ClosestToCenterX];

    pub fn name(&self) -> &'static str {
        match self {
            SelectionStrategy::LargestArea => "largest-area",
            SelectionStrategy::ClosestToCenterX => "closest-to-center-x",
        }
    }

    /// Pick one candidate. Ties go to the first candidate encountered.
    ///
    /// Returns a one-element list, or `NoCandidates` for empty input.
    pub fn select(&self, candidates: Vec<Candidate>) -> Result<Vec<Candidate>, DetectionError> {
        let mut best: Option<(usize, i128)> = None;

        for (idx, (detection, _)) in candidates.iter().enumerate() {
            let bbox = &detection.bounding_box;
            // Lower score wins
            let score = match self {
                SelectionStrategy::LargestArea => -(bbox.area() as i128),
                SelectionStrategy::ClosestToCenterX => bbox.x as i128,
            };
            match best {
                Some((_, best_score)) if best_score <= score => {}
                _ => best = Some((idx, score)),
            }
        }

        let (idx, _) = best.ok_or(DetectionError::NoCandidates)?;
        let chosen = candidates.into_iter().nth(idx).ok_or(DetectionError::NoCandidates)?;
        Ok(vec![chosen])
    }
}

impl fmt::Display for SelectionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

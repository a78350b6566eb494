//! Frame sources feeding the capture loop.
//!
//! A source is opened once, read until it reports exhaustion, and released
//! exactly once. A failed read affects only that frame; the next call to
//! `read` moves on to the following frame.

use anyhow::{Context, Result, anyhow, bail};
use image::DynamicImage;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// File extensions recognised when scanning a frame directory
pub const FRAME_EXTENSIONS: [&str; 8] = ["png", "jpg", "jpeg", "bmp", "gif", "tif", "tiff", "webp"];

pub trait FrameSource {
    /// Acquire the source. Called once before the first read.
    fn open(&mut self) -> Result<()>;

    /// Read the next frame. `Ok(None)` means the source is exhausted.
    fn read(&mut self) -> Result<Option<DynamicImage>>;

    /// Release the source. Must be safe to call more than once.
    fn release(&mut self);

    fn describe(&self) -> String;
}

/// Frames read from image files, in order.
///
/// Directories contribute their image files sorted by file name; plain
/// files are taken as given.
pub struct ImageSequenceSource {
    inputs: Vec<PathBuf>,
    pending: VecDeque<PathBuf>,
    opened: bool,
}

impl ImageSequenceSource {
    pub fn new(inputs: Vec<PathBuf>) -> Self {
        Self {
            inputs,
            pending: VecDeque::new(),
            opened: false,
        }
    }

    /// Files still waiting to be read
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

fn is_frame_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| FRAME_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

fn list_frame_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("Failed to read frame directory {}", dir.display()))? {
        let path = entry?.path();
        if path.is_file() && is_frame_file(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

impl FrameSource for ImageSequenceSource {
    fn open(&mut self) -> Result<()> {
        let mut frames = VecDeque::new();
        for input in &self.inputs {
            if input.is_dir() {
                frames.extend(list_frame_files(input)?);
            } else if input.is_file() {
                frames.push_back(input.clone());
            } else {
                bail!("Frame input not found: {}", input.display());
            }
        }

        if frames.is_empty() {
            bail!("No frames found in {}", self.describe());
        }

        log::debug!("Queued {} frame files", frames.len());
        self.pending = frames;
        self.opened = true;
        Ok(())
    }

    fn read(&mut self) -> Result<Option<DynamicImage>> {
        if !self.opened {
            return Err(anyhow!("Frame source read before it was opened"));
        }
        let Some(path) = self.pending.pop_front() else {
            return Ok(None);
        };
        let frame = image::open(&path).with_context(|| format!("Failed to decode frame {}", path.display()))?;
        Ok(Some(frame))
    }

    fn release(&mut self) {
        if self.opened {
            self.pending.clear();
            self.opened = false;
        }
    }

    fn describe(&self) -> String {
        let names: Vec<String> = self.inputs.iter().map(|p| p.display().to_string()).collect();
        format!("image sequence [{}]", names.join(", "))
    }
}

/// Frames held in memory. Failed reads can be queued between frames.
#[derive(Default)]
pub struct MemorySource {
    frames: VecDeque<std::result::Result<DynamicImage, String>>,
    released: Arc<AtomicBool>,
}

impl MemorySource {
    pub fn new(frames: Vec<DynamicImage>) -> Self {
        Self {
            frames: frames.into_iter().map(Ok).collect(),
            released: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn push_frame(&mut self, frame: DynamicImage) {
        self.frames.push_back(Ok(frame));
    }

    /// Queue a read that fails with `message`
    pub fn push_failure(&mut self, message: impl Into<String>) {
        self.frames.push_back(Err(message.into()));
    }

    /// Flag set once the source has been released
    pub fn released_flag(&self) -> Arc<AtomicBool> {
        self.released.clone()
    }
}

impl FrameSource for MemorySource {
    fn open(&mut self) -> Result<()> {
        self.released.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn read(&mut self) -> Result<Option<DynamicImage>> {
        match self.frames.pop_front() {
            Some(Ok(frame)) => Ok(Some(frame)),
            Some(Err(message)) => Err(anyhow!(message)),
            None => Ok(None),
        }
    }

    fn release(&mut self) {
        self.frames.clear();
        self.released.store(true, Ordering::SeqCst);
    }

    fn describe(&self) -> String {
        format!("memory source ({} queued)", self.frames.len())
    }
}

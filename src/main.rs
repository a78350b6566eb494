use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use cansight::{
    CaptureConfig, CaptureLoop, FilterConfig, ImageSequenceSource, ReportFormat, SelectionStrategy,
    build_standard_pipeline,
};

#[derive(Parser)]
#[command(name = "cansight")]
#[command(about = "Find object contours in frames and pick a target candidate")]
struct Cli {
    /// Image files or directories of frames, processed in order
    #[arg(value_name = "INPUT", required = true)]
    inputs: Vec<PathBuf>,

    /// Selection strategy to report (repeatable, default: all)
    #[arg(short, long, value_enum)]
    strategy: Vec<SelectionStrategy>,

    /// Write annotated and filtered frames to this directory
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Save every filter step's output to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,

    /// Stop after this many frames
    #[arg(long, value_name = "N")]
    max_frames: Option<u64>,

    /// Do not mirror frames horizontally
    #[arg(long)]
    no_mirror: bool,

    /// Gaussian blur sigma applied before thresholding (0 disables)
    #[arg(long, default_value_t = 1.0)]
    blur_sigma: f32,

    /// Fixed threshold level instead of Otsu's method
    #[arg(long, value_name = "LEVEL")]
    threshold: Option<u8>,

    /// Treat dark pixels as foreground
    #[arg(long)]
    invert: bool,

    /// Consecutive failed reads tolerated before giving up
    #[arg(long, default_value_t = 3)]
    max_failures: u32,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let filter = FilterConfig::default()
        .with_blur_sigma(args.blur_sigma)
        .with_threshold(args.threshold)
        .with_invert(args.invert);

    let mut pipeline = build_standard_pipeline(&filter);
    if let Some(debug_dir) = args.debug_out {
        pipeline = pipeline.with_debug(debug_dir)?;
    }
    log::debug!("Filter pipeline: {}", pipeline.step_names().join(" -> "));

    let config = CaptureConfig::default()
        .with_mirror(!args.no_mirror)
        .with_max_frames(args.max_frames)
        .with_max_consecutive_failures(args.max_failures)
        .with_output_dir(args.output_dir)
        .with_strategies(args.strategy)
        .with_format(args.format);

    let quit = Arc::new(AtomicBool::new(false));
    let handler_flag = quit.clone();
    ctrlc::set_handler(move || {
        handler_flag.store(true, Ordering::SeqCst);
    })?;

    let capture = CaptureLoop::new(pipeline, config).with_quit_flag(quit);
    let source = ImageSequenceSource::new(args.inputs);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    capture.run(source, &mut out)?;

    Ok(())
}

mod common;

use cansight::{CaptureSession, FrameSource, ImageSequenceSource, build_standard_pipeline};
use common::*;
use image::DynamicImage;
use std::sync::atomic::Ordering;

fn capture_loop(config: CaptureConfig) -> CaptureLoop {
    CaptureLoop::new(build_standard_pipeline(&FilterConfig::default()), config)
}

fn two_blob_frame() -> DynamicImage {
    bright_frame(100, 60, &[(10, 10, 15, 15), (60, 20, 30, 30)])
}

#[test]
fn test_runs_until_source_exhausted() -> anyhow::Result<()> {
    let source = MemorySource::new(vec![two_blob_frame(), two_blob_frame()]);
    let released = source.released_flag();
    let mut out = Vec::new();

    let summary = capture_loop(CaptureConfig::default()).run(source, &mut out)?;

    assert_eq!(summary.frames, 2);
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.with_candidates, 2);
    assert!(released.load(Ordering::SeqCst));

    let text = String::from_utf8(out)?;
    assert!(text.contains("frame 0 (100x60): 2 detections"));
    assert!(text.contains("  largest-area: Can 1.00"));
    assert!(text.contains("  closest-to-center-x: Can 1.00"));
    Ok(())
}

#[test]
fn test_frame_without_objects_reports_no_candidates() -> anyhow::Result<()> {
    let source = MemorySource::new(vec![bright_frame(50, 50, &[])]);
    let mut out = Vec::new();

    let summary = capture_loop(CaptureConfig::default()).run(source, &mut out)?;

    assert_eq!(summary.frames, 1);
    assert_eq!(summary.with_candidates, 0);
    let text = String::from_utf8(out)?;
    assert!(text.contains("largest-area: no candidates found"));
    assert!(text.contains("closest-to-center-x: no candidates found"));
    Ok(())
}

#[test]
fn test_mirroring_flips_centroids() -> anyhow::Result<()> {
    let frame = bright_frame(100, 40, &[(10, 10, 10, 10)]);

    let mirrored = capture_loop(CaptureConfig::default()).process_frame(frame.clone(), 0)?;
    let plain = capture_loop(CaptureConfig::default().with_mirror(false)).process_frame(frame, 0)?;

    let (_, mirrored_centroid) = mirrored.report.selections[0].candidate.clone().unwrap();
    let (_, plain_centroid) = plain.report.selections[0].candidate.clone().unwrap();
    assert!(mirrored_centroid.x > 50);
    assert!(plain_centroid.x < 50);
    assert_eq!(mirrored.annotated.dimensions(), (100, 40));
    assert_eq!(mirrored.filtered.dimensions(), (100, 40));
    Ok(())
}

#[test]
fn test_strategies_follow_config() -> anyhow::Result<()> {
    let config = CaptureConfig::default().with_strategies(vec![SelectionStrategy::ClosestToCenterX]);
    let processed = capture_loop(config).process_frame(two_blob_frame(), 7)?;

    assert_eq!(processed.report.frame_index, 7);
    assert_eq!(processed.report.detections, 2);
    assert_eq!(processed.report.selections.len(), 1);
    assert_eq!(processed.report.selections[0].strategy, SelectionStrategy::ClosestToCenterX);
    Ok(())
}

#[test]
fn test_failed_reads_are_skipped() -> anyhow::Result<()> {
    let mut source = MemorySource::new(vec![two_blob_frame()]);
    source.push_failure("camera hiccup");
    source.push_frame(DynamicImage::new_rgb8(0, 0));
    source.push_frame(two_blob_frame());

    let summary = capture_loop(CaptureConfig::default()).run(source, &mut std::io::sink())?;

    assert_eq!(summary.frames, 2);
    assert_eq!(summary.skipped, 2);
    Ok(())
}

#[test]
fn test_too_many_failures_is_fatal() {
    let mut source = MemorySource::new(Vec::new());
    source.push_failure("gone");
    source.push_failure("still gone");
    source.push_frame(two_blob_frame());
    let released = source.released_flag();

    let config = CaptureConfig::default().with_max_consecutive_failures(1);
    let result = capture_loop(config).run(source, &mut std::io::sink());

    assert!(result.is_err());
    assert!(released.load(Ordering::SeqCst));
}

#[test]
fn test_quit_flag_stops_before_reading() -> anyhow::Result<()> {
    let source = MemorySource::new(vec![two_blob_frame()]);
    let capture = capture_loop(CaptureConfig::default());
    capture.quit_flag().store(true, Ordering::SeqCst);

    let summary = capture.run(source, &mut std::io::sink())?;
    assert_eq!(summary.frames, 0);
    Ok(())
}

#[test]
fn test_max_frames() -> anyhow::Result<()> {
    let source = MemorySource::new(vec![two_blob_frame(), two_blob_frame(), two_blob_frame()]);
    let config = CaptureConfig::default().with_max_frames(Some(1));

    let summary = capture_loop(config).run(source, &mut std::io::sink())?;
    assert_eq!(summary.frames, 1);
    Ok(())
}

#[test]
fn test_output_dir_receives_frames() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let out_dir = dir.path().join("frames");
    let config = CaptureConfig::default().with_output_dir(Some(out_dir.clone()));
    let source = MemorySource::new(vec![two_blob_frame(), two_blob_frame()]);

    capture_loop(config).run(source, &mut std::io::sink())?;

    assert!(out_dir.join("frame_000000_original.png").is_file());
    assert!(out_dir.join("frame_000000_filtered.png").is_file());
    assert!(out_dir.join("frame_000001_original.png").is_file());
    assert!(out_dir.join("frame_000001_filtered.png").is_file());
    Ok(())
}

#[test]
fn test_json_report_lines() -> anyhow::Result<()> {
    let config = CaptureConfig::default().with_format(ReportFormat::Json);
    let source = MemorySource::new(vec![two_blob_frame(), bright_frame(20, 20, &[])]);
    let mut out = Vec::new();

    capture_loop(config).run(source, &mut out)?;

    let lines: Vec<serde_json::Value> = String::from_utf8(out)?
        .lines()
        .map(|line| serde_json::from_str::<serde_json::Value>(line))
        .collect::<Result<_, _>>()?;
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["detections"], 2);
    assert_eq!(lines[0]["selections"][0]["strategy"], "largest-area");
    assert_eq!(lines[0]["selections"][0]["candidate"][0]["category"], "Can");
    assert!(lines[1]["selections"][1]["candidate"].is_null());
    Ok(())
}

#[test]
fn test_session_releases_on_drop() -> anyhow::Result<()> {
    let source = MemorySource::new(vec![two_blob_frame()]);
    let released = source.released_flag();

    {
        let mut session = CaptureSession::open(source)?;
        assert!(session.read()?.is_some());
        assert!(!released.load(Ordering::SeqCst));
    }

    assert!(released.load(Ordering::SeqCst));
    Ok(())
}

#[test]
fn test_image_sequence_reads_directory_in_order() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    bright_frame(30, 20, &[]).save(dir.path().join("b.png"))?;
    bright_frame(40, 20, &[]).save(dir.path().join("a.png"))?;
    std::fs::write(dir.path().join("notes.txt"), "not a frame")?;

    let mut source = ImageSequenceSource::new(vec![dir.path().to_path_buf()]);
    source.open()?;
    assert_eq!(source.remaining(), 2);

    assert_eq!(source.read()?.map(|f| f.width()), Some(40));
    assert_eq!(source.read()?.map(|f| f.width()), Some(30));
    assert!(source.read()?.is_none());
    source.release();
    Ok(())
}

#[test]
fn test_image_sequence_missing_input() {
    let mut source = ImageSequenceSource::new(vec!["/definitely/not/here.png".into()]);
    assert!(source.open().is_err());
}

#[test]
fn test_image_sequence_empty_directory() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let mut source = ImageSequenceSource::new(vec![dir.path().to_path_buf()]);
    assert!(source.open().is_err());
    Ok(())
}

#[test]
fn test_corrupt_file_is_skipped() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    std::fs::write(dir.path().join("00_broken.png"), b"not really a png")?;
    two_blob_frame().save(dir.path().join("01_good.png"))?;

    let source = ImageSequenceSource::new(vec![dir.path().to_path_buf()]);
    let summary = capture_loop(CaptureConfig::default()).run(source, &mut std::io::sink())?;

    assert_eq!(summary.frames, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.with_candidates, 1);
    Ok(())
}

use image::{GrayImage, imageops};
use imageproc::contours::{BorderType, find_contours};
use imageproc::point::Point;

/// Find the outermost contours in a binary image.
///
/// Any non-zero pixel counts as foreground. Hole borders and every contour
/// nested inside a hole are dropped, so only top-level outer borders remain.
/// Contours come back in the order imageproc traces them (raster order of
/// their first border pixel).
pub fn find_external_contours(binary: &GrayImage) -> Vec<Vec<Point<i32>>> {
    // Trace on a copy with a one-pixel background border, so blobs touching
    // the image edge (or filling it) still get an outer border.
    let (width, height) = binary.dimensions();
    let mut padded = GrayImage::new(width + 2, height + 2);
    imageops::replace(&mut padded, binary, 1, 1);

    find_contours::<i32>(&padded)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .map(|c| c.points.into_iter().map(|p| Point::new(p.x - 1, p.y - 1)).collect::<Vec<_>>())
        .filter(|points| !points.is_empty())
        .collect()
}

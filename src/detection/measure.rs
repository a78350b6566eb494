use imageproc::geometry::min_area_rect;
use imageproc::point::Point;
use imageproc::rect::Rect;

use crate::detection::moments::Moments;
use crate::models::{BoundingBox, Centroid};

/// Tight axis-aligned rectangle around a contour, in image pixels.
///
/// Extents are inclusive: a single point gives a 1x1 rectangle.
/// Returns `None` for an empty contour.
pub fn bounding_rect(contour: &[Point<i32>]) -> Option<Rect> {
    let first = contour.first()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);

    for p in &contour[1..] {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    let width = (max_x - min_x + 1) as u32;
    let height = (max_y - min_y + 1) as u32;
    Some(Rect::at(min_x, min_y).of_size(width, height))
}

/// Minimum-area rectangle around a contour at any orientation, as its four
/// corners. Only used for drawing.
pub fn rotated_rect(contour: &[Point<i32>]) -> Option<[Point<i32>; 4]> {
    if contour.is_empty() {
        return None;
    }
    Some(min_area_rect(contour))
}

/// Centroid of a contour, or `None` if the contour encloses no area.
pub fn centroid(contour: &[Point<i32>]) -> Option<Centroid> {
    Moments::of_contour(contour)
        .centroid()
        .map(|(x, y)| Centroid { x, y })
}

/// Measure a contour found in an image of the given size.
///
/// The returned box carries the centroid's offset from the image center in
/// `x`/`y` and the axis-aligned rectangle's extents in `width`/`height`.
/// Degenerate contours (zero area) yield `None`.
pub fn measure(contour: &[Point<i32>], image_width: u32, image_height: u32) -> Option<(BoundingBox, Centroid)> {
    let centroid = centroid(contour)?;
    let rect = bounding_rect(contour)?;

    let center_x = (image_width / 2) as i32;
    let center_y = (image_height / 2) as i32;

    let bbox = BoundingBox {
        x: centroid.x - center_x,
        y: centroid.y - center_y,
        width: rect.width(),
        height: rect.height(),
    };

    Some((bbox, centroid))
}

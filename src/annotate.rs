use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};
use imageproc::point::Point;

use crate::detection::measure;

pub const RECT_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
pub const CENTROID_COLOR: Rgb<u8> = Rgb([255, 0, 255]);
pub const CENTROID_RADIUS: i32 = 5;

/// Draw the minimum-area rectangle of every contour, plus a centroid dot for
/// each contour that encloses any area.
pub fn draw_contours(img: &mut RgbImage, contours: &[Vec<Point<i32>>]) {
    for contour in contours {
        if let Some(corners) = measure::rotated_rect(contour) {
            draw_rotated_rect(img, &corners, RECT_COLOR);
        }
        if let Some(c) = measure::centroid(contour) {
            draw_filled_circle_mut(img, (c.x, c.y), CENTROID_RADIUS, CENTROID_COLOR);
        }
    }
}

/// Draw a closed quadrilateral through `corners`
pub fn draw_rotated_rect(img: &mut RgbImage, corners: &[Point<i32>; 4], color: Rgb<u8>) {
    for i in 0..corners.len() {
        let a = corners[i];
        let b = corners[(i + 1) % corners.len()];
        // Two passes, one pixel apart, for a 2px stroke
        for offset in [0.0, 1.0] {
            draw_line_segment_mut(
                img,
                (a.x as f32 + offset, a.y as f32),
                (b.x as f32 + offset, b.y as f32),
                color,
            );
        }
    }
}

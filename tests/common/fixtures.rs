use cansight::{BoundingBox, Candidate, Centroid, Detection};
use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};
use imageproc::point::Point;

/// Axis-aligned rectangle as (x, y, width, height)
pub type Block = (u32, u32, u32, u32);

/// All-black binary image
pub fn blank(width: u32, height: u32) -> GrayImage {
    GrayImage::new(width, height)
}

/// Set every pixel of `rect` to `value`
pub fn fill_rect(img: &mut GrayImage, (x, y, w, h): Block, value: u8) {
    for py in y..y + h {
        for px in x..x + w {
            img.put_pixel(px, py, Luma([value]));
        }
    }
}

/// Binary image with white filled rectangles on black
pub fn binary_with_rects(width: u32, height: u32, rects: &[Block]) -> GrayImage {
    let mut img = blank(width, height);
    for &rect in rects {
        fill_rect(&mut img, rect, 255);
    }
    img
}

/// Color frame with `fg` rectangles on a `bg` background
pub fn frame_with_rects(width: u32, height: u32, rects: &[Block], fg: [u8; 3], bg: [u8; 3]) -> DynamicImage {
    let mut img = RgbImage::from_pixel(width, height, Rgb(bg));
    for &(x, y, w, h) in rects {
        for py in y..y + h {
            for px in x..x + w {
                img.put_pixel(px, py, Rgb(fg));
            }
        }
    }
    DynamicImage::ImageRgb8(img)
}

/// White rectangles on a black color frame
pub fn bright_frame(width: u32, height: u32, rects: &[Block]) -> DynamicImage {
    frame_with_rects(width, height, rects, [255, 255, 255], [0, 0, 0])
}

/// Corner points of a rectangle, clockwise in image coordinates
pub fn rect_contour(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<Point<i32>> {
    vec![
        Point::new(x0, y0),
        Point::new(x1, y0),
        Point::new(x1, y1),
        Point::new(x0, y1),
    ]
}

/// Candidate with the given centered x offset and box size
pub fn candidate(x: i32, width: u32, height: u32) -> Candidate {
    candidate_at(x, 0, width, height)
}

pub fn candidate_at(x: i32, y: i32, width: u32, height: u32) -> Candidate {
    let bbox = BoundingBox { x, y, width, height };
    (Detection::new(bbox), Centroid { x: x + 50, y: y + 50 })
}

use serde::Serialize;
use std::fmt;

/// Category assigned to every contour-based detection.
pub const DEFAULT_CATEGORY: &str = "Can";

/// Confidence assigned to every contour-based detection.
pub const DEFAULT_SCORE: f32 = 1.0;

/// Bounding box of a detected object.
///
/// `x` and `y` are the offset of the object's centroid from the image
/// center; `width` and `height` are the extents of its axis-aligned
/// rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(x={}, y={}, w={}, h={})", self.x, self.y, self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detection {
    pub category: String,
    pub score: f32,
    pub bounding_box: BoundingBox,
}

impl Detection {
    pub fn new(bounding_box: BoundingBox) -> Self {
        Self {
            category: DEFAULT_CATEGORY.to_string(),
            score: DEFAULT_SCORE,
            bounding_box,
        }
    }
}

impl fmt::Display for Detection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.2} {}", self.category, self.score, self.bounding_box)
    }
}

/// Centroid in image pixel coordinates (not center-relative)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Centroid {
    pub x: i32,
    pub y: i32,
}

impl fmt::Display for Centroid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A detection paired with the centroid of the contour it came from.
pub type Candidate = (Detection, Centroid);

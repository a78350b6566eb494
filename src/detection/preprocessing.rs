use image::{DynamicImage, GrayImage};
use imageproc::contrast::{otsu_level, threshold, ThresholdType};
use imageproc::filter::gaussian_blur_f32;

/// Mirror image horizontally
pub fn mirror(img: &DynamicImage) -> DynamicImage {
    img.fliph()
}

/// Convert image to grayscale
pub fn to_grayscale(img: &DynamicImage) -> GrayImage {
    img.to_luma8()
}

/// Apply Gaussian blur to reduce noise
pub fn apply_blur(img: &GrayImage, sigma: f32) -> GrayImage {
    gaussian_blur_f32(img, sigma)
}

/// Binarize at a fixed level: pixels above `level` become 255, the rest 0.
/// `invert` swaps foreground and background.
pub fn binarize(img: &GrayImage, level: u8, invert: bool) -> GrayImage {
    let threshold_type = if invert {
        ThresholdType::BinaryInverted
    } else {
        ThresholdType::Binary
    };
    threshold(img, level, threshold_type)
}

/// Binarize at the level chosen by Otsu's method
pub fn binarize_otsu(img: &GrayImage, invert: bool) -> GrayImage {
    binarize(img, otsu_level(img), invert)
}

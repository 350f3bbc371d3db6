// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Multi-factor image quality scoring: sharpness (Laplacian variance),
// contrast (grayscale standard deviation), and glare (blown-out highlight
// fraction), combined into one normalized composite score.

use image::{GrayImage, RgbImage};
use imageproc::filter::laplacian_filter;
use tracing::{debug, instrument};

/// Sub-score weights. Fixed — they must sum to 1.0 so the composite stays
/// inside [0, 1].
pub const BLUR_WEIGHT: f64 = 0.5;
pub const CONTRAST_WEIGHT: f64 = 0.3;
pub const GLARE_WEIGHT: f64 = 0.2;

/// Laplacian variance at or below this scores 0; at or above
/// `BLUR_FLOOR + BLUR_RANGE` it scores 1.
const BLUR_FLOOR: f64 = 60.0;
const BLUR_RANGE: f64 = 120.0;

/// Grayscale standard deviation mapped linearly over [30, 90].
const CONTRAST_FLOOR: f64 = 30.0;
const CONTRAST_RANGE: f64 = 60.0;

/// A pixel whose HSV value channel exceeds this is a blown-out highlight.
const GLARE_VALUE_CUTOFF: u8 = 245;

/// Sub-scores and their weighted composite, each clamped to [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityAssessment {
    pub blur: f64,
    pub contrast: f64,
    pub glare: f64,
    pub composite: f64,
}

/// Score an image for intake suitability. Pure read of pixel data.
#[instrument(skip(image), fields(width = image.width(), height = image.height()))]
pub fn assess(image: &RgbImage) -> QualityAssessment {
    let gray = image::imageops::grayscale(image);
    let blur = blur_score(&gray);
    let contrast = contrast_score(&gray);
    let glare = glare_score(image);
    let composite = BLUR_WEIGHT * blur + CONTRAST_WEIGHT * contrast + GLARE_WEIGHT * glare;
    debug!(blur, contrast, glare, composite, "quality assessed");
    QualityAssessment {
        blur,
        contrast,
        glare,
        composite,
    }
}

/// Sharpness proxy: variance of the Laplacian response. Sharp edges produce
/// a high-variance response; defocus flattens it.
fn blur_score(gray: &GrayImage) -> f64 {
    let response = laplacian_filter(gray);
    let variance = variance(response.iter().map(|&value| value as f64));
    ((variance - BLUR_FLOOR) / BLUR_RANGE).clamp(0.0, 1.0)
}

/// Global contrast: standard deviation of the grayscale intensities.
fn contrast_score(gray: &GrayImage) -> f64 {
    let sigma = variance(gray.iter().map(|&value| value as f64)).sqrt();
    ((sigma - CONTRAST_FLOOR) / CONTRAST_RANGE).clamp(0.0, 1.0)
}

/// Glare penalty: the fraction of pixels whose HSV value channel (the max of
/// the RGB channels) is blown out. A quarter of the frame blown out already
/// scores 0.
fn glare_score(image: &RgbImage) -> f64 {
    let total = image.width() as f64 * image.height() as f64;
    if total == 0.0 {
        return 0.0;
    }
    let blown = image
        .pixels()
        .filter(|pixel| pixel.0.into_iter().max().unwrap_or(0) > GLARE_VALUE_CUTOFF)
        .count() as f64;
    (1.0 - 4.0 * blown / total).clamp(0.0, 1.0)
}

fn variance(values: impl Iterator<Item = f64>) -> f64 {
    let mut count = 0u64;
    let mut sum = 0.0f64;
    let mut sum_squares = 0.0f64;
    for value in values {
        count += 1;
        sum += value;
        sum_squares += value * value;
    }
    if count == 0 {
        return 0.0;
    }
    let mean = sum / count as f64;
    (sum_squares / count as f64 - mean * mean).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn checkerboard(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            if (x + y) % 2 == 0 {
                Rgb([255u8, 255, 255])
            } else {
                Rgb([0u8, 0, 0])
            }
        })
    }

    #[test]
    fn weights_sum_to_one() {
        assert_eq!(BLUR_WEIGHT + CONTRAST_WEIGHT + GLARE_WEIGHT, 1.0);
    }

    #[test]
    fn uniform_image_scores_flat() {
        let flat = RgbImage::from_pixel(32, 32, Rgb([128u8, 128, 128]));
        let assessment = assess(&flat);
        // No edges, no spread, no highlights.
        assert_eq!(assessment.blur, 0.0);
        assert_eq!(assessment.contrast, 0.0);
        assert_eq!(assessment.glare, 1.0);
        assert!((assessment.composite - GLARE_WEIGHT).abs() < 1e-9);
    }

    #[test]
    fn checkerboard_is_sharp_contrasty_and_blown_out() {
        let board = checkerboard(32, 32);
        let assessment = assess(&board);
        assert_eq!(assessment.blur, 1.0);
        assert_eq!(assessment.contrast, 1.0);
        // Half the pixels are pure white — far past the 25% glare ceiling.
        assert_eq!(assessment.glare, 0.0);
        assert!((assessment.composite - (BLUR_WEIGHT + CONTRAST_WEIGHT)).abs() < 1e-9);
    }

    #[test]
    fn composite_is_the_weighted_sum_and_clamped() {
        let gradient = RgbImage::from_fn(64, 64, |x, _| {
            let value = (x * 4) as u8;
            Rgb([value, value, value])
        });
        let assessment = assess(&gradient);
        for score in [
            assessment.blur,
            assessment.contrast,
            assessment.glare,
            assessment.composite,
        ] {
            assert!((0.0..=1.0).contains(&score), "score {score} out of range");
        }
        let expected = BLUR_WEIGHT * assessment.blur
            + CONTRAST_WEIGHT * assessment.contrast
            + GLARE_WEIGHT * assessment.glare;
        assert!((assessment.composite - expected).abs() < 1e-12);
    }

    #[test]
    fn variance_of_constant_sequence_is_zero() {
        assert_eq!(variance([5.0, 5.0, 5.0].into_iter()), 0.0);
        assert_eq!(variance(std::iter::empty()), 0.0);
    }
}

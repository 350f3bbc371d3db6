// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Skew detection and correction for scanned document images.
//
// The skew angle is estimated from the minimum-area bounding rectangle of the
// foreground (bright) pixels after Otsu binarization, then the image is
// rotated about its center to straighten the text. Rotation preserves the
// original dimensions and replicates edge pixels for out-of-bounds samples,
// so the corrected image feeds into quality scoring without artificial
// borders.

use image::{Rgb, RgbImage};
use imageproc::contrast::{ThresholdType, otsu_level, threshold};
use imageproc::geometry::min_area_rect;
use imageproc::point::Point;
use tracing::{debug, instrument};

/// Rotations smaller than this are skipped — resampling would only blur.
const MIN_ROTATION_DEGREES: f32 = 0.01;

/// A deskewed image together with the correction that was applied.
pub struct Deskewed {
    /// The rotated image, same dimensions as the input.
    pub image: RgbImage,
    /// Absolute value of the applied correction angle, in degrees.
    pub angle: f32,
}

/// Straighten a scanned document image.
///
/// Returns the corrected image and the absolute skew angle that was detected.
/// An image with no detectable foreground (e.g. a blank page) is returned
/// unchanged with angle 0.
#[instrument(skip(image), fields(width = image.width(), height = image.height()))]
pub fn deskew(image: &RgbImage) -> Deskewed {
    let gray = image::imageops::grayscale(image);
    let level = otsu_level(&gray);
    let binary = threshold(&gray, level, ThresholdType::Binary);

    let foreground: Vec<Point<i32>> = binary
        .enumerate_pixels()
        .filter(|(_, _, pixel)| pixel.0[0] > 0)
        .map(|(x, y, _)| Point::new(x as i32, y as i32))
        .collect();

    // min_area_rect needs a non-degenerate hull.
    if foreground.len() < 3 {
        debug!("no foreground pixels detected; skipping rotation");
        return Deskewed {
            image: image.clone(),
            angle: 0.0,
        };
    }

    let corners = min_area_rect(&foreground);
    let raw = rect_angle(&corners);
    let corrected = correct_angle(raw);
    debug!(raw, corrected, "skew angle estimated");

    let rotated = if corrected.abs() < MIN_ROTATION_DEGREES {
        image.clone()
    } else {
        rotate_about_center_clamped(image, corrected)
    };

    Deskewed {
        image: rotated,
        angle: corrected.abs(),
    }
}

/// Angle of a min-area rectangle's major axis, folded into [-90, 0) degrees.
fn rect_angle(corners: &[Point<i32>; 4]) -> f32 {
    let first = (corners[1].x - corners[0].x, corners[1].y - corners[0].y);
    let second = (corners[2].x - corners[1].x, corners[2].y - corners[1].y);
    let length2 = |(dx, dy): (i32, i32)| (dx as i64 * dx as i64 + dy as i64 * dy as i64);
    let (dx, dy) = if length2(first) >= length2(second) {
        first
    } else {
        second
    };

    let mut angle = (dy as f32).atan2(dx as f32).to_degrees();
    // The rectangle is symmetric under 180° rotation; fold to [-90, 90).
    if angle >= 90.0 {
        angle -= 180.0;
    } else if angle < -90.0 {
        angle += 180.0;
    }
    // Express as the conventional [-90, 0) box angle.
    if angle >= 0.0 { angle - 90.0 } else { angle }
}

/// Turn the raw box angle into the correction to apply, such that
/// near-horizontal text yields small absolute corrections.
fn correct_angle(raw: f32) -> f32 {
    if raw < -45.0 { -(90.0 + raw) } else { -raw }
}

/// Rotate about the image center by `degrees`, keeping the original
/// dimensions. Bicubic (Catmull-Rom) resampling; out-of-bounds samples clamp
/// to the nearest edge pixel.
fn rotate_about_center_clamped(image: &RgbImage, degrees: f32) -> RgbImage {
    let (width, height) = image.dimensions();
    let cx = width as f32 / 2.0;
    let cy = height as f32 / 2.0;
    let (sin, cos) = degrees.to_radians().sin_cos();

    RgbImage::from_fn(width, height, |x, y| {
        // Inverse mapping: rotate the output coordinate back onto the source.
        let dx = x as f32 + 0.5 - cx;
        let dy = y as f32 + 0.5 - cy;
        let src_x = cos * dx + sin * dy + cx - 0.5;
        let src_y = -sin * dx + cos * dy + cy - 0.5;
        sample_bicubic(image, src_x, src_y)
    })
}

/// Catmull-Rom bicubic sample at fractional coordinates, clamped to bounds.
fn sample_bicubic(image: &RgbImage, x: f32, y: f32) -> Rgb<u8> {
    let x0 = x.floor();
    let y0 = y.floor();
    let wx = cubic_weights(x - x0);
    let wy = cubic_weights(y - y0);

    let mut acc = [0.0f32; 3];
    for (j, weight_y) in wy.iter().enumerate() {
        let py = y0 as i64 + j as i64 - 1;
        for (i, weight_x) in wx.iter().enumerate() {
            let px = x0 as i64 + i as i64 - 1;
            let pixel = clamped_pixel(image, px, py);
            let weight = weight_x * weight_y;
            for (channel, value) in acc.iter_mut().zip(pixel.0) {
                *channel += weight * value as f32;
            }
        }
    }

    Rgb(acc.map(|value| value.round().clamp(0.0, 255.0) as u8))
}

/// Catmull-Rom spline weights for the four taps around a fraction t ∈ [0, 1).
fn cubic_weights(t: f32) -> [f32; 4] {
    let t2 = t * t;
    let t3 = t2 * t;
    [
        0.5 * (-t3 + 2.0 * t2 - t),
        0.5 * (3.0 * t3 - 5.0 * t2 + 2.0),
        0.5 * (-3.0 * t3 + 4.0 * t2 + t),
        0.5 * (t3 - t2),
    ]
}

fn clamped_pixel(image: &RgbImage, x: i64, y: i64) -> &Rgb<u8> {
    let cx = x.clamp(0, image.width() as i64 - 1) as u32;
    let cy = y.clamp(0, image.height() as i64 - 1) as u32;
    image.get_pixel(cx, cy)
}

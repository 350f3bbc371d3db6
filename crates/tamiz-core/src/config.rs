// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Intake decision policy configuration.

use serde::{Deserialize, Serialize};

/// Tunable thresholds for the intake decision policy.
///
/// The quality-scorer weights are deliberately *not* configuration: they are
/// fixed constants that must sum to 1.0 (see the quality scorer module).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeConfig {
    /// Minimum composite quality score for acceptance.
    pub min_quality: f64,
    /// A document whose trimmed text exceeds this many characters may be
    /// accepted even when its type is unrecognized.
    pub min_text_chars: usize,
    /// Skew angles above this (degrees) attach an informational reason.
    pub max_skew_degrees: f32,
    /// Fixed quality score assigned on the PDF path, where normalization has
    /// already corrected the page images and no measurement is taken.
    pub pdf_quality: f64,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            min_quality: 0.55,
            min_text_chars: 120,
            max_skew_degrees: 7.0,
            pdf_quality: 0.9,
        }
    }
}

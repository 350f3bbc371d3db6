// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module — skew detection/correction and multi-factor quality scoring.

pub mod deskew;
pub mod quality;

pub use deskew::{Deskewed, deskew};
pub use quality::{QualityAssessment, assess};

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// tamiz-intake — The document intake decision pipeline.
//
// Takes a single quarantined file (raster image or PDF), extracts its text,
// scores its quality, validates identity numbers, guesses a category, and
// emits exactly one accept/reject verdict. Image preprocessing (deskew) and
// quality scoring run in-crate; OCR, PDF normalization, and PDF text
// extraction are collaborator seams injected at construction.

pub mod decision;
pub mod extract;
pub mod image;
pub mod ocr;
pub mod pdf;
pub mod sniff;
pub mod text;

// Re-export the primary entry points so callers can use
// `tamiz_intake::IntakePipeline` etc.
pub use crate::decision::IntakePipeline;
pub use crate::extract::{ExtractionResult, TextExtractor};
pub use crate::image::deskew::{Deskewed, deskew};
pub use crate::image::quality::{QualityAssessment, assess};
pub use crate::ocr::{OcrLine, TextRecognizer};
pub use crate::pdf::normalize::{Ocrmypdf, PdfNormalizer};
pub use crate::pdf::text::{LopdfText, PdfTextExtractor};

#[cfg(feature = "ocr")]
pub use crate::ocr::{OcrConfig, OcrsRecognizer};

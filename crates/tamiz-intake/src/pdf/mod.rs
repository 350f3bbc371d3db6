// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module — external normalization (ocrmypdf) and text extraction.

pub mod normalize;
pub mod text;

pub use normalize::{Ocrmypdf, PdfNormalizer};
pub use text::{LopdfText, PdfTextExtractor};

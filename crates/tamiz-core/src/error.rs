// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Tamiz.

use thiserror::Error;

/// Top-level error type for all Tamiz operations.
///
/// Inner pipeline components return these freely; only the decision boundary
/// converts them into terminal "error" verdicts (§ decision engine).
#[derive(Debug, Error)]
pub enum TamizError {
    // -- Input errors --
    #[error("unsupported document: {0}")]
    UnsupportedDocument(String),

    // -- Image pipeline errors --
    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("OCR failed: {0}")]
    OcrError(String),

    // -- PDF pipeline errors --
    #[error("PDF operation failed: {0}")]
    PdfError(String),

    #[error("PDF normalization failed: {0}")]
    NormalizeError(String),

    // -- Infrastructure --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, TamizError>;

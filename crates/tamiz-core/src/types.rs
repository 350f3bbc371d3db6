// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Tamiz intake gate.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Broad kind of a quarantined document, selecting the extraction path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentKind {
    /// A raster image (photo or scan) — goes through deskew + OCR.
    RasterImage,
    /// A PDF — goes through external normalization + text extraction.
    Pdf,
}

impl DocumentKind {
    /// MIME type string for this kind (the sniffed value for PDFs; raster
    /// images cover several concrete types and report the generic family).
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::RasterImage => "image/*",
        }
    }

    /// Infer document kind from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "jpg" | "jpeg" | "png" | "tif" | "tiff" | "bmp" | "webp" => Some(Self::RasterImage),
            _ => None,
        }
    }
}

/// Document category guessed from the extracted text.
///
/// The set is closed: downstream consumers switch on the serialized token, so
/// new categories are additive, never renames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestedType {
    /// Spanish national identity document.
    Dni,
    /// A contract of any sort.
    Contrato,
    /// A mortgage deed.
    Hipoteca,
    /// Nothing recognizable in the text.
    Desconocido,
    /// The pipeline failed before classification could run.
    Error,
}

impl SuggestedType {
    /// The serialized (lowercase) token for this category.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Dni => "dni",
            Self::Contrato => "contrato",
            Self::Hipoteca => "hipoteca",
            Self::Desconocido => "desconocido",
            Self::Error => "error",
        }
    }

    /// Whether this category alone is sufficient for acceptance, regardless
    /// of extracted-text length.
    pub fn is_acceptable(&self) -> bool {
        matches!(self, Self::Dni | Self::Contrato | Self::Hipoteca)
    }
}

impl std::fmt::Display for SuggestedType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Checksum results for identity numbers found in the extracted text.
///
/// `None` means "no such identifier was found" — distinct from `Some(false)`,
/// which means one was found and its check letter does not match. Absent
/// kinds are omitted from the serialized form entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Checksum validity of the first DNI-shaped match, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dni_ok: Option<bool>,
    /// Checksum validity of the first NIE-shaped match, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nie_ok: Option<bool>,
}

impl ValidationReport {
    /// True when no identifier of either kind was found.
    pub fn is_empty(&self) -> bool {
        self.dni_ok.is_none() && self.nie_ok.is_none()
    }
}

/// The single structured decision object returned per document.
///
/// Every invocation of the pipeline produces exactly one `Verdict` — success,
/// soft rejection, or internal failure alike.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// Whether the document may proceed downstream.
    pub accept: bool,
    /// Composite quality score, rounded to 2 decimals, in [0, 1].
    pub quality_score: f64,
    /// Guessed document category.
    pub suggested_type: SuggestedType,
    /// Identity-number checksum results (empty when none found).
    pub validations: ValidationReport,
    /// Reserved for structured field extraction (names, dates, amounts).
    /// Always empty in this version; kept in the shape so adding fields later
    /// is not a breaking change.
    pub extracted_fields: BTreeMap<String, serde_json::Value>,
    /// Ordered, human-readable reasons. May be non-empty alongside
    /// `accept == true` (informational caveats).
    pub reasons: Vec<String>,
}

impl Verdict {
    /// Terminal verdict for a document whose processing failed internally.
    ///
    /// The failure description is embedded as the single reason, prefixed
    /// with `error:` so queue operators can grep for it.
    pub fn error(message: impl std::fmt::Display) -> Self {
        Self {
            accept: false,
            quality_score: 0.0,
            suggested_type: SuggestedType::Error,
            validations: ValidationReport::default(),
            extracted_fields: BTreeMap::new(),
            reasons: vec![format!("error:{message}")],
        }
    }
}

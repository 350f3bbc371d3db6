// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The decision engine — one document in, exactly one verdict out.
//
// All I/O and collaborator failures stop at this boundary: whatever goes
// wrong inside extraction or analysis becomes a terminal "error" verdict,
// never a panic or an error returned to the caller. Retry, if any, belongs
// to the queue that invokes us.

use std::collections::BTreeMap;
use std::path::Path;

use tamiz_core::config::IntakeConfig;
use tamiz_core::error::Result;
use tamiz_core::types::{SuggestedType, Verdict};
use tracing::{info, instrument, warn};

use crate::extract::{ExtractionResult, TextExtractor};
use crate::ocr::TextRecognizer;
use crate::pdf::normalize::PdfNormalizer;
use crate::pdf::text::PdfTextExtractor;
use crate::sniff;
use crate::text::{classify, validate_identifiers};

/// Reason attached when the composite quality score is below threshold.
pub const REASON_LOW_QUALITY: &str = "low sharpness/contrast/glare";
/// Reason attached when the detected skew angle exceeds the threshold.
pub const REASON_HEAVY_SKEW: &str = "document heavily skewed";
/// Reason attached when no document category matched the text.
pub const REASON_UNKNOWN_TYPE: &str = "document type not recognized";

/// The intake gate. Stateless across calls apart from the injected
/// collaborators, which are shared read-only; one instance may serve many
/// worker threads.
pub struct IntakePipeline {
    extractor: TextExtractor,
    config: IntakeConfig,
}

impl IntakePipeline {
    pub fn new(
        recognizer: Box<dyn TextRecognizer>,
        normalizer: Box<dyn PdfNormalizer>,
        pdf_text: Box<dyn PdfTextExtractor>,
        config: IntakeConfig,
    ) -> Self {
        let extractor = TextExtractor::new(recognizer, normalizer, pdf_text, config.pdf_quality);
        Self { extractor, config }
    }

    /// Decide on one quarantined document.
    ///
    /// Never fails and never panics on bad input: internal errors are folded
    /// into a terminal error verdict with the failure description embedded in
    /// `reasons`.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn decide(&self, path: &Path) -> Verdict {
        match self.evaluate(path) {
            Ok(verdict) => verdict,
            Err(err) => {
                warn!(%err, "intake failed; emitting error verdict");
                Verdict::error(err)
            }
        }
    }

    fn evaluate(&self, path: &Path) -> Result<Verdict> {
        let kind = sniff::detect_kind(path);
        let extraction = self.extractor.extract(path, kind)?;
        Ok(self.apply_policy(&extraction))
    }

    /// The accept policy. Pure: fully determined by the extraction result
    /// and the configured thresholds — no I/O.
    ///
    /// A document is accepted when its quality clears the bar AND it either
    /// carries enough text or is of a recognized category. Reasons accumulate
    /// independently of the outcome, so an accepted document can still carry
    /// an informational skew warning.
    fn apply_policy(&self, extraction: &ExtractionResult) -> Verdict {
        let validations = validate_identifiers(&extraction.text);
        let suggested_type = classify(&extraction.text);

        let text_chars = extraction.text.trim().chars().count();
        let accept = extraction.quality >= self.config.min_quality
            && (text_chars > self.config.min_text_chars || suggested_type.is_acceptable());

        let mut reasons = Vec::new();
        if extraction.quality < self.config.min_quality {
            reasons.push(REASON_LOW_QUALITY.to_string());
        }
        if extraction.angle > self.config.max_skew_degrees {
            reasons.push(REASON_HEAVY_SKEW.to_string());
        }
        if suggested_type == SuggestedType::Desconocido {
            reasons.push(REASON_UNKNOWN_TYPE.to_string());
        }

        info!(
            accept,
            quality = extraction.quality,
            %suggested_type,
            text_chars,
            reason_count = reasons.len(),
            "verdict assembled"
        );

        Verdict {
            accept,
            quality_score: round_to_two_decimals(extraction.quality),
            suggested_type,
            validations,
            extracted_fields: BTreeMap::new(),
            reasons,
        }
    }
}

fn round_to_two_decimals(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}

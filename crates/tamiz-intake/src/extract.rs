// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text extraction façade — routes a document down the image-OCR path or the
// PDF-normalization path and returns text plus a quality/skew estimate.

use std::path::Path;

use serde::Serialize;
use tamiz_core::error::{Result, TamizError};
use tamiz_core::types::DocumentKind;
use tracing::{debug, info, instrument};

use crate::image::deskew::deskew;
use crate::image::quality;
use crate::ocr::TextRecognizer;
use crate::pdf::normalize::PdfNormalizer;
use crate::pdf::text::PdfTextExtractor;

/// What extraction hands to the decision engine.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    /// Full extracted text; possibly empty.
    pub text: String,
    /// Composite quality score in [0, 1].
    pub quality: f64,
    /// Detected skew angle, degrees, non-negative.
    pub angle: f32,
}

/// Routes a document to one of two mutually exclusive extraction paths.
///
/// Collaborators are injected once at construction and shared read-only for
/// the life of the process.
pub struct TextExtractor {
    recognizer: Box<dyn TextRecognizer>,
    normalizer: Box<dyn PdfNormalizer>,
    pdf_text: Box<dyn PdfTextExtractor>,
    /// Fixed score assigned on the PDF path (normalization already corrected
    /// the page images; nothing is measured).
    pdf_quality: f64,
}

impl TextExtractor {
    pub fn new(
        recognizer: Box<dyn TextRecognizer>,
        normalizer: Box<dyn PdfNormalizer>,
        pdf_text: Box<dyn PdfTextExtractor>,
        pdf_quality: f64,
    ) -> Self {
        Self {
            recognizer,
            normalizer,
            pdf_text,
            pdf_quality,
        }
    }

    /// Extract text and quality signals from one document. Failures in
    /// either path propagate — the decision boundary owns their conversion.
    #[instrument(skip(self), fields(path = %path.display(), ?kind))]
    pub fn extract(&self, path: &Path, kind: DocumentKind) -> Result<ExtractionResult> {
        match kind {
            DocumentKind::Pdf => self.extract_pdf(path),
            DocumentKind::RasterImage => self.extract_image(path),
        }
    }

    fn extract_pdf(&self, path: &Path) -> Result<ExtractionResult> {
        let normalized = self.normalizer.normalize(path)?;
        let text = self.pdf_text.extract_text(&normalized)?;
        debug!(chars = text.len(), "PDF text extracted");
        Ok(ExtractionResult {
            text,
            quality: self.pdf_quality,
            angle: 0.0,
        })
    }

    fn extract_image(&self, path: &Path) -> Result<ExtractionResult> {
        let decoded = image::open(path).map_err(|err| {
            TamizError::ImageError(format!("failed to open {}: {}", path.display(), err))
        })?;

        let corrected = deskew(&decoded.to_rgb8());
        let lines = self.recognizer.recognize_lines(&corrected.image)?;
        let text = lines
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let assessment = quality::assess(&corrected.image);

        info!(
            lines = lines.len(),
            quality = assessment.composite,
            angle = corrected.angle,
            "image text extracted"
        );
        Ok(ExtractionResult {
            text,
            quality: assessment.composite,
            angle: corrected.angle,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crate::ocr::OcrLine;

    struct ScriptedRecognizer(Vec<&'static str>);

    impl TextRecognizer for ScriptedRecognizer {
        fn recognize_lines(&self, _image: &image::RgbImage) -> Result<Vec<OcrLine>> {
            Ok(self
                .0
                .iter()
                .map(|text| OcrLine {
                    text: (*text).to_string(),
                })
                .collect())
        }
    }

    /// Pretends the source is already normalized.
    struct PassthroughNormalizer;

    impl PdfNormalizer for PassthroughNormalizer {
        fn normalize(&self, source: &Path) -> Result<PathBuf> {
            Ok(source.to_path_buf())
        }
    }

    struct ScriptedPdfText(&'static str);

    impl PdfTextExtractor for ScriptedPdfText {
        fn extract_text(&self, _path: &Path) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn pdf_path_reports_fixed_quality_and_zero_angle() {
        let extractor = TextExtractor::new(
            Box::new(ScriptedRecognizer(vec![])),
            Box::new(PassthroughNormalizer),
            Box::new(ScriptedPdfText("escritura de hipoteca")),
            0.9,
        );

        // The mocks never touch the filesystem.
        let result = extractor
            .extract(Path::new("/quarantine/doc.pdf"), DocumentKind::Pdf)
            .unwrap();
        assert_eq!(result.text, "escritura de hipoteca");
        assert_eq!(result.quality, 0.9);
        assert_eq!(result.angle, 0.0);
    }

    #[test]
    fn image_path_joins_lines_with_newlines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.png");
        image::RgbImage::from_fn(32, 32, |x, y| {
            if (x + y) % 2 == 0 {
                image::Rgb([255u8, 255, 255])
            } else {
                image::Rgb([0u8, 0, 0])
            }
        })
        .save(&path)
        .unwrap();

        let extractor = TextExtractor::new(
            Box::new(ScriptedRecognizer(vec!["primera línea", "segunda línea"])),
            Box::new(PassthroughNormalizer),
            Box::new(ScriptedPdfText("")),
            0.9,
        );

        let result = extractor
            .extract(&path, DocumentKind::RasterImage)
            .unwrap();
        assert_eq!(result.text, "primera línea\nsegunda línea");
        assert!(result.quality > 0.0);
        assert_eq!(result.angle, 0.0);
    }

    #[test]
    fn unreadable_image_propagates_an_image_error() {
        let extractor = TextExtractor::new(
            Box::new(ScriptedRecognizer(vec![])),
            Box::new(PassthroughNormalizer),
            Box::new(ScriptedPdfText("")),
            0.9,
        );

        let err = extractor
            .extract(Path::new("/nonexistent/scan.png"), DocumentKind::RasterImage)
            .unwrap_err();
        assert!(matches!(err, TamizError::ImageError(_)), "got {err:?}");
    }
}

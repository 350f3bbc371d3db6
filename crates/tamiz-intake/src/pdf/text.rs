// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF text extraction collaborator, backed by `lopdf`.

use std::path::Path;

use lopdf::Document;
use tamiz_core::error::{Result, TamizError};
use tracing::{debug, instrument};

/// The PDF text extraction seam: normalized PDF path in, full text out.
pub trait PdfTextExtractor: Send + Sync {
    /// Extract the text of every page, in page order. A document with no
    /// pages (or no text) yields an empty string, not an error.
    fn extract_text(&self, path: &Path) -> Result<String>;
}

/// Production extractor reading the normalized PDF with `lopdf`.
pub struct LopdfText;

impl PdfTextExtractor for LopdfText {
    #[instrument(skip(self), fields(path = %path.display()))]
    fn extract_text(&self, path: &Path) -> Result<String> {
        let document = Document::load(path).map_err(|err| {
            TamizError::PdfError(format!("failed to open {}: {}", path.display(), err))
        })?;

        let pages: Vec<u32> = document.get_pages().keys().copied().collect();
        if pages.is_empty() {
            debug!("PDF has no pages");
            return Ok(String::new());
        }

        let text = document.extract_text(&pages).map_err(|err| {
            TamizError::PdfError(format!(
                "text extraction failed for {}: {}",
                path.display(),
                err
            ))
        })?;

        debug!(pages = pages.len(), chars = text.len(), "PDF text extracted");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{Object, Stream, dictionary};

    #[test]
    fn unreadable_file_reports_pdf_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.pdf");
        std::fs::write(&path, b"not a pdf at all").unwrap();

        let err = LopdfText.extract_text(&path).unwrap_err();
        assert!(matches!(err, TamizError::PdfError(_)), "got {err:?}");
    }

    #[test]
    fn empty_page_yields_empty_text() {
        // Minimal one-page document with an empty content stream.
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let content_id = doc.add_object(Stream::new(dictionary! {}, Vec::new()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.pdf");
        doc.save(&path).unwrap();

        let text = LopdfText.extract_text(&path).unwrap();
        assert_eq!(text.trim(), "");
    }
}

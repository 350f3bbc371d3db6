// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document kind detection: content sniffing with extension fallback.
//
// Two explicit steps: sniff the magic bytes first, and only when the content
// does not identify a PDF (or cannot be read at all) consult the file
// extension. Everything that is not a PDF by either step takes the
// raster-image path — an actually-unreadable file then fails there and
// surfaces as an error verdict.

use std::path::Path;

use tamiz_core::error::Result;
use tamiz_core::types::DocumentKind;
use tracing::debug;

/// Sniff the document kind from the file's magic bytes.
///
/// `Ok(None)` means the content matched no known signature. I/O failures are
/// returned, not swallowed — the caller decides how to fall back.
pub fn sniff_kind(path: &Path) -> Result<Option<DocumentKind>> {
    let detected = infer::get_from_path(path)?;
    Ok(detected.map(|kind| {
        if kind.mime_type() == "application/pdf" {
            DocumentKind::Pdf
        } else {
            DocumentKind::RasterImage
        }
    }))
}

/// Decide which extraction path a quarantined file takes.
///
/// A file is a PDF when its content sniffs as one, or — failing that — when
/// its extension says so. Everything else is treated as a raster image.
pub fn detect_kind(path: &Path) -> DocumentKind {
    match sniff_kind(path) {
        Ok(Some(DocumentKind::Pdf)) => DocumentKind::Pdf,
        Ok(sniffed) => {
            debug!(?sniffed, "content did not identify a PDF; checking extension");
            extension_fallback(path)
        }
        Err(err) => {
            debug!(%err, "content sniff failed; falling back to extension");
            extension_fallback(path)
        }
    }
}

fn extension_fallback(path: &Path) -> DocumentKind {
    let by_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(DocumentKind::from_extension);
    match by_extension {
        Some(DocumentKind::Pdf) => DocumentKind::Pdf,
        _ => DocumentKind::RasterImage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_magic_bytes_sniff_as_pdf_regardless_of_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mislabeled.bin");
        std::fs::write(&path, b"%PDF-1.7\n%\xc3\xa4\xc3\xbc\xc3\xb6\n").unwrap();

        assert_eq!(sniff_kind(&path).unwrap(), Some(DocumentKind::Pdf));
        assert_eq!(detect_kind(&path), DocumentKind::Pdf);
    }

    #[test]
    fn png_content_takes_the_image_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.png");
        // PNG signature followed by a little padding.
        std::fs::write(&path, b"\x89PNG\r\n\x1a\n\0\0\0\0").unwrap();

        assert_eq!(sniff_kind(&path).unwrap(), Some(DocumentKind::RasterImage));
        assert_eq!(detect_kind(&path), DocumentKind::RasterImage);
    }

    #[test]
    fn unknown_content_falls_back_to_pdf_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("opaque.pdf");
        std::fs::write(&path, b"\x00\x01\x02\x03 nothing recognizable").unwrap();

        assert_eq!(sniff_kind(&path).unwrap(), None);
        assert_eq!(detect_kind(&path), DocumentKind::Pdf);
    }

    #[test]
    fn unknown_content_and_extension_is_a_raster_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("opaque.jpg");
        std::fs::write(&path, b"\x00\x01\x02\x03 nothing recognizable").unwrap();

        assert_eq!(detect_kind(&path), DocumentKind::RasterImage);
    }

    #[test]
    fn missing_file_surfaces_sniff_error_then_falls_back() {
        let path = Path::new("/nonexistent/tamiz/missing.pdf");
        assert!(sniff_kind(path).is_err());
        // detect_kind still routes by extension, so the PDF path gets the
        // chance to report the missing file itself.
        assert_eq!(detect_kind(path), DocumentKind::Pdf);
    }
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF normalization collaborator.
//
// Incoming PDFs are rewritten into searchable, deskewed, optimized PDFs by
// the external `ocrmypdf` tool before any text extraction happens. The
// normalized artifact is written beside the source file and is never cleaned
// up here — the quarantine owner decides its fate.

use std::path::{Path, PathBuf};
use std::process::Command;

use tamiz_core::error::{Result, TamizError};
use tracing::{debug, info, instrument};

/// The PDF normalization seam: source path in, normalized sibling path out.
pub trait PdfNormalizer: Send + Sync {
    /// Produce a searchable, deskewed PDF next to `source` and return its
    /// path. Fails if the external tool cannot run or exits non-zero.
    fn normalize(&self, source: &Path) -> Result<PathBuf>;
}

/// The sibling path where the normalized artifact lands: `doc.pdf` becomes
/// `doc.norm.pdf`.
pub fn normalized_output_path(source: &Path) -> PathBuf {
    source.with_extension("norm.pdf")
}

/// Production normalizer shelling out to the `ocrmypdf` CLI.
///
/// The subprocess runs synchronously and blocks the calling thread; there is
/// no timeout here — a caller-level deadline must wrap the invocation.
pub struct Ocrmypdf {
    /// Binary to invoke (name resolved via PATH, or an absolute path).
    binary: PathBuf,
    /// `--optimize` level passed through (0-3).
    optimize_level: u8,
}

impl Default for Ocrmypdf {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("ocrmypdf"),
            optimize_level: 3,
        }
    }
}

impl Ocrmypdf {
    /// Use a specific binary (useful when ocrmypdf lives outside PATH).
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            ..Self::default()
        }
    }
}

impl PdfNormalizer for Ocrmypdf {
    #[instrument(skip(self), fields(source = %source.display()))]
    fn normalize(&self, source: &Path) -> Result<PathBuf> {
        let output_path = normalized_output_path(source);
        info!(output = %output_path.display(), "Normalizing PDF");

        let output = Command::new(&self.binary)
            .arg("--deskew")
            .arg("--clean")
            .arg("--optimize")
            .arg(self.optimize_level.to_string())
            .arg("--force-ocr")
            .arg(source)
            .arg(&output_path)
            .output()
            .map_err(|err| {
                TamizError::NormalizeError(format!(
                    "cannot run {}: {}",
                    self.binary.display(),
                    err
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TamizError::NormalizeError(format!(
                "{} exited with {}: {}",
                self.binary.display(),
                output.status,
                stderr.trim()
            )));
        }

        debug!("PDF normalization complete");
        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_is_a_sibling_norm_pdf() {
        assert_eq!(
            normalized_output_path(Path::new("/srv/quarantine/doc.pdf")),
            PathBuf::from("/srv/quarantine/doc.norm.pdf")
        );
        // Extension-less inputs still get a deterministic sibling.
        assert_eq!(
            normalized_output_path(Path::new("/srv/quarantine/doc")),
            PathBuf::from("/srv/quarantine/doc.norm.pdf")
        );
    }

    #[test]
    fn missing_binary_reports_normalize_error() {
        let normalizer = Ocrmypdf::with_binary("/nonexistent/tamiz-test-ocrmypdf");
        let err = normalizer
            .normalize(Path::new("/tmp/whatever.pdf"))
            .unwrap_err();
        assert!(matches!(err, TamizError::NormalizeError(_)), "got {err:?}");
    }

    #[test]
    fn non_zero_exit_reports_normalize_error_with_status() {
        // `false` ignores its arguments and exits 1.
        let normalizer = Ocrmypdf::with_binary("false");
        let err = normalizer
            .normalize(Path::new("/tmp/whatever.pdf"))
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("exited with"), "got {message}");
    }
}

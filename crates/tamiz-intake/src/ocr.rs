// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// OCR collaborator seam.
//
// The pipeline consumes OCR as a black box: corrected image in, recognized
// text lines out. The production implementation wraps the `ocrs` crate, a
// pure-Rust OCR engine backed by neural network models executed via `rten`,
// and is gated behind the `ocr` feature:
//
// ```toml
// tamiz-intake = { path = "crates/tamiz-intake", features = ["ocr"] }
// ```
//
// # Model Setup
//
// The engine needs two model files, `text-detection.rten` and
// `text-recognition.rten`, cached under `$XDG_CACHE_HOME/ocrs` (typically
// `~/.cache/ocrs`). Running the `ocrs-cli` tool once downloads them:
//
// ```sh
// cargo install ocrs-cli
// ocrs some-image.png
// ```

use image::RgbImage;
use tamiz_core::error::Result;

/// A line of text recognized by the OCR collaborator.
///
/// Lines arrive in detection order; the extraction façade joins them with
/// newline separators.
#[derive(Debug, Clone)]
pub struct OcrLine {
    /// The recognized text content of this line.
    pub text: String,
}

impl std::fmt::Display for OcrLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// The OCR engine seam.
///
/// One implementation is constructed per process (model loading is the
/// expensive step) and shared read-only across invocations; hence
/// `Send + Sync`.
pub trait TextRecognizer: Send + Sync {
    /// Recognize the text lines of a corrected (deskewed) document image.
    ///
    /// An image containing no text yields an empty vector, not an error.
    fn recognize_lines(&self, image: &RgbImage) -> Result<Vec<OcrLine>>;
}

#[cfg(feature = "ocr")]
pub use engine::{OcrConfig, OcrsRecognizer};

#[cfg(feature = "ocr")]
mod engine {
    use std::path::{Path, PathBuf};

    use image::RgbImage;
    use ocrs::{ImageSource, OcrEngine, OcrEngineParams};
    use rten::Model;
    use tamiz_core::error::{Result, TamizError};
    use tracing::{debug, info, instrument};

    use super::{OcrLine, TextRecognizer};

    /// Default directory for cached OCR model files.
    ///
    /// Follows the XDG Base Directory specification: `$XDG_CACHE_HOME/ocrs`,
    /// falling back to `~/.cache/ocrs` when `XDG_CACHE_HOME` is unset.
    fn default_model_dir() -> PathBuf {
        if let Ok(xdg) = std::env::var("XDG_CACHE_HOME") {
            PathBuf::from(xdg).join("ocrs")
        } else if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home).join(".cache").join("ocrs")
        } else {
            // Last resort — current directory.
            PathBuf::from("ocrs-models")
        }
    }

    /// Well-known filenames for the detection and recognition models.
    const DETECTION_MODEL_FILENAME: &str = "text-detection.rten";
    const RECOGNITION_MODEL_FILENAME: &str = "text-recognition.rten";

    /// Configuration for constructing an [`OcrsRecognizer`].
    #[derive(Debug, Clone)]
    pub struct OcrConfig {
        /// Path to the text-detection model file (`.rten`).
        pub detection_model_path: PathBuf,
        /// Path to the text-recognition model file (`.rten`).
        pub recognition_model_path: PathBuf,
    }

    impl Default for OcrConfig {
        /// Returns a config pointing at the default model cache directory.
        fn default() -> Self {
            Self::from_dir(default_model_dir())
        }
    }

    impl OcrConfig {
        /// Create a config with an explicit model directory.
        ///
        /// Expects the directory to contain `text-detection.rten` and
        /// `text-recognition.rten`.
        pub fn from_dir(dir: impl AsRef<Path>) -> Self {
            let dir = dir.as_ref();
            Self {
                detection_model_path: dir.join(DETECTION_MODEL_FILENAME),
                recognition_model_path: dir.join(RECOGNITION_MODEL_FILENAME),
            }
        }

        /// Verify that both model files exist.
        pub fn validate(&self) -> Result<()> {
            for path in [&self.detection_model_path, &self.recognition_model_path] {
                if !path.exists() {
                    return Err(TamizError::OcrError(format!(
                        "model not found at {}; run `ocrs-cli` once to download models",
                        path.display()
                    )));
                }
            }
            Ok(())
        }
    }

    /// Production OCR engine — recognizes text in deskewed document images.
    ///
    /// Wraps the `ocrs` engine with Tamiz error handling and logging. The
    /// engine is initialized once with pre-trained models and then reused for
    /// the life of the worker process.
    ///
    /// **Important:** compile `ocrs`/`rten` in release mode; debug builds are
    /// orders of magnitude slower.
    pub struct OcrsRecognizer {
        engine: OcrEngine,
    }

    impl OcrsRecognizer {
        /// Load models from the paths given in `config` and initialize the
        /// engine. This is the expensive step — construct once per process.
        #[instrument(skip_all, fields(
            detection = %config.detection_model_path.display(),
            recognition = %config.recognition_model_path.display(),
        ))]
        pub fn new(config: OcrConfig) -> Result<Self> {
            config.validate()?;

            info!("Loading OCR detection model");
            let detection_model =
                Model::load_file(&config.detection_model_path).map_err(|err| {
                    TamizError::OcrError(format!(
                        "failed to load detection model from {}: {}",
                        config.detection_model_path.display(),
                        err
                    ))
                })?;

            info!("Loading OCR recognition model");
            let recognition_model =
                Model::load_file(&config.recognition_model_path).map_err(|err| {
                    TamizError::OcrError(format!(
                        "failed to load recognition model from {}: {}",
                        config.recognition_model_path.display(),
                        err
                    ))
                })?;

            let engine = OcrEngine::new(OcrEngineParams {
                detection_model: Some(detection_model),
                recognition_model: Some(recognition_model),
                ..Default::default()
            })
            .map_err(|err| {
                TamizError::OcrError(format!("failed to initialise OCR engine: {}", err))
            })?;

            info!("OCR engine initialised");
            Ok(Self { engine })
        }

        /// Create a recognizer loading models from a specific directory.
        pub fn from_model_dir(dir: impl AsRef<Path>) -> Result<Self> {
            Self::new(OcrConfig::from_dir(dir))
        }

        /// Create a recognizer using the default model cache directory.
        pub fn with_defaults() -> Result<Self> {
            Self::new(OcrConfig::default())
        }
    }

    impl TextRecognizer for OcrsRecognizer {
        #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
        fn recognize_lines(&self, image: &RgbImage) -> Result<Vec<OcrLine>> {
            let (width, height) = image.dimensions();

            let source =
                ImageSource::from_bytes(image.as_raw(), (width, height)).map_err(|err| {
                    TamizError::OcrError(format!(
                        "failed to create image source ({}x{}): {}",
                        width, height, err
                    ))
                })?;

            let input = self.engine.prepare_input(source).map_err(|err| {
                TamizError::OcrError(format!("OCR preprocessing failed: {}", err))
            })?;

            // Detect word boxes, group them into lines, then decode each line.
            let word_rects = self.engine.detect_words(&input).map_err(|err| {
                TamizError::OcrError(format!("word detection failed: {}", err))
            })?;
            debug!(word_count = word_rects.len(), "Words detected");

            let line_rects = self.engine.find_text_lines(&input, &word_rects);

            let line_texts = self
                .engine
                .recognize_text(&input, &line_rects)
                .map_err(|err| {
                    TamizError::OcrError(format!("line recognition failed: {}", err))
                })?;

            let mut lines = Vec::with_capacity(line_texts.len());
            for line in line_texts.iter().flatten() {
                let text = line.to_string();
                if text.trim().is_empty() {
                    continue;
                }
                lines.push(OcrLine { text });
            }

            debug!(recognized_lines = lines.len(), "OCR recognition complete");
            Ok(lines)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn default_config_points_to_cache_dir() {
            let config = OcrConfig::default();
            let detection = config.detection_model_path.to_string_lossy();
            assert!(
                detection.ends_with(DETECTION_MODEL_FILENAME),
                "detection model path should end with {DETECTION_MODEL_FILENAME}, got {detection}"
            );
            let recognition = config.recognition_model_path.to_string_lossy();
            assert!(recognition.ends_with(RECOGNITION_MODEL_FILENAME));
        }

        #[test]
        fn config_from_dir() {
            let config = OcrConfig::from_dir("/tmp/my-models");
            assert_eq!(
                config.detection_model_path,
                PathBuf::from("/tmp/my-models/text-detection.rten")
            );
            assert_eq!(
                config.recognition_model_path,
                PathBuf::from("/tmp/my-models/text-recognition.rten")
            );
        }

        #[test]
        fn validate_missing_models() {
            let config = OcrConfig::from_dir("/nonexistent/path/ocr-models");
            assert!(config.validate().is_err());
        }
    }
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tamiz — quarantine document intake gate.
//
// Entry point. Initialises logging, loads configuration, constructs the
// production collaborators (ocrs OCR engine, ocrmypdf normalizer, lopdf text
// extractor), runs one intake decision, and prints the verdict as JSON.
//
// The queue worker that normally drives the pipeline lives outside this
// repository; this binary is the operator-facing surface for smoke tests and
// one-off decisions.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use tamiz_core::IntakeConfig;
use tamiz_intake::{IntakePipeline, LopdfText, Ocrmypdf, OcrsRecognizer};

/// Decide whether one quarantined document (image or PDF) may proceed
/// downstream. Prints the verdict as JSON on stdout.
#[derive(Debug, Parser)]
#[command(name = "tamiz", version, about)]
struct Args {
    /// Path to the quarantined document.
    path: PathBuf,

    /// JSON file overriding the default decision thresholds.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory containing the OCR model files
    /// (text-detection.rten / text-recognition.rten).
    #[arg(long, value_name = "DIR")]
    model_dir: Option<PathBuf>,

    /// Pretty-print the verdict JSON.
    #[arg(long)]
    pretty: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("tamiz: {message}");
            return ExitCode::from(2);
        }
    };

    // The OCR engine is the expensive part: models load once here and the
    // handle is reused for the life of the process.
    let recognizer = match args.model_dir.as_deref() {
        Some(dir) => OcrsRecognizer::from_model_dir(dir),
        None => OcrsRecognizer::with_defaults(),
    };
    let recognizer = match recognizer {
        Ok(recognizer) => recognizer,
        Err(err) => {
            eprintln!("tamiz: {err}");
            return ExitCode::from(2);
        }
    };

    tracing::info!(path = %args.path.display(), "Tamiz intake starting");

    let pipeline = IntakePipeline::new(
        Box::new(recognizer),
        Box::new(Ocrmypdf::default()),
        Box::new(LopdfText),
        config,
    );

    let verdict = pipeline.decide(&args.path);

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&verdict)
    } else {
        serde_json::to_string(&verdict)
    };
    match rendered {
        Ok(json) => println!("{json}"),
        Err(err) => {
            eprintln!("tamiz: cannot serialize verdict: {err}");
            return ExitCode::from(2);
        }
    }

    if verdict.accept {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<IntakeConfig, String> {
    let Some(path) = path else {
        return Ok(IntakeConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .map_err(|err| format!("cannot read config {}: {err}", path.display()))?;
    serde_json::from_str(&raw)
        .map_err(|err| format!("invalid config {}: {err}", path.display()))
}

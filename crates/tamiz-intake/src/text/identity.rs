// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Detection and checksum validation of Spanish identity numbers (DNI/NIE)
// in free text.

use once_cell::sync::Lazy;
use regex::Regex;
use tamiz_core::types::ValidationReport;

/// Official check-letter table. The check letter of a number N is
/// `CHECK_LETTERS[N % 23]`; NIE numbers substitute their prefix letter with
/// its positional digit (X→0, Y→1, Z→2) before the modulo.
const CHECK_LETTERS: &[u8; 23] = b"TRWAGMYFPDXBNJZSQVHLCKE";

/// 8 digits + check letter, word-bounded.
static DNI_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([0-9]{8})([A-Z])\b").expect("DNI pattern is valid"));

/// X/Y/Z prefix + 7 digits + check letter, word-bounded.
static NIE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([XYZ][0-9]{7})([A-Z])\b").expect("NIE pattern is valid"));

/// Scan `text` for identity numbers and validate their check letters.
///
/// At most the first match of each pattern is considered. A kind that never
/// appears stays absent from the report — distinct from appearing with a bad
/// check letter.
pub fn validate_identifiers(text: &str) -> ValidationReport {
    let mut report = ValidationReport::default();

    if let Some(captures) = DNI_PATTERN.captures(text) {
        let number: u32 = captures[1].parse().expect("DNI match is 8 digits");
        let letter = captures[2].as_bytes()[0];
        report.dni_ok = Some(check_letter(number) == letter);
    }

    if let Some(captures) = NIE_PATTERN.captures(text) {
        let body = &captures[1];
        let prefix_digit: u32 = match body.as_bytes()[0] {
            b'Y' => 1,
            b'Z' => 2,
            _ => 0, // X
        };
        let tail: u32 = body[1..].parse().expect("NIE match is 7 digits");
        let number = prefix_digit * 10_000_000 + tail;
        let letter = captures[2].as_bytes()[0];
        report.nie_ok = Some(check_letter(number) == letter);
    }

    report
}

fn check_letter(number: u32) -> u8 {
    CHECK_LETTERS[(number % 23) as usize]
}

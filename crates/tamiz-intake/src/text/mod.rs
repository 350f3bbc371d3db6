// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text analysis — identity-number validation and document-type classification
// over the extracted text.

pub mod classify;
pub mod identity;

pub use classify::classify;
pub use identity::validate_identifiers;

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document-type classification from extracted text.

use tamiz_core::types::SuggestedType;

/// Keywords that identify a national identity document.
const DNI_KEYWORDS: [&str; 3] = ["documento nacional de identidad", "dni", "número de soporte"];

/// Guess the document category from its text.
///
/// Case-insensitive substring rules, checked in priority order — categories
/// are not mutually exclusive in free text (a mortgage deed routinely says
/// "contrato"), so the most specific keyword wins.
pub fn classify(text: &str) -> SuggestedType {
    let lowered = text.to_lowercase();
    if lowered.contains("hipoteca") {
        return SuggestedType::Hipoteca;
    }
    if lowered.contains("contrato") {
        return SuggestedType::Contrato;
    }
    if DNI_KEYWORDS.iter().any(|keyword| lowered.contains(keyword)) {
        return SuggestedType::Dni;
    }
    SuggestedType::Desconocido
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mortgage_outranks_contract() {
        let text = "CONTRATO DE PRÉSTAMO CON GARANTÍA DE HIPOTECA sobre la finca";
        assert_eq!(classify(text), SuggestedType::Hipoteca);
    }

    #[test]
    fn contract_keyword_matches_case_insensitively() {
        assert_eq!(
            classify("Contrato de arrendamiento de vivienda"),
            SuggestedType::Contrato
        );
    }

    #[test]
    fn identity_document_keywords() {
        assert_eq!(
            classify("DOCUMENTO NACIONAL DE IDENTIDAD"),
            SuggestedType::Dni
        );
        assert_eq!(classify("dni 12345678Z"), SuggestedType::Dni);
        assert_eq!(classify("Número de Soporte: E00000000"), SuggestedType::Dni);
    }

    #[test]
    fn unmatched_text_is_unknown() {
        assert_eq!(classify("factura proforma"), SuggestedType::Desconocido);
        assert_eq!(classify(""), SuggestedType::Desconocido);
    }
}

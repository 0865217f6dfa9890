//! Conversions between core diagnostic types and `lsp_types`.

use vocab_parser::{Diagnostic, Severity};

/// Diagnostic source reported to the client
pub const DIAGNOSTIC_SOURCE: &str = "vocab-ls";

pub fn to_lsp_severity(severity: Severity) -> lsp_types::DiagnosticSeverity {
    match severity {
        Severity::Error => lsp_types::DiagnosticSeverity::ERROR,
        Severity::Warning => lsp_types::DiagnosticSeverity::WARNING,
        Severity::Information => lsp_types::DiagnosticSeverity::INFORMATION,
        Severity::Hint => lsp_types::DiagnosticSeverity::HINT,
    }
}

pub fn to_lsp_diagnostic(diagnostic: &Diagnostic) -> lsp_types::Diagnostic {
    lsp_types::Diagnostic {
        range: lsp_types::Range {
            start: lsp_types::Position {
                line: diagnostic.range.start.line,
                character: diagnostic.range.start.character,
            },
            end: lsp_types::Position {
                line: diagnostic.range.end.line,
                character: diagnostic.range.end.character,
            },
        },
        severity: Some(to_lsp_severity(diagnostic.severity)),
        source: Some(DIAGNOSTIC_SOURCE.to_string()),
        message: diagnostic.message.clone(),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_keeps_span_and_message() {
        let diagnostic = Diagnostic::error("Malformed date", 2, 4, 14);
        let converted = to_lsp_diagnostic(&diagnostic);

        assert_eq!(converted.range.start.line, 2);
        assert_eq!(converted.range.start.character, 4);
        assert_eq!(converted.range.end.character, 14);
        assert_eq!(converted.severity, Some(lsp_types::DiagnosticSeverity::ERROR));
        assert_eq!(converted.message, "Malformed date");
        assert_eq!(converted.source.as_deref(), Some(DIAGNOSTIC_SOURCE));
    }
}

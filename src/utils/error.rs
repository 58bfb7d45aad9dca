//! Error handling for the Lox front end

use crate::utils::Span;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Front end error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ==================== Scanner Errors ====================

    #[error("Error: Unexpected character: {ch}")]
    UnexpectedChar { ch: char, span: Span },

    #[error("Error: Unterminated string.")]
    UnterminatedString { span: Span },

    // ==================== Parser Errors ====================

    /// `found` is the quoted offending lexeme, or `end` at end of input
    #[error("Error at {found}: Expected expression")]
    ExpectedExpr { found: String, span: Span },

    #[error("Error at {found}: Expected ')'")]
    ExpectedClosingParen { found: String, span: Span },

    #[error("Error at {found}: Expression nested deeper than {limit} levels")]
    TooDeep { found: String, limit: usize, span: Span },

    // ==================== Setup Errors ====================

    #[error("error reading file {path:?}: {reason}")]
    Io { path: String, reason: String },
}

impl Error {
    /// Get the span associated with this error
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::UnexpectedChar { span, .. } => Some(*span),
            Self::UnterminatedString { span } => Some(*span),
            Self::ExpectedExpr { span, .. } => Some(*span),
            Self::ExpectedClosingParen { span, .. } => Some(*span),
            Self::TooDeep { span, .. } => Some(*span),
            Self::Io { .. } => None,
        }
    }

    /// Line the error was detected on, when it has one
    pub fn line(&self) -> Option<usize> {
        self.span().map(|span| span.line)
    }

    /// Render as a diagnostic line: `[line N] <message>`
    pub fn report(&self) -> String {
        match self.line() {
            Some(line) => format!("[line {}] {}", line, self),
            None => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_prefixes_line() {
        let err = Error::UnexpectedChar { ch: '@', span: Span::new(4, 5, 3) };
        assert_eq!(err.report(), "[line 3] Error: Unexpected character: @");
    }

    #[test]
    fn test_unterminated_string_message() {
        let err = Error::UnterminatedString { span: Span::dummy() };
        assert_eq!(err.report(), "[line 1] Error: Unterminated string.");
    }

    #[test]
    fn test_parse_error_messages() {
        let err = Error::ExpectedClosingParen { found: "end".to_string(), span: Span::dummy() };
        assert_eq!(err.to_string(), "Error at end: Expected ')'");

        let err = Error::ExpectedExpr { found: "'+'".to_string(), span: Span::new(0, 1, 2) };
        assert_eq!(err.report(), "[line 2] Error at '+': Expected expression");
    }

    #[test]
    fn test_io_error_has_no_line() {
        let err = Error::Io { path: "missing.lox".to_string(), reason: "not found".to_string() };
        assert_eq!(err.span(), None);
        assert_eq!(err.report(), "error reading file \"missing.lox\": not found");
    }
}

//! Error types for tokenizing and parsing grammar lines
//!
//! Lexical errors are recoverable: the tokenizer reports them, skips one character and
//! carries on with the same line. Syntax errors end the whole session for the current
//! input, so no grammar is produced for it.

use std::fmt;

/// Errors raised by the tokenizer. None of them abort tokenizing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexicalError {
    /// A character no token can start with. Line and column are 1-based.
    InvalidCharacter {
        character: char,
        line: usize,
        column: usize,
    },
}

impl fmt::Display for LexicalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexicalError::InvalidCharacter {
                character,
                line,
                column,
            } => write!(
                f,
                "invalid character '{}' at {}:{}",
                character.escape_debug(),
                line,
                column
            ),
        }
    }
}

impl std::error::Error for LexicalError {}

/// Errors raised by the line parser. Any of them ends the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// The parser could not continue at this token.
    UnexpectedToken {
        kind: &'static str,
        value: String,
        line: usize,
        column: usize,
    },
    /// The line ran out of tokens before its `;` was matched.
    MissingTerminator { line: usize },
}

impl SyntaxError {
    /// The 1-based line the error was raised on.
    pub fn line(&self) -> usize {
        match self {
            SyntaxError::UnexpectedToken { line, .. } | SyntaxError::MissingTerminator { line } => {
                *line
            }
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxError::UnexpectedToken {
                kind,
                value,
                line,
                column,
            } => write!(
                f,
                "Syntax error: Unexpected {}({}) at {}:{}",
                kind, value, line, column
            ),
            SyntaxError::MissingTerminator { line } => write!(
                f,
                "Syntax error: No semicolon at the end of rule: line {}",
                line
            ),
        }
    }
}

impl std::error::Error for SyntaxError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexical_error_display() {
        let err = LexicalError::InvalidCharacter {
            character: '$',
            line: 3,
            column: 7,
        };
        assert_eq!(err.to_string(), "invalid character '$' at 3:7");
    }

    #[test]
    fn test_syntax_error_display() {
        let unexpected = SyntaxError::UnexpectedToken {
            kind: "SYMBOL",
            value: "y".to_string(),
            line: 2,
            column: 9,
        };
        assert_eq!(
            unexpected.to_string(),
            "Syntax error: Unexpected SYMBOL(y) at 2:9"
        );
        assert_eq!(unexpected.line(), 2);

        let missing = SyntaxError::MissingTerminator { line: 4 };
        assert_eq!(
            missing.to_string(),
            "Syntax error: No semicolon at the end of rule: line 4"
        );
        assert_eq!(missing.line(), 4);
    }
}

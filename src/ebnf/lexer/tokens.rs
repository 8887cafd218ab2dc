//! Token definitions for grammar description lines
//!
//! This module defines all the tokens that can be produced by the lexer.
//! The tokens are defined using the logos derive macro for efficient tokenization.
//! The reserved words `START` and `EPS` are matched bare or quoted and win over the
//! generic identifier and literal patterns.
use logos::{Lexer, Logos};
use serde::Serialize;
use std::fmt;

/// All possible tokens of a grammar description line
#[derive(Logos, Debug, PartialEq, Eq, Hash, Clone, Serialize)]
#[logos(skip r"[ \t]+")]
pub enum Token {
    // Reserved words
    #[token("START")]
    #[token("\"START\"")]
    Start,
    #[token("EPS")]
    #[token("\"EPS\"")]
    Eps,

    #[regex(r"[A-Za-z][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    NonTerminal(String),

    // Escapes are resolved here, so the value is the literal terminal text.
    // A backslash may precede any character; only `\"`, `\#` and `\\` are escapes.
    #[regex(r##""([^"\\#\n]|\\[^\n])*""##, unescape_symbol)]
    Symbol(String),

    #[token("=")]
    Eq,
    #[token("+")]
    Plus,
    #[token("|")]
    Alt,

    #[token("(")]
    LBr,
    #[token(")")]
    RBr,
    #[token("[")]
    LSb,
    #[token("]")]
    RSb,
    #[token("{")]
    LFb,
    #[token("}")]
    RFb,

    #[token(";")]
    EndOfLine,

    // Stored without the leading '#'
    #[regex(r"#[^\n]*", |lex| lex.slice()[1..].to_string())]
    Comment(String),
}

fn unescape_symbol(lex: &mut Lexer<Token>) -> String {
    let slice = lex.slice();
    unescape(&slice[1..slice.len() - 1])
}

/// Resolve `\"`, `\#` and `\\` in the body of a quoted literal. Any other backslash
/// is kept together with the character after it.
pub fn unescape(raw: &str) -> String {
    let mut value = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            value.push(c);
            continue;
        }
        match chars.next() {
            Some(escaped @ ('"' | '#' | '\\')) => value.push(escaped),
            Some(other) => {
                value.push('\\');
                value.push(other);
            }
            None => value.push('\\'),
        }
    }
    value
}

/// Inverse of [`unescape`], used when a terminal is written back inside quotes.
///
/// Every backslash is doubled, so `a\b` prints as `"a\\b"` and still reads back as `a\b`.
pub fn escape(value: &str) -> String {
    let mut raw = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '"' | '#' | '\\') {
            raw.push('\\');
        }
        raw.push(c);
    }
    raw
}

impl Token {
    /// The token kind name used in diagnostics and token dumps
    pub fn kind(&self) -> &'static str {
        match self {
            Token::Start => "START",
            Token::Eps => "EPS",
            Token::NonTerminal(_) => "NON_TERMINAL",
            Token::Symbol(_) => "SYMBOL",
            Token::Eq => "EQ",
            Token::Plus => "PLUS",
            Token::Alt => "ALT",
            Token::LBr => "LBR",
            Token::RBr => "RBR",
            Token::LSb => "LSB",
            Token::RSb => "RSB",
            Token::LFb => "LFB",
            Token::RFb => "RFB",
            Token::EndOfLine => "END_OF_LINE",
            Token::Comment(_) => "COMMENT",
        }
    }

    /// The literal value carried by the token
    pub fn value(&self) -> String {
        match self {
            Token::NonTerminal(text) | Token::Symbol(text) | Token::Comment(text) => text.clone(),
            Token::Start => "START".to_string(),
            Token::Eps => "EPS".to_string(),
            Token::Eq => "=".to_string(),
            Token::Plus => "+".to_string(),
            Token::Alt => "|".to_string(),
            Token::LBr => "(".to_string(),
            Token::RBr => ")".to_string(),
            Token::LSb => "[".to_string(),
            Token::RSb => "]".to_string(),
            Token::LFb => "{".to_string(),
            Token::RFb => "}".to_string(),
            Token::EndOfLine => ";".to_string(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind(), self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_all(source: &str) -> Vec<Result<Token, ()>> {
        Token::lexer(source).collect()
    }

    #[test]
    fn test_reserved_words() {
        assert_eq!(lex_all("START"), vec![Ok(Token::Start)]);
        assert_eq!(lex_all("EPS"), vec![Ok(Token::Eps)]);
        assert_eq!(lex_all("\"START\""), vec![Ok(Token::Start)]);
        assert_eq!(lex_all("\"EPS\""), vec![Ok(Token::Eps)]);
    }

    #[test]
    fn test_reserved_prefix_is_identifier() {
        assert_eq!(
            lex_all("STARTER EPSILON"),
            vec![
                Ok(Token::NonTerminal("STARTER".to_string())),
                Ok(Token::NonTerminal("EPSILON".to_string())),
            ]
        );
        assert_eq!(
            lex_all("\"EPSILON\""),
            vec![Ok(Token::Symbol("EPSILON".to_string()))]
        );
    }

    #[test]
    fn test_identifier_shape() {
        assert_eq!(
            lex_all("expr_1"),
            vec![Ok(Token::NonTerminal("expr_1".to_string()))]
        );
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(
            lex_all("= + | ( ) [ ] { } ;"),
            vec![
                Ok(Token::Eq),
                Ok(Token::Plus),
                Ok(Token::Alt),
                Ok(Token::LBr),
                Ok(Token::RBr),
                Ok(Token::LSb),
                Ok(Token::RSb),
                Ok(Token::LFb),
                Ok(Token::RFb),
                Ok(Token::EndOfLine),
            ]
        );
    }

    #[test]
    fn test_symbol_escapes() {
        assert_eq!(
            lex_all(r#""a\"b\#c\\d""#),
            vec![Ok(Token::Symbol("a\"b#c\\d".to_string()))]
        );
    }

    #[test]
    fn test_other_backslashes_are_kept() {
        assert_eq!(
            lex_all(r#""a\b""#),
            vec![Ok(Token::Symbol("a\\b".to_string()))]
        );
        assert_eq!(unescape(r"\n\\x"), "\\n\\x");
        assert_eq!(unescape(&escape("a\\b")), "a\\b");
    }

    #[test]
    fn test_comment_drops_hash() {
        assert_eq!(
            lex_all("# just a note"),
            vec![Ok(Token::Comment(" just a note".to_string()))]
        );
    }

    #[test]
    fn test_escape_inverts_unescape() {
        let value = "q\"h#b\\";
        assert_eq!(escape(value), r#"q\"h\#b\\"#);
        assert_eq!(unescape(&escape(value)), value);
    }

    #[test]
    fn test_display() {
        assert_eq!(Token::NonTerminal("A".to_string()).to_string(), "NON_TERMINAL(A)");
        assert_eq!(Token::EndOfLine.to_string(), "END_OF_LINE(;)");
    }
}

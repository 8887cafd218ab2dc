//! Implementation of the line tokenizer
//!
//! Logos does the actual matching. This module adds what the grammar needs on top of it:
//! byte spans relative to the line, 1-based line/column positions, and recovery from
//! characters no token starts with (report, skip exactly one character, resume).

use crate::ebnf::error::LexicalError;
use crate::ebnf::lexer::tokens::Token;
use logos::Logos;
use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// Type alias for token with its byte span inside the line
pub type TokenSpan = (Token, Range<usize>);

/// A single source line after tokenizing.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenizedLine<'a> {
    pub text: &'a str,
    /// 1-based line number
    pub number: usize,
    pub tokens: Vec<TokenSpan>,
    pub errors: Vec<LexicalError>,
}

impl TokenizedLine<'_> {
    /// 1-based column of a byte offset inside this line
    pub fn column_at(&self, offset: usize) -> usize {
        column_at(self.text, offset)
    }

    /// Tokens of this line with their line/column positions
    pub fn located(&self) -> impl Iterator<Item = LocatedToken> + '_ {
        self.tokens.iter().map(move |(token, span)| LocatedToken {
            token: token.clone(),
            line: self.number,
            column: self.column_at(span.start),
        })
    }
}

/// A token with the position it starts at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocatedToken {
    pub token: Token,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for LocatedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}:{}", self.token, self.line, self.column)
    }
}

/// Every token of a multi-line source, plus the characters that were skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenDump {
    pub tokens: Vec<LocatedToken>,
    pub errors: Vec<LexicalError>,
}

fn column_at(text: &str, offset: usize) -> usize {
    text.get(..offset)
        .map_or(offset, |prefix| prefix.chars().count())
        + 1
}

/// Tokenize one line. Invalid characters are reported and skipped one at a time.
pub fn tokenize_line(text: &str, number: usize) -> TokenizedLine<'_> {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();

    // Byte offset of the current lexer's input inside `text`
    let mut offset = 0;
    let mut lexer = Token::lexer(text);

    loop {
        let result = match lexer.next() {
            Some(result) => result,
            None => break,
        };
        let span = lexer.span();
        let start = offset + span.start;

        match result {
            Ok(token) => tokens.push((token, start..offset + span.end)),
            Err(()) => {
                let Some(character) = text[start..].chars().next() else {
                    break;
                };
                let error = LexicalError::InvalidCharacter {
                    character,
                    line: number,
                    column: column_at(text, start),
                };
                log::warn!("Error: {}", error);
                errors.push(error);

                // Restart right after the offending character so logos never swallows more
                offset = start + character.len_utf8();
                lexer = Token::lexer(&text[offset..]);
            }
        }
    }

    TokenizedLine {
        text,
        number,
        tokens,
        errors,
    }
}

/// Tokenize a whole source text line by line
pub fn tokenize(source: &str) -> TokenDump {
    let mut dump = TokenDump::default();
    for (index, text) in source.lines().enumerate() {
        let line = tokenize_line(text, index + 1);
        dump.tokens.extend(line.located());
        dump.errors.extend(line.errors);
    }
    dump
}

/// Convenience function to tokenize a line and keep only the tokens
pub fn tokens_of(text: &str) -> Vec<Token> {
    tokenize_line(text, 1)
        .tokens
        .into_iter()
        .map(|(token, _)| token)
        .collect()
}

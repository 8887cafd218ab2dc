//! Lexer module for grammar description lines
//!
//! This module contains the tokenization logic, including token definitions and the
//! line tokenizer. Lines are lexically independent: a token never spans a line break,
//! and a `#` comment always runs to the end of its line.

pub mod lexer_impl;
pub mod tokens;

pub use lexer_impl::{
    tokenize, tokenize_line, tokens_of, LocatedToken, TokenDump, TokenSpan, TokenizedLine,
};
pub use tokens::Token;

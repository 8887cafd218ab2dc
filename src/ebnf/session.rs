//! Per-input conversion session
//!
//! A [`Session`] owns the grammar builder of one input (usually one file) and drives
//! every line through tokenizer, parser and builder. Lexical errors are collected and
//! processing goes on; the first syntax error ends the session, and from then on the
//! session refuses further lines and produces no grammar.
//!
//! Independent inputs must each get their own session. Reusing one would carry names,
//! symbols and rules over from the previous input.

use crate::ebnf::error::{LexicalError, SyntaxError};
use crate::ebnf::grammar::{Grammar, GrammarBuilder};
use crate::ebnf::lexer::tokenize_line;
use crate::ebnf::parser::parse_line;

/// The result of a successful session
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub grammar: Grammar,
    /// Characters the tokenizer had to skip
    pub diagnostics: Vec<LexicalError>,
}

/// Converts the lines of one input into a grammar.
#[derive(Debug, Clone)]
pub struct Session {
    builder: GrammarBuilder,
    diagnostics: Vec<LexicalError>,
    failure: Option<SyntaxError>,
    line_number: usize,
}

impl Session {
    pub fn new() -> Self {
        Self::with_builder(GrammarBuilder::new())
    }

    /// A session whose synthesized non-terminals use `prefix`
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self::with_builder(GrammarBuilder::with_prefix(prefix))
    }

    fn with_builder(builder: GrammarBuilder) -> Self {
        Session {
            builder,
            diagnostics: Vec::new(),
            failure: None,
            line_number: 0,
        }
    }

    /// Process the next line of input. Lines are numbered from 1 in the order fed.
    pub fn feed_line(&mut self, text: &str) -> Result<(), SyntaxError> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        self.line_number += 1;

        let tokenized = tokenize_line(text, self.line_number);
        self.diagnostics.extend(tokenized.errors.iter().cloned());

        match parse_line(&tokenized) {
            Ok(line) => {
                log::trace!("line {}: {:?}", self.line_number, line);
                line.apply(&mut self.builder);
                Ok(())
            }
            Err(error) => {
                log::debug!("session aborted: {}", error);
                self.failure = Some(error.clone());
                Err(error)
            }
        }
    }

    /// Process lines until the input ends or a syntax error stops the session.
    pub fn feed_lines<'a>(
        &mut self,
        lines: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), SyntaxError> {
        for text in lines {
            self.feed_line(text)?;
        }
        Ok(())
    }

    /// Lexical errors collected so far
    pub fn diagnostics(&self) -> &[LexicalError] {
        &self.diagnostics
    }

    /// The grammar accumulated so far
    pub fn grammar(&self) -> &Grammar {
        self.builder.grammar()
    }

    /// End the session. Fails if any line had a syntax error.
    pub fn finish(self) -> Result<Conversion, SyntaxError> {
        if let Some(error) = self.failure {
            return Err(error);
        }
        Ok(Conversion {
            grammar: self.builder.finish(),
            diagnostics: self.diagnostics,
        })
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a whole source text in a fresh session.
pub fn convert(source: &str) -> Result<Conversion, SyntaxError> {
    let mut session = Session::new();
    session.feed_lines(source.lines())?;
    session.finish()
}

/// Like [`convert`], with a custom prefix for synthesized non-terminals.
pub fn convert_with_prefix(source: &str, prefix: &str) -> Result<Conversion, SyntaxError> {
    let mut session = Session::with_prefix(prefix);
    session.feed_lines(source.lines())?;
    session.finish()
}

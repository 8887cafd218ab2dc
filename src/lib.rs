//! # ebnf2bnf
//!
//! Converts line-oriented EBNF grammar descriptions into canonical BNF.
//!
//! Every input line is tokenized, parsed into a start declaration or a rule, and
//! reduced into a per-file [grammar builder](ebnf::grammar::GrammarBuilder) that
//! replaces `( )`, `[ ]` and `{ }` groups with fresh non-terminals. The finished
//! [`Grammar`](ebnf::grammar::Grammar) is then rendered by the
//! [printer](ebnf::grammar::printer).
//!
//! ## Testing
//!
//! Unit tests live next to the code they cover; cross-module behavior (printer
//! snapshots, round-trips, properties) is tested under `tests/`.

pub mod ebnf;

pub use ebnf::grammar::{Bracket, Element, Expr, Grammar, GrammarBuilder, Rule, Term};
pub use ebnf::session::{convert, Conversion, Session};

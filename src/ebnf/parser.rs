//! Parser module for grammar description lines
//!
//! Each line is parsed on its own into a [`Line`]: a start declaration, a rule, a comment
//! or nothing. Applying a rule line to a [`GrammarBuilder`](crate::ebnf::grammar::GrammarBuilder)
//! is where bracketed groups get desugared.

pub mod line;
pub mod syntax;

pub use line::{expression, parse_line};
pub use syntax::{Line, SyntaxElem, SyntaxExpr, SyntaxTerm};

//! Syntax tree of a single grammar line
//!
//! The parser keeps bracketed groups as they were written. Reducing the tree into a
//! [`GrammarBuilder`] replaces every group, innermost first and left to right, with the
//! fresh non-terminal the builder synthesizes for it.

use crate::ebnf::grammar::{Bracket, Element, Expr, GrammarBuilder, Term};

/// An element as written, brackets included
#[derive(Debug, Clone, PartialEq)]
pub enum SyntaxElem {
    NonTerminal(String),
    Symbol(String),
    Epsilon,
    Group(Bracket, SyntaxExpr),
}

/// Elements joined by `+`
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxTerm(pub Vec<SyntaxElem>);

/// Terms joined by `|`
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxExpr(pub Vec<SyntaxTerm>);

/// What one line of input declares
#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    /// `START = name ;`
    Start {
        name: String,
        comment: Option<String>,
    },
    /// `lhs = body ;`
    Rule {
        lhs: String,
        body: SyntaxExpr,
        comment: Option<String>,
    },
    /// A line holding only a comment
    Comment(String),
    /// A line without tokens
    Blank,
}

impl SyntaxElem {
    fn reduce(self, builder: &mut GrammarBuilder) -> Element {
        match self {
            SyntaxElem::NonTerminal(name) => Element::NonTerminal(name),
            SyntaxElem::Symbol(value) => Element::Symbol(value),
            SyntaxElem::Epsilon => Element::Epsilon,
            SyntaxElem::Group(bracket, body) => {
                let body = body.reduce(builder);
                builder.desugar_group(body, bracket)
            }
        }
    }
}

impl SyntaxTerm {
    fn reduce(self, builder: &mut GrammarBuilder) -> Term {
        Term::new(
            self.0
                .into_iter()
                .map(|element| element.reduce(builder))
                .collect(),
        )
    }
}

impl SyntaxExpr {
    /// Lower to plain BNF, desugaring groups through `builder`.
    pub fn reduce(self, builder: &mut GrammarBuilder) -> Expr {
        Expr::new(
            self.0
                .into_iter()
                .map(|term| term.reduce(builder))
                .collect(),
        )
    }
}

impl Line {
    /// Apply the line's semantic action to the session's builder.
    pub fn apply(self, builder: &mut GrammarBuilder) {
        match self {
            Line::Start { name, .. } => builder.set_start(name),
            Line::Rule { lhs, body, .. } => {
                let body = body.reduce(builder);
                builder.add_rule(lhs, body);
            }
            Line::Comment(_) | Line::Blank => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ebnf::grammar::Rule;

    fn sym(value: &str) -> SyntaxElem {
        SyntaxElem::Symbol(value.to_string())
    }

    fn single(element: SyntaxElem) -> SyntaxExpr {
        SyntaxExpr(vec![SyntaxTerm(vec![element])])
    }

    #[test]
    fn test_inner_groups_are_desugared_first() {
        // A = ( [ "a" ] + "b" ) ;
        let inner = SyntaxElem::Group(Bracket::Optional, single(sym("a")));
        let outer = SyntaxElem::Group(
            Bracket::Group,
            SyntaxExpr(vec![SyntaxTerm(vec![inner, sym("b")])]),
        );
        let line = Line::Rule {
            lhs: "A".to_string(),
            body: single(outer),
            comment: None,
        };

        let mut builder = GrammarBuilder::new();
        line.apply(&mut builder);
        let lhs: Vec<_> = builder
            .grammar()
            .rules()
            .iter()
            .map(|rule| rule.lhs.as_str())
            .collect();
        assert_eq!(lhs, vec!["__NT0", "__NT1", "__NT2", "A"]);
        assert_eq!(
            builder.grammar().rules()[3],
            Rule::new(
                "A",
                Expr::new(vec![Term::new(vec![Element::non_terminal("__NT2")])])
            )
        );
    }

    #[test]
    fn test_groups_are_desugared_left_to_right() {
        // A = ( "a" ) | ( "b" ) ;
        let body = SyntaxExpr(vec![
            SyntaxTerm(vec![SyntaxElem::Group(Bracket::Group, single(sym("a")))]),
            SyntaxTerm(vec![SyntaxElem::Group(Bracket::Group, single(sym("b")))]),
        ]);
        let mut builder = GrammarBuilder::new();
        let expr = body.reduce(&mut builder);
        assert_eq!(expr.to_string(), "__NT0 | __NT1");
        assert_eq!(
            builder.grammar().merged_body("__NT1").to_string(),
            "\"b\""
        );
    }

    #[test]
    fn test_comment_and_blank_lines_do_nothing() {
        let mut builder = GrammarBuilder::new();
        Line::Comment(" note".to_string()).apply(&mut builder);
        Line::Blank.apply(&mut builder);
        assert!(builder.grammar().rules().is_empty());
        assert!(builder.grammar().non_terminals().is_empty());
    }
}

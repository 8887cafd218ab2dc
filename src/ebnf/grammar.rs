//! Grammar data model
//!
//! A [`Grammar`] is a list of [`Rule`]s plus the sets of terminal symbols and non-terminal
//! names used by them. Rules sharing a left-hand side are kept apart in storage and only
//! merged when the grammar is presented (see [`Grammar::merged_body`]).
//!
//! The grammar is only ever mutated through a [`GrammarBuilder`], which keeps the symbol
//! and non-terminal sets in sync with the rules.

pub mod builder;
pub mod printer;

pub use builder::{GrammarBuilder, DEFAULT_FRESH_PREFIX};

use serde::Serialize;
use std::collections::BTreeSet;

/// Rendered in place of the start symbol while none has been declared.
pub const START_NOT_STATED: &str = "_NotStated_";

/// One element of a concatenation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Element {
    NonTerminal(String),
    Symbol(String),
    Epsilon,
}

impl Element {
    pub fn non_terminal(name: impl Into<String>) -> Self {
        Element::NonTerminal(name.into())
    }

    pub fn symbol(value: impl Into<String>) -> Self {
        Element::Symbol(value.into())
    }
}

/// An ordered concatenation of elements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Term(pub Vec<Element>);

impl Term {
    pub fn new(elements: Vec<Element>) -> Self {
        Term(elements)
    }

    /// The term holding only the empty string
    pub fn epsilon() -> Self {
        Term(vec![Element::Epsilon])
    }

    pub fn elements(&self) -> &[Element] {
        &self.0
    }
}

/// An ordered list of alternatives. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Expr(pub Vec<Term>);

impl Expr {
    pub fn new(terms: Vec<Term>) -> Self {
        Expr(terms)
    }

    pub fn terms(&self) -> &[Term] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Every element of every alternative, in order
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.0.iter().flat_map(|term| term.0.iter())
    }

    /// Symbol values referenced by this expression
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.elements().filter_map(|element| match element {
            Element::Symbol(value) => Some(value.as_str()),
            Element::NonTerminal(_) | Element::Epsilon => None,
        })
    }

    /// Non-terminal names referenced by this expression
    pub fn non_terminals(&self) -> impl Iterator<Item = &str> {
        self.elements().filter_map(|element| match element {
            Element::NonTerminal(name) => Some(name.as_str()),
            Element::Symbol(_) | Element::Epsilon => None,
        })
    }

    fn append(&mut self, other: &Expr) {
        self.0.extend(other.0.iter().cloned());
    }
}

/// `lhs` derives `body`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    pub lhs: String,
    pub body: Expr,
}

impl Rule {
    pub fn new(lhs: impl Into<String>, body: Expr) -> Self {
        Rule {
            lhs: lhs.into(),
            body,
        }
    }
}

/// Bracket kinds of the EBNF sugar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Bracket {
    /// `( ... )`
    Group,
    /// `[ ... ]`, zero or one occurrence
    Optional,
    /// `{ ... }`, zero or more occurrences
    Repetition,
}

impl Bracket {
    pub fn open(self) -> char {
        match self {
            Bracket::Group => '(',
            Bracket::Optional => '[',
            Bracket::Repetition => '{',
        }
    }
}

/// A context-free grammar in canonical BNF form.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Grammar {
    symbols: BTreeSet<String>,
    non_terminals: BTreeSet<String>,
    start: Option<String>,
    rules: Vec<Rule>,
}

impl Grammar {
    pub fn symbols(&self) -> &BTreeSet<String> {
        &self.symbols
    }

    pub fn non_terminals(&self) -> &BTreeSet<String> {
        &self.non_terminals
    }

    /// The declared start symbol, if any
    pub fn start(&self) -> Option<&str> {
        self.start.as_deref()
    }

    /// The start symbol, or [`START_NOT_STATED`]
    pub fn start_or_sentinel(&self) -> &str {
        self.start().unwrap_or(START_NOT_STATED)
    }

    /// All rules in declaration order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Rules whose left-hand side is `name`, in declaration order
    pub fn rules_for<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Rule> + 'a {
        self.rules.iter().filter(move |rule| rule.lhs == name)
    }

    /// The alternatives of every rule for `name`, concatenated in declaration order
    pub fn merged_body(&self, name: &str) -> Expr {
        let mut merged = Expr::default();
        for rule in self.rules_for(name) {
            merged.append(&rule.body);
        }
        merged
    }

    /// Declared non-terminals that no rule defines
    pub fn undefined_non_terminals(&self) -> Vec<&str> {
        self.non_terminals
            .iter()
            .filter(|name| self.merged_body(name).is_empty())
            .map(String::as_str)
            .collect()
    }
}

//! Grammar accumulation and EBNF desugaring
//!
//! A [`GrammarBuilder`] owns the grammar of one session. Creating a new builder is how a
//! new session starts: nothing is shared between builders, so names, symbols and rules
//! of one input never leak into the next.
//!
//! Bracketed groups are removed by [`GrammarBuilder::desugar_group`], which introduces
//! fresh non-terminals:
//!
//!     ( e )   =>  N = e;                    result N
//!     [ e ]   =>  N = e;  M = EPS | N;      result M
//!     { e }   =>  N = e;  M = EPS | M + N;  result M
//!
//! The repetition is left-recursive on purpose and must stay that way.

use super::{Bracket, Element, Expr, Grammar, Rule, Term};

/// Prefix of synthesized non-terminal names
pub const DEFAULT_FRESH_PREFIX: &str = "__NT";

/// Accumulates the grammar of one session.
#[derive(Debug, Clone)]
pub struct GrammarBuilder {
    grammar: Grammar,
    prefix: String,
    // Every index below this one is already taken, so scanning starts here.
    next_index: usize,
}

impl GrammarBuilder {
    /// Start a new session with the default fresh-name prefix.
    pub fn new() -> Self {
        Self::with_prefix(DEFAULT_FRESH_PREFIX)
    }

    /// Start a new session whose fresh names are `prefix` followed by an index.
    ///
    /// The prefix is not checked here. If `prefix` plus digits lexes as an identifier,
    /// input rules can name synthesized non-terminals and extend them.
    /// [`Loader::build`](crate::ebnf::config::Loader::build) rejects such prefixes.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        GrammarBuilder {
            grammar: Grammar::default(),
            prefix: prefix.into(),
            next_index: 0,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The grammar accumulated so far
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// End the session and hand out the grammar.
    pub fn finish(self) -> Grammar {
        self.grammar
    }

    /// Record the start symbol. A later call overwrites an earlier one.
    pub fn set_start(&mut self, name: impl Into<String>) {
        let name = name.into();
        if let Some(previous) = self.grammar.start.as_deref() {
            log::debug!("start symbol redeclared: {} -> {}", previous, name);
        }
        self.grammar.non_terminals.insert(name.clone());
        self.grammar.start = Some(name);
    }

    /// Append a rule, declaring its left-hand side and everything its body references.
    pub fn add_rule(&mut self, lhs: impl Into<String>, body: Expr) {
        let lhs = lhs.into();
        self.grammar
            .symbols
            .extend(body.symbols().map(str::to_string));
        self.grammar
            .non_terminals
            .extend(body.non_terminals().map(str::to_string));
        self.grammar.non_terminals.insert(lhs.clone());
        log::trace!("rule added for {}", lhs);
        self.grammar.rules.push(Rule { lhs, body });
    }

    /// Replace one bracketed group by a reference to a fresh non-terminal.
    ///
    /// Inner groups must be desugared first, so `body` contains plain elements only.
    pub fn desugar_group(&mut self, body: Expr, bracket: Bracket) -> Element {
        let inner = self.fresh_name();
        self.add_rule(inner.clone(), body);

        let outer = match bracket {
            Bracket::Group => return Element::NonTerminal(inner),
            Bracket::Optional => {
                let outer = self.fresh_name();
                let alternatives = Expr::new(vec![
                    Term::epsilon(),
                    Term::new(vec![Element::NonTerminal(inner)]),
                ]);
                self.add_rule(outer.clone(), alternatives);
                outer
            }
            Bracket::Repetition => {
                let outer = self.fresh_name();
                let alternatives = Expr::new(vec![
                    Term::epsilon(),
                    Term::new(vec![
                        Element::NonTerminal(outer.clone()),
                        Element::NonTerminal(inner),
                    ]),
                ]);
                self.add_rule(outer.clone(), alternatives);
                outer
            }
        };
        log::trace!("desugared '{}' group into {}", bracket.open(), outer);
        Element::NonTerminal(outer)
    }

    /// The lowest `prefix + index` name not yet declared.
    ///
    /// The name is not declared here; the caller's `add_rule` does that, which is what
    /// moves the next scan past it.
    fn fresh_name(&mut self) -> String {
        loop {
            let candidate = format!("{}{}", self.prefix, self.next_index);
            if !self.grammar.non_terminals.contains(&candidate) {
                return candidate;
            }
            self.next_index += 1;
        }
    }
}

impl Default for GrammarBuilder {
    fn default() -> Self {
        Self::new()
    }
}

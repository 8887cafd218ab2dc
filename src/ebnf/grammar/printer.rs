//! Canonical BNF rendering
//!
//! Elements render as `"value"` (symbols, re-escaped), bare names (non-terminals) or
//! `EPS`. Elements of one alternative are joined with ` + `, alternatives with ` | `.
//! Each defined non-terminal gets one line holding the merged alternatives of all its
//! rules; declared names without rules are left out.

use super::{Element, Expr, Grammar, Term};
use crate::ebnf::lexer::tokens::escape;
use std::fmt;

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::NonTerminal(name) => f.write_str(name),
            Element::Symbol(value) => write!(f, "\"{}\"", escape(value)),
            Element::Epsilon => f.write_str("EPS"),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, element) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(" + ")?;
            }
            write!(f, "{}", element)?;
        }
        Ok(())
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, term) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{}", term)?;
        }
        Ok(())
    }
}

/// The rule line for `name`, or `None` when no rule defines it
pub fn rule_line(grammar: &Grammar, name: &str) -> Option<String> {
    let body = grammar.merged_body(name);
    if body.is_empty() {
        return None;
    }
    Some(format!("{} = {};", name, body))
}

/// One line per defined non-terminal
pub fn rules_to_string(grammar: &Grammar) -> String {
    let mut result = String::new();
    for name in grammar.non_terminals() {
        if let Some(line) = rule_line(grammar, name) {
            result.push_str(&line);
            result.push('\n');
        }
    }
    result
}

fn set_to_string(items: impl Iterator<Item = String>) -> String {
    format!("{{{}}}", items.collect::<Vec<_>>().join(", "))
}

/// The full grammar report: symbols, non-terminals, start symbol, then the rules.
pub fn to_report_string(grammar: &Grammar) -> String {
    let mut result = String::from("EBNF Grammar: Syntactic analysis completed\n");
    let symbols = set_to_string(
        grammar
            .symbols()
            .iter()
            .map(|value| format!("\"{}\"", escape(value))),
    );
    let non_terminals = set_to_string(grammar.non_terminals().iter().cloned());

    result.push_str(&format!("List of symbol characters: {}\n", symbols));
    result.push_str(&format!(
        "List of non-terminal characters: {}\n",
        non_terminals
    ));
    result.push_str(&format!(
        "Start non-terminal character: {}\n",
        grammar.start_or_sentinel()
    ));
    result.push_str("Rules:\n");
    result.push_str(&rules_to_string(grammar));
    result
}

/// Grammar text that can be fed back into the converter: the start declaration, if
/// any, followed by the rules.
pub fn to_bnf_string(grammar: &Grammar) -> String {
    let mut result = String::new();
    if let Some(start) = grammar.start() {
        result.push_str(&format!("START = {};\n", start));
    }
    result.push_str(&rules_to_string(grammar));
    result
}

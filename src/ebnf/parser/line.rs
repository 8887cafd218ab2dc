//! Line parser implementation using chumsky
//!
//! Grammar of one line:
//!
//!     fileline   := start_decl | rule | COMMENT | (nothing)
//!     start_decl := START EQ NON_TERMINAL END_OF_LINE [COMMENT]
//!     rule       := NON_TERMINAL EQ expr END_OF_LINE [COMMENT]
//!     expr       := term (ALT term)*
//!     term       := elem (PLUS elem)*
//!     elem       := NON_TERMINAL | SYMBOL | EPS
//!                 | LBR expr RBR | LSB expr RSB | LFB expr RFB
//!
//! The parser runs over `(Token, Range<usize>)` pairs so that the error reporting can
//! point back at the offending token's column.

use chumsky::prelude::*;

use super::syntax::{Line, SyntaxElem, SyntaxExpr, SyntaxTerm};
use crate::ebnf::error::SyntaxError;
use crate::ebnf::grammar::Bracket;
use crate::ebnf::lexer::{Token, TokenSpan, TokenizedLine};

/// Type alias for parser error
type ParserError = Simple<TokenSpan>;

/// Match one specific token
fn token(t: Token) -> impl Parser<TokenSpan, (), Error = ParserError> + Clone {
    filter(move |(tok, _): &TokenSpan| tok == &t).ignored()
}

fn non_terminal() -> impl Parser<TokenSpan, String, Error = ParserError> + Clone {
    select! { (Token::NonTerminal(name), _) => name }
}

fn comment() -> impl Parser<TokenSpan, String, Error = ParserError> + Clone {
    select! { (Token::Comment(text), _) => text }
}

/// `expr` with its nested groups
pub fn expression() -> impl Parser<TokenSpan, SyntaxExpr, Error = ParserError> + Clone {
    recursive(|expr| {
        let group = |open: Token, close: Token, bracket: Bracket| {
            expr.clone()
                .delimited_by(token(open), token(close))
                .map(move |body| SyntaxElem::Group(bracket, body))
        };

        let elem = select! {
            (Token::NonTerminal(name), _) => SyntaxElem::NonTerminal(name),
            (Token::Symbol(value), _) => SyntaxElem::Symbol(value),
            (Token::Eps, _) => SyntaxElem::Epsilon,
        }
        .or(group(Token::LBr, Token::RBr, Bracket::Group))
        .or(group(Token::LSb, Token::RSb, Bracket::Optional))
        .or(group(Token::LFb, Token::RFb, Bracket::Repetition));

        let term = elem
            .separated_by(token(Token::Plus))
            .at_least(1)
            .map(SyntaxTerm);

        term.separated_by(token(Token::Alt))
            .at_least(1)
            .map(SyntaxExpr)
    })
}

/// A whole line, which must be consumed entirely
pub fn line() -> impl Parser<TokenSpan, Line, Error = ParserError> {
    let start_decl = token(Token::Start)
        .ignore_then(token(Token::Eq))
        .ignore_then(non_terminal())
        .then_ignore(token(Token::EndOfLine))
        .then(comment().or_not())
        .map(|(name, comment)| Line::Start { name, comment });

    let rule = non_terminal()
        .then_ignore(token(Token::Eq))
        .then(expression())
        .then_ignore(token(Token::EndOfLine))
        .then(comment().or_not())
        .map(|((lhs, body), comment)| Line::Rule { lhs, body, comment });

    let comment_only = comment().map(Line::Comment);
    let blank = end().to(Line::Blank);

    start_decl
        .or(rule)
        .or(comment_only)
        .or(blank)
        .then_ignore(end())
}

/// Parse one tokenized line.
///
/// Running out of tokens is reported as a missing terminator; anything else the parser
/// stops at is an unexpected token.
pub fn parse_line(line: &TokenizedLine<'_>) -> Result<Line, SyntaxError> {
    self::line()
        .parse(line.tokens.clone())
        .map_err(|errors| {
            errors
                .into_iter()
                .next()
                .map(|error| to_syntax_error(line, &error))
                .unwrap_or(SyntaxError::MissingTerminator { line: line.number })
        })
}

fn to_syntax_error(line: &TokenizedLine<'_>, error: &ParserError) -> SyntaxError {
    match error.found() {
        Some((token, span)) => SyntaxError::UnexpectedToken {
            kind: token.kind(),
            value: token.value(),
            line: line.number,
            column: line.column_at(span.start),
        },
        None => SyntaxError::MissingTerminator { line: line.number },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ebnf::lexer::tokenize_line;

    fn parse(text: &str) -> Result<Line, SyntaxError> {
        parse_line(&tokenize_line(text, 1))
    }

    fn sym(value: &str) -> SyntaxElem {
        SyntaxElem::Symbol(value.to_string())
    }

    fn nt(name: &str) -> SyntaxElem {
        SyntaxElem::NonTerminal(name.to_string())
    }

    #[test]
    fn test_start_declaration() {
        assert_eq!(
            parse("START = S ;"),
            Ok(Line::Start {
                name: "S".to_string(),
                comment: None
            })
        );
    }

    #[test]
    fn test_rule_with_comment() {
        assert_eq!(
            parse(r#"A = "x" + B | EPS ; # two alternatives"#),
            Ok(Line::Rule {
                lhs: "A".to_string(),
                body: SyntaxExpr(vec![
                    SyntaxTerm(vec![sym("x"), nt("B")]),
                    SyntaxTerm(vec![SyntaxElem::Epsilon]),
                ]),
                comment: Some(" two alternatives".to_string()),
            })
        );
    }

    #[test]
    fn test_nested_groups() {
        let Ok(Line::Rule { body, .. }) = parse(r#"A = { ( "a" | B ) + [ C ] } ;"#) else {
            panic!("expected a rule");
        };
        let group = SyntaxElem::Group(
            Bracket::Group,
            SyntaxExpr(vec![SyntaxTerm(vec![sym("a")]), SyntaxTerm(vec![nt("B")])]),
        );
        let optional = SyntaxElem::Group(
            Bracket::Optional,
            SyntaxExpr(vec![SyntaxTerm(vec![nt("C")])]),
        );
        assert_eq!(
            body,
            SyntaxExpr(vec![SyntaxTerm(vec![SyntaxElem::Group(
                Bracket::Repetition,
                SyntaxExpr(vec![SyntaxTerm(vec![group, optional])]),
            )])])
        );
    }

    #[test]
    fn test_comment_and_blank_lines() {
        assert_eq!(parse("# note"), Ok(Line::Comment(" note".to_string())));
        assert_eq!(parse(""), Ok(Line::Blank));
        assert_eq!(parse("   \t"), Ok(Line::Blank));
    }

    #[test]
    fn test_missing_terminator() {
        assert_eq!(
            parse(r#"A = "x""#),
            Err(SyntaxError::MissingTerminator { line: 1 })
        );
        assert_eq!(
            parse("START = S"),
            Err(SyntaxError::MissingTerminator { line: 1 })
        );
    }

    #[test]
    fn test_unexpected_token() {
        assert_eq!(
            parse(r#"A = "x" "y" ;"#),
            Err(SyntaxError::UnexpectedToken {
                kind: "SYMBOL",
                value: "y".to_string(),
                line: 1,
                column: 9
            })
        );
    }

    #[test]
    fn test_unbalanced_bracket() {
        assert_eq!(
            parse(r#"A = ( "x" ] ;"#),
            Err(SyntaxError::UnexpectedToken {
                kind: "RSB",
                value: "]".to_string(),
                line: 1,
                column: 11
            })
        );
    }

    #[test]
    fn test_trailing_tokens_after_terminator() {
        assert_eq!(
            parse("A = B ; C"),
            Err(SyntaxError::UnexpectedToken {
                kind: "NON_TERMINAL",
                value: "C".to_string(),
                line: 1,
                column: 9
            })
        );
    }

    #[test]
    fn test_empty_body_is_rejected() {
        assert_eq!(
            parse("A = ;"),
            Err(SyntaxError::UnexpectedToken {
                kind: "END_OF_LINE",
                value: ";".to_string(),
                line: 1,
                column: 5
            })
        );
    }
}

//! Primitive parsers
//!
//! The leaves of every grammar. Each one fails without consuming input, so
//! they are always safe under `choice` and `repeat`.

use regex_automata::meta::Regex;
use regex_automata::util::syntax;
use regex_automata::{Anchored, Input};

use crate::error::GrammarError;
use crate::parser::{ParseResult, Parser};

/// Match `text` exactly (case-sensitive) at the current position.
///
/// An empty `text` is allowed and always succeeds without consuming input.
/// Keep it out of `repeat`, which reports a zero-width iteration as a
/// grammar error.
pub fn literal(text: impl Into<String>) -> Parser<String> {
    let text = text.into();
    Parser::new(move |input: &str, position| {
        let found = input
            .get(position..)
            .is_some_and(|rest| rest.starts_with(text.as_str()));
        Ok(if found {
            ParseResult::success(text.clone(), position + text.len())
        } else {
            ParseResult::failure(position)
        })
    })
}

/// Match one character that is in `charset`, or with `negate`, one that is
/// not. Always fails at the end of input.
pub fn char_class(charset: impl Into<String>, negate: bool) -> Parser<char> {
    let charset = charset.into();
    Parser::new(move |input: &str, position| {
        let next = input.get(position..).and_then(|rest| rest.chars().next());
        Ok(match next {
            Some(ch) if charset.contains(ch) != negate => {
                ParseResult::success(ch, position + ch.len_utf8())
            }
            _ => ParseResult::failure(position),
        })
    })
}

/// Match the regular expression `expr` anchored at the current position.
///
/// The expression is compiled on its own and searched in anchored mode over
/// the suffix of the input starting at the position, so no branch of it can
/// match further along. `^` and `\b` at its start refer to that position.
pub fn pattern(expr: &str) -> Result<Parser<String>, GrammarError> {
    compile(expr, false).map(anchored)
}

/// Like [`pattern`], matching without regard to case.
pub fn pattern_case_insensitive(expr: &str) -> Result<Parser<String>, GrammarError> {
    compile(expr, true).map(anchored)
}

fn compile(expr: &str, case_insensitive: bool) -> Result<Regex, GrammarError> {
    Regex::builder()
        .syntax(syntax::Config::new().case_insensitive(case_insensitive))
        .build(expr)
        .map_err(|source| GrammarError::InvalidPattern {
            pattern: expr.to_string(),
            source,
        })
}

fn anchored(regex: Regex) -> Parser<String> {
    Parser::new(move |input: &str, position| {
        let found = input.get(position..).and_then(|rest| {
            regex
                .find(Input::new(rest).anchored(Anchored::Yes))
                .map(|m| rest[m.range()].to_string())
        });
        Ok(match found {
            Some(text) => {
                let next = position + text.len();
                ParseResult::success(text, next)
            }
            None => ParseResult::failure(position),
        })
    })
}

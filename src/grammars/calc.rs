//! A calculator for sums and differences of integers with parentheses.
//!
//! ```text
//! number      = [1-9][0-9]* | [0-9]
//! operator    = "+" | "-"
//! parenthesis = "(" expression ")"
//! atom        = number | parenthesis
//! expression  = atom (operator atom)*
//! ```
//!
//! A parsed [`Expr`] serializes to a flat array per nesting level, e.g.
//! `1+2-(3+1-((4)))` becomes `[1,"+",2,"-",[3,"+",1,"-",[[4]]]]`.

use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::combinators::{choice, repeat, sequence};
use crate::diagnostics::FailureTracker;
use crate::driver::{Driver, DriverOptions};
use crate::error::{GrammarError, ParseError};
use crate::lazy::recursive;
use crate::parser::Parser;
use crate::primitives::{char_class, literal, pattern};

const NUMBER: &str = "[1-9][0-9]*|[0-9]";
const WHITESPACE: &str = " \t\r\n";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct CalcOptions {
    /// Permit whitespace before and between tokens.
    pub allow_whitespace: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Atom {
    Number(i64),
    Group(Box<Expr>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expr {
    pub first: Atom,
    pub rest: Vec<(Operator, Atom)>,
}

impl Serialize for Atom {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Atom::Number(value) => serializer.serialize_i64(*value),
            Atom::Group(inner) => inner.serialize(serializer),
        }
    }
}

impl Serialize for Expr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(1 + 2 * self.rest.len()))?;
        seq.serialize_element(&self.first)?;
        for (operator, atom) in &self.rest {
            seq.serialize_element(operator)?;
            seq.serialize_element(atom)?;
        }
        seq.end()
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Grammar(#[from] GrammarError),

    #[error("arithmetic overflow")]
    Overflow,
}

/// Build the calculator grammar. Tokens record what was expected into
/// `tracker` when they fail.
pub fn grammar(
    options: CalcOptions,
    tracker: &FailureTracker,
) -> Result<Parser<Expr>, GrammarError> {
    // Literals too large for i64 do not match.
    let number = pattern(NUMBER)?
        .try_map(|digits| digits.parse::<i64>().ok())
        .map(Atom::Number);
    let number = lexeme(number, options).labelled("number", tracker);

    let operator = char_class("+-", false).map(|symbol| match symbol {
        '+' => Operator::Plus,
        _ => Operator::Minus,
    });
    let operator = lexeme(operator, options).labelled("operator", tracker);

    let open = lexeme(literal("("), options).labelled("'('", tracker);
    let close = lexeme(literal(")"), options).labelled("')'", tracker);

    let expression = recursive(move |expression: Parser<Expr>| {
        let parenthesis = sequence((open, expression, close))
            .map(|(_, inner, _)| Atom::Group(Box::new(inner)));
        let atom = choice((number, parenthesis));
        sequence((atom.clone(), repeat(sequence((operator, atom)))))
            .map(|(first, rest)| Expr { first, rest })
    });

    if !options.allow_whitespace {
        return Ok(expression);
    }
    Ok(sequence((whitespace(), expression)).map(|(_, expr)| expr))
}

fn whitespace() -> Parser<Vec<char>> {
    repeat(char_class(WHITESPACE, false))
}

fn lexeme<T: 'static>(token: Parser<T>, options: CalcOptions) -> Parser<T> {
    if !options.allow_whitespace {
        return token;
    }
    sequence((token, whitespace())).map(|(value, _)| value)
}

pub fn evaluate(expr: &Expr) -> Result<i64, CalcError> {
    expr.rest
        .iter()
        .try_fold(evaluate_atom(&expr.first)?, |total, (operator, atom)| {
            let operand = evaluate_atom(atom)?;
            match operator {
                Operator::Plus => total.checked_add(operand),
                Operator::Minus => total.checked_sub(operand),
            }
            .ok_or(CalcError::Overflow)
        })
}

fn evaluate_atom(atom: &Atom) -> Result<i64, CalcError> {
    match atom {
        Atom::Number(value) => Ok(*value),
        Atom::Group(inner) => evaluate(inner),
    }
}

/// The calculator grammar behind a [`Driver`].
///
/// The driver's tracker is shared by every parse through this calculator;
/// use one calculator per thread when error messages matter.
#[derive(Debug, Clone)]
pub struct Calculator {
    driver: Driver<Expr>,
}

impl Calculator {
    pub fn new(options: CalcOptions, driver_options: DriverOptions) -> Result<Self, CalcError> {
        let tracker = FailureTracker::new();
        let driver = Driver::new(grammar(options, &tracker)?)
            .with_options(driver_options)
            .with_tracker(tracker);
        Ok(Self { driver })
    }

    pub fn parse(&self, source: &str) -> Result<Expr, CalcError> {
        Ok(self.driver.parse(source)?)
    }

    pub fn evaluate(&self, source: &str) -> Result<i64, CalcError> {
        evaluate(&self.parse(source)?)
    }
}

//! Error types
//!
//! Parse failure is not an error here: it is the `matched` flag of a
//! [`ParseResult`](crate::parser::ParseResult). [`GrammarError`] covers
//! grammars that cannot be run as written, and [`ParseError`] is the
//! driver-level policy built on top of the flag.

use thiserror::Error;

use crate::diagnostics::Farthest;

/// A grammar that is misconfigured. Never raised for ordinary non-matching
/// input.
#[derive(Debug, Clone, Error)]
pub enum GrammarError {
    /// A `repeat` iteration succeeded without consuming input, which would
    /// otherwise loop forever.
    #[error("repetition matched without consuming input at position {position}")]
    ZeroWidthRepetition { position: usize },

    #[error("invalid pattern `{pattern}`")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex_automata::meta::BuildError,
    },

    #[error("recursive rule was invoked before its definition was installed")]
    UndefinedRule,

    #[error("recursive rule outlived the parser that defines it")]
    DetachedRule,
}

// Compiling a pattern is deterministic, so two `InvalidPattern` errors for
// the same pattern carry the same build error.
impl PartialEq for GrammarError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::ZeroWidthRepetition { position: a },
                Self::ZeroWidthRepetition { position: b },
            ) => a == b,
            (Self::InvalidPattern { pattern: a, .. }, Self::InvalidPattern { pattern: b, .. }) => {
                a == b
            }
            (Self::UndefinedRule, Self::UndefinedRule) => true,
            (Self::DetachedRule, Self::DetachedRule) => true,
            _ => false,
        }
    }
}

/// Why a driver refused an input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("position {position} is outside the input (length {length})")]
    PositionOutOfBounds { position: usize, length: usize },

    #[error("position {position} does not fall on a character boundary")]
    MisalignedPosition { position: usize },

    #[error("input did not match{}", describe_farthest(.farthest))]
    NoMatch { farthest: Option<Farthest> },

    #[error("parsing stopped at position {consumed} of {length}")]
    Incomplete { consumed: usize, length: usize },

    #[error(transparent)]
    Grammar(#[from] GrammarError),
}

fn describe_farthest(farthest: &Option<Farthest>) -> String {
    match farthest {
        Some(farthest) if farthest.expected.is_empty() => {
            format!(" at position {}", farthest.position)
        }
        Some(farthest) => format!(
            " at position {}: expected {}",
            farthest.position,
            farthest.expected.join(" or ")
        ),
        None => String::new(),
    }
}

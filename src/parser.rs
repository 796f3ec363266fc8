//! The parser contract
//!
//! Every parser is a function value from `(input, position)` to a
//! [`ParseResult`]. Positions are byte offsets into a UTF-8 `&str` and always
//! sit on character boundaries; primitives advance by whole characters.
//!
//! Contract, honored by every constructor in this crate:
//! - Any `position` in `0..=input.len()` yields a result, never a panic.
//! - A matched result has `next_position() >= position` and
//!   `next_position() <= input.len()`.
//! - A parser that fails at its first point of mismatch reports
//!   `next_position() == position`. `choice` and `repeat` rely on this.
//! - Identical `(input, position)` pairs yield identical results.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::error::GrammarError;

/// What invoking a parser produces: the result triple, or a fatal grammar
/// configuration error.
pub type Step<T> = Result<ParseResult<T>, GrammarError>;

type ParseFn<T> = dyn Fn(&str, usize) -> Step<T> + Send + Sync;

/// The `(matched, value, next_position)` triple.
///
/// A matched result always carries a value. The one non-matching result that
/// carries a value is produced by [`tag`](crate::shaping::tag) when its
/// predicate rejects an otherwise successful parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseResult<T> {
    matched: bool,
    value: Option<T>,
    next: usize,
}

impl<T> ParseResult<T> {
    pub fn success(value: T, next: usize) -> Self {
        Self {
            matched: true,
            value: Some(value),
            next,
        }
    }

    pub fn failure(next: usize) -> Self {
        Self {
            matched: false,
            value: None,
            next,
        }
    }

    /// A failed result that still reports the value and position of the
    /// parse it rejected.
    pub fn rejected(value: T, next: usize) -> Self {
        Self {
            matched: false,
            value: Some(value),
            next,
        }
    }

    pub fn matched(&self) -> bool {
        self.matched
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn next_position(&self) -> usize {
        self.next
    }

    pub fn into_value(self) -> Option<T> {
        self.value
    }

    pub fn into_parts(self) -> (bool, Option<T>, usize) {
        (self.matched, self.value, self.next)
    }

    /// `Ok((value, next))` for a match, `Err(next)` otherwise.
    ///
    /// Combinators use this to thread positions; the error side is the
    /// position the failing parser reported, which is not always the
    /// position it was invoked at (see `tag`).
    pub fn into_match(self) -> Result<(T, usize), usize> {
        match (self.matched, self.value) {
            (true, Some(value)) => Ok((value, self.next)),
            _ => Err(self.next),
        }
    }
}

/// A composable parser producing values of type `T`.
///
/// Cloning is cheap: clones share the same underlying function, including any
/// deferred state it holds.
pub struct Parser<T> {
    run: Arc<ParseFn<T>>,
}

impl<T> Clone for Parser<T> {
    fn clone(&self) -> Self {
        Parser {
            run: Arc::clone(&self.run),
        }
    }
}

impl<T> fmt::Debug for Parser<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("output", &std::any::type_name::<T>())
            .finish_non_exhaustive()
    }
}

impl<T: 'static> Parser<T> {
    /// Wrap a parse function. The function must honor the contract described
    /// at the top of this module.
    pub fn new<F>(run: F) -> Self
    where
        F: Fn(&str, usize) -> Step<T> + Send + Sync + 'static,
    {
        Parser { run: Arc::new(run) }
    }

    /// Invoke the parser. Callers outside the crate should prefer
    /// [`parse_at`](crate::driver::parse_at), which validates `position`.
    pub fn parse_at(&self, input: &str, position: usize) -> Step<T> {
        (self.run)(input, position)
    }
}

// === Combinators as methods ===

impl<T: 'static> Parser<T> {
    /// Sequence: parse self then other, yielding both values.
    pub fn then<U: 'static>(self, other: Parser<U>) -> Parser<(T, U)> {
        crate::combinators::sequence((self, other))
    }

    /// Ordered choice: try self, then other at the same position.
    pub fn or(self, other: Parser<T>) -> Parser<T> {
        crate::combinators::choice((self, other))
    }

    pub fn many(self) -> Parser<Vec<T>> {
        crate::combinators::repeat(self)
    }

    pub fn opt(self) -> Parser<Option<T>> {
        crate::combinators::optional(self)
    }

    pub fn map<U, F>(self, f: F) -> Parser<U>
    where
        U: 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        crate::shaping::transform(self, f)
    }

    pub fn try_map<U, F>(self, f: F) -> Parser<U>
    where
        U: 'static,
        F: Fn(T) -> Option<U> + Send + Sync + 'static,
    {
        crate::shaping::try_transform(self, f)
    }

    pub fn tag<F>(self, predicate: F) -> Parser<T>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        crate::shaping::tag(self, predicate)
    }

    pub fn guard<F>(self, predicate: F) -> Parser<T>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        crate::shaping::guard(self, predicate)
    }

    /// Record failures of this parser under `label` in `tracker`.
    pub fn labelled(
        self,
        label: impl Into<String>,
        tracker: &crate::diagnostics::FailureTracker,
    ) -> Parser<T> {
        crate::diagnostics::labelled(self, label, tracker)
    }
}

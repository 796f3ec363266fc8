//! Structural combinators
//!
//! `sequence` and `choice` accept either a tuple of parsers or a `Vec` of
//! parsers. Tuples keep each element's output type, so
//! `sequence((Parser<A>, Parser<B>))` is a `Parser<(A, B)>`; a `Vec` is for
//! homogeneous lists whose length is only known at runtime.

use tracing::warn;

use crate::error::GrammarError;
use crate::parser::{ParseResult, Parser};

/// Parsers that can be applied one after another.
pub trait Sequence {
    type Output;

    fn into_sequence(self) -> Parser<Self::Output>;
}

/// Parsers that can be tried in order at the same position.
pub trait Choice<T> {
    fn into_choice(self) -> Parser<T>;
}

/// Apply every parser left to right, each at the position its predecessor
/// left off.
///
/// On the first failure the whole sequence fails with the failing parser's
/// reported position, not the sequence's own start. Earlier successes are
/// not rewound; there is nothing to rewind since parsers hold no state.
pub fn sequence<S: Sequence>(parsers: S) -> Parser<S::Output> {
    parsers.into_sequence()
}

/// Ordered choice: the first alternative to match wins, even when a later
/// one would match more input. Fails at the starting position when none
/// match.
pub fn choice<T, C: Choice<T>>(alternatives: C) -> Parser<T> {
    alternatives.into_choice()
}

/// Zero or more repetitions of `parser`. Always succeeds.
///
/// An iteration that succeeds without consuming input is reported as
/// [`GrammarError::ZeroWidthRepetition`] instead of looping forever.
pub fn repeat<T: 'static>(parser: Parser<T>) -> Parser<Vec<T>> {
    Parser::new(move |input: &str, position| {
        let mut values = Vec::new();
        let mut next = position;
        loop {
            match parser.parse_at(input, next)?.into_match() {
                Ok((_, advanced)) if advanced == next => {
                    warn!(position = next, "repetition stalled on a zero-width match");
                    return Err(GrammarError::ZeroWidthRepetition { position: next });
                }
                Ok((value, advanced)) => {
                    values.push(value);
                    next = advanced;
                }
                Err(_) => break,
            }
        }
        Ok(ParseResult::success(values, next))
    })
}

/// Apply `parser`, turning a failure into a successful `None` at the
/// starting position. Never fails.
pub fn optional<T: 'static>(parser: Parser<T>) -> Parser<Option<T>> {
    Parser::new(move |input: &str, position| {
        Ok(match parser.parse_at(input, position)?.into_match() {
            Ok((value, next)) => ParseResult::success(Some(value), next),
            Err(_) => ParseResult::success(None, position),
        })
    })
}

impl<T: 'static> Sequence for Vec<Parser<T>> {
    type Output = Vec<T>;

    fn into_sequence(self) -> Parser<Vec<T>> {
        Parser::new(move |input: &str, position| {
            let mut values = Vec::with_capacity(self.len());
            let mut next = position;
            for parser in &self {
                match parser.parse_at(input, next)?.into_match() {
                    Ok((value, advanced)) => {
                        values.push(value);
                        next = advanced;
                    }
                    Err(failed_at) => return Ok(ParseResult::failure(failed_at)),
                }
            }
            Ok(ParseResult::success(values, next))
        })
    }
}

impl<T: 'static> Choice<T> for Vec<Parser<T>> {
    fn into_choice(self) -> Parser<T> {
        Parser::new(move |input: &str, position| {
            for parser in &self {
                let result = parser.parse_at(input, position)?;
                if result.matched() {
                    return Ok(result);
                }
            }
            Ok(ParseResult::failure(position))
        })
    }
}

macro_rules! impl_for_tuples {
    (@same $T:ident $Out:ident) => { Parser<$Out> };
    ($($T:ident $p:ident $v:ident),+) => {
        impl<$($T: 'static),+> Sequence for ($(Parser<$T>,)+) {
            type Output = ($($T,)+);

            fn into_sequence(self) -> Parser<Self::Output> {
                let ($($p,)+) = self;
                Parser::new(move |input: &str, position| {
                    let next = position;
                    $(
                        let ($v, next) = match $p.parse_at(input, next)?.into_match() {
                            Ok(matched) => matched,
                            Err(failed_at) => return Ok(ParseResult::failure(failed_at)),
                        };
                    )+
                    Ok(ParseResult::success(($($v,)+), next))
                })
            }
        }

        impl<Out: 'static> Choice<Out> for ($(impl_for_tuples!(@same $T Out),)+) {
            fn into_choice(self) -> Parser<Out> {
                let ($($p,)+) = self;
                Parser::new(move |input: &str, position| {
                    $(
                        let result = $p.parse_at(input, position)?;
                        if result.matched() {
                            return Ok(result);
                        }
                    )+
                    Ok(ParseResult::failure(position))
                })
            }
        }
    };
}

impl_for_tuples!(A a va);
impl_for_tuples!(A a va, B b vb);
impl_for_tuples!(A a va, B b vb, C c vc);
impl_for_tuples!(A a va, B b vb, C c vc, D d vd);
impl_for_tuples!(A a va, B b vb, C c vc, D d vd, E e ve);
impl_for_tuples!(A a va, B b vb, C c vc, D d vd, E e ve, F f vf);
impl_for_tuples!(A a va, B b vb, C c vc, D d vd, E e ve, F f vf, G g vg);
impl_for_tuples!(A a va, B b vb, C c vc, D d vd, E e ve, F f vf, G g vg, H h vh);

//! Result-shaping combinators
//!
//! These wrap a parser and reshape what it reports without touching how it
//! matches. The supplied functions are treated as pure; grammars must not
//! rely on their side effects.

use crate::parser::{ParseResult, Parser};

/// Replace the value of a successful parse with `f(value)`, keeping the
/// position.
///
/// A failure passes through with its flag and position. Its value, which
/// only a rejecting [`tag`] supplies, is dropped since it has the wrong type.
pub fn transform<T, U, F>(parser: Parser<T>, f: F) -> Parser<U>
where
    T: 'static,
    U: 'static,
    F: Fn(T) -> U + Send + Sync + 'static,
{
    Parser::new(move |input: &str, position| {
        Ok(match parser.parse_at(input, position)?.into_match() {
            Ok((value, next)) => ParseResult::success(f(value), next),
            Err(failed_at) => ParseResult::failure(failed_at),
        })
    })
}

/// Replace the `matched` flag of a successful parse with
/// `predicate(&value)`.
///
/// The value and the advanced position are passed through even when the
/// predicate rejects: `tag(literal("x"), |_| false)` on `"x"` reports
/// `(false, "x", 1)`. A caller that ignores the flag and reads the position
/// will treat the input as consumed. `choice`, `repeat` and `optional` only
/// look at the flag, but `sequence` reports this position as its own failure
/// position. Use [`guard`] for a rejection that consumes nothing.
pub fn tag<T, F>(parser: Parser<T>, predicate: F) -> Parser<T>
where
    T: 'static,
    F: Fn(&T) -> bool + Send + Sync + 'static,
{
    Parser::new(move |input: &str, position| {
        let result = parser.parse_at(input, position)?;
        if !result.matched() {
            return Ok(result);
        }
        Ok(match result.into_match() {
            Ok((value, next)) if predicate(&value) => ParseResult::success(value, next),
            Ok((value, next)) => ParseResult::rejected(value, next),
            Err(failed_at) => ParseResult::failure(failed_at),
        })
    })
}

/// Like [`tag`], but a rejected parse fails at the starting position and
/// carries no value.
pub fn guard<T, F>(parser: Parser<T>, predicate: F) -> Parser<T>
where
    T: 'static,
    F: Fn(&T) -> bool + Send + Sync + 'static,
{
    Parser::new(move |input: &str, position| {
        let result = parser.parse_at(input, position)?;
        if !result.matched() {
            return Ok(result);
        }
        Ok(match result.into_match() {
            Ok((value, next)) if predicate(&value) => ParseResult::success(value, next),
            _ => ParseResult::failure(position),
        })
    })
}

/// Map a successful value through `f`; `None` turns the parse into a failure
/// at the starting position.
pub fn try_transform<T, U, F>(parser: Parser<T>, f: F) -> Parser<U>
where
    T: 'static,
    U: 'static,
    F: Fn(T) -> Option<U> + Send + Sync + 'static,
{
    Parser::new(move |input: &str, position| {
        Ok(match parser.parse_at(input, position)?.into_match() {
            Ok((value, next)) => match f(value) {
                Some(mapped) => ParseResult::success(mapped, next),
                None => ParseResult::failure(position),
            },
            Err(failed_at) => ParseResult::failure(failed_at),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{literal, pattern};

    #[test]
    fn test_transform() {
        let number = transform(pattern("[0-9]+").unwrap(), |digits| digits.len());
        assert_eq!(number.parse_at("1234", 0), Ok(ParseResult::success(4, 4)));
        assert_eq!(number.parse_at("x", 0), Ok(ParseResult::failure(0)));
    }

    #[test]
    fn test_tag_accepts() {
        let parser = tag(literal("x"), |value| value == "x");
        assert_eq!(
            parser.parse_at("x", 0),
            Ok(ParseResult::success("x".to_string(), 1))
        );
    }

    #[test]
    fn test_tag_rejection_keeps_value_and_position() {
        let parser = tag(literal("x"), |_| false);
        assert_eq!(
            parser.parse_at("x", 0),
            Ok(ParseResult::rejected("x".to_string(), 1))
        );
    }

    #[test]
    fn test_tag_passes_failure_through() {
        let parser = tag(literal("x"), |_| true);
        assert_eq!(parser.parse_at("y", 0), Ok(ParseResult::failure(0)));
    }

    #[test]
    fn test_transform_drops_rejected_value() {
        let parser = transform(tag(literal("x"), |_| false), |value| value.len());
        assert_eq!(parser.parse_at("x", 0), Ok(ParseResult::failure(1)));
    }

    #[test]
    fn test_guard_rewinds_rejection() {
        let parser = guard(literal("x"), |_| false);
        assert_eq!(parser.parse_at("ax", 1), Ok(ParseResult::failure(1)));
    }

    #[test]
    fn test_try_transform() {
        let small = try_transform(pattern("[0-9]+").unwrap(), |digits| {
            digits.parse::<u8>().ok()
        });
        assert_eq!(small.parse_at("255", 0), Ok(ParseResult::success(255, 3)));
        assert_eq!(small.parse_at("256", 0), Ok(ParseResult::failure(0)));
    }
}

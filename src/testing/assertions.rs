//! Fluent assertion API for parse results

use std::fmt::Debug;

use crate::parser::{ParseResult, Parser};

// ============================================================================
// Entry Point
// ============================================================================

/// Create an assertion builder for `parser` applied to `input` at position 0
pub fn assert_parse<'a, T: 'static>(
    parser: &'a Parser<T>,
    input: &'a str,
) -> ParseAssertion<'a, T> {
    ParseAssertion::run(parser, input, 0)
}

// ============================================================================
// Parse Assertions
// ============================================================================

pub struct ParseAssertion<'a, T> {
    parser: &'a Parser<T>,
    input: &'a str,
    position: usize,
    result: ParseResult<T>,
}

impl<'a, T: 'static> ParseAssertion<'a, T> {
    fn run(parser: &'a Parser<T>, input: &'a str, position: usize) -> Self {
        let result = match parser.parse_at(input, position) {
            Ok(result) => result,
            Err(err) => panic!("Grammar error parsing {:?} at {}: {}", input, position, err),
        };
        Self {
            parser,
            input,
            position,
            result,
        }
    }
}

impl<'a, T: Debug + PartialEq + 'static> ParseAssertion<'a, T> {
    /// Parse again, starting at `position`
    pub fn at(self, position: usize) -> Self {
        Self::run(self.parser, self.input, position)
    }

    /// Assert the parse matched
    pub fn matches(self) -> Self {
        assert!(
            self.result.matched(),
            "Expected {:?} to match at {}, got {:?}",
            self.input,
            self.position,
            self.result
        );
        self
    }

    /// Assert the parse did not match
    pub fn fails(self) -> Self {
        assert!(
            !self.result.matched(),
            "Expected {:?} not to match at {}, got {:?}",
            self.input,
            self.position,
            self.result
        );
        self
    }

    /// Assert the reported value
    pub fn value(self, expected: &T) -> Self {
        assert_eq!(
            self.result.value(),
            Some(expected),
            "Unexpected value parsing {:?} at {}",
            self.input,
            self.position
        );
        self
    }

    /// Assert no value was reported
    pub fn no_value(self) -> Self {
        assert!(
            self.result.value().is_none(),
            "Expected no value parsing {:?} at {}, got {:?}",
            self.input,
            self.position,
            self.result.value()
        );
        self
    }

    /// Assert the reported next position
    pub fn next(self, expected: usize) -> Self {
        assert_eq!(
            self.result.next_position(),
            expected,
            "Unexpected next position parsing {:?} at {}",
            self.input,
            self.position
        );
        self
    }

    /// Assert the next position equals the starting position
    pub fn consumes_nothing(self) -> Self {
        let position = self.position;
        self.next(position)
    }

    /// Assert the parse consumed the rest of the input
    pub fn consumes_all(self) -> Self {
        let length = self.input.len();
        self.next(length)
    }

    /// Assert a `tag` rejection: not matched, yet value and position kept
    pub fn rejected(self, value: &T, next: usize) -> Self {
        self.fails().value(value).next(next)
    }

    /// The result under test, for checks the builder does not cover
    pub fn into_result(self) -> ParseResult<T> {
        self.result
    }
}

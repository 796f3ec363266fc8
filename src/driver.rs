//! Driving a grammar over a whole input
//!
//! The core reports partial parses as ordinary successes. The driver adds
//! the policy a caller usually wants on top: start at position 0, treat a
//! non-match as an error, and (by default) require the whole input to be
//! consumed.

use serde::Deserialize;
use tracing::debug;

use crate::diagnostics::FailureTracker;
use crate::error::ParseError;
use crate::parser::{ParseResult, Parser};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DriverOptions {
    /// Reject parses that stop before the end of the input.
    pub require_complete: bool,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            require_complete: true,
        }
    }
}

/// Invoke `parser` at `position` after checking that the position is inside
/// the input and on a character boundary.
pub fn parse_at<T: 'static>(
    parser: &Parser<T>,
    input: &str,
    position: usize,
) -> Result<ParseResult<T>, ParseError> {
    if position > input.len() {
        return Err(ParseError::PositionOutOfBounds {
            position,
            length: input.len(),
        });
    }
    if !input.is_char_boundary(position) {
        return Err(ParseError::MisalignedPosition { position });
    }
    Ok(parser.parse_at(input, position)?)
}

/// Parse the whole of `input` with default options.
pub fn parse_complete<T: 'static>(parser: &Parser<T>, input: &str) -> Result<T, ParseError> {
    Driver::new(parser.clone()).parse(input)
}

#[derive(Debug, Clone)]
pub struct Driver<T> {
    parser: Parser<T>,
    options: DriverOptions,
    tracker: Option<FailureTracker>,
}

impl<T: 'static> Driver<T> {
    pub fn new(parser: Parser<T>) -> Self {
        Self {
            parser,
            options: DriverOptions::default(),
            tracker: None,
        }
    }

    pub fn with_options(mut self, options: DriverOptions) -> Self {
        self.options = options;
        self
    }

    /// Attach the tracker the grammar's `labelled` wrappers record into, so
    /// that `NoMatch` errors say what was expected where.
    pub fn with_tracker(mut self, tracker: FailureTracker) -> Self {
        self.tracker = Some(tracker);
        self
    }

    pub fn options(&self) -> DriverOptions {
        self.options
    }

    /// Parse `input` from the start, enforcing `require_complete`.
    pub fn parse(&self, input: &str) -> Result<T, ParseError> {
        let (value, consumed) = self.parse_prefix(input)?;
        if self.options.require_complete && consumed != input.len() {
            debug!(consumed, length = input.len(), "parse stopped early");
            return Err(ParseError::Incomplete {
                consumed,
                length: input.len(),
            });
        }
        Ok(value)
    }

    /// Parse a prefix of `input`, returning the value and how far it got.
    pub fn parse_prefix(&self, input: &str) -> Result<(T, usize), ParseError> {
        if let Some(tracker) = &self.tracker {
            tracker.reset();
        }
        match parse_at(&self.parser, input, 0)?.into_match() {
            Ok((value, consumed)) => {
                debug!(consumed, length = input.len(), "parse matched");
                Ok((value, consumed))
            }
            Err(_) => {
                let farthest = self.tracker.as_ref().and_then(FailureTracker::farthest);
                debug!(?farthest, "parse did not match");
                Err(ParseError::NoMatch { farthest })
            }
        }
    }
}

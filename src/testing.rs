//! Testing utilities for parse results
//!
//! [`assert_parse`] builds a fluent assertion over a single parser
//! invocation, in the same spirit as checking a tree node by node:
//!
//! ```rust-example
//! use combinate::testing::assert_parse;
//!
//! assert_parse(&number, "42").matches().value(&"42".to_string()).next(2);
//! assert_parse(&number, "x42").fails().consumes_nothing();
//! assert_parse(&number, "x42").at(1).matches().next(3);
//! ```
//!
//! The builder invokes the parser as soon as it is created and again on each
//! `at`. Grammar errors fail the assertion with the error message.

mod assertions;

pub use assertions::{assert_parse, ParseAssertion};

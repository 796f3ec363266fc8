//! Example grammars built with the combinator engine.
//!
//! They double as the engine's largest consumers in the test suite.

pub mod calc;

//! # combinate
//!
//! A minimal parser-combinator toolkit. Grammars are built by nesting
//! constructor calls; the resulting [`Parser`] graph *is* the grammar, and
//! invoking the outermost parser drives a plain recursive descent.
//!
//! Layout
//!
//! The crate follows the dependency order of the engine, leaves first:
//!
//! src/
//!   ├── parser        The call/return contract: `Parser<T>` and `ParseResult<T>`
//!   ├── primitives    `literal`, `char_class`, `pattern`
//!   ├── combinators   `sequence`, `choice`, `repeat`, `optional`
//!   ├── lazy          Deferred references: `lazy` and `recursive`
//!   ├── shaping       `transform`, `tag`, plus `guard` and `try_transform`
//!   ├── diagnostics   Farthest-failure tracking, strictly additive
//!   ├── driver        Whole-input parsing on top of the core
//!   ├── settings      Layered settings for the driver and the CLI
//!   ├── grammars      Example grammars built with the engine
//!   └── testing       Fluent assertions for parse results
//!
//! Failure is a boolean signal carried by [`ParseResult::matched`]. The only
//! other channel is [`GrammarError`], reserved for grammars that are
//! misconfigured (a repetition that never advances, an invalid pattern, a
//! recursive rule used out of order).
//!
//! ```text
//! number  = pattern("[0-9]+")
//! expr    = choice(number, lazy(|| sequence(literal("("), expr, literal(")"))))
//! ```

pub mod combinators;
pub mod diagnostics;
pub mod driver;
pub mod error;
pub mod grammars;
pub mod lazy;
pub mod parser;
pub mod primitives;
pub mod settings;
pub mod shaping;
pub mod testing;

pub use combinators::{choice, optional, repeat, sequence, Choice, Sequence};
pub use diagnostics::{labelled, Farthest, FailureTracker};
pub use driver::{parse_at, parse_complete, Driver, DriverOptions};
pub use error::{GrammarError, ParseError};
pub use lazy::{lazy, recursive};
pub use parser::{ParseResult, Parser, Step};
pub use primitives::{char_class, literal, pattern, pattern_case_insensitive};
pub use shaping::{guard, tag, transform, try_transform};

//! Deferred references
//!
//! Grammars are values, so a rule cannot mention itself while it is being
//! built. [`lazy`] defers building a parser until it is first invoked;
//! [`recursive`] hands the definition a handle to the rule being defined.
//!
//! The deferred parser is cached in a `once_cell::sync::OnceCell` owned by
//! the returned parser (and shared by its clones). Concurrent first calls
//! build it once; the losers block until the cell is filled.

use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::debug;

use crate::error::GrammarError;
use crate::parser::Parser;

/// A parser that calls `factory` on its first invocation and delegates to
/// the parser it returns from then on.
///
/// `factory` runs exactly once over the parser's lifetime, however many
/// times and from however many threads the parser is invoked. It must only
/// build a parser: invoking the lazy parser from inside `factory` would
/// wait on itself.
///
/// ```text
/// fn expr() -> Parser<Tree> {
///     choice((number(), lazy(|| sequence((literal("("), expr(), literal(")"))).map(..))))
/// }
/// ```
pub fn lazy<T, F>(factory: F) -> Parser<T>
where
    T: 'static,
    F: Fn() -> Parser<T> + Send + Sync + 'static,
{
    let cell: OnceCell<Parser<T>> = OnceCell::new();
    Parser::new(move |input: &str, position| {
        let parser = cell.get_or_init(|| {
            debug!(output = std::any::type_name::<T>(), "resolving deferred parser");
            factory()
        });
        parser.parse_at(input, position)
    })
}

/// Define a self-referential rule.
///
/// `define` receives a handle standing for the rule itself and returns the
/// rule's body. Unlike nesting [`lazy`] inside a grammar-building function,
/// the resulting grammar graph is built once and contains a genuine cycle.
///
/// The handle holds the rule weakly, so the cycle does not leak. Invoking the
/// handle after the returned parser (and all its clones) have been dropped
/// yields [`GrammarError::DetachedRule`]; invoking it from inside `define`,
/// before the body exists, yields [`GrammarError::UndefinedRule`].
pub fn recursive<T, F>(define: F) -> Parser<T>
where
    T: 'static,
    F: FnOnce(Parser<T>) -> Parser<T>,
{
    let slot: Arc<OnceCell<Parser<T>>> = Arc::new(OnceCell::new());

    let weak = Arc::downgrade(&slot);
    let handle = Parser::new(move |input: &str, position| {
        let slot = weak.upgrade().ok_or(GrammarError::DetachedRule)?;
        let body = slot.get().ok_or(GrammarError::UndefinedRule)?;
        body.parse_at(input, position)
    });

    // The handle only reads the slot, so this is its one and only write.
    let _ = slot.set(define(handle));
    debug!(output = std::any::type_name::<T>(), "installed recursive rule");

    Parser::new(move |input: &str, position| {
        let body = slot.get().ok_or(GrammarError::UndefinedRule)?;
        body.parse_at(input, position)
    })
}

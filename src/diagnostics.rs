//! Farthest-failure tracking
//!
//! An additive diagnostic channel. Wrapping a parser with [`labelled`] leaves
//! its results untouched and records, on failure, what was expected where.
//! The driver resets the tracker before each parse and attaches the
//! farthest failure to [`ParseError::NoMatch`](crate::error::ParseError::NoMatch).
//!
//! A tracker is a shared sink: parses that run concurrently against the same
//! tracker interleave their records. Give each concurrent parse its own
//! grammar instance and tracker when that matters.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::parser::Parser;

/// The farthest position at which a tracked parser failed, and the labels
/// of every tracked parser that failed there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Farthest {
    pub position: usize,
    pub expected: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct FailureTracker {
    farthest: Arc<Mutex<Option<Farthest>>>,
}

impl FailureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `label` was expected at `position`.
    ///
    /// A farther position replaces what was recorded; the same position adds
    /// the label unless it is already listed; a nearer position is ignored.
    pub fn record(&self, position: usize, label: &str) {
        let mut farthest = self.lock();
        match farthest.as_mut() {
            Some(current) if current.position > position => {}
            Some(current) if current.position == position => {
                if !current.expected.iter().any(|known| known == label) {
                    current.expected.push(label.to_string());
                }
            }
            _ => {
                *farthest = Some(Farthest {
                    position,
                    expected: vec![label.to_string()],
                });
            }
        }
    }

    pub fn farthest(&self) -> Option<Farthest> {
        self.lock().clone()
    }

    pub fn reset(&self) {
        *self.lock() = None;
    }

    // A panic while holding the lock cannot leave the record half-written,
    // so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, Option<Farthest>> {
        self.farthest.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Behave exactly like `parser`, recording `label` at the invocation
/// position whenever it fails.
pub fn labelled<T: 'static>(
    parser: Parser<T>,
    label: impl Into<String>,
    tracker: &FailureTracker,
) -> Parser<T> {
    let label = label.into();
    let tracker = tracker.clone();
    Parser::new(move |input: &str, position| {
        let result = parser.parse_at(input, position)?;
        if !result.matched() {
            tracker.record(position, &label);
        }
        Ok(result)
    })
}

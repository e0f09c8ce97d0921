//! Immutable trace of one run.

use crate::algorithm::Algorithm;
use crate::event::{EventKind, TraceEvent};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The ordered events produced by one run, frozen once the run returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Trace<T> {
    algorithm: Algorithm,
    length: usize,
    events: Vec<TraceEvent<T>>,
}

impl<T> Trace<T> {
    pub fn new(algorithm: Algorithm, length: usize, events: Vec<TraceEvent<T>>) -> Self {
        Trace {
            algorithm,
            length,
            events,
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Length of the backing array the run sorted.
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn events(&self) -> &[TraceEvent<T>] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events that write array cells, in sequence order.
    pub fn mutations(&self) -> impl Iterator<Item = &TraceEvent<T>> {
        self.events.iter().filter(|e| e.is_mutation())
    }

    pub fn count_of(&self, kind: EventKind) -> usize {
        self.events.iter().filter(|e| e.kind == kind).count()
    }

    pub fn into_events(self) -> Vec<TraceEvent<T>> {
        self.events
    }
}

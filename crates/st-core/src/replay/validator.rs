//! Trace replay and structural checks.
//!
//! Replay reconstructs the final array from a trace alone: it starts from the
//! leading `Data` snapshot and applies every mutation in sequence order.
//! Non-mutating events carry no state and are skipped.

use serde::Serialize;
use st_common::{Error, EventKind, Result, TraceEvent};
use tracing::debug;

/// Fold the mutations of `events` over the initial `Data` snapshot.
pub fn replay<T: Clone>(events: &[TraceEvent<T>]) -> Result<Vec<T>> {
    let first = events
        .first()
        .ok_or_else(|| Error::Replay("trace is empty".to_string()))?;
    if first.kind != EventKind::Data {
        return Err(Error::Replay(format!(
            "trace starts with {} instead of data",
            first.kind
        )));
    }

    let mut array = first.values.clone();
    let mut applied = 0usize;
    for event in events.iter().skip(1).filter(|e| e.is_mutation()) {
        apply(&mut array, event)?;
        applied += 1;
    }

    debug!(events = events.len(), applied, "trace replayed");
    Ok(array)
}

fn apply<T: Clone>(array: &mut [T], event: &TraceEvent<T>) -> Result<()> {
    let expected = if event.kind == EventKind::Swap { 2 } else { 1 };
    if event.indices.len() != expected || event.values.len() != expected {
        return Err(Error::Replay(format!(
            "{} event #{} carries {} indices and {} values, expected {expected}",
            event.kind,
            event.sequence,
            event.indices.len(),
            event.values.len()
        )));
    }

    for (&index, value) in event.indices.iter().zip(&event.values) {
        let len = array.len();
        let slot = array.get_mut(index).ok_or_else(|| {
            Error::Replay(format!(
                "{} event #{} writes index {index} outside an array of length {len}",
                event.kind, event.sequence
            ))
        })?;
        *slot = value.clone();
    }
    Ok(())
}

/// Whether replaying `events` yields exactly `expected`.
pub fn verify<T: Clone + PartialEq>(events: &[TraceEvent<T>], expected: &[T]) -> bool {
    match replay(events) {
        Ok(array) => array == expected,
        Err(err) => {
            debug!(error = %err, "replay failed during verification");
            false
        }
    }
}

/// Structural findings for one trace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TraceReport {
    pub events: usize,
    pub mutations: usize,
    pub violations: Vec<String>,
}

impl TraceReport {
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Check sequence totality, index bounds and the leading declaration of a
/// trace over a backing array of `length` elements. Values are not folded.
pub fn check_trace<T>(events: &[TraceEvent<T>], length: usize) -> TraceReport {
    let mut report = TraceReport {
        events: events.len(),
        ..TraceReport::default()
    };

    match events.first() {
        None => report.violations.push("trace is empty".to_string()),
        Some(first) if first.kind != EventKind::Data => report
            .violations
            .push(format!("first event is {}, not data", first.kind)),
        Some(first) => {
            let declared: Vec<usize> = (0..length).collect();
            if first.indices != declared || first.values.len() != length {
                report.violations.push(format!(
                    "data event declares {} values, backing array has {length}",
                    first.values.len()
                ));
            }
        }
    }

    for (position, event) in events.iter().enumerate() {
        if event.sequence != position as u64 {
            report.violations.push(format!(
                "event at position {position} has sequence {}",
                event.sequence
            ));
        }
        if event.is_mutation() {
            report.mutations += 1;
        }
        if let Some(&index) = event.indices.iter().find(|&&i| i >= length) {
            report.violations.push(format!(
                "{} event #{} references index {index} outside [0, {length})",
                event.kind, event.sequence
            ));
        }
        if let Some(region) = event.region {
            if region.lo > region.hi || region.hi >= length {
                report.violations.push(format!(
                    "{} event #{} has region {region} outside the array",
                    event.kind, event.sequence
                ));
            }
        }
        if event.counts.is_empty() && event.indices.len() != event.values.len() {
            report.violations.push(format!(
                "{} event #{} pairs {} indices with {} values",
                event.kind,
                event.sequence,
                event.indices.len(),
                event.values.len()
            ));
        }
    }

    report
}

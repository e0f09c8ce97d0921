//! Typed trace event vocabulary.
//!
//! Every state-relevant operation performed by an instrumented algorithm is
//! described by one [`TraceEvent`]. The [`EventKind`] fixes the expected shape
//! of the payload:
//!
//! | Kind | `indices` | `values` |
//! |---|---|---|
//! | `Data`, `TempData`, `Result` | every position of the declared buffer | full snapshot |
//! | `Save`, `Load`, `Store` | one position | the scalar moved to or from a scratch slot |
//! | `Compare` | two positions | the two compared values |
//! | `Swap` | two positions | post-swap values |
//! | `Copy`, `Insert`, `Shift` | destination position | value written |
//! | `Index` | one position | value under the cursor |
//! | `Bounds`, `Partition` | two positions | values at the boundaries |
//!
//! Indices are always absolute positions in the backing array of the run.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic role of a traced operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Declaration of the backing array.
    Data,
    /// Declaration or re-snapshot of an auxiliary buffer.
    TempData,
    /// A value read from the array into a named scratch slot.
    Save,
    /// A value read from the array without leaving a mark on it.
    Load,
    /// A scratch slot written back into the array.
    Store,
    /// Two values compared.
    Compare,
    /// Two cells exchanged.
    Swap,
    /// A value copied into a cell from an auxiliary buffer.
    Copy,
    /// A cursor of interest moved.
    Index,
    /// Sub-range under work.
    Bounds,
    /// Split point produced by a partition step.
    Partition,
    /// Final placement of a scratch value.
    Insert,
    /// One cell moved by a shift loop.
    Shift,
    /// Declaration of the designated output buffer.
    Result,
}

impl EventKind {
    /// Every kind, in declaration order.
    pub const ALL: [EventKind; 14] = [
        EventKind::Data,
        EventKind::TempData,
        EventKind::Save,
        EventKind::Load,
        EventKind::Store,
        EventKind::Compare,
        EventKind::Swap,
        EventKind::Copy,
        EventKind::Index,
        EventKind::Bounds,
        EventKind::Partition,
        EventKind::Insert,
        EventKind::Shift,
        EventKind::Result,
    ];

    /// Whether events of this kind write array cells.
    pub fn is_mutation(self) -> bool {
        matches!(
            self,
            EventKind::Store | EventKind::Swap | EventKind::Copy | EventKind::Insert | EventKind::Shift
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Data => "data",
            EventKind::TempData => "temp_data",
            EventKind::Save => "save",
            EventKind::Load => "load",
            EventKind::Store => "store",
            EventKind::Compare => "compare",
            EventKind::Swap => "swap",
            EventKind::Copy => "copy",
            EventKind::Index => "index",
            EventKind::Bounds => "bounds",
            EventKind::Partition => "partition",
            EventKind::Insert => "insert",
            EventKind::Shift => "shift",
            EventKind::Result => "result",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive absolute bounds of the sub-array an event was computed within.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Region {
    pub lo: usize,
    pub hi: usize,
}

impl Region {
    pub fn new(lo: usize, hi: usize) -> Self {
        Region { lo, hi }
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.lo..=self.hi).contains(&index)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lo, self.hi)
    }
}

/// One immutable trace record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TraceEvent<T> {
    /// Position in the run's total order, gapless from 0.
    pub sequence: u64,

    pub kind: EventKind,

    /// Absolute positions in the backing array.
    #[serde(default)]
    pub indices: Vec<usize>,

    /// Values observed at `indices` when the event was recorded.
    pub values: Vec<T>,

    /// Snapshot of an integer auxiliary buffer that does not alias the
    /// backing array (counting sort's tallies). Events labelled
    /// `count_step` carry a single `[slot, value]` pair instead.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub counts: Vec<usize>,

    /// Window of the enclosing recursive call, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<Region>,

    /// Scratch slot or buffer name (`key`, `pivot`, `left`, `count`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl<T> TraceEvent<T> {
    pub fn new(sequence: u64, kind: EventKind, indices: Vec<usize>, values: Vec<T>) -> Self {
        TraceEvent {
            sequence,
            kind,
            indices,
            values,
            counts: Vec::new(),
            region: None,
            label: None,
        }
    }

    pub fn with_region(mut self, region: Option<Region>) -> Self {
        self.region = region;
        self
    }

    pub fn with_label(mut self, label: Option<&str>) -> Self {
        self.label = label.map(str::to_string);
        self
    }

    pub fn with_counts(mut self, counts: Vec<usize>) -> Self {
        self.counts = counts;
        self
    }

    pub fn is_mutation(&self) -> bool {
        self.kind.is_mutation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mutation_kinds() {
        let mutating: Vec<EventKind> = EventKind::ALL
            .iter()
            .copied()
            .filter(|k| k.is_mutation())
            .collect();
        assert_eq!(
            mutating,
            vec![
                EventKind::Store,
                EventKind::Swap,
                EventKind::Copy,
                EventKind::Insert,
                EventKind::Shift
            ]
        );
    }

    #[test]
    fn kind_serde_uses_snake_case() {
        let json = serde_json::to_string(&EventKind::TempData).unwrap();
        assert_eq!(json, "\"temp_data\"");
        for kind in EventKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind));
        }
    }

    #[test]
    fn optional_fields_are_omitted() {
        let event = TraceEvent::new(3, EventKind::Swap, vec![1, 2], vec![5, 9]);
        let json = serde_json::to_value(&event).unwrap();
        assert!(json.get("region").is_none());
        assert!(json.get("label").is_none());
        assert!(json.get("counts").is_none());
        let back: TraceEvent<i64> = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn region_bounds_are_inclusive() {
        let region = Region::new(4, 6);
        assert!(region.contains(4));
        assert!(region.contains(6));
        assert!(!region.contains(7));
        assert_eq!(region.to_string(), "[4, 6]");
    }

    #[test]
    fn builder_helpers() {
        let event = TraceEvent::<i32>::new(0, EventKind::TempData, vec![], vec![])
            .with_label(Some("count"))
            .with_counts(vec![0, 2, 1])
            .with_region(Some(Region::new(0, 2)));
        assert_eq!(event.label.as_deref(), Some("count"));
        assert_eq!(event.counts, vec![0, 2, 1]);
        assert!(!event.is_mutation());
        assert!(event.indices.is_empty());
    }
}

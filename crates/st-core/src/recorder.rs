//! Append-only event sink with absolute-index remapping.
//!
//! Algorithms record events with indices local to the slice they are working
//! on. The recorder keeps a stack of windows, one per active recursive call,
//! and translates every local index into an absolute position in the run's
//! backing array before the event is stored.
//!
//! ```ignore
//! let mut rec = EventRecorder::new(a.len(), &TraceOptions::default());
//! rec.data(&a)?;
//! {
//!     // Local index 0 of the right half is absolute index `mid`.
//!     let mut right = rec.scope(mid, a.len() - mid)?;
//!     right.cell(EventKind::Copy, &a[mid..], 0, None)?;
//! } // window popped here, on every exit path
//! let events = rec.finish();
//! ```

use st_common::{Error, EventKind, Region, Result, TraceEvent};
use st_config::TraceOptions;
use std::ops::{Deref, DerefMut};
use tracing::trace;

/// An absolute window of the backing array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Window {
    offset: usize,
    len: usize,
}

impl Window {
    fn region(&self) -> Option<Region> {
        self.len
            .checked_sub(1)
            .map(|last| Region::new(self.offset, self.offset + last))
    }
}

/// Accumulates the events of one run.
#[derive(Debug)]
pub struct EventRecorder<T> {
    length: usize,
    events: Vec<TraceEvent<T>>,
    scopes: Vec<Window>,
    options: TraceOptions,
}

impl<T: Clone> EventRecorder<T> {
    /// Create a recorder for a backing array of `length` elements.
    pub fn new(length: usize, options: &TraceOptions) -> Self {
        EventRecorder {
            length,
            events: Vec::with_capacity(options.initial_capacity),
            scopes: Vec::new(),
            options: options.clone(),
        }
    }

    pub fn options(&self) -> &TraceOptions {
        &self.options
    }

    /// Length of the backing array.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Number of active offset scopes.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[TraceEvent<T>] {
        &self.events
    }

    fn current(&self) -> Window {
        self.scopes.last().copied().unwrap_or(Window {
            offset: 0,
            len: self.length,
        })
    }

    /// Enter a sub-window starting at local `offset` of the active window.
    ///
    /// The returned guard dereferences to this recorder and restores the
    /// previous window when dropped.
    pub fn scope(&mut self, offset: usize, len: usize) -> Result<ScopeGuard<'_, T>> {
        let parent = self.current();
        let fits = offset
            .checked_add(len)
            .is_some_and(|end| end <= parent.len);
        if !fits {
            return Err(Error::InvariantViolation(format!(
                "scope [{offset}, +{len}) exceeds active window of length {} at offset {}",
                parent.len, parent.offset
            )));
        }

        let depth = self.scopes.len();
        let window = Window {
            offset: parent.offset + offset,
            len,
        };
        self.scopes.push(window);
        trace!(depth = depth + 1, offset = window.offset, len, "scope entered");
        Ok(ScopeGuard {
            recorder: self,
            depth,
        })
    }

    fn remap(&self, kind: EventKind, local: &[usize]) -> Result<Vec<usize>> {
        let window = self.current();
        local
            .iter()
            .map(|&i| {
                if i >= window.len {
                    return Err(Error::InvariantViolation(format!(
                        "{kind} index {i} outside active window of length {}",
                        window.len
                    )));
                }
                let absolute = window.offset + i;
                if absolute >= self.length {
                    return Err(Error::InvariantViolation(format!(
                        "{kind} index {absolute} outside backing array of length {}",
                        self.length
                    )));
                }
                Ok(absolute)
            })
            .collect()
    }

    fn region(&self) -> Option<Region> {
        if self.scopes.is_empty() {
            None
        } else {
            self.current().region()
        }
    }

    fn push(&mut self, event: TraceEvent<T>) {
        self.events.push(event);
    }

    fn next_sequence(&self) -> u64 {
        self.events.len() as u64
    }

    /// Record one event whose indices are local to the active window.
    pub fn record(
        &mut self,
        kind: EventKind,
        local: &[usize],
        values: Vec<T>,
        label: Option<&str>,
    ) -> Result<()> {
        let indices = self.remap(kind, local)?;
        let event = TraceEvent::new(self.next_sequence(), kind, indices, values)
            .with_region(self.region())
            .with_label(label);
        self.push(event);
        Ok(())
    }

    /// Record a snapshot of an integer buffer that does not alias the array.
    pub fn record_counts(&mut self, kind: EventKind, label: &str, counts: &[usize]) -> Result<()> {
        let event = TraceEvent::new(self.next_sequence(), kind, Vec::new(), Vec::new())
            .with_counts(counts.to_vec())
            .with_region(self.region())
            .with_label(Some(label));
        self.push(event);
        Ok(())
    }

    /// Declare the backing array (or the active window of it).
    pub fn data(&mut self, a: &[T]) -> Result<()> {
        let local: Vec<usize> = (0..a.len()).collect();
        self.record(EventKind::Data, &local, a.to_vec(), None)
    }

    /// Declare an auxiliary buffer copied from local positions
    /// `start..start + values.len()`.
    pub fn temp_data(&mut self, name: &str, start: usize, values: &[T]) -> Result<()> {
        let local: Vec<usize> = (start..start + values.len()).collect();
        self.record(EventKind::TempData, &local, values.to_vec(), Some(name))
    }

    /// Snapshot an auxiliary tally buffer.
    pub fn temp_counts(&mut self, name: &str, counts: &[usize]) -> Result<()> {
        self.record_counts(EventKind::TempData, name, counts)
    }

    /// Declare the output buffer.
    pub fn result(&mut self, a: &[T]) -> Result<()> {
        let local: Vec<usize> = (0..a.len()).collect();
        self.record(EventKind::Result, &local, a.to_vec(), Some("result"))
    }

    /// Record a two-index event reading both current values.
    pub fn pair(
        &mut self,
        kind: EventKind,
        a: &[T],
        i: usize,
        j: usize,
        label: Option<&str>,
    ) -> Result<()> {
        let values = vec![value_at(kind, a, i)?, value_at(kind, a, j)?];
        self.record(kind, &[i, j], values, label)
    }

    pub fn compare(&mut self, a: &[T], i: usize, j: usize) -> Result<()> {
        self.pair(EventKind::Compare, a, i, j, None)
    }

    /// Record a comparison of values held outside the array cells they
    /// came from (scratch slots, merge buffers).
    pub fn compare_values(&mut self, i: usize, vi: &T, j: usize, vj: &T) -> Result<()> {
        self.record(EventKind::Compare, &[i, j], vec![vi.clone(), vj.clone()], None)
    }

    /// Record a swap that has already been applied to `a`.
    pub fn swapped(&mut self, a: &[T], i: usize, j: usize) -> Result<()> {
        self.pair(EventKind::Swap, a, i, j, None)
    }

    /// Record a single-index event reading the current value at `i`.
    pub fn cell(&mut self, kind: EventKind, a: &[T], i: usize, label: Option<&str>) -> Result<()> {
        let value = value_at(kind, a, i)?;
        self.record(kind, &[i], vec![value], label)
    }

    /// Record a single-index event carrying a scratch-slot value.
    pub fn scratch(&mut self, kind: EventKind, i: usize, value: &T, label: &str) -> Result<()> {
        self.record(kind, &[i], vec![value.clone()], Some(label))
    }

    /// Consume the recorder, yielding the events in sequence order.
    pub fn finish(self) -> Vec<TraceEvent<T>> {
        self.events
    }
}

fn value_at<T: Clone>(kind: EventKind, a: &[T], i: usize) -> Result<T> {
    a.get(i).cloned().ok_or_else(|| {
        Error::InvariantViolation(format!(
            "{kind} reads index {i} of a window of length {}",
            a.len()
        ))
    })
}

/// Restores the recorder's previous window when dropped.
#[derive(Debug)]
pub struct ScopeGuard<'a, T> {
    recorder: &'a mut EventRecorder<T>,
    depth: usize,
}

impl<T> Deref for ScopeGuard<'_, T> {
    type Target = EventRecorder<T>;

    fn deref(&self) -> &Self::Target {
        self.recorder
    }
}

impl<T> DerefMut for ScopeGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.recorder
    }
}

impl<T> Drop for ScopeGuard<'_, T> {
    fn drop(&mut self) {
        self.recorder.scopes.truncate(self.depth);
        trace!(depth = self.depth, "scope released");
    }
}

//! Counting sort with a tally buffer and a separate result buffer.

use super::SortElement;
use crate::recorder::EventRecorder;
use st_common::{Error, EventKind, Result};

/// Largest accepted `max_value`; bounds the size of the tally buffer.
pub const MAX_COUNTING_RANGE: usize = 1 << 24;

/// Label of the per-step events emitted under `accumulation_detail`. Their
/// `counts` payload is `[slot, count[slot]]` after that step, so a trace grows
/// linearly with `max_value`.
pub const COUNT_STEP_LABEL: &str = "count_step";

/// Map every element to its tally slot, rejecting elements the bound does
/// not cover.
pub fn counting_slots<T: SortElement>(a: &[T], max_value: usize) -> Result<Vec<usize>> {
    if max_value > MAX_COUNTING_RANGE {
        return Err(Error::InvalidParams(format!(
            "max_value {max_value} exceeds the supported range of {MAX_COUNTING_RANGE}"
        )));
    }
    a.iter()
        .map(|v| match v.counting_slot() {
            Some(slot) if slot <= max_value => Ok(slot),
            Some(slot) => Err(Error::InvalidParams(format!(
                "element {v:?} (slot {slot}) exceeds max_value {max_value}"
            ))),
            None => Err(Error::InvalidParams(format!(
                "element {v:?} cannot be counted"
            ))),
        })
        .collect()
}

/// Sort `a` by tallying each value, turning the tallies into end positions
/// and placing every element into a result buffer that is finally written
/// back over `a`.
///
/// Parameters are checked before anything is recorded.
pub fn counting_sort<T: SortElement>(
    a: &mut [T],
    rec: &mut EventRecorder<T>,
    max_value: usize,
) -> Result<()> {
    let slots = counting_slots(a, max_value)?;
    rec.data(a)?;

    let mut count = vec![0usize; max_value + 1];
    rec.temp_counts("count", &count)?;

    for (i, &slot) in slots.iter().enumerate() {
        rec.cell(EventKind::Load, a, i, Some("count"))?;
        count[slot] += 1;
    }
    rec.temp_counts("count", &count)?;

    let detail = rec.options().accumulation_detail;
    for slot in 1..count.len() {
        count[slot] += count[slot - 1];
        if detail {
            rec.temp_counts(COUNT_STEP_LABEL, &[slot, count[slot]])?;
        }
    }
    rec.temp_counts("count", &count)?;

    let mut result: Vec<Option<T>> = vec![None; a.len()];
    for (i, &slot) in slots.iter().enumerate() {
        count[slot] -= 1;
        let pos = count[slot];
        result[pos] = Some(a[i].clone());
        rec.scratch(EventKind::Copy, pos, &a[i], "result")?;
    }

    let sorted: Vec<T> = result
        .into_iter()
        .collect::<Option<Vec<T>>>()
        .ok_or_else(|| Error::InvariantViolation("result buffer left a cell unfilled".into()))?;
    a.clone_from_slice(&sorted);
    rec.result(a)?;
    Ok(())
}

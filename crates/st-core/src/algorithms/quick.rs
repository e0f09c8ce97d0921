//! Quicksort with a first-element pivot.
//!
//! Recursive calls work on the sub-slices either side of the pivot, each in
//! its own recorder scope, so every `Bounds` event reports the absolute range
//! of the call that emitted it.

use super::SortElement;
use crate::recorder::EventRecorder;
use st_common::{EventKind, Result};

pub fn quick_sort<T: SortElement>(a: &mut [T], rec: &mut EventRecorder<T>) -> Result<()> {
    rec.data(a)?;
    sort_window(a, rec)
}

fn sort_window<T: SortElement>(a: &mut [T], rec: &mut EventRecorder<T>) -> Result<()> {
    let n = a.len();
    if n == 0 {
        return Ok(());
    }
    rec.pair(EventKind::Bounds, a, 0, n - 1, None)?;
    if n == 1 {
        return Ok(());
    }

    let mid = partition(a, rec)?;
    rec.pair(EventKind::Partition, a, mid, n - 1, None)?;

    {
        let mut lower = rec.scope(0, mid)?;
        sort_window(&mut a[..mid], &mut *lower)?;
    }
    {
        let mut upper = rec.scope(mid + 1, n - mid - 1)?;
        sort_window(&mut a[mid + 1..], &mut *upper)?;
    }
    Ok(())
}

/// Partition around `a[0]` and return the pivot's final position.
///
/// `a` must hold at least two elements.
fn partition<T: SortElement>(a: &mut [T], rec: &mut EventRecorder<T>) -> Result<usize> {
    let last = a.len() - 1;
    let pivot_index = 0;
    rec.cell(EventKind::Index, a, pivot_index, Some("pivot_index"))?;
    let pivot = a[pivot_index].clone();
    rec.scratch(EventKind::Save, pivot_index, &pivot, "pivot")?;

    let (mut lo, mut hi) = (pivot_index, last);
    while lo < hi {
        while lo <= last {
            rec.compare(a, lo, pivot_index)?;
            if a[lo] > pivot {
                break;
            }
            lo += 1;
        }
        // a[pivot_index] stays equal to the pivot until the final swap, so
        // this scan stops at pivot_index at the latest.
        loop {
            rec.compare(a, hi, pivot_index)?;
            if a[hi] <= pivot {
                break;
            }
            hi -= 1;
        }
        if lo < hi {
            a.swap(lo, hi);
            rec.swapped(a, lo, hi)?;
        }
    }

    a.swap(hi, pivot_index);
    rec.swapped(a, hi, pivot_index)?;
    Ok(hi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use st_common::{Region, TraceEvent};
    use st_config::TraceOptions;

    fn run(mut a: Vec<i32>) -> (Vec<i32>, Vec<TraceEvent<i32>>) {
        let mut rec = EventRecorder::new(a.len(), &TraceOptions::default());
        quick_sort(&mut a, &mut rec).unwrap();
        assert_eq!(rec.depth(), 0);
        (a, rec.finish())
    }

    #[test]
    fn sorts_seed_array() {
        let (a, _) = run(vec![8, 1, 0, 5, 6, 3, 2, 4, 7, 1]);
        assert_eq!(a, vec![0, 1, 1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn first_bounds_cover_whole_array() {
        let (_, events) = run(vec![3, 1, 2]);
        let bounds = events
            .iter()
            .find(|e| e.kind == EventKind::Bounds)
            .unwrap();
        assert_eq!(bounds.indices, vec![0, 2]);
        assert_eq!(bounds.region, None);
    }

    #[test]
    fn partition_precedes_nested_bounds() {
        let (_, events) = run(vec![3, 1, 2, 5, 4]);
        let first_partition = events
            .iter()
            .position(|e| e.kind == EventKind::Partition)
            .unwrap();
        let nested_bounds = events
            .iter()
            .position(|e| e.kind == EventKind::Bounds && e.region.is_some())
            .unwrap();
        assert!(first_partition < nested_bounds);
    }

    #[test]
    fn upper_partition_bounds_are_absolute() {
        // Pivot 3 lands at index 2; the upper call covers [3, 4].
        let (a, events) = run(vec![3, 1, 2, 5, 4]);
        assert_eq!(a, vec![1, 2, 3, 4, 5]);
        let upper = events
            .iter()
            .find(|e| e.kind == EventKind::Bounds && e.region == Some(Region::new(3, 4)))
            .unwrap();
        assert_eq!(upper.indices, vec![3, 4]);
    }

    #[test]
    fn pivot_saved_under_label() {
        let (_, events) = run(vec![2, 1]);
        let save = events.iter().find(|e| e.kind == EventKind::Save).unwrap();
        assert_eq!(save.label.as_deref(), Some("pivot"));
        assert_eq!(save.values, vec![2]);
    }

    #[test]
    fn all_equal_elements_terminate() {
        let (a, _) = run(vec![5; 12]);
        assert_eq!(a, vec![5; 12]);
    }
}

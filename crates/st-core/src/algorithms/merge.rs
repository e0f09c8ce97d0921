//! Merge sort over offset-scoped windows of one backing array.
//!
//! The halves are sorted in place inside their own scopes, then copied into
//! `left`/`right` buffers and merged back. Because the recorder composes the
//! scope offsets, a `Copy` into local position `k` of a right half nested
//! three levels deep is still reported at its absolute position.

use super::SortElement;
use crate::recorder::EventRecorder;
use st_common::{EventKind, Result};

pub fn merge_sort<T: SortElement>(a: &mut [T], rec: &mut EventRecorder<T>) -> Result<()> {
    rec.data(a)?;
    sort_window(a, rec)
}

fn sort_window<T: SortElement>(a: &mut [T], rec: &mut EventRecorder<T>) -> Result<()> {
    let n = a.len();
    if n <= 1 {
        return Ok(());
    }

    let mid = n / 2;
    rec.pair(EventKind::Partition, a, mid - 1, mid, None)?;
    rec.temp_data("left", 0, &a[..mid])?;
    rec.temp_data("right", mid, &a[mid..])?;

    {
        let mut left = rec.scope(0, mid)?;
        sort_window(&mut a[..mid], &mut *left)?;
    }
    {
        let mut right = rec.scope(mid, n - mid)?;
        sort_window(&mut a[mid..], &mut *right)?;
    }

    let left = a[..mid].to_vec();
    let right = a[mid..].to_vec();
    let (mut i, mut j, mut k) = (0, 0, 0);

    while i < left.len() && j < right.len() {
        rec.compare_values(i, &left[i], mid + j, &right[j])?;
        if left[i] < right[j] {
            a[k] = left[i].clone();
            rec.cell(EventKind::Copy, a, k, Some("left"))?;
            i += 1;
        } else {
            a[k] = right[j].clone();
            rec.cell(EventKind::Copy, a, k, Some("right"))?;
            j += 1;
        }
        k += 1;
    }

    while i < left.len() {
        a[k] = left[i].clone();
        rec.cell(EventKind::Copy, a, k, Some("left"))?;
        i += 1;
        k += 1;
    }

    while j < right.len() {
        a[k] = right[j].clone();
        rec.cell(EventKind::Copy, a, k, Some("right"))?;
        j += 1;
        k += 1;
    }

    Ok(())
}

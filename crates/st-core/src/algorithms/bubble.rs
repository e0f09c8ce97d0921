//! Bubble sort.

use super::SortElement;
use crate::recorder::EventRecorder;
use st_common::{EventKind, Result};

/// Sort `a` by repeatedly swapping adjacent out-of-order pairs.
///
/// Every adjacent test is recorded as `Compare`; `Swap` only when the pair
/// is actually exchanged.
pub fn bubble_sort<T: SortElement>(a: &mut [T], rec: &mut EventRecorder<T>) -> Result<()> {
    rec.data(a)?;
    let n = a.len();
    for i in 0..n {
        for j in 0..n - i - 1 {
            rec.compare(a, j, j + 1)?;
            if a[j] > a[j + 1] {
                a.swap(j, j + 1);
                rec.swapped(a, j, j + 1)?;
            }
        }
    }
    Ok(())
}

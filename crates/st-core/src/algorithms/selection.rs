//! Selection sort.

use super::SortElement;
use crate::recorder::EventRecorder;
use st_common::{EventKind, Result};

/// Sort `a` by swapping the minimum of the unsorted suffix into place.
///
/// The outer swap is recorded on every iteration, including the no-op case
/// where the minimum is already in position.
pub fn selection_sort<T: SortElement>(a: &mut [T], rec: &mut EventRecorder<T>) -> Result<()> {
    rec.data(a)?;
    let n = a.len();
    for i in 0..n {
        let mut min = i;
        rec.cell(EventKind::Index, a, min, Some("min"))?;
        for j in i + 1..n {
            rec.compare(a, min, j)?;
            if a[min] > a[j] {
                min = j;
                rec.cell(EventKind::Index, a, min, Some("min"))?;
            }
        }
        a.swap(i, min);
        rec.swapped(a, i, min)?;
    }
    Ok(())
}

//! Insertion sort.

use super::SortElement;
use crate::recorder::EventRecorder;
use st_common::{EventKind, Result};

/// Sort `a` by shifting larger elements right and inserting each key into
/// the hole left behind.
///
/// Per outer step: `Save` of the key, a `Compare` for each shift test,
/// a `Shift` per moved cell and one `Insert` for the final placement.
pub fn insertion_sort<T: SortElement>(a: &mut [T], rec: &mut EventRecorder<T>) -> Result<()> {
    rec.data(a)?;
    for i in 1..a.len() {
        let key = a[i].clone();
        rec.scratch(EventKind::Save, i, &key, "key")?;

        // `hole` is the cell the key would occupy if the scan stopped now.
        let mut hole = i;
        while hole > 0 {
            rec.compare_values(hole - 1, &a[hole - 1], hole, &key)?;
            if key >= a[hole - 1] {
                break;
            }
            a[hole] = a[hole - 1].clone();
            rec.cell(EventKind::Shift, a, hole, None)?;
            hole -= 1;
        }

        a[hole] = key;
        rec.cell(EventKind::Insert, a, hole, Some("key"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use st_common::TraceEvent;
    use st_config::TraceOptions;

    fn run(mut a: Vec<i32>) -> (Vec<i32>, Vec<TraceEvent<i32>>) {
        let mut rec = EventRecorder::new(a.len(), &TraceOptions::default());
        insertion_sort(&mut a, &mut rec).unwrap();
        (a, rec.finish())
    }

    #[test]
    fn sorts_seed_array() {
        let (a, _) = run(vec![8, 1, 0, 5, 6, 3, 2, 4, 7, 1]);
        assert_eq!(a, vec![0, 1, 1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn single_step_shape() {
        let (a, events) = run(vec![2, 1]);
        assert_eq!(a, vec![1, 2]);
        let kinds: Vec<EventKind> = events.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::Data,
                EventKind::Save,
                EventKind::Compare,
                EventKind::Shift,
                EventKind::Insert,
            ]
        );
        assert_eq!(events[1].label.as_deref(), Some("key"));
        assert_eq!(events[1].values, vec![1]);
        assert_eq!(events[3].indices, vec![1]);
        assert_eq!(events[3].values, vec![2]);
        assert_eq!(events[4].indices, vec![0]);
        assert_eq!(events[4].values, vec![1]);
    }

    #[test]
    fn equal_keys_do_not_shift() {
        let (_, events) = run(vec![1, 1, 1]);
        assert!(events.iter().all(|e| e.kind != EventKind::Shift));
    }

    #[test]
    fn data_emitted_once() {
        let (_, events) = run(vec![5, 4, 3, 2, 1]);
        assert_eq!(
            events.iter().filter(|e| e.kind == EventKind::Data).count(),
            1
        );
    }
}

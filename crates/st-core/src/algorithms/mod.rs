//! Instrumented sorting algorithms.
//!
//! Each algorithm sorts its slice in place and records every state-relevant
//! step through an [`EventRecorder`](crate::recorder::EventRecorder). The
//! public entry points emit the initial `Data` event themselves so they can be
//! driven directly, without the runner.

pub mod bubble;
pub mod counting;
pub mod insertion;
pub mod merge;
pub mod quick;
pub mod selection;

pub use bubble::bubble_sort;
pub use counting::counting_sort;
pub use insertion::insertion_sort;
pub use merge::merge_sort;
pub use quick::quick_sort;
pub use selection::selection_sort;

use std::fmt::Debug;

/// A totally ordered element that the engine can sort and trace.
pub trait SortElement: Ord + Clone + Debug {
    /// Bucket used by counting sort, if the element has one.
    fn counting_slot(&self) -> Option<usize> {
        None
    }
}

macro_rules! impl_sort_element_for_int {
    ($($t:ty),* $(,)?) => {
        $(
            impl SortElement for $t {
                fn counting_slot(&self) -> Option<usize> {
                    usize::try_from(*self).ok()
                }
            }
        )*
    };
}

impl_sort_element_for_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl SortElement for char {
    fn counting_slot(&self) -> Option<usize> {
        Some(u32::from(*self) as usize)
    }
}

impl SortElement for String {}

impl SortElement for &str {}

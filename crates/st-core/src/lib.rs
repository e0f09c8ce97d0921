//! Instrumented sorting-algorithm trace engine.
//!
//! A run sorts a copy of its input with one registered algorithm while an
//! [`EventRecorder`](recorder::EventRecorder) captures every state-relevant
//! step. The resulting trace is sufficient to reconstruct the final array
//! without re-running the algorithm; see [`replay`].
//!
//! ```ignore
//! use st_core::runner::{run, RunParams};
//!
//! let out = run("merge", &[5, 2, 4, 1], &RunParams::default())?;
//! assert_eq!(out.sorted, vec![1, 2, 4, 5]);
//! assert_eq!(st_core::replay::replay(out.trace.events())?, out.sorted);
//! ```

pub mod algorithms;
pub mod exit_codes;
pub mod logging;
pub mod recorder;
pub mod replay;
pub mod runner;

pub use algorithms::SortElement;
pub use exit_codes::ExitCode;
pub use recorder::{EventRecorder, ScopeGuard};
pub use runner::{run, RunOutput, RunParams, Runner};

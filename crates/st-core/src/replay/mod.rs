//! Trace replay, persistence and built-in scenarios.
//!
//! # Replay
//!
//! ```ignore
//! use st_core::replay::{replay, verify};
//! use st_core::runner::{run, RunParams};
//!
//! let out = run("quick", &[3, 1, 2], &RunParams::default())?;
//! assert_eq!(replay(out.trace.events())?, out.sorted);
//! assert!(verify(out.trace.events(), &[1, 2, 3]));
//! ```
//!
//! # Trace files
//!
//! ```ignore
//! use st_core::replay::{load_trace, TraceFile};
//!
//! let file = TraceFile::record(&input, &params, &out)?;
//! file.save("trace.json".as_ref())?;
//! let loaded: TraceFile<i64> = load_trace("trace.json".as_ref())?;
//! ```
//!
//! # Built-in scenarios
//!
//! ```ignore
//! use st_core::replay::scenarios;
//!
//! let out = scenarios::bubble_demo().run(&Runner::default(), None)?;
//! ```

pub mod scenarios;
pub mod trace_file;
pub mod validator;

pub use scenarios::Scenario;
pub use trace_file::{content_digest, load_trace, TraceFile, TRACE_SCHEMA_VERSION};
pub use validator::{check_trace, replay, verify, TraceReport};

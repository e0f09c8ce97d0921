//! Sort trace common types, IDs, and errors.
//!
//! This crate provides the vocabulary shared by the trace engine and by any
//! consumer of its output:
//! - The typed trace event model and the immutable `Trace` container
//! - The registry of algorithm names
//! - Run identifiers and schema versioning
//! - Common error types

pub mod algorithm;
pub mod error;
pub mod event;
pub mod id;
pub mod schema;
pub mod trace;

pub use algorithm::Algorithm;
pub use error::{Error, Result};
pub use event::{EventKind, Region, TraceEvent};
pub use id::RunId;
pub use schema::SCHEMA_VERSION;
pub use trace::Trace;

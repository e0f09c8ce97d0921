//! Persisted traces: recording a run to JSON, loading it back, and checking
//! that nothing was altered in between.

use crate::algorithms::counting::counting_slots;
use crate::algorithms::SortElement;
use crate::replay::validator::{check_trace, verify, TraceReport};
use crate::runner::{RunOutput, RunParams};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use st_common::schema::is_compatible;
use st_common::{Algorithm, Error, Result, RunId, Trace, TraceEvent};
use std::path::Path;
use tracing::debug;

/// Schema version written into every trace file.
pub const TRACE_SCHEMA_VERSION: &str = st_common::SCHEMA_VERSION;

/// One run persisted with enough context to replay and verify it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TraceFile<T> {
    /// Schema version for compatibility checking.
    pub schema_version: String,

    pub run_id: RunId,

    /// RFC 3339 timestamp of recording.
    pub recorded_at: String,

    pub algorithm: Algorithm,

    /// Input as supplied by the caller, before sorting.
    pub input: Vec<T>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<usize>,

    /// Final array returned by the run.
    pub sorted: Vec<T>,

    /// SHA-256 hex digest of the recorded content; see [`content_digest`].
    pub digest: String,

    pub events: Vec<TraceEvent<T>>,
}

impl<T: Clone + Serialize> TraceFile<T> {
    /// Record a finished run.
    pub fn record(input: &[T], params: &RunParams, output: &RunOutput<T>) -> Result<Self> {
        let mut file = TraceFile {
            schema_version: TRACE_SCHEMA_VERSION.to_string(),
            run_id: RunId::new(),
            recorded_at: chrono::Utc::now().to_rfc3339(),
            algorithm: output.trace.algorithm(),
            input: input.to_vec(),
            max_value: params.max_value,
            sorted: output.sorted.clone(),
            digest: String::new(),
            events: output.trace.events().to_vec(),
        };
        file.digest = content_digest(&file)?;
        Ok(file)
    }

    /// Save the trace file as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        debug!(path = %path.display(), run_id = %self.run_id, "trace saved");
        Ok(())
    }

    /// Rebuild the in-memory trace.
    pub fn to_trace(&self) -> Trace<T> {
        Trace::new(self.algorithm, self.input.len(), self.events.clone())
    }
}

impl<T: SortElement + Serialize> TraceFile<T> {
    /// Structural checks, header consistency and replay in one report.
    ///
    /// The leading `Data` snapshot must equal `input`, counting runs must
    /// carry a `max_value` that bounds `input`, and replay must reproduce
    /// `sorted`.
    pub fn check(&self) -> TraceReport {
        let mut report = check_trace(&self.events, self.input.len());

        if let Some(first) = self.events.first() {
            if first.values != self.input {
                report
                    .violations
                    .push("data snapshot does not match the recorded input".to_string());
            }
        }

        match (self.algorithm, self.max_value) {
            (Algorithm::Counting, None) => report
                .violations
                .push("counting trace has no max_value".to_string()),
            (Algorithm::Counting, Some(max_value)) => {
                if let Err(err) = counting_slots(&self.input, max_value) {
                    report.violations.push(format!("input rejected: {err}"));
                }
            }
            _ => {}
        }

        if report.is_ok() && !verify(&self.events, &self.sorted) {
            report.violations.push(format!(
                "replay of {} does not reproduce the recorded result",
                self.run_id
            ));
        }
        report
    }
}

/// Fields covered by the digest. Run identity and timestamp are excluded so
/// that equal runs hash equally.
#[derive(Serialize)]
struct DigestedContent<'a, T> {
    algorithm: Algorithm,
    input: &'a [T],
    max_value: Option<usize>,
    sorted: &'a [T],
    events: &'a [TraceEvent<T>],
}

/// SHA-256 hex digest of the algorithm, input, `max_value`, result and
/// events of a trace file.
///
/// Runs are deterministic, so two runs of the same algorithm on the same
/// input produce the same digest.
pub fn content_digest<T: Serialize>(file: &TraceFile<T>) -> Result<String> {
    let content = DigestedContent {
        algorithm: file.algorithm,
        input: &file.input,
        max_value: file.max_value,
        sorted: &file.sorted,
        events: &file.events,
    };
    let bytes = serde_json::to_vec(&content)?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

/// Load a trace file, rejecting incompatible schema versions and files whose
/// content no longer matches their digest.
pub fn load_trace<T: Serialize + DeserializeOwned>(path: &Path) -> Result<TraceFile<T>> {
    let content = std::fs::read_to_string(path)?;
    let file: TraceFile<T> = serde_json::from_str(&content)?;

    if !is_compatible(&file.schema_version) {
        return Err(Error::IncompatibleSchema {
            found: file.schema_version,
            expected: TRACE_SCHEMA_VERSION.to_string(),
        });
    }

    let actual = content_digest(&file)?;
    if actual != file.digest {
        return Err(Error::DigestMismatch {
            expected: file.digest,
            actual,
        });
    }

    debug!(path = %path.display(), events = file.events.len(), "trace loaded");
    Ok(file)
}

//! Orchestration of one traced run.
//!
//! A run copies the caller's input into a fresh backing array, sorts it with
//! exactly one registered algorithm under a fresh recorder, and returns the
//! final array together with the frozen trace. Nothing is returned on
//! failure: a run that trips an invariant discards its partial trace.

use crate::algorithms::{
    bubble_sort, counting::counting_slots, counting_sort, insertion_sort, merge_sort, quick_sort,
    selection_sort, SortElement,
};
use crate::recorder::EventRecorder;
use st_common::{Algorithm, Error, Result, Trace};
use st_config::TraceOptions;
use tracing::{debug, info, info_span, warn};

/// Optional per-run algorithm parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunParams {
    /// Upper bound on element values; required by counting sort.
    pub max_value: Option<usize>,
}

impl RunParams {
    pub fn with_max_value(max_value: usize) -> Self {
        RunParams {
            max_value: Some(max_value),
        }
    }
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutput<T> {
    pub sorted: Vec<T>,
    pub trace: Trace<T>,
}

/// Runs algorithms under a fixed set of trace options.
#[derive(Debug, Clone, Default)]
pub struct Runner {
    options: TraceOptions,
}

impl Runner {
    pub fn new(options: TraceOptions) -> Self {
        Runner { options }
    }

    pub fn options(&self) -> &TraceOptions {
        &self.options
    }

    /// Run the algorithm registered under `name`.
    pub fn run<T: SortElement>(
        &self,
        name: &str,
        input: &[T],
        params: &RunParams,
    ) -> Result<RunOutput<T>> {
        let algorithm: Algorithm = name.parse()?;
        self.run_algorithm(algorithm, input, params)
    }

    pub fn run_algorithm<T: SortElement>(
        &self,
        algorithm: Algorithm,
        input: &[T],
        params: &RunParams,
    ) -> Result<RunOutput<T>> {
        let span = info_span!("run", %algorithm, len = input.len());
        let _enter = span.enter();

        let max_value = check_params(algorithm, input, params)?;
        let mut array = input.to_vec();
        let mut rec = EventRecorder::new(array.len(), &self.options);
        info!("run started");

        let outcome = match algorithm {
            Algorithm::Bubble => bubble_sort(&mut array, &mut rec),
            Algorithm::Insertion => insertion_sort(&mut array, &mut rec),
            Algorithm::Selection => selection_sort(&mut array, &mut rec),
            Algorithm::Merge => merge_sort(&mut array, &mut rec),
            Algorithm::Quick => quick_sort(&mut array, &mut rec),
            Algorithm::Counting => counting_sort(&mut array, &mut rec, max_value.unwrap_or(0)),
        };

        if let Err(err) = outcome {
            if matches!(err, Error::InvariantViolation(_)) {
                warn!(error = %err, recorded = rec.len(), "run aborted, partial trace discarded");
            }
            return Err(err);
        }

        let events = rec.finish();
        info!(events = events.len(), "run complete");
        Ok(RunOutput {
            sorted: array,
            trace: Trace::new(algorithm, input.len(), events),
        })
    }
}

/// Run the algorithm registered under `name` with default trace options.
pub fn run<T: SortElement>(name: &str, input: &[T], params: &RunParams) -> Result<RunOutput<T>> {
    Runner::default().run(name, input, params)
}

/// Validate parameters before any event is recorded. Returns the counting
/// bound when the algorithm uses one.
fn check_params<T: SortElement>(
    algorithm: Algorithm,
    input: &[T],
    params: &RunParams,
) -> Result<Option<usize>> {
    if !algorithm.requires_max_value() {
        if let Some(max_value) = params.max_value {
            debug!(max_value, "max_value ignored by this algorithm");
        }
        return Ok(None);
    }

    let max_value = params.max_value.ok_or_else(|| {
        Error::InvalidParams(format!("{algorithm} sort requires max_value"))
    })?;
    counting_slots(input, max_value)?;
    Ok(Some(max_value))
}

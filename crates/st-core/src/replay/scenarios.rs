//! Built-in inputs for demonstrations and regression tests.
//!
//! Each scenario pairs a fixed input with the algorithm it showcases. Any
//! scenario can be run under a different algorithm; counting sort needs a
//! `max_value`, which every scenario input fits under.

use crate::runner::{RunOutput, RunParams, Runner};
use serde::Serialize;
use st_common::{Algorithm, Result};

/// Bound on the values of every built-in input.
const SCENARIO_MAX_VALUE: usize = 100;

/// A named input with its default algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scenario {
    pub name: &'static str,
    pub description: &'static str,
    pub algorithm: Algorithm,
    pub input: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_value: Option<usize>,
}

impl Scenario {
    fn new(name: &'static str, description: &'static str, algorithm: Algorithm, input: Vec<i64>) -> Self {
        Scenario {
            name,
            description,
            algorithm,
            input,
            max_value: None,
        }
    }

    /// Parameters for running this scenario under `algorithm`.
    pub fn params_for(&self, algorithm: Algorithm) -> RunParams {
        match (self.max_value, algorithm.requires_max_value()) {
            (Some(max_value), _) => RunParams::with_max_value(max_value),
            (None, true) => RunParams::with_max_value(SCENARIO_MAX_VALUE),
            (None, false) => RunParams::default(),
        }
    }

    /// Run the scenario, optionally overriding its algorithm.
    pub fn run(&self, runner: &Runner, algorithm: Option<Algorithm>) -> Result<RunOutput<i64>> {
        let algorithm = algorithm.unwrap_or(self.algorithm);
        runner.run_algorithm(algorithm, &self.input, &self.params_for(algorithm))
    }
}

/// Seven values with the maximum at the end.
pub fn bubble_demo() -> Scenario {
    Scenario::new(
        "bubble_demo",
        "Classic bubble sort walkthrough",
        Algorithm::Bubble,
        vec![64, 34, 25, 12, 22, 11, 90],
    )
}

/// Ten values in 0..=8 with one duplicate.
pub fn seed_array() -> Scenario {
    Scenario::new(
        "seed_array",
        "Shared demo input with a repeated value",
        Algorithm::Merge,
        vec![8, 1, 0, 5, 6, 3, 2, 4, 7, 1],
    )
}

/// Counting sort over the seed array with a tight bound.
pub fn counting_demo() -> Scenario {
    Scenario {
        max_value: Some(10),
        ..Scenario::new(
            "counting_demo",
            "Counting sort with max_value 10",
            Algorithm::Counting,
            vec![8, 1, 0, 5, 6, 3, 2, 4, 7, 1],
        )
    }
}

pub fn already_sorted() -> Scenario {
    Scenario::new(
        "already_sorted",
        "Sorted input; every mutation is a no-op",
        Algorithm::Insertion,
        vec![1, 2, 3, 4, 5, 6, 7, 8],
    )
}

pub fn reversed() -> Scenario {
    Scenario::new(
        "reversed",
        "Strictly descending input",
        Algorithm::Selection,
        vec![9, 8, 7, 6, 5, 4, 3, 2, 1],
    )
}

pub fn duplicates() -> Scenario {
    Scenario::new(
        "duplicates",
        "Heavy duplication around a single pivot value",
        Algorithm::Quick,
        vec![3, 1, 3, 3, 2, 1, 3, 2],
    )
}

pub fn empty() -> Scenario {
    Scenario::new("empty", "No elements", Algorithm::Bubble, Vec::new())
}

pub fn single() -> Scenario {
    Scenario::new("single", "One element", Algorithm::Merge, vec![42])
}

/// Every built-in scenario, in listing order.
pub fn all() -> Vec<Scenario> {
    vec![
        bubble_demo(),
        seed_array(),
        counting_demo(),
        already_sorted(),
        reversed(),
        duplicates(),
        empty(),
        single(),
    ]
}

pub fn by_name(name: &str) -> Option<Scenario> {
    all().into_iter().find(|s| s.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_unique() {
        let names: Vec<_> = all().iter().map(|s| s.name).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), names.len());
    }

    #[test]
    fn test_by_name() {
        assert_eq!(by_name("counting_demo").unwrap().max_value, Some(10));
        assert!(by_name("nope").is_none());
    }

    #[test]
    fn test_inputs_fit_default_bound() {
        for scenario in all() {
            assert!(
                scenario
                    .input
                    .iter()
                    .all(|&v| v >= 0 && v as usize <= SCENARIO_MAX_VALUE),
                "{}",
                scenario.name
            );
        }
    }

    #[test]
    fn test_all_scenarios_run_under_every_algorithm() {
        let runner = Runner::default();
        for scenario in all() {
            let mut expected = scenario.input.clone();
            expected.sort();
            for algorithm in Algorithm::ALL {
                let out = scenario
                    .run(&runner, Some(algorithm))
                    .unwrap_or_else(|e| panic!("{} under {algorithm}: {e}", scenario.name));
                assert_eq!(out.sorted, expected, "{} under {algorithm}", scenario.name);
            }
        }
    }

    #[test]
    fn test_params_for() {
        let demo = bubble_demo();
        assert_eq!(demo.params_for(Algorithm::Bubble), RunParams::default());
        assert_eq!(
            demo.params_for(Algorithm::Counting),
            RunParams::with_max_value(SCENARIO_MAX_VALUE)
        );
        assert_eq!(
            counting_demo().params_for(Algorithm::Quick),
            RunParams::with_max_value(10)
        );
    }
}

//! Python bindings, built with the `python` feature.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use std::collections::HashMap;

use crate::error::BracketError;
use crate::model::{ModelConfig, Predictor};
use crate::ratings::Ratings;
use crate::team::Team;
use crate::tournament::{self, SimOptions};
use crate::win_prob;

impl From<BracketError> for PyErr {
    fn from(err: BracketError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

/// Evaluate a JSON request and return the JSON result.
#[pyfunction]
#[pyo3(name = "simulate_json", signature = (payload, parallel = false))]
fn py_simulate_json(py: Python<'_>, payload: &str, parallel: bool) -> PyResult<String> {
    let options = SimOptions { parallel };
    Ok(py.allow_threads(|| tournament::simulate_json(payload, &options))?)
}

/// Historical seed-based win probability.
#[pyfunction]
#[pyo3(name = "seed_prob")]
fn py_seed_prob(seed1: u32, seed2: u32) -> f64 {
    win_prob::seed_prob(seed1, seed2)
}

/// Win probability of team A over team B under a JSON model config.
#[pyfunction]
#[pyo3(name = "win_prob", signature = (seed_a, seed_b, name_a, name_b, ratings = None, model_json = None))]
fn py_win_prob(
    seed_a: u32,
    seed_b: u32,
    name_a: &str,
    name_b: &str,
    ratings: Option<HashMap<String, f64>>,
    model_json: Option<&str>,
) -> PyResult<f64> {
    let config: ModelConfig = match model_json {
        Some(json) => serde_json::from_str(json).map_err(BracketError::from)?,
        None => ModelConfig::default(),
    };
    let ratings: Ratings = ratings.unwrap_or_default().into_iter().collect();
    let predictor = Predictor::from_config(&config, ratings);

    Ok(predictor.win_prob(&Team::new(name_a, seed_a), &Team::new(name_b, seed_b)))
}

/// Python module definition
#[pymodule]
fn bracket_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_simulate_json, m)?)?;
    m.add_function(wrap_pyfunction!(py_seed_prob, m)?)?;
    m.add_function(wrap_pyfunction!(py_win_prob, m)?)?;

    m.add("DEFAULT_SEED_PROB", crate::constants::DEFAULT_SEED_PROB)?;
    m.add("DEFAULT_ALPHA", crate::constants::DEFAULT_ALPHA)?;

    Ok(())
}

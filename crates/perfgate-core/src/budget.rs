//! # Performance Budgets
//!
//! Declarative ceilings and floors for a test run, loaded from a JSON
//! configuration document. A budget is immutable once loaded and is
//! passed explicitly into the evaluator, never held as process-wide
//! state, so concurrent evaluations can use different budgets.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading a budget document.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read budget file: {0}")]
    Io(#[from] std::io::Error),
    /// Not JSON, or missing one of the required numeric fields.
    #[error("invalid budget document: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Response-time percentile ceilings in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseTimeBudget {
    /// Informational only; never evaluated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p50: Option<f64>,
    pub p95: f64,
    pub p99: f64,
}

/// Throughput floor in requests per second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThroughputBudget {
    pub min: f64,
}

/// Declarative performance budget.
///
/// Serialized field names follow the configuration document schema:
/// `responseTime.p95`, `responseTime.p99`, `errorRate`, `throughput.min`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    #[serde(rename = "responseTime")]
    pub response_time: ResponseTimeBudget,
    /// Error-rate ceiling in percent.
    #[serde(rename = "errorRate")]
    pub error_rate: f64,
    pub throughput: ThroughputBudget,
}

impl Default for Budget {
    fn default() -> Self {
        Self {
            response_time: ResponseTimeBudget {
                p50: Some(300.0),
                p95: 800.0,
                p99: 1500.0,
            },
            error_rate: 1.0,
            throughput: ThroughputBudget { min: 50.0 },
        }
    }
}

impl Budget {
    /// Parse a budget from raw JSON bytes.
    pub fn from_slice(raw: &[u8]) -> Result<Self, ConfigError> {
        Ok(serde_json::from_slice(raw)?)
    }

    /// Load a budget document from disk.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let raw = fs::read(path)?;
        Self::from_slice(&raw)
    }
}

//! # Summary Builder
//!
//! Merges per-tool metric mappings into one normalized view of a test
//! run. The first source (in the caller-supplied precedence order) with
//! any metrics populates the derived top-level fields; every source's
//! raw records are retained under `sources` for detailed reporting.

use crate::metric::MetricRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Metric names that carry response-time statistics, per tool dialect.
const LATENCY_METRICS: &[&str] = &["http_req_duration", "http.response_time", "latency"];
/// Rate-kind metrics carrying the failed-request fraction.
const ERROR_RATE_METRICS: &[&str] = &["http_req_failed", "http.request_failure_rate"];
/// Metrics carrying requests-per-second throughput.
const THROUGHPUT_METRICS: &[&str] = &["http_reqs", "http.request_rate", "rps"];

/// Value-label aliases resolved by the builder, not by adapters.
const AVG_LABELS: &[&str] = &["avg", "mean"];
const P95_LABELS: &[&str] = &["p95", "p(95)"];
const P99_LABELS: &[&str] = &["p99", "p(99)"];
const RATE_LABELS: &[&str] = &["rate", "value", "mean"];

/// One tool's raw metric mapping, retained for detailed reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceMetrics {
    pub source: String,
    pub metrics: HashMap<String, MetricRecord>,
}

/// Normalized, tool-agnostic aggregate of one test run's key metrics.
///
/// Serialized field names match the summary.json document consumed by
/// downstream report tooling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    /// Creation time; informational, never used in evaluation.
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "avgResponseTime")]
    pub avg_response_time_ms: f64,
    #[serde(rename = "p95")]
    pub p95_ms: f64,
    #[serde(rename = "p99")]
    pub p99_ms: f64,
    /// Percent in `[0, 100]`.
    #[serde(rename = "errorRate")]
    pub error_rate_percent: f64,
    #[serde(rename = "throughput")]
    pub throughput_per_sec: f64,
    /// Per-tool raw metric mappings, in the order they were supplied.
    #[serde(default)]
    pub sources: Vec<SourceMetrics>,
}

impl Default for Summary {
    fn default() -> Self {
        Self {
            timestamp: Utc::now(),
            avg_response_time_ms: 0.0,
            p95_ms: 0.0,
            p99_ms: 0.0,
            error_rate_percent: 0.0,
            throughput_per_sec: 0.0,
            sources: Vec::new(),
        }
    }
}

impl Summary {
    /// Build a summary from adapter outputs supplied in precedence
    /// order.
    ///
    /// Exactly one source's derived values populate the top-level
    /// fields: the first with at least one record. Later sources do not
    /// overwrite already-set fields but are still recorded under
    /// `sources`. No source with data yields the all-zero summary — a
    /// valid "no test ran" result, not an error.
    pub fn from_sources(sources: Vec<SourceMetrics>) -> Self {
        let mut summary = Summary::default();

        if let Some(primary) = sources.iter().find(|source| !source.metrics.is_empty()) {
            tracing::debug!(source = %primary.source, "deriving summary fields");
            let metrics = &primary.metrics;

            summary.avg_response_time_ms =
                lookup(metrics, LATENCY_METRICS, AVG_LABELS).unwrap_or(0.0);
            summary.p95_ms = lookup(metrics, LATENCY_METRICS, P95_LABELS).unwrap_or(0.0);
            summary.p99_ms = lookup(metrics, LATENCY_METRICS, P99_LABELS).unwrap_or(0.0);
            // Adapters report the failed fraction; scale to percent.
            summary.error_rate_percent = (lookup(metrics, ERROR_RATE_METRICS, RATE_LABELS)
                .unwrap_or(0.0)
                * 100.0)
                .clamp(0.0, 100.0);
            summary.throughput_per_sec =
                lookup(metrics, THROUGHPUT_METRICS, RATE_LABELS).unwrap_or(0.0);
        } else {
            tracing::debug!("no source produced metrics");
        }

        summary.sources = sources;
        summary
    }
}

/// Resolve the first value present under any alias of a well-known
/// metric.
fn lookup(
    metrics: &HashMap<String, MetricRecord>,
    names: &[&str],
    labels: &[&str],
) -> Option<f64> {
    names
        .iter()
        .find_map(|name| metrics.get(*name).and_then(|record| record.any_value(labels)))
}

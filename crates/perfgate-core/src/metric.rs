//! # Normalized Metric Schema
//!
//! The shared unit of data produced by every format adapter: a named
//! metric with a kind and a bag of labeled numeric values.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Kind of a normalized metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricKind {
    /// Monotonic event count (e.g. total requests)
    Counter,
    /// Per-second or fractional rate (e.g. failed-request fraction)
    Rate,
    /// Summary of a sampled distribution (e.g. latency percentiles)
    Distribution,
}

/// A normalized metric: labeled numeric values under one name.
///
/// `values` is never empty — adapters only materialize a record once at
/// least one value exists. Unknown labels are preserved as-is, so
/// adapters reporting extra percentiles stay forward-compatible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    pub name: String,
    pub kind: MetricKind,
    pub values: HashMap<String, f64>,
}

impl MetricRecord {
    /// Create a record with a single initial value.
    pub fn single(
        name: impl Into<String>,
        kind: MetricKind,
        label: impl Into<String>,
        value: f64,
    ) -> Self {
        let mut values = HashMap::new();
        values.insert(label.into(), value);
        Self {
            name: name.into(),
            kind,
            values,
        }
    }

    /// Create a record from a set of values, or `None` when the set is
    /// empty.
    pub fn from_values(
        name: impl Into<String>,
        kind: MetricKind,
        values: HashMap<String, f64>,
    ) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        Some(Self {
            name: name.into(),
            kind,
            values,
        })
    }

    /// Insert or overwrite a labeled value.
    pub fn insert(&mut self, label: impl Into<String>, value: f64) {
        self.values.insert(label.into(), value);
    }

    /// Look up a value under the first label present from `labels`.
    ///
    /// Different tools label the same statistic differently (`p95` vs
    /// `p(95)`); callers pass their alias list in preference order.
    pub fn any_value(&self, labels: &[&str]) -> Option<f64> {
        labels
            .iter()
            .find_map(|label| self.values.get(*label).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_value_record() {
        let record = MetricRecord::single("http_reqs", MetricKind::Counter, "count", 7200.0);
        assert_eq!(record.name, "http_reqs");
        assert_eq!(record.kind, MetricKind::Counter);
        assert_eq!(record.values.len(), 1);
        assert_eq!(record.values.get("count"), Some(&7200.0));
    }

    #[test]
    fn test_empty_values_yield_no_record() {
        let record = MetricRecord::from_values("empty", MetricKind::Rate, HashMap::new());
        assert!(record.is_none());
    }

    #[test]
    fn test_any_value_respects_alias_order() {
        let mut record =
            MetricRecord::single("http_req_duration", MetricKind::Distribution, "p(95)", 450.0);
        record.insert("avg", 230.0);

        assert_eq!(record.any_value(&["p95", "p(95)"]), Some(450.0));
        assert_eq!(record.any_value(&["avg", "mean"]), Some(230.0));
        assert_eq!(record.any_value(&["p99", "p(99)"]), None);
    }

    #[test]
    fn test_unknown_labels_are_preserved() {
        let mut record =
            MetricRecord::single("http_req_duration", MetricKind::Distribution, "avg", 230.0);
        record.insert("p(99.9)", 2100.0);

        assert_eq!(record.values.get("p(99.9)"), Some(&2100.0));
    }

    #[test]
    fn test_insert_overwrites_existing_label() {
        let mut record = MetricRecord::single("checks", MetricKind::Rate, "rate", 0.5);
        record.insert("rate", 0.9);
        assert_eq!(record.values.get("rate"), Some(&0.9));
        assert_eq!(record.values.len(), 1);
    }
}

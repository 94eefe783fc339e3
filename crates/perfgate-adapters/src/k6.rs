//! # k6 Streaming-Point Adapter
//!
//! Parses the newline-delimited JSON stream k6 writes with `--out json`:
//! one `{type, metric, data}` object per line. `Point` lines carry
//! samples, `Metric` lines declare each metric's kind. k6 and wrapper
//! scripts interleave diagnostics with the stream, so a line that fails
//! to parse is skipped and never aborts the run.

use crate::{ParseError, ResultAdapter, SourceKind};
use perfgate_core::{MetricKind, MetricRecord};
use serde_json::Value;
use std::collections::HashMap;

pub struct K6Adapter;

impl ResultAdapter for K6Adapter {
    fn source(&self) -> SourceKind {
        SourceKind::K6
    }

    fn parse(&self, raw: &[u8]) -> Result<HashMap<String, MetricRecord>, ParseError> {
        let text = std::str::from_utf8(raw)
            .map_err(|_| ParseError::InvalidDocument("stream is not valid UTF-8".to_string()))?;

        let mut records: HashMap<String, MetricRecord> = HashMap::new();
        let mut declared_kinds: HashMap<String, MetricKind> = HashMap::new();
        let mut skipped = 0usize;

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let value: Value = match serde_json::from_str(line) {
                Ok(value) => value,
                Err(_) => {
                    skipped += 1;
                    continue;
                }
            };
            let Some(object) = value.as_object() else {
                skipped += 1;
                continue;
            };
            let Some(metric) = object.get("metric").and_then(Value::as_str) else {
                continue;
            };

            match object.get("type").and_then(Value::as_str) {
                Some("Point") => {
                    if let Some(data) = object.get("data").and_then(Value::as_object) {
                        ingest_point(&mut records, metric, data);
                    }
                }
                Some("Metric") => {
                    if let Some(declared) = object
                        .get("data")
                        .and_then(Value::as_object)
                        .and_then(|data| data.get("type"))
                        .and_then(Value::as_str)
                    {
                        declared_kinds.insert(metric.to_string(), kind_from_declaration(declared));
                    }
                }
                _ => {}
            }
        }

        if skipped > 0 {
            tracing::debug!(skipped, "skipped malformed stream lines");
        }

        // Declarations may arrive before or after the points they
        // describe, so kinds are applied once the stream is exhausted.
        for (name, kind) in declared_kinds {
            if let Some(record) = records.get_mut(&name) {
                record.kind = kind;
            }
        }

        Ok(records)
    }
}

fn ingest_point(
    records: &mut HashMap<String, MetricRecord>,
    metric: &str,
    data: &serde_json::Map<String, Value>,
) {
    let mut incoming: Vec<(String, f64)> = Vec::new();

    match data.get("tags").and_then(Value::as_object) {
        Some(tags) => {
            // A tagged point records its value under every tag key, so
            // tags that co-occur on one point do not overwrite each
            // other.
            if let Some(point_value) = data.get("value").and_then(Value::as_f64) {
                for tag_key in tags.keys() {
                    incoming.push((tag_key.clone(), point_value));
                }
            }
        }
        None => {
            // Untagged points merge their numeric fields directly.
            for (label, value) in data {
                if let Some(number) = value.as_f64() {
                    incoming.push((label.clone(), number));
                }
            }
        }
    }

    if incoming.is_empty() {
        return;
    }

    match records.get_mut(metric) {
        Some(record) => {
            for (label, value) in incoming {
                record.insert(label, value);
            }
        }
        None => {
            let values: HashMap<String, f64> = incoming.into_iter().collect();
            if let Some(record) = MetricRecord::from_values(metric, MetricKind::Distribution, values)
            {
                records.insert(metric.to_string(), record);
            }
        }
    }
}

fn kind_from_declaration(declared: &str) -> MetricKind {
    match declared {
        "counter" => MetricKind::Counter,
        "rate" => MetricKind::Rate,
        // trend, gauge, and anything future map to a distribution bag.
        _ => MetricKind::Distribution,
    }
}

//! # Artillery Aggregate-Document Adapter
//!
//! Parses the single JSON document Artillery writes after a run. The
//! sections `counters`, `rates`, and `summaries` each map their entries
//! directly to records, with the kind inferred from the section. Modern
//! Artillery nests the sections under an `aggregate` key; the legacy
//! layout keeps them at the root with `aggregate` doubling as a flat
//! summaries section.

use crate::{ParseError, ResultAdapter, SourceKind};
use perfgate_core::{MetricKind, MetricRecord};
use serde_json::Value;
use std::collections::HashMap;

pub struct ArtilleryAdapter;

const SECTIONS: [(&str, MetricKind); 3] = [
    ("counters", MetricKind::Counter),
    ("rates", MetricKind::Rate),
    ("summaries", MetricKind::Distribution),
];

impl ResultAdapter for ArtilleryAdapter {
    fn source(&self) -> SourceKind {
        SourceKind::Artillery
    }

    fn parse(&self, raw: &[u8]) -> Result<HashMap<String, MetricRecord>, ParseError> {
        let document: Value = serde_json::from_slice(raw)
            .map_err(|e| ParseError::InvalidDocument(format!("not valid JSON: {e}")))?;
        let Some(root) = document.as_object() else {
            return Err(ParseError::InvalidDocument(
                "root is not a JSON object".to_string(),
            ));
        };

        // `aggregate` is a section container iff it holds at least one
        // of the section keys; otherwise it is a flat summaries alias.
        let nested = root
            .get("aggregate")
            .and_then(Value::as_object)
            .filter(|aggregate| SECTIONS.iter().any(|(key, _)| aggregate.contains_key(*key)));
        let sections_root = nested.unwrap_or(root);

        let mut records = HashMap::new();
        for (section, kind) in SECTIONS {
            let Some(entries) = sections_root.get(section).and_then(Value::as_object) else {
                continue;
            };
            for (name, entry) in entries {
                ingest_entry(&mut records, name, kind, entry);
            }
        }

        if nested.is_none() {
            if let Some(entries) = root.get("aggregate").and_then(Value::as_object) {
                for (name, entry) in entries {
                    ingest_entry(&mut records, name, MetricKind::Distribution, entry);
                }
            }
        }

        tracing::debug!(records = records.len(), "parsed aggregate document");
        Ok(records)
    }
}

/// Map one section entry to a record. Object entries contribute their
/// numeric fields; scalar entries become a single value labeled by the
/// section kind.
fn ingest_entry(
    records: &mut HashMap<String, MetricRecord>,
    name: &str,
    kind: MetricKind,
    entry: &Value,
) {
    let mut values = HashMap::new();
    match entry {
        Value::Object(fields) => {
            for (label, value) in fields {
                if let Some(number) = value.as_f64() {
                    values.insert(label.clone(), number);
                }
            }
        }
        other => {
            if let Some(number) = other.as_f64() {
                values.insert(scalar_label(kind).to_string(), number);
            }
        }
    }

    if let Some(record) = MetricRecord::from_values(name, kind, values) {
        records.insert(name.to_string(), record);
    }
}

fn scalar_label(kind: MetricKind) -> &'static str {
    match kind {
        MetricKind::Counter => "count",
        MetricKind::Rate => "rate",
        MetricKind::Distribution => "value",
    }
}

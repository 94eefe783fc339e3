//! # Perfgate Format Adapters
//!
//! Translates each load-generation tool's raw result artifact into the
//! normalized metric mapping consumed by the summary builder. Two
//! adapters exist: the k6 streaming-point adapter (newline-delimited
//! JSON) and the Artillery aggregate-document adapter (one JSON
//! document per run).
//!
//! The adapter set is closed: [`SourceKind`] enumerates the supported
//! tools and carries their fixed precedence order, so supporting a new
//! tool is a new variant plus adapter — the summary builder never
//! changes.

/// Artillery aggregate-document adapter
pub mod artillery;
/// k6 streaming-point adapter
pub mod k6;

use perfgate_core::MetricRecord;
use std::collections::HashMap;
use thiserror::Error;

pub use artillery::ArtilleryAdapter;
pub use k6::K6Adapter;

/// Errors produced by a format adapter.
///
/// An invalid document is fatal for that adapter's source only; the
/// pipeline still aggregates the remaining sources.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The root of the input is not the shape the adapter expects —
    /// not JSON at all, or JSON of the wrong top-level type.
    #[error("invalid document: {0}")]
    InvalidDocument(String),
}

/// Identifier of a supported load-generation tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    K6,
    Artillery,
}

impl SourceKind {
    /// Fixed precedence order for summary building: the k6 stream
    /// before the Artillery aggregate document, reflecting
    /// tool-invocation order.
    pub const PRECEDENCE: [SourceKind; 2] = [SourceKind::K6, SourceKind::Artillery];

    /// Stable label used in summaries, reports, and logs.
    pub fn label(self) -> &'static str {
        match self {
            SourceKind::K6 => "k6",
            SourceKind::Artillery => "artillery",
        }
    }

    /// The adapter handling this source's artifact format.
    pub fn adapter(self) -> Box<dyn ResultAdapter> {
        match self {
            SourceKind::K6 => Box::new(K6Adapter),
            SourceKind::Artillery => Box::new(ArtilleryAdapter),
        }
    }
}

/// Translates one tool's raw result artifact into normalized records.
///
/// Implementations are pure functions over the input bytes: no shared
/// state, each call produces a fresh mapping.
pub trait ResultAdapter {
    /// Which tool this adapter handles.
    fn source(&self) -> SourceKind;

    /// Parse a complete result artifact into a metric-name → record
    /// mapping. Missing optional content yields fewer records, never
    /// an error.
    fn parse(&self, raw: &[u8]) -> Result<HashMap<String, MetricRecord>, ParseError>;
}

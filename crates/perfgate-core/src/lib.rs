//! # Perfgate Core
//!
//! Shared data model and decision logic for the perfgate pipeline:
//! the normalized metric schema produced by format adapters, the
//! summary builder that merges adapter outputs into one tool-agnostic
//! view of a test run, and the budget evaluator that turns a summary
//! plus a declarative budget into per-metric checks and a verdict.
//!
//! ## Components
//!
//! - **MetricRecord**: the normalized unit of data from any tool
//! - **Summary**: derived latency/error/throughput statistics
//! - **Budget**: declarative ceilings and floors, loaded from JSON
//! - **Evaluator**: table-driven checks producing a Pass/Warn/Fail verdict

/// Declarative performance budgets and their configuration loader
pub mod budget;
/// Budget evaluator: summary vs. budget, per-dimension checks, verdict
pub mod evaluate;
/// Normalized metric schema shared by all format adapters
pub mod metric;
/// Summary builder merging per-tool metric mappings
pub mod summary;

pub use budget::{Budget, ConfigError, ResponseTimeBudget, ThroughputBudget};
pub use evaluate::{BudgetCheck, CheckStatus, Impact, Verdict, evaluate};
pub use metric::{MetricKind, MetricRecord};
pub use summary::{SourceMetrics, Summary};

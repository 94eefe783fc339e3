//! # Budget Evaluator
//!
//! Compares a normalized summary against a declarative budget and
//! produces one check per configured dimension — symmetric Pass/Fail
//! reporting, not fail-only — plus an overall verdict derived solely
//! from the check set.

use crate::budget::Budget;
use crate::summary::Summary;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a single budget check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckStatus {
    Pass,
    Fail,
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckStatus::Pass => write!(f, "PASS"),
            CheckStatus::Fail => write!(f, "FAIL"),
        }
    }
}

/// Severity classification of a budget check, used to compute the
/// verdict. A passing check always carries `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Impact {
    None,
    Medium,
    High,
    Critical,
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Impact::None => write!(f, "NONE"),
            Impact::Medium => write!(f, "MEDIUM"),
            Impact::High => write!(f, "HIGH"),
            Impact::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Overall outcome of one evaluation, consumed by report emitters and
/// the process exit-code mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Pass,
    Warn,
    Fail,
}

impl Verdict {
    /// Exit code for CLI callers: Pass → 0, Warn → 2, Fail → 1.
    pub fn exit_code(self) -> i32 {
        match self {
            Verdict::Pass => 0,
            Verdict::Warn => 2,
            Verdict::Fail => 1,
        }
    }

    /// Derive the verdict from a check set: Fail when any Critical- or
    /// High-impact check failed, Warn when only Medium-impact checks
    /// failed, Pass otherwise. Raw summary fields are never consulted.
    pub fn from_checks(checks: &[BudgetCheck]) -> Self {
        let mut verdict = Verdict::Pass;
        for check in checks.iter().filter(|c| c.status == CheckStatus::Fail) {
            match check.impact {
                Impact::Critical | Impact::High => return Verdict::Fail,
                Impact::Medium => verdict = Verdict::Warn,
                Impact::None => {}
            }
        }
        verdict
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Pass => write!(f, "PASS"),
            Verdict::Warn => write!(f, "WARN"),
            Verdict::Fail => write!(f, "FAIL"),
        }
    }
}

/// One evaluated budget dimension, with human-readable threshold and
/// actual-value descriptions for report rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetCheck {
    pub metric: String,
    pub budget: String,
    pub actual: String,
    pub status: CheckStatus,
    pub impact: Impact,
}

/// Budget dimensions, in their fixed evaluation and reporting order.
#[derive(Debug, Clone, Copy)]
enum Dimension {
    ResponseTimeP95,
    ResponseTimeP99,
    ErrorRate,
    Throughput,
}

/// Fail impact per dimension. Table-driven so the severity mapping
/// stays reviewable and testable apart from the comparison logic.
const CHECKS: [(Dimension, Impact); 4] = [
    (Dimension::ResponseTimeP95, Impact::High),
    (Dimension::ResponseTimeP99, Impact::Medium),
    (Dimension::ErrorRate, Impact::Critical),
    (Dimension::Throughput, Impact::High),
];

/// Evaluate a summary against a budget.
///
/// Produces exactly one check per configured dimension, in the fixed
/// order P95, P99, error rate, throughput, and the verdict derived from
/// that check set.
pub fn evaluate(summary: &Summary, budget: &Budget) -> (Vec<BudgetCheck>, Verdict) {
    let checks: Vec<BudgetCheck> = CHECKS
        .iter()
        .map(|&(dimension, fail_impact)| check_dimension(summary, budget, dimension, fail_impact))
        .collect();

    let verdict = Verdict::from_checks(&checks);
    tracing::debug!(%verdict, checks = checks.len(), "budget evaluation complete");
    (checks, verdict)
}

fn check_dimension(
    summary: &Summary,
    budget: &Budget,
    dimension: Dimension,
    fail_impact: Impact,
) -> BudgetCheck {
    // Strict comparisons: actual > ceiling fails, actual < floor fails.
    let (metric, budget_text, actual_text, passed) = match dimension {
        Dimension::ResponseTimeP95 => (
            "Response Time (P95)",
            format!("< {}ms", budget.response_time.p95),
            format!("{:.2}ms", summary.p95_ms),
            summary.p95_ms <= budget.response_time.p95,
        ),
        Dimension::ResponseTimeP99 => (
            "Response Time (P99)",
            format!("< {}ms", budget.response_time.p99),
            format!("{:.2}ms", summary.p99_ms),
            summary.p99_ms <= budget.response_time.p99,
        ),
        Dimension::ErrorRate => (
            "Error Rate",
            format!("< {}%", budget.error_rate),
            format!("{:.2}%", summary.error_rate_percent),
            summary.error_rate_percent <= budget.error_rate,
        ),
        Dimension::Throughput => (
            "Throughput",
            format!("> {} req/s", budget.throughput.min),
            format!("{:.2} req/s", summary.throughput_per_sec),
            summary.throughput_per_sec >= budget.throughput.min,
        ),
    };

    let (status, impact) = if passed {
        (CheckStatus::Pass, Impact::None)
    } else {
        (CheckStatus::Fail, fail_impact)
    };

    BudgetCheck {
        metric: metric.to_string(),
        budget: budget_text,
        actual: actual_text,
        status,
        impact,
    }
}

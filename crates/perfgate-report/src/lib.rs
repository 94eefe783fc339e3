//! # Perfgate Report Emitter
//!
//! Renders a summary plus its budget-check results into the formats
//! downstream tooling consumes: the budget-check JSON document, a
//! Markdown table for CI logs and pull requests, and the standalone
//! HTML pages.

/// HTML page rendering for summaries and budget reports
pub mod html;

use chrono::{DateTime, Utc};
use perfgate_core::{Budget, BudgetCheck, CheckStatus, Summary, Verdict};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub use html::summary_to_html;

/// Report generation errors
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Supported report formats
#[derive(Debug, Clone, Copy)]
pub enum ReportFormat {
    /// Pretty-printed budget-check JSON document
    Json,
    /// Markdown table for CI logs and PRs
    Markdown,
    /// Standalone HTML page
    Html,
}

/// Complete budget report: the evaluated checks, the budget they were
/// checked against, and the summary they were derived from.
///
/// The serialized shape matches the budget-check.json document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetReport {
    #[serde(rename = "timestamp")]
    pub generated_at: DateTime<Utc>,
    #[serde(rename = "overallStatus")]
    pub overall_status: Verdict,
    pub budgets: Budget,
    pub results: Vec<BudgetCheck>,
    pub summary: Summary,
}

/// Remediation hint for one failed budget dimension.
fn recommendation(metric: &str) -> &'static str {
    match metric {
        "Response Time (P95)" => {
            "Optimize slow database queries and implement caching strategies"
        }
        "Response Time (P99)" => "Review outlier requests and optimize worst-case scenarios",
        "Error Rate" => "Review error logs, implement circuit breakers and retry mechanisms",
        "Throughput" => "Scale infrastructure and optimize application bottlenecks",
        _ => "Review and optimize the failing metric",
    }
}

/// One remediation hint per failed check, in check order. Empty when
/// every check passed.
pub fn failure_recommendations(results: &[BudgetCheck]) -> Vec<&'static str> {
    results
        .iter()
        .filter(|result| result.status == CheckStatus::Fail)
        .map(|result| recommendation(&result.metric))
        .collect()
}

impl BudgetReport {
    /// Assemble a report from one evaluation's inputs and outputs.
    pub fn new(
        summary: Summary,
        budgets: Budget,
        results: Vec<BudgetCheck>,
        overall_status: Verdict,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            overall_status,
            budgets,
            results,
            summary,
        }
    }

    /// Remediation hints for this report's failed checks.
    pub fn recommendations(&self) -> Vec<&'static str> {
        failure_recommendations(&self.results)
    }

    /// Render the report in the given format and write it to `path`.
    pub fn save_to_file<P: AsRef<Path>>(
        &self,
        path: P,
        format: ReportFormat,
    ) -> Result<(), ReportError> {
        let content = match format {
            ReportFormat::Json => self.to_json()?,
            ReportFormat::Markdown => self.to_markdown()?,
            ReportFormat::Html => self.to_html()?,
        };

        fs::write(path, content)
            .map_err(|e| ReportError::Io(format!("Failed to write report file: {}", e)))?;

        Ok(())
    }

    /// Convert to the budget-check JSON document.
    pub fn to_json(&self) -> Result<String, ReportError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ReportError::Serialization(format!("JSON serialization failed: {}", e)))
    }

    /// Convert to Markdown format.
    pub fn to_markdown(&self) -> Result<String, ReportError> {
        let mut md = String::new();

        md.push_str("# Performance Budget Report\n\n");
        md.push_str(&format!(
            "**Generated:** {}\n",
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        md.push_str(&format!("**Overall Status:** {}\n\n", self.overall_status));

        md.push_str("## Budget Check Results\n\n");
        md.push_str("| Metric | Budget | Actual | Status | Impact |\n");
        md.push_str("|--------|--------|--------|--------|--------|\n");
        for result in &self.results {
            let icon = match result.status {
                CheckStatus::Pass => "✅",
                CheckStatus::Fail => "❌",
            };
            md.push_str(&format!(
                "| {} | {} | {} | {} {} | {} |\n",
                result.metric, result.budget, result.actual, icon, result.status, result.impact
            ));
        }

        let recommendations = self.recommendations();
        if !recommendations.is_empty() {
            md.push_str("\n## Recommendations\n\n");
            for item in &recommendations {
                md.push_str(&format!("- {}\n", item));
            }
        }

        md.push_str("\n## Configured Budgets\n\n");
        md.push_str("| Metric | Threshold |\n");
        md.push_str("|--------|-----------|\n");
        md.push_str(&format!(
            "| Response Time (P95) | < {}ms |\n",
            self.budgets.response_time.p95
        ));
        md.push_str(&format!(
            "| Response Time (P99) | < {}ms |\n",
            self.budgets.response_time.p99
        ));
        md.push_str(&format!("| Error Rate | < {}% |\n", self.budgets.error_rate));
        md.push_str(&format!(
            "| Minimum Throughput | > {} req/s |\n",
            self.budgets.throughput.min
        ));

        Ok(md)
    }

    /// Convert to a standalone HTML page.
    pub fn to_html(&self) -> Result<String, ReportError> {
        Ok(html::budget_report_to_html(self))
    }
}

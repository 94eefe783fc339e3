//! # Result Pipeline Commands
//!
//! The synchronous file-in/file-out wiring behind the CLI: read raw
//! result files, parse through the format adapters in precedence
//! order, build the summary, evaluate budgets, and emit reports.

use perfgate_adapters::{ParseError, SourceKind};
use perfgate_core::{
    Budget, BudgetCheck, CheckStatus, ConfigError, SourceMetrics, Summary, Verdict, evaluate,
};
use perfgate_report::{
    BudgetReport, ReportError, ReportFormat, failure_recommendations, summary_to_html,
};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const K6_RESULTS_FILE: &str = "k6-results.json";
pub const ARTILLERY_RESULTS_FILE: &str = "artillery-results.json";
pub const SUMMARY_FILE: &str = "summary.json";
pub const SUMMARY_HTML_FILE: &str = "report.html";
pub const BUDGET_CHECK_FILE: &str = "budget-check.json";
pub const BUDGET_HTML_FILE: &str = "budget-report.html";

/// Fatal pipeline failures. Per-source parse errors are not fatal and
/// never appear here: the affected source is dropped with a warning.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("no input found: {0}")]
    MissingInput(String),
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid summary document: {0}")]
    InvalidSummary(serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Report(#[from] ReportError),
}

/// Parse every input file that exists, in the supplied precedence
/// order.
///
/// A source whose file is missing contributes nothing; a source whose
/// file exists but does not parse is dropped with a warning so the
/// remaining sources still count. No input file at all is fatal.
pub fn collect_sources(
    inputs: &[(SourceKind, PathBuf)],
) -> Result<Vec<SourceMetrics>, PipelineError> {
    let existing: Vec<&(SourceKind, PathBuf)> =
        inputs.iter().filter(|(_, path)| path.exists()).collect();

    if existing.is_empty() {
        let expected: Vec<String> = inputs
            .iter()
            .map(|(_, path)| path.display().to_string())
            .collect();
        return Err(PipelineError::MissingInput(format!(
            "expected at least one of: {}",
            expected.join(", ")
        )));
    }

    let mut sources = Vec::new();
    for (kind, path) in existing {
        let raw = fs::read(path).map_err(|source| PipelineError::Io {
            path: path.clone(),
            source,
        })?;
        match kind.adapter().parse(&raw) {
            Ok(metrics) => {
                tracing::info!(
                    source = kind.label(),
                    metrics = metrics.len(),
                    "parsed result file"
                );
                sources.push(SourceMetrics {
                    source: kind.label().to_string(),
                    metrics,
                });
            }
            Err(ParseError::InvalidDocument(reason)) => {
                tracing::warn!(source = kind.label(), %reason, "dropping unparseable source");
            }
        }
    }

    Ok(sources)
}

/// `perfgate report`: aggregate raw tool results into summary.json.
pub fn run_report(
    reports_dir: &Path,
    k6_results: Option<&Path>,
    artillery_results: Option<&Path>,
    html: bool,
) -> Result<(), PipelineError> {
    fs::create_dir_all(reports_dir).map_err(|source| PipelineError::Io {
        path: reports_dir.to_path_buf(),
        source,
    })?;

    let inputs: Vec<(SourceKind, PathBuf)> = SourceKind::PRECEDENCE
        .iter()
        .map(|&kind| {
            let path = match kind {
                SourceKind::K6 => k6_results
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| reports_dir.join(K6_RESULTS_FILE)),
                SourceKind::Artillery => artillery_results
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| reports_dir.join(ARTILLERY_RESULTS_FILE)),
            };
            (kind, path)
        })
        .collect();

    let sources = collect_sources(&inputs)?;
    let summary = Summary::from_sources(sources);

    let summary_path = reports_dir.join(SUMMARY_FILE);
    let json = serde_json::to_string_pretty(&summary).map_err(PipelineError::InvalidSummary)?;
    fs::write(&summary_path, json).map_err(|source| PipelineError::Io {
        path: summary_path.clone(),
        source,
    })?;
    println!("📊 Summary written to {}", summary_path.display());

    if html {
        let html_path = reports_dir.join(SUMMARY_HTML_FILE);
        fs::write(&html_path, summary_to_html(&summary, None)).map_err(|source| PipelineError::Io {
            path: html_path.clone(),
            source,
        })?;
        println!("📄 HTML report written to {}", html_path.display());
    }

    Ok(())
}

/// `perfgate check`: evaluate summary.json against the budget and emit
/// the budget report. Returns the verdict for exit-code mapping.
pub fn run_check(
    reports_dir: &Path,
    budget_path: Option<&Path>,
    html: bool,
) -> Result<Verdict, PipelineError> {
    let summary_path = reports_dir.join(SUMMARY_FILE);
    if !summary_path.exists() {
        return Err(PipelineError::MissingInput(format!(
            "{} (run `perfgate report` first)",
            summary_path.display()
        )));
    }

    let raw = fs::read(&summary_path).map_err(|source| PipelineError::Io {
        path: summary_path.clone(),
        source,
    })?;
    let summary: Summary = serde_json::from_slice(&raw).map_err(PipelineError::InvalidSummary)?;

    let budget = match budget_path {
        Some(path) => Budget::from_path(path)?,
        None => Budget::default(),
    };

    let (results, verdict) = evaluate(&summary, &budget);
    print_results(&results, verdict);

    let report = BudgetReport::new(summary, budget, results, verdict);
    report.save_to_file(reports_dir.join(BUDGET_CHECK_FILE), ReportFormat::Json)?;
    if html {
        report.save_to_file(reports_dir.join(BUDGET_HTML_FILE), ReportFormat::Html)?;
        // The summary page now has an outcome to show; re-render it
        // with the verdict badge.
        let html_path = reports_dir.join(SUMMARY_HTML_FILE);
        fs::write(&html_path, summary_to_html(&report.summary, Some(verdict))).map_err(
            |source| PipelineError::Io {
                path: html_path.clone(),
                source,
            },
        )?;
    }

    Ok(verdict)
}

fn print_results(results: &[BudgetCheck], verdict: Verdict) {
    println!("\n📊 Performance Budget Results:");
    println!("{}", "═".repeat(60));

    for result in results {
        let icon = if result.status == CheckStatus::Pass {
            "✅"
        } else {
            "❌"
        };
        println!("{} {}", icon, result.metric);
        println!("   Budget: {}", result.budget);
        println!("   Actual: {}", result.actual);
        println!("   Impact: {}", result.impact);
        println!();
    }

    println!("{}", "═".repeat(60));
    let badge = match verdict {
        Verdict::Pass => "✅ PASS",
        Verdict::Warn => "⚠️  WARN",
        Verdict::Fail => "❌ FAIL",
    };
    println!("Overall Status: {}", badge);

    let recommendations = failure_recommendations(results);
    if !recommendations.is_empty() {
        println!("\n💡 Recommendations:");
        for item in recommendations {
            println!("   • {}", item);
        }
    }
}

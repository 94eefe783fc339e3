//! # Pipeline Integration Tests
//!
//! End-to-end runs of the report and check commands against real files
//! in a temporary reports directory, covering both input formats, the
//! source precedence, and the budget verdicts.

use perfgate_cli::pipeline::{
    self, ARTILLERY_RESULTS_FILE, BUDGET_CHECK_FILE, BUDGET_HTML_FILE, K6_RESULTS_FILE,
    PipelineError, SUMMARY_FILE, SUMMARY_HTML_FILE,
};
use perfgate_core::Verdict;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const K6_STREAM: &str = r#"
{"type":"Metric","data":{"name":"http_req_duration","type":"trend"},"metric":"http_req_duration"}
{"type":"Point","metric":"http_req_duration","data":{"avg":230.11,"p(95)":450.25,"p(99)":901.4}}
{"type":"Metric","data":{"name":"http_req_failed","type":"rate"},"metric":"http_req_failed"}
{"type":"Point","metric":"http_req_failed","data":{"rate":0.003}}
{"type":"Metric","data":{"name":"http_reqs","type":"counter"},"metric":"http_reqs"}
{"type":"Point","metric":"http_reqs","data":{"count":7200,"rate":120.0}}
"#;

const ARTILLERY_DOCUMENT: &str = r#"{
    "aggregate": {
        "counters": { "http.requests": 5400 },
        "rates": { "http.request_rate": 90 },
        "summaries": {
            "http.response_time": { "mean": 310.5, "p95": 620.75, "p99": 1180.2 },
            "http.request_failure_rate": { "rate": 0.02 }
        }
    }
}"#;

fn write_k6(dir: &Path) {
    fs::write(dir.join(K6_RESULTS_FILE), K6_STREAM).unwrap();
}

fn write_artillery(dir: &Path) {
    fs::write(dir.join(ARTILLERY_RESULTS_FILE), ARTILLERY_DOCUMENT).unwrap();
}

fn read_summary_json(dir: &Path) -> serde_json::Value {
    let raw = fs::read_to_string(dir.join(SUMMARY_FILE)).unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn test_report_from_k6_stream() {
    let dir = TempDir::new().unwrap();
    write_k6(dir.path());

    pipeline::run_report(dir.path(), None, None, false).unwrap();

    let summary = read_summary_json(dir.path());
    assert_eq!(summary["avgResponseTime"], 230.11);
    assert_eq!(summary["p95"], 450.25);
    assert_eq!(summary["p99"], 901.4);
    assert!((summary["errorRate"].as_f64().unwrap() - 0.3).abs() < 1e-9);
    assert_eq!(summary["throughput"], 120.0);
    assert_eq!(summary["sources"][0]["source"], "k6");
}

#[test]
fn test_report_from_artillery_document() {
    let dir = TempDir::new().unwrap();
    write_artillery(dir.path());

    pipeline::run_report(dir.path(), None, None, false).unwrap();

    let summary = read_summary_json(dir.path());
    assert_eq!(summary["avgResponseTime"], 310.5);
    assert_eq!(summary["p95"], 620.75);
    assert_eq!(summary["p99"], 1180.2);
    assert!((summary["errorRate"].as_f64().unwrap() - 2.0).abs() < 1e-9);
    assert_eq!(summary["throughput"], 90.0);
}

#[test]
fn test_k6_takes_precedence_when_both_present() {
    let dir = TempDir::new().unwrap();
    write_k6(dir.path());
    write_artillery(dir.path());

    pipeline::run_report(dir.path(), None, None, false).unwrap();

    let summary = read_summary_json(dir.path());
    assert_eq!(summary["p95"], 450.25);
    assert_eq!(summary["sources"].as_array().unwrap().len(), 2);
}

#[test]
fn test_report_with_explicit_input_paths() {
    let inputs = TempDir::new().unwrap();
    let reports = TempDir::new().unwrap();
    let k6_path = inputs.path().join("run-42.ndjson");
    fs::write(&k6_path, K6_STREAM).unwrap();

    pipeline::run_report(reports.path(), Some(&k6_path), None, false).unwrap();

    let summary = read_summary_json(reports.path());
    assert_eq!(summary["throughput"], 120.0);
}

#[test]
fn test_report_without_inputs_fails() {
    let dir = TempDir::new().unwrap();
    let result = pipeline::run_report(dir.path(), None, None, false);
    assert!(matches!(result, Err(PipelineError::MissingInput(_))));
    assert!(!dir.path().join(SUMMARY_FILE).exists());
}

#[test]
fn test_report_renders_html_when_requested() {
    let dir = TempDir::new().unwrap();
    write_k6(dir.path());

    pipeline::run_report(dir.path(), None, None, true).unwrap();

    let page = fs::read_to_string(dir.path().join(SUMMARY_HTML_FILE)).unwrap();
    assert!(page.contains("<!DOCTYPE html>"));
    assert!(page.contains("230.11ms"));
}

#[test]
fn test_check_passes_default_budget() {
    let dir = TempDir::new().unwrap();
    write_k6(dir.path());
    pipeline::run_report(dir.path(), None, None, false).unwrap();

    let verdict = pipeline::run_check(dir.path(), None, false).unwrap();
    assert_eq!(verdict, Verdict::Pass);
    assert_eq!(verdict.exit_code(), 0);

    let raw = fs::read_to_string(dir.path().join(BUDGET_CHECK_FILE)).unwrap();
    let report: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(report["overallStatus"], "PASS");
    assert_eq!(report["results"].as_array().unwrap().len(), 4);
    assert_eq!(report["summary"]["p95"], 450.25);
}

#[test]
fn test_check_fails_tight_budget() {
    let dir = TempDir::new().unwrap();
    write_k6(dir.path());
    pipeline::run_report(dir.path(), None, None, false).unwrap();

    let budget_path = dir.path().join("budget.json");
    fs::write(
        &budget_path,
        r#"{
            "responseTime": { "p95": 200, "p99": 400 },
            "errorRate": 1,
            "throughput": { "min": 50 }
        }"#,
    )
    .unwrap();

    let verdict = pipeline::run_check(dir.path(), Some(&budget_path), false).unwrap();
    assert_eq!(verdict, Verdict::Fail);
    assert_eq!(verdict.exit_code(), 1);

    let raw = fs::read_to_string(dir.path().join(BUDGET_CHECK_FILE)).unwrap();
    let report: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(report["overallStatus"], "FAIL");
    assert_eq!(report["results"][0]["status"], "FAIL");
    assert_eq!(report["results"][0]["impact"], "HIGH");
}

#[test]
fn test_check_warns_on_p99_only_breach() {
    let dir = TempDir::new().unwrap();
    write_k6(dir.path());
    pipeline::run_report(dir.path(), None, None, false).unwrap();

    // p99 actual is 901.4ms: over a 900ms budget while everything else
    // stays within range.
    let budget_path = dir.path().join("budget.json");
    fs::write(
        &budget_path,
        r#"{
            "responseTime": { "p95": 800, "p99": 900 },
            "errorRate": 1,
            "throughput": { "min": 50 }
        }"#,
    )
    .unwrap();

    let verdict = pipeline::run_check(dir.path(), Some(&budget_path), false).unwrap();
    assert_eq!(verdict, Verdict::Warn);
    assert_eq!(verdict.exit_code(), 2);
}

#[test]
fn test_check_renders_html_when_requested() {
    let dir = TempDir::new().unwrap();
    write_k6(dir.path());
    pipeline::run_report(dir.path(), None, None, false).unwrap();

    pipeline::run_check(dir.path(), None, true).unwrap();

    let page = fs::read_to_string(dir.path().join(BUDGET_HTML_FILE)).unwrap();
    assert!(page.contains("status-pass"));
    assert!(page.contains("Response Time (P95)"));

    // The summary page is re-rendered with the verdict badge.
    let summary_page = fs::read_to_string(dir.path().join(SUMMARY_HTML_FILE)).unwrap();
    assert!(summary_page.contains("status-badge status-pass"));
}

#[test]
fn test_failing_check_reports_recommendations() {
    let dir = TempDir::new().unwrap();
    write_k6(dir.path());
    pipeline::run_report(dir.path(), None, None, false).unwrap();

    let budget_path = dir.path().join("budget.json");
    fs::write(
        &budget_path,
        r#"{
            "responseTime": { "p95": 200, "p99": 400 },
            "errorRate": 1,
            "throughput": { "min": 50 }
        }"#,
    )
    .unwrap();

    let verdict = pipeline::run_check(dir.path(), Some(&budget_path), true).unwrap();
    assert_eq!(verdict, Verdict::Fail);

    let page = fs::read_to_string(dir.path().join(BUDGET_HTML_FILE)).unwrap();
    assert!(page.contains("💡 Recommendations"));
    assert!(page.contains("Optimize slow database queries"));
    assert!(page.contains("Review outlier requests"));

    let summary_page = fs::read_to_string(dir.path().join(SUMMARY_HTML_FILE)).unwrap();
    assert!(summary_page.contains("status-badge status-fail"));
}

#[test]
fn test_check_rejects_invalid_budget_file() {
    let dir = TempDir::new().unwrap();
    write_k6(dir.path());
    pipeline::run_report(dir.path(), None, None, false).unwrap();

    let budget_path = dir.path().join("budget.json");
    fs::write(&budget_path, "{ not json").unwrap();

    let result = pipeline::run_check(dir.path(), Some(&budget_path), false);
    assert!(matches!(result, Err(PipelineError::Config(_))));
}

#[test]
fn test_check_rejects_corrupt_summary() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(SUMMARY_FILE), "{ truncated").unwrap();

    let result = pipeline::run_check(dir.path(), None, false);
    assert!(matches!(result, Err(PipelineError::InvalidSummary(_))));
}

//! HTML page rendering.
//!
//! Standalone pages for the run summary and the budget report, styled
//! after the original report tooling. All tool-controlled strings
//! (metric names, source labels) are escaped before interpolation.

use html_escape::encode_text;
use perfgate_core::{CheckStatus, Summary, Verdict};

use crate::BudgetReport;

const PAGE_STYLE: &str = r#"
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Arial, sans-serif; margin: 0; padding: 20px; background: #f5f5f5; }
        .container { max-width: 1000px; margin: 0 auto; background: white; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
        .header { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 30px; border-radius: 8px 8px 0 0; }
        .content { padding: 30px; }
        .status-badge { display: inline-block; padding: 8px 16px; border-radius: 20px; font-weight: bold; }
        .status-pass { background: #d4edda; color: #155724; }
        .status-warn { background: #fff3cd; color: #856404; }
        .status-fail { background: #f8d7da; color: #721c24; }
        .metric-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 20px; margin: 20px 0; }
        .metric-card { background: #f8f9fa; border-radius: 8px; padding: 20px; border-left: 4px solid #007acc; }
        .metric-value { font-size: 2em; font-weight: bold; color: #333; }
        .metric-label { color: #666; font-size: 0.9em; margin-top: 5px; }
        table { width: 100%; border-collapse: collapse; margin: 20px 0; }
        th, td { padding: 12px; text-align: left; border-bottom: 1px solid #ddd; }
        th { background: #f2f2f2; font-weight: 600; }
        .metric-pass { background: #d4edda; }
        .metric-fail { background: #f8d7da; }
        .impact-critical { color: #dc3545; font-weight: bold; }
        .impact-high { color: #fd7e14; font-weight: bold; }
        .impact-medium { color: #ffc107; font-weight: bold; }
        .impact-none { color: #28a745; }
        .recommendations { background: #e7f3ff; border-left: 4px solid #007acc; padding: 15px; margin: 20px 0; }
        .timestamp { color: #666; font-size: 0.9em; }
"#;

fn page(title: &str, header: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{PAGE_STYLE}</style>
</head>
<body>
    <div class="container">
        <div class="header">{header}</div>
        <div class="content">{content}</div>
    </div>
</body>
</html>
"#
    )
}

/// Render the run summary as a standalone page: the five key metrics as
/// cards plus a raw-metric table per source.
///
/// The header carries a status badge when a verdict is supplied. At
/// aggregation time no budget evaluation has run yet, so the page is
/// first written without one; the check command re-renders it with the
/// verdict it computed.
pub fn summary_to_html(summary: &Summary, verdict: Option<Verdict>) -> String {
    let mut content = String::new();

    content.push_str("<h2>Key Metrics</h2>\n<div class=\"metric-grid\">\n");
    for (value, label) in [
        (
            format!("{:.2}ms", summary.avg_response_time_ms),
            "Average Response Time",
        ),
        (format!("{:.2}ms", summary.p95_ms), "95th Percentile"),
        (format!("{:.2}ms", summary.p99_ms), "99th Percentile"),
        (format!("{:.2}%", summary.error_rate_percent), "Error Rate"),
        (
            format!("{:.2}", summary.throughput_per_sec),
            "Requests per Second",
        ),
    ] {
        content.push_str(&format!(
            "<div class=\"metric-card\"><div class=\"metric-value\">{value}</div><div class=\"metric-label\">{label}</div></div>\n"
        ));
    }
    content.push_str("</div>\n");

    for source in &summary.sources {
        content.push_str(&format!(
            "<h2>{} Results</h2>\n<table>\n<tr><th>Metric</th><th>Values</th></tr>\n",
            encode_text(&source.source)
        ));
        let mut names: Vec<&String> = source.metrics.keys().collect();
        names.sort();
        for name in names {
            let record = &source.metrics[name];
            let mut labels: Vec<&String> = record.values.keys().collect();
            labels.sort();
            let rendered: Vec<String> = labels
                .iter()
                .map(|label| format!("{}={}", encode_text(label), record.values[*label]))
                .collect();
            content.push_str(&format!(
                "<tr><td>{}</td><td>{}</td></tr>\n",
                encode_text(name),
                rendered.join(", ")
            ));
        }
        content.push_str("</table>\n");
    }

    let badge = match verdict {
        Some(verdict) => format!(
            "\n<span class=\"status-badge status-{}\">{}</span>",
            verdict.to_string().to_lowercase(),
            verdict
        ),
        None => String::new(),
    };
    let header = format!(
        "<h1>🚀 Performance Test Report</h1>\n<p class=\"timestamp\">Generated: {}</p>{}",
        summary.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
        badge
    );
    page("Performance Test Report", &header, &content)
}

/// Render the budget report as a standalone page.
pub fn budget_report_to_html(report: &BudgetReport) -> String {
    let status_class = report.overall_status.to_string().to_lowercase();
    let header = format!(
        "<h1>📊 Performance Budget Report</h1>\n<p class=\"timestamp\">Generated: {}</p>\n<span class=\"status-badge status-{}\">{}</span>",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        status_class,
        report.overall_status,
    );

    let mut content = String::new();
    content.push_str("<h2>Budget Check Results</h2>\n<table>\n<thead><tr><th>Metric</th><th>Budget</th><th>Actual</th><th>Status</th><th>Impact</th></tr></thead>\n<tbody>\n");
    for result in &report.results {
        let row_class = match result.status {
            CheckStatus::Pass => "metric-pass",
            CheckStatus::Fail => "metric-fail",
        };
        let impact_class = result.impact.to_string().to_lowercase();
        content.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td><strong>{}</strong></td><td class=\"impact-{}\">{}</td></tr>\n",
            row_class,
            encode_text(&result.metric),
            encode_text(&result.budget),
            encode_text(&result.actual),
            result.status,
            impact_class,
            result.impact,
        ));
    }
    content.push_str("</tbody>\n</table>\n");

    let recommendations = report.recommendations();
    if !recommendations.is_empty() {
        content.push_str("<div class=\"recommendations\">\n<h3>💡 Recommendations</h3>\n<ul>\n");
        for item in recommendations {
            content.push_str(&format!("<li>{}</li>\n", item));
        }
        content.push_str("</ul>\n</div>\n");
    }

    content.push_str("<h2>Performance Budgets Configuration</h2>\n<table>\n<tr><th>Metric</th><th>Threshold</th></tr>\n");
    content.push_str(&format!(
        "<tr><td>Response Time (P95)</td><td>&lt; {}ms</td></tr>\n",
        report.budgets.response_time.p95
    ));
    content.push_str(&format!(
        "<tr><td>Response Time (P99)</td><td>&lt; {}ms</td></tr>\n",
        report.budgets.response_time.p99
    ));
    content.push_str(&format!(
        "<tr><td>Error Rate</td><td>&lt; {}%</td></tr>\n",
        report.budgets.error_rate
    ));
    content.push_str(&format!(
        "<tr><td>Minimum Throughput</td><td>&gt; {} req/s</td></tr>\n",
        report.budgets.throughput.min
    ));
    content.push_str("</table>\n");

    page("Performance Budget Report", &header, &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use perfgate_core::{MetricKind, MetricRecord, SourceMetrics};
    use std::collections::HashMap;

    #[test]
    fn test_summary_page_shows_metric_cards() {
        let summary = Summary {
            avg_response_time_ms: 230.11,
            p95_ms: 450.25,
            throughput_per_sec: 120.0,
            ..Summary::default()
        };
        let page = summary_to_html(&summary, None);

        assert!(page.contains("230.11ms"));
        assert!(page.contains("450.25ms"));
        assert!(page.contains("Requests per Second"));
        assert!(!page.contains("status-badge"));
    }

    #[test]
    fn test_summary_page_shows_badge_when_verdict_supplied() {
        let summary = Summary::default();

        let page = summary_to_html(&summary, Some(Verdict::Pass));
        assert!(page.contains("status-badge status-pass"));
        assert!(page.contains(">PASS</span>"));

        let page = summary_to_html(&summary, Some(Verdict::Fail));
        assert!(page.contains("status-badge status-fail"));
    }

    #[test]
    fn test_summary_page_escapes_source_content() {
        let mut metrics = HashMap::new();
        metrics.insert(
            "lat<b>".to_string(),
            MetricRecord::single("lat<b>", MetricKind::Distribution, "avg", 1.0),
        );
        let summary = Summary {
            sources: vec![SourceMetrics {
                source: "k6 & friends".to_string(),
                metrics,
            }],
            ..Summary::default()
        };
        let page = summary_to_html(&summary, None);

        assert!(page.contains("k6 &amp; friends"));
        assert!(page.contains("lat&lt;b&gt;"));
        assert!(!page.contains("lat<b>"));
    }
}

//! HTMLサマリーレポート
//!
//! 集計カード、ステータスフィルタ、URLごとのカードを1ファイルに出力する。

use crate::error::Result;
use mpn_verify_common::{BatchSummary, MatchingType, ResultRecord};
use std::fmt::Write as _;
use std::path::Path;

const STYLE: &str = r#"
body { font-family: Arial, sans-serif; margin: 20px; background-color: #f5f5f5; }
.report-container { max-width: 1200px; margin: 0 auto; }
.summary-section, .result-card { background: white; border-radius: 8px; padding: 20px; margin-bottom: 20px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
.summary-stats { display: grid; grid-template-columns: repeat(5, 1fr); gap: 20px; margin-top: 15px; }
.stat-card { background: #f8f9fa; padding: 15px; border-radius: 6px; text-align: center; }
.stat-number { font-size: 24px; font-weight: bold; margin: 10px 0; }
.generated { color: #888; font-size: 12px; }
.filters { margin: 20px 0; display: flex; gap: 15px; align-items: center; }
.filter-select { padding: 8px; border-radius: 4px; border: 1px solid #ddd; }
.result-header { display: flex; justify-content: space-between; align-items: center; margin-bottom: 15px; }
.status-badge { padding: 5px 10px; border-radius: 4px; font-weight: bold; color: white; }
.status-hit { background-color: #4CAF50; }
.status-miss { background-color: #f44336; }
.status-error { background-color: #ff9800; }
.status-no-mpn-found { background-color: #2A254B; }
.result-details { display: grid; grid-template-columns: 120px 1fr; gap: 10px; margin-bottom: 20px; }
.label { font-weight: bold; color: #666; }
.value { word-break: break-all; }
.value a { color: #2196F3; text-decoration: none; }
.artifacts { display: flex; gap: 20px; }
"#;

const SCRIPT: &str = r#"
document.getElementById('statusFilter').addEventListener('change', function () {
  var selected = this.value;
  document.querySelectorAll('.result-card').forEach(function (card) {
    var match = selected === 'all' || card.getAttribute('data-status') === selected;
    card.style.display = match ? 'block' : 'none';
  });
});
"#;

/// HTML特殊文字のエスケープ
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() {
        placeholder
    } else {
        value
    }
}

fn summary_label(matching_type: MatchingType) -> &'static str {
    match matching_type {
        MatchingType::Hit => "Hits",
        MatchingType::Miss => "Misses",
        MatchingType::NoMpnFound => "No MPN's Found",
        MatchingType::Error => "Errors",
    }
}

fn render_summary(html: &mut String, summary: &BatchSummary) {
    html.push_str("<div class=\"summary-stats\">");
    let _ = write!(
        html,
        "<div class=\"stat-card\"><div>Total URLs</div><div class=\"stat-number\">{}</div></div>",
        summary.total
    );
    for matching_type in MatchingType::ALL {
        let _ = write!(
            html,
            "<div class=\"stat-card\"><div>{}</div><div class=\"stat-number\">{}</div></div>",
            summary_label(matching_type),
            summary.count(matching_type)
        );
    }
    html.push_str("</div>");
}

fn render_filter(html: &mut String) {
    html.push_str("<div class=\"filters\"><label for=\"statusFilter\">Filter by Status:</label>");
    html.push_str("<select id=\"statusFilter\" class=\"filter-select\"><option value=\"all\">All</option>");
    for matching_type in MatchingType::ALL {
        let _ = write!(
            html,
            "<option value=\"{}\">{}</option>",
            matching_type.slug(),
            summary_label(matching_type)
        );
    }
    html.push_str("</select></div>");
}

fn render_record(html: &mut String, index: usize, record: &ResultRecord) {
    let slug = record.matching_type.slug();
    let url = escape_html(&record.url);

    let _ = write!(
        html,
        "<div class=\"result-card\" data-status=\"{slug}\">\
         <div class=\"result-header\"><h2>URL #{}</h2>\
         <span class=\"status-badge status-{slug}\">{}</span></div>",
        index + 1,
        record.matching_type,
    );

    let _ = write!(
        html,
        "<div class=\"result-details\">\
         <div class=\"label\">URL:</div><div class=\"value\"><a href=\"{url}\" target=\"_blank\">{url}</a></div>\
         <div class=\"label\">MPN:</div><div class=\"value\">{}</div>\
         <div class=\"label\">ExcelMPN:</div><div class=\"value\">{}</div>\
         <div class=\"label\">MatchStatus:</div><div class=\"value\">{}</div>\
         <div class=\"label\">FLIX360MPNs:</div><div class=\"value\">{}</div>\
         <div class=\"label\">Language:</div><div class=\"value\">{}</div>\
         <div class=\"label\">Details:</div><div class=\"value\">{}</div>\
         </div>",
        escape_html(or_placeholder(&record.extracted_mpn, "N/A")),
        escape_html(or_placeholder(&record.expected_mpn, "N/A")),
        escape_html(or_placeholder(record.match_status.as_str(), "N/A")),
        escape_html(or_placeholder(&record.candidate_list, "None found")),
        escape_html(or_placeholder(&record.language, "N/A")),
        escape_html(or_placeholder(&record.details, "N/A")),
    );

    if !record.screenshot_paths.is_empty() {
        html.push_str("<div class=\"artifacts\">");
        let labels = ["Initial page", "Final page"];
        for (i, path) in record.screenshot_paths.iter().enumerate() {
            let label = labels.get(i).copied().unwrap_or("Artifact");
            let path = escape_html(path);
            let _ = write!(html, "<a href=\"{path}\" target=\"_blank\">{label}</a>");
        }
        html.push_str("</div>");
    }

    html.push_str("</div>");
}

/// レポートHTMLを文字列で生成
pub fn render_report(records: &[ResultRecord], generated_at: &str) -> String {
    let summary = BatchSummary::from_records(records);
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    html.push_str("<title>Flix Media Automation Report</title>\n<style>");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n<div class=\"report-container\">");

    html.push_str("<div class=\"summary-section\"><h1>Test Results Report</h1>");
    let _ = write!(
        html,
        "<div class=\"generated\">Generated {}</div>",
        escape_html(generated_at)
    );
    render_summary(&mut html, &summary);
    html.push_str("</div>");

    render_filter(&mut html);

    html.push_str("<div id=\"results-container\">");
    for (index, record) in records.iter().enumerate() {
        render_record(&mut html, index, record);
    }
    html.push_str("</div>\n</div>\n<script>");
    html.push_str(SCRIPT);
    html.push_str("</script>\n</body>\n</html>\n");

    html
}

/// レポートを書き出す
pub fn write_report(records: &[ResultRecord], output_path: &Path) -> Result<()> {
    let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let html = render_report(records, &generated_at);
    std::fs::write(output_path, html)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_or_placeholder() {
        assert_eq!(or_placeholder("", "N/A"), "N/A");
        assert_eq!(or_placeholder("x", "N/A"), "x");
    }
}

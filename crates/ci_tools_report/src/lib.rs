//! Static HTML report generation from the cross-platform test pivot.

use ci_tools::{ReportData, TestStatus};
use std::io::Write;
use std::path::Path;

const LEGEND: &str = "<strong>Legend:</strong> \u{2705} = Pass, \u{274c} = Fail, \u{26a0}\u{fe0f} = Skipped, \u{1f6ab} = Missing";

/// Render a static HTML report to `out_path`. Embeds the pivot JSON for tooling.
pub fn render_report(data: &ReportData, out_path: impl AsRef<Path>) -> Result<(), ReportError> {
    let html = build_html(data)?;
    let mut f = std::fs::File::create(out_path.as_ref()).map_err(ReportError::Io)?;
    f.write_all(html.as_bytes()).map_err(ReportError::Io)?;
    Ok(())
}

/// Build HTML string from report data (for testing or in-memory use).
pub fn build_html(data: &ReportData) -> Result<String, ReportError> {
    let json_embed = serde_json::to_string(&data.pivot).map_err(ReportError::Json)?;
    let title = escape_html(&data.title);

    let html = format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body {{ font-family: sans-serif; padding: 2em; }}
table {{ border-collapse: collapse; width: 100%; }}
th {{ border: 1px solid #ccc; padding: 6px 12px; background-color: #f8f8f8; text-align: center; }}
td {{ border: 1px solid #ccc; padding: 6px 12px; }}
th:nth-child(1), th:nth-child(2), th:nth-child(3),
td:nth-child(1), td:nth-child(2), td:nth-child(3) {{ text-align: left; }}
th:nth-child(n+4), td:nth-child(n+4) {{ text-align: center; }}
.legend {{ margin: 1em 0; }}
.footer {{ margin-top: 2em; font-size: 0.85em; color: #666; }}
</style>
</head>
<body>
<h1>{title}</h1>
<div class="legend">{legend}</div>
{table}
<p class="footer">Generated: {created}</p>
<script type="application/json" id="report-data">{json_embed}</script>
</body>
</html>
"#,
        legend = LEGEND,
        table = build_table(data),
        created = escape_html(&data.created_utc_rfc3339),
        json_embed = escape_json_in_html(&json_embed),
    );
    Ok(html)
}

fn build_table(data: &ReportData) -> String {
    let pivot = &data.pivot;
    let mut out = String::from("<table>\n<thead>\n<tr><th>S.No</th><th>classname</th><th>testcase</th>");
    for platform in &pivot.platforms {
        out.push_str(&format!("<th>{}</th>", escape_html(platform)));
    }
    out.push_str("</tr>\n</thead>\n<tbody>\n");
    for row in &pivot.rows {
        out.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td>",
            row.serial,
            escape_html(&row.classname),
            escape_html(&row.testcase)
        ));
        for platform in &pivot.platforms {
            let status: TestStatus = row.status(platform);
            out.push_str(&format!(
                "<td title=\"{}\">{}</td>",
                status.as_str(),
                status.glyph()
            ));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>");
    out
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Inside `<script>` only `</` can end the element early.
fn escape_json_in_html(s: &str) -> String {
    s.replace("</", "<\\/")
}

#[derive(Debug)]
pub enum ReportError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::Io(e) => write!(f, "io: {e}"),
            ReportError::Json(e) => write!(f, "json: {e}"),
        }
    }
}

impl std::error::Error for ReportError {}

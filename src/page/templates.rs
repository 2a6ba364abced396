//! HTML assembly for the document view page.

use crate::highlight::Highlight;
use crate::page::{StatusBadge, StatusIcon, StatusRegion};

/// Badge markup for the `document-status` element.
pub fn status_badge(badge: StatusBadge) -> String {
    let (class, label) = match badge {
        StatusBadge::Pending => ("bg-secondary", "Pending"),
        StatusBadge::Processing => ("bg-warning", "Processing"),
        StatusBadge::Processed => ("bg-success", "Processed"),
        StatusBadge::Failed => ("bg-danger", "Failed"),
        StatusBadge::Error => ("bg-danger", "Error"),
    };
    format!(r#"<span class="badge {}">{}</span>"#, class, label)
}

/// Class attribute value for the `status-icon` element.
pub fn status_icon_class(icon: StatusIcon) -> &'static str {
    match icon {
        StatusIcon::Pending => "status-icon status-pending",
        StatusIcon::Processing => "status-icon status-processing",
        StatusIcon::Completed => "status-icon status-completed",
        StatusIcon::Failed => "status-icon status-failed",
    }
}

/// The processing-info panel, hidden with `d-none` until revealed.
pub fn processing_info(region: &StatusRegion) -> String {
    let hidden = if region.info_visible { "" } else { " d-none" };
    let body = match &region.error {
        Some(error) => format!(
            r#"<div class="alert alert-danger">
                <h6>Processing Error</h6>
                <p>{}</p>
            </div>"#,
            html_escape(error)
        ),
        None => {
            r#"<p>The document is being analyzed. This page updates automatically.</p>"#.to_string()
        }
    };
    format!(
        r#"<div id="processing-info" class="processing-info{}">{}</div>"#,
        hidden, body
    )
}

/// Render the full status section.
pub fn status_section(region: &StatusRegion) -> String {
    format!(
        r#"
    <section class="status-panel">
        <span id="status-icon" class="{}"></span>
        <span id="document-status">{}</span>
        {}
    </section>
    "#,
        status_icon_class(region.icon),
        status_badge(region.badge),
        processing_info(region)
    )
}

/// A single highlight wrapper around `body` (the raw span text).
///
/// Carries the severity as a style class, the description as a tooltip,
/// and the anomaly id as the scroll target tag. `flash` adds the temporary
/// emphasis class.
pub fn highlight_span(highlight: &Highlight, body: &str, flash: bool) -> String {
    let flash_class = if flash { " flash" } else { "" };
    format!(
        r#"<span class="anomaly-highlight {}{}" id="anomaly-{}" data-anomaly-id="{}" data-bs-toggle="tooltip" title="{}">{}</span>"#,
        highlight.severity.as_str(),
        flash_class,
        highlight.anomaly_id,
        highlight.anomaly_id,
        html_escape(&highlight.description),
        html_escape(body)
    )
}

/// Render the document content section.
pub fn content_section(markup: &str) -> String {
    format!(
        r#"
    <section class="document-pane">
        <div id="document-content" class="document-content">{}</div>
    </section>
    "#,
        markup
    )
}

/// Base HTML template with inline styles.
pub fn base_template(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Anomaly Review</title>
    <style>{}</style>
</head>
<body>
    <header id="main-header">
        <nav>
            <span class="logo">Anomaly Review</span>
        </nav>
    </header>
    <main>
        <h1>{}</h1>
        {}
    </main>
</body>
</html>"#,
        html_escape(title),
        CSS,
        html_escape(title),
        content
    )
}

pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Styles for the rendered page - minimal text-based design.
pub const CSS: &str = r#"
:root {
    --bg: #fff;
    --text: #222;
    --text-muted: #666;
    --low: #fff3cd;
    --medium: #ffe0b2;
    --high: #f8d7da;
}

body {
    background: var(--bg);
    color: var(--text);
    font-family: system-ui, sans-serif;
    margin: 0;
}

#main-header nav {
    padding: 8px 16px;
    border-bottom: 1px solid #ddd;
}

main {
    max-width: 60rem;
    margin: 0 auto;
    padding: 16px;
}

.badge {
    display: inline-block;
    padding: 2px 8px;
    border-radius: 3px;
    color: #fff;
    font-size: 0.85em;
}

.bg-secondary { background: #6c757d; }
.bg-warning { background: #b8860b; }
.bg-success { background: #2e7d32; }
.bg-danger { background: #b02a37; }

.status-icon {
    display: inline-block;
    width: 12px;
    height: 12px;
    border-radius: 50%;
    vertical-align: middle;
}

.status-pending { background: #6c757d; }
.status-processing { background: #b8860b; }
.status-completed { background: #2e7d32; }
.status-failed { background: #b02a37; }

.d-none { display: none; }

.processing-info {
    margin-top: 8px;
    color: var(--text-muted);
}

.alert-danger {
    border: 1px solid #b02a37;
    border-radius: 3px;
    padding: 8px 12px;
    color: #b02a37;
}

.document-content {
    white-space: pre-wrap;
    font-family: ui-monospace, monospace;
    line-height: 1.5;
    border: 1px solid #ddd;
    border-radius: 3px;
    padding: 12px;
}

.anomaly-highlight {
    cursor: help;
    border-radius: 2px;
}

.anomaly-highlight.low { background: var(--low); }
.anomaly-highlight.medium { background: var(--medium); }
.anomaly-highlight.high { background: var(--high); }

.anomaly-highlight.flash {
    outline: 2px solid #6c757d;
    background: #d6d8db;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;

    #[test]
    fn test_status_badges() {
        assert_eq!(
            status_badge(StatusBadge::Processed),
            r#"<span class="badge bg-success">Processed</span>"#
        );
        assert_eq!(
            status_badge(StatusBadge::Processing),
            r#"<span class="badge bg-warning">Processing</span>"#
        );
        assert_eq!(
            status_badge(StatusBadge::Error),
            r#"<span class="badge bg-danger">Error</span>"#
        );
    }

    #[test]
    fn test_processing_info_hidden_until_revealed() {
        let mut region = StatusRegion {
            badge: StatusBadge::Pending,
            icon: StatusIcon::Pending,
            info_visible: false,
            error: None,
        };
        assert!(processing_info(&region).contains("d-none"));
        region.info_visible = true;
        assert!(!processing_info(&region).contains("d-none"));
    }

    #[test]
    fn test_processing_info_escapes_error() {
        let region = StatusRegion {
            badge: StatusBadge::Failed,
            icon: StatusIcon::Failed,
            info_visible: true,
            error: Some("parse failed: <eof>".to_string()),
        };
        let html = processing_info(&region);
        assert!(html.contains("Processing Error"));
        assert!(html.contains("parse failed: &lt;eof&gt;"));
    }

    #[test]
    fn test_highlight_span_attributes() {
        let highlight = Highlight {
            anomaly_id: 12,
            start: 0,
            end: 3,
            severity: Severity::High,
            description: "Amount mismatch".to_string(),
        };
        let html = highlight_span(&highlight, "abc", false);
        assert!(html.contains(r#"class="anomaly-highlight high""#));
        assert!(html.contains(r#"data-anomaly-id="12""#));
        assert!(html.contains(r#"id="anomaly-12""#));
        assert!(html.contains(r#"data-bs-toggle="tooltip""#));
        assert!(html.contains(r#"title="Amount mismatch""#));
        assert!(html.ends_with(">abc</span>"));
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape(r#"<a href="x">&"#), "&lt;a href=&quot;x&quot;&gt;&amp;");
    }
}

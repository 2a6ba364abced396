//! Page-level tests for highlighting and the anomaly focus helper.

use std::time::Duration;

use anomaly_viewer::models::{Anomaly, Severity};
use anomaly_viewer::page::{focus_anomaly, DocumentPage, SharedPage};

const FLASH: Duration = Duration::from_millis(30);

fn anomaly(id: i64, start: i64, end: i64, severity: &str, description: &str) -> Anomaly {
    Anomaly {
        id,
        anomaly_type: Some("number".to_string()),
        severity: Some(Severity::from(severity.to_string())),
        description: description.to_string(),
        context: None,
        start_position: Some(start),
        end_position: Some(end),
    }
}

fn page_with(text: &str, anomalies: &[Anomaly]) -> SharedPage {
    let page = DocumentPage::new("contract.txt").with_status().with_content(text);
    let shared = page.into_shared();
    shared.lock().unwrap().apply_highlights(anomalies);
    shared
}

#[test]
fn wraps_each_positioned_anomaly_once() {
    let text = "0123456789ABCDEFGHIJ";
    let page = page_with(
        text,
        &[
            anomaly(1, 10, 15, "high", "Figure out of range"),
            anomaly(2, 2, 5, "low", "Stale date"),
        ],
    );

    let view = page.lock().unwrap();
    let html = view.content_markup().unwrap();
    assert_eq!(html.matches("anomaly-highlight").count(), 2);
    assert!(html.contains(">ABCDE</span>"));
    assert!(html.contains(">234</span>"));
    assert!(html.contains(r#"data-anomaly-id="1""#));
    assert!(html.contains(r#"data-anomaly-id="2""#));
    assert!(html.contains(r#"title="Stale date""#));
}

#[test]
fn anomaly_without_positions_is_never_wrapped() {
    let mut ungrounded = anomaly(1, 0, 0, "high", "No span recorded");
    ungrounded.start_position = None;
    ungrounded.end_position = None;

    let page = page_with("plain contract text", &[ungrounded]);
    let view = page.lock().unwrap();
    assert!(view.highlights().is_empty());
    assert_eq!(view.content_markup().unwrap(), "plain contract text");
}

#[test]
fn inverted_span_is_never_wrapped() {
    let page = page_with("plain contract text", &[anomaly(1, 5, 3, "medium", "bad span")]);
    let view = page.lock().unwrap();
    assert!(view.highlights().is_empty());
    assert!(!view.content_markup().unwrap().contains("anomaly-highlight"));
}

#[test]
fn overlapping_spans_stay_disjoint() {
    let text = "0123456789";
    let page = page_with(
        text,
        &[
            anomaly(1, 2, 6, "low", "wide"),
            anomaly(2, 4, 8, "high", "late"),
        ],
    );
    let view = page.lock().unwrap();
    // The later-starting span wins.
    assert_eq!(view.highlights().len(), 1);
    assert_eq!(view.highlights()[0].anomaly_id, 2);
    assert!(view.content_markup().unwrap().contains(">4567</span>"));
}

#[test]
fn offsets_count_characters_not_bytes() {
    let text = "café näive 123 total";
    let page = page_with(text, &[anomaly(1, 11, 14, "medium", "odd amount")]);
    let view = page.lock().unwrap();
    assert!(view.content_markup().unwrap().contains(">123</span>"));
}

#[test]
fn markup_is_escaped_around_and_inside_spans() {
    let text = "a <b> & \"c\" d";
    let page = page_with(text, &[anomaly(1, 2, 5, "low", "tag <inside> & \"quotes\"")]);
    let view = page.lock().unwrap();
    let html = view.content_markup().unwrap();
    assert!(html.contains("&lt;b&gt;"));
    assert!(html.contains("&amp; &quot;c&quot;"));
    assert!(html.contains(r#"title="tag &lt;inside&gt; &amp; &quot;quotes&quot;""#));
    assert!(!html.contains("<b>"));
}

#[test]
fn empty_anomaly_list_is_a_noop() {
    let page = page_with("unchanged", &[]);
    let view = page.lock().unwrap();
    assert!(view.highlights().is_empty());
    assert_eq!(view.content_markup().unwrap(), "unchanged");
}

#[test]
fn page_without_content_region_ignores_highlights() {
    let page = DocumentPage::new("listing").with_status().into_shared();
    page.lock()
        .unwrap()
        .apply_highlights(&[anomaly(1, 0, 3, "high", "x")]);
    let view = page.lock().unwrap();
    assert!(view.highlights().is_empty());
    assert!(view.content_markup().is_none());
}

#[tokio::test]
async fn focusing_unknown_anomaly_changes_nothing() {
    let page = page_with("0123456789", &[anomaly(1, 2, 5, "low", "x")]);
    let before = page.lock().unwrap().content_markup().unwrap();

    focus_anomaly(&page, 999, FLASH);

    let view = page.lock().unwrap();
    assert_eq!(view.content_markup().unwrap(), before);
    assert!(view.scroll_anchor().is_none());
    assert!(view.focused_anomaly().is_none());
}

#[tokio::test]
async fn focus_emphasis_expires_after_flash_window() {
    let page = page_with("0123456789", &[anomaly(7, 2, 5, "low", "x")]);

    focus_anomaly(&page, 7, FLASH);
    {
        let view = page.lock().unwrap();
        assert_eq!(view.scroll_anchor().as_deref(), Some("#anomaly-7"));
        assert!(view.content_markup().unwrap().contains("flash"));
    }

    tokio::time::sleep(FLASH * 3).await;
    let view = page.lock().unwrap();
    assert!(view.focused_anomaly().is_none());
    assert!(!view.content_markup().unwrap().contains("flash"));
}

#[tokio::test]
async fn newer_focus_survives_the_older_timer() {
    let page = page_with(
        "0123456789",
        &[anomaly(1, 0, 2, "low", "a"), anomaly(2, 5, 8, "high", "b")],
    );

    focus_anomaly(&page, 1, FLASH);
    tokio::time::sleep(FLASH / 3).await;
    focus_anomaly(&page, 2, Duration::from_secs(5));

    // Well past anomaly 1's timer, still inside anomaly 2's window.
    tokio::time::sleep(FLASH * 3).await;
    assert_eq!(page.lock().unwrap().focused_anomaly(), Some(2));
}

#[test]
fn full_page_render_carries_the_dom_contract_ids() {
    let page = page_with("0123456789", &[anomaly(1, 2, 5, "high", "x")]);
    let html = page.lock().unwrap().render();
    assert!(html.contains(r#"id="document-status""#));
    assert!(html.contains(r#"id="status-icon""#));
    assert!(html.contains(r#"id="processing-info""#));
    assert!(html.contains(r#"id="document-content""#));
    assert!(html.contains(r#"data-anomaly-id="1""#));
}

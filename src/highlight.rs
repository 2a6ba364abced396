//! Offset-based highlight selection and markup splicing.
//!
//! Anomaly positions are character offsets into the raw document text, as
//! counted by the detection pipeline. Selection maps them to byte offsets,
//! validates them, and resolves overlaps; rendering splices wrapper markup
//! into the text from the highest offset down, so lower offsets stay valid
//! without tracking a running delta.

use tracing::debug;

use crate::models::{Anomaly, Severity};
use crate::page::templates;

/// An accepted highlight span over the document text.
///
/// `start`/`end` are byte offsets, derived from the anomaly's character
/// positions at selection time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    pub anomaly_id: i64,
    pub start: usize,
    pub end: usize,
    pub severity: Severity,
    pub description: String,
}

/// Filter, order and validate anomalies for highlighting.
///
/// Returns disjoint spans sorted descending by start position. Skipped,
/// with a debug log: anomalies missing either position, spans violating
/// `0 <= start < end <= char_length(text)`, and spans overlapping an
/// already-accepted one (the later-starting anomaly wins).
pub fn select_highlights(anomalies: &[Anomaly], text: &str) -> Vec<Highlight> {
    // Byte offset of every character, plus an end sentinel.
    let mut byte_at: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    byte_at.push(text.len());
    let char_len = byte_at.len() - 1;

    let mut positioned: Vec<(&Anomaly, i64, i64)> = anomalies
        .iter()
        .filter_map(|a| match (a.start_position, a.end_position) {
            (Some(start), Some(end)) => Some((a, start, end)),
            _ => None,
        })
        .collect();
    // Highest start first; splicing in this order leaves earlier offsets
    // untouched by the markup inserted at later ones.
    positioned.sort_by(|a, b| b.1.cmp(&a.1));

    let mut accepted = Vec::new();
    // Byte offset where already-accepted markup begins.
    let mut tail_start = text.len();

    for (anomaly, start, end) in positioned {
        if start < 0 || end <= start || end as usize > char_len {
            debug!(
                "Skipping anomaly {} with invalid span {}..{} over {} chars",
                anomaly.id, start, end, char_len
            );
            continue;
        }
        let start_byte = byte_at[start as usize];
        let end_byte = byte_at[end as usize];
        if end_byte > tail_start {
            debug!(
                "Skipping anomaly {} overlapping an already-accepted span",
                anomaly.id
            );
            continue;
        }

        accepted.push(Highlight {
            anomaly_id: anomaly.id,
            start: start_byte,
            end: end_byte,
            severity: anomaly.severity.unwrap_or(Severity::Medium),
            description: anomaly.description.clone(),
        });
        tail_start = start_byte;
    }

    accepted
}

/// Splice highlight wrappers into `text`.
///
/// `highlights` must come from [`select_highlights`]: disjoint and sorted
/// descending by start. Span bodies and the segments between spans are
/// escaped independently, so the recorded offsets always refer to the raw
/// text.
pub fn render_highlighted(text: &str, highlights: &[Highlight], focused: Option<i64>) -> String {
    if highlights.is_empty() {
        return templates::html_escape(text);
    }

    // Assembled back-to-front: each step emits the wrapper and the segment
    // after it, then moves the splice point down to the wrapper's start.
    let mut pieces: Vec<String> = Vec::with_capacity(highlights.len() * 2 + 1);
    let mut tail_start = text.len();

    for highlight in highlights {
        pieces.push(templates::html_escape(&text[highlight.end..tail_start]));
        let flash = focused == Some(highlight.anomaly_id);
        pieces.push(templates::highlight_span(
            highlight,
            &text[highlight.start..highlight.end],
            flash,
        ));
        tail_start = highlight.start;
    }
    pieces.push(templates::html_escape(&text[..tail_start]));

    pieces.reverse();
    pieces.concat()
}

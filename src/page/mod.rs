//! Headless page model for the document view.
//!
//! [`DocumentPage`] stands in for the rendered page: the status badge and
//! icon, the processing-info panel, and the document content with its
//! highlight spans. The poller and the focus helper mutate it through a
//! shared handle; [`DocumentPage::render`] produces the HTML. Pages are
//! built from whatever regions the surrounding template actually has;
//! every operation against a missing region is a silent no-op.

pub mod templates;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::debug;

use crate::highlight::{self, Highlight};
use crate::models::Anomaly;

/// A page shared between the caller and the background tasks mutating it.
pub type SharedPage = Arc<Mutex<DocumentPage>>;

/// Status badge states for the `document-status` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBadge {
    Pending,
    Processing,
    Processed,
    Failed,
    /// Transport failure while checking status.
    Error,
}

/// Icon states for the `status-icon` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusIcon {
    Pending,
    Processing,
    Completed,
    Failed,
}

/// The status display region: badge, icon, and the processing-info panel.
#[derive(Debug, Clone)]
pub struct StatusRegion {
    pub badge: StatusBadge,
    pub icon: StatusIcon,
    /// Whether the processing-info panel is revealed.
    pub info_visible: bool,
    /// Backend-reported failure message, shown as an error alert.
    pub error: Option<String>,
}

impl StatusRegion {
    fn new() -> Self {
        Self {
            badge: StatusBadge::Pending,
            icon: StatusIcon::Pending,
            info_visible: false,
            error: None,
        }
    }
}

/// The document content region: raw text plus accepted highlight spans.
#[derive(Debug, Clone)]
struct ContentRegion {
    text: String,
    highlights: Vec<Highlight>,
    focused: Option<i64>,
}

/// View model of a document page.
pub struct DocumentPage {
    title: String,
    status: Option<StatusRegion>,
    content: Option<ContentRegion>,
}

impl DocumentPage {
    /// A bare page with no status or content region.
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            status: None,
            content: None,
        }
    }

    /// Add the status display region (pending badge, hidden info panel).
    pub fn with_status(mut self) -> Self {
        self.status = Some(StatusRegion::new());
        self
    }

    /// Add the content region holding the document's raw text.
    pub fn with_content(mut self, text: &str) -> Self {
        self.content = Some(ContentRegion {
            text: text.to_string(),
            highlights: Vec::new(),
            focused: None,
        });
        self
    }

    /// Wrap the page for sharing with background tasks.
    pub fn into_shared(self) -> SharedPage {
        Arc::new(Mutex::new(self))
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn has_status_region(&self) -> bool {
        self.status.is_some()
    }

    /// Current status display state, if the page has one.
    pub fn status(&self) -> Option<&StatusRegion> {
        self.status.as_ref()
    }

    /// Raw document text, if the page has a content region.
    pub fn content_text(&self) -> Option<&str> {
        self.content.as_ref().map(|c| c.text.as_str())
    }

    // -- status mutators, driven by the poller ----------------------------

    pub fn mark_pending(&mut self) {
        if let Some(region) = self.status.as_mut() {
            region.badge = StatusBadge::Pending;
            region.icon = StatusIcon::Pending;
        }
    }

    /// Processing also reveals the info panel.
    pub fn mark_processing(&mut self) {
        if let Some(region) = self.status.as_mut() {
            region.badge = StatusBadge::Processing;
            region.icon = StatusIcon::Processing;
            region.info_visible = true;
        }
    }

    pub fn mark_completed(&mut self) {
        if let Some(region) = self.status.as_mut() {
            region.badge = StatusBadge::Processed;
            region.icon = StatusIcon::Completed;
        }
    }

    /// Failed state; shows the backend's message when there is one.
    pub fn mark_failed(&mut self, error: Option<&str>) {
        if let Some(region) = self.status.as_mut() {
            region.badge = StatusBadge::Failed;
            region.icon = StatusIcon::Failed;
            if let Some(message) = error {
                region.error = Some(message.to_string());
                region.info_visible = true;
            }
        }
    }

    /// Transport failure: flips the badge only, the icon keeps its last
    /// known state.
    pub fn mark_error(&mut self) {
        if let Some(region) = self.status.as_mut() {
            region.badge = StatusBadge::Error;
        }
    }

    // -- highlighting ------------------------------------------------------

    /// Overlay highlight markup for `anomalies` onto the content text.
    ///
    /// Replaces any previously applied highlights. No-op if the list is
    /// empty or the page has no content region.
    pub fn apply_highlights(&mut self, anomalies: &[Anomaly]) {
        if anomalies.is_empty() {
            return;
        }
        if let Some(content) = self.content.as_mut() {
            content.highlights = highlight::select_highlights(anomalies, &content.text);
        }
    }

    /// Accepted highlight spans, highest offset first.
    pub fn highlights(&self) -> &[Highlight] {
        self.content
            .as_ref()
            .map(|c| c.highlights.as_slice())
            .unwrap_or(&[])
    }

    /// Rendered content markup, `None` without a content region.
    pub fn content_markup(&self) -> Option<String> {
        self.content
            .as_ref()
            .map(|c| highlight::render_highlighted(&c.text, &c.highlights, c.focused))
    }

    // -- focus -------------------------------------------------------------

    /// The anomaly currently emphasized, if any.
    pub fn focused_anomaly(&self) -> Option<i64> {
        self.content.as_ref().and_then(|c| c.focused)
    }

    /// Fragment anchor of the focused anomaly, while emphasized.
    pub fn scroll_anchor(&self) -> Option<String> {
        self.focused_anomaly().map(|id| format!("#anomaly-{}", id))
    }

    pub(crate) fn set_focus(&mut self, anomaly_id: i64) -> bool {
        match self.content.as_mut() {
            Some(content) if content.highlights.iter().any(|h| h.anomaly_id == anomaly_id) => {
                content.focused = Some(anomaly_id);
                true
            }
            _ => false,
        }
    }

    /// Clear the emphasis, but only if `anomaly_id` still owns it. A newer
    /// focus must survive an older timer.
    pub(crate) fn clear_focus_if(&mut self, anomaly_id: i64) {
        if let Some(content) = self.content.as_mut() {
            if content.focused == Some(anomaly_id) {
                content.focused = None;
            }
        }
    }

    // -- rendering ---------------------------------------------------------

    /// Render the whole page.
    pub fn render(&self) -> String {
        let mut sections = String::new();

        if let Some(region) = &self.status {
            sections.push_str(&templates::status_section(region));
        }
        if let Some(markup) = self.content_markup() {
            sections.push_str(&templates::content_section(&markup));
        }

        templates::base_template(&self.title, &sections)
    }
}

/// Bring an anomaly into view: emphasize its highlight span and schedule
/// the emphasis to clear after `flash`.
///
/// The rendered page marks the span with the `flash` class and exposes the
/// scroll target through [`DocumentPage::scroll_anchor`]. No-op when no
/// highlight with that id exists; no return value, no error path.
pub fn focus_anomaly(page: &SharedPage, anomaly_id: i64, flash: Duration) {
    let focused = page
        .lock()
        .expect("page mutex poisoned")
        .set_focus(anomaly_id);
    if !focused {
        debug!("No highlight for anomaly {}, ignoring focus", anomaly_id);
        return;
    }

    let page = Arc::clone(page);
    tokio::spawn(async move {
        tokio::time::sleep(flash).await;
        page.lock()
            .expect("page mutex poisoned")
            .clear_focus_if(anomaly_id);
    });
}

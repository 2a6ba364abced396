//! Presentation layer for the contract anomaly review UI.
//!
//! The surrounding system uploads contracts, runs an anomaly detection
//! pipeline over them, and serves the results; this crate owns the page-side
//! glue that displays that work:
//!
//! - [`status`] polls the document status endpoint and updates the status
//!   display until the job reaches a terminal state.
//! - [`highlight`] overlays highlight markup onto the document text at the
//!   character offsets recorded by the detector.
//! - [`page`] holds the view model the other pieces mutate and renders it to
//!   HTML, including [`page::focus_anomaly`] for bringing a single anomaly
//!   into view with a temporary emphasis.
//!
//! The page is headless: callers own a [`page::DocumentPage`] behind an
//! `Arc<Mutex<..>>`, hand it to the poller, and render it whenever they need
//! fresh markup. Polling is controlled through an explicit
//! [`status::PollingHandle`] rather than ambient global state, and completion
//! runs a caller-supplied hook instead of reloading anything.

pub mod config;
pub mod error;
pub mod highlight;
pub mod models;
pub mod page;
pub mod status;

pub use config::Settings;
pub use error::StatusError;
pub use models::{Anomaly, DocumentStatus, JobStatus, Severity};
pub use page::{focus_anomaly, DocumentPage, SharedPage};
pub use status::{PollOutcome, PollingHandle, StatusClient, StatusPoller};

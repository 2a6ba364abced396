//! Wire and view types for document status and anomalies.
//!
//! These mirror what the backend emits: the status endpoint's JSON payload
//! and the anomaly records embedded in the document page data. The string
//! enums deserialize leniently: the endpoint reports `"unknown"` for
//! documents without a job row, and a payload must never fail to decode
//! because of a status string this crate has not seen before.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle stage of a document processing job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    /// No job recorded for the document, or an unrecognized status string.
    Unknown,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
            JobStatus::Unknown => "unknown",
        }
    }
}

impl From<String> for JobStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => JobStatus::Pending,
            "processing" => JobStatus::Processing,
            "completed" => JobStatus::Completed,
            "failed" => JobStatus::Failed,
            _ => JobStatus::Unknown,
        }
    }
}

impl From<JobStatus> for String {
    fn from(status: JobStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity of a detected anomaly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Lowercase name, also used as the highlight style class.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl From<String> for Severity {
    fn from(s: String) -> Self {
        match s.as_str() {
            "low" => Severity::Low,
            "high" => Severity::High,
            // The detector only emits low/medium/high; anything else
            // degrades to the middle of the scale.
            _ => Severity::Medium,
        }
    }
}

impl From<Severity> for String {
    fn from(severity: Severity) -> Self {
        severity.as_str().to_string()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of `GET /api/document/{id}/status`.
///
/// Only `processed`, `job_status` and `error` drive the poller;
/// `document_id` and `filename` are carried for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentStatus {
    #[serde(default)]
    pub document_id: Option<i64>,
    #[serde(default)]
    pub filename: Option<String>,
    pub processed: bool,
    pub job_status: JobStatus,
    #[serde(default)]
    pub error: Option<String>,
}

/// A flagged span of document text produced by the detection pipeline.
///
/// Consumed read-only for rendering. Positions are character offsets into
/// the document text and are nullable; the detector cannot always ground a
/// finding to a span.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Anomaly {
    pub id: i64,
    /// Detector category (date, number, combined).
    #[serde(default)]
    pub anomaly_type: Option<String>,
    #[serde(default)]
    pub severity: Option<Severity>,
    pub description: String,
    /// Text surrounding the anomaly, when the detector captured it.
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub start_position: Option<i64>,
    #[serde(default)]
    pub end_position: Option<i64>,
}

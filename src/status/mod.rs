//! Document status polling.
//!
//! [`StatusClient`] talks to the backend's status endpoint;
//! [`StatusPoller`] drives repeated checks against it and applies the
//! results to a shared [`crate::page::DocumentPage`] until the job reaches
//! a terminal state.

mod client;
mod poller;

pub use client::StatusClient;
pub use poller::{PollOutcome, PollingHandle, StatusPoller};

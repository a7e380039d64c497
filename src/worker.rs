//! # Host/worker wire protocol
//!
//! The solver is meant to run off a UI thread, behind a host that serializes requests,
//! tags each with an id, and discards stale responses (spec §5/§6). This module models
//! the wire types the host and worker exchange and the pure "is this still the latest
//! request" decision the host needs — it does not spawn a thread, an async task, or
//! anything that actually moves a [`crate::model::SolveRequest`] across a boundary.

use crate::model::{SolveRequest, SolveResult};

/// A unique, monotonically increasing tag the host assigns to each outstanding request.
pub type RequestId = u64;

/// Message sent from host to worker.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkerRequest {
    pub request_id: RequestId,
    pub input: SolveRequest,
}

/// Message sent from worker to host.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WorkerResponse {
    /// Emitted once, unsolicited, right after the worker starts.
    Ready,
    Result { request_id: RequestId, result: SolveResult },
    Error { request_id: RequestId, error_message: String },
}

impl WorkerResponse {
    /// The request id this response answers, if any (`Ready` answers nothing).
    pub fn request_id(&self) -> Option<RequestId> {
        match self {
            WorkerResponse::Ready => None,
            WorkerResponse::Result { request_id, .. } | WorkerResponse::Error { request_id, .. } => {
                Some(*request_id)
            }
        }
    }
}

/// Tracks the most recently issued request id so a host can discard any response whose
/// id no longer matches — the "is this id still current" decision of spec §5, pulled
/// out as a pure helper so a real host doesn't have to reimplement it.
#[derive(Clone, Debug, Default)]
pub struct RequestTracker {
    latest: Option<RequestId>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `id` was just issued, superseding any previous request.
    pub fn issue(&mut self, id: RequestId) {
        self.latest = Some(id);
    }

    /// Whether a response tagged `id` answers the most recently issued request and
    /// should be accepted. A response that arrives before any request was issued, or
    /// after a newer one superseded it, is stale and must be discarded.
    pub fn is_current(&self, id: RequestId) -> bool {
        self.latest == Some(id)
    }

    /// Convenience wrapper over [`RequestTracker::is_current`] for an entire response.
    /// `Ready` is always accepted since it answers no particular request.
    pub fn accepts(&self, response: &WorkerResponse) -> bool {
        match response.request_id() {
            None => true,
            Some(id) => self.is_current(id),
        }
    }
}

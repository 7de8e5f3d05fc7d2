//! A deterministic backend with no platform behind it.
//!
//! [`HeadlessBackend`] records submitted requests instead of animating
//! anything. The host (usually a test, but also any environment without a
//! native animation system) inspects the pending queue and drives the runner
//! by calling `notify_complete` with whatever status and ordering it wants;
//! aborted requests land in a cancelled queue to be reported back as
//! `Cancelled`.

use tracing::debug;

use vela_ui::NativeHandle;

use crate::backend::{AnimationBackend, NativeRequest, RequestId};
use crate::types::{AnimationDefaults, Curve};

/// Records requests; the host drives completions.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    defaults: AnimationDefaults,
    pending: Vec<NativeRequest>,
    cancelled: Vec<RequestId>,
    submitted: usize,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults(defaults: AnimationDefaults) -> Self {
        Self {
            defaults,
            ..Self::default()
        }
    }

    /// Requests submitted and not yet taken or aborted, in submission order.
    pub fn pending(&self) -> &[NativeRequest] {
        &self.pending
    }

    /// Total number of requests ever submitted.
    pub fn submitted(&self) -> usize {
        self.submitted
    }

    /// Drain the pending queue. The host reports each drained request back
    /// to its runner as `Finished` (or holds onto it).
    pub fn take_pending(&mut self) -> Vec<NativeRequest> {
        std::mem::take(&mut self.pending)
    }

    /// Drain ids of aborted requests awaiting a `Cancelled` report.
    pub fn take_cancelled(&mut self) -> Vec<RequestId> {
        std::mem::take(&mut self.cancelled)
    }

    /// The duration this backend would use for a request.
    pub fn resolved_duration_ms(&self, request: &NativeRequest) -> f32 {
        request.duration_ms.unwrap_or(self.defaults.duration_ms)
    }

    /// The curve this backend would use for a request.
    pub fn resolved_curve(&self, request: &NativeRequest) -> Curve {
        request.curve.unwrap_or(self.defaults.curve)
    }
}

impl AnimationBackend for HeadlessBackend {
    fn submit(&mut self, request: NativeRequest) {
        debug!(request = ?request.request, handle = ?request.handle, "headless submit");
        self.submitted += 1;
        self.pending.push(request);
    }

    fn abort(&mut self, handle: NativeHandle) {
        debug!(?handle, "headless abort");
        let mut kept = Vec::with_capacity(self.pending.len());
        for request in self.pending.drain(..) {
            if request.handle == handle {
                self.cancelled.push(request.request);
            } else {
                kept.push(request);
            }
        }
        self.pending = kept;
    }
}

//! The native animation backend seam.
//!
//! The engine never drives time itself; it hands each merged entry to an
//! [`AnimationBackend`] as a [`NativeRequest`] ("animate this native value to
//! that destination over this duration") and waits for the host event loop to
//! report completion through
//! [`AnimationRunner::notify_complete`](crate::runner::AnimationRunner::notify_complete),
//! exactly once per request, finished or cancelled.

use std::sync::atomic::{AtomicU64, Ordering};

use vela_ui::{Affine, Color, NativeHandle};

use crate::types::Curve;

/// Unique identifier for one native animation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(pub u64);

impl RequestId {
    /// Mint a process-unique request id.
    pub fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Destination of a native animation, typed per animatable native field.
///
/// The merge pass guarantees that translate/rotate/scale never reach the
/// backend individually; they arrive folded into `Transform`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NativeChange {
    Opacity(f64),
    BackgroundColor(Color),
    Transform(Affine),
}

/// Native repeat semantics for one request.
///
/// The first play counts as one iteration, so a finite iteration count N
/// maps to `Times(N - 1)` additional repeats; the infinite sentinel maps to
/// `Forever`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    /// This many additional repeats after the first play.
    Times(u32),
    /// Repeat until aborted.
    Forever,
}

/// One scheduled native transition.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeRequest {
    pub request: RequestId,
    /// Native view the transition runs on.
    pub handle: NativeHandle,
    pub change: NativeChange,
    /// `None` means the backend's default duration.
    pub duration_ms: Option<f32>,
    /// `None` means no delay.
    pub delay_ms: Option<f32>,
    pub repeat: Repeat,
    /// `None` means the backend's default curve.
    pub curve: Option<Curve>,
}

/// How a native animation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionStatus {
    Finished,
    Cancelled,
}

/// Platform animation primitive.
///
/// Implementations schedule transitions and abort them; they do not call
/// back into the engine directly. The host forwards native completion
/// callbacks (one per submitted request, `Cancelled` for aborted ones) to
/// the owning runner on the same cooperative event loop. A backend that
/// refuses a request reports that request `Cancelled`; there is no separate
/// error channel.
pub trait AnimationBackend {
    /// Schedule a transition.
    fn submit(&mut self, request: NativeRequest);

    /// Abort every in-flight animation on a native view. Each aborted
    /// request must subsequently be reported as `Cancelled`.
    fn abort(&mut self, handle: NativeHandle);
}

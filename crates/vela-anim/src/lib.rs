//! Declarative property-animation engine for the Vela toolkit.
//!
//! Callers describe a list of property changes (opacity, background color,
//! translate, rotate, scale) as [`AnimationDefinition`]s; the engine merges
//! compatible transform changes into single composite matrix animations,
//! dispatches one native request per merged entry, and folds the per-entry
//! completion callbacks into exactly one terminal outcome.
//!
//! # Architecture
//!
//! ```text
//! AnimationRunner
//!   ├── validate definitions (before any native dispatch)
//!   ├── merge transform animations (translate/rotate/scale → one matrix)
//!   ├── dispatch NativeRequests via an AnimationBackend
//!   └── CompletionAggregator
//!         └── resolves the OutcomeHandle once: Finished or Cancelled
//! ```
//!
//! The engine is single-threaded and cooperative: `play()` returns
//! immediately after dispatching, and the host event loop forwards each
//! native completion callback to [`AnimationRunner::notify_complete`].
//! Cancellation asks the backend to abort in-flight native animations and
//! rolls each started entry back to its pre-animation value.

pub mod aggregator;
pub mod backend;
pub mod error;
pub mod headless;
pub mod merge;
pub mod outcome;
pub mod runner;
pub mod types;

pub use aggregator::CompletionAggregator;
pub use backend::{
    AnimationBackend, CompletionStatus, NativeChange, NativeRequest, Repeat, RequestId,
};
pub use error::{AnimationError, ValidationError};
pub use headless::HeadlessBackend;
pub use merge::merge_transform_animations;
pub use outcome::{OutcomeHandle, PlayOutcome};
pub use runner::{AnimationRunner, RunnerState};
pub use types::{
    AnimationDefaults, AnimationDefinition, Curve, IterationCount, Playback, Property,
    PropertyAnimation, Value, ValueKind,
};

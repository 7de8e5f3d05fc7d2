//! Animation playback.
//!
//! An [`AnimationRunner`] takes an ordered list of definitions and a
//! [`Playback`] mode, and drives them through a native backend:
//!
//! 1. `play()` validates every definition (nothing is dispatched if any
//!    fails), merges transform animations, and issues one native request per
//!    merged entry — all at once in parallel mode, one at a time in
//!    sequential mode. The property's current value is recorded as the
//!    rollback value when its entry is dispatched.
//! 2. The host forwards each native completion to `notify_complete`. A
//!    finished entry writes its destination into the view model; a cancelled
//!    entry restores its rollback value.
//! 3. The [`CompletionAggregator`] decides when the run has terminally
//!    resolved; the `OutcomeHandle` returned by `play()` settles exactly
//!    once.
//!
//! `cancel()` asks the backend to abort every in-flight native animation on
//! the runner's targets; the runner stays `Playing` until the resulting
//! cancelled callbacks satisfy the aggregator.

use static_assertions::assert_impl_all;
use tracing::{debug, trace, warn};

use vela_ui::{Affine, Color, NativeHandle, ViewTree};

use crate::aggregator::CompletionAggregator;
use crate::backend::{
    AnimationBackend, CompletionStatus, NativeChange, NativeRequest, Repeat, RequestId,
};
use crate::error::{AnimationError, ValidationError};
use crate::merge::merge_transform_animations;
use crate::outcome::{OutcomeHandle, PlayOutcome};
use crate::types::{
    AnimationDefinition, IterationCount, Playback, Property, PropertyAnimation, Value,
};

/// Lifecycle of a runner. `Finished` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerState {
    Idle,
    Playing,
    Finished,
    Cancelled,
}

/// Pre-animation value captured at dispatch, restored on cancellation.
#[derive(Debug, Clone, Copy)]
enum Rollback {
    Opacity(f64),
    BackgroundColor(Option<Color>),
    Transform(Affine),
}

#[derive(Debug)]
struct Entry {
    animation: PropertyAnimation,
    change: NativeChange,
    native: NativeHandle,
    request: Option<RequestId>,
    rollback: Option<Rollback>,
    completed: bool,
}

/// Plays a list of property animations to a single terminal outcome.
#[derive(Debug)]
pub struct AnimationRunner {
    definitions: Vec<AnimationDefinition>,
    mode: Playback,
    state: RunnerState,
    entries: Vec<Entry>,
    aggregator: CompletionAggregator,
    outcome: OutcomeHandle,
    /// Next entry to dispatch in sequential mode.
    next_entry: usize,
}

assert_impl_all!(AnimationRunner: Send);

impl AnimationRunner {
    pub fn new(definitions: Vec<AnimationDefinition>, mode: Playback) -> Self {
        Self {
            definitions,
            mode,
            state: RunnerState::Idle,
            entries: Vec::new(),
            aggregator: CompletionAggregator::new(0, mode),
            outcome: OutcomeHandle::pending(),
            next_entry: 0,
        }
    }

    pub fn state(&self) -> RunnerState {
        self.state
    }

    pub fn mode(&self) -> Playback {
        self.mode
    }

    /// Start playback.
    ///
    /// Fails fast — with nothing dispatched — on invalid definitions, and
    /// with [`AnimationError::AlreadyPlayed`] if called more than once. An
    /// animation list that merges to nothing resolves `Finished`
    /// immediately.
    pub fn play(
        &mut self,
        views: &ViewTree,
        backend: &mut dyn AnimationBackend,
    ) -> Result<OutcomeHandle, AnimationError> {
        if self.state != RunnerState::Idle {
            return Err(AnimationError::AlreadyPlayed);
        }

        let validated = validate(&self.definitions, views)?;
        debug!(count = validated.len(), "validated property animations");

        let merged = merge_transform_animations(validated)?;
        debug!(count = merged.len(), mode = ?self.mode, "playing merged property animations");

        let handle = OutcomeHandle::pending();
        self.outcome = handle.clone();

        if merged.is_empty() {
            debug!("nothing to animate");
            self.state = RunnerState::Finished;
            handle.resolve(PlayOutcome::Finished);
            return Ok(handle);
        }

        // Build every native change up front so no failure is possible once
        // the first request has been submitted.
        let mut entries = Vec::with_capacity(merged.len());
        for animation in merged {
            let view = views
                .get(animation.target)
                .ok_or(ValidationError::UnknownTarget {
                    target: animation.target,
                })?;
            let change = native_change(&animation)?;
            entries.push(Entry {
                native: view.handle(),
                animation,
                change,
                request: None,
                rollback: None,
                completed: false,
            });
        }

        self.entries = entries;
        self.aggregator = CompletionAggregator::new(self.entries.len(), self.mode);
        self.state = RunnerState::Playing;

        match self.mode {
            Playback::Parallel => {
                for index in 0..self.entries.len() {
                    self.dispatch(index, views, backend);
                }
                self.next_entry = self.entries.len();
            }
            Playback::Sequential => {
                self.dispatch(0, views, backend);
                self.next_entry = 1;
            }
        }

        Ok(handle)
    }

    /// Abort an in-flight run.
    ///
    /// Valid only while `Playing`; otherwise a no-op. The terminal
    /// `Cancelled` state is reached once the backend has reported every
    /// aborted entry.
    pub fn cancel(&mut self, backend: &mut dyn AnimationBackend) {
        if self.state != RunnerState::Playing {
            trace!(state = ?self.state, "cancel ignored; runner not playing");
            return;
        }
        debug!("cancel requested; aborting in-flight native animations");

        let mut aborted: Vec<NativeHandle> = Vec::new();
        for entry in &self.entries {
            if entry.request.is_some() && !entry.completed && !aborted.contains(&entry.native) {
                aborted.push(entry.native);
                backend.abort(entry.native);
            }
        }
    }

    /// Deliver one native completion callback.
    ///
    /// The host calls this exactly once per submitted request. Calls after
    /// the terminal state, for unknown requests, or repeated for the same
    /// request are ignored.
    pub fn notify_complete(
        &mut self,
        views: &mut ViewTree,
        backend: &mut dyn AnimationBackend,
        request: RequestId,
        status: CompletionStatus,
    ) {
        if self.state != RunnerState::Playing {
            trace!(?request, state = ?self.state, "completion ignored; runner not playing");
            return;
        }
        let Some(index) = self
            .entries
            .iter()
            .position(|entry| entry.request == Some(request))
        else {
            warn!(?request, "completion for unknown request id");
            return;
        };
        if self.entries[index].completed {
            trace!(?request, "duplicate completion ignored");
            return;
        }
        self.entries[index].completed = true;

        let resolution = match status {
            CompletionStatus::Finished => {
                trace!(index, "entry finished; applying destination value");
                apply_destination(&self.entries[index], views);
                let resolution = self.aggregator.entry_finished();
                if resolution.is_none()
                    && self.mode == Playback::Sequential
                    && self.next_entry < self.entries.len()
                {
                    let next = self.next_entry;
                    self.next_entry += 1;
                    self.dispatch(next, views, backend);
                }
                resolution
            }
            CompletionStatus::Cancelled => {
                trace!(index, "entry cancelled; rolling back");
                apply_rollback(&self.entries[index], views);
                self.aggregator.entry_cancelled()
            }
        };

        if let Some(outcome) = resolution {
            self.finish(outcome);
        }
    }

    fn dispatch(&mut self, index: usize, views: &ViewTree, backend: &mut dyn AnimationBackend) {
        let entry = &mut self.entries[index];

        match views.get(entry.animation.target) {
            Some(view) => {
                entry.rollback = Some(match entry.change {
                    NativeChange::Opacity(_) => Rollback::Opacity(view.opacity),
                    NativeChange::BackgroundColor(_) => {
                        Rollback::BackgroundColor(view.background_color)
                    }
                    NativeChange::Transform(_) => Rollback::Transform(view.transform),
                });
            }
            None => warn!(
                target = ?entry.animation.target,
                "animation target vanished before dispatch; rollback not captured"
            ),
        }

        let request = RequestId::next();
        entry.request = Some(request);
        trace!(?request, index, change = ?entry.change, "dispatching native animation request");

        backend.submit(NativeRequest {
            request,
            handle: entry.native,
            change: entry.change,
            duration_ms: entry.animation.duration_ms,
            delay_ms: entry.animation.delay_ms,
            repeat: repeat_spec(entry.animation.iterations),
            curve: entry.animation.curve,
        });
    }

    fn finish(&mut self, outcome: PlayOutcome) {
        debug!(?outcome, finished = self.aggregator.finished(), cancelled = self.aggregator.cancelled(), "animation resolved");
        self.state = match outcome {
            PlayOutcome::Finished => RunnerState::Finished,
            PlayOutcome::Cancelled => RunnerState::Cancelled,
        };
        self.outcome.resolve(outcome);
    }
}

/// Map the five animatable kinds onto native fields. The merged set only
/// ever contains opacity, background color, and composite transforms;
/// anything else cannot be animated natively.
fn native_change(animation: &PropertyAnimation) -> Result<NativeChange, AnimationError> {
    match (animation.property, &animation.value) {
        (Property::Opacity, Value::Scalar { value }) => Ok(NativeChange::Opacity(*value)),
        (Property::BackgroundColor, Value::Color { value }) => {
            Ok(NativeChange::BackgroundColor(*value))
        }
        (Property::Transform, Value::Matrix { value }) => Ok(NativeChange::Transform(*value)),
        _ => Err(AnimationError::UnsupportedProperty(animation.property)),
    }
}

/// Write an entry's destination value into the view model.
fn apply_destination(entry: &Entry, views: &mut ViewTree) {
    let Some(view) = views.get_mut(entry.animation.target) else {
        warn!(target = ?entry.animation.target, "animation target vanished; destination not applied");
        return;
    };
    match entry.change {
        NativeChange::Opacity(value) => view.opacity = value,
        NativeChange::BackgroundColor(color) => view.background_color = Some(color),
        NativeChange::Transform(matrix) => view.transform = matrix,
    }
}

/// Restore an entry's recorded pre-animation value.
fn apply_rollback(entry: &Entry, views: &mut ViewTree) {
    let Some(rollback) = entry.rollback else {
        return;
    };
    let Some(view) = views.get_mut(entry.animation.target) else {
        warn!(target = ?entry.animation.target, "animation target vanished; rollback not applied");
        return;
    };
    match rollback {
        Rollback::Opacity(value) => view.opacity = value,
        Rollback::BackgroundColor(color) => view.background_color = color,
        Rollback::Transform(matrix) => view.transform = matrix,
    }
}

fn repeat_spec(iterations: Option<IterationCount>) -> Repeat {
    match iterations {
        None => Repeat::Times(0),
        Some(IterationCount::Infinite) => Repeat::Forever,
        // The first play already counts as one iteration.
        Some(IterationCount::Count { count }) => Repeat::Times(count.saturating_sub(1)),
    }
}

fn validate(
    definitions: &[AnimationDefinition],
    views: &ViewTree,
) -> Result<Vec<PropertyAnimation>, AnimationError> {
    let mut animations = Vec::with_capacity(definitions.len());
    for def in definitions {
        if def.property == Property::Skip {
            return Err(AnimationError::UnsupportedProperty(Property::Skip));
        }
        let value = def.value.ok_or(ValidationError::MissingValue {
            target: def.target,
            property: def.property,
        })?;
        if !views.contains(def.target) {
            return Err(ValidationError::UnknownTarget { target: def.target }.into());
        }
        // Skip was rejected above, so the property has an expected kind.
        if let Some(expected) = def.property.value_kind() {
            if value.kind() != expected {
                return Err(ValidationError::ValueKind {
                    property: def.property,
                    expected,
                    found: value.kind(),
                }
                .into());
            }
        }
        if def.iterations == Some(IterationCount::Count { count: 0 }) {
            return Err(ValidationError::ZeroIterations {
                target: def.target,
                property: def.property,
            }
            .into());
        }
        animations.push(PropertyAnimation {
            target: def.target,
            property: def.property,
            value,
            duration_ms: def.duration_ms,
            delay_ms: def.delay_ms,
            iterations: def.iterations,
            curve: def.curve,
        });
    }
    Ok(animations)
}

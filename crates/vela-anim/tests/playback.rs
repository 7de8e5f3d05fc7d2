//! End-to-end playback scenarios driven through the headless backend.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

use vela_anim::{
    AnimationDefinition, AnimationError, AnimationRunner, CompletionStatus, HeadlessBackend,
    NativeChange, Playback, PlayOutcome, RunnerState, ValidationError,
};
use vela_ui::{Affine, Color, NativeHandle, ViewTree};

fn noop_waker() -> Waker {
    const VTABLE: RawWakerVTable =
        RawWakerVTable::new(|_| RawWaker::new(std::ptr::null(), &VTABLE), |_| {}, |_| {}, |_| {});
    // SAFETY: the vtable functions are all no-ops over a null pointer.
    unsafe { Waker::from_raw(RawWaker::new(std::ptr::null(), &VTABLE)) }
}

/// Report every submitted request as finished, following sequential
/// dispatches until the backend goes quiet.
fn finish_all(runner: &mut AnimationRunner, views: &mut ViewTree, backend: &mut HeadlessBackend) {
    loop {
        let requests = backend.take_pending();
        if requests.is_empty() {
            break;
        }
        for request in requests {
            runner.notify_complete(views, backend, request.request, CompletionStatus::Finished);
        }
    }
}

/// Report every aborted request as cancelled.
fn deliver_cancellations(
    runner: &mut AnimationRunner,
    views: &mut ViewTree,
    backend: &mut HeadlessBackend,
) {
    loop {
        let cancelled = backend.take_cancelled();
        if cancelled.is_empty() {
            break;
        }
        for request in cancelled {
            runner.notify_complete(views, backend, request, CompletionStatus::Cancelled);
        }
    }
}

#[test]
fn parallel_opacity_and_translate_finish() {
    let mut views = ViewTree::new();
    let view = views.create(NativeHandle(1));
    let mut backend = HeadlessBackend::new();
    let mut runner = AnimationRunner::new(
        vec![
            AnimationDefinition::opacity(view, 0.5).duration_ms(300.0),
            AnimationDefinition::translate(view, 10.0, 0.0).duration_ms(300.0),
        ],
        Playback::Parallel,
    );

    let handle = runner.play(&views, &mut backend).unwrap();
    assert_eq!(runner.state(), RunnerState::Playing);
    // Both requests go out in one batch: opacity plus the merged transform.
    assert_eq!(backend.pending().len(), 2);

    finish_all(&mut runner, &mut views, &mut backend);

    assert_eq!(handle.outcome(), Some(PlayOutcome::Finished));
    assert_eq!(runner.state(), RunnerState::Finished);
    let animated = views.get(view).unwrap();
    assert_eq!(animated.opacity, 0.5);
    assert!(animated
        .transform
        .approx_eq(&Affine::translation(10.0, 0.0), 1e-9));
}

#[test]
fn merged_transform_request_carries_composed_matrix() {
    let mut views = ViewTree::new();
    let view = views.create(NativeHandle(1));
    let mut backend = HeadlessBackend::new();
    let mut runner = AnimationRunner::new(
        vec![
            AnimationDefinition::rotate(view, 90.0),
            AnimationDefinition::scale(view, 2.0, 2.0),
        ],
        Playback::Parallel,
    );
    runner.play(&views, &mut backend).unwrap();

    assert_eq!(backend.pending().len(), 1);
    let expected = Affine::rotation_deg(90.0).then(&Affine::scaling(2.0, 2.0));
    match backend.pending()[0].change {
        NativeChange::Transform(matrix) => assert!(matrix.approx_eq(&expected, 1e-9)),
        ref other => panic!("expected a transform request, got {other:?}"),
    }
}

#[test]
fn sequential_dispatches_one_entry_at_a_time() {
    let mut views = ViewTree::new();
    let view = views.create(NativeHandle(1));
    let mut backend = HeadlessBackend::new();
    let mut runner = AnimationRunner::new(
        vec![
            AnimationDefinition::opacity(view, 0.2),
            AnimationDefinition::opacity(view, 0.8),
        ],
        Playback::Sequential,
    );

    let handle = runner.play(&views, &mut backend).unwrap();
    assert_eq!(backend.submitted(), 1);

    let first = backend.take_pending().remove(0);
    runner.notify_complete(&mut views, &mut backend, first.request, CompletionStatus::Finished);
    // Finishing the first entry releases the second.
    assert_eq!(backend.submitted(), 2);
    assert_eq!(handle.outcome(), None);

    let second = backend.take_pending().remove(0);
    runner.notify_complete(&mut views, &mut backend, second.request, CompletionStatus::Finished);
    assert_eq!(handle.outcome(), Some(PlayOutcome::Finished));
    assert_eq!(views.get(view).unwrap().opacity, 0.8);
}

#[test]
fn sequential_cancellation_rolls_back_only_the_cancelled_entry() {
    let mut views = ViewTree::new();
    let view = views.create(NativeHandle(1));
    views.get_mut(view).unwrap().background_color = Some(Color::rgb(9, 9, 9));

    let mut backend = HeadlessBackend::new();
    let mut runner = AnimationRunner::new(
        vec![
            AnimationDefinition::opacity(view, 0.5),
            AnimationDefinition::background_color(view, Color::rgb(200, 0, 0)),
        ],
        Playback::Sequential,
    );
    let handle = runner.play(&views, &mut backend).unwrap();

    // A finishes and its value sticks.
    let first = backend.take_pending().remove(0);
    runner.notify_complete(&mut views, &mut backend, first.request, CompletionStatus::Finished);
    assert_eq!(views.get(view).unwrap().opacity, 0.5);

    // B is cancelled and rolls back to its pre-animation color.
    runner.cancel(&mut backend);
    deliver_cancellations(&mut runner, &mut views, &mut backend);

    assert_eq!(handle.outcome(), Some(PlayOutcome::Cancelled));
    assert_eq!(runner.state(), RunnerState::Cancelled);
    let animated = views.get(view).unwrap();
    assert_eq!(animated.opacity, 0.5, "finished entry keeps its value");
    assert_eq!(animated.background_color, Some(Color::rgb(9, 9, 9)));
}

#[test]
fn sequential_cancellation_skips_remaining_entries() {
    let mut views = ViewTree::new();
    let view = views.create(NativeHandle(1));
    let mut backend = HeadlessBackend::new();
    let mut runner = AnimationRunner::new(
        vec![
            AnimationDefinition::opacity(view, 0.1),
            AnimationDefinition::rotate(view, 45.0),
            AnimationDefinition::opacity(view, 0.9),
        ],
        Playback::Sequential,
    );
    let handle = runner.play(&views, &mut backend).unwrap();

    // Entry 0 finishes; entry 1 (the merged transform) goes out.
    let first = backend.take_pending().remove(0);
    runner.notify_complete(&mut views, &mut backend, first.request, CompletionStatus::Finished);
    assert_eq!(backend.submitted(), 2);

    runner.cancel(&mut backend);
    deliver_cancellations(&mut runner, &mut views, &mut backend);

    assert_eq!(handle.outcome(), Some(PlayOutcome::Cancelled));
    // The third entry was never dispatched.
    assert_eq!(backend.submitted(), 2);
    let animated = views.get(view).unwrap();
    assert_eq!(animated.opacity, 0.1);
    assert!(animated.transform.is_identity(1e-9), "cancelled transform rolled back");
}

#[test]
fn parallel_cancellation_rolls_back_everything() {
    let mut views = ViewTree::new();
    let a = views.create(NativeHandle(1));
    let b = views.create(NativeHandle(2));
    views.get_mut(a).unwrap().opacity = 0.9;

    let mut backend = HeadlessBackend::new();
    let mut runner = AnimationRunner::new(
        vec![
            AnimationDefinition::opacity(a, 0.0),
            AnimationDefinition::translate(b, 50.0, 50.0),
        ],
        Playback::Parallel,
    );
    let handle = runner.play(&views, &mut backend).unwrap();

    runner.cancel(&mut backend);
    assert_eq!(handle.outcome(), None, "still playing until callbacks land");
    assert_eq!(runner.state(), RunnerState::Playing);

    deliver_cancellations(&mut runner, &mut views, &mut backend);
    assert_eq!(handle.outcome(), Some(PlayOutcome::Cancelled));
    assert_eq!(views.get(a).unwrap().opacity, 0.9);
    assert!(views.get(b).unwrap().transform.is_identity(1e-9));
}

#[test]
fn parallel_partial_cancellation_resolves_cancelled() {
    let mut views = ViewTree::new();
    let a = views.create(NativeHandle(1));
    let b = views.create(NativeHandle(2));
    let mut backend = HeadlessBackend::new();
    let mut runner = AnimationRunner::new(
        vec![
            AnimationDefinition::opacity(a, 0.5),
            AnimationDefinition::opacity(b, 0.5),
        ],
        Playback::Parallel,
    );
    let handle = runner.play(&views, &mut backend).unwrap();

    // One entry finishes before the cancel arrives.
    let requests = backend.take_pending();
    runner.notify_complete(
        &mut views,
        &mut backend,
        requests[0].request,
        CompletionStatus::Finished,
    );

    runner.cancel(&mut backend);
    // The unfinished entry is still known to the runner even though the
    // headless queue was drained; report it cancelled by hand.
    runner.notify_complete(
        &mut views,
        &mut backend,
        requests[1].request,
        CompletionStatus::Cancelled,
    );

    assert_eq!(handle.outcome(), Some(PlayOutcome::Cancelled));
    assert_eq!(views.get(a).unwrap().opacity, 0.5, "finished entry keeps its value");
    assert_eq!(views.get(b).unwrap().opacity, 1.0, "cancelled entry rolled back");
}

#[test]
fn duplicate_and_late_completions_are_ignored() {
    let mut views = ViewTree::new();
    let view = views.create(NativeHandle(1));
    let mut backend = HeadlessBackend::new();
    let mut runner = AnimationRunner::new(
        vec![AnimationDefinition::opacity(view, 0.5)],
        Playback::Parallel,
    );
    let handle = runner.play(&views, &mut backend).unwrap();

    let request = backend.take_pending().remove(0).request;
    runner.notify_complete(&mut views, &mut backend, request, CompletionStatus::Finished);
    assert_eq!(handle.outcome(), Some(PlayOutcome::Finished));

    // A stray second callback must not flip the resolution or the model.
    runner.notify_complete(&mut views, &mut backend, request, CompletionStatus::Cancelled);
    assert_eq!(handle.outcome(), Some(PlayOutcome::Finished));
    assert_eq!(views.get(view).unwrap().opacity, 0.5);
}

#[test]
fn validation_failure_leaves_no_trace() {
    let mut views = ViewTree::new();
    let view = views.create(NativeHandle(1));
    let mut backend = HeadlessBackend::new();
    let mut runner = AnimationRunner::new(
        vec![
            AnimationDefinition::opacity(view, 0.5),
            AnimationDefinition::new(view, vela_anim::Property::Translate),
        ],
        Playback::Parallel,
    );

    let err = runner.play(&views, &mut backend).unwrap_err();
    assert!(matches!(
        err,
        AnimationError::Validation(ValidationError::MissingValue { .. })
    ));
    assert_eq!(backend.submitted(), 0, "no native request may be issued");
    assert_eq!(runner.state(), RunnerState::Idle);
    assert_eq!(views.get(view).unwrap().opacity, 1.0);
}

#[test]
fn cancelling_an_unstarted_or_finished_runner_is_a_noop() {
    let mut views = ViewTree::new();
    let view = views.create(NativeHandle(1));
    let mut backend = HeadlessBackend::new();
    let mut runner = AnimationRunner::new(
        vec![AnimationDefinition::opacity(view, 0.5)],
        Playback::Parallel,
    );

    runner.cancel(&mut backend);
    assert_eq!(runner.state(), RunnerState::Idle);

    let handle = runner.play(&views, &mut backend).unwrap();
    finish_all(&mut runner, &mut views, &mut backend);
    assert_eq!(handle.outcome(), Some(PlayOutcome::Finished));

    runner.cancel(&mut backend);
    assert_eq!(runner.state(), RunnerState::Finished);
}

#[test]
fn outcome_handle_is_awaitable() {
    let mut views = ViewTree::new();
    let view = views.create(NativeHandle(1));
    let mut backend = HeadlessBackend::new();
    let mut runner = AnimationRunner::new(
        vec![AnimationDefinition::opacity(view, 0.0)],
        Playback::Parallel,
    );
    let mut handle = runner.play(&views, &mut backend).unwrap();

    let waker = noop_waker();
    let mut cx = Context::from_waker(&waker);
    assert_eq!(Pin::new(&mut handle).poll(&mut cx), Poll::Pending);

    finish_all(&mut runner, &mut views, &mut backend);
    assert_eq!(
        Pin::new(&mut handle).poll(&mut cx),
        Poll::Ready(PlayOutcome::Finished)
    );
}

#[test]
fn distinct_timing_produces_distinct_native_requests() {
    let mut views = ViewTree::new();
    let view = views.create(NativeHandle(1));
    let mut backend = HeadlessBackend::new();
    let mut runner = AnimationRunner::new(
        vec![
            AnimationDefinition::translate(view, 10.0, 0.0).duration_ms(100.0),
            AnimationDefinition::scale(view, 2.0, 2.0).duration_ms(400.0),
        ],
        Playback::Parallel,
    );
    runner.play(&views, &mut backend).unwrap();

    // Different durations prevent merging: two composite transform requests.
    let pending = backend.pending();
    assert_eq!(pending.len(), 2);
    assert_eq!(pending[0].duration_ms, Some(100.0));
    assert_eq!(pending[1].duration_ms, Some(400.0));
    assert!(pending
        .iter()
        .all(|r| matches!(r.change, NativeChange::Transform(_))));
}

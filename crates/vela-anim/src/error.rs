//! Animation error taxonomy.
//!
//! Validation and unsupported-property errors abort a play attempt before
//! any native dispatch. Cancellation is not an error: it is a terminal
//! [`PlayOutcome`](crate::outcome::PlayOutcome) of the play itself.

use thiserror::Error;

use vela_ui::ViewId;

use crate::types::{Property, ValueKind};

/// A definition failed the pre-dispatch checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The definition carries no destination value.
    #[error("animation for {property:?} on view {target:?} has no value")]
    MissingValue { target: ViewId, property: Property },

    /// The target view is not present in the view tree.
    #[error("animation target {target:?} does not exist")]
    UnknownTarget { target: ViewId },

    /// The value shape does not match the property.
    #[error("{property:?} expects a {expected:?} value, got {found:?}")]
    ValueKind {
        property: Property,
        expected: ValueKind,
        found: ValueKind,
    },

    /// Finite iteration counts start at 1.
    #[error("iteration count for {property:?} on view {target:?} must be at least 1")]
    ZeroIterations { target: ViewId, property: Property },
}

/// Errors raised by [`AnimationRunner`](crate::runner::AnimationRunner).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AnimationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The property kind cannot be animated (or composed into a transform).
    #[error("cannot animate property {0:?}")]
    UnsupportedProperty(Property),

    /// A runner plays once; build a new runner to play again.
    #[error("play() may only be called once per runner")]
    AlreadyPlayed,
}

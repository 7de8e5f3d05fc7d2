//! The animatable view model.
//!
//! A [`View`] is the platform-neutral state a native widget mirrors: the five
//! animatable properties plus the composed transform the merger writes, and
//! an opaque [`NativeHandle`] that backends use to address the platform
//! object. Views live in a [`ViewTree`] and are referenced by [`ViewId`];
//! animation descriptors carry ids rather than references, so dispatch is
//! keyed on an explicit tag instead of runtime type inspection.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::geometry::Vec2;
use crate::transform::Affine;

/// Identifier of a view within a [`ViewTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewId(pub u64);

/// Opaque handle to the platform's native view object.
///
/// The toolkit never interprets this value; it is minted by the host when the
/// native widget is created and passed back to the native backend with every
/// animation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NativeHandle(pub u64);

/// Animatable state of a single view.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    handle: NativeHandle,
    /// Opacity in [0, 1].
    pub opacity: f64,
    /// Background fill, `None` until one is set.
    pub background_color: Option<Color>,
    /// Translation offset in device-independent pixels.
    pub translate: Vec2,
    /// Scale factors, (1, 1) at rest.
    pub scale: Vec2,
    /// Rotation in degrees.
    pub rotate: f64,
    /// Composed transform written by merged transform animations.
    pub transform: Affine,
}

impl View {
    fn new(handle: NativeHandle) -> Self {
        Self {
            handle,
            opacity: 1.0,
            background_color: None,
            translate: Vec2::ZERO,
            scale: Vec2::ONE,
            rotate: 0.0,
            transform: Affine::identity(),
        }
    }

    /// The native handle this view was created with.
    pub fn handle(&self) -> NativeHandle {
        self.handle
    }
}

/// Owning registry of views, keyed by [`ViewId`].
#[derive(Debug, Default)]
pub struct ViewTree {
    views: HashMap<ViewId, View>,
    next_id: u64,
}

impl ViewTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a view for the given native handle and return its id.
    pub fn create(&mut self, handle: NativeHandle) -> ViewId {
        self.next_id += 1;
        let id = ViewId(self.next_id);
        self.views.insert(id, View::new(handle));
        id
    }

    /// Remove a view. Returns the removed state, if any.
    pub fn remove(&mut self, id: ViewId) -> Option<View> {
        self.views.remove(&id)
    }

    pub fn get(&self, id: ViewId) -> Option<&View> {
        self.views.get(&id)
    }

    pub fn get_mut(&mut self, id: ViewId) -> Option<&mut View> {
        self.views.get_mut(&id)
    }

    pub fn contains(&self, id: ViewId) -> bool {
        self.views.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}

//! Platform-neutral widget and view model for the Vela toolkit.
//!
//! This crate defines the state that native platform renderers consume:
//! - **Views**: the animatable target surface (opacity, background color,
//!   translate, rotate, scale) plus an opaque native handle per view.
//! - **Action bar**: a thin observable-properties container (title,
//!   navigation button, action items) rendered by native OS toolbars.
//! - **Colors and transforms**: the value types carried by view properties
//!   and property animations.
//! - **Fonts**: font descriptors and the system font-set cache.
//!
//! Nothing in this crate talks to a platform directly; hosts drain change
//! events and mirror the state into native widgets.

pub mod action_bar;
pub mod color;
pub mod font;
pub mod geometry;
pub mod transform;
pub mod view;

pub use action_bar::{ActionBar, ActionBarError, ActionBarEvent, ActionItem};
pub use color::Color;
pub use font::{Font, FontMatch, FontProvider, FontStyle, FontWeight, SystemFontSets};
pub use geometry::Vec2;
pub use transform::Affine;
pub use view::{NativeHandle, View, ViewId, ViewTree};

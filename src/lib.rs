//! Vela: a cross-platform mobile UI toolkit core.
//!
//! This facade re-exports the workspace crates:
//! - [`vela_ui`] — the platform-neutral widget/view model (views, colors,
//!   transforms, the action bar, fonts).
//! - [`vela_anim`] — the declarative property-animation engine that maps
//!   abstract property changes onto native animation backends.

pub use vela_anim as anim;
pub use vela_ui as ui;

//! Core animation descriptor types.
//!
//! - [`Property`]: which view property an animation drives (plus the
//!   synthetic `Transform` kind the merger produces and the `Skip` marker
//!   for absorbed entries).
//! - [`Value`]: tagged union over the value shapes a property can take.
//! - [`AnimationDefinition`]: caller-facing input, loosely typed (value and
//!   timing optional) and validated by the runner before dispatch.
//! - [`PropertyAnimation`]: validated runtime descriptor.

use serde::{Deserialize, Serialize};

use vela_ui::{Affine, Color, Vec2, ViewId};

/// An animatable view property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    Opacity,
    BackgroundColor,
    Translate,
    Rotate,
    Scale,
    /// Composite affine transform. Produced by the merger; may also be
    /// supplied directly with a matrix value.
    Transform,
    /// Marks an animation absorbed into a composite so later passes ignore
    /// it. Never animatable.
    Skip,
}

impl Property {
    /// Whether this kind participates in transform merging.
    pub fn is_transform_kind(&self) -> bool {
        matches!(
            self,
            Self::Translate | Self::Rotate | Self::Scale | Self::Transform
        )
    }

    /// The value shape this property expects; `None` for `Skip`.
    pub fn value_kind(&self) -> Option<ValueKind> {
        match self {
            Self::Opacity | Self::Rotate => Some(ValueKind::Scalar),
            Self::Translate | Self::Scale => Some(ValueKind::Vector),
            Self::BackgroundColor => Some(ValueKind::Color),
            Self::Transform => Some(ValueKind::Matrix),
            Self::Skip => None,
        }
    }
}

/// Shape of an animation value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Scalar,
    Vector,
    Color,
    Matrix,
}

/// A destination value for one property animation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Value {
    /// Opacity (0–1) or rotation in degrees.
    Scalar { value: f64 },
    /// Translate offset or scale factors.
    Vector {
        #[serde(flatten)]
        value: Vec2,
    },
    /// Background color.
    Color { value: Color },
    /// Composed affine transform.
    Matrix {
        #[serde(flatten)]
        value: Affine,
    },
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Scalar { .. } => ValueKind::Scalar,
            Self::Vector { .. } => ValueKind::Vector,
            Self::Color { .. } => ValueKind::Color,
            Self::Matrix { .. } => ValueKind::Matrix,
        }
    }

    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar { value } => Some(*value),
            _ => None,
        }
    }

    pub fn as_vector(&self) -> Option<Vec2> {
        match self {
            Self::Vector { value } => Some(*value),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            Self::Color { value } => Some(*value),
            _ => None,
        }
    }

    pub fn as_matrix(&self) -> Option<Affine> {
        match self {
            Self::Matrix { value } => Some(*value),
            _ => None,
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Scalar { value }
    }
}

impl From<Vec2> for Value {
    fn from(value: Vec2) -> Self {
        Self::Vector { value }
    }
}

impl From<Color> for Value {
    fn from(value: Color) -> Self {
        Self::Color { value }
    }
}

impl From<Affine> for Value {
    fn from(value: Affine) -> Self {
        Self::Matrix { value }
    }
}

/// How many times an animation plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IterationCount {
    /// Play the animation `count` times; must be at least 1.
    Count { count: u32 },
    /// Repeat indefinitely.
    Infinite,
}

impl Default for IterationCount {
    fn default() -> Self {
        Self::Count { count: 1 }
    }
}

/// Named easing curve, passed through to the native backend uninterpreted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Curve {
    Linear,
    Ease,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Custom cubic bezier control points.
    CubicBezier { x1: f32, y1: f32, x2: f32, y2: f32 },
}

impl Default for Curve {
    fn default() -> Self {
        Self::Ease
    }
}

/// Whether a runner plays its entries one after another or all at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Playback {
    Sequential,
    Parallel,
}

/// Backend-side defaults applied when a definition leaves timing unset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationDefaults {
    /// Duration used when a definition has none.
    #[serde(default = "default_duration_ms")]
    pub duration_ms: f32,
    /// Curve used when a definition has none.
    #[serde(default)]
    pub curve: Curve,
}

fn default_duration_ms() -> f32 {
    300.0
}

impl Default for AnimationDefaults {
    fn default() -> Self {
        Self {
            duration_ms: default_duration_ms(),
            curve: Curve::default(),
        }
    }
}

/// Caller-facing description of one property change.
///
/// `value` and the timing fields are optional here; the runner validates the
/// whole list before anything is dispatched, so an incomplete definition
/// fails the play attempt without side effects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationDefinition {
    pub target: ViewId,
    pub property: Property,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_ms: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iterations: Option<IterationCount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curve: Option<Curve>,
}

impl AnimationDefinition {
    /// A bare definition with no value; useful when filling fields by hand.
    pub fn new(target: ViewId, property: Property) -> Self {
        Self {
            target,
            property,
            value: None,
            duration_ms: None,
            delay_ms: None,
            iterations: None,
            curve: None,
        }
    }

    fn with_value(target: ViewId, property: Property, value: Value) -> Self {
        Self {
            value: Some(value),
            ..Self::new(target, property)
        }
    }

    /// Animate opacity to `value` (0–1).
    pub fn opacity(target: ViewId, value: f64) -> Self {
        Self::with_value(target, Property::Opacity, value.into())
    }

    /// Animate the background color to `color`.
    pub fn background_color(target: ViewId, color: Color) -> Self {
        Self::with_value(target, Property::BackgroundColor, color.into())
    }

    /// Animate the translation offset to `(x, y)`.
    pub fn translate(target: ViewId, x: f64, y: f64) -> Self {
        Self::with_value(target, Property::Translate, Vec2::new(x, y).into())
    }

    /// Animate the rotation to `degrees`.
    pub fn rotate(target: ViewId, degrees: f64) -> Self {
        Self::with_value(target, Property::Rotate, degrees.into())
    }

    /// Animate the scale factors to `(x, y)`.
    pub fn scale(target: ViewId, x: f64, y: f64) -> Self {
        Self::with_value(target, Property::Scale, Vec2::new(x, y).into())
    }

    /// Animate the composed transform to `matrix` directly.
    pub fn transform(target: ViewId, matrix: Affine) -> Self {
        Self::with_value(target, Property::Transform, matrix.into())
    }

    pub fn duration_ms(mut self, duration_ms: f32) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    pub fn delay_ms(mut self, delay_ms: f32) -> Self {
        self.delay_ms = Some(delay_ms);
        self
    }

    pub fn iterations(mut self, iterations: IterationCount) -> Self {
        self.iterations = Some(iterations);
        self
    }

    pub fn curve(mut self, curve: Curve) -> Self {
        self.curve = Some(curve);
        self
    }
}

/// A validated property animation, ready for merging and dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyAnimation {
    pub target: ViewId,
    pub property: Property,
    pub value: Value,
    pub duration_ms: Option<f32>,
    pub delay_ms: Option<f32>,
    pub iterations: Option<IterationCount>,
    pub curve: Option<Curve>,
}

impl PropertyAnimation {
    /// Identical duration, delay, iteration count, and curve.
    pub fn timing_eq(&self, other: &Self) -> bool {
        self.duration_ms == other.duration_ms
            && self.delay_ms == other.delay_ms
            && self.iterations == other.iterations
            && self.curve == other.curve
    }
}

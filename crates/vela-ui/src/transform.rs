//! 2D affine transforms.
//!
//! [`Affine`] is the opaque matrix value carried by composite transform
//! animations: the animation engine folds consecutive translate/rotate/scale
//! changes into one of these, and native backends apply it to the platform
//! view's transform in a single step.
//!
//! Composition order is significant. `a.then(&b)` applies `a` first and `b`
//! second, so folding a list of operations in encountered order is
//! `acc = acc.then(&op)`.

use serde::{Deserialize, Serialize};

/// A 2D affine transformation matrix.
///
/// Stored as a 3x2 matrix (the bottom row [0, 0, 1] is implicit):
/// ```text
/// | a  c  tx |
/// | b  d  ty |
/// | 0  0  1  |
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Default for Affine {
    fn default() -> Self {
        Self::identity()
    }
}

impl Affine {
    /// The identity transform.
    pub const fn identity() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            tx: 0.0,
            ty: 0.0,
        }
    }

    /// A pure translation.
    pub const fn translation(tx: f64, ty: f64) -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            tx,
            ty,
        }
    }

    /// A pure (possibly non-uniform) scale.
    pub const fn scaling(sx: f64, sy: f64) -> Self {
        Self {
            a: sx,
            b: 0.0,
            c: 0.0,
            d: sy,
            tx: 0.0,
            ty: 0.0,
        }
    }

    /// A pure rotation, angle in radians.
    pub fn rotation(angle_rad: f64) -> Self {
        let (sin, cos) = angle_rad.sin_cos();
        Self {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            tx: 0.0,
            ty: 0.0,
        }
    }

    /// A pure rotation, angle in degrees.
    pub fn rotation_deg(angle_deg: f64) -> Self {
        Self::rotation(angle_deg.to_radians())
    }

    /// Compose: apply `self` first, then `later`.
    pub fn then(&self, later: &Self) -> Self {
        Self {
            a: later.a * self.a + later.c * self.b,
            b: later.b * self.a + later.d * self.b,
            c: later.a * self.c + later.c * self.d,
            d: later.b * self.c + later.d * self.d,
            tx: later.a * self.tx + later.c * self.ty + later.tx,
            ty: later.b * self.tx + later.d * self.ty + later.ty,
        }
    }

    /// Transform a point.
    pub fn apply_point(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.tx,
            self.b * x + self.d * y + self.ty,
        )
    }

    /// Approximately the identity transform.
    pub fn is_identity(&self, epsilon: f64) -> bool {
        self.approx_eq(&Self::identity(), epsilon)
    }

    /// Element-wise comparison within `epsilon`.
    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        (self.a - other.a).abs() < epsilon
            && (self.b - other.b).abs() < epsilon
            && (self.c - other.c).abs() < epsilon
            && (self.d - other.d).abs() < epsilon
            && (self.tx - other.tx).abs() < epsilon
            && (self.ty - other.ty).abs() < epsilon
    }
}

//! Transform-animation merging.
//!
//! Native platforms animate a view's transform as a single matrix, so a list
//! like `[translate, rotate]` on one view must become one composite
//! animation rather than two competing ones. The merge pass scans left to
//! right: each unabsorbed transform-kind animation starts a composite
//! [`Property::Transform`] entry, then absorbs every later transform-kind
//! animation with the same target and identical timing and curve. Absorbed
//! entries are marked [`Property::Skip`]. Composition happens in encountered
//! order; matrix composition is not commutative.
//!
//! Non-transform animations pass through untouched, keeping their position
//! relative to the merge roots.

use tracing::{debug, trace};

use vela_ui::Affine;

use crate::error::AnimationError;
use crate::types::{Property, PropertyAnimation, Value};

/// Apply one transform-kind animation onto `matrix`.
///
/// Rotation values are degrees and are converted to radians here. Rejects
/// non-transform kinds (and mismatched value shapes) with
/// [`AnimationError::UnsupportedProperty`].
pub fn compose(
    matrix: Affine,
    property: Property,
    value: &Value,
) -> Result<Affine, AnimationError> {
    match (property, value) {
        (Property::Translate, Value::Vector { value: v }) => {
            Ok(matrix.then(&Affine::translation(v.x, v.y)))
        }
        (Property::Rotate, Value::Scalar { value: degrees }) => {
            Ok(matrix.then(&Affine::rotation_deg(*degrees)))
        }
        (Property::Scale, Value::Vector { value: v }) => {
            Ok(matrix.then(&Affine::scaling(v.x, v.y)))
        }
        (Property::Transform, Value::Matrix { value: m }) => Ok(matrix.then(m)),
        _ => Err(AnimationError::UnsupportedProperty(property)),
    }
}

fn can_merge(root: &PropertyAnimation, candidate: &PropertyAnimation) -> bool {
    root.property.is_transform_kind()
        && candidate.property.is_transform_kind()
        && root.target == candidate.target
        && root.timing_eq(candidate)
}

/// Collapse compatible transform animations into composite entries.
///
/// The output preserves input order: non-transform animations keep their
/// positions, and each composite takes the position of its first
/// contributor. Entries already marked `Skip` are dropped. The pass is
/// idempotent — composites are transform-kind and merge with nothing unless
/// a compatible neighbor remains.
pub fn merge_transform_animations(
    mut animations: Vec<PropertyAnimation>,
) -> Result<Vec<PropertyAnimation>, AnimationError> {
    let mut result = Vec::with_capacity(animations.len());

    for i in 0..animations.len() {
        if animations[i].property == Property::Skip {
            continue;
        }

        if !animations[i].property.is_transform_kind() {
            result.push(animations[i].clone());
            continue;
        }

        let root = animations[i].clone();
        let mut matrix = compose(Affine::identity(), root.property, &root.value)?;

        for j in (i + 1)..animations.len() {
            if can_merge(&root, &animations[j]) {
                trace!(
                    root = ?root.property,
                    absorbed = ?animations[j].property,
                    target = ?root.target,
                    "merging transform animations"
                );
                matrix = compose(matrix, animations[j].property, &animations[j].value)?;
                animations[j].property = Property::Skip;
            }
        }

        result.push(PropertyAnimation {
            target: root.target,
            property: Property::Transform,
            value: Value::from(matrix),
            duration_ms: root.duration_ms,
            delay_ms: root.delay_ms,
            iterations: root.iterations,
            curve: root.curve,
        });
    }

    debug!(
        input = animations.len(),
        output = result.len(),
        "merged transform animations"
    );
    Ok(result)
}

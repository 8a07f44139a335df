//! One-time framing of a loaded asset

use super::graph::{NodeId, SceneGraph};
use crate::math::{BoundingBox, Vec3};

/// Result of normalizing a node
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Normalization {
    /// Content bounds before framing, in the node's local frame
    pub source_bounds: BoundingBox,
    /// Uniform scale written to the node
    pub scale: f32,
    /// Position written to the node
    pub offset: Vec3,
}

/// Center the content of `id` at its parent's origin and scale it so the
/// largest axis spans `desired_size`
///
/// Writes only `id`'s own position and scale. Content bounds are measured
/// without that transform, so calling this again on an already-normalized
/// node rewrites the same values. A zero-sized asset keeps scale 1. Returns
/// None when the node doesn't exist or has no geometry below it.
pub fn normalize_to_size(
    graph: &mut SceneGraph,
    id: NodeId,
    desired_size: f32,
    vertical_offset: f32,
) -> Option<Normalization> {
    let bounds = graph.content_bounds(id);
    if bounds.is_empty() {
        return None;
    }

    let max_axis = bounds.size().max_element();
    let scale = if max_axis > f32::EPSILON {
        desired_size / max_axis
    } else {
        1.0
    };
    let offset = -(bounds.center() * scale) + Vec3::new(0.0, vertical_offset, 0.0);

    let object = graph.object_mut(id)?;
    object.scale = Vec3::splat(scale);
    object.position = offset;

    Some(Normalization {
        source_bounds: bounds,
        scale,
        offset,
    })
}

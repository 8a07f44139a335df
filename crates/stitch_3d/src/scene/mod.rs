//! Scene graph components

mod graph;
mod normalize;
mod object3d;

pub use graph::{NodeId, SceneGraph, SceneNode};
pub use normalize::{normalize_to_size, Normalization};
pub use object3d::Object3D;

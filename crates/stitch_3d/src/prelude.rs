//! Common imports for configurator code
//!
//! ```rust
//! use stitch_3d::prelude::*;
//! ```

pub use crate::animation::Smoothing;
pub use crate::loader::{AssetCache, AssetLoader, LoadError, LoaderRegistry};
pub use crate::math::{BoundingBox, Mat4, Quat, Vec3};
pub use crate::scene::{normalize_to_size, NodeId, Normalization, Object3D, SceneGraph, SceneNode};

#[cfg(feature = "loader-gltf")]
pub use crate::loader::GltfLoader;

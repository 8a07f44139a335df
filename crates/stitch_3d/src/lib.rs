//! # Stitch 3D
//!
//! Scene-graph plumbing for the Stitch product configurator.
//!
//! This crate provides:
//! - **Math** primitives (`Vec3`, `Mat4`, `Quat`, `BoundingBox`)
//! - **Scene graph** with named nodes, local transforms and visibility flags
//! - **Asset loading** through the [`loader::AssetLoader`] trait, with a glTF
//!   implementation and a path-keyed cache for preloading
//! - **Smoothing** helpers for frame-driven interpolation
//!
//! Rendering is left to the host: it reads the scene graph each frame and
//! draws whatever is visible.
//!
//! ## Quick Start
//!
//! ```rust
//! use stitch_3d::prelude::*;
//!
//! let mut graph = SceneGraph::new("wallet");
//! let root = graph.add_root(SceneNode::named("WALLET"));
//! let pocket = graph
//!     .add_child(root, SceneNode::named("MONEY_POCKET"))
//!     .unwrap();
//!
//! assert_eq!(graph.find_by_name("MONEY_POCKET"), Some(pocket));
//! ```

// Math utilities
pub mod math;

// Scene graph
pub mod scene;

// Asset loading and caching
pub mod loader;

// Frame-driven smoothing
pub mod animation;

// Prelude for common imports
pub mod prelude;

// Re-export core types at crate root
pub use animation::Smoothing;
pub use loader::{AssetCache, AssetLoader, LoadError, LoaderRegistry};
pub use math::{BoundingBox, Mat4, Quat, Vec3};
pub use scene::{normalize_to_size, NodeId, Normalization, Object3D, SceneGraph, SceneNode};

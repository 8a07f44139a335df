//! Math utilities for 3D graphics

mod bounds;
mod quat;
mod vec;

pub use bounds::BoundingBox;
pub use quat::Quat;
pub use vec::{Mat4, Vec3};

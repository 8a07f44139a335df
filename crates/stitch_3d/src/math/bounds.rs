//! Axis-aligned bounds for asset framing

use super::vec::{Mat4, Vec3};

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

impl BoundingBox {
    /// Create an empty bounding box
    pub fn empty() -> Self {
        Self {
            min: Vec3::splat(f32::INFINITY),
            max: Vec3::splat(f32::NEG_INFINITY),
        }
    }

    /// Create from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create from center and half-extents
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Check if the bounding box is empty
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Get the center point
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the size (width, height, depth)
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Expand to include a point
    pub fn expand_to_include(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Merge with another bounding box
    pub fn merge(&mut self, other: &BoundingBox) {
        if other.is_empty() {
            return;
        }
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// Check if a point is inside
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Get the 8 corner vertices
    pub fn corners(&self) -> [Vec3; 8] {
        [
            Vec3::new(self.min.x, self.min.y, self.min.z),
            Vec3::new(self.max.x, self.min.y, self.min.z),
            Vec3::new(self.min.x, self.max.y, self.min.z),
            Vec3::new(self.max.x, self.max.y, self.min.z),
            Vec3::new(self.min.x, self.min.y, self.max.z),
            Vec3::new(self.max.x, self.min.y, self.max.z),
            Vec3::new(self.min.x, self.max.y, self.max.z),
            Vec3::new(self.max.x, self.max.y, self.max.z),
        ]
    }

    /// Axis-aligned box enclosing this box after `matrix` is applied
    pub fn transformed(&self, matrix: &Mat4) -> BoundingBox {
        if self.is_empty() {
            return *self;
        }
        let mut out = BoundingBox::empty();
        for corner in self.corners() {
            out.expand_to_include(matrix.transform_point(corner));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box() {
        let bbox = BoundingBox::new(Vec3::splat(-1.0), Vec3::splat(1.0));

        assert!(bbox.contains_point(Vec3::ZERO));
        assert!(!bbox.contains_point(Vec3::new(2.0, 0.0, 0.0)));
        assert_eq!(bbox.center(), Vec3::ZERO);
        assert_eq!(bbox.size(), Vec3::splat(2.0));
    }

    #[test]
    fn test_merge_ignores_empty() {
        let mut bbox = BoundingBox::new(Vec3::ZERO, Vec3::ONE);
        bbox.merge(&BoundingBox::empty());
        assert_eq!(bbox, BoundingBox::new(Vec3::ZERO, Vec3::ONE));

        let mut acc = BoundingBox::empty();
        acc.merge(&bbox);
        assert_eq!(acc, bbox);
    }

    #[test]
    fn test_transformed() {
        let bbox = BoundingBox::new(Vec3::ZERO, Vec3::ONE);
        let m = Mat4::translation(Vec3::new(2.0, 0.0, 0.0)).mul(&Mat4::scale(Vec3::splat(3.0)));
        let out = bbox.transformed(&m);
        assert_eq!(out.min, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(out.max, Vec3::new(5.0, 3.0, 3.0));
    }
}

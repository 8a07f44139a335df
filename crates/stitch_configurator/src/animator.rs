//! Displayed pose animation
//!
//! The wallet never jumps between views. Every frame the displayed pose
//! moves a fraction of the way toward the active view's target: position by
//! linear interpolation, orientation by shortest-arc slerp. In the 360 view
//! there is no target; the pose yaws about the world up axis at a fixed
//! rate while its position drifts back to the origin.

use crate::settings::MotionSettings;
use crate::view::{View, ViewTarget, ViewTargetResolver};
use std::f32::consts::TAU;
use stitch_3d::{Object3D, Quat, Smoothing, Vec3};

/// Pose currently shown on screen
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayedPose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Default for DisplayedPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        }
    }
}

impl DisplayedPose {
    /// Positional distance and rotation angle (radians) to a target
    pub fn error_to(&self, target: &ViewTarget) -> (f32, f32) {
        (
            self.position.distance(target.position),
            self.orientation.angle_to(target.orientation),
        )
    }
}

/// Chases the active view's target one frame at a time
#[derive(Clone, Debug)]
pub struct PoseAnimator {
    pose: DisplayedPose,
    resolver: ViewTargetResolver,
    smoothing: Smoothing,
    spin_rate: f32,
    spin_position_factor: f32,
    spin_angle: f32,
}

impl PoseAnimator {
    /// Start at the identity pose
    pub fn new(resolver: ViewTargetResolver, motion: &MotionSettings) -> Self {
        Self {
            pose: DisplayedPose::default(),
            resolver,
            smoothing: motion.smoothing,
            spin_rate: motion.spin_rate,
            spin_position_factor: motion.spin_position_factor.clamp(0.0, 1.0),
            spin_angle: 0.0,
        }
    }

    pub fn pose(&self) -> DisplayedPose {
        self.pose
    }

    pub fn resolver(&self) -> &ViewTargetResolver {
        &self.resolver
    }

    /// Total yaw applied by the 360 view, wrapped to `[0, 2π)`
    pub fn spin_angle(&self) -> f32 {
        self.spin_angle
    }

    /// Advance one frame of `delta` seconds toward `view`
    ///
    /// A negative or non-finite `delta` counts as 0.
    pub fn tick(&mut self, delta: f32, view: View) -> DisplayedPose {
        let dt = if delta.is_finite() { delta.max(0.0) } else { 0.0 };
        let target = self.resolver.resolve(view);

        if target.continuous_rotation {
            let yaw = self.spin_rate * dt;
            self.pose.orientation = (Quat::from_rotation_y(yaw) * self.pose.orientation).normalize();
            self.spin_angle = (self.spin_angle + yaw).rem_euclid(TAU);
            self.pose.position = self
                .pose
                .position
                .lerp(target.position, self.spin_position_factor);
        } else {
            let alpha = self.smoothing.alpha(dt);
            self.pose.position = self.pose.position.lerp(target.position, alpha);
            self.pose.orientation = self
                .pose
                .orientation
                .slerp(target.orientation, alpha)
                .normalize();
        }

        self.pose
    }

    /// Jump straight to a view's target
    pub fn snap_to(&mut self, view: View) {
        let target = self.resolver.resolve(view);
        self.pose = DisplayedPose {
            position: target.position,
            orientation: target.orientation,
        };
    }

    /// Whether the pose is within `tolerance` of a fixed view's target
    pub fn is_settled(&self, view: View, tolerance: f32) -> bool {
        let target = self.resolver.resolve(view);
        if target.continuous_rotation {
            return false;
        }
        let (distance, angle) = self.pose.error_to(&target);
        distance <= tolerance && angle <= tolerance
    }

    /// Write the pose into a scene object
    pub fn apply_to(&self, object: &mut Object3D) {
        object.position = self.pose.position;
        object.rotation = self.pose.orientation;
    }
}

impl Default for PoseAnimator {
    fn default() -> Self {
        Self::new(ViewTargetResolver::default(), &MotionSettings::default())
    }
}

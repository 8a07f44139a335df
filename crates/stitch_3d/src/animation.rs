//! Frame-driven smoothing
//!
//! Exponential smoothing toward a target: every frame the current value
//! moves a fraction `alpha` of the remaining distance.

use serde::{Deserialize, Serialize};

/// Per-frame interpolation weight policy
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Smoothing {
    /// Fixed weight per call, independent of elapsed time
    PerFrame {
        /// Weight in `(0, 1]`
        factor: f32,
    },
    /// Weight scaled by elapsed time so that `factor` is applied once per
    /// `1 / reference_fps` seconds
    TimeScaled {
        /// Weight in `(0, 1]` at the reference frame rate
        factor: f32,
        /// Frame rate at which `factor` is exact
        reference_fps: f32,
        /// Longest frame step taken into account (seconds)
        max_delta: f32,
    },
}

impl Default for Smoothing {
    fn default() -> Self {
        Smoothing::PerFrame { factor: 0.12 }
    }
}

impl Smoothing {
    /// Fixed per-call smoothing
    pub fn per_frame(factor: f32) -> Self {
        Smoothing::PerFrame { factor }
    }

    /// Time-corrected smoothing at 60 fps reference, ignoring hitches
    /// longer than 100 ms
    pub fn time_scaled(factor: f32) -> Self {
        Smoothing::TimeScaled {
            factor,
            reference_fps: 60.0,
            max_delta: 0.1,
        }
    }

    /// Configured weight at the reference frame rate
    pub fn factor(&self) -> f32 {
        match *self {
            Smoothing::PerFrame { factor } | Smoothing::TimeScaled { factor, .. } => factor,
        }
    }

    /// Interpolation weight for a frame that took `delta` seconds
    ///
    /// Always in `[0, 1]`; a negative or non-finite `delta` gives 0 in
    /// time-scaled mode.
    pub fn alpha(&self, delta: f32) -> f32 {
        match *self {
            Smoothing::PerFrame { factor } => factor.clamp(0.0, 1.0),
            Smoothing::TimeScaled {
                factor,
                reference_fps,
                max_delta,
            } => {
                let factor = factor.clamp(0.0, 1.0);
                if factor >= 1.0 {
                    return 1.0;
                }
                let dt = if delta.is_finite() { delta.clamp(0.0, max_delta) } else { 0.0 };
                let frames = dt * reference_fps;
                (1.0 - (1.0 - factor).powf(frames)).clamp(0.0, 1.0)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_frame_ignores_delta() {
        let s = Smoothing::per_frame(0.12);
        assert_eq!(s.alpha(0.001), 0.12);
        assert_eq!(s.alpha(1.0), 0.12);
    }

    #[test]
    fn test_time_scaled_matches_reference_rate() {
        let s = Smoothing::time_scaled(0.12);
        assert!((s.alpha(1.0 / 60.0) - 0.12).abs() < 1e-4);

        // Two half-length frames cover the same distance as one full frame
        let half = s.alpha(1.0 / 120.0);
        let remaining = (1.0 - half) * (1.0 - half);
        assert!((1.0 - remaining - 0.12).abs() < 1e-4);
    }

    #[test]
    fn test_time_scaled_handles_bad_delta() {
        let s = Smoothing::time_scaled(0.12);
        assert_eq!(s.alpha(-1.0), 0.0);
        assert_eq!(s.alpha(f32::NAN), 0.0);
        assert_eq!(s.alpha(10.0), s.alpha(0.1));
    }
}

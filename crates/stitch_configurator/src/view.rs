//! Camera-framing views and their static pose targets

use crate::settings::ViewSettings;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use stitch_3d::{Quat, Vec3};
use tracing::warn;

/// Framing selected by the customer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    #[default]
    Front,
    Back,
    Detail,
    /// Continuous turntable rotation
    #[serde(rename = "360")]
    Spin,
}

/// View selector that isn't one of the four views
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownView(pub String);

impl fmt::Display for UnknownView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown view: {}", self.0)
    }
}

impl std::error::Error for UnknownView {}

impl View {
    pub const ALL: [View; 4] = [View::Front, View::Back, View::Detail, View::Spin];

    pub fn as_str(self) -> &'static str {
        match self {
            View::Front => "front",
            View::Back => "back",
            View::Detail => "detail",
            View::Spin => "360",
        }
    }

    /// Parse a selector, falling back to [`View::Front`] on anything unknown
    pub fn parse_or_front(s: &str) -> View {
        s.parse().unwrap_or_else(|err: UnknownView| {
            warn!(selector = %err.0, "invalid view selector, using front");
            View::Front
        })
    }

    pub fn label_key(self) -> String {
        format!("views.{}", self.as_str())
    }

    fn index(self) -> usize {
        match self {
            View::Front => 0,
            View::Back => 1,
            View::Detail => 2,
            View::Spin => 3,
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = UnknownView;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        View::ALL
            .into_iter()
            .find(|view| view.as_str() == s)
            .ok_or_else(|| UnknownView(s.to_string()))
    }
}

/// Where the wallet should settle for a view
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTarget {
    pub position: Vec3,
    pub orientation: Quat,
    /// The pose spins instead of settling; `orientation` is ignored
    pub continuous_rotation: bool,
}

/// Precomputed targets for every view
///
/// The base tilt is applied first in the object's frame; view rotations are
/// then applied about world axes, yaw after pitch.
#[derive(Clone, Debug)]
pub struct ViewTargetResolver {
    targets: [ViewTarget; 4],
}

impl ViewTargetResolver {
    pub fn new(settings: &ViewSettings) -> Self {
        let base = Quat::from_rotation_x(settings.base_tilt);
        let fixed = |position: Vec3, view_rotation: Quat| ViewTarget {
            position,
            orientation: (view_rotation * base).normalize(),
            continuous_rotation: false,
        };

        let front = fixed(Vec3::ZERO, Quat::IDENTITY);
        let back = fixed(Vec3::ZERO, Quat::from_rotation_y(settings.back_yaw));
        let detail = fixed(
            settings.detail_offset,
            Quat::from_rotation_y(settings.detail_yaw) * Quat::from_rotation_x(settings.detail_pitch),
        );
        let spin = ViewTarget {
            position: Vec3::ZERO,
            orientation: base,
            continuous_rotation: true,
        };

        Self {
            targets: [front, back, detail, spin],
        }
    }

    pub fn resolve(&self, view: View) -> ViewTarget {
        self.targets[view.index()]
    }

    /// Resolve a raw selector; unknown selectors get the front target
    pub fn resolve_named(&self, selector: &str) -> ViewTarget {
        self.resolve(View::parse_or_front(selector))
    }
}

impl Default for ViewTargetResolver {
    fn default() -> Self {
        Self::new(&ViewSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_quat(a: Quat, b: Quat) -> bool {
        a.angle_to(b) < 1e-4
    }

    #[test]
    fn test_selector_strings() {
        assert_eq!("360".parse::<View>(), Ok(View::Spin));
        assert_eq!("detail".parse::<View>(), Ok(View::Detail));
        assert!("Front".parse::<View>().is_err());
        assert_eq!(View::parse_or_front("sideways"), View::Front);
        assert_eq!(View::Spin.label_key(), "views.360");
    }

    #[test]
    fn test_front_is_base_tilt() {
        let resolver = ViewTargetResolver::default();
        let front = resolver.resolve(View::Front);
        assert_eq!(front.position, Vec3::ZERO);
        assert!(!front.continuous_rotation);
        assert!(approx_quat(front.orientation, Quat::from_rotation_x(1.6)));
    }

    #[test]
    fn test_back_is_half_turn_from_front() {
        let resolver = ViewTargetResolver::default();
        let front = resolver.resolve(View::Front).orientation;
        let back = resolver.resolve(View::Back).orientation;
        assert!((front.angle_to(back) - std::f32::consts::PI).abs() < 1e-4);
    }

    #[test]
    fn test_detail_composes_yaw_pitch_then_base() {
        let resolver = ViewTargetResolver::default();
        let detail = resolver.resolve(View::Detail);
        let expected = Quat::from_rotation_y(-0.85)
            * Quat::from_rotation_x(0.4)
            * Quat::from_rotation_x(1.6);
        assert!(approx_quat(detail.orientation, expected));
        assert_eq!(detail.position, Vec3::new(-0.15, 0.0, 0.9));
    }

    #[test]
    fn test_spin_is_continuous() {
        let resolver = ViewTargetResolver::default();
        assert!(resolver.resolve(View::Spin).continuous_rotation);
        assert_eq!(resolver.resolve(View::Spin).position, Vec3::ZERO);
    }

    #[test]
    fn test_unknown_selector_resolves_front() {
        let resolver = ViewTargetResolver::default();
        assert_eq!(resolver.resolve_named("top"), resolver.resolve(View::Front));
    }
}

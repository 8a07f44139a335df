//! Configurator settings
//!
//! Every tunable of the configurator lives here, grouped by concern. All
//! fields default to the storefront's production values, so an empty TOML
//! document is a valid settings file:
//!
//! ```toml
//! [motion]
//! spin_rate = 0.6
//!
//! [motion.smoothing]
//! mode = "time_scaled"
//! factor = 0.12
//! reference_fps = 60.0
//! max_delta = 0.1
//!
//! [asset]
//! path = "models/WALLET.glb"
//! desired_size = 1.6
//! ```

use crate::error::SettingsError;
use serde::{Deserialize, Serialize};
use stitch_3d::{Smoothing, Vec3};
use std::fs;
use std::path::Path;

/// Root settings document
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfiguratorSettings {
    pub motion: MotionSettings,
    pub views: ViewSettings,
    pub asset: AssetSettings,
}

/// How the displayed pose chases its target
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionSettings {
    /// Interpolation weight policy for fixed views
    pub smoothing: Smoothing,
    /// Yaw rate in the 360 view (radians per second)
    pub spin_rate: f32,
    /// Per-frame weight pulling the position back to the origin in the 360 view
    pub spin_position_factor: f32,
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            smoothing: Smoothing::default(),
            spin_rate: 0.6,
            spin_position_factor: 0.1,
        }
    }
}

/// Framing angles and offsets for the fixed views
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    /// Rotation about +X that lays the wallet face-on (radians)
    pub base_tilt: f32,
    /// World yaw of the back view (radians)
    pub back_yaw: f32,
    /// World yaw of the detail view (radians)
    pub detail_yaw: f32,
    /// World pitch of the detail view (radians)
    pub detail_pitch: f32,
    /// Position of the detail view
    pub detail_offset: Vec3,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            base_tilt: 1.6,
            back_yaw: std::f32::consts::PI,
            detail_yaw: -0.85,
            detail_pitch: 0.4,
            detail_offset: Vec3::new(-0.15, 0.0, 0.9),
        }
    }
}

/// Which asset to show and how to frame it
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetSettings {
    /// Model file, relative to the asset root
    pub path: String,
    /// Length of the longest axis after normalization
    pub desired_size: f32,
    /// Vertical shift applied after centering
    pub vertical_offset: f32,
    /// Number of parsed assets kept in memory
    pub cache_capacity: usize,
}

impl Default for AssetSettings {
    fn default() -> Self {
        Self {
            path: "models/WALLET.glb".to_string(),
            desired_size: 1.6,
            vertical_offset: 0.0,
            cache_capacity: 16,
        }
    }
}

impl ConfiguratorSettings {
    /// Parse and validate settings from a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Render as a TOML document
    pub fn to_toml_string(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), SettingsError> {
        let factor = self.motion.smoothing.factor();
        if !(factor > 0.0 && factor <= 1.0) {
            return Err(invalid("motion.smoothing.factor", format!("{factor} is not in (0, 1]")));
        }
        if let Smoothing::TimeScaled {
            reference_fps,
            max_delta,
            ..
        } = self.motion.smoothing
        {
            if !(reference_fps > 0.0 && reference_fps.is_finite()) {
                return Err(invalid(
                    "motion.smoothing.reference_fps",
                    format!("{reference_fps} must be positive"),
                ));
            }
            if !(max_delta > 0.0 && max_delta.is_finite()) {
                return Err(invalid(
                    "motion.smoothing.max_delta",
                    format!("{max_delta} must be positive"),
                ));
            }
        }
        if !self.motion.spin_rate.is_finite() {
            return Err(invalid("motion.spin_rate", "must be finite".to_string()));
        }
        let pf = self.motion.spin_position_factor;
        if !(0.0..=1.0).contains(&pf) {
            return Err(invalid("motion.spin_position_factor", format!("{pf} is not in [0, 1]")));
        }

        let angles = [
            ("views.base_tilt", self.views.base_tilt),
            ("views.back_yaw", self.views.back_yaw),
            ("views.detail_yaw", self.views.detail_yaw),
            ("views.detail_pitch", self.views.detail_pitch),
        ];
        for (field, value) in angles {
            if !value.is_finite() {
                return Err(invalid(field, "must be finite".to_string()));
            }
        }
        if !self.views.detail_offset.is_finite() {
            return Err(invalid("views.detail_offset", "must be finite".to_string()));
        }

        if self.asset.path.trim().is_empty() {
            return Err(invalid("asset.path", "must not be empty".to_string()));
        }
        let size = self.asset.desired_size;
        if !(size > 0.0 && size.is_finite()) {
            return Err(invalid("asset.desired_size", format!("{size} must be positive")));
        }
        if !self.asset.vertical_offset.is_finite() {
            return Err(invalid("asset.vertical_offset", "must be finite".to_string()));
        }
        if self.asset.cache_capacity == 0 {
            return Err(invalid("asset.cache_capacity", "must be at least 1".to_string()));
        }

        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> SettingsError {
    SettingsError::Invalid { field, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_gives_defaults() {
        let settings = ConfiguratorSettings::from_toml_str("").unwrap();
        assert_eq!(settings, ConfiguratorSettings::default());
        assert_eq!(settings.motion.smoothing, Smoothing::per_frame(0.12));
        assert_eq!(settings.asset.desired_size, 1.6);
    }

    #[test]
    fn test_partial_override() {
        let settings = ConfiguratorSettings::from_toml_str(
            r#"
            [motion]
            spin_rate = 1.2

            [motion.smoothing]
            mode = "time_scaled"
            factor = 0.2
            reference_fps = 30.0
            max_delta = 0.05

            [asset]
            vertical_offset = -0.3
            "#,
        )
        .unwrap();

        assert_eq!(settings.motion.spin_rate, 1.2);
        assert_eq!(settings.motion.spin_position_factor, 0.1);
        assert_eq!(
            settings.motion.smoothing,
            Smoothing::TimeScaled {
                factor: 0.2,
                reference_fps: 30.0,
                max_delta: 0.05,
            }
        );
        assert_eq!(settings.asset.vertical_offset, -0.3);
        assert_eq!(settings.asset.path, "models/WALLET.glb");
        assert_eq!(settings.views, ViewSettings::default());
    }

    #[test]
    fn test_defaults_survive_toml() {
        let text = ConfiguratorSettings::default().to_toml_string().unwrap();
        let parsed = ConfiguratorSettings::from_toml_str(&text).unwrap();
        assert_eq!(parsed, ConfiguratorSettings::default());
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let err = ConfiguratorSettings::from_toml_str(
            "[motion.smoothing]\nmode = \"per_frame\"\nfactor = 1.5\n",
        )
        .unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "motion.smoothing.factor", .. }));

        let err = ConfiguratorSettings::from_toml_str("[asset]\ndesired_size = 0.0\n").unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "asset.desired_size", .. }));
    }

    #[test]
    fn test_malformed_toml() {
        let err = ConfiguratorSettings::from_toml_str("[motion\nspin_rate = ").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }
}

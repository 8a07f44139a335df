//! # Stitch Configurator
//!
//! Core of the wallet 3D configurator: the customer's selections, the
//! camera-framing views, the pose animation that moves between them and the
//! visibility of optional parts.
//!
//! Everything runs on the host's frame callback:
//!
//! 1. input handlers mutate a [`WalletConfig`]
//! 2. [`FrameDriver::frame`] resolves the active view's target, steps the
//!    [`PoseAnimator`] toward it and applies the part selection to the
//!    session's scene graph
//! 3. the host draws the graph
//!
//! ## Example
//!
//! ```rust
//! use stitch_configurator::prelude::*;
//!
//! let mut session = Configurator::new(&ConfiguratorSettings::default());
//! session.attach_asset(&stitch_configurator::demo::wallet_scene());
//!
//! session.handle_str("drop MONEY_POCKET").unwrap();
//! session.handle_str("view detail").unwrap();
//! assert_eq!(session.frame(1.0 / 60.0), FrameOutcome::Drawn);
//!
//! assert_eq!(session.driver().part_visible(PartId::MoneyPocket), Some(true));
//! ```

pub mod animator;
pub mod demo;
pub mod driver;
pub mod error;
pub mod event;
pub mod part;
pub mod session;
pub mod settings;
pub mod state;
pub mod view;
pub mod visibility;

pub use animator::{DisplayedPose, PoseAnimator};
pub use driver::{AssetState, FrameDriver, FrameHook, FrameOutcome};
pub use error::{ConfigError, Result, SettingsError};
pub use event::InputEvent;
pub use part::{EnabledParts, PartId, ANCHOR_NODE};
pub use session::Configurator;
pub use settings::{AssetSettings, ConfiguratorSettings, MotionSettings, ViewSettings};
pub use state::{ConfigSummary, Gender, Stitching, WalletConfig, WizardStep, CLASSIC_BASE_MODEL};
pub use view::{View, ViewTarget, ViewTargetResolver};
pub use visibility::PartBindings;

/// Common imports for hosts embedding the configurator
pub mod prelude {
    pub use crate::animator::{DisplayedPose, PoseAnimator};
    pub use crate::driver::{AssetState, FrameDriver, FrameOutcome};
    pub use crate::error::{ConfigError, SettingsError};
    pub use crate::event::InputEvent;
    pub use crate::part::{EnabledParts, PartId};
    pub use crate::session::Configurator;
    pub use crate::settings::ConfiguratorSettings;
    pub use crate::state::{Gender, Stitching, WalletConfig, WizardStep};
    pub use crate::view::View;
}

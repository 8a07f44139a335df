//! One customer's configurator session

use crate::driver::{FrameDriver, FrameOutcome};
use crate::error::Result;
use crate::event::InputEvent;
use crate::settings::ConfiguratorSettings;
use crate::state::WalletConfig;
use std::sync::Arc;
use stitch_3d::loader::{LoadError, LoaderRegistry};
use stitch_3d::SceneGraph;
use tracing::{debug, warn};

/// Selection state plus the frame driver that renders it
///
/// Sessions never share mutable state; several can be built from the same
/// cached asset.
pub struct Configurator {
    config: WalletConfig,
    driver: FrameDriver,
}

impl Configurator {
    /// Start an empty session with no asset attached
    pub fn new(settings: &ConfiguratorSettings) -> Self {
        Self {
            config: WalletConfig::new(),
            driver: FrameDriver::new(settings),
        }
    }

    /// Start a session and attach the configured asset from `registry`
    ///
    /// A load failure is recorded on the driver; the session still works
    /// and renders without the wallet.
    pub fn with_registry(settings: &ConfiguratorSettings, registry: &mut LoaderRegistry) -> Self {
        let mut session = Self::new(settings);
        session.driver.on_asset_loaded(registry.load(&settings.asset.path));
        session
    }

    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    /// Direct access to the input handlers
    pub fn config_mut(&mut self) -> &mut WalletConfig {
        &mut self.config
    }

    pub fn driver(&self) -> &FrameDriver {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut FrameDriver {
        &mut self.driver
    }

    pub fn attach_asset(&mut self, asset: &SceneGraph) {
        self.driver.attach_asset(asset);
    }

    pub fn on_asset_loaded(&mut self, result: std::result::Result<Arc<SceneGraph>, LoadError>) {
        self.driver.on_asset_loaded(result);
    }

    /// Apply one input event; a rejected event leaves the state untouched
    pub fn handle(&mut self, event: InputEvent) -> Result<()> {
        debug!(?event, "input event");
        self.config.apply(event).map_err(|err| {
            warn!(error = %err, "input event rejected");
            err
        })
    }

    /// Parse and apply an event in its text form
    pub fn handle_str(&mut self, line: &str) -> Result<()> {
        let event = line.parse::<InputEvent>()?;
        self.handle(event)
    }

    pub fn frame(&mut self, delta: f32) -> FrameOutcome {
        self.driver.frame(delta, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo;
    use crate::part::PartId;
    use crate::view::View;

    #[test]
    fn test_events_reach_next_frame() {
        let mut session = Configurator::new(&ConfiguratorSettings::default());
        session.attach_asset(&demo::wallet_scene());

        session.handle_str("drop CARD_HOLDER_3").unwrap();
        session.handle_str("view back").unwrap();
        assert_eq!(session.frame(0.016), FrameOutcome::Drawn);

        assert_eq!(session.driver().part_visible(PartId::CardHolder3), Some(true));
        assert_eq!(session.driver().part_visible(PartId::CardHolder1), Some(false));
        assert_eq!(session.config().active_view(), View::Back);
    }

    #[test]
    fn test_rejected_event_keeps_state() {
        let mut session = Configurator::new(&ConfiguratorSettings::default());
        assert!(session.handle_str("drop WALLET_STRAP").is_err());
        assert!(session.handle_str("confirm").is_err());
        assert_eq!(session.config(), &WalletConfig::new());
    }

    #[test]
    fn test_missing_asset_file() {
        let mut settings = ConfiguratorSettings::default();
        settings.asset.path = "does/not/exist.glb".to_string();
        let mut registry = LoaderRegistry::new();

        let mut session = Configurator::with_registry(&settings, &mut registry);

        assert!(matches!(
            session.driver().asset_state(),
            crate::driver::AssetState::Failed(_)
        ));
        assert_eq!(session.frame(0.016), FrameOutcome::NoAsset);
    }
}

//! Per-frame entry point
//!
//! The host calls [`FrameDriver::frame`] once per rendered frame. The driver
//! owns this session's copy of the wallet scene: a stage group that carries
//! the animated pose, a model node that carries the one-time normalization,
//! and the asset's own hierarchy grafted below it.
//!
//! ```text
//! configurator   <- pose (position, orientation)
//! └── model      <- normalization (centre, uniform scale)
//!     └── WALLET ...
//! ```

use crate::animator::{DisplayedPose, PoseAnimator};
use crate::part::PartId;
use crate::settings::{AssetSettings, ConfiguratorSettings};
use crate::state::WalletConfig;
use crate::view::ViewTargetResolver;
use crate::visibility::PartBindings;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use stitch_3d::loader::LoadError;
use stitch_3d::{normalize_to_size, NodeId, Normalization, SceneGraph, SceneNode};
use tracing::{debug, error, info, warn};

/// Name of the node that receives the animated pose
pub const STAGE_NODE: &str = "configurator";
/// Name of the node that receives the normalization transform
pub const MODEL_NODE: &str = "model";

/// Callback run at the end of every drawn frame
pub type FrameHook = Box<dyn FnMut(&mut SceneGraph, &DisplayedPose)>;

/// Where the session's asset is in its lifecycle
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AssetState {
    /// Nothing attached yet
    #[default]
    Pending,
    /// Asset instantiated and bound
    Ready,
    /// Loading failed; the scene renders without the wallet
    Failed(String),
}

/// What happened during one call to [`FrameDriver::frame`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Pose and visibility were updated
    Drawn,
    /// No asset attached; nothing was updated
    NoAsset,
    /// The frame panicked and was abandoned
    Skipped,
}

struct Stage {
    graph: SceneGraph,
    group: NodeId,
    model: NodeId,
    bindings: PartBindings,
    normalization: Option<Normalization>,
}

impl Stage {
    fn build(asset: &SceneGraph, settings: &AssetSettings) -> Option<Stage> {
        let mut graph = SceneGraph::new(asset.name());
        let group = graph.add_root(SceneNode::named(STAGE_NODE));
        let model = graph.add_child(group, SceneNode::named(MODEL_NODE))?;
        graph.graft(model, asset)?;

        let normalization =
            normalize_to_size(&mut graph, model, settings.desired_size, settings.vertical_offset);
        if normalization.is_none() {
            warn!(scene = asset.name(), "asset has no geometry, skipping normalization");
        }
        let bindings = PartBindings::bind(&graph);

        Some(Stage {
            graph,
            group,
            model,
            bindings,
            normalization,
        })
    }
}

/// Drives pose animation and part visibility for one configurator session
pub struct FrameDriver {
    asset_settings: AssetSettings,
    animator: PoseAnimator,
    stage: Option<Stage>,
    state: AssetState,
    hooks: Vec<FrameHook>,
    frames_drawn: u64,
}

impl FrameDriver {
    pub fn new(settings: &ConfiguratorSettings) -> Self {
        let resolver = ViewTargetResolver::new(&settings.views);
        Self {
            asset_settings: settings.asset.clone(),
            animator: PoseAnimator::new(resolver, &settings.motion),
            stage: None,
            state: AssetState::Pending,
            hooks: Vec::new(),
            frames_drawn: 0,
        }
    }

    /// Instantiate a loaded asset for this session
    ///
    /// The shared asset is copied, so nothing this session does is visible
    /// to other sessions using the same asset. Attaching again replaces the
    /// previous instance and rebinds parts.
    pub fn attach_asset(&mut self, asset: &SceneGraph) {
        match Stage::build(asset, &self.asset_settings) {
            Some(stage) => {
                info!(
                    scene = asset.name(),
                    nodes = stage.graph.len(),
                    missing_parts = stage.bindings.missing().len(),
                    "asset attached"
                );
                self.stage = Some(stage);
                self.state = AssetState::Ready;
            }
            None => {
                error!(scene = asset.name(), "failed to instantiate asset");
                self.stage = None;
                self.state = AssetState::Failed(format!("could not instantiate {}", asset.name()));
            }
        }
    }

    /// Completion callback for an asynchronous load
    pub fn on_asset_loaded(&mut self, result: Result<Arc<SceneGraph>, LoadError>) {
        match result {
            Ok(asset) => self.attach_asset(&asset),
            Err(err) => {
                error!(error = %err, "asset failed to load, rendering without it");
                self.stage = None;
                self.state = AssetState::Failed(err.to_string());
            }
        }
    }

    /// Register a callback run after each drawn frame
    pub fn add_frame_hook(&mut self, hook: impl FnMut(&mut SceneGraph, &DisplayedPose) + 'static) {
        self.hooks.push(Box::new(hook));
    }

    /// Advance one frame
    ///
    /// Moves the pose toward `config`'s active view and applies its part
    /// selection. A panic anywhere in the frame is contained here and the
    /// frame reported as [`FrameOutcome::Skipped`].
    pub fn frame(&mut self, delta: f32, config: &WalletConfig) -> FrameOutcome {
        let Some(stage) = self.stage.as_mut() else {
            return FrameOutcome::NoAsset;
        };
        let animator = &mut self.animator;
        let hooks = &mut self.hooks;

        let result = catch_unwind(AssertUnwindSafe(|| {
            let pose = animator.tick(delta, config.active_view());
            match stage.graph.object_mut(stage.group) {
                Some(object) => animator.apply_to(object),
                None => debug!("stage node missing, pose not applied"),
            }
            stage.bindings.apply(config.enabled_parts(), &mut stage.graph);
            for hook in hooks.iter_mut() {
                hook(&mut stage.graph, &pose);
            }
        }));

        match result {
            Ok(()) => {
                self.frames_drawn += 1;
                FrameOutcome::Drawn
            }
            Err(_) => {
                error!(frame = self.frames_drawn, "frame panicked, skipping");
                FrameOutcome::Skipped
            }
        }
    }

    pub fn asset_state(&self) -> &AssetState {
        &self.state
    }

    pub fn animator(&self) -> &PoseAnimator {
        &self.animator
    }

    pub fn pose(&self) -> DisplayedPose {
        self.animator.pose()
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// This session's scene, once an asset is attached
    pub fn graph(&self) -> Option<&SceneGraph> {
        self.stage.as_ref().map(|s| &s.graph)
    }

    pub fn stage_node(&self) -> Option<NodeId> {
        self.stage.as_ref().map(|s| s.group)
    }

    pub fn model_node(&self) -> Option<NodeId> {
        self.stage.as_ref().map(|s| s.model)
    }

    pub fn bindings(&self) -> Option<&PartBindings> {
        self.stage.as_ref().map(|s| &s.bindings)
    }

    pub fn normalization(&self) -> Option<Normalization> {
        self.stage.as_ref().and_then(|s| s.normalization)
    }

    /// Current visibility flag of a part's node, if the part is bound
    pub fn part_visible(&self, part: PartId) -> Option<bool> {
        let stage = self.stage.as_ref()?;
        let id = stage.bindings.node(part)?;
        stage.graph.get(id).map(|node| node.object.visible)
    }
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new(&ConfiguratorSettings::default())
    }
}

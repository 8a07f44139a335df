//! Part visibility
//!
//! Parts are looked up by exact node name once per asset instance; after
//! that, applying a selection is a fixed walk over at most five node ids.

use crate::part::{EnabledParts, PartId};
use smallvec::SmallVec;
use stitch_3d::{NodeId, SceneGraph};
use tracing::{debug, warn};

/// Resolved scene nodes for the catalog parts of one asset instance
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PartBindings {
    nodes: [Option<NodeId>; 5],
    missing: SmallVec<[PartId; 5]>,
}

impl PartBindings {
    /// Look up every catalog part in `graph`
    ///
    /// Each part without a matching node is logged here, once, and stays
    /// unbound for the lifetime of these bindings.
    pub fn bind(graph: &SceneGraph) -> Self {
        let mut bindings = Self::default();
        for (slot, part) in PartId::ALL.into_iter().enumerate() {
            match graph.find_by_name(part.node_name()) {
                Some(id) => bindings.nodes[slot] = Some(id),
                None => {
                    warn!(part = %part, scene = graph.name(), "part node missing from asset");
                    bindings.missing.push(part);
                }
            }
        }
        debug!(
            bound = PartId::ALL.len() - bindings.missing.len(),
            missing = bindings.missing.len(),
            "part bindings resolved"
        );
        bindings
    }

    pub fn node(&self, part: PartId) -> Option<NodeId> {
        PartId::ALL
            .iter()
            .position(|p| *p == part)
            .and_then(|slot| self.nodes[slot])
    }

    /// Parts that had no node at bind time
    pub fn missing(&self) -> &[PartId] {
        &self.missing
    }

    /// Show enabled parts and hide the rest
    ///
    /// Only bound part nodes are written; every other node keeps its flag.
    pub fn apply(&self, enabled: &EnabledParts, graph: &mut SceneGraph) {
        for (slot, part) in PartId::ALL.into_iter().enumerate() {
            let Some(id) = self.nodes[slot] else {
                continue;
            };
            if let Some(object) = graph.object_mut(id) {
                object.visible = enabled.is_enabled(part);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::part::ANCHOR_NODE;
    use stitch_3d::SceneNode;

    fn partial_wallet() -> SceneGraph {
        let mut graph = SceneGraph::new("wallet");
        let root = graph.add_root(SceneNode::named("WALLET"));
        for name in [ANCHOR_NODE, "CARD_HOLDER_1", "CARD_HOLDER_2", "MONEY_POCKET"] {
            graph.add_child(root, SceneNode::named(name)).unwrap();
        }
        graph
    }

    #[test]
    fn test_bind_reports_missing() {
        let graph = partial_wallet();
        let bindings = PartBindings::bind(&graph);
        assert_eq!(bindings.missing(), &[PartId::CardHolder3, PartId::CardHolder4]);
        assert_eq!(
            bindings.node(PartId::MoneyPocket),
            graph.find_by_name("MONEY_POCKET")
        );
        assert_eq!(bindings.node(PartId::CardHolder3), None);
    }

    #[test]
    fn test_apply_hides_by_default() {
        let mut graph = partial_wallet();
        let bindings = PartBindings::bind(&graph);
        let mut enabled = EnabledParts::new();
        enabled.set(PartId::CardHolder2, true);

        bindings.apply(&enabled, &mut graph);

        let visible = |g: &SceneGraph, name: &str| g.get(g.find_by_name(name).unwrap()).unwrap().object.visible;
        assert!(!visible(&graph, "CARD_HOLDER_1"));
        assert!(visible(&graph, "CARD_HOLDER_2"));
        assert!(!visible(&graph, "MONEY_POCKET"));
        assert!(visible(&graph, ANCHOR_NODE));
        assert!(visible(&graph, "WALLET"));
    }

    #[test]
    fn test_name_match_is_case_sensitive() {
        let mut graph = SceneGraph::new("wallet");
        graph.add_root(SceneNode::named("card_holder_1"));
        let bindings = PartBindings::bind(&graph);
        assert_eq!(bindings.node(PartId::CardHolder1), None);
        assert_eq!(bindings.missing().len(), 5);
    }
}

//! Built-in wallet fixture
//!
//! A stand-in for the production model with the same node names, used by
//! tests, benchmarks and `stitch simulate` when no asset file is given.

use crate::part::{PartId, ANCHOR_NODE};
use stitch_3d::{BoundingBox, Object3D, SceneGraph, SceneNode, Vec3};

/// Wallet hierarchy with the anchor panel and all five parts
///
/// Deliberately off-centre and not unit-sized, like an exported asset.
pub fn wallet_scene() -> SceneGraph {
    let mut graph = SceneGraph::new("WALLET");
    let root = graph.add_root(SceneNode::named("WALLET").with_object(Object3D::at(0.4, 0.25, -0.1)));

    let panel = BoundingBox::from_center_half_extents(Vec3::ZERO, Vec3::new(4.5, 3.5, 0.1));
    graph.add_child(root, SceneNode::named(ANCHOR_NODE).with_bounds(panel));

    let holder = BoundingBox::from_center_half_extents(Vec3::ZERO, Vec3::new(2.0, 0.6, 0.05));
    let holder_rows = [
        (PartId::CardHolder1, 2.2),
        (PartId::CardHolder2, 1.0),
        (PartId::CardHolder3, -0.2),
        (PartId::CardHolder4, -1.4),
    ];
    for (part, y) in holder_rows {
        let node = SceneNode::named(part.node_name())
            .with_object(Object3D::at(-2.2, y, 0.15))
            .with_bounds(holder);
        graph.add_child(root, node);
    }

    let pocket = BoundingBox::from_center_half_extents(Vec3::ZERO, Vec3::new(2.0, 3.0, 0.2));
    graph.add_child(
        root,
        SceneNode::named(PartId::MoneyPocket.node_name())
            .with_object(Object3D::at(2.2, 0.0, 0.3))
            .with_bounds(pocket),
    );

    graph
}

//! Scene graph with named nodes

use super::object3d::Object3D;
use crate::math::{BoundingBox, Mat4};
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    /// Handle to a node inside a [`SceneGraph`]
    pub struct NodeId;
}

/// A node of the scene graph
#[derive(Clone, Debug, Default)]
pub struct SceneNode {
    /// Node name as authored in the asset (case-sensitive)
    pub name: Option<String>,
    /// Local transform and visibility
    pub object: Object3D,
    /// Bounds of this node's own geometry, in its local frame
    pub bounds: Option<BoundingBox>,
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 4]>,
}

impl SceneNode {
    /// Create an unnamed group node
    pub fn group() -> Self {
        Self::default()
    }

    /// Create a named node without geometry
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Attach geometry bounds
    pub fn with_bounds(mut self, bounds: BoundingBox) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Set the local transform
    pub fn with_object(mut self, object: Object3D) -> Self {
        self.object = object;
        self
    }

    /// Parent node (None for roots)
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child nodes in insertion order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Hierarchy of named nodes
///
/// Cloning a graph yields an independent copy of every node's transform
/// and visibility flag, which is how configurator sessions get their own
/// mutable view of a shared asset.
#[derive(Clone, Debug, Default)]
pub struct SceneGraph {
    name: String,
    nodes: SlotMap<NodeId, SceneNode>,
    roots: SmallVec<[NodeId; 4]>,
}

impl SceneGraph {
    /// Create an empty graph
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: SlotMap::with_key(),
            roots: SmallVec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Root nodes in insertion order
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Add a node at the top level
    pub fn add_root(&mut self, mut node: SceneNode) -> NodeId {
        node.parent = None;
        node.children.clear();
        let id = self.nodes.insert(node);
        self.roots.push(id);
        id
    }

    /// Add a node under `parent`; returns None if the parent doesn't exist
    pub fn add_child(&mut self, parent: NodeId, mut node: SceneNode) -> Option<NodeId> {
        if !self.nodes.contains_key(parent) {
            return None;
        }
        node.parent = Some(parent);
        node.children.clear();
        let id = self.nodes.insert(node);
        self.nodes[parent].children.push(id);
        Some(id)
    }

    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id)
    }

    /// Mutable access to a node's transform and visibility
    pub fn object_mut(&mut self, id: NodeId) -> Option<&mut Object3D> {
        self.nodes.get_mut(id).map(|node| &mut node.object)
    }

    /// Depth-first traversal from the roots, in insertion order
    pub fn traverse(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(node) = self.nodes.get(id) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    /// First node (depth-first) whose name matches exactly
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.traverse()
            .into_iter()
            .find(|id| self.nodes.get(*id).and_then(|n| n.name.as_deref()) == Some(name))
    }

    /// Depth of a node (roots are 0)
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.nodes.get(id).and_then(|n| n.parent);
        while let Some(parent) = current {
            depth += 1;
            current = self.nodes.get(parent).and_then(|n| n.parent);
        }
        depth
    }

    /// Whether a node and all of its ancestors are visible
    pub fn is_visible_in_tree(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node_id) = current {
            match self.nodes.get(node_id) {
                Some(node) if node.object.visible => current = node.parent,
                _ => return false,
            }
        }
        true
    }

    /// World matrix of a node (product of local matrices from its root)
    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            match self.nodes.get(node_id) {
                Some(node) => {
                    chain.push(node.object.local_matrix());
                    current = node.parent;
                }
                None => break,
            }
        }
        chain
            .iter()
            .rev()
            .fold(Mat4::IDENTITY, |acc, local| acc.mul(local))
    }

    /// Bounds of everything under `id`, in `id`'s local frame
    ///
    /// The node's own transform is excluded, so the result does not change
    /// when that transform is rewritten.
    pub fn content_bounds(&self, id: NodeId) -> BoundingBox {
        let mut bounds = BoundingBox::empty();
        self.accumulate_bounds(id, Mat4::IDENTITY, &mut bounds);
        bounds
    }

    fn accumulate_bounds(&self, id: NodeId, to_frame: Mat4, out: &mut BoundingBox) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        if let Some(local_bounds) = node.bounds {
            out.merge(&local_bounds.transformed(&to_frame));
        }
        for &child in &node.children {
            if let Some(child_node) = self.nodes.get(child) {
                let child_frame = to_frame.mul(&child_node.object.local_matrix());
                self.accumulate_bounds(child, child_frame, out);
            }
        }
    }

    /// Copy every root of `other` (with its subtree) under `parent`
    ///
    /// Returns the ids of the copied roots, or None if `parent` doesn't exist.
    pub fn graft(&mut self, parent: NodeId, other: &SceneGraph) -> Option<Vec<NodeId>> {
        if !self.nodes.contains_key(parent) {
            return None;
        }
        let mut grafted = Vec::with_capacity(other.roots.len());
        for &root in &other.roots {
            if let Some(id) = self.copy_subtree(parent, other, root) {
                grafted.push(id);
            }
        }
        Some(grafted)
    }

    fn copy_subtree(&mut self, parent: NodeId, other: &SceneGraph, source: NodeId) -> Option<NodeId> {
        let node = other.nodes.get(source)?;
        let id = self.add_child(parent, node.clone())?;
        for &child in &node.children {
            self.copy_subtree(id, other, child);
        }
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;

    fn sample() -> (SceneGraph, NodeId, NodeId, NodeId) {
        let mut graph = SceneGraph::new("sample");
        let root = graph.add_root(SceneNode::named("ROOT"));
        let a = graph
            .add_child(
                root,
                SceneNode::named("A")
                    .with_object(Object3D::at(2.0, 0.0, 0.0))
                    .with_bounds(BoundingBox::new(Vec3::splat(-1.0), Vec3::splat(1.0))),
            )
            .unwrap();
        let b = graph.add_child(a, SceneNode::named("B")).unwrap();
        (graph, root, a, b)
    }

    #[test]
    fn test_find_by_name_is_exact() {
        let (graph, root, a, b) = sample();
        assert_eq!(graph.find_by_name("ROOT"), Some(root));
        assert_eq!(graph.find_by_name("A"), Some(a));
        assert_eq!(graph.find_by_name("B"), Some(b));
        assert_eq!(graph.find_by_name("b"), None);
        assert_eq!(graph.find_by_name("B "), None);
    }

    #[test]
    fn test_traverse_is_depth_first() {
        let (mut graph, root, a, b) = sample();
        let c = graph.add_child(root, SceneNode::named("C")).unwrap();
        assert_eq!(graph.traverse(), vec![root, a, b, c]);
        assert_eq!(graph.depth(b), 2);
    }

    #[test]
    fn test_visibility_inherits_from_ancestors() {
        let (mut graph, _root, a, b) = sample();
        assert!(graph.is_visible_in_tree(b));
        graph.object_mut(a).unwrap().visible = false;
        assert!(!graph.is_visible_in_tree(b));
        assert!(graph.get(b).unwrap().object.visible);
    }

    #[test]
    fn test_content_bounds_exclude_own_transform() {
        let (mut graph, root, _a, _b) = sample();
        let before = graph.content_bounds(root);
        assert_eq!(before.min, Vec3::new(1.0, -1.0, -1.0));
        assert_eq!(before.max, Vec3::new(3.0, 1.0, 1.0));

        graph.object_mut(root).unwrap().scale = Vec3::splat(5.0);
        assert_eq!(graph.content_bounds(root), before);
    }

    #[test]
    fn test_graft_copies_independently() {
        let (asset, _, _, _) = sample();
        let mut stage = SceneGraph::new("stage");
        let holder = stage.add_root(SceneNode::group());
        let grafted = stage.graft(holder, &asset).unwrap();
        assert_eq!(grafted.len(), 1);
        assert_eq!(stage.len(), asset.len() + 1);

        let b = stage.find_by_name("B").unwrap();
        stage.object_mut(b).unwrap().visible = false;

        let original_b = asset.find_by_name("B").unwrap();
        assert!(asset.get(original_b).unwrap().object.visible);
    }
}

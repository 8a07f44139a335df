//! glTF 2.0 loader
//!
//! Loads the node hierarchy of `.gltf` / `.glb` files using the `gltf`
//! crate. Only what the configurator needs is read: node names, local
//! transforms and per-mesh bounds (taken from the accessor min/max, so no
//! vertex buffers are decoded).

use super::{AssetLoader, LoadError, Result};
use crate::math::{BoundingBox, Quat, Vec3};
use crate::scene::{NodeId, Object3D, SceneGraph, SceneNode};
use gltf::Gltf;
use std::path::Path;
use tracing::debug;

/// glTF 2.0 scene loader
pub struct GltfLoader {
    /// Scene index to load when the file has no default scene
    pub fallback_scene: usize,
}

impl GltfLoader {
    /// Create a new glTF loader with default settings
    pub fn new() -> Self {
        Self { fallback_scene: 0 }
    }

    /// Parse an in-memory `.gltf` or `.glb` payload
    pub fn load_slice(&self, name: &str, bytes: &[u8]) -> Result<SceneGraph> {
        let gltf = Gltf::from_slice(bytes).map_err(|e| LoadError::Parse(e.to_string()))?;
        self.build(name, &gltf)
    }

    fn build(&self, name: &str, gltf: &Gltf) -> Result<SceneGraph> {
        let scene = gltf
            .default_scene()
            .or_else(|| gltf.scenes().nth(self.fallback_scene))
            .ok_or_else(|| LoadError::InvalidData("file contains no scene".into()))?;

        let mut graph = SceneGraph::new(name);
        for node in scene.nodes() {
            let id = graph.add_root(convert_node(&node));
            add_children(&mut graph, id, &node);
        }

        debug!(scene = name, nodes = graph.len(), "glTF hierarchy built");
        Ok(graph)
    }
}

impl Default for GltfLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetLoader for GltfLoader {
    fn load(&self, path: &Path) -> Result<SceneGraph> {
        if !path.exists() {
            return Err(LoadError::NotFound(path.display().to_string()));
        }
        let gltf = Gltf::open(path).map_err(|e| match e {
            gltf::Error::Io(io) => LoadError::from(io),
            other => LoadError::Parse(other.to_string()),
        })?;

        let scene_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("scene")
            .to_string();

        self.build(&scene_name, &gltf)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["gltf", "glb"]
    }

    fn name(&self) -> &'static str {
        "glTF 2.0 Loader"
    }
}

fn add_children(graph: &mut SceneGraph, parent: NodeId, node: &gltf::Node<'_>) {
    for child in node.children() {
        if let Some(id) = graph.add_child(parent, convert_node(&child)) {
            add_children(graph, id, &child);
        }
    }
}

fn convert_node(node: &gltf::Node<'_>) -> SceneNode {
    let (translation, rotation, scale) = node.transform().decomposed();
    let object = Object3D::new()
        .with_position(Vec3::from(translation))
        .with_rotation(Quat::from(rotation).normalize())
        .with_scale(Vec3::from(scale));

    let mut scene_node = match node.name() {
        Some(name) => SceneNode::named(name),
        None => SceneNode::group(),
    }
    .with_object(object);

    if let Some(mesh) = node.mesh() {
        let mut bounds = BoundingBox::empty();
        for primitive in mesh.primitives() {
            let bb = primitive.bounding_box();
            bounds.merge(&BoundingBox::new(Vec3::from(bb.min), Vec3::from(bb.max)));
        }
        if !bounds.is_empty() {
            scene_node = scene_node.with_bounds(bounds);
        }
    }

    scene_node
}

#[cfg(test)]
mod tests {
    use super::*;

    const WALLET_GLTF: &str = r#"{
        "asset": { "version": "2.0" },
        "scene": 0,
        "scenes": [ { "nodes": [0] } ],
        "nodes": [
            { "name": "WALLET", "children": [1, 2], "translation": [1.0, 0.0, 0.0] },
            { "name": "BACK_PANEL", "mesh": 0 },
            { "name": "CARD_HOLDER_1", "mesh": 0, "translation": [0.0, 0.0, 0.1] }
        ],
        "meshes": [ { "primitives": [ { "attributes": { "POSITION": 0 } } ] } ],
        "accessors": [ {
            "componentType": 5126,
            "count": 3,
            "type": "VEC3",
            "min": [-1.0, -0.5, 0.0],
            "max": [1.0, 0.5, 0.05]
        } ]
    }"#;

    #[test]
    fn test_load_hierarchy_and_bounds() {
        let graph = GltfLoader::new()
            .load_slice("WALLET", WALLET_GLTF.as_bytes())
            .unwrap();

        assert_eq!(graph.len(), 3);
        let root = graph.find_by_name("WALLET").unwrap();
        assert_eq!(graph.roots(), &[root]);
        assert_eq!(graph.get(root).unwrap().object.position, Vec3::new(1.0, 0.0, 0.0));

        let card = graph.find_by_name("CARD_HOLDER_1").unwrap();
        let node = graph.get(card).unwrap();
        assert_eq!(node.parent(), Some(root));
        assert_eq!(node.bounds.unwrap().max, Vec3::new(1.0, 0.5, 0.05));
    }

    #[test]
    fn test_invalid_payload_is_parse_error() {
        let err = GltfLoader::new().load_slice("bad", b"not a model").unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = GltfLoader::new()
            .load(Path::new("does/not/exist.glb"))
            .unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
    }
}

//! Node type registry.

use std::collections::HashMap;

use crate::node::GeoNode;
use crate::nodes::{CurveStar, MeshLine, MeshUvSphere, PointsToVolume};

/// Factory function creating a node with default settings.
pub type NodeFactory = Box<dyn Fn() -> Box<dyn GeoNode> + Send + Sync>;

/// Node types by type name.
///
/// ```
/// use rhizome_resin_nodes::NodeTypeRegistry;
///
/// let registry = NodeTypeRegistry::with_builtin();
/// let node = registry.create("GeometryNodeMeshUVSphere").unwrap();
/// assert_eq!(node.label(), "UV Sphere");
/// ```
pub struct NodeTypeRegistry {
    factories: HashMap<String, NodeFactory>,
}

impl NodeTypeRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Creates a registry holding the built-in node types.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register_type::<MeshUvSphere>();
        registry.register_type::<MeshLine>();
        registry.register_type::<CurveStar>();
        registry.register_type::<PointsToVolume>();
        registry
    }

    /// Registers a factory function for a type name.
    pub fn register<F>(&mut self, type_name: &str, factory: F)
    where
        F: Fn() -> Box<dyn GeoNode> + Send + Sync + 'static,
    {
        self.factories
            .insert(type_name.to_string(), Box::new(factory));
    }

    /// Registers a node type under its own type name.
    pub fn register_type<T>(&mut self)
    where
        T: GeoNode + Default + 'static,
    {
        let type_name = T::default().type_name();
        self.register(type_name, || Box::new(T::default()));
    }

    /// Creates a node of the given type with default settings.
    pub fn create(&self, type_name: &str) -> Option<Box<dyn GeoNode>> {
        self.factories.get(type_name).map(|factory| factory())
    }

    /// Returns true if a type name is registered.
    pub fn contains(&self, type_name: &str) -> bool {
        self.factories.contains_key(type_name)
    }

    /// Registered type names, sorted.
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for NodeTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::{MeshLineCountMode, MeshLineMode};

    #[test]
    fn test_builtin_types() {
        let registry = NodeTypeRegistry::with_builtin();
        assert_eq!(
            registry.type_names(),
            vec![
                "GeometryNodeCurvePrimitiveStar",
                "GeometryNodeMeshLine",
                "GeometryNodeMeshUVSphere",
                "GeometryNodePointsToVolume",
            ]
        );
        assert!(registry.create("GeometryNodeMeshCube").is_none());
    }

    #[test]
    fn test_custom_factory() {
        let mut registry = NodeTypeRegistry::new();
        assert!(!registry.contains("EndPointsLine"));
        registry.register("EndPointsLine", || {
            Box::new(MeshLine {
                mode: MeshLineMode::EndPoints,
                count_mode: MeshLineCountMode::Resolution,
            })
        });
        let node = registry.create("EndPointsLine").unwrap();
        assert_eq!(node.type_name(), "GeometryNodeMeshLine");
    }
}

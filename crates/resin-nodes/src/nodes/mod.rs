//! Built-in geometry nodes.

mod curve_star;
mod mesh_line;
mod points_to_volume;
mod uv_sphere;

pub use curve_star::{CurveStar, OUTER_POINTS};
pub use mesh_line::{MeshLine, MeshLineCountMode, MeshLineMode};
pub use points_to_volume::{DENSITY_GRID, PointsToVolume, PointsToVolumeResolutionMode};
pub use uv_sphere::MeshUvSphere;

#[cfg(test)]
pub(crate) mod test_util {
    use std::collections::BTreeMap;

    use crate::exec::{EvalOptions, execute_node};
    use crate::log::GeoLogger;
    use crate::node::{GeoNode, NodeRef};
    use crate::value::SocketValue;
    use rhizome_resin_geometry::GeometrySet;

    /// Runs a node with the given linked inputs, collecting diagnostics.
    pub fn run(
        node: &dyn GeoNode,
        inputs: &[(&str, SocketValue)],
        options: &EvalOptions,
    ) -> (BTreeMap<String, SocketValue>, GeoLogger) {
        let logger = GeoLogger::new();
        let node_ref = NodeRef::new("node", node);
        let inputs = inputs
            .iter()
            .map(|(id, value)| (id.to_string(), value.clone()))
            .collect();
        let outputs = execute_node(node, &node_ref, inputs, options, Some(&logger));
        (outputs, logger)
    }

    /// The geometry published on an output.
    pub fn geometry(outputs: &BTreeMap<String, SocketValue>, identifier: &str) -> GeometrySet {
        match outputs.get(identifier) {
            Some(SocketValue::Geometry(geometry)) => geometry.clone(),
            other => panic!("expected geometry on '{identifier}', got {other:?}"),
        }
    }
}

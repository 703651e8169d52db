use glam::Vec3;
use rhizome_resin_geometry::GeometrySet;
use rhizome_resin_mesh::line;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::node::{GeoNode, NodeRef};
use crate::params::GeoNodeExecParams;
use crate::socket::NodeDeclarationBuilder;

/// How the line's extent is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MeshLineMode {
    /// `Offset` is the step between consecutive vertices.
    #[default]
    Offset,
    /// `Offset` is the position of the last vertex.
    EndPoints,
}

/// How the vertex count is given in [`MeshLineMode::EndPoints`] mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MeshLineCountMode {
    /// `Count` vertices.
    #[default]
    Total,
    /// As many vertices as fit with `Resolution` spacing.
    Resolution,
}

/// Generates a line of loose edges.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeshLine {
    /// How the extent is given.
    pub mode: MeshLineMode,
    /// How the vertex count is given.
    pub count_mode: MeshLineCountMode,
}

/// Shortest edge length in resolution mode.
const MIN_RESOLUTION: f32 = 1e-4;

impl GeoNode for MeshLine {
    fn type_name(&self) -> &'static str {
        "GeometryNodeMeshLine"
    }

    fn label(&self) -> &'static str {
        "Mesh Line"
    }

    fn declare(&self, b: &mut NodeDeclarationBuilder) {
        b.add_input::<i32>("Count")
            .default_value(10)
            .min(1.0)
            .max(10000.0)
            .description("Number of vertices on the line");
        b.add_input::<f32>("Resolution")
            .default_value(1.0f32)
            .min(0.1)
            .description("Length of each individual edge");
        b.add_input::<Vec3>("Start Location")
            .description("Position of the first vertex");
        b.add_input::<Vec3>("Offset")
            .default_value(Vec3::Z)
            .description(
                "In offset mode, the distance between each socket on each axis. \
                 In end points mode, the position of the final vertex",
            );
        b.add_output::<GeometrySet>("Mesh");
    }

    fn update_availability(&self, node: &mut NodeRef) {
        let end_points = self.mode == MeshLineMode::EndPoints;
        if let Some(socket) = node.input_mut("Offset") {
            socket.label = end_points.then(|| "End Location".to_string());
        }
        node.set_input_available(
            "Resolution",
            end_points && self.count_mode == MeshLineCountMode::Resolution,
        );
        node.set_input_available(
            "Count",
            !end_points || self.count_mode == MeshLineCountMode::Total,
        );
    }

    fn execute(&self, params: &mut GeoNodeExecParams<'_>) {
        let start: Vec3 = params.extract_input("Start Location");
        let (delta, count) = match self.mode {
            MeshLineMode::Offset => {
                let delta: Vec3 = params.extract_input("Offset");
                (delta, params.extract_input::<i32>("Count"))
            }
            // Same socket, labelled "End Location".
            MeshLineMode::EndPoints => {
                let end: Vec3 = params.extract_input("Offset");
                let total = end - start;
                match self.count_mode {
                    MeshLineCountMode::Resolution => {
                        let resolution = params
                            .extract_input::<f32>("Resolution")
                            .max(MIN_RESOLUTION);
                        let count = ((total.length() / resolution) as i32).saturating_add(1);
                        (total.normalize_or_zero() * resolution, count)
                    }
                    MeshLineCountMode::Total => {
                        let count: i32 = params.extract_input("Count");
                        if count <= 1 {
                            (Vec3::ZERO, count)
                        } else {
                            (total / (count - 1) as f32, count)
                        }
                    }
                }
            }
        };

        let geometry = if count < 1 {
            GeometrySet::new()
        } else {
            GeometrySet::from_mesh(line(start, delta, count as usize))
        };
        params.set_output("Mesh", geometry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::EvalOptions;
    use crate::nodes::test_util::{geometry, run};
    use crate::value::SocketValue;
    use rhizome_resin_mesh::EdgeFlags;

    const END_POINTS_TOTAL: MeshLine = MeshLine {
        mode: MeshLineMode::EndPoints,
        count_mode: MeshLineCountMode::Total,
    };
    const END_POINTS_RESOLUTION: MeshLine = MeshLine {
        mode: MeshLineMode::EndPoints,
        count_mode: MeshLineCountMode::Resolution,
    };

    fn positions(node: &MeshLine, inputs: &[(&str, SocketValue)]) -> Vec<Vec3> {
        let (outputs, _) = run(node, inputs, &EvalOptions::default());
        geometry(&outputs, "Mesh")
            .mesh()
            .map(|mesh| mesh.positions.clone())
            .unwrap_or_default()
    }

    #[test]
    fn test_availability() {
        let offset = NodeRef::new("line", &MeshLine::default());
        assert!(offset.input("Count").unwrap().available);
        assert!(!offset.input("Resolution").unwrap().available);
        assert_eq!(offset.input("Offset").unwrap().label_or_name(), "Offset");

        let resolution = NodeRef::new("line", &END_POINTS_RESOLUTION);
        assert!(!resolution.input("Count").unwrap().available);
        assert!(resolution.input("Resolution").unwrap().available);
        assert_eq!(
            resolution.input("Offset").unwrap().label_or_name(),
            "End Location"
        );

        let total = NodeRef::new("line", &END_POINTS_TOTAL);
        assert!(total.input("Count").unwrap().available);
        assert!(!total.input("Resolution").unwrap().available);
    }

    #[test]
    fn test_offset_mode() {
        let (outputs, _) = run(
            &MeshLine::default(),
            &[("Count", SocketValue::Int(4)), ("Offset", Vec3::X.into())],
            &EvalOptions::default(),
        );
        let geometry = geometry(&outputs, "Mesh");
        let mesh = geometry.mesh().unwrap();
        assert_eq!(mesh.positions, vec![Vec3::ZERO, Vec3::X, Vec3::X * 2.0, Vec3::X * 3.0]);
        assert_eq!(mesh.edge_count(), 3);
        assert!(mesh.edges.iter().all(|e| e.flags.contains(EdgeFlags::LOOSE)));
        assert!(mesh.normals.iter().all(|n| *n == Vec3::X));
        assert_eq!(mesh.face_count(), 0);
    }

    #[test]
    fn test_end_points_total() {
        let inputs = [
            ("Count", SocketValue::Int(5)),
            ("Start Location", Vec3::ZERO.into()),
            ("Offset", Vec3::new(0.0, 4.0, 0.0).into()),
        ];
        let points = positions(&END_POINTS_TOTAL, &inputs);
        assert_eq!(points.len(), 5);
        assert_eq!(points[4], Vec3::new(0.0, 4.0, 0.0));
        assert_eq!(points[1], Vec3::Y);

        let single = positions(
            &END_POINTS_TOTAL,
            &[("Count", SocketValue::Int(1)), ("Start Location", Vec3::ONE.into())],
        );
        assert_eq!(single, vec![Vec3::ONE]);
    }

    #[test]
    fn test_end_points_resolution() {
        let points = positions(
            &END_POINTS_RESOLUTION,
            &[
                ("Resolution", SocketValue::Float(0.5)),
                ("Offset", Vec3::new(2.2, 0.0, 0.0).into()),
            ],
        );
        // 2.2 / 0.5 = 4.4, truncated, plus the start vertex.
        assert_eq!(points.len(), 5);
        assert!((points[4].x - 2.0).abs() < 1e-6);

        // Coincident end points still give the start vertex.
        let points = positions(
            &END_POINTS_RESOLUTION,
            &[("Offset", Vec3::ZERO.into())],
        );
        assert_eq!(points, vec![Vec3::ZERO]);
    }

    #[test]
    fn test_count_below_one_in_every_mode() {
        for node in [MeshLine::default(), END_POINTS_TOTAL] {
            for count in [0, -5, i32::MIN] {
                let (outputs, logger) = run(
                    &node,
                    &[
                        ("Count", SocketValue::Int(count)),
                        ("Offset", Vec3::new(1.0, 2.0, 3.0).into()),
                    ],
                    &EvalOptions::default(),
                );
                assert!(geometry(&outputs, "Mesh").is_empty(), "{node:?} with count {count}");
                assert!(logger.warnings().is_empty());
            }
        }
    }

    #[test]
    fn test_count_below_one() {
        let (outputs, logger) = run(
            &MeshLine::default(),
            &[("Count", SocketValue::Int(0))],
            &EvalOptions::default(),
        );
        assert!(geometry(&outputs, "Mesh").is_empty());
        assert!(logger.warnings().is_empty());
    }
}

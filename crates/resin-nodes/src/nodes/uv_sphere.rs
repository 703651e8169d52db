use rhizome_resin_geometry::GeometrySet;
use rhizome_resin_mesh::uv_sphere;

use crate::log::NodeWarningType;
use crate::node::GeoNode;
use crate::params::GeoNodeExecParams;
use crate::socket::NodeDeclarationBuilder;

/// Generates a UV sphere mesh.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeshUvSphere;

impl GeoNode for MeshUvSphere {
    fn type_name(&self) -> &'static str {
        "GeometryNodeMeshUVSphere"
    }

    fn label(&self) -> &'static str {
        "UV Sphere"
    }

    fn declare(&self, b: &mut NodeDeclarationBuilder) {
        b.add_input::<i32>("Segments")
            .default_value(32)
            .min(3.0)
            .max(1024.0)
            .description("Horizontal resolution of the sphere");
        b.add_input::<i32>("Rings")
            .default_value(16)
            .min(2.0)
            .max(1024.0)
            .description("The number of horizontal rings");
        b.add_input::<f32>("Radius")
            .default_value(1.0f32)
            .min(0.0)
            .description("Distance from the generated points to the origin");
        b.add_output::<GeometrySet>("Mesh");
    }

    fn execute(&self, params: &mut GeoNodeExecParams<'_>) {
        let segments: i32 = params.extract_input("Segments");
        let rings: i32 = params.extract_input("Rings");
        if segments < 3 || rings < 2 {
            if segments < 3 {
                params.error_message_add(NodeWarningType::Info, "Segments must be at least 3");
            }
            if rings < 2 {
                params.error_message_add(NodeWarningType::Info, "Rings must be at least 2");
            }
            params.set_output("Mesh", GeometrySet::new());
            return;
        }

        let radius: f32 = params.extract_input("Radius");
        let mesh = uv_sphere(radius, segments as u32, rings as u32);
        params.set_output("Mesh", GeometrySet::from_mesh(mesh));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::EvalOptions;
    use crate::nodes::test_util::{geometry, run};
    use crate::value::SocketValue;
    use rhizome_resin_mesh::UV_MAP;

    #[test]
    fn test_default_sphere() {
        let (outputs, logger) = run(&MeshUvSphere, &[], &EvalOptions::default());
        let geometry = geometry(&outputs, "Mesh");
        let mesh = geometry.mesh().unwrap();
        assert_eq!(mesh.vertex_count(), 482);
        assert_eq!(mesh.face_count(), 32 * 14 + 64);
        assert_eq!(mesh.uv_map().map(<[_]>::len), Some(mesh.corner_count()));
        assert!(mesh.attributes.contains(UV_MAP));
        assert!(logger.warnings().is_empty());
    }

    #[test]
    fn test_radius() {
        let (outputs, _) = run(
            &MeshUvSphere,
            &[
                ("Segments", SocketValue::Int(6)),
                ("Rings", SocketValue::Int(3)),
                ("Radius", SocketValue::Float(2.5)),
            ],
            &EvalOptions::default(),
        );
        let geometry = geometry(&outputs, "Mesh");
        let mesh = geometry.mesh().unwrap();
        assert_eq!(mesh.positions[0], glam::Vec3::new(0.0, 0.0, 2.5));
        for p in &mesh.positions {
            assert!((p.length() - 2.5).abs() < 1e-5);
        }
    }

    #[test]
    fn test_degenerate_counts() {
        let (outputs, logger) = run(
            &MeshUvSphere,
            &[("Segments", SocketValue::Int(2)), ("Rings", SocketValue::Int(1))],
            &EvalOptions::default(),
        );
        assert!(geometry(&outputs, "Mesh").is_empty());
        let messages: Vec<_> = logger.warnings().into_iter().map(|w| w.message).collect();
        assert_eq!(
            messages,
            vec!["Segments must be at least 3", "Rings must be at least 2"]
        );

        // Two rings is the smallest valid sphere.
        let (outputs, logger) = run(
            &MeshUvSphere,
            &[("Segments", SocketValue::Int(3)), ("Rings", SocketValue::Int(2))],
            &EvalOptions::default(),
        );
        assert_eq!(geometry(&outputs, "Mesh").mesh().unwrap().vertex_count(), 5);
        assert!(logger.warnings().is_empty());
    }
}

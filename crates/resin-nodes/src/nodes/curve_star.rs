use std::f32::consts::TAU;

use glam::Vec3;
use rhizome_resin_core::{AttributeData, AttributeDomain};
use rhizome_resin_geometry::{Curve, GeometryComponent, GeometrySet};

use crate::log::NodeWarningType;
use crate::node::GeoNode;
use crate::params::GeoNodeExecParams;
use crate::socket::NodeDeclarationBuilder;

/// Name of the point attribute selecting the outer points.
pub const OUTER_POINTS: &str = "Outer Points";

/// Generates a star-shaped poly curve.
///
/// Outer and inner points alternate, starting with an outer point on the
/// positive X axis. The `Outer Points` output names a boolean point
/// attribute that is true on the outer points.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurveStar;

/// Builds the star outline as a single cyclic curve.
fn star_curve(inner_radius: f32, outer_radius: f32, twist: f32, points: usize) -> Curve {
    let step = TAU / points as f32;
    let outline = (0..points).flat_map(|i| {
        let outer = step * i as f32;
        let inner = outer + step * 0.5 + twist;
        [
            Vec3::new(outer.cos(), outer.sin(), 0.0) * outer_radius,
            Vec3::new(inner.cos(), inner.sin(), 0.0) * inner_radius,
        ]
    });

    let mut curve = Curve::new();
    curve.add_poly(outline, true);
    curve
}

impl GeoNode for CurveStar {
    fn type_name(&self) -> &'static str {
        "GeometryNodeCurvePrimitiveStar"
    }

    fn label(&self) -> &'static str {
        "Star"
    }

    fn declare(&self, b: &mut NodeDeclarationBuilder) {
        b.add_input::<i32>("Points")
            .default_value(8)
            .min(3.0)
            .max(256.0)
            .description("Number of points on each of the circles");
        b.add_input::<f32>("Inner Radius")
            .default_value(1.0f32)
            .min(0.0)
            .description("Radius of the inner circle; can be larger than outer radius");
        b.add_input::<f32>("Outer Radius")
            .default_value(2.0f32)
            .min(0.0)
            .description("Radius of the outer circle; can be smaller than inner radius");
        b.add_input::<f32>("Twist")
            .description("The counterclockwise rotation of the inner set of points");
        b.add_output::<GeometrySet>("Curve");
        b.add_output::<String>(OUTER_POINTS)
            .description("Name of a point attribute selecting the outer points");
    }

    fn execute(&self, params: &mut GeoNodeExecParams<'_>) {
        let inner_radius = params.extract_input::<f32>("Inner Radius").max(0.0);
        let outer_radius = params.extract_input::<f32>("Outer Radius").max(0.0);
        let twist: f32 = params.extract_input("Twist");
        let points = params.extract_input::<i32>("Points").max(3) as usize;

        let mut curve = star_curve(inner_radius, outer_radius, twist, points);

        if params.output_is_required(OUTER_POINTS) {
            let selection = (0..curve.point_count()).map(|i| i % 2 == 0).collect();
            let written = curve.attribute_write(
                OUTER_POINTS,
                AttributeDomain::Point,
                AttributeData::Bool(selection),
            );
            match written {
                Ok(()) => {
                    tracing::debug!(
                        producer = %params.attribute_producer_name(),
                        "wrote outer point selection"
                    );
                    params.set_output(OUTER_POINTS, OUTER_POINTS.to_string());
                }
                Err(error) => params.error_message_add(NodeWarningType::Error, error.to_string()),
            }
        }
        params.set_output("Curve", GeometrySet::from_curve(curve));
    }
}

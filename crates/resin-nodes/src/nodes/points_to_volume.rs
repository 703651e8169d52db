use glam::Vec3;
use rhizome_resin_core::{AttributeDomain, AttributeType, POSITION};
use rhizome_resin_geometry::{ComponentType, GeometryComponent, GeometrySet, Volume, VolumeGrid};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::log::NodeWarningType;
use crate::node::{GeoNode, NodeRef};
use crate::params::GeoNodeExecParams;
use crate::socket::NodeDeclarationBuilder;

/// Name of the grid written by [`PointsToVolume`].
pub const DENSITY_GRID: &str = "density";

/// Largest grid the node builds.
const MAX_VOXELS: usize = 1 << 24;

/// Components whose points are converted.
const POINT_COMPONENTS: [ComponentType; 3] =
    [ComponentType::Mesh, ComponentType::PointCloud, ComponentType::Curve];

/// How the voxel size is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PointsToVolumeResolutionMode {
    /// Fit `Voxel Amount` voxels along the diagonal of the points' bounds.
    #[default]
    Amount,
    /// Use `Voxel Size` directly.
    Size,
}

/// Fills a sphere around every point with a constant density.
///
/// Mesh, point cloud and curve points are converted together, replacing
/// those components with a volume holding a [`DENSITY_GRID`] grid.
/// Instanced geometry is converted in place.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PointsToVolume {
    /// How the voxel size is chosen.
    pub resolution_mode: PointsToVolumeResolutionMode,
}

#[derive(Debug, Clone, Copy)]
enum Resolution {
    Size(f32),
    Amount(f32),
}

fn compute_voxel_size(resolution: Resolution, positions: &[Vec3], radius: f32) -> f32 {
    let voxel_amount = match resolution {
        Resolution::Size(voxel_size) => return voxel_size,
        Resolution::Amount(voxel_amount) => voxel_amount,
    };
    if positions.is_empty() || voxel_amount <= 1.0 {
        return 0.0;
    }
    let (min, max) = positions.iter().fold(
        (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
        |(min, max), p| (min.min(*p), max.max(*p)),
    );
    (min.distance(max) + 2.0 * radius) / voxel_amount
}

fn gather_points(
    params: &mut GeoNodeExecParams<'_>,
    component: &dyn GeometryComponent,
    positions: &mut Vec<Vec3>,
    radii: &mut Vec<f32>,
) {
    let domain_size = component.attribute_domain_size(AttributeDomain::Point);
    let column = component.attribute_try_get_for_read(
        POSITION,
        AttributeDomain::Point,
        AttributeType::Float3,
    );
    match column {
        Some(column) => positions.extend(column.into_typed::<Vec3>().iter()),
        None => positions.extend(std::iter::repeat_n(Vec3::ZERO, domain_size)),
    }
    let radius =
        params.get_input_attribute_typed::<f32>("Radius", component, AttributeDomain::Point, 0.5);
    radii.extend(radius.iter());
}

impl PointsToVolume {
    fn initialize_volume(&self, params: &mut GeoNodeExecParams<'_>, geometry: &mut GeometrySet) {
        let mut positions = Vec::new();
        let mut radii = Vec::new();
        for component_type in POINT_COMPONENTS {
            if let Some(component) = geometry.component(component_type) {
                gather_points(params, component, &mut positions, &mut radii);
            }
        }

        let max_radius = radii.iter().copied().fold(0.0, f32::max);
        let resolution = match self.resolution_mode {
            PointsToVolumeResolutionMode::Size => Resolution::Size(params.get_input("Voxel Size")),
            PointsToVolumeResolutionMode::Amount => {
                Resolution::Amount(params.get_input("Voxel Amount"))
            }
        };
        let voxel_size = compute_voxel_size(resolution, &positions, max_radius);
        if voxel_size.is_nan() || voxel_size <= 0.0 || positions.is_empty() {
            return;
        }

        let density: f32 = params.get_input("Density");
        let grid = VolumeGrid::from_spheres(
            DENSITY_GRID,
            voxel_size,
            &positions,
            &radii,
            density,
            MAX_VOXELS,
        );
        let Some(grid) = grid else {
            params.error_message_add(
                NodeWarningType::Error,
                format!("Volume would have more than {MAX_VOXELS} voxels, increase the voxel size"),
            );
            return;
        };
        tracing::debug!(voxel_size, voxels = grid.voxel_count(), "built density grid");

        let mut volume = Volume::new();
        volume.add_grid(grid);
        for component_type in POINT_COMPONENTS {
            geometry.remove(component_type);
        }
        geometry.replace_volume(volume);
    }
}

impl GeoNode for PointsToVolume {
    fn type_name(&self) -> &'static str {
        "GeometryNodePointsToVolume"
    }

    fn label(&self) -> &'static str {
        "Points to Volume"
    }

    fn declare(&self, b: &mut NodeDeclarationBuilder) {
        b.add_input::<GeometrySet>("Points");
        b.add_input::<f32>("Density").default_value(1.0f32).min(0.0);
        b.add_input::<f32>("Voxel Size").default_value(0.3f32).min(0.01);
        b.add_input::<f32>("Voxel Amount").default_value(64.0f32).min(0.0);
        b.add_input::<f32>("Radius")
            .default_value(0.5f32)
            .min(0.0)
            .description("Radius of the sphere filled around each point");
        b.add_output::<GeometrySet>("Volume");
    }

    fn update_availability(&self, node: &mut NodeRef) {
        let size = self.resolution_mode == PointsToVolumeResolutionMode::Size;
        node.set_input_available("Voxel Amount", !size);
        node.set_input_available("Voxel Size", size);
    }

    fn execute(&self, params: &mut GeoNodeExecParams<'_>) {
        let mut geometry: GeometrySet = params.extract_input("Points");
        geometry.modify_geometry_sets(&mut |set| self.initialize_volume(params, set));
        params.set_output("Volume", geometry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::EvalOptions;
    use crate::nodes::test_util::{geometry, run};
    use crate::value::SocketValue;
    use glam::{IVec3, Mat4};
    use rhizome_resin_geometry::{Instances, PointCloud};

    const SIZE_MODE: PointsToVolume = PointsToVolume {
        resolution_mode: PointsToVolumeResolutionMode::Size,
    };

    fn two_points() -> GeometrySet {
        GeometrySet::from_point_cloud(PointCloud::from_positions(
            vec![Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0)],
            1.0,
        ))
    }

    #[test]
    fn test_availability() {
        let amount = NodeRef::new("volume", &PointsToVolume::default());
        assert!(amount.input("Voxel Amount").unwrap().available);
        assert!(!amount.input("Voxel Size").unwrap().available);

        let size = NodeRef::new("volume", &SIZE_MODE);
        assert!(!size.input("Voxel Amount").unwrap().available);
        assert!(size.input("Voxel Size").unwrap().available);
        assert!(size.input("Radius").unwrap().available);
    }

    #[test]
    fn test_voxel_size() {
        let points = [Vec3::ZERO, Vec3::new(3.0, 4.0, 0.0)];
        // Diagonal 5 plus twice the radius, over the amount.
        let size = compute_voxel_size(Resolution::Amount(12.0), &points, 0.5);
        assert!((size - 0.5).abs() < 1e-6);

        assert_eq!(compute_voxel_size(Resolution::Amount(1.0), &points, 0.5), 0.0);
        assert_eq!(compute_voxel_size(Resolution::Amount(64.0), &[], 0.5), 0.0);
        assert_eq!(compute_voxel_size(Resolution::Size(0.3), &[], 0.5), 0.3);
        assert_eq!(compute_voxel_size(Resolution::Size(0.3), &points, 0.5), 0.3);
    }

    #[test]
    fn test_point_cloud_to_density() {
        let (outputs, logger) = run(
            &SIZE_MODE,
            &[
                ("Points", two_points().into()),
                ("Voxel Size", SocketValue::Float(0.5)),
                ("Density", SocketValue::Float(2.0)),
            ],
            &EvalOptions::default(),
        );
        assert!(logger.warnings().is_empty());

        let result = geometry(&outputs, "Volume");
        assert!(result.point_cloud().is_none());
        let grid = result.volume().unwrap().grid(DENSITY_GRID).unwrap();
        assert_eq!(grid.voxel_size, 0.5);
        // Voxel centers a quarter away on each axis fall inside the radius.
        assert_eq!(grid.get(IVec3::ZERO), 2.0);
        assert_eq!(grid.get(IVec3::new(3, 0, 0)), 2.0);
        assert_eq!(grid.get(IVec3::new(1, 0, 0)), 0.0);
    }

    #[test]
    fn test_amount_mode_fits_bounds() {
        let (outputs, _) = run(
            &PointsToVolume::default(),
            &[("Points", two_points().into()), ("Voxel Amount", SocketValue::Float(6.0))],
            &EvalOptions::default(),
        );
        let result = geometry(&outputs, "Volume");
        let grid = result.volume().unwrap().grid(DENSITY_GRID).unwrap();
        // (2 + 2 * 0.5) / 6
        assert!((grid.voxel_size - 0.5).abs() < 1e-6);
        assert!(grid.active_voxel_count() > 0);
    }

    #[test]
    fn test_unconverted_geometry_is_kept() {
        // Too few voxels: the points pass through unchanged.
        let (outputs, logger) = run(
            &PointsToVolume::default(),
            &[("Points", two_points().into()), ("Voxel Amount", SocketValue::Float(1.0))],
            &EvalOptions::default(),
        );
        let result = geometry(&outputs, "Volume");
        assert!(result.volume().is_none());
        assert_eq!(result.point_cloud().map(|p| p.len()), Some(2));
        assert!(logger.warnings().is_empty());

        let (outputs, logger) = run(&PointsToVolume::default(), &[], &EvalOptions::default());
        assert!(geometry(&outputs, "Volume").is_empty());
        assert!(logger.warnings().is_empty());
    }

    #[test]
    fn test_oversized_grid() {
        let (outputs, logger) = run(
            &SIZE_MODE,
            &[
                ("Points", two_points().into()),
                ("Voxel Size", SocketValue::Float(0.001)),
                ("Radius", SocketValue::Float(10.0)),
            ],
            &EvalOptions::default(),
        );
        let warnings = logger.warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].warning_type, NodeWarningType::Error);
        assert!(geometry(&outputs, "Volume").point_cloud().is_some());
    }

    #[test]
    fn test_instances_converted_in_place() {
        let mut instances = Instances::new();
        let reference = instances.add_reference(two_points());
        instances.add_instance(reference, Mat4::IDENTITY);
        let mut input = GeometrySet::from_instances(instances);
        input.replace_point_cloud(PointCloud::from_positions(vec![Vec3::ONE], 1.0));

        let (outputs, _) = run(
            &SIZE_MODE,
            &[("Points", input.into()), ("Voxel Size", SocketValue::Float(0.25))],
            &EvalOptions::default(),
        );
        let result = geometry(&outputs, "Volume");
        assert!(result.point_cloud().is_none());
        assert!(result.volume().is_some());

        let nested = result.instances().unwrap().geometry(0).unwrap();
        assert!(nested.point_cloud().is_none());
        assert!(nested.volume().unwrap().grid(DENSITY_GRID).is_some());
    }
}

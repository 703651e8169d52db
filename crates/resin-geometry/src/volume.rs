//! Volume component.
//!
//! A volume holds named dense grids of scalar voxels. Voxel `i` of a grid
//! covers the world-space cube `[i, i + 1) * voxel_size`; only the bounding
//! box of non-background voxels is stored. Volumes have no attribute domains.

use glam::{IVec3, UVec3, Vec3};
use rhizome_resin_core::{AttributeDomain, AttributeStore};

use crate::component::{ComponentType, GeometryComponent};

/// A named dense grid of scalar voxels. Voxels outside the box read as zero.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeGrid {
    /// Grid name, such as `density`.
    pub name: String,
    /// World-space edge length of one voxel.
    pub voxel_size: f32,
    /// Index of the first stored voxel.
    pub min_index: IVec3,
    /// Number of stored voxels along each axis.
    pub dims: UVec3,
    /// Voxel values, x varying fastest.
    pub values: Vec<f32>,
}

impl VolumeGrid {
    /// Creates a grid storing no voxels.
    pub fn new(name: impl Into<String>, voxel_size: f32) -> Self {
        Self {
            name: name.into(),
            voxel_size,
            min_index: IVec3::ZERO,
            dims: UVec3::ZERO,
            values: Vec::new(),
        }
    }

    /// Number of stored voxels.
    pub fn voxel_count(&self) -> usize {
        self.values.len()
    }

    /// Number of voxels with a non-zero value.
    pub fn active_voxel_count(&self) -> usize {
        self.values.iter().filter(|v| **v != 0.0).count()
    }

    fn offset(&self, voxel: IVec3) -> Option<usize> {
        let local = voxel - self.min_index;
        if local.min_element() < 0 {
            return None;
        }
        let local = local.as_uvec3();
        if local.x >= self.dims.x || local.y >= self.dims.y || local.z >= self.dims.z {
            return None;
        }
        let (x, y, z) = (local.x as usize, local.y as usize, local.z as usize);
        Some(x + self.dims.x as usize * (y + self.dims.y as usize * z))
    }

    /// Value of a voxel.
    pub fn get(&self, voxel: IVec3) -> f32 {
        self.offset(voxel).map_or(0.0, |i| self.values[i])
    }

    /// World-space center of a voxel.
    pub fn voxel_center(&self, voxel: IVec3) -> Vec3 {
        (voxel.as_vec3() + 0.5) * self.voxel_size
    }

    /// Fills spheres with `value`.
    ///
    /// A voxel is inside a sphere when its center is. Returns `None` if the
    /// bounding box of all spheres would exceed `max_voxels`.
    pub fn from_spheres(
        name: impl Into<String>,
        voxel_size: f32,
        centers: &[Vec3],
        radii: &[f32],
        value: f32,
        max_voxels: usize,
    ) -> Option<Self> {
        debug_assert_eq!(centers.len(), radii.len());
        let mut grid = Self::new(name, voxel_size);
        if voxel_size.is_nan() || voxel_size <= 0.0 {
            return Some(grid);
        }

        // Range of voxels whose centers may lie inside a sphere.
        let voxel_range = |center: Vec3, radius: f32| {
            let low = ((center - radius) / voxel_size - 0.5).ceil().as_ivec3();
            let high = ((center + radius) / voxel_size - 0.5).floor().as_ivec3();
            (low, high)
        };

        let mut bounds: Option<(IVec3, IVec3)> = None;
        for (&center, &radius) in centers.iter().zip(radii) {
            let (low, high) = voxel_range(center, radius.max(0.0));
            if low.cmpgt(high).any() {
                continue;
            }
            bounds = Some(match bounds {
                Some((min, max)) => (min.min(low), max.max(high)),
                None => (low, high),
            });
        }
        let Some((min, max)) = bounds else {
            return Some(grid);
        };

        let dims = (max - min + IVec3::ONE).as_uvec3();
        let total = (dims.x as usize)
            .checked_mul(dims.y as usize)?
            .checked_mul(dims.z as usize)?;
        if total > max_voxels {
            return None;
        }
        grid.min_index = min;
        grid.dims = dims;
        grid.values = vec![0.0; total];

        for (&center, &radius) in centers.iter().zip(radii) {
            let radius = radius.max(0.0);
            let (low, high) = voxel_range(center, radius);
            for z in low.z..=high.z {
                for y in low.y..=high.y {
                    for x in low.x..=high.x {
                        let voxel = IVec3::new(x, y, z);
                        if grid.voxel_center(voxel).distance(center) > radius {
                            continue;
                        }
                        if let Some(i) = grid.offset(voxel) {
                            grid.values[i] = value;
                        }
                    }
                }
            }
        }
        Some(grid)
    }
}

/// A set of volume grids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Volume {
    /// Grids in this volume.
    pub grids: Vec<VolumeGrid>,
    attributes: AttributeStore,
}

impl Volume {
    /// Creates a volume without grids.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a grid.
    pub fn add_grid(&mut self, grid: VolumeGrid) {
        self.grids.push(grid);
    }

    /// Finds a grid by name.
    pub fn grid(&self, name: &str) -> Option<&VolumeGrid> {
        self.grids.iter().find(|g| g.name == name)
    }
}

impl GeometryComponent for Volume {
    fn component_type(&self) -> ComponentType {
        ComponentType::Volume
    }

    fn domains(&self) -> &'static [AttributeDomain] {
        &[]
    }

    fn attribute_domain_size(&self, _domain: AttributeDomain) -> usize {
        0
    }

    fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }

    fn attributes(&self) -> &AttributeStore {
        &self.attributes
    }

    fn attributes_mut(&mut self) -> &mut AttributeStore {
        &mut self.attributes
    }
}

//! Point cloud component.

use glam::Vec3;
use rhizome_resin_core::{
    AttributeDomain, AttributeRef, AttributeSlice, AttributeStore, HasPositions, POSITION, RADIUS,
};

use crate::component::{ComponentType, GeometryComponent};

/// Unconnected points with a position and radius each.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCloud {
    /// Point positions.
    pub positions: Vec<Vec3>,
    /// Point radii (same length as positions).
    pub radii: Vec<f32>,
    /// Custom point attributes.
    pub attributes: AttributeStore,
}

impl PointCloud {
    /// Creates an empty point cloud.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a point cloud from positions, with every radius set to `radius`.
    pub fn from_positions(positions: Vec<Vec3>, radius: f32) -> Self {
        let radii = vec![radius; positions.len()];
        Self {
            positions,
            radii,
            attributes: AttributeStore::new(),
        }
    }

    /// Returns the number of points.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if there are no points.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Appends a point.
    pub fn push(&mut self, position: Vec3, radius: f32) {
        self.positions.push(position);
        self.radii.push(radius);
    }
}

impl HasPositions for PointCloud {
    fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    fn positions_mut(&mut self) -> &mut [Vec3] {
        &mut self.positions
    }
}

impl GeometryComponent for PointCloud {
    fn component_type(&self) -> ComponentType {
        ComponentType::PointCloud
    }

    fn domains(&self) -> &'static [AttributeDomain] {
        &[AttributeDomain::Point]
    }

    fn attribute_domain_size(&self, domain: AttributeDomain) -> usize {
        match domain {
            AttributeDomain::Point => self.len(),
            _ => 0,
        }
    }

    fn is_empty(&self) -> bool {
        PointCloud::is_empty(self)
    }

    fn attributes(&self) -> &AttributeStore {
        &self.attributes
    }

    fn attributes_mut(&mut self) -> &mut AttributeStore {
        &mut self.attributes
    }

    fn builtin_attribute(&self, name: &str) -> Option<AttributeRef<'_>> {
        let data = match name {
            POSITION => AttributeSlice::Float3(&self.positions),
            RADIUS => AttributeSlice::Float(&self.radii),
            _ => return None,
        };
        Some(AttributeRef {
            domain: AttributeDomain::Point,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rhizome_resin_core::{AttributeData, AttributeType, AttributeValue};

    #[test]
    fn test_point_cloud_builtins() {
        let cloud = PointCloud::from_positions(vec![Vec3::ZERO, Vec3::X], 0.5);
        assert_eq!(cloud.attribute_domain_size(AttributeDomain::Point), 2);
        assert_eq!(cloud.attribute_domain_size(AttributeDomain::Face), 0);

        let radius = cloud
            .attribute_try_get_for_read("radius", AttributeDomain::Point, AttributeType::Float)
            .unwrap();
        assert_eq!(radius.get(1), Some(AttributeValue::Float(0.5)));

        // Point clouds have no other domain to adapt to.
        let face_positions = cloud.attribute_try_get_for_read(
            "position",
            AttributeDomain::Face,
            AttributeType::Float3,
        );
        assert!(face_positions.is_none());
    }

    #[test]
    fn test_point_cloud_custom_attribute() {
        let mut cloud = PointCloud::new();
        cloud.push(Vec3::ONE, 1.0);
        cloud
            .attribute_write("id", AttributeDomain::Point, AttributeData::Int(vec![7]))
            .unwrap();
        let meta = cloud.attribute_get_meta_data("id").unwrap();
        assert_eq!(meta.data_type, AttributeType::Int);
        assert!(cloud
            .attribute_write("id", AttributeDomain::Point, AttributeData::Int(vec![1, 2]))
            .is_err());
    }
}

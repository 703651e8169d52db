//! Curve component.
//!
//! Control points of all curves are stored in flat arrays; each curve owns a
//! contiguous range described by `curve_offsets`. Only poly curves exist:
//! points are joined by straight segments.

use std::ops::Range;

use glam::Vec3;
use rhizome_resin_core::{
    AttributeData, AttributeDomain, AttributeRef, AttributeSlice, AttributeStore, HasPositions,
    POSITION, RADIUS,
};

use crate::component::{ComponentType, GeometryComponent};

/// Name of the built-in per-point tilt attribute.
pub const TILT: &str = "tilt";

/// Name of the built-in per-curve cyclic flag.
pub const CYCLIC: &str = "cyclic";

/// A set of poly curves.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    /// Control point positions.
    pub positions: Vec<Vec3>,
    /// Control point radii.
    pub radii: Vec<f32>,
    /// Control point tilts, in radians.
    pub tilts: Vec<f32>,
    /// Whether each curve closes back on its first point.
    pub cyclic: Vec<bool>,
    /// Point offsets, one more than the curve count.
    curve_offsets: Vec<u32>,
    /// Custom point and curve attributes.
    pub attributes: AttributeStore,
}

impl Default for Curve {
    fn default() -> Self {
        Self {
            positions: Vec::new(),
            radii: Vec::new(),
            tilts: Vec::new(),
            cyclic: Vec::new(),
            curve_offsets: vec![0],
            attributes: AttributeStore::new(),
        }
    }
}

impl Curve {
    /// Creates a component without curves.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a poly curve through `points`, each with radius 1 and no tilt.
    pub fn add_poly(&mut self, points: impl IntoIterator<Item = Vec3>, cyclic: bool) -> usize {
        let start = self.positions.len();
        self.positions.extend(points);
        let added = self.positions.len() - start;
        self.radii.extend(std::iter::repeat_n(1.0, added));
        self.tilts.extend(std::iter::repeat_n(0.0, added));
        self.cyclic.push(cyclic);
        self.curve_offsets.push(self.positions.len() as u32);
        self.cyclic.len() - 1
    }

    /// Number of curves.
    pub fn curve_count(&self) -> usize {
        self.cyclic.len()
    }

    /// Number of control points across all curves.
    pub fn point_count(&self) -> usize {
        self.positions.len()
    }

    /// Control point indices of a curve.
    pub fn points_range(&self, curve: usize) -> Range<usize> {
        self.curve_offsets[curve] as usize..self.curve_offsets[curve + 1] as usize
    }

    /// Number of segments of a curve; cyclic curves have a closing segment.
    pub fn segment_count(&self, curve: usize) -> usize {
        let points = self.points_range(curve).len();
        match (points, self.cyclic[curve]) {
            (0 | 1, _) => 0,
            (n, true) => n,
            (n, false) => n - 1,
        }
    }

    /// Total length of a curve.
    pub fn length(&self, curve: usize) -> f32 {
        let points = &self.positions[self.points_range(curve)];
        let open: f32 = points.windows(2).map(|w| w[0].distance(w[1])).sum();
        match (self.cyclic[curve], points.first(), points.last()) {
            (true, Some(first), Some(last)) if points.len() > 1 => open + last.distance(*first),
            _ => open,
        }
    }

    /// For each curve, the indices of its points.
    fn curve_point_groups(&self) -> Vec<Vec<u32>> {
        (0..self.curve_count())
            .map(|c| self.points_range(c).map(|i| i as u32).collect())
            .collect()
    }

    /// For each point, the index of its curve.
    fn point_curve_indices(&self) -> Vec<u32> {
        let mut indices = vec![0; self.point_count()];
        for curve in 0..self.curve_count() {
            indices[self.points_range(curve)].fill(curve as u32);
        }
        indices
    }
}

impl HasPositions for Curve {
    fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    fn positions_mut(&mut self) -> &mut [Vec3] {
        &mut self.positions
    }
}

impl GeometryComponent for Curve {
    fn component_type(&self) -> ComponentType {
        ComponentType::Curve
    }

    fn domains(&self) -> &'static [AttributeDomain] {
        &[AttributeDomain::Point, AttributeDomain::Curve]
    }

    fn attribute_domain_size(&self, domain: AttributeDomain) -> usize {
        match domain {
            AttributeDomain::Point => self.point_count(),
            AttributeDomain::Curve => self.curve_count(),
            _ => 0,
        }
    }

    fn is_empty(&self) -> bool {
        self.curve_count() == 0
    }

    fn attributes(&self) -> &AttributeStore {
        &self.attributes
    }

    fn attributes_mut(&mut self) -> &mut AttributeStore {
        &mut self.attributes
    }

    fn builtin_attribute(&self, name: &str) -> Option<AttributeRef<'_>> {
        let (domain, data) = match name {
            POSITION => (AttributeDomain::Point, AttributeSlice::Float3(&self.positions)),
            RADIUS => (AttributeDomain::Point, AttributeSlice::Float(&self.radii)),
            TILT => (AttributeDomain::Point, AttributeSlice::Float(&self.tilts)),
            CYCLIC => (AttributeDomain::Curve, AttributeSlice::Bool(&self.cyclic)),
            _ => return None,
        };
        Some(AttributeRef { domain, data })
    }

    fn adapt_domain(
        &self,
        data: AttributeSlice<'_>,
        from: AttributeDomain,
        to: AttributeDomain,
    ) -> Option<AttributeData> {
        if data.len() != self.attribute_domain_size(from) {
            return None;
        }
        match (from, to) {
            _ if from == to && self.domains().contains(&from) => Some(data.to_data()),
            (AttributeDomain::Point, AttributeDomain::Curve) => {
                Some(data.mix_groups(&self.curve_point_groups()))
            }
            (AttributeDomain::Curve, AttributeDomain::Point) => {
                Some(data.gather(&self.point_curve_indices()))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rhizome_resin_core::{AttributeType, AttributeValue};

    fn two_curves() -> Curve {
        let mut curve = Curve::new();
        curve.add_poly([Vec3::ZERO, Vec3::X, Vec3::new(1.0, 1.0, 0.0)], false);
        curve.add_poly([Vec3::ZERO, Vec3::X, Vec3::new(1.0, 1.0, 0.0), Vec3::Y], true);
        curve
    }

    #[test]
    fn test_curve_layout() {
        let curve = two_curves();
        assert_eq!(curve.curve_count(), 2);
        assert_eq!(curve.point_count(), 7);
        assert_eq!(curve.points_range(1), 3..7);
        assert_eq!(curve.segment_count(0), 2);
        assert_eq!(curve.segment_count(1), 4);
        assert!((curve.length(0) - 2.0).abs() < 1e-6);
        assert!((curve.length(1) - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_curve_domain_sizes() {
        let curve = two_curves();
        assert_eq!(curve.attribute_domain_size(AttributeDomain::Point), 7);
        assert_eq!(curve.attribute_domain_size(AttributeDomain::Curve), 2);
        assert_eq!(curve.attribute_domain_size(AttributeDomain::Face), 0);
    }

    #[test]
    fn test_curve_adapt() {
        let curve = two_curves();
        let cyclic = curve
            .attribute_try_get_for_read("cyclic", AttributeDomain::Point, AttributeType::Bool)
            .unwrap();
        assert_eq!(cyclic.len(), 7);
        assert_eq!(cyclic.get(0), Some(AttributeValue::Bool(false)));
        assert_eq!(cyclic.get(6), Some(AttributeValue::Bool(true)));

        let radius = curve
            .attribute_try_get_for_read("radius", AttributeDomain::Curve, AttributeType::Float)
            .unwrap();
        assert_eq!(radius.get(1), Some(AttributeValue::Float(1.0)));
    }
}

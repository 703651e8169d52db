//! Built-in point attributes shared by geometry types.
//!
//! Meshes, point clouds and curves all carry a `position` column on their
//! point domain. These traits expose it directly, without going through the
//! string-keyed [`AttributeStore`](crate::AttributeStore).

use glam::Vec3;

/// Name of the built-in position attribute.
pub const POSITION: &str = "position";

/// Name of the built-in radius attribute.
pub const RADIUS: &str = "radius";

/// Geometry with per-point positions.
pub trait HasPositions {
    /// Returns all point positions.
    fn positions(&self) -> &[Vec3];

    /// Returns mutable access to point positions.
    fn positions_mut(&mut self) -> &mut [Vec3];

    /// Returns the number of points.
    fn point_count(&self) -> usize {
        self.positions().len()
    }

    /// Axis-aligned bounds as `(min, max)`, or `None` without points.
    fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut points = self.positions().iter().copied();
        let first = points.next()?;
        Some(points.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }

    /// Moves every point by `offset`.
    fn translate(&mut self, offset: Vec3) {
        for p in self.positions_mut() {
            *p += offset;
        }
    }
}

/// Geometry with per-point normals.
pub trait HasNormals {
    /// Returns all point normals.
    fn normals(&self) -> &[Vec3];

    /// Returns mutable access to point normals.
    fn normals_mut(&mut self) -> &mut [Vec3];
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Points(Vec<Vec3>);

    impl HasPositions for Points {
        fn positions(&self) -> &[Vec3] {
            &self.0
        }

        fn positions_mut(&mut self) -> &mut [Vec3] {
            &mut self.0
        }
    }

    #[test]
    fn test_bounds() {
        let points = Points(vec![Vec3::new(1.0, -2.0, 0.0), Vec3::new(-1.0, 3.0, 0.5)]);
        let (lo, hi) = points.bounds().unwrap();
        assert_eq!(lo, Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(hi, Vec3::new(1.0, 3.0, 0.5));
        assert!(Points(vec![]).bounds().is_none());
    }

    #[test]
    fn test_translate() {
        let mut points = Points(vec![Vec3::ZERO, Vec3::X]);
        points.translate(Vec3::Z);
        assert_eq!(points.positions(), &[Vec3::Z, Vec3::new(1.0, 0.0, 1.0)]);
        assert_eq!(points.point_count(), 2);
    }
}

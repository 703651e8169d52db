//! Mesh primitives.
//!
//! Operations are serializable structs with `apply` methods. Free functions
//! are sugar that delegate to these ops.

use glam::{Vec2, Vec3};
use rhizome_resin_core::{AttributeData, AttributeDomain};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

use crate::mesh::UV_MAP;
use crate::{Corner, EdgeFlags, Mesh, MeshBuilder};

// ============================================================================
// UV sphere
// ============================================================================

/// Number of vertices of a UV sphere: one per interior ring segment plus two poles.
pub fn sphere_vertex_total(segments: u32, rings: u32) -> usize {
    segments as usize * (rings as usize - 1) + 2
}

/// Number of edges of a UV sphere.
pub fn sphere_edge_total(segments: u32, rings: u32) -> usize {
    segments as usize * (rings as usize * 2 - 1)
}

/// Number of face corners of a UV sphere.
pub fn sphere_corner_total(segments: u32, rings: u32) -> usize {
    let s = segments as usize;
    let quad_corners = 4 * s * (rings as usize - 2);
    let tri_corners = 3 * s * 2;
    quad_corners + tri_corners
}

/// Number of faces of a UV sphere.
pub fn sphere_face_total(segments: u32, rings: u32) -> usize {
    let s = segments as usize;
    s * (rings as usize - 2) + s * 2
}

/// Generates a UV sphere centered at the origin with poles on the Z axis.
///
/// The top and bottom rings are triangle fans around a single pole vertex,
/// every strip in between is made of quads. Texture coordinates are stored in
/// the `uv_map` corner attribute.
///
/// Counts are not validated: `segments` must be at least 3 and `rings` at
/// least 2.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UvSphere {
    /// Sphere radius.
    pub radius: f32,
    /// Number of divisions around the Z axis (longitude).
    pub segments: u32,
    /// Number of divisions from pole to pole (latitude).
    pub rings: u32,
}

impl Default for UvSphere {
    fn default() -> Self {
        Self {
            radius: 1.0,
            segments: 32,
            rings: 16,
        }
    }
}

impl UvSphere {
    /// Creates a sphere op.
    pub fn new(radius: f32, segments: u32, rings: u32) -> Self {
        Self {
            radius,
            segments,
            rings,
        }
    }

    /// Generates the mesh.
    pub fn apply(&self) -> Mesh {
        debug_assert!(self.segments >= 3 && self.rings >= 2);

        let mut builder = MeshBuilder::with_capacity(
            sphere_vertex_total(self.segments, self.rings),
            sphere_edge_total(self.segments, self.rings),
            sphere_corner_total(self.segments, self.rings),
            sphere_face_total(self.segments, self.rings),
        );

        self.build_vertices(&mut builder);
        self.build_edges(&mut builder);
        self.build_faces(&mut builder);

        let mut mesh = builder.build();
        let uvs = self.build_uvs();
        mesh.attributes
            .insert(UV_MAP, AttributeDomain::Corner, AttributeData::Float2(uvs));

        debug_assert!(mesh.validate().is_ok());
        mesh
    }

    fn build_vertices(&self, builder: &mut MeshBuilder) {
        let delta_theta = PI / self.rings as f32;
        let delta_phi = TAU / self.segments as f32;

        builder.vertex_with_normal(Vec3::new(0.0, 0.0, self.radius), Vec3::Z);

        for ring in 1..self.rings {
            let theta = ring as f32 * delta_theta;
            let z = theta.cos();
            for segment in 1..=self.segments {
                let phi = segment as f32 * delta_phi;
                let sin_theta = theta.sin();
                let x = sin_theta * phi.cos();
                let y = sin_theta * phi.sin();
                let normal = Vec3::new(x, y, z);
                builder.vertex_with_normal(normal * self.radius, normal);
            }
        }

        builder.vertex_with_normal(Vec3::new(0.0, 0.0, -self.radius), Vec3::NEG_Z);
    }

    fn build_edges(&self, builder: &mut MeshBuilder) {
        let s = self.segments;
        let flags = EdgeFlags::DRAW | EdgeFlags::RENDER;

        // Northern fan.
        for segment in 0..s {
            builder.edge(0, 1 + segment, flags);
        }

        let mut ring_vert_start = 1;
        for ring in 0..self.rings - 1 {
            let next_ring_vert_start = ring_vert_start + s;

            for segment in 0..s {
                builder.edge(
                    ring_vert_start + segment,
                    ring_vert_start + (segment + 1) % s,
                    flags,
                );
            }

            if ring < self.rings - 2 {
                for segment in 0..s {
                    builder.edge(
                        ring_vert_start + segment,
                        next_ring_vert_start + segment,
                        flags,
                    );
                }
            }

            ring_vert_start += s;
        }

        // Southern fan.
        let last_vert = self.last_vert();
        let last_ring_vert_start = last_vert - s;
        for segment in 0..s {
            builder.edge(last_vert, last_ring_vert_start + segment, flags);
        }
    }

    fn build_faces(&self, builder: &mut MeshBuilder) {
        let s = self.segments;
        let corner = |vert, edge| Corner { vert, edge };

        // Northern triangle fan.
        for segment in 0..s {
            let next = (segment + 1) % s;
            builder.face(&[
                corner(0, segment),
                corner(1 + segment, s + segment),
                corner(1 + next, next),
            ]);
        }

        let mut ring_vert_start = 1;
        let mut ring_edge_start = s;
        for _ in 1..self.rings - 1 {
            let next_ring_vert_start = ring_vert_start + s;
            let next_ring_edge_start = ring_edge_start + s * 2;
            let vertical_edge_start = ring_edge_start + s;

            for segment in 0..s {
                let next = (segment + 1) % s;
                builder.face(&[
                    corner(ring_vert_start + segment, vertical_edge_start + segment),
                    corner(next_ring_vert_start + segment, next_ring_edge_start + segment),
                    corner(next_ring_vert_start + next, vertical_edge_start + next),
                    corner(ring_vert_start + next, ring_edge_start + segment),
                ]);
            }

            ring_vert_start += s;
            ring_edge_start += s * 2;
        }

        // Southern triangle fan.
        let last_edge_ring_start = s * (self.rings - 2) * 2 + s;
        let last_edge_fan_start = last_edge_ring_start + s;
        let last_vert = self.last_vert();
        let last_ring_vert_start = last_vert - s;
        for segment in 0..s {
            let next = (segment + 1) % s;
            builder.face(&[
                corner(last_vert, last_edge_fan_start + next),
                corner(last_ring_vert_start + next, last_edge_ring_start + segment),
                corner(last_ring_vert_start + segment, last_edge_fan_start + segment),
            ]);
        }
    }

    fn build_uvs(&self) -> Vec<Vec2> {
        let s = self.segments as f32;
        let r = self.rings as f32;
        let dy = 1.0 / r;
        let mut uvs = Vec::with_capacity(sphere_corner_total(self.segments, self.rings));

        for segment in 0..self.segments {
            let seg = segment as f32;
            uvs.push(Vec2::new((seg + 0.5) / s, 0.0));
            uvs.push(Vec2::new(seg / s, dy));
            uvs.push(Vec2::new((seg + 1.0) / s, dy));
        }

        for ring in 1..self.rings - 1 {
            let ring = ring as f32;
            for segment in 0..self.segments {
                let seg = segment as f32;
                uvs.push(Vec2::new(seg / s, ring / r));
                uvs.push(Vec2::new(seg / s, (ring + 1.0) / r));
                uvs.push(Vec2::new((seg + 1.0) / s, (ring + 1.0) / r));
                uvs.push(Vec2::new((seg + 1.0) / s, ring / r));
            }
        }

        for segment in 0..self.segments {
            let seg = segment as f32;
            uvs.push(Vec2::new((seg + 0.5) / s, 1.0));
            uvs.push(Vec2::new((seg + 1.0) / s, 1.0 - dy));
            uvs.push(Vec2::new(seg / s, 1.0 - dy));
        }

        uvs
    }

    fn last_vert(&self) -> u32 {
        sphere_vertex_total(self.segments, self.rings) as u32 - 1
    }
}

/// Creates a UV sphere with the given radius and resolution.
pub fn uv_sphere(radius: f32, segments: u32, rings: u32) -> Mesh {
    UvSphere::new(radius, segments, rings).apply()
}

/// Creates a unit UV sphere with default resolution (32 segments, 16 rings).
pub fn sphere() -> Mesh {
    UvSphere::default().apply()
}

// ============================================================================
// Line
// ============================================================================

/// Generates a polyline of evenly spaced vertices joined by loose edges.
///
/// Vertex `i` sits at `start + offset * i`. Every normal is the normalized
/// offset direction.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Line {
    /// Position of the first vertex.
    pub start: Vec3,
    /// Offset between consecutive vertices.
    pub offset: Vec3,
    /// Number of vertices.
    pub count: usize,
}

impl Default for Line {
    fn default() -> Self {
        Self {
            start: Vec3::ZERO,
            offset: Vec3::Z,
            count: 10,
        }
    }
}

impl Line {
    /// Generates the mesh. A count of zero gives an empty mesh.
    pub fn apply(&self) -> Mesh {
        let edge_count = self.count.saturating_sub(1);
        let mut builder = MeshBuilder::with_capacity(self.count, edge_count, 0, 0);
        let normal = self.offset.normalize_or_zero();

        for i in 0..self.count {
            builder.vertex_with_normal(self.start + self.offset * i as f32, normal);
        }
        for i in 0..edge_count as u32 {
            builder.edge(i, i + 1, EdgeFlags::LOOSE);
        }

        builder.build()
    }
}

/// Creates a line of `count` vertices.
pub fn line(start: Vec3, offset: Vec3, count: usize) -> Mesh {
    Line {
        start,
        offset,
        count,
    }
    .apply()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_counts() {
        for (segments, rings) in [(3, 2), (4, 3), (8, 4), (32, 16)] {
            let mesh = uv_sphere(1.0, segments, rings);
            assert_eq!(mesh.vertex_count(), sphere_vertex_total(segments, rings));
            assert_eq!(mesh.edge_count(), sphere_edge_total(segments, rings));
            assert_eq!(mesh.corner_count(), sphere_corner_total(segments, rings));
            assert_eq!(mesh.face_count(), sphere_face_total(segments, rings));
        }
    }

    #[test]
    fn test_sphere_minimal() {
        // Two fans of three triangles, no quads.
        let mesh = uv_sphere(1.0, 3, 2);
        assert_eq!(mesh.vertex_count(), 5);
        assert_eq!(mesh.edge_count(), 9);
        assert_eq!(mesh.face_count(), 6);
        assert!(mesh.faces.iter().all(|f| f.corner_count == 3));
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_sphere_topology_valid() {
        let mesh = uv_sphere(2.0, 7, 5);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_sphere_positions() {
        let mesh = uv_sphere(2.5, 8, 4);
        let last = mesh.vertex_count() - 1;
        assert_eq!(mesh.positions[0], Vec3::new(0.0, 0.0, 2.5));
        assert_eq!(mesh.positions[last], Vec3::new(0.0, 0.0, -2.5));

        for (pos, normal) in mesh.positions.iter().zip(&mesh.normals) {
            assert!((pos.length() - 2.5).abs() < 1e-4);
            assert!((normal.length() - 1.0).abs() < 1e-4);
            assert!((*pos / 2.5 - *normal).length() < 1e-4);
        }
    }

    #[test]
    fn test_sphere_zero_radius() {
        let mesh = uv_sphere(0.0, 4, 3);
        assert!(mesh.positions.iter().all(|p| *p == Vec3::ZERO));
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_sphere_uvs() {
        let mesh = uv_sphere(1.0, 4, 4);
        let uvs = mesh.uv_map().unwrap();
        assert_eq!(uvs.len(), mesh.corner_count());

        // First northern cap.
        assert_eq!(uvs[0], Vec2::new(0.125, 0.0));
        assert_eq!(uvs[1], Vec2::new(0.0, 0.25));
        assert_eq!(uvs[2], Vec2::new(0.25, 0.25));

        // First quad of the first strip.
        assert_eq!(uvs[12], Vec2::new(0.0, 0.25));
        assert_eq!(uvs[13], Vec2::new(0.0, 0.5));
        assert_eq!(uvs[14], Vec2::new(0.25, 0.5));
        assert_eq!(uvs[15], Vec2::new(0.25, 0.25));

        // Last southern cap.
        let n = uvs.len();
        assert_eq!(uvs[n - 3], Vec2::new(0.875, 1.0));
        assert_eq!(uvs[n - 2], Vec2::new(1.0, 0.75));
        assert_eq!(uvs[n - 1], Vec2::new(0.75, 0.75));

        assert!(uvs.iter().all(|uv| (0.0..=1.0).contains(&uv.x) && (0.0..=1.0).contains(&uv.y)));
    }

    #[test]
    fn test_sphere_default() {
        let mesh = sphere();
        assert_eq!(mesh.vertex_count(), 32 * 15 + 2);
    }

    #[test]
    fn test_line() {
        let mesh = line(Vec3::ONE, Vec3::new(0.0, 0.0, 2.0), 4);
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.edge_count(), 3);
        assert_eq!(mesh.positions[3], Vec3::new(1.0, 1.0, 7.0));
        assert!(mesh.normals.iter().all(|n| *n == Vec3::Z));
        assert!(mesh.edges.iter().all(|e| e.flags.contains(EdgeFlags::LOOSE)));
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_line_single_and_empty() {
        let single = line(Vec3::ZERO, Vec3::X, 1);
        assert_eq!(single.vertex_count(), 1);
        assert_eq!(single.edge_count(), 0);

        assert!(line(Vec3::ZERO, Vec3::X, 0).is_empty());
    }
}

//! Core mesh types.

use std::ops::{BitOr, Range};

use glam::{Vec2, Vec3};
use rhizome_resin_core::{AttributeDomain, AttributeStore, HasNormals, HasPositions};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::MeshError;

/// Name of the corner attribute holding texture coordinates.
pub const UV_MAP: &str = "uv_map";

/// Display and render flags of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EdgeFlags(u8);

impl EdgeFlags {
    /// No flags.
    pub const NONE: EdgeFlags = EdgeFlags(0);
    /// Edge is drawn in the viewport.
    pub const DRAW: EdgeFlags = EdgeFlags(1 << 0);
    /// Edge is included in renders.
    pub const RENDER: EdgeFlags = EdgeFlags(1 << 1);
    /// Edge is not used by any face.
    pub const LOOSE: EdgeFlags = EdgeFlags(1 << 2);

    /// Returns true if every flag in `other` is set.
    pub fn contains(self, other: EdgeFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for EdgeFlags {
    type Output = EdgeFlags;

    fn bitor(self, rhs: EdgeFlags) -> EdgeFlags {
        EdgeFlags(self.0 | rhs.0)
    }
}

/// An edge between two vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeshEdge {
    /// First vertex.
    pub v1: u32,
    /// Second vertex.
    pub v2: u32,
    /// Display flags.
    pub flags: EdgeFlags,
}

impl MeshEdge {
    /// Creates an edge.
    pub fn new(v1: u32, v2: u32, flags: EdgeFlags) -> Self {
        Self { v1, v2, flags }
    }

    /// Returns true if the edge joins `a` and `b`, in either direction.
    pub fn connects(&self, a: u32, b: u32) -> bool {
        (self.v1 == a && self.v2 == b) || (self.v1 == b && self.v2 == a)
    }
}

/// One corner of a face: a vertex and the edge leading to the next corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Corner {
    /// Vertex index.
    pub vert: u32,
    /// Edge from this corner's vertex to the next corner's vertex.
    pub edge: u32,
}

/// A polygon, stored as a contiguous range of corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Face {
    /// Index of the first corner.
    pub corner_start: u32,
    /// Number of corners.
    pub corner_count: u32,
}

impl Face {
    /// Range of corner indices.
    pub fn corners(&self) -> Range<usize> {
        let start = self.corner_start as usize;
        start..start + self.corner_count as usize
    }
}

/// A polygon mesh.
///
/// Vertices carry positions and normals; edges, corners and faces describe
/// topology. Additional per-element data lives in [`Mesh::attributes`], with
/// lengths matching the element count of each attribute's domain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Vertex normals.
    pub normals: Vec<Vec3>,
    /// Edges.
    pub edges: Vec<MeshEdge>,
    /// Face corners, grouped by face.
    pub corners: Vec<Corner>,
    /// Faces.
    pub faces: Vec<Face>,
    /// Custom attributes on the point, edge, face and corner domains.
    pub attributes: AttributeStore,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mesh with pre-allocated capacity.
    pub fn with_capacity(vertices: usize, edges: usize, corners: usize, faces: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            normals: Vec::with_capacity(vertices),
            edges: Vec::with_capacity(edges),
            corners: Vec::with_capacity(corners),
            faces: Vec::with_capacity(faces),
            attributes: AttributeStore::new(),
        }
    }

    /// Returns the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the number of face corners.
    pub fn corner_count(&self) -> usize {
        self.corners.len()
    }

    /// Returns the number of faces.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns true if the mesh has no vertices.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Element count of a domain. Domains a mesh does not have are empty.
    pub fn domain_size(&self, domain: AttributeDomain) -> usize {
        match domain {
            AttributeDomain::Point => self.vertex_count(),
            AttributeDomain::Edge => self.edge_count(),
            AttributeDomain::Face => self.face_count(),
            AttributeDomain::Corner => self.corner_count(),
            AttributeDomain::Curve | AttributeDomain::Instance => 0,
        }
    }

    /// Corners of a face.
    pub fn face_corners(&self, face: usize) -> &[Corner] {
        &self.corners[self.faces[face].corners()]
    }

    /// Texture coordinates, if the mesh has a float2 `uv_map` corner attribute.
    pub fn uv_map(&self) -> Option<&[Vec2]> {
        use rhizome_resin_core::AttributeSlice;

        let attribute = self.attributes.get(UV_MAP)?;
        match (attribute.domain, attribute.data) {
            (AttributeDomain::Corner, AttributeSlice::Float2(uvs)) => Some(uvs),
            _ => None,
        }
    }

    /// Estimates the memory usage of this mesh in bytes.
    pub fn memory_estimate(&self) -> usize {
        use std::mem::size_of;
        self.positions.len() * size_of::<Vec3>()
            + self.normals.len() * size_of::<Vec3>()
            + self.edges.len() * size_of::<MeshEdge>()
            + self.corners.len() * size_of::<Corner>()
            + self.faces.len() * size_of::<Face>()
    }

    /// Transforms all positions by a matrix.
    pub fn transform(&mut self, matrix: glam::Mat4) {
        let normal_matrix = matrix.inverse().transpose();

        for pos in &mut self.positions {
            *pos = matrix.transform_point3(*pos);
        }

        for normal in &mut self.normals {
            *normal = normal_matrix.transform_vector3(*normal).normalize_or_zero();
        }
    }

    /// Checks every topology and attribute invariant.
    ///
    /// Faces must partition the corner array in order, and each corner's
    /// edge must join its vertex to the next corner's vertex of the same face.
    pub fn validate(&self) -> Result<(), MeshError> {
        let vertex_count = self.vertex_count() as u32;

        if !self.normals.is_empty() && self.normals.len() != self.positions.len() {
            return Err(MeshError::NormalCountMismatch {
                positions: self.positions.len(),
                normals: self.normals.len(),
            });
        }

        for (i, edge) in self.edges.iter().enumerate() {
            for vertex in [edge.v1, edge.v2] {
                if vertex >= vertex_count {
                    return Err(MeshError::EdgeOutOfRange { edge: i, vertex });
                }
            }
            if edge.v1 == edge.v2 {
                return Err(MeshError::DegenerateEdge(i));
            }
        }

        let mut expected_start = 0u32;
        for (i, face) in self.faces.iter().enumerate() {
            if face.corner_start != expected_start {
                return Err(MeshError::FaceNotContiguous {
                    face: i,
                    start: face.corner_start,
                    expected: expected_start,
                });
            }
            if face.corner_count < 3 {
                return Err(MeshError::FaceTooSmall {
                    face: i,
                    count: face.corner_count,
                });
            }
            expected_start += face.corner_count;
        }
        if expected_start as usize != self.corners.len() {
            return Err(MeshError::CornersNotCovered {
                covered: expected_start as usize,
                total: self.corners.len(),
            });
        }

        for face in &self.faces {
            let range = face.corners();
            let corners = &self.corners[range.clone()];
            for (offset, corner) in corners.iter().enumerate() {
                let index = range.start + offset;
                let edge = self
                    .edges
                    .get(corner.edge as usize)
                    .filter(|_| corner.vert < vertex_count)
                    .ok_or(MeshError::CornerOutOfRange(index))?;
                let next = corners[(offset + 1) % corners.len()];
                if !edge.connects(corner.vert, next.vert) {
                    return Err(MeshError::CornerEdgeMismatch {
                        corner: index,
                        edge: corner.edge,
                    });
                }
            }
        }

        self.attributes.validate(|domain| self.domain_size(domain))?;
        Ok(())
    }
}

/// Builder for constructing meshes element by element.
#[derive(Debug, Clone, Default)]
pub struct MeshBuilder {
    mesh: Mesh,
}

impl MeshBuilder {
    /// Creates a new mesh builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder with pre-allocated capacity.
    pub fn with_capacity(vertices: usize, edges: usize, corners: usize, faces: usize) -> Self {
        Self {
            mesh: Mesh::with_capacity(vertices, edges, corners, faces),
        }
    }

    /// Adds a vertex with position and normal.
    pub fn vertex_with_normal(&mut self, position: Vec3, normal: Vec3) -> u32 {
        let index = self.mesh.positions.len() as u32;
        self.mesh.positions.push(position);
        self.mesh.normals.push(normal);
        index
    }

    /// Adds an edge.
    pub fn edge(&mut self, v1: u32, v2: u32, flags: EdgeFlags) -> u32 {
        let index = self.mesh.edges.len() as u32;
        self.mesh.edges.push(MeshEdge::new(v1, v2, flags));
        index
    }

    /// Adds a face from its corners, in winding order.
    pub fn face(&mut self, corners: &[Corner]) -> u32 {
        let index = self.mesh.faces.len() as u32;
        self.mesh.faces.push(Face {
            corner_start: self.mesh.corners.len() as u32,
            corner_count: corners.len() as u32,
        });
        self.mesh.corners.extend_from_slice(corners);
        index
    }

    /// Builds the final mesh.
    pub fn build(self) -> Mesh {
        self.mesh
    }
}

impl HasPositions for Mesh {
    fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    fn positions_mut(&mut self) -> &mut [Vec3] {
        &mut self.positions
    }
}

impl HasNormals for Mesh {
    fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    fn normals_mut(&mut self) -> &mut [Vec3] {
        &mut self.normals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rhizome_resin_core::AttributeData;

    /// A single quad with its four boundary edges.
    fn quad() -> Mesh {
        let mut builder = MeshBuilder::new();
        let v = [
            builder.vertex_with_normal(Vec3::new(0.0, 0.0, 0.0), Vec3::Z),
            builder.vertex_with_normal(Vec3::new(1.0, 0.0, 0.0), Vec3::Z),
            builder.vertex_with_normal(Vec3::new(1.0, 1.0, 0.0), Vec3::Z),
            builder.vertex_with_normal(Vec3::new(0.0, 1.0, 0.0), Vec3::Z),
        ];
        let flags = EdgeFlags::DRAW | EdgeFlags::RENDER;
        let e: Vec<u32> = (0..4).map(|i| builder.edge(v[i], v[(i + 1) % 4], flags)).collect();
        let corners: Vec<Corner> = (0..4).map(|i| Corner { vert: v[i], edge: e[i] }).collect();
        builder.face(&corners);
        builder.build()
    }

    #[test]
    fn test_mesh_builder() {
        let mesh = quad();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.edge_count(), 4);
        assert_eq!(mesh.corner_count(), 4);
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.face_corners(0).len(), 4);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_domain_size() {
        let mesh = quad();
        assert_eq!(mesh.domain_size(AttributeDomain::Point), 4);
        assert_eq!(mesh.domain_size(AttributeDomain::Face), 1);
        assert_eq!(mesh.domain_size(AttributeDomain::Instance), 0);
    }

    #[test]
    fn test_validate_wrong_corner_edge() {
        let mut mesh = quad();
        mesh.corners[0].edge = 2;
        assert!(matches!(
            mesh.validate(),
            Err(MeshError::CornerEdgeMismatch { corner: 0, edge: 2 })
        ));
    }

    #[test]
    fn test_validate_uncovered_corners() {
        let mut mesh = quad();
        mesh.faces[0].corner_count = 3;
        assert!(matches!(
            mesh.validate(),
            Err(MeshError::CornersNotCovered { covered: 3, total: 4 })
        ));
    }

    #[test]
    fn test_validate_attribute_length() {
        let mut mesh = quad();
        mesh.attributes.insert(
            "weight",
            AttributeDomain::Face,
            AttributeData::Float(vec![1.0, 2.0]),
        );
        assert!(matches!(mesh.validate(), Err(MeshError::Attribute(_))));
    }

    #[test]
    fn test_edge_flags() {
        let flags = EdgeFlags::DRAW | EdgeFlags::RENDER;
        assert!(flags.contains(EdgeFlags::DRAW));
        assert!(!flags.contains(EdgeFlags::LOOSE));
    }

    #[test]
    fn test_transform() {
        let mut mesh = quad();
        mesh.transform(glam::Mat4::from_translation(Vec3::Z));
        assert_eq!(mesh.positions[0], Vec3::Z);
        assert!((mesh.normals[0] - Vec3::Z).length() < 1e-6);
    }
}

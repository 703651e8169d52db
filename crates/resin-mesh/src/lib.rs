//! Polygon meshes for resin.
//!
//! Provides the vertex/edge/corner/face mesh used by geometry nodes, domain
//! adaptation of its attributes, and mesh primitives.

mod adapt;
mod error;
mod mesh;
mod primitives;

pub use error::MeshError;
pub use mesh::{Corner, EdgeFlags, Face, Mesh, MeshBuilder, MeshEdge, UV_MAP};
pub use primitives::{
    Line, UvSphere, line, sphere, sphere_corner_total, sphere_edge_total, sphere_face_total,
    sphere_vertex_total, uv_sphere,
};

//! Mesh validation errors.

use rhizome_resin_core::AttributeError;
use thiserror::Error;

/// A broken mesh invariant found by [`Mesh::validate`](crate::Mesh::validate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    /// Normals and positions differ in length.
    #[error("mesh has {positions} positions but {normals} normals")]
    NormalCountMismatch {
        /// Number of positions.
        positions: usize,
        /// Number of normals.
        normals: usize,
    },

    /// An edge references a vertex that does not exist.
    #[error("edge {edge} references missing vertex {vertex}")]
    EdgeOutOfRange {
        /// Edge index.
        edge: usize,
        /// Offending vertex index.
        vertex: u32,
    },

    /// An edge connects a vertex to itself.
    #[error("edge {0} connects a vertex to itself")]
    DegenerateEdge(usize),

    /// A face's corner range does not start where the previous one ended.
    #[error("face {face} starts at corner {start}, expected {expected}")]
    FaceNotContiguous {
        /// Face index.
        face: usize,
        /// Actual corner start.
        start: u32,
        /// Expected corner start.
        expected: u32,
    },

    /// A face has fewer than three corners.
    #[error("face {face} has {count} corners")]
    FaceTooSmall {
        /// Face index.
        face: usize,
        /// Corner count.
        count: u32,
    },

    /// The faces do not cover every corner exactly once.
    #[error("faces cover {covered} of {total} corners")]
    CornersNotCovered {
        /// Corners covered by faces.
        covered: usize,
        /// Total corners.
        total: usize,
    },

    /// A corner references a missing vertex or edge.
    #[error("corner {0} references a missing vertex or edge")]
    CornerOutOfRange(usize),

    /// A corner's edge does not connect its vertex to the next corner's vertex.
    #[error("corner {corner} uses edge {edge}, which does not lead to the next corner")]
    CornerEdgeMismatch {
        /// Corner index.
        corner: usize,
        /// Edge index stored on the corner.
        edge: u32,
    },

    /// An attribute length disagrees with its domain.
    #[error(transparent)]
    Attribute(#[from] AttributeError),
}

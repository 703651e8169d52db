//! Moving attribute values between mesh domains.
//!
//! Going from a coarser to a finer domain copies (a corner takes its
//! vertex's value); going the other way averages every connected element.
//! Pairs without a direct rule go through the point domain.

use rhizome_resin_core::{AttributeData, AttributeDomain, AttributeSlice};

use crate::Mesh;

impl Mesh {
    /// For each vertex, the corners that use it.
    pub fn vertex_corner_map(&self) -> Vec<Vec<u32>> {
        let mut map = vec![Vec::new(); self.vertex_count()];
        for (i, corner) in self.corners.iter().enumerate() {
            map[corner.vert as usize].push(i as u32);
        }
        map
    }

    /// For each vertex, the faces that use it (once per face).
    pub fn vertex_face_map(&self) -> Vec<Vec<u32>> {
        let mut map: Vec<Vec<u32>> = vec![Vec::new(); self.vertex_count()];
        for (f, face) in self.faces.iter().enumerate() {
            for corner in &self.corners[face.corners()] {
                let faces = &mut map[corner.vert as usize];
                if faces.last() != Some(&(f as u32)) {
                    faces.push(f as u32);
                }
            }
        }
        map
    }

    /// For each vertex, the edges that touch it.
    pub fn vertex_edge_map(&self) -> Vec<Vec<u32>> {
        let mut map = vec![Vec::new(); self.vertex_count()];
        for (e, edge) in self.edges.iter().enumerate() {
            map[edge.v1 as usize].push(e as u32);
            map[edge.v2 as usize].push(e as u32);
        }
        map
    }

    /// For each corner, the face it belongs to.
    pub fn corner_face_indices(&self) -> Vec<u32> {
        let mut indices = vec![0; self.corner_count()];
        for (f, face) in self.faces.iter().enumerate() {
            indices[face.corners()].fill(f as u32);
        }
        indices
    }

    /// Converts a column from one domain to another.
    ///
    /// Returns `None` if either domain does not exist on a mesh or if `data`
    /// does not match the size of `from`.
    pub fn adapt_domain(
        &self,
        data: AttributeSlice<'_>,
        from: AttributeDomain,
        to: AttributeDomain,
    ) -> Option<AttributeData> {
        use AttributeDomain::*;

        if matches!(from, Curve | Instance) || matches!(to, Curve | Instance) {
            return None;
        }
        if data.len() != self.domain_size(from) {
            return None;
        }

        let adapted = match (from, to) {
            _ if from == to => data.to_data(),
            (Point, Corner) => {
                let verts: Vec<u32> = self.corners.iter().map(|c| c.vert).collect();
                data.gather(&verts)
            }
            (Face, Corner) => data.gather(&self.corner_face_indices()),
            (Corner, Point) => data.mix_groups(&self.vertex_corner_map()),
            (Corner, Face) => data.mix_groups(&self.face_groups(|i, _| i as u32)),
            (Point, Face) => data.mix_groups(&self.face_groups(|_, c| c.vert)),
            (Face, Point) => data.mix_groups(&self.vertex_face_map()),
            (Point, Edge) => {
                let groups: Vec<Vec<u32>> =
                    self.edges.iter().map(|e| vec![e.v1, e.v2]).collect();
                data.mix_groups(&groups)
            }
            (Edge, Point) => data.mix_groups(&self.vertex_edge_map()),
            _ => {
                let points = self.adapt_domain(data, from, Point)?;
                self.adapt_domain(points.as_slice(), Point, to)?
            }
        };
        Some(adapted)
    }

    /// One group per face, built from each corner's index and value.
    fn face_groups(&self, key: impl Fn(usize, &crate::Corner) -> u32) -> Vec<Vec<u32>> {
        self.faces
            .iter()
            .map(|face| {
                face.corners()
                    .map(|i| key(i, &self.corners[i]))
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uv_sphere;
    use glam::Vec3;

    #[test]
    fn test_point_to_corner_copies() {
        let mesh = uv_sphere(1.0, 4, 3);
        let ids: Vec<i32> = (0..mesh.vertex_count() as i32).collect();
        let adapted = mesh
            .adapt_domain(
                AttributeSlice::Int(&ids),
                AttributeDomain::Point,
                AttributeDomain::Corner,
            )
            .unwrap();
        let AttributeData::Int(values) = adapted else {
            panic!("type changed");
        };
        for (corner, value) in mesh.corners.iter().zip(values) {
            assert_eq!(corner.vert as i32, value);
        }
    }

    #[test]
    fn test_corner_to_point_averages() {
        let mesh = uv_sphere(1.0, 4, 3);
        let ones = vec![1.0f32; mesh.corner_count()];
        let adapted = mesh
            .adapt_domain(
                AttributeSlice::Float(&ones),
                AttributeDomain::Corner,
                AttributeDomain::Point,
            )
            .unwrap();
        assert_eq!(adapted, AttributeData::Float(vec![1.0; mesh.vertex_count()]));
    }

    #[test]
    fn test_point_to_face_averages_positions() {
        let mesh = uv_sphere(1.0, 8, 4);
        let adapted = mesh
            .adapt_domain(
                AttributeSlice::Float3(&mesh.positions),
                AttributeDomain::Point,
                AttributeDomain::Face,
            )
            .unwrap();
        let AttributeData::Float3(centers) = adapted else {
            panic!("type changed");
        };
        assert_eq!(centers.len(), mesh.face_count());
        // The first fan face touches the north pole.
        assert!(centers[0].z > 0.5);
        assert!(centers.iter().all(|c| c.length() < 1.0));
    }

    #[test]
    fn test_edge_to_face_goes_through_points() {
        let mesh = uv_sphere(1.0, 4, 3);
        let edges = vec![Vec3::ONE; mesh.edge_count()];
        let adapted = mesh
            .adapt_domain(
                AttributeSlice::Float3(&edges),
                AttributeDomain::Edge,
                AttributeDomain::Face,
            )
            .unwrap();
        assert_eq!(adapted, AttributeData::Float3(vec![Vec3::ONE; mesh.face_count()]));
    }

    #[test]
    fn test_unsupported_or_mismatched() {
        let mesh = uv_sphere(1.0, 4, 3);
        let values = vec![0.0f32; mesh.vertex_count()];
        let slice = AttributeSlice::Float(&values);
        assert!(
            mesh.adapt_domain(slice, AttributeDomain::Point, AttributeDomain::Instance)
                .is_none()
        );
        assert!(mesh.adapt_domain(slice, AttributeDomain::Face, AttributeDomain::Point).is_none());
    }
}

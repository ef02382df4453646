use cgmath::{EuclideanSpace, Point3, Vector3};

use crate::cave_state::{rendering::Vertex, voxels::block::block_side::BlockSide};

/// UV coordinates for the six vertices of a face, bound to the corners
/// lower-left, lower-right, upper-right, lower-left, upper-right, upper-left.
pub const FACE_TEX_COORDS: [[f32; 2]; 6] = [
    [0.0, 0.0],
    [1.0, 0.0],
    [1.0, 1.0],
    [0.0, 0.0],
    [1.0, 1.0],
    [0.0, 1.0],
];

/// Represents a single unit quad on the boundary of a solid cell.
///
/// The four corners are named as seen from outside the cell. Corners come
/// from the per-side frame in [`BlockSide::frame`] rather than one general
/// formula, so every side has its own corner and edge convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// Lower-left corner of the face in cave coordinates
    pub ll: Point3<f32>,
    /// Lower-right corner of the face in cave coordinates
    pub lr: Point3<f32>,
    /// Upper-right corner of the face in cave coordinates
    pub ur: Point3<f32>,
    /// Upper-left corner of the face in cave coordinates
    pub ul: Point3<f32>,
    /// Which side of the cell this face represents
    pub block_side: BlockSide,
}

impl Face {
    /// Creates the face on `block_side` of the cell at `(x, y, z)`.
    ///
    /// The cell spans `[x, x + 1] × [y, y + 1] × [z, z + 1]`.
    pub fn new(x: i32, y: i32, z: i32, block_side: BlockSide) -> Self {
        let frame = block_side.frame();
        let origin = Vector3::new(x as f32, y as f32, z as f32);
        let ll = Point3::from_vec(origin + frame.corner);

        Face {
            ll,
            lr: ll + frame.right,
            ur: ll + frame.right + frame.up,
            ul: ll + frame.up,
            block_side,
        }
    }

    /// Two counter-clockwise triangles covering the face.
    ///
    /// Order: lower-left, lower-right, upper-right, lower-left, upper-right,
    /// upper-left, with [`FACE_TEX_COORDS`] and a constant normal.
    pub fn vertices(&self) -> [Vertex; 6] {
        let normal = self.block_side.normal();
        let corners = [self.ll, self.lr, self.ur, self.ll, self.ur, self.ul];
        let mut vertices = [Vertex::new(self.ll, normal, FACE_TEX_COORDS[0]); 6];
        for (i, corner) in corners.into_iter().enumerate() {
            vertices[i] = Vertex::new(corner, normal, FACE_TEX_COORDS[i]);
        }
        vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::InnerSpace;

    #[test]
    fn test_triangles_wind_counter_clockwise_from_outside() {
        for side in BlockSide::all() {
            let vertices = Face::new(3, -2, 7, side).vertices();
            for triangle in vertices.chunks(3) {
                let a = triangle[0].position();
                let b = triangle[1].position();
                let c = triangle[2].position();
                let winding = (b - a).cross(c - a).normalize();
                assert_eq!(winding, side.normal(), "{:?}", side);
            }
        }
    }

    #[test]
    fn test_face_corners_stay_on_the_cell() {
        for side in BlockSide::all() {
            let face = Face::new(5, 6, 7, side);
            for corner in [face.ll, face.lr, face.ur, face.ul] {
                assert!((5.0..=6.0).contains(&corner.x), "{:?} {:?}", side, corner);
                assert!((6.0..=7.0).contains(&corner.y), "{:?} {:?}", side, corner);
                assert!((7.0..=8.0).contains(&corner.z), "{:?} {:?}", side, corner);
            }
        }
    }

    #[test]
    fn test_opposite_faces_of_neighbours_coincide() {
        // The +X face of (0,0,0) and the -X face of (1,0,0) cover the same square
        let right = Face::new(0, 0, 0, BlockSide::RIGHT);
        let left = Face::new(1, 0, 0, BlockSide::LEFT);
        let mut a = [right.ll, right.lr, right.ur, right.ul].map(Into::<[f32; 3]>::into);
        let mut b = [left.ll, left.lr, left.ur, left.ul].map(Into::<[f32; 3]>::into);
        a.sort_by(|p, q| p.partial_cmp(q).unwrap());
        b.sort_by(|p, q| p.partial_cmp(q).unwrap());
        assert_eq!(a, b);
    }

    #[test]
    fn test_vertices_carry_normal_and_uvs() {
        let vertices = Face::new(0, 0, 0, BlockSide::TOP).vertices();
        for (i, vertex) in vertices.iter().enumerate() {
            assert_eq!(vertex.normal(), Vector3::new(0.0, 1.0, 0.0));
            assert_eq!(vertex.tex_coords(), FACE_TEX_COORDS[i]);
        }
        assert_eq!(vertices[0].position(), vertices[3].position());
        assert_eq!(vertices[2].position(), vertices[4].position());
    }
}

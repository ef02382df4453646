//! # Block Side Module
//!
//! This module defines the six axis-aligned faces of a voxel cell, together
//! with the neighbour offset each face looks across and the corner frame used
//! to emit its quad.

use cgmath::{Point3, Vector3};

/// Represents the six possible faces of a voxel cell.
///
/// The order is: [FRONT, BACK, BOTTOM, TOP, LEFT, RIGHT]. The mesher visits
/// faces in this order, so it also fixes the order of quads within a cell.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The front face (facing positive Z)
    FRONT = 0,

    /// The back face (facing negative Z)
    BACK = 1,

    /// The bottom face (facing negative Y)
    BOTTOM = 2,

    /// The top face (facing positive Y)
    TOP = 3,

    /// The left face (facing negative X)
    LEFT = 4,

    /// The right face (facing positive X)
    RIGHT = 5,
}

/// Corner layout of one face of the unit cell at the origin.
///
/// `corner` is the bottom-left of the quad as seen from outside the cell;
/// `right` and `up` span it. For every side `right × up` equals the outward
/// normal, which makes `corner, corner + right, corner + right + up`
/// counter-clockwise from outside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceFrame {
    /// Bottom-left corner relative to the cell's minimum corner
    pub corner: Vector3<f32>,
    /// Unit edge pointing right along the face
    pub right: Vector3<f32>,
    /// Unit edge pointing up along the face
    pub up: Vector3<f32>,
}

impl BlockSide {
    /// Returns an array containing all six block faces in a consistent order.
    ///
    /// The order is: [FRONT, BACK, BOTTOM, TOP, LEFT, RIGHT]
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::FRONT,
            BlockSide::BACK,
            BlockSide::BOTTOM,
            BlockSide::TOP,
            BlockSide::LEFT,
            BlockSide::RIGHT,
        ]
    }

    /// Integer step from a cell to the neighbour this face touches.
    pub fn offset(self) -> Vector3<i32> {
        match self {
            BlockSide::FRONT => Vector3::new(0, 0, 1),
            BlockSide::BACK => Vector3::new(0, 0, -1),
            BlockSide::BOTTOM => Vector3::new(0, -1, 0),
            BlockSide::TOP => Vector3::new(0, 1, 0),
            BlockSide::LEFT => Vector3::new(-1, 0, 0),
            BlockSide::RIGHT => Vector3::new(1, 0, 0),
        }
    }

    /// Outward unit normal of the face.
    pub fn normal(self) -> Vector3<f32> {
        self.offset().cast::<f32>().unwrap_or(Vector3::new(0.0, 0.0, 0.0))
    }

    /// Coordinates of the neighbouring cell across this face. May lie outside
    /// the grid; callers classify such cells as open.
    pub fn neighbour_of(self, cell: Point3<i32>) -> Point3<i32> {
        cell + self.offset()
    }

    /// Per-side corner frame for the cell spanning `[0, 1]` on every axis.
    pub fn frame(self) -> FaceFrame {
        let (corner, right, up): ([f32; 3], [f32; 3], [f32; 3]) = match self {
            BlockSide::FRONT => ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            BlockSide::BACK => ([1.0, 0.0, 0.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            BlockSide::BOTTOM => ([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
            BlockSide::TOP => ([0.0, 1.0, 1.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
            BlockSide::LEFT => ([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
            BlockSide::RIGHT => ([1.0, 0.0, 1.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        };
        FaceFrame {
            corner: corner.into(),
            right: right.into(),
            up: up.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::InnerSpace;

    #[test]
    fn test_frames_span_outward_normal() {
        for side in BlockSide::all() {
            let frame = side.frame();
            assert_eq!(frame.right.cross(frame.up), side.normal(), "{:?}", side);
            assert_eq!(frame.right.magnitude(), 1.0);
            assert_eq!(frame.up.magnitude(), 1.0);
        }
    }

    #[test]
    fn test_frames_lie_on_the_face_plane() {
        for side in BlockSide::all() {
            let frame = side.frame();
            let normal = side.normal();
            // Positive-facing sides sit on the far plane
            let expected_plane = if normal.x + normal.y + normal.z > 0.0 { 1.0 } else { 0.0 };
            for corner in [
                frame.corner,
                frame.corner + frame.right,
                frame.corner + frame.up,
                frame.corner + frame.right + frame.up,
            ] {
                assert_eq!(corner.dot(normal.map(f32::abs)), expected_plane, "{:?}", side);
                for axis in 0..3 {
                    assert!((0.0..=1.0).contains(&corner[axis]), "{:?} {:?}", side, corner);
                }
            }
        }
    }

    #[test]
    fn test_offsets_are_opposite_pairs() {
        assert_eq!(BlockSide::FRONT.offset(), -BlockSide::BACK.offset());
        assert_eq!(BlockSide::TOP.offset(), -BlockSide::BOTTOM.offset());
        assert_eq!(BlockSide::RIGHT.offset(), -BlockSide::LEFT.offset());
        assert_eq!(
            BlockSide::TOP.neighbour_of(Point3::new(2, 3, 4)),
            Point3::new(2, 4, 4)
        );
    }
}

//! # Cube Primitive
//!
//! The solid cube `[0, cube_size]³` the pores are cut from.

use glam::DVec3;

use crate::error::{MeshError, MeshResult};
use crate::mesh::Mesh;

/// Faces as corner quads, counter-clockwise seen from outside.
///
/// Corner `i` sits at `(i & 1, (i >> 1) & 1, (i >> 2) & 1) · cube_size`.
const FACES: [[u32; 4]; 6] = [
    [0, 2, 3, 1], // z = 0
    [4, 5, 7, 6], // z = size
    [0, 1, 5, 4], // y = 0
    [2, 6, 7, 3], // y = size
    [0, 4, 6, 2], // x = 0
    [1, 3, 7, 5], // x = size
];

/// Creates the cube mesh in cube coordinates.
///
/// # Example
///
/// ```rust
/// use pore_mesh::primitives::create_cube;
///
/// let mesh = create_cube(10.0).unwrap();
/// assert_eq!(mesh.vertex_count(), 8);
/// assert_eq!(mesh.triangle_count(), 12);
/// assert!((mesh.signed_volume() - 1000.0).abs() < 1e-9);
/// ```
pub fn create_cube(cube_size: f64) -> MeshResult<Mesh> {
    if !(cube_size.is_finite() && cube_size > 0.0) {
        return Err(MeshError::degenerate(format!(
            "cube size must be positive and finite, got {cube_size}"
        )));
    }

    let mut mesh = Mesh::with_capacity(8, 12);
    for corner in 0..8u32 {
        let unit = DVec3::new(
            f64::from(corner & 1),
            f64::from((corner >> 1) & 1),
            f64::from((corner >> 2) & 1),
        );
        mesh.add_vertex(unit * cube_size);
    }
    for [a, b, c, d] in FACES {
        mesh.add_quad(a, b, c, d);
    }
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cube_spans_cube_coordinates() {
        let mesh = create_cube(10.0).unwrap();
        assert_eq!(mesh.bounding_box(), (DVec3::ZERO, DVec3::splat(10.0)));
        assert!(mesh.is_well_formed());
    }

    #[test]
    fn test_cube_faces_point_outward() {
        let mesh = create_cube(2.0).unwrap();
        let center = DVec3::splat(1.0);
        for (index, [a, b, c]) in mesh.iter_triangles().enumerate() {
            let centroid = (a + b + c) / 3.0;
            assert!(mesh.face_normal(index).dot(centroid - center) > 0.0);
        }
        assert_relative_eq!(mesh.signed_volume(), 8.0, epsilon = 1e-12);
    }

    #[test]
    fn test_cube_rejects_bad_size() {
        assert!(create_cube(0.0).is_err());
        assert!(create_cube(-5.0).is_err());
        assert!(create_cube(f64::NAN).is_err());
        assert!(create_cube(f64::INFINITY).is_err());
    }
}

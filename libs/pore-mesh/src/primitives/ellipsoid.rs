//! # Ellipsoid Primitive
//!
//! Axis-aligned ellipsoids as a non-uniformly scaled unit sphere.

use glam::DVec3;

use crate::error::{MeshError, MeshResult};
use crate::mesh::Mesh;
use crate::primitives::sphere::create_sphere;

/// Creates an axis-aligned ellipsoid centered at the origin.
///
/// A positive scale keeps the sphere's winding, so normals stay outward.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use pore_mesh::primitives::create_ellipsoid;
///
/// let mesh = create_ellipsoid(DVec3::new(3.0, 2.0, 1.0), 16).unwrap();
/// let (_, max) = mesh.bounding_box();
/// assert!(max.x <= 3.0 && max.z <= 1.0);
/// ```
pub fn create_ellipsoid(semi_axes: DVec3, segments: u32) -> MeshResult<Mesh> {
    if !semi_axes.is_finite() || semi_axes.min_element() <= 0.0 {
        return Err(MeshError::degenerate(format!(
            "Ellipsoid semi-axes must be positive: {:?}",
            semi_axes
        )));
    }

    let mut mesh = create_sphere(1.0, segments)?;
    mesh.scale(semi_axes);
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_ellipsoid_volume_scales_with_axes() {
        let sphere = create_sphere(1.0, 32).unwrap().signed_volume();
        let ellipsoid = create_ellipsoid(DVec3::new(3.0, 2.0, 0.5), 32)
            .unwrap()
            .signed_volume();
        assert!((ellipsoid - 3.0 * sphere).abs() < 1e-9);
        assert!(ellipsoid < 4.0 / 3.0 * PI * 3.0);
    }

    #[test]
    fn test_ellipsoid_validates() {
        let mesh = create_ellipsoid(DVec3::new(0.3, 0.2, 0.1), 16).unwrap();
        assert!(mesh.is_well_formed());
    }

    #[test]
    fn test_ellipsoid_rejects_flat_axis() {
        assert!(create_ellipsoid(DVec3::new(1.0, 0.0, 1.0), 16).is_err());
    }
}

//! # Primitives
//!
//! Mesh generation for the cube and the pore shapes.

pub mod cube;
pub mod ellipsoid;
pub mod sphere;

pub use cube::create_cube;
pub use ellipsoid::create_ellipsoid;
pub use sphere::create_sphere;

use pore_layout::{PorePlacement, PoreShape};

use crate::error::MeshResult;
use crate::mesh::Mesh;

/// Tessellates a placed pore at its center.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use pore_layout::{PorePlacement, PoreShape};
/// use pore_mesh::primitives::create_pore;
///
/// let placement = PorePlacement::new(PoreShape::sphere(0.5).unwrap(), DVec3::splat(5.0));
/// let mesh = create_pore(&placement, 16).unwrap();
/// let (min, max) = mesh.bounding_box();
/// assert!(min.x > 4.4 && max.x < 5.6);
/// ```
pub fn create_pore(placement: &PorePlacement, segments: u32) -> MeshResult<Mesh> {
    let mut mesh = match placement.shape {
        PoreShape::Sphere { radius } => create_sphere(radius, segments)?,
        PoreShape::Ellipsoid { .. } => create_ellipsoid(placement.shape.semi_axes(), segments)?,
    };
    mesh.translate(placement.center);
    Ok(mesh)
}

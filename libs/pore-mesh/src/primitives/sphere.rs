//! # Sphere Primitive
//!
//! Generates sphere meshes using latitude/longitude tessellation.

use crate::error::{MeshError, MeshResult};
use crate::mesh::Mesh;
use config::constants::MIN_PORE_SEGMENTS;
use glam::DVec3;
use std::f64::consts::PI;

/// Creates a sphere mesh centered at the origin.
///
/// # Arguments
///
/// * `radius` - The radius of the sphere
/// * `segments` - Number of segments around the circumference
///
/// # Algorithm
///
/// - num_rings = (segments + 1) / 2
/// - Each ring at polar angle phi = 180° * (i + 0.5) / num_rings
/// - No pole vertices; the first and last rings are closed with fans
///
/// Every vertex lies on the sphere, so the tessellation is inscribed and its
/// volume is slightly below `(4/3)·π·r³`.
///
/// # Example
///
/// ```rust
/// use pore_mesh::primitives::create_sphere;
///
/// let mesh = create_sphere(5.0, 32).unwrap();
/// assert_eq!(mesh.vertex_count(), 16 * 32);
/// ```
pub fn create_sphere(radius: f64, segments: u32) -> MeshResult<Mesh> {
    if !(radius.is_finite() && radius > 0.0) {
        return Err(MeshError::degenerate(format!(
            "Sphere radius must be positive: {}",
            radius
        )));
    }

    if segments < MIN_PORE_SEGMENTS {
        return Err(MeshError::degenerate(format!(
            "Sphere segments must be at least {}: {}",
            MIN_PORE_SEGMENTS, segments
        )));
    }

    let num_rings = (segments + 1) / 2;
    let ring_len = segments as usize;
    let mut mesh = Mesh::with_capacity(
        num_rings as usize * ring_len,
        2 * ring_len * num_rings as usize,
    );

    let mut rings: Vec<Vec<u32>> = Vec::with_capacity(num_rings as usize);

    for i in 0..num_rings {
        // Polar angle (0 = top, PI = bottom)
        let phi = PI * (i as f64 + 0.5) / num_rings as f64;
        let (sin_phi, cos_phi) = phi.sin_cos();
        let ring_radius = radius * sin_phi;
        let z = radius * cos_phi;

        let ring = (0..segments)
            .map(|j| {
                let theta = 2.0 * PI * j as f64 / segments as f64;
                let (sin_theta, cos_theta) = theta.sin_cos();
                mesh.add_vertex(DVec3::new(
                    ring_radius * cos_theta,
                    ring_radius * sin_theta,
                    z,
                ))
            })
            .collect();
        rings.push(ring);
    }

    // Top cap
    let first = &rings[0];
    for j in 1..ring_len - 1 {
        mesh.add_triangle(first[0], first[j], first[j + 1]);
    }

    // Bands between adjacent rings
    for pair in rings.windows(2) {
        let (upper, lower) = (&pair[0], &pair[1]);
        for j in 0..ring_len {
            let j_next = (j + 1) % ring_len;
            mesh.add_triangle(upper[j], lower[j], lower[j_next]);
            mesh.add_triangle(upper[j], lower[j_next], upper[j_next]);
        }
    }

    // Bottom cap, reversed
    let last = &rings[rings.len() - 1];
    for j in 1..ring_len - 1 {
        mesh.add_triangle(last[0], last[j + 1], last[j]);
    }

    Ok(mesh)
}

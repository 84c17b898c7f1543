//! # Planar Cross-Sections
//!
//! Intersects a mesh with an axis-aligned plane and returns the cut as 2D
//! line segments in the plane's own coordinates.
//!
//! ## Algorithm
//!
//! Each triangle is tested against the plane. A vertex counts as above the
//! plane when its signed distance is `>= 0`, so every edge crosses at most
//! once and shared edges produce the same point from both neighbours.
//! Triangles with one vertex on each side contribute one segment.
//!
//! A plane lying exactly on a bounding face of the mesh is moved
//! [`SECTION_BOUNDARY_INSET`] inside it.

use config::constants::{EPSILON, SECTION_BOUNDARY_INSET};
use glam::{DVec2, DVec3};
use pore_batch::SectionPlane;

use crate::mesh::Mesh;

/// The cut of a mesh by one plane.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossSection {
    /// Section plane
    pub plane: SectionPlane,
    /// Requested plane offset along the normal axis
    pub offset: f64,
    /// Cut segments in (horizontal, vertical) plane coordinates
    pub segments: Vec<[DVec2; 2]>,
}

impl CrossSection {
    /// True when the plane produced no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Total length of all segments.
    pub fn perimeter(&self) -> f64 {
        self.segments.iter().map(|[a, b]| a.distance(*b)).sum()
    }

    /// Bounding rectangle of the segments as (min, max).
    pub fn bounds(&self) -> (DVec2, DVec2) {
        let mut points = self.segments.iter().flatten();
        let Some(first) = points.next() else {
            return (DVec2::ZERO, DVec2::ZERO);
        };
        points.fold((*first, *first), |(min, max), p| (min.min(*p), max.max(*p)))
    }
}

/// Cuts `mesh` with `plane` at `offset`.
///
/// Returns `None` when the plane lies outside the mesh bounds or cuts
/// nothing.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use pore_batch::SectionPlane;
/// use pore_mesh::primitives::create_cube;
/// use pore_mesh::section::cross_section;
///
/// let cube = create_cube(2.0).unwrap();
/// let section = cross_section(&cube, SectionPlane::XY, 1.0).unwrap();
/// assert!((section.perimeter() - 8.0).abs() < 1e-9);
/// ```
pub fn cross_section(mesh: &Mesh, plane: SectionPlane, offset: f64) -> Option<CrossSection> {
    if mesh.is_empty() || !offset.is_finite() {
        return None;
    }

    let axis = plane.normal_axis();
    let (min, max) = mesh.bounding_box();
    let (lo, hi) = (min[axis], max[axis]);
    if offset < lo - EPSILON || offset > hi + EPSILON {
        return None;
    }
    let cut = if (hi - lo) <= 2.0 * SECTION_BOUNDARY_INSET {
        (lo + hi) / 2.0
    } else {
        offset.clamp(lo + SECTION_BOUNDARY_INSET, hi - SECTION_BOUNDARY_INSET)
    };

    let (u, v) = plane.in_plane_axes();
    let project = |p: DVec3| DVec2::new(p[u], p[v]);

    let segments: Vec<[DVec2; 2]> = mesh
        .iter_triangles()
        .filter_map(|tri| triangle_cut(tri, axis, cut))
        .map(|[a, b]| [project(a), project(b)])
        .filter(|[a, b]| a.distance_squared(*b) > EPSILON * EPSILON)
        .collect();

    if segments.is_empty() {
        return None;
    }

    Some(CrossSection {
        plane,
        offset,
        segments,
    })
}

/// Intersection segment of one triangle with the plane `p[axis] = cut`.
fn triangle_cut(tri: [DVec3; 3], axis: usize, cut: f64) -> Option<[DVec3; 2]> {
    let d = tri.map(|p| p[axis] - cut);
    let mut points = [DVec3::ZERO; 2];
    let mut count = 0;

    for i in 0..3 {
        let j = (i + 1) % 3;
        if (d[i] >= 0.0) != (d[j] >= 0.0) {
            let t = d[i] / (d[i] - d[j]);
            if count < 2 {
                points[count] = tri[i].lerp(tri[j], t);
            }
            count += 1;
        }
    }

    (count == 2).then_some(points)
}

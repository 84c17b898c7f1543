//! # Mesh
//!
//! Indexed triangle surfaces for the cube, the pores and the porous solid.
//!
//! All meshes live in cube coordinates: the cube spans `[0, cube_size]³`
//! and a pore mesh sits at its placement center.

use glam::DVec3;

/// Closed triangle surface.
///
/// Triangles wind counter-clockwise seen from outside, so face normals point
/// away from the material. After a pore is subtracted its cavity is wound
/// inward, which keeps [`Mesh::signed_volume`] equal to the material volume.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use pore_layout::{PorePlacement, PoreShape};
/// use pore_mesh::primitives::create_pore;
///
/// let pore = PorePlacement::new(PoreShape::sphere(1.0).unwrap(), DVec3::splat(5.0));
/// let mesh = create_pore(&pore, 16).unwrap();
/// let (min, max) = mesh.bounding_box();
/// assert!((min + max - DVec3::splat(10.0)).length() < 1e-9);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<DVec3>,
    triangles: Vec<[u32; 3]>,
}

impl Mesh {
    /// Empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty surface with room for the given counts.
    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// True when the surface has no triangles; a subtraction that removes
    /// all material yields one.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Appends a vertex and returns its index.
    pub fn add_vertex(&mut self, position: DVec3) -> u32 {
        self.vertices.push(position);
        (self.vertices.len() - 1) as u32
    }

    pub fn add_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.triangles.push([a, b, c]);
    }

    /// Adds a planar quad as two triangles, `a b c d` counter-clockwise.
    pub fn add_quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.triangles.push([a, b, c]);
        self.triangles.push([a, c, d]);
    }

    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Corner positions of triangle `index`.
    #[inline]
    pub fn triangle_vertices(&self, index: usize) -> [DVec3; 3] {
        self.triangles[index].map(|i| self.vertices[i as usize])
    }

    /// Corner positions of every triangle, in index order.
    pub fn iter_triangles(&self) -> impl Iterator<Item = [DVec3; 3]> + '_ {
        self.triangles
            .iter()
            .map(|tri| tri.map(|i| self.vertices[i as usize]))
    }

    /// Outward unit normal of triangle `index`; zero when degenerate.
    pub fn face_normal(&self, index: usize) -> DVec3 {
        let [a, b, c] = self.triangle_vertices(index);
        (b - a).cross(c - a).normalize_or_zero()
    }

    /// Axis-aligned bounds as (min, max); both zero for an empty mesh.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        let Some(&first) = self.vertices.first() else {
            return (DVec3::ZERO, DVec3::ZERO);
        };
        self.vertices
            .iter()
            .fold((first, first), |(min, max), v| (min.min(*v), max.max(*v)))
    }

    /// Enclosed volume by the divergence theorem.
    ///
    /// Only meaningful for closed, consistently wound surfaces.
    pub fn signed_volume(&self) -> f64 {
        self.iter_triangles()
            .map(|[a, b, c]| a.dot(b.cross(c)))
            .sum::<f64>()
            / 6.0
    }

    /// Moves every vertex by `offset`.
    pub fn translate(&mut self, offset: DVec3) {
        self.vertices.iter_mut().for_each(|v| *v += offset);
    }

    /// Scales every vertex per axis about the origin.
    ///
    /// Positive factors keep the winding, so normals stay outward.
    pub fn scale(&mut self, factors: DVec3) {
        self.vertices.iter_mut().for_each(|v| *v *= factors);
    }

    /// True when every index is in range and no triangle has zero area.
    #[cfg(test)]
    pub(crate) fn is_well_formed(&self) -> bool {
        let count = self.vertices.len();
        self.triangles.iter().enumerate().all(|(index, tri)| {
            tri.iter().all(|&i| (i as usize) < count)
                && self.face_normal(index) != DVec3::ZERO
        })
    }
}

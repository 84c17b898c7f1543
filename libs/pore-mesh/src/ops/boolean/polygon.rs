//! # Polygon for BSP Operations
//!
//! Convex polygon with its supporting plane and plane splitting.

use glam::DVec3;

use super::plane::{Classification, Plane};

/// A convex polygon with associated plane.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    /// Vertices in counter-clockwise order seen from the front.
    vertices: Vec<DVec3>,
    /// Plane containing this polygon.
    plane: Plane,
}

/// Destination lists for [`Polygon::split`].
#[derive(Debug, Default)]
pub struct SplitResult {
    /// Coplanar polygons facing the same way as the plane
    pub coplanar_front: Vec<Polygon>,
    /// Coplanar polygons facing the opposite way
    pub coplanar_back: Vec<Polygon>,
    /// Polygons in front of the plane
    pub front: Vec<Polygon>,
    /// Polygons behind the plane
    pub back: Vec<Polygon>,
}

impl Polygon {
    /// Creates a polygon, computing its plane.
    ///
    /// Returns `None` for degenerate input.
    pub fn from_vertices(vertices: Vec<DVec3>) -> Option<Self> {
        let plane = Plane::from_points(&vertices)?;
        Some(Self { vertices, plane })
    }

    /// Creates a polygon on a known plane.
    fn with_plane(vertices: Vec<DVec3>, plane: Plane) -> Option<Self> {
        (vertices.len() >= 3).then_some(Self { vertices, plane })
    }

    /// Polygon vertices.
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Supporting plane.
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Reverses winding order and plane in place.
    pub fn flip(&mut self) {
        self.vertices.reverse();
        self.plane = self.plane.flip();
    }

    /// Classifies this polygon relative to a plane.
    pub fn classify(&self, plane: &Plane) -> Classification {
        let mut front = false;
        let mut back = false;

        for v in &self.vertices {
            match plane.classify_point(*v) {
                Classification::Front => front = true,
                Classification::Back => back = true,
                _ => {}
            }
        }

        match (front, back) {
            (true, true) => Classification::Spanning,
            (true, false) => Classification::Front,
            (false, true) => Classification::Back,
            (false, false) => Classification::Coplanar,
        }
    }

    /// Splits this polygon by a plane into `out`.
    pub fn split(self, plane: &Plane, out: &mut SplitResult) {
        match self.classify(plane) {
            Classification::Coplanar => {
                if self.plane.normal.dot(plane.normal) > 0.0 {
                    out.coplanar_front.push(self);
                } else {
                    out.coplanar_back.push(self);
                }
            }
            Classification::Front => out.front.push(self),
            Classification::Back => out.back.push(self),
            Classification::Spanning => {
                let mut front_verts = Vec::with_capacity(self.vertices.len() + 1);
                let mut back_verts = Vec::with_capacity(self.vertices.len() + 1);
                let n = self.vertices.len();

                for i in 0..n {
                    let vi = self.vertices[i];
                    let vj = self.vertices[(i + 1) % n];
                    let ti = plane.classify_point(vi);
                    let tj = plane.classify_point(vj);

                    if ti != Classification::Back {
                        front_verts.push(vi);
                    }
                    if ti != Classification::Front {
                        back_verts.push(vi);
                    }

                    let crosses = matches!(
                        (ti, tj),
                        (Classification::Front, Classification::Back)
                            | (Classification::Back, Classification::Front)
                    );
                    if crosses {
                        let di = plane.signed_distance(vi);
                        let dj = plane.signed_distance(vj);
                        let intersection = vi.lerp(vj, di / (di - dj));
                        front_verts.push(intersection);
                        back_verts.push(intersection);
                    }
                }

                // Fragments keep the parent plane
                if let Some(poly) = Polygon::with_plane(front_verts, self.plane) {
                    out.front.push(poly);
                }
                if let Some(poly) = Polygon::with_plane(back_verts, self.plane) {
                    out.back.push(poly);
                }
            }
        }
    }
}

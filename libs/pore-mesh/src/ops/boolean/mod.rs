//! # Boolean Operations (CSG)
//!
//! Constructive Solid Geometry difference using BSP trees.
//!
//! ## Algorithm
//!
//! csg.js by Evan Wallace, with `A - B = ~(~A | B)`:
//! `A.invert(); A.clipTo(B); B.clipTo(A); B.invert(); B.clipTo(A); B.invert();`
//! then the polygons of both trees, inverted once more.
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//! use pore_layout::{PorePlacement, PoreShape};
//! use pore_mesh::ops::boolean::difference;
//! use pore_mesh::primitives::{create_cube, create_pore};
//!
//! let cube = create_cube(10.0).unwrap();
//! let placement = PorePlacement::new(PoreShape::sphere(1.0).unwrap(), DVec3::splat(5.0));
//! let pore = create_pore(&placement, 12).unwrap();
//!
//! let porous = difference(&cube, &pore).unwrap();
//! assert!(porous.signed_volume() < 1000.0);
//! ```

mod bsp;
mod plane;
mod polygon;


use config::constants::MAX_TRIANGLES;
use glam::DVec3;

use crate::error::{MeshError, MeshResult};
use crate::mesh::Mesh;
use bsp::BspTree;
use polygon::Polygon;

// =============================================================================
// PUBLIC API
// =============================================================================

/// Computes the difference of two closed meshes (A - B).
///
/// ## Returns
///
/// The part of `a` outside `b`. Disjoint bounding boxes short-circuit to a
/// copy of `a`. Fails when the result exceeds [`MAX_TRIANGLES`].
pub fn difference(a: &Mesh, b: &Mesh) -> MeshResult<Mesh> {
    if a.is_empty() {
        return Ok(Mesh::new());
    }
    if b.is_empty() || !bounds_overlap(a.bounding_box(), b.bounding_box()) {
        return Ok(a.clone());
    }

    let mut tree_a = BspTree::new(mesh_to_polygons(a));
    let mut tree_b = BspTree::new(mesh_to_polygons(b));

    tree_a.invert();
    tree_a.clip_to(&tree_b);
    tree_b.clip_to(&tree_a);
    tree_b.invert();
    tree_b.clip_to(&tree_a);
    tree_b.invert();

    let mut polygons = tree_a.into_polygons();
    polygons.extend(tree_b.into_polygons());
    for poly in &mut polygons {
        poly.flip();
    }

    polygons_to_mesh(&polygons)
}

// =============================================================================
// CONVERSION HELPERS
// =============================================================================

fn bounds_overlap((min_a, max_a): (DVec3, DVec3), (min_b, max_b): (DVec3, DVec3)) -> bool {
    min_a.cmple(max_b).all() && min_b.cmple(max_a).all()
}

/// Converts each non-degenerate triangle into a polygon.
fn mesh_to_polygons(mesh: &Mesh) -> Vec<Polygon> {
    mesh.iter_triangles()
        .filter_map(|tri| Polygon::from_vertices(tri.to_vec()))
        .collect()
}

/// Fan-triangulates convex polygons back into a mesh.
fn polygons_to_mesh(polygons: &[Polygon]) -> MeshResult<Mesh> {
    let count: usize = polygons.iter().map(|p| p.vertices().len() - 2).sum();
    if count > MAX_TRIANGLES {
        return Err(MeshError::TooManyTriangles {
            count,
            max: MAX_TRIANGLES,
        });
    }

    let vertex_count = polygons.iter().map(|p| p.vertices().len()).sum();
    let mut mesh = Mesh::with_capacity(vertex_count, count);

    for poly in polygons {
        let base = mesh.vertex_count() as u32;
        for v in poly.vertices() {
            mesh.add_vertex(*v);
        }
        for i in 1..(poly.vertices().len() as u32 - 1) {
            mesh.add_triangle(base, base + i, base + i + 1);
        }
    }

    Ok(mesh)
}

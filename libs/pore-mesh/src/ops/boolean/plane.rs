//! # Plane for BSP Operations
//!
//! Oriented plane with point classification.

use config::constants::BSP_PLANE_EPSILON;
use glam::DVec3;

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// Classification of a point or polygon relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// In front of the plane (positive side).
    Front,
    /// Behind the plane (negative side).
    Back,
    /// On the plane.
    Coplanar,
    /// Polygon has vertices on both sides.
    Spanning,
}

// =============================================================================
// PLANE
// =============================================================================

/// A plane `normal · p = w` with unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit normal
    pub normal: DVec3,
    /// Distance from origin along normal
    pub w: f64,
}

impl Plane {
    /// Creates a plane from a unit normal and distance.
    pub fn new(normal: DVec3, w: f64) -> Self {
        Self { normal, w }
    }

    /// Creates the plane through a polygon using Newell's method.
    ///
    /// Returns `None` for fewer than three points or a degenerate polygon.
    /// Points are counter-clockwise seen from the front.
    pub fn from_points(points: &[DVec3]) -> Option<Self> {
        if points.len() < 3 {
            return None;
        }

        let mut normal = DVec3::ZERO;
        let mut centroid = DVec3::ZERO;
        for (i, current) in points.iter().enumerate() {
            let next = points[(i + 1) % points.len()];
            normal += current.cross(next);
            centroid += *current;
        }

        let length = normal.length();
        if !length.is_finite() || length < BSP_PLANE_EPSILON * BSP_PLANE_EPSILON {
            return None;
        }

        let normal = normal / length;
        let centroid = centroid / points.len() as f64;
        Some(Self {
            normal,
            w: normal.dot(centroid),
        })
    }

    /// Returns the plane facing the other way.
    pub fn flip(&self) -> Plane {
        Plane {
            normal: -self.normal,
            w: -self.w,
        }
    }

    /// Signed distance from point to plane; positive in front.
    #[inline]
    pub fn signed_distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) - self.w
    }

    /// Classifies a point relative to this plane.
    pub fn classify_point(&self, point: DVec3) -> Classification {
        let dist = self.signed_distance(point);
        if dist > BSP_PLANE_EPSILON {
            Classification::Front
        } else if dist < -BSP_PLANE_EPSILON {
            Classification::Back
        } else {
            Classification::Coplanar
        }
    }
}

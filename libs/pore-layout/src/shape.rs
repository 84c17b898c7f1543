//! # Pore Shapes
//!
//! Sphere and axis-aligned ellipsoid pore primitives, with the extent and
//! separation rules the sampler enforces for each.

use std::f64::consts::PI;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, LayoutResult};

/// A void primitive subtracted from the cube.
///
/// Ellipsoids are axis-aligned; no rotation is applied.
///
/// # Example
///
/// ```rust
/// use pore_layout::PoreShape;
///
/// let sphere = PoreShape::sphere(0.05).unwrap();
/// assert!((sphere.min_separation(0.01) - 0.11).abs() < 1e-12);
///
/// assert!(PoreShape::ellipsoid(0.3, 0.0, 0.1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PoreShape {
    /// Sphere of the given radius.
    Sphere {
        /// Sphere radius
        radius: f64,
    },
    /// Axis-aligned ellipsoid with the given semi-axes.
    Ellipsoid {
        /// Semi-axis along X
        semi_axis_x: f64,
        /// Semi-axis along Y
        semi_axis_y: f64,
        /// Semi-axis along Z
        semi_axis_z: f64,
    },
}

impl PoreShape {
    /// Creates a validated sphere.
    pub fn sphere(radius: f64) -> LayoutResult<Self> {
        let shape = Self::Sphere { radius };
        shape.validate()?;
        Ok(shape)
    }

    /// Creates a validated axis-aligned ellipsoid.
    pub fn ellipsoid(semi_axis_x: f64, semi_axis_y: f64, semi_axis_z: f64) -> LayoutResult<Self> {
        let shape = Self::Ellipsoid {
            semi_axis_x,
            semi_axis_y,
            semi_axis_z,
        };
        shape.validate()?;
        Ok(shape)
    }

    /// Checks that every axis length is positive and finite.
    ///
    /// Shapes deserialized from a parameters file bypass the constructors,
    /// so parameter validation calls this again.
    pub fn validate(&self) -> LayoutResult<()> {
        let axes = self.semi_axes();
        if axes.to_array().iter().all(|a| a.is_finite() && *a > 0.0) {
            Ok(())
        } else {
            Err(LayoutError::InvalidShape(format!(
                "all axis lengths must be positive and finite, got {:?}",
                axes.to_array()
            )))
        }
    }

    /// Short lowercase name used in logs and model names.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Sphere { .. } => "sphere",
            Self::Ellipsoid { .. } => "ellipsoid",
        }
    }

    /// Half extents along X, Y and Z.
    pub fn semi_axes(&self) -> DVec3 {
        match *self {
            Self::Sphere { radius } => DVec3::splat(radius),
            Self::Ellipsoid {
                semi_axis_x,
                semi_axis_y,
                semi_axis_z,
            } => DVec3::new(semi_axis_x, semi_axis_y, semi_axis_z),
        }
    }

    /// Per-axis distance a center must keep from each cube face.
    ///
    /// Spheres keep exactly their radius; ellipsoids keep their semi-axis
    /// plus the clearance gap.
    pub fn boundary_margin(&self, gap: f64) -> DVec3 {
        match self {
            Self::Sphere { .. } => self.semi_axes(),
            Self::Ellipsoid { .. } => self.semi_axes() + DVec3::splat(gap),
        }
    }

    /// Minimum center-to-center distance between two pores of this shape.
    ///
    /// For ellipsoids this is the bounding-sphere bound
    /// `max(2·rx, 2·ry, 2·rz) + gap`, which over-separates elongated pores.
    /// True ellipsoid intersection is not tested.
    pub fn min_separation(&self, gap: f64) -> f64 {
        match *self {
            Self::Sphere { radius } => 2.0 * radius + gap,
            Self::Ellipsoid { .. } => 2.0 * self.semi_axes().max_element() + gap,
        }
    }

    /// Enclosed volume.
    pub fn volume(&self) -> f64 {
        match *self {
            Self::Sphere { radius } => 4.0 / 3.0 * PI * radius.powi(3),
            Self::Ellipsoid {
                semi_axis_x,
                semi_axis_y,
                semi_axis_z,
            } => 4.0 / 3.0 * PI * semi_axis_x * semi_axis_y * semi_axis_z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sphere_rejects_non_positive_radius() {
        assert!(PoreShape::sphere(0.0).is_err());
        assert!(PoreShape::sphere(-1.0).is_err());
        assert!(PoreShape::sphere(f64::NAN).is_err());
    }

    #[test]
    fn test_ellipsoid_rejects_any_bad_axis() {
        assert!(PoreShape::ellipsoid(1.0, 1.0, 0.0).is_err());
        assert!(PoreShape::ellipsoid(f64::INFINITY, 1.0, 1.0).is_err());
        assert!(PoreShape::ellipsoid(0.3, 0.2, 0.1).is_ok());
    }

    #[test]
    fn test_sphere_volume() {
        let shape = PoreShape::sphere(0.05).unwrap();
        assert_relative_eq!(shape.volume(), 4.0 / 3.0 * PI * 1.25e-4, max_relative = 1e-12);
    }

    #[test]
    fn test_ellipsoid_volume_matches_sphere_when_round() {
        let sphere = PoreShape::sphere(0.4).unwrap();
        let ellipsoid = PoreShape::ellipsoid(0.4, 0.4, 0.4).unwrap();
        assert_relative_eq!(sphere.volume(), ellipsoid.volume(), max_relative = 1e-12);
    }

    #[test]
    fn test_ellipsoid_separation_uses_longest_axis() {
        let shape = PoreShape::ellipsoid(0.3, 0.2, 0.1).unwrap();
        assert_relative_eq!(shape.min_separation(0.05), 0.65, epsilon = 1e-12);
    }

    #[test]
    fn test_boundary_margin_per_shape() {
        let sphere = PoreShape::sphere(0.5).unwrap();
        assert_eq!(sphere.boundary_margin(0.1), DVec3::splat(0.5));

        let ellipsoid = PoreShape::ellipsoid(0.3, 0.2, 0.1).unwrap();
        let margin = ellipsoid.boundary_margin(0.1);
        assert_relative_eq!(margin.x, 0.4, epsilon = 1e-12);
        assert_relative_eq!(margin.y, 0.3, epsilon = 1e-12);
        assert_relative_eq!(margin.z, 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_serde_tagged_representation() {
        let shape = PoreShape::sphere(0.25).unwrap();
        let json = serde_json::to_string(&shape).unwrap();
        assert_eq!(json, r#"{"kind":"sphere","radius":0.25}"#);
    }
}

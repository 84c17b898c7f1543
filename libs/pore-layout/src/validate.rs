//! # Layout Verification
//!
//! Brute-force O(n²) check of containment and separation, independent of
//! the sampler's grid index.

use thiserror::Error;

use crate::layout::LayoutConfiguration;

/// A broken layout invariant.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutViolation {
    /// A center lies outside the admissible box for its shape.
    #[error("pore {index} at {center:?} violates containment")]
    Containment {
        /// Placement index
        index: usize,
        /// Offending center
        center: [f64; 3],
    },

    /// Two centers are closer than the minimum separation.
    #[error("pores {first} and {second} are {distance:.6} apart (minimum {required:.6})")]
    Separation {
        /// First placement index
        first: usize,
        /// Second placement index
        second: usize,
        /// Measured center distance
        distance: f64,
        /// Required minimum distance
        required: f64,
    },

    /// A placement carries a different shape than the layout parameters.
    #[error("pore {index} has a shape different from the layout parameters")]
    ShapeMismatch {
        /// Placement index
        index: usize,
    },
}

/// Verifies every placement against containment and every pair against the
/// minimum separation.
///
/// # Example
///
/// ```rust
/// use pore_layout::{validate_layout, LayoutParams, PlacementSampler};
///
/// let sampler = PlacementSampler::new(LayoutParams::default()).unwrap();
/// if let Some(layout) = sampler.sample_seeded(7).accepted() {
///     assert!(validate_layout(&layout).is_ok());
/// }
/// ```
pub fn validate_layout(layout: &LayoutConfiguration) -> Result<(), LayoutViolation> {
    let params = layout.params();
    let (low, high) = params.admissible_bounds();
    let required = params.min_separation();
    let placements = layout.placements();

    for (index, placement) in placements.iter().enumerate() {
        if placement.shape != params.shape {
            return Err(LayoutViolation::ShapeMismatch { index });
        }
        let c = placement.center;
        if !(c.cmpge(low).all() && c.cmple(high).all()) {
            return Err(LayoutViolation::Containment {
                index,
                center: c.to_array(),
            });
        }
    }

    for (first, a) in placements.iter().enumerate() {
        for (offset, b) in placements[first + 1..].iter().enumerate() {
            let distance = a.center.distance(b.center);
            if distance < required {
                return Err(LayoutViolation::Separation {
                    first,
                    second: first + 1 + offset,
                    distance,
                    required,
                });
            }
        }
    }

    Ok(())
}

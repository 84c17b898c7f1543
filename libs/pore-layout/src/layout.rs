//! # Layout Data Model
//!
//! Generation parameters, accepted pore placements and the immutable layout
//! the sampler returns.

use config::constants::{
    DEFAULT_CUBE_SIZE, DEFAULT_GAP, DEFAULT_MAX_ATTEMPTS_PER_PORE, DEFAULT_MEAN,
    DEFAULT_PORE_COUNT, DEFAULT_PORE_RADIUS, DEFAULT_STD_DEV,
};
use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, LayoutResult};
use crate::shape::PoreShape;
use crate::validate::validate_layout;

// =============================================================================
// PLACEMENT
// =============================================================================

/// One accepted pore: a shape at a center inside the cube.
///
/// The cube spans `[0, cube_size]` on every axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PorePlacement {
    /// Pore shape
    pub shape: PoreShape,
    /// Pore center in cube coordinates
    pub center: DVec3,
}

impl PorePlacement {
    /// Creates a placement.
    pub fn new(shape: PoreShape, center: DVec3) -> Self {
        Self { shape, center }
    }

    /// Axis-aligned bounds of the pore as (min, max).
    pub fn bounds(&self) -> (DVec3, DVec3) {
        let half = self.shape.semi_axes();
        (self.center - half, self.center + half)
    }
}

// =============================================================================
// PARAMETERS
// =============================================================================

/// Parameters for one layout.
///
/// `mean` and `std_dev` are fractions of the cube edge; the sampler scales
/// them by `cube_size`.
///
/// # Example
///
/// ```rust
/// use pore_layout::{LayoutParams, PoreShape};
///
/// let params = LayoutParams::default()
///     .with_pore_count(10)
///     .with_cube_size(1.0)
///     .with_shape(PoreShape::sphere(0.05).unwrap())
///     .with_gap(0.01);
/// assert!(params.validate().is_ok());
/// assert!((params.min_separation() - 0.11).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutParams {
    /// Number of pores to place
    pub pore_count: usize,
    /// Gaussian mean as a fraction of the cube edge
    pub mean: f64,
    /// Gaussian standard deviation as a fraction of the cube edge
    pub std_dev: f64,
    /// Cube edge length
    pub cube_size: f64,
    /// Shape shared by every pore
    pub shape: PoreShape,
    /// Clearance gap beyond geometric contact
    pub gap: f64,
    /// Candidate draws allowed per pore
    pub max_attempts_per_pore: usize,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            pore_count: DEFAULT_PORE_COUNT,
            mean: DEFAULT_MEAN,
            std_dev: DEFAULT_STD_DEV,
            cube_size: DEFAULT_CUBE_SIZE,
            shape: PoreShape::Sphere {
                radius: DEFAULT_PORE_RADIUS,
            },
            gap: DEFAULT_GAP,
            max_attempts_per_pore: DEFAULT_MAX_ATTEMPTS_PER_PORE,
        }
    }
}

impl LayoutParams {
    /// Set the number of pores.
    #[must_use]
    pub const fn with_pore_count(mut self, pore_count: usize) -> Self {
        self.pore_count = pore_count;
        self
    }

    /// Set the normalized Gaussian mean and standard deviation.
    #[must_use]
    pub const fn with_distribution(mut self, mean: f64, std_dev: f64) -> Self {
        self.mean = mean;
        self.std_dev = std_dev;
        self
    }

    /// Set the cube edge length.
    #[must_use]
    pub const fn with_cube_size(mut self, cube_size: f64) -> Self {
        self.cube_size = cube_size;
        self
    }

    /// Set the pore shape.
    #[must_use]
    pub const fn with_shape(mut self, shape: PoreShape) -> Self {
        self.shape = shape;
        self
    }

    /// Set the clearance gap.
    #[must_use]
    pub const fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    /// Set the per-pore attempt budget.
    #[must_use]
    pub const fn with_max_attempts_per_pore(mut self, attempts: usize) -> Self {
        self.max_attempts_per_pore = attempts;
        self
    }

    /// Validates ranges. Feasibility of the packing itself is not checked;
    /// an infeasible layout surfaces as sampler exhaustion.
    pub fn validate(&self) -> LayoutResult<()> {
        self.shape.validate()?;
        if !(self.cube_size.is_finite() && self.cube_size > 0.0) {
            return Err(LayoutError::invalid_parameter(
                "cube_size",
                format!("must be positive and finite, got {}", self.cube_size),
            ));
        }
        if !self.mean.is_finite() {
            return Err(LayoutError::invalid_parameter(
                "mean",
                format!("must be finite, got {}", self.mean),
            ));
        }
        if !(self.std_dev.is_finite() && self.std_dev >= 0.0) {
            return Err(LayoutError::invalid_parameter(
                "std_dev",
                format!("must be non-negative and finite, got {}", self.std_dev),
            ));
        }
        if !(self.gap.is_finite() && self.gap >= 0.0) {
            return Err(LayoutError::invalid_parameter(
                "gap",
                format!("must be non-negative and finite, got {}", self.gap),
            ));
        }
        if self.max_attempts_per_pore == 0 {
            return Err(LayoutError::invalid_parameter(
                "max_attempts_per_pore",
                "must be at least 1",
            ));
        }
        Ok(())
    }

    /// Minimum center-to-center distance for this shape and gap.
    pub fn min_separation(&self) -> f64 {
        self.shape.min_separation(self.gap)
    }

    /// Lowest and highest admissible center per axis.
    ///
    /// When `low > high` on any axis no center exists.
    pub fn admissible_bounds(&self) -> (DVec3, DVec3) {
        let margin = self.shape.boundary_margin(self.gap);
        (margin, DVec3::splat(self.cube_size) - margin)
    }

    /// Cube volume.
    pub fn cube_volume(&self) -> f64 {
        self.cube_size.powi(3)
    }
}

// =============================================================================
// LAYOUT
// =============================================================================

/// Whether a layout holds every requested pore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Completeness {
    /// All `pore_count` pores were placed.
    Complete,
    /// Fewer pores than requested were placed before the budget ran out.
    Partial {
        /// Pores that were requested
        requested: usize,
    },
}

/// An immutable pore layout with the parameters and seed that produced it.
///
/// Placements are in acceptance order. Deserializing re-checks the
/// parameters, the completeness marker and every placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredLayout")]
pub struct LayoutConfiguration {
    placements: Vec<PorePlacement>,
    params: LayoutParams,
    seed: Option<u64>,
    completeness: Completeness,
}

impl LayoutConfiguration {
    /// Wraps placements into a layout.
    ///
    /// Completeness is derived from `params.pore_count`. Containment and
    /// separation are not checked here; see [`crate::validate_layout`].
    pub fn from_placements(
        params: LayoutParams,
        placements: Vec<PorePlacement>,
        seed: Option<u64>,
    ) -> Self {
        let completeness = if placements.len() >= params.pore_count {
            Completeness::Complete
        } else {
            Completeness::Partial {
                requested: params.pore_count,
            }
        };
        Self {
            placements,
            params,
            seed,
            completeness,
        }
    }

    /// Accepted placements in acceptance order.
    pub fn placements(&self) -> &[PorePlacement] {
        &self.placements
    }

    /// Parameters used for generation.
    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    /// Seed of the random stream, when the layout was drawn from one.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Completeness marker.
    pub fn completeness(&self) -> Completeness {
        self.completeness
    }

    /// True when every requested pore was placed.
    pub fn is_complete(&self) -> bool {
        self.completeness == Completeness::Complete
    }

    /// Number of placed pores.
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// True when no pore was placed.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

/// Serialized form of a [`LayoutConfiguration`], checked before use.
#[derive(Deserialize)]
struct StoredLayout {
    placements: Vec<PorePlacement>,
    params: LayoutParams,
    seed: Option<u64>,
    completeness: Completeness,
}

impl TryFrom<StoredLayout> for LayoutConfiguration {
    type Error = LayoutError;

    fn try_from(stored: StoredLayout) -> LayoutResult<Self> {
        stored.params.validate()?;
        if stored.placements.len() > stored.params.pore_count {
            return Err(LayoutError::invalid_parameter(
                "placements",
                format!(
                    "{} placements for pore_count {}",
                    stored.placements.len(),
                    stored.params.pore_count
                ),
            ));
        }

        let layout = Self::from_placements(stored.params, stored.placements, stored.seed);
        if layout.completeness != stored.completeness {
            return Err(LayoutError::invalid_parameter(
                "completeness",
                format!(
                    "stored as {:?} but the placements make it {:?}",
                    stored.completeness, layout.completeness
                ),
            ));
        }
        validate_layout(&layout)?;
        Ok(layout)
    }
}

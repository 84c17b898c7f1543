//! # Placement Sampler
//!
//! Constrained Gaussian rejection sampling of non-overlapping pore layouts.
//!
//! ## Algorithm
//!
//! For each pore, draw a center with independent N(mean·size, std·size)
//! coordinates and accept it when:
//! - it satisfies the per-axis containment bound of the shape, and
//! - it is at least the shape's minimum separation from every accepted
//!   center.
//!
//! Each pore gets `max_attempts_per_pore` draws. When a pore runs out the
//! sampler stops and reports [`SampleOutcome::Exhausted`] with whatever was
//! placed so far. It never hands back a short layout as [`SampleOutcome::Accepted`].
//!
//! ## Bounds
//!
//! At most `pore_count × max_attempts_per_pore` draws, plus an optional
//! wall-clock deadline.

use std::time::Instant;

use glam::DVec3;
use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;

use crate::error::LayoutResult;
use crate::gaussian::sample_gaussian_point;
use crate::layout::{LayoutConfiguration, LayoutParams, PorePlacement};
use crate::spatial_index::SeparationGrid;


// =============================================================================
// OUTCOME
// =============================================================================

/// Why the sampler stopped before placing every pore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExhaustionReason {
    /// A pore used its whole attempt budget.
    AttemptBudget,
    /// The wall-clock deadline passed.
    Deadline,
}

/// Details of an exhausted sampling run.
#[derive(Debug, Clone, PartialEq)]
pub struct Exhaustion {
    /// Why sampling stopped
    pub reason: ExhaustionReason,
    /// Index of the pore that could not be placed
    pub pore_index: usize,
    /// Draws spent on that pore
    pub attempts: usize,
    /// Draws spent on the whole layout
    pub total_attempts: usize,
    /// Pores placed before stopping, marked partial
    pub partial: LayoutConfiguration,
}

/// Result of one sampling run.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleOutcome {
    /// Every requested pore was placed.
    Accepted(LayoutConfiguration),
    /// The budget or deadline ran out first.
    Exhausted(Exhaustion),
}

impl SampleOutcome {
    /// Returns the layout when sampling succeeded.
    pub fn accepted(self) -> Option<LayoutConfiguration> {
        match self {
            Self::Accepted(layout) => Some(layout),
            Self::Exhausted(_) => None,
        }
    }

    /// True when every requested pore was placed.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

// =============================================================================
// SAMPLER
// =============================================================================

/// Draws layouts for one validated parameter set.
///
/// # Example
///
/// ```rust
/// use pore_layout::{LayoutParams, PlacementSampler, PoreShape, SampleOutcome};
///
/// let params = LayoutParams::default()
///     .with_pore_count(10)
///     .with_cube_size(1.0)
///     .with_distribution(0.5, 0.15)
///     .with_shape(PoreShape::sphere(0.05).unwrap())
///     .with_gap(0.01);
///
/// let sampler = PlacementSampler::new(params).unwrap();
/// match sampler.sample_seeded(42) {
///     SampleOutcome::Accepted(layout) => assert_eq!(layout.len(), 10),
///     SampleOutcome::Exhausted(e) => println!("pore {} did not fit", e.pore_index),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PlacementSampler {
    params: LayoutParams,
    deadline: Option<Instant>,
}

impl PlacementSampler {
    /// Creates a sampler, rejecting invalid parameters.
    pub fn new(params: LayoutParams) -> LayoutResult<Self> {
        params.validate()?;
        Ok(Self {
            params,
            deadline: None,
        })
    }

    /// Stop sampling once `deadline` has passed.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Parameters this sampler draws with.
    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    /// Samples a layout on a fresh ChaCha stream; the seed is recorded in
    /// the layout.
    pub fn sample_seeded(&self, seed: u64) -> SampleOutcome {
        let mut rng = ChaChaRng::seed_from_u64(seed);
        self.run(&mut rng, Some(seed))
    }

    /// Samples a layout from the caller's random source.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> SampleOutcome {
        self.run(rng, None)
    }

    fn run<R: Rng + ?Sized>(&self, rng: &mut R, seed: Option<u64>) -> SampleOutcome {
        let params = &self.params;
        let (low, high) = params.admissible_bounds();
        let mean = params.mean * params.cube_size;
        let std_dev = params.std_dev * params.cube_size;

        let mut grid = SeparationGrid::new(params.min_separation());
        let mut placements = Vec::with_capacity(params.pore_count);
        let mut total_attempts = 0;

        for pore_index in 0..params.pore_count {
            let mut attempts = 0;
            let mut placed = false;

            while attempts < params.max_attempts_per_pore {
                if self.deadline.is_some_and(|d| Instant::now() >= d) {
                    return self.exhausted(
                        ExhaustionReason::Deadline,
                        pore_index,
                        attempts,
                        total_attempts,
                        placements,
                        seed,
                    );
                }
                attempts += 1;
                total_attempts += 1;

                let candidate = sample_gaussian_point(rng, mean, std_dev);
                if !is_contained(candidate, low, high) || !grid.is_separated(candidate) {
                    continue;
                }

                grid.insert(candidate);
                placements.push(PorePlacement::new(params.shape, candidate));
                placed = true;
                break;
            }

            if !placed {
                return self.exhausted(
                    ExhaustionReason::AttemptBudget,
                    pore_index,
                    attempts,
                    total_attempts,
                    placements,
                    seed,
                );
            }
        }

        SampleOutcome::Accepted(LayoutConfiguration::from_placements(
            *params, placements, seed,
        ))
    }

    fn exhausted(
        &self,
        reason: ExhaustionReason,
        pore_index: usize,
        attempts: usize,
        total_attempts: usize,
        placements: Vec<PorePlacement>,
        seed: Option<u64>,
    ) -> SampleOutcome {
        debug!(
            "sampler exhausted ({:?}) at pore {}/{} after {} attempts ({} total), shape={} gap={} cube={}",
            reason,
            pore_index + 1,
            self.params.pore_count,
            attempts,
            total_attempts,
            self.params.shape.kind(),
            self.params.gap,
            self.params.cube_size,
        );
        SampleOutcome::Exhausted(Exhaustion {
            reason,
            pore_index,
            attempts,
            total_attempts,
            partial: LayoutConfiguration::from_placements(self.params, placements, seed),
        })
    }
}

/// Per-axis containment: `low ≤ c ≤ high`.
#[inline]
fn is_contained(candidate: DVec3, low: DVec3, high: DVec3) -> bool {
    candidate.cmpge(low).all() && candidate.cmple(high).all()
}

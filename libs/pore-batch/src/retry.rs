//! # Retry Control
//!
//! The run-wide retry budget and the per-slot sampling loop shared by
//! [`crate::run`] and [`crate::plan`].
//!
//! A slot keeps drawing layouts on fresh streams until the exhaustion
//! policy accepts one. Each discarded attempt consumes one retry from the
//! shared budget.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use log::{debug, warn};
use pore_layout::{Exhaustion, ExhaustionReason, LayoutConfiguration, PlacementSampler};

use crate::error::{BatchError, BatchResult};
use crate::params::{BatchParams, ExhaustionPolicy};
use crate::seed::derive_seed;

// =============================================================================
// BUDGET
// =============================================================================

/// Why a slot stopped retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stop {
    /// The retry cap was reached.
    RetryBudget { retries: usize },
    /// The run deadline passed.
    Deadline,
}

impl Stop {
    /// Run-level error carrying the completed model count.
    pub(crate) fn into_error(self, completed: usize) -> BatchError {
        match self {
            Self::RetryBudget { retries } => BatchError::RetryBudgetExhausted { completed, retries },
            Self::Deadline => BatchError::DeadlineExceeded { completed },
        }
    }
}

/// Retries left in a run, shared across slots.
#[derive(Debug)]
pub struct RetryBudget {
    max: usize,
    used: AtomicUsize,
    deadline: Option<Instant>,
}

impl RetryBudget {
    /// Creates a budget of `max` retries ending at `deadline`.
    pub fn new(max: usize, deadline: Option<Instant>) -> Self {
        Self {
            max,
            used: AtomicUsize::new(0),
            deadline,
        }
    }

    /// Takes one retry, failing once the cap is spent.
    pub(crate) fn consume(&self) -> Result<(), Stop> {
        let previous = self.used.fetch_add(1, Ordering::Relaxed);
        if previous >= self.max {
            self.used.store(self.max, Ordering::Relaxed);
            return Err(Stop::RetryBudget { retries: self.max });
        }
        Ok(())
    }

    /// Retries spent so far.
    pub fn used(&self) -> usize {
        self.used.load(Ordering::Relaxed).min(self.max)
    }

    /// Run deadline, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// True once the deadline has passed.
    pub fn deadline_passed(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

// =============================================================================
// SLOT SAMPLING
// =============================================================================

/// A layout accepted for a slot, with the stream that produced it.
#[derive(Debug, Clone)]
pub(crate) struct SlotDraw {
    pub ordinal: usize,
    pub layout: LayoutConfiguration,
    pub seed: u64,
    pub attempt: usize,
}

/// Draws layouts for slots of one run.
#[derive(Debug)]
pub(crate) struct SlotSampler<'a> {
    sampler: PlacementSampler,
    policy: ExhaustionPolicy,
    base_seed: u64,
    budget: &'a RetryBudget,
}

impl<'a> SlotSampler<'a> {
    pub(crate) fn new(
        params: &BatchParams,
        base_seed: u64,
        budget: &'a RetryBudget,
    ) -> BatchResult<Self> {
        let mut sampler = PlacementSampler::new(params.layout)?;
        if let Some(deadline) = budget.deadline() {
            sampler = sampler.with_deadline(deadline);
        }
        Ok(Self {
            sampler,
            policy: params.exhaustion_policy,
            base_seed,
            budget,
        })
    }

    pub(crate) fn budget(&self) -> &RetryBudget {
        self.budget
    }

    /// Samples slot `ordinal` starting at `first_attempt` until a layout is
    /// accepted.
    pub(crate) fn draw(&self, ordinal: usize, first_attempt: usize) -> Result<SlotDraw, Stop> {
        let mut attempt = first_attempt;
        loop {
            if self.budget.deadline_passed() {
                return Err(Stop::Deadline);
            }

            let seed = derive_seed(self.base_seed, ordinal, attempt);
            debug!("model {ordinal}: sampling attempt {attempt} (seed {seed})");

            match self.policy.resolve(self.sampler.sample_seeded(seed)) {
                Ok(layout) => {
                    return Ok(SlotDraw {
                        ordinal,
                        layout,
                        seed,
                        attempt,
                    })
                }
                Err(exhaustion) if exhaustion.reason == ExhaustionReason::Deadline => {
                    return Err(Stop::Deadline);
                }
                Err(exhaustion) => {
                    self.log_exhaustion(ordinal, attempt, &exhaustion);
                    self.budget.consume()?;
                    attempt += 1;
                }
            }
        }
    }

    fn log_exhaustion(&self, ordinal: usize, attempt: usize, exhaustion: &Exhaustion) {
        let params = self.sampler.params();
        warn!(
            "model {ordinal} attempt {attempt}: placed {}/{} pores, pore {} failed after {} draws; \
             retrying (shape={} gap={} cube={} mu={} sd={})",
            exhaustion.partial.len(),
            params.pore_count,
            exhaustion.pore_index + 1,
            exhaustion.attempts,
            params.shape.kind(),
            params.gap,
            params.cube_size,
            params.mean,
            params.std_dev,
        );
    }
}

//! # Dry-Run Planning
//!
//! Runs only the pure stages of a batch (sampling with the run's retry
//! policy, then the volumetric report) for every slot in parallel.
//!
//! Each slot samples on its own derived stream, so with the same base seed
//! `plan` yields the same layout per ordinal as [`crate::run`], provided no
//! collaborator failure was retried during the run.

use std::time::Instant;

use log::info;
use pore_layout::{
    compute_report, validate_layout, LayoutConfiguration, LayoutViolation, ModelReport,
    VolumetricError,
};
use rayon::prelude::*;
use serde::Serialize;

use crate::error::{BatchError, BatchResult};
use crate::naming::model_name;
use crate::params::BatchParams;
use crate::retry::{RetryBudget, SlotSampler, Stop};
use crate::seed::resolve_base_seed;

/// Layout and report planned for one slot.
#[derive(Debug, Clone, Serialize)]
pub struct PlannedModel {
    /// 1-based slot ordinal
    pub ordinal: usize,
    /// Model name a run would use
    pub name: String,
    /// Accepted layout
    pub layout: LayoutConfiguration,
    /// Volumetric report
    pub report: ModelReport,
    /// Stream seed of the accepted attempt
    pub seed: u64,
    /// Attempt number within the slot
    pub attempt: usize,
}

/// Every planned slot of a batch.
#[derive(Debug, Clone, Serialize)]
pub struct BatchPlan {
    /// Base seed the slot streams were derived from
    pub base_seed: u64,
    /// Retries spent across all slots
    pub retries: usize,
    /// Planned models in ordinal order
    pub models: Vec<PlannedModel>,
}

enum SlotFailure {
    Stop(Stop),
    Layout { model: String, source: LayoutViolation },
    Domain { model: String, source: VolumetricError },
}

impl SlotFailure {
    fn into_error(self, completed: usize) -> BatchError {
        match self {
            Self::Stop(stop) => stop.into_error(completed),
            Self::Layout { model, source } => BatchError::LayoutInvariant { model, source },
            Self::Domain { model, source } => BatchError::DomainViolation {
                completed,
                model,
                source,
            },
        }
    }
}

/// Samples and reports every slot of a batch without touching any
/// collaborator or the filesystem.
///
/// # Example
///
/// ```rust
/// use pore_batch::{plan, BatchParams};
/// use pore_layout::{LayoutParams, PoreShape};
///
/// let params = BatchParams::default()
///     .with_layout(
///         LayoutParams::default()
///             .with_cube_size(1.0)
///             .with_shape(PoreShape::sphere(0.05).unwrap())
///             .with_gap(0.01),
///     )
///     .with_model_count(4)
///     .with_seed(7);
///
/// let batch = plan(&params).unwrap();
/// assert_eq!(batch.models.len(), 4);
/// assert_eq!(batch.models[3].ordinal, 4);
/// ```
///
/// # Errors
///
/// The same run-level errors as [`crate::run`] except collaborator and I/O
/// failures. `completed` counts the slots that were planned successfully.
pub fn plan(params: &BatchParams) -> BatchResult<BatchPlan> {
    params.validate()?;

    let base_seed = resolve_base_seed(params.seed);
    let deadline = params.time_limit.map(|limit| Instant::now() + limit);
    let budget = RetryBudget::new(params.max_total_retries, deadline);
    let slots = SlotSampler::new(params, base_seed, &budget)?;
    let density = params.density_per_cube_unit();

    let results: Vec<Result<PlannedModel, SlotFailure>> = (1..=params.model_count)
        .into_par_iter()
        .map(|ordinal| {
            let name = model_name(&params.layout, ordinal);
            let draw = slots.draw(ordinal, 0).map_err(SlotFailure::Stop)?;
            validate_layout(&draw.layout).map_err(|source| SlotFailure::Layout {
                model: name.clone(),
                source,
            })?;
            let report = compute_report(&draw.layout, density).map_err(|source| {
                SlotFailure::Domain {
                    model: name.clone(),
                    source,
                }
            })?;
            Ok(PlannedModel {
                ordinal,
                name,
                layout: draw.layout,
                report,
                seed: draw.seed,
                attempt: draw.attempt,
            })
        })
        .collect();

    let completed = results.iter().filter(|r| r.is_ok()).count();
    let mut models = Vec::with_capacity(results.len());
    for result in results {
        models.push(result.map_err(|failure| failure.into_error(completed))?);
    }

    let retries = budget.used();
    info!(
        "planned {} models (base seed {base_seed}, {retries} retries)",
        models.len()
    );
    Ok(BatchPlan {
        base_seed,
        retries,
        models,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pore_layout::{LayoutParams, PoreShape};

    use super::*;

    fn params() -> BatchParams {
        BatchParams::default()
            .with_layout(
                LayoutParams::default()
                    .with_pore_count(10)
                    .with_cube_size(1.0)
                    .with_shape(PoreShape::sphere(0.05).unwrap())
                    .with_gap(0.01),
            )
            .with_model_count(6)
            .with_seed(2024)
    }

    #[test]
    fn test_plan_is_reproducible() {
        let a = plan(&params()).unwrap();
        let b = plan(&params()).unwrap();
        assert_eq!(a.base_seed, 2024);
        for (x, y) in a.models.iter().zip(&b.models) {
            assert_eq!(x.layout, y.layout);
            assert_eq!(x.seed, y.seed);
        }
    }

    #[test]
    fn test_plan_names_unique_and_ordered() {
        let batch = plan(&params()).unwrap();
        let names: HashSet<_> = batch.models.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names.len(), 6);
        let ordinals: Vec<_> = batch.models.iter().map(|m| m.ordinal).collect();
        assert_eq!(ordinals, [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_plan_reports_porosity() {
        let batch = plan(&params()).unwrap();
        for model in &batch.models {
            assert!((model.report.porosity - 0.005236).abs() < 1e-5);
        }
    }

    #[test]
    fn test_plan_budget_exhaustion() {
        let params = BatchParams::default()
            .with_layout(
                LayoutParams::default()
                    .with_pore_count(1)
                    .with_cube_size(1.0)
                    .with_shape(PoreShape::sphere(0.5).unwrap())
                    .with_gap(0.0)
                    .with_max_attempts_per_pore(3),
            )
            .with_model_count(2)
            .with_max_total_retries(6)
            .with_seed(1);
        match plan(&params) {
            Err(BatchError::RetryBudgetExhausted { completed, retries }) => {
                assert_eq!(completed, 0);
                assert_eq!(retries, 6);
            }
            other => panic!("expected budget exhaustion, got {other:?}"),
        }
    }

    #[test]
    fn test_plan_zero_models() {
        let batch = plan(&params().with_model_count(0)).unwrap();
        assert!(batch.models.is_empty());
        assert_eq!(batch.retries, 0);
    }
}

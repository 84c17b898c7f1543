//! # Batch Parameters
//!
//! Everything a run needs besides the collaborators: the layout parameters
//! shared by every model, the material, the output tree and the bounds on
//! retries and time.
//!
//! Units: cube lengths are millimetres and the material density is given in
//! g/cm³, so reported masses are in grams.

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

use config::constants::{
    section_count, DEFAULT_MATERIAL_DENSITY_G_PER_CM3, DEFAULT_MAX_TOTAL_RETRIES,
    DEFAULT_MODEL_COUNT, DEFAULT_SECTION_STEP, MAX_SECTIONS_PER_PLANE,
};
use pore_layout::{units, Exhaustion, ExhaustionReason, LayoutConfiguration, LayoutParams, SampleOutcome};
use serde::{Deserialize, Serialize};

use crate::collaborator::{ExportFormat, SnapshotOptions};
use crate::error::{BatchError, BatchResult};
use crate::naming::{section_label, section_offsets};

// =============================================================================
// EXHAUSTION POLICY
// =============================================================================

/// What a run does with a layout the sampler could not complete.
///
/// Chosen once per run and applied identically to every shape.
///
/// # Example
///
/// ```rust
/// use pore_batch::ExhaustionPolicy;
///
/// let policy: ExhaustionPolicy =
///     serde_json::from_str(r#"{"policy": "accept_partial", "min_pores": 8}"#).unwrap();
/// assert_eq!(policy, ExhaustionPolicy::AcceptPartial { min_pores: 8 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum ExhaustionPolicy {
    /// Discard the attempt and resample the same slot.
    #[default]
    Retry,
    /// Keep the partial layout when at least `min_pores` pores were placed.
    AcceptPartial {
        /// Fewest pores a kept layout may hold
        min_pores: usize,
    },
}

impl ExhaustionPolicy {
    /// Turns a sampler outcome into a usable layout, or hands the
    /// exhaustion back for a retry.
    ///
    /// Layouts cut short by the deadline are never accepted.
    pub fn resolve(&self, outcome: SampleOutcome) -> Result<LayoutConfiguration, Exhaustion> {
        let exhaustion = match outcome {
            SampleOutcome::Accepted(layout) => return Ok(layout),
            SampleOutcome::Exhausted(exhaustion) => exhaustion,
        };
        match *self {
            Self::AcceptPartial { min_pores }
                if exhaustion.reason == ExhaustionReason::AttemptBudget
                    && exhaustion.partial.len() >= min_pores =>
            {
                Ok(exhaustion.partial)
            }
            _ => Err(exhaustion),
        }
    }
}

// =============================================================================
// BATCH PARAMETERS
// =============================================================================

/// Parameters of one batch run.
///
/// # Example
///
/// ```rust
/// use pore_batch::BatchParams;
/// use pore_layout::{LayoutParams, PoreShape};
///
/// let params = BatchParams::default()
///     .with_layout(
///         LayoutParams::default()
///             .with_cube_size(1.0)
///             .with_shape(PoreShape::sphere(0.05).unwrap())
///             .with_gap(0.01),
///     )
///     .with_model_count(3)
///     .with_section_step(0.25)
///     .with_seed(42);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchParams {
    /// Layout parameters shared by every model
    pub layout: LayoutParams,
    /// Number of models to finalize
    pub model_count: usize,
    /// Bulk material density in g/cm³
    pub material_density: f64,
    /// Directory receiving one subdirectory per model
    pub output_root: PathBuf,
    /// Base seed; drawn at random when absent
    pub seed: Option<u64>,
    /// Handling of incomplete layouts
    pub exhaustion_policy: ExhaustionPolicy,
    /// Cap on retried attempts across the whole run
    pub max_total_retries: usize,
    /// Wall-clock limit for the whole run
    #[serde(with = "duration_secs")]
    pub time_limit: Option<Duration>,
    /// Distance between consecutive cross-sections
    pub section_step: f64,
    /// Snapshot and section image settings
    pub snapshot: SnapshotOptions,
    /// Solid export format
    pub export_format: ExportFormat,
    /// Retry attempts whose collaborator calls failed instead of halting
    pub retry_collaborator_failures: bool,
}

impl Default for BatchParams {
    fn default() -> Self {
        Self {
            layout: LayoutParams::default(),
            model_count: DEFAULT_MODEL_COUNT,
            material_density: DEFAULT_MATERIAL_DENSITY_G_PER_CM3,
            output_root: PathBuf::from("porous_models"),
            seed: None,
            exhaustion_policy: ExhaustionPolicy::Retry,
            max_total_retries: DEFAULT_MAX_TOTAL_RETRIES,
            time_limit: None,
            section_step: DEFAULT_SECTION_STEP,
            snapshot: SnapshotOptions::default(),
            export_format: ExportFormat::Mesh,
            retry_collaborator_failures: false,
        }
    }
}

impl BatchParams {
    /// Set the layout parameters.
    #[must_use]
    pub fn with_layout(mut self, layout: LayoutParams) -> Self {
        self.layout = layout;
        self
    }

    /// Set the number of models.
    #[must_use]
    pub fn with_model_count(mut self, model_count: usize) -> Self {
        self.model_count = model_count;
        self
    }

    /// Set the material density in g/cm³.
    #[must_use]
    pub fn with_material_density(mut self, density: f64) -> Self {
        self.material_density = density;
        self
    }

    /// Set the output directory.
    #[must_use]
    pub fn with_output_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.output_root = root.into();
        self
    }

    /// Fix the base seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the exhaustion policy.
    #[must_use]
    pub fn with_exhaustion_policy(mut self, policy: ExhaustionPolicy) -> Self {
        self.exhaustion_policy = policy;
        self
    }

    /// Set the run-wide retry cap.
    #[must_use]
    pub fn with_max_total_retries(mut self, retries: usize) -> Self {
        self.max_total_retries = retries;
        self
    }

    /// Set the run time limit.
    #[must_use]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Set the cross-section step.
    #[must_use]
    pub fn with_section_step(mut self, step: f64) -> Self {
        self.section_step = step;
        self
    }

    /// Set the image options.
    #[must_use]
    pub fn with_snapshot(mut self, snapshot: SnapshotOptions) -> Self {
        self.snapshot = snapshot;
        self
    }

    /// Set the solid export format.
    #[must_use]
    pub fn with_export_format(mut self, format: ExportFormat) -> Self {
        self.export_format = format;
        self
    }

    /// Retry collaborator failures instead of halting.
    #[must_use]
    pub fn with_retry_collaborator_failures(mut self, retry: bool) -> Self {
        self.retry_collaborator_failures = retry;
        self
    }

    /// Material density in g/mm³, matching millimetre cube lengths.
    pub fn density_per_cube_unit(&self) -> f64 {
        units::g_per_cm3_to_g_per_mm3(self.material_density)
    }

    /// Cross-section offsets for every plane.
    pub fn section_offsets(&self) -> Vec<f64> {
        section_offsets(self.layout.cube_size, self.section_step)
    }

    /// Validates every parameter before a run starts.
    pub fn validate(&self) -> BatchResult<()> {
        self.layout.validate()?;

        if !(self.material_density.is_finite() && self.material_density >= 0.0) {
            return Err(BatchError::invalid_params(format!(
                "material_density must be non-negative and finite, got {}",
                self.material_density
            )));
        }
        if !(self.section_step.is_finite() && self.section_step > 0.0) {
            return Err(BatchError::invalid_params(format!(
                "section_step must be positive and finite, got {}",
                self.section_step
            )));
        }

        let sections = section_count(self.layout.cube_size, self.section_step);
        if sections > MAX_SECTIONS_PER_PLANE {
            return Err(BatchError::invalid_params(format!(
                "section_step {} gives {sections} sections per plane (at most {MAX_SECTIONS_PER_PLANE})",
                self.section_step
            )));
        }

        let mut labels = HashSet::new();
        for offset in self.section_offsets() {
            let label = section_label(offset);
            if !labels.insert(label.clone()) {
                return Err(BatchError::invalid_params(format!(
                    "section_step {} yields two sections labelled {label}",
                    self.section_step
                )));
            }
        }

        if self.snapshot.width == 0 || self.snapshot.height == 0 {
            return Err(BatchError::invalid_params("snapshot size must be non-zero"));
        }
        if let ExhaustionPolicy::AcceptPartial { min_pores } = self.exhaustion_policy {
            if min_pores > self.layout.pore_count {
                return Err(BatchError::invalid_params(format!(
                    "min_pores {min_pores} exceeds pore_count {}",
                    self.layout.pore_count
                )));
            }
        }
        Ok(())
    }
}

/// Serializes an optional duration as fractional seconds.
mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => s.serialize_some(&d.as_secs_f64()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        let secs = Option::<f64>::deserialize(d)?;
        secs.map(|s| Duration::try_from_secs_f64(s).map_err(serde::de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use pore_layout::{PlacementSampler, PoreShape};

    use super::*;

    fn tight_layout() -> LayoutParams {
        // A second sphere of radius 0.35 cannot fit beside the first.
        LayoutParams::default()
            .with_pore_count(2)
            .with_cube_size(1.0)
            .with_shape(PoreShape::sphere(0.35).unwrap())
            .with_gap(0.0)
    }

    #[test]
    fn test_default_params_validate() {
        assert!(BatchParams::default().validate().is_ok());
    }

    #[test]
    fn test_density_converted_to_millimetres() {
        let params = BatchParams::default().with_material_density(7.85);
        assert!((params.density_per_cube_unit() - 0.00785).abs() < 1e-15);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let base = BatchParams::default();
        assert!(base.clone().with_section_step(0.0).validate().is_err());
        assert!(base.clone().with_material_density(-1.0).validate().is_err());
        assert!(base
            .clone()
            .with_snapshot(SnapshotOptions::default().with_size(0, 10))
            .validate()
            .is_err());
        assert!(base
            .with_exhaustion_policy(ExhaustionPolicy::AcceptPartial { min_pores: 11 })
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_rejects_colliding_section_labels() {
        let params = BatchParams::default()
            .with_layout(LayoutParams::default().with_cube_size(1.0))
            .with_section_step(0.999);
        assert!(matches!(params.validate(), Err(BatchError::InvalidParams { .. })));
    }

    #[test]
    fn test_validate_caps_sections_per_plane() {
        let params = BatchParams::default()
            .with_layout(LayoutParams::default().with_cube_size(1.0e12))
            .with_section_step(1.0);
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("sections per plane"));
        assert!(BatchParams::default()
            .with_layout(LayoutParams::default().with_cube_size(10.0))
            .with_section_step(0.02)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_retry_policy_hands_back_exhaustion() {
        let sampler = PlacementSampler::new(tight_layout()).unwrap();
        let outcome = sampler.sample_seeded(3);
        assert!(!outcome.is_accepted());
        assert!(ExhaustionPolicy::Retry.resolve(outcome).is_err());
    }

    #[test]
    fn test_accept_partial_keeps_enough_pores() {
        let sampler = PlacementSampler::new(tight_layout()).unwrap();
        let outcome = sampler.sample_seeded(3);
        let layout = ExhaustionPolicy::AcceptPartial { min_pores: 1 }
            .resolve(outcome)
            .unwrap();
        assert_eq!(layout.len(), 1);
        assert!(!layout.is_complete());
    }

    #[test]
    fn test_accept_partial_rejects_too_few() {
        let sampler = PlacementSampler::new(tight_layout()).unwrap();
        let outcome = sampler.sample_seeded(3);
        assert!(ExhaustionPolicy::AcceptPartial { min_pores: 2 }
            .resolve(outcome)
            .is_err());
    }

    #[test]
    fn test_params_file_round_trip_defaults() {
        let params: BatchParams = serde_json::from_str(
            r#"{
                "model_count": 3,
                "seed": 5,
                "time_limit": 1.5,
                "layout": {"pore_count": 4, "shape": {"kind": "sphere", "radius": 0.2}}
            }"#,
        )
        .unwrap();
        assert_eq!(params.model_count, 3);
        assert_eq!(params.seed, Some(5));
        assert_eq!(params.time_limit, Some(Duration::from_millis(1500)));
        assert_eq!(params.layout.pore_count, 4);
        assert_eq!(params.section_step, DEFAULT_SECTION_STEP);
        assert_eq!(params.exhaustion_policy, ExhaustionPolicy::Retry);
    }
}

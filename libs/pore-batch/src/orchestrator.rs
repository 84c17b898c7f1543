//! # Batch Orchestrator
//!
//! Drives `model_count` models through sampling, solid construction,
//! reporting, export and rendering.
//!
//! ## Model Lifecycle
//!
//! ```text
//! Sampling ─┬─ Accepted → Building → Reporting → Exporting → Rendering → Finalized
//!           └─ Exhausted → retry (same slot, next attempt)
//! ```
//!
//! Each attempt runs in its own collaborator session, closed on every exit
//! path. A model directory is only reused while empty, and a failed attempt
//! removes the files it wrote (and the directory, when it created it), so
//! only finalized models leave files behind.

use std::path::PathBuf;
use std::time::Instant;

use log::{debug, error, info, warn};
use pore_layout::{
    compute_report, validate_layout, LayoutConfiguration, ModelReport, VolumetricError,
    VolumetricResult,
};

use crate::artifacts::{ModelArtifacts, ModelPaths, SectionArtifact};
use crate::collaborator::{CollaboratorError, GeometryEngine, Renderer, SectionPlane, StandardView};
use crate::error::{BatchError, BatchResult, ModelPhase};
use crate::naming::model_name;
use crate::params::BatchParams;
use crate::report::ReportDocument;
use crate::retry::{RetryBudget, SlotDraw, SlotSampler};
use crate::seed::resolve_base_seed;

// =============================================================================
// RUN RESULT
// =============================================================================

/// A model that went through every stage.
#[derive(Debug, Clone)]
pub struct FinalizedModel {
    /// 1-based slot ordinal
    pub ordinal: usize,
    /// Deterministic model name
    pub name: String,
    /// Accepted layout
    pub layout: LayoutConfiguration,
    /// Volumetric report
    pub report: ModelReport,
    /// Stream seed of the accepted attempt
    pub seed: u64,
    /// Attempt number within the slot
    pub attempt: usize,
    /// Files written
    pub artifacts: ModelArtifacts,
}

/// Counters collected over a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Model attempts that reached the collaborators
    pub attempts: usize,
    /// Attempts discarded and retried
    pub retries: usize,
    /// Cross-sections that missed the solid
    pub skipped_sections: usize,
}

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct BatchRun {
    params: BatchParams,
    base_seed: u64,
    models: Vec<FinalizedModel>,
    stats: RunStats,
}

impl BatchRun {
    /// Parameters the run was started with.
    pub fn params(&self) -> &BatchParams {
        &self.params
    }

    /// Base seed every model stream was derived from.
    pub fn base_seed(&self) -> u64 {
        self.base_seed
    }

    /// Finalized models in ordinal order.
    pub fn models(&self) -> &[FinalizedModel] {
        &self.models
    }

    /// Run counters.
    pub fn stats(&self) -> RunStats {
        self.stats
    }
}

// =============================================================================
// RUN
// =============================================================================

/// Runs a whole batch against the given collaborators.
///
/// Models are produced sequentially, one session at a time.
///
/// # Errors
///
/// Invalid parameters, an exhausted retry budget, a passed deadline, a
/// domain violation, an invalid layout, an I/O failure, or a collaborator
/// failure when `retry_collaborator_failures` is off. Every error raised
/// after the first model started reports the number of completed models.
pub fn run<E, R>(params: &BatchParams, engine: &mut E, renderer: &mut R) -> BatchResult<BatchRun>
where
    E: GeometryEngine,
    R: Renderer<E>,
{
    run_with_report(params, engine, renderer, compute_report)
}

/// Computes the report of an accepted layout from a density in g/mm³.
type ReportFn = fn(&LayoutConfiguration, f64) -> VolumetricResult<ModelReport>;

fn run_with_report<E, R>(
    params: &BatchParams,
    engine: &mut E,
    renderer: &mut R,
    report: ReportFn,
) -> BatchResult<BatchRun>
where
    E: GeometryEngine,
    R: Renderer<E>,
{
    params.validate()?;

    let base_seed = resolve_base_seed(params.seed);
    let deadline = params.time_limit.map(|limit| Instant::now() + limit);
    let budget = RetryBudget::new(params.max_total_retries, deadline);
    let slots = SlotSampler::new(params, base_seed, &budget)?;

    info!(
        "starting batch of {} models (base seed {base_seed}) into {}",
        params.model_count,
        params.output_root.display()
    );

    let mut orchestrator = Orchestrator {
        params,
        engine,
        renderer,
        report,
        slots,
        models: Vec::with_capacity(params.model_count),
        stats: RunStats::default(),
    };

    match orchestrator.run_all() {
        Ok(()) => {
            let mut stats = orchestrator.stats;
            stats.retries = budget.used();
            info!(
                "batch finished: {} models, {} attempts, {} retries",
                orchestrator.models.len(),
                stats.attempts,
                stats.retries
            );
            Ok(BatchRun {
                params: params.clone(),
                base_seed,
                models: orchestrator.models,
                stats,
            })
        }
        Err(err) => {
            error!(
                "batch aborted after {} of {} models: {err}",
                orchestrator.models.len(),
                params.model_count
            );
            Err(err)
        }
    }
}

/// Why one attempt failed after sampling.
enum AttemptFailure {
    Collaborator {
        phase: ModelPhase,
        source: CollaboratorError,
    },
    Domain(VolumetricError),
    Fatal(BatchError),
}

/// Outcome of the stages run inside a session.
struct Built {
    report: ModelReport,
    artifacts: ModelArtifacts,
    skipped_sections: usize,
}

struct Orchestrator<'p, 'b, E, R> {
    params: &'p BatchParams,
    engine: &'p mut E,
    renderer: &'p mut R,
    report: ReportFn,
    slots: SlotSampler<'b>,
    models: Vec<FinalizedModel>,
    stats: RunStats,
}

impl<E, R> Orchestrator<'_, '_, E, R>
where
    E: GeometryEngine,
    R: Renderer<E>,
{
    fn run_all(&mut self) -> BatchResult<()> {
        for ordinal in 1..=self.params.model_count {
            let model = self.run_slot(ordinal)?;
            info!(
                "model {}/{} {}: {} pores, porosity {:.4} %, mass {:.6} g",
                ordinal,
                self.params.model_count,
                model.name,
                model.report.pore_count,
                model.report.porosity_percent(),
                model.report.mass
            );
            self.models.push(model);
        }
        Ok(())
    }

    /// Produces the model of one slot, retrying failed attempts.
    fn run_slot(&mut self, ordinal: usize) -> BatchResult<FinalizedModel> {
        let name = model_name(&self.params.layout, ordinal);
        let mut next_attempt = 0;

        loop {
            let completed = self.models.len();
            let draw = self
                .slots
                .draw(ordinal, next_attempt)
                .map_err(|stop| stop.into_error(completed))?;
            next_attempt = draw.attempt + 1;

            validate_layout(&draw.layout).map_err(|source| BatchError::LayoutInvariant {
                model: name.clone(),
                source,
            })?;

            let paths = ModelPaths::new(
                &self.params.output_root,
                &name,
                self.engine.export_extension(self.params.export_format),
                self.renderer.image_extension(),
            );
            self.stats.attempts += 1;

            match self.attempt(&name, &draw, &paths) {
                Ok(built) => {
                    self.stats.skipped_sections += built.skipped_sections;
                    return Ok(FinalizedModel {
                        ordinal,
                        name,
                        layout: draw.layout,
                        report: built.report,
                        seed: draw.seed,
                        attempt: draw.attempt,
                        artifacts: built.artifacts,
                    });
                }
                Err(failure) => {
                    match failure {
                        AttemptFailure::Collaborator { phase, source }
                            if self.params.retry_collaborator_failures =>
                        {
                            warn!(
                                "model {name} attempt {}: {phase} failed: {source}; retrying",
                                draw.attempt
                            );
                            self.slots
                                .budget()
                                .consume()
                                .map_err(|stop| stop.into_error(completed))?;
                        }
                        AttemptFailure::Collaborator { phase, source } => {
                            return Err(BatchError::Collaborator {
                                completed,
                                model: name,
                                phase,
                                source,
                            });
                        }
                        AttemptFailure::Domain(source) => {
                            return Err(BatchError::DomainViolation {
                                completed,
                                model: name,
                                source,
                            });
                        }
                        AttemptFailure::Fatal(err) => return Err(err),
                    }
                }
            }
        }
    }

    /// Runs one attempt inside its own session, discarding its files when it
    /// fails.
    fn attempt(
        &mut self,
        name: &str,
        draw: &SlotDraw,
        paths: &ModelPaths,
    ) -> Result<Built, AttemptFailure> {
        let created = paths
            .create_dir()
            .map_err(|e| AttemptFailure::Fatal(BatchError::io(paths.dir(), e)))?;

        let mut written = Vec::new();
        let result = self.in_session(name, draw, paths, &mut written);
        if result.is_err() {
            if let Err(err) = paths.discard(&written, created) {
                warn!("could not clean up {}: {err}", paths.dir().display());
            }
        }
        result
    }

    fn in_session(
        &mut self,
        name: &str,
        draw: &SlotDraw,
        paths: &ModelPaths,
        written: &mut Vec<PathBuf>,
    ) -> Result<Built, AttemptFailure> {
        let mut session = self
            .engine
            .open_session(name)
            .map_err(|source| AttemptFailure::Collaborator {
                phase: ModelPhase::Building,
                source,
            })?;
        debug!("model {name}: session opened");

        let result = self.stages(&mut session, name, draw, paths, written);
        let closed = self.engine.close_session(session);

        match (result, closed) {
            (Ok(built), Ok(())) => Ok(built),
            (Ok(_), Err(source)) => Err(AttemptFailure::Collaborator {
                phase: ModelPhase::Finalized,
                source,
            }),
            (Err(failure), Ok(())) => Err(failure),
            (Err(failure), Err(close_err)) => {
                warn!("model {name}: closing session after failure: {close_err}");
                Err(failure)
            }
        }
    }

    fn stages(
        &mut self,
        session: &mut E::Session,
        name: &str,
        draw: &SlotDraw,
        paths: &ModelPaths,
        written: &mut Vec<PathBuf>,
    ) -> Result<Built, AttemptFailure> {
        let params = self.params;
        let layout = &draw.layout;

        // Building: cube minus every pore, folded in acceptance order.
        let building = |source| AttemptFailure::Collaborator {
            phase: ModelPhase::Building,
            source,
        };
        let mut solid = self
            .engine
            .make_box(session, layout.params().cube_size)
            .map_err(building)?;
        for placement in layout.placements() {
            let pore = self.engine.make_primitive(session, placement).map_err(building)?;
            solid = self.engine.subtract(session, solid, pore).map_err(building)?;
        }
        debug!("model {name}: subtracted {} pores", layout.len());

        // Reporting
        let report =
            (self.report)(layout, params.density_per_cube_unit()).map_err(AttemptFailure::Domain)?;

        // Exporting
        let exporting = |source| AttemptFailure::Collaborator {
            phase: ModelPhase::Exporting,
            source,
        };
        let solid_path = paths.solid();
        written.push(solid_path.clone());
        self.engine
            .export(session, &solid, params.export_format, &solid_path)
            .map_err(exporting)?;

        let document =
            ReportDocument::new(name, draw.ordinal, draw.seed, draw.attempt, layout, &report);
        let report_text = paths.report_text();
        let report_json = paths.report_json();
        written.extend([report_text.clone(), report_json.clone()]);
        document.write_text(&report_text).map_err(AttemptFailure::Fatal)?;
        document.write_json(&report_json).map_err(AttemptFailure::Fatal)?;

        // Rendering
        let rendering = |source| AttemptFailure::Collaborator {
            phase: ModelPhase::Rendering,
            source,
        };
        let mut snapshots = Vec::with_capacity(StandardView::ALL.len());
        for view in StandardView::ALL {
            let path = paths.snapshot(view);
            written.push(path.clone());
            self.renderer
                .set_orthographic_view(session, view)
                .map_err(rendering)?;
            self.renderer
                .capture_snapshot(session, &solid, &path, &params.snapshot)
                .map_err(rendering)?;
            snapshots.push(path);
        }

        let offsets = params.section_offsets();
        let mut sections = Vec::with_capacity(SectionPlane::ALL.len() * offsets.len());
        let mut skipped_sections = 0;
        for plane in SectionPlane::ALL {
            for &offset in &offsets {
                let section = self
                    .renderer
                    .compute_planar_section(session, &solid, plane, offset)
                    .map_err(rendering)?;
                let Some(section) = section else {
                    debug!(
                        "model {name}: {} section at {offset} is empty, skipped",
                        plane.label()
                    );
                    skipped_sections += 1;
                    continue;
                };
                let path = paths.section(plane, offset);
                written.push(path.clone());
                self.renderer
                    .capture_section(session, &section, &path, &params.snapshot)
                    .map_err(rendering)?;
                sections.push(SectionArtifact {
                    plane: plane.label(),
                    offset,
                    path,
                });
            }
        }

        Ok(Built {
            report,
            artifacts: ModelArtifacts {
                dir: paths.dir().to_path_buf(),
                solid: solid_path,
                report_text,
                report_json,
                snapshots,
                sections,
            },
            skipped_sections,
        })
    }
}

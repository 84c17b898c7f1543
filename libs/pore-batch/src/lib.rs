//! # Pore Batch
//!
//! Batch orchestration of porous cube models: sampling with a run-level
//! retry policy, solid construction through a [`GeometryEngine`], reports,
//! snapshots and cross-sections through a [`Renderer`].
//!
//! ## Architecture
//!
//! ```text
//! BatchParams ──► run(engine, renderer)
//!                  │
//!                  ├── SlotSampler   (derived seed per attempt, RetryBudget)
//!                  ├── GeometryEngine (box, pores, subtract, export)
//!                  ├── compute_report (porosity, density, mass)
//!                  └── Renderer       (views, cross-sections)
//!                  ▼
//!               BatchRun { models, stats }
//! ```
//!
//! [`plan`] runs the pure stages only, in parallel.
//!
//! ## Usage
//!
//! ```rust
//! use pore_batch::{plan, BatchParams, ExhaustionPolicy};
//!
//! let params = BatchParams::default()
//!     .with_model_count(2)
//!     .with_exhaustion_policy(ExhaustionPolicy::Retry)
//!     .with_seed(1);
//! let batch = plan(&params).unwrap();
//! assert_eq!(batch.models.len(), 2);
//! ```

pub mod artifacts;
pub mod collaborator;
pub mod error;
pub mod naming;
pub mod orchestrator;
pub mod params;
pub mod plan;
pub mod report;
pub mod retry;
pub mod seed;

pub use artifacts::{ModelArtifacts, ModelPaths, SectionArtifact};
pub use collaborator::{
    CollaboratorError, CollaboratorResult, ExportFormat, GeometryEngine, Renderer, SectionPlane,
    SnapshotOptions, StandardView,
};
pub use error::{BatchError, BatchResult, ModelPhase};
pub use orchestrator::{run, BatchRun, FinalizedModel, RunStats};
pub use params::{BatchParams, ExhaustionPolicy};
pub use plan::{plan, BatchPlan, PlannedModel};
pub use report::ReportDocument;
pub use retry::RetryBudget;

//! # Batch Errors
//!
//! Run-level failures of the orchestrator and the planner.
//!
//! ## Error Policy
//!
//! - Sampler exhaustion is retried, never reported here unless the retry
//!   budget or the deadline runs out
//! - Every variant raised after models started carries the number of
//!   models completed before the failure
//! - Domain violations and layout invariant breaks halt the run at once

use std::fmt;
use std::path::PathBuf;

use pore_layout::{LayoutError, LayoutViolation, VolumetricError};
use thiserror::Error;

use crate::collaborator::CollaboratorError;

// =============================================================================
// MODEL PHASES
// =============================================================================

/// Stage of a model attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelPhase {
    /// Drawing a layout
    Sampling,
    /// Building the porous solid
    Building,
    /// Computing the volumetric report
    Reporting,
    /// Writing the solid and the reports
    Exporting,
    /// Capturing snapshots and cross-sections
    Rendering,
    /// Closing the session
    Finalized,
}

impl fmt::Display for ModelPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Sampling => "sampling",
            Self::Building => "building",
            Self::Reporting => "reporting",
            Self::Exporting => "exporting",
            Self::Rendering => "rendering",
            Self::Finalized => "finalizing",
        };
        f.write_str(name)
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that stop a batch run or plan.
#[derive(Debug, Error)]
pub enum BatchError {
    /// Parameters rejected before any model was attempted.
    #[error("Invalid batch parameters: {message}")]
    InvalidParams {
        /// What is wrong
        message: String,
    },

    /// The run-wide retry cap was reached.
    #[error("Retry budget exhausted after {retries} retries ({completed} models completed)")]
    RetryBudgetExhausted {
        /// Models finalized before the failure
        completed: usize,
        /// Retries spent
        retries: usize,
    },

    /// The run deadline passed.
    #[error("Deadline exceeded ({completed} models completed)")]
    DeadlineExceeded {
        /// Models finalized before the failure
        completed: usize,
    },

    /// A layout produced an impossible report.
    #[error("Model {model}: {source} ({completed} models completed)")]
    DomainViolation {
        /// Models finalized before the failure
        completed: usize,
        /// Model name
        model: String,
        /// Underlying calculator error
        #[source]
        source: VolumetricError,
    },

    /// The geometry engine or renderer failed and retries are disabled.
    #[error("Model {model}: {phase} failed: {source} ({completed} models completed)")]
    Collaborator {
        /// Models finalized before the failure
        completed: usize,
        /// Model name
        model: String,
        /// Phase that failed
        phase: ModelPhase,
        /// Underlying collaborator error
        #[source]
        source: CollaboratorError,
    },

    /// A sampled layout broke containment or separation.
    #[error("Model {model}: sampled layout is invalid: {source}")]
    LayoutInvariant {
        /// Model name
        model: String,
        /// Broken invariant
        #[source]
        source: LayoutViolation,
    },

    /// Creating or writing an artifact failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl BatchError {
    /// Creates an invalid parameters error.
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::InvalidParams {
            message: message.into(),
        }
    }

    /// Creates an I/O error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Models completed before the failure, when the run had started.
    pub fn completed(&self) -> Option<usize> {
        match self {
            Self::RetryBudgetExhausted { completed, .. }
            | Self::DeadlineExceeded { completed }
            | Self::DomainViolation { completed, .. }
            | Self::Collaborator { completed, .. } => Some(*completed),
            Self::InvalidParams { .. } | Self::LayoutInvariant { .. } | Self::Io { .. } => None,
        }
    }
}

impl From<LayoutError> for BatchError {
    fn from(err: LayoutError) -> Self {
        Self::invalid_params(err.to_string())
    }
}

/// Result type alias for batch operations.
pub type BatchResult<T> = Result<T, BatchError>;

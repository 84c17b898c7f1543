//! # Layout Errors
//!
//! Error types for shape construction, layout parameters and volumetric
//! reporting.
//!
//! ## Error Policy
//!
//! - Sampler exhaustion is NOT an error; it is an expected outcome
//!   ([`crate::SampleOutcome::Exhausted`])
//! - Invalid parameters are rejected before any sampling happens
//! - Physically impossible reports are errors, never clamped

use thiserror::Error;

use crate::validate::LayoutViolation;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors raised while building shapes or layout parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// A shape dimension is zero, negative or not finite.
    #[error("Invalid shape: {0}")]
    InvalidShape(String),

    /// A generation parameter is out of range.
    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name as it appears in the parameter struct
        name: &'static str,
        /// What is wrong with it
        message: String,
    },

    /// A stored layout breaks containment or separation.
    #[error("Invalid layout: {0}")]
    InvalidLayout(#[from] LayoutViolation),
}

impl LayoutError {
    /// Creates an invalid parameter error.
    pub fn invalid_parameter(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            message: message.into(),
        }
    }
}

/// Errors raised by the volumetric calculator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VolumetricError {
    /// Pore volume reaches or exceeds the cube volume.
    ///
    /// Indicates a parameter bug upstream; the report would carry a
    /// negative mass.
    #[error(
        "Porosity {porosity:.6} is not below 1 (pore volume {pore_volume:.6} vs cube volume {cube_volume:.6})"
    )]
    DomainViolation {
        /// Computed porosity fraction
        porosity: f64,
        /// Total pore volume
        pore_volume: f64,
        /// Cube volume
        cube_volume: f64,
    },

    /// Material density is negative or not finite.
    #[error("Invalid material density: {0}")]
    InvalidDensity(f64),
}

// =============================================================================
// RESULT TYPE ALIASES
// =============================================================================

/// Result type alias for shape and parameter construction.
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Result type alias for volumetric reporting.
pub type VolumetricResult<T> = Result<T, VolumetricError>;

// =============================================================================
// TESTS
// =============================================================================

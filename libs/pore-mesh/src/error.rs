//! # Mesh Errors
//!
//! Error types for mesh generation, boolean operations and export.

use pore_batch::CollaboratorError;
use thiserror::Error;

/// Errors that can occur in the mesh backend.
#[derive(Debug, Error)]
pub enum MeshError {
    /// Degenerate geometry
    #[error("Degenerate geometry: {message}")]
    DegenerateGeometry { message: String },

    /// Too many triangles
    #[error("Too many triangles: {count} (max: {max})")]
    TooManyTriangles { count: usize, max: usize },

    /// Unsupported operation
    #[error("Unsupported: {message}")]
    Unsupported { message: String },

    /// Writing an artifact failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MeshError {
    /// Creates a degenerate geometry error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            message: message.into(),
        }
    }

    /// Creates an unsupported operation error.
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported {
            message: message.into(),
        }
    }

    /// Converts into a collaborator error tagged with the failing operation.
    pub fn into_collaborator(self, operation: &'static str) -> CollaboratorError {
        match self {
            Self::Unsupported { message } => CollaboratorError::Unsupported {
                operation,
                message,
            },
            Self::Io(source) => CollaboratorError::Io(source),
            other => CollaboratorError::failed(operation, other.to_string()),
        }
    }
}

/// Result type alias for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

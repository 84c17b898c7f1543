//! # Collaborator Interfaces
//!
//! The geometry engine and renderer the orchestrator drives for each model.
//!
//! ## Sessions
//!
//! Every model gets its own [`GeometryEngine::Session`], opened before the
//! cube is built and closed before the next model starts. Solids and
//! sections are only valid inside the session that produced them.
//!
//! ## Errors
//!
//! Implementations report failures as [`CollaboratorError`]. The
//! orchestrator never inspects a collaborator's internal state.

use std::path::Path;

use config::constants::{SNAPSHOT_BACKGROUND, SNAPSHOT_HEIGHT, SNAPSHOT_WIDTH};
use pore_layout::PorePlacement;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Failure reported by a geometry engine or renderer.
#[derive(Debug, Error)]
pub enum CollaboratorError {
    /// The operation ran and failed.
    #[error("{operation} failed: {message}")]
    Failed {
        /// Name of the failing operation
        operation: &'static str,
        /// Backend-specific description
        message: String,
    },

    /// The backend does not implement the operation.
    #[error("{operation} is not supported: {message}")]
    Unsupported {
        /// Name of the unsupported operation
        operation: &'static str,
        /// What exactly is missing
        message: String,
    },

    /// Writing an artifact failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CollaboratorError {
    /// Creates a failed operation error.
    pub fn failed(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Failed {
            operation,
            message: message.into(),
        }
    }
}

/// Result type alias for collaborator calls.
pub type CollaboratorResult<T> = Result<T, CollaboratorError>;

// =============================================================================
// PARAMETER TYPES
// =============================================================================

/// Solid export format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Triangulated surface
    #[default]
    Mesh,
    /// Exact boundary representation
    BoundaryRep,
}

/// Orthographic viewing direction for snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardView {
    /// Looking along +Y
    Front,
    /// Looking down along -Z
    Top,
    /// Looking along -X
    Right,
    /// Looking toward the origin from the (+X, -Y, +Z) octant
    Isometric,
}

impl StandardView {
    /// Views captured for every model, in capture order.
    pub const ALL: [StandardView; 4] = [Self::Front, Self::Top, Self::Right, Self::Isometric];

    /// Lowercase name used in artifact file names.
    pub fn name(self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Top => "top",
            Self::Right => "right",
            Self::Isometric => "isometric",
        }
    }
}

/// Axis-aligned cross-section plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionPlane {
    /// Normal along Z; offset is a Z coordinate
    XY,
    /// Normal along Y; offset is a Y coordinate
    XZ,
    /// Normal along X; offset is an X coordinate
    YZ,
}

impl SectionPlane {
    /// Planes sectioned for every model, in capture order.
    pub const ALL: [SectionPlane; 3] = [Self::XY, Self::XZ, Self::YZ];

    /// Uppercase label used in artifact file names.
    pub fn label(self) -> &'static str {
        match self {
            Self::XY => "XY",
            Self::XZ => "XZ",
            Self::YZ => "YZ",
        }
    }

    /// Index (0 = X, 1 = Y, 2 = Z) of the axis normal to the plane.
    pub fn normal_axis(self) -> usize {
        match self {
            Self::XY => 2,
            Self::XZ => 1,
            Self::YZ => 0,
        }
    }

    /// Indices of the two in-plane axes, as (horizontal, vertical).
    pub fn in_plane_axes(self) -> (usize, usize) {
        match self {
            Self::XY => (0, 1),
            Self::XZ => (0, 2),
            Self::YZ => (1, 2),
        }
    }
}

/// Image capture settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotOptions {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Background colour
    pub background: String,
}

impl Default for SnapshotOptions {
    fn default() -> Self {
        Self {
            width: SNAPSHOT_WIDTH,
            height: SNAPSHOT_HEIGHT,
            background: SNAPSHOT_BACKGROUND.to_string(),
        }
    }
}

impl SnapshotOptions {
    /// Set the image size.
    #[must_use]
    pub const fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the background colour.
    #[must_use]
    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.background = background.into();
        self
    }
}

// =============================================================================
// TRAITS
// =============================================================================

/// Builds, combines and exports solids.
pub trait GeometryEngine {
    /// Handle to a solid inside a session.
    type Solid;
    /// Per-model working context.
    type Session;

    /// Opens a fresh session for the named model.
    fn open_session(&mut self, name: &str) -> CollaboratorResult<Self::Session>;

    /// Closes a session and releases everything created in it.
    fn close_session(&mut self, session: Self::Session) -> CollaboratorResult<()>;

    /// Creates the solid cube `[0, size]³`.
    fn make_box(&mut self, session: &mut Self::Session, size: f64)
        -> CollaboratorResult<Self::Solid>;

    /// Creates the solid of one pore at its center.
    fn make_primitive(
        &mut self,
        session: &mut Self::Session,
        placement: &PorePlacement,
    ) -> CollaboratorResult<Self::Solid>;

    /// Returns `base` with `tool` removed.
    fn subtract(
        &mut self,
        session: &mut Self::Session,
        base: Self::Solid,
        tool: Self::Solid,
    ) -> CollaboratorResult<Self::Solid>;

    /// Writes a solid to `path`.
    fn export(
        &mut self,
        session: &mut Self::Session,
        solid: &Self::Solid,
        format: ExportFormat,
        path: &Path,
    ) -> CollaboratorResult<()>;

    /// File extension, without the dot, for an export format.
    fn export_extension(&self, format: ExportFormat) -> &'static str;
}

/// Captures snapshots and cross-sections of solids from a [`GeometryEngine`].
pub trait Renderer<E: GeometryEngine> {
    /// A planar section of a solid.
    type Section;

    /// Points the view at one of the standard orthographic directions.
    fn set_orthographic_view(
        &mut self,
        session: &mut E::Session,
        view: StandardView,
    ) -> CollaboratorResult<()>;

    /// Renders the solid from the current view to an image at `path`.
    fn capture_snapshot(
        &mut self,
        session: &mut E::Session,
        solid: &E::Solid,
        path: &Path,
        options: &SnapshotOptions,
    ) -> CollaboratorResult<()>;

    /// Cuts the solid with an axis-aligned plane.
    ///
    /// Returns `None` when the plane misses the solid.
    fn compute_planar_section(
        &mut self,
        session: &mut E::Session,
        solid: &E::Solid,
        plane: SectionPlane,
        offset: f64,
    ) -> CollaboratorResult<Option<Self::Section>>;

    /// Renders a section to an image at `path`.
    fn capture_section(
        &mut self,
        session: &mut E::Session,
        section: &Self::Section,
        path: &Path,
        options: &SnapshotOptions,
    ) -> CollaboratorResult<()>;

    /// File extension, without the dot, of captured images.
    fn image_extension(&self) -> &'static str {
        "png"
    }
}

//! # Rendering
//!
//! SVG snapshots and section images for the mesh backend.

pub mod camera;
pub mod svg;

use std::fs;
use std::path::Path;

use pore_batch::{
    CollaboratorError, CollaboratorResult, Renderer, SectionPlane, SnapshotOptions, StandardView,
};

use crate::engine::{MeshEngine, MeshSession};
use crate::mesh::Mesh;
use crate::section::{cross_section, CrossSection};
use camera::Camera;

/// Renders [`MeshEngine`] solids to SVG files.
///
/// The view is stored on the session, so each model starts from the
/// session's default view.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgRenderer;

impl SvgRenderer {
    /// Creates a renderer.
    pub fn new() -> Self {
        Self
    }
}

impl Renderer<MeshEngine> for SvgRenderer {
    type Section = CrossSection;

    fn set_orthographic_view(
        &mut self,
        session: &mut MeshSession,
        view: StandardView,
    ) -> CollaboratorResult<()> {
        session.set_view(view);
        Ok(())
    }

    fn capture_snapshot(
        &mut self,
        session: &mut MeshSession,
        solid: &Mesh,
        path: &Path,
        options: &SnapshotOptions,
    ) -> CollaboratorResult<()> {
        if options.width == 0 || options.height == 0 {
            return Err(CollaboratorError::failed(
                "capture_snapshot",
                format!("image size {}x{} is empty", options.width, options.height),
            ));
        }
        let document = svg::render_mesh(solid, &Camera::for_view(session.view()), options);
        fs::write(path, document)?;
        Ok(())
    }

    fn compute_planar_section(
        &mut self,
        _session: &mut MeshSession,
        solid: &Mesh,
        plane: SectionPlane,
        offset: f64,
    ) -> CollaboratorResult<Option<CrossSection>> {
        Ok(cross_section(solid, plane, offset))
    }

    fn capture_section(
        &mut self,
        _session: &mut MeshSession,
        section: &CrossSection,
        path: &Path,
        options: &SnapshotOptions,
    ) -> CollaboratorResult<()> {
        fs::write(path, svg::render_section(section, options))?;
        Ok(())
    }

    fn image_extension(&self) -> &'static str {
        "svg"
    }
}

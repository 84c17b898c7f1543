//! # Mesh Geometry Engine
//!
//! [`GeometryEngine`] over in-memory triangle meshes.
//!
//! Pores are tessellated with [`MeshEngine::segments`] segments and removed
//! from the cube by BSP difference. Solids export as STL; boundary
//! representation export is not available.

use std::path::Path;

use config::constants::DEFAULT_PORE_SEGMENTS;
use log::debug;
use pore_batch::{CollaboratorResult, ExportFormat, GeometryEngine, StandardView};
use pore_layout::PorePlacement;

use crate::error::MeshError;
use crate::export::{save_stl, StlFormat};
use crate::mesh::Mesh;
use crate::ops::boolean::difference;
use crate::primitives::{create_cube, create_pore};

/// Per-model state of a [`MeshEngine`].
#[derive(Debug, Clone, PartialEq)]
pub struct MeshSession {
    name: String,
    view: StandardView,
    solids_created: usize,
}

impl MeshSession {
    /// Model name the session was opened for.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current snapshot view.
    pub fn view(&self) -> StandardView {
        self.view
    }

    /// Changes the snapshot view.
    pub fn set_view(&mut self, view: StandardView) {
        self.view = view;
    }

    /// Solids built in this session.
    pub fn solids_created(&self) -> usize {
        self.solids_created
    }
}

/// Mesh-based geometry engine.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use pore_batch::GeometryEngine;
/// use pore_layout::{PorePlacement, PoreShape};
/// use pore_mesh::MeshEngine;
///
/// let mut engine = MeshEngine::default().with_segments(8);
/// let mut session = engine.open_session("demo").unwrap();
/// let cube = engine.make_box(&mut session, 10.0).unwrap();
/// let pore = PorePlacement::new(PoreShape::sphere(1.0).unwrap(), DVec3::splat(5.0));
/// let tool = engine.make_primitive(&mut session, &pore).unwrap();
/// let solid = engine.subtract(&mut session, cube, tool).unwrap();
/// engine.close_session(session).unwrap();
///
/// assert!(solid.signed_volume() < 1000.0);
/// assert_eq!(engine.open_sessions(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MeshEngine {
    segments: u32,
    stl_format: StlFormat,
    open_sessions: usize,
}

impl Default for MeshEngine {
    fn default() -> Self {
        Self {
            segments: DEFAULT_PORE_SEGMENTS,
            stl_format: StlFormat::default(),
            open_sessions: 0,
        }
    }
}

impl MeshEngine {
    /// Set the pore tessellation segment count.
    #[must_use]
    pub const fn with_segments(mut self, segments: u32) -> Self {
        self.segments = segments;
        self
    }

    /// Set the STL encoding used for mesh export.
    #[must_use]
    pub const fn with_stl_format(mut self, format: StlFormat) -> Self {
        self.stl_format = format;
        self
    }

    /// Pore tessellation segment count.
    pub fn segments(&self) -> u32 {
        self.segments
    }

    /// Sessions opened and not yet closed.
    pub fn open_sessions(&self) -> usize {
        self.open_sessions
    }
}

impl GeometryEngine for MeshEngine {
    type Solid = Mesh;
    type Session = MeshSession;

    fn open_session(&mut self, name: &str) -> CollaboratorResult<MeshSession> {
        self.open_sessions += 1;
        debug!("opened mesh session '{}'", name);
        Ok(MeshSession {
            name: name.to_string(),
            view: StandardView::Isometric,
            solids_created: 0,
        })
    }

    fn close_session(&mut self, session: MeshSession) -> CollaboratorResult<()> {
        self.open_sessions = self.open_sessions.saturating_sub(1);
        debug!(
            "closed mesh session '{}' after {} solids",
            session.name, session.solids_created
        );
        Ok(())
    }

    fn make_box(&mut self, session: &mut MeshSession, size: f64) -> CollaboratorResult<Mesh> {
        let mesh = create_cube(size).map_err(|e| e.into_collaborator("make_box"))?;
        session.solids_created += 1;
        Ok(mesh)
    }

    fn make_primitive(
        &mut self,
        session: &mut MeshSession,
        placement: &PorePlacement,
    ) -> CollaboratorResult<Mesh> {
        let mesh =
            create_pore(placement, self.segments).map_err(|e| e.into_collaborator("make_primitive"))?;
        session.solids_created += 1;
        Ok(mesh)
    }

    fn subtract(
        &mut self,
        session: &mut MeshSession,
        base: Mesh,
        tool: Mesh,
    ) -> CollaboratorResult<Mesh> {
        let mesh = difference(&base, &tool).map_err(|e| e.into_collaborator("subtract"))?;
        session.solids_created += 1;
        Ok(mesh)
    }

    fn export(
        &mut self,
        _session: &mut MeshSession,
        solid: &Mesh,
        format: ExportFormat,
        path: &Path,
    ) -> CollaboratorResult<()> {
        match format {
            ExportFormat::Mesh => {
                save_stl(solid, path, self.stl_format).map_err(|e| e.into_collaborator("export"))
            }
            ExportFormat::BoundaryRep => {
                Err(MeshError::unsupported("the mesh backend has no boundary representation")
                    .into_collaborator("export"))
            }
        }
    }

    fn export_extension(&self, format: ExportFormat) -> &'static str {
        match format {
            ExportFormat::Mesh => "stl",
            ExportFormat::BoundaryRep => "step",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;
    use pore_batch::CollaboratorError;
    use pore_layout::PoreShape;

    #[test]
    fn test_session_counting() {
        let mut engine = MeshEngine::default();
        let a = engine.open_session("a").unwrap();
        let b = engine.open_session("b").unwrap();
        assert_eq!(engine.open_sessions(), 2);
        engine.close_session(a).unwrap();
        engine.close_session(b).unwrap();
        assert_eq!(engine.open_sessions(), 0);
    }

    #[test]
    fn test_make_box_rejects_bad_size() {
        let mut engine = MeshEngine::default();
        let mut session = engine.open_session("bad").unwrap();
        let err = engine.make_box(&mut session, 0.0).unwrap_err();
        assert!(matches!(err, CollaboratorError::Failed { operation: "make_box", .. }));
        assert_eq!(session.solids_created(), 0);
    }

    #[test]
    fn test_ellipsoid_primitive_bounds() {
        let mut engine = MeshEngine::default().with_segments(8);
        let mut session = engine.open_session("e").unwrap();
        let placement = PorePlacement::new(
            PoreShape::ellipsoid(0.3, 0.2, 0.1).unwrap(),
            DVec3::new(1.0, 2.0, 3.0),
        );
        let mesh = engine.make_primitive(&mut session, &placement).unwrap();
        let (min, max) = mesh.bounding_box();
        assert!(min.x >= 0.7 - 1e-12 && max.x <= 1.3 + 1e-12);
        assert!(min.z >= 2.9 - 1e-12 && max.z <= 3.1 + 1e-12);
    }

    #[test]
    fn test_boundary_rep_export_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = MeshEngine::default();
        let mut session = engine.open_session("step").unwrap();
        let cube = engine.make_box(&mut session, 1.0).unwrap();
        let err = engine
            .export(&mut session, &cube, ExportFormat::BoundaryRep, &dir.path().join("c.step"))
            .unwrap_err();
        assert!(matches!(err, CollaboratorError::Unsupported { operation: "export", .. }));
        assert_eq!(engine.export_extension(ExportFormat::BoundaryRep), "step");
    }
}

//! Recording fake collaborators.
//!
//! The engine keeps solids as plain descriptions and writes small text
//! files for exports; the renderer writes one line per image. Every call is
//! recorded on the session, and closed sessions are kept for inspection.

#![allow(dead_code)]

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use pore_batch::{
    CollaboratorError, CollaboratorResult, ExportFormat, GeometryEngine, Renderer, SectionPlane,
    SnapshotOptions, StandardView,
};
use pore_layout::{LayoutParams, PorePlacement, PoreShape};

#[derive(Debug, Clone, PartialEq)]
pub struct FakeSolid {
    pub size: f64,
    pub pores: Vec<PorePlacement>,
}

#[derive(Debug, Default)]
pub struct FakeSession {
    pub index: usize,
    pub name: String,
    pub calls: Vec<String>,
}

#[derive(Debug, Default)]
pub struct RecordingEngine {
    /// Sessions opened so far
    pub opened: usize,
    pub closed: Vec<FakeSession>,
    /// Session indices whose subtract fails
    pub fail_subtract: HashSet<usize>,
}

impl GeometryEngine for RecordingEngine {
    type Solid = FakeSolid;
    type Session = FakeSession;

    fn open_session(&mut self, name: &str) -> CollaboratorResult<FakeSession> {
        let session = FakeSession {
            index: self.opened,
            name: name.to_string(),
            calls: vec!["open".into()],
        };
        self.opened += 1;
        Ok(session)
    }

    fn close_session(&mut self, mut session: FakeSession) -> CollaboratorResult<()> {
        session.calls.push("close".into());
        self.closed.push(session);
        Ok(())
    }

    fn make_box(&mut self, session: &mut FakeSession, size: f64) -> CollaboratorResult<FakeSolid> {
        session.calls.push("box".into());
        Ok(FakeSolid {
            size,
            pores: Vec::new(),
        })
    }

    fn make_primitive(
        &mut self,
        session: &mut FakeSession,
        placement: &PorePlacement,
    ) -> CollaboratorResult<FakeSolid> {
        session.calls.push("primitive".into());
        Ok(FakeSolid {
            size: 0.0,
            pores: vec![*placement],
        })
    }

    fn subtract(
        &mut self,
        session: &mut FakeSession,
        mut base: FakeSolid,
        tool: FakeSolid,
    ) -> CollaboratorResult<FakeSolid> {
        session.calls.push("subtract".into());
        if self.fail_subtract.contains(&session.index) {
            return Err(CollaboratorError::failed("subtract", "injected failure"));
        }
        base.pores.extend(tool.pores);
        Ok(base)
    }

    fn export(
        &mut self,
        session: &mut FakeSession,
        solid: &FakeSolid,
        format: ExportFormat,
        path: &Path,
    ) -> CollaboratorResult<()> {
        session.calls.push("export".into());
        if format == ExportFormat::BoundaryRep {
            return Err(CollaboratorError::Unsupported {
                operation: "export",
                message: "no boundary representation".into(),
            });
        }
        fs::write(path, format!("solid {} pores\n", solid.pores.len()))?;
        Ok(())
    }

    fn export_extension(&self, format: ExportFormat) -> &'static str {
        match format {
            ExportFormat::Mesh => "mesh",
            ExportFormat::BoundaryRep => "brep",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FakeSection {
    pub plane: SectionPlane,
    pub offset: f64,
}

#[derive(Debug, Default)]
pub struct RecordingRenderer {
    /// Session indices whose section capture fails
    pub fail_sections: HashSet<usize>,
    /// Plane reported as missing the solid
    pub empty_plane: Option<SectionPlane>,
}

impl Renderer<RecordingEngine> for RecordingRenderer {
    type Section = FakeSection;

    fn set_orthographic_view(
        &mut self,
        session: &mut FakeSession,
        view: StandardView,
    ) -> CollaboratorResult<()> {
        session.calls.push(format!("view:{}", view.name()));
        Ok(())
    }

    fn capture_snapshot(
        &mut self,
        session: &mut FakeSession,
        solid: &FakeSolid,
        path: &Path,
        options: &SnapshotOptions,
    ) -> CollaboratorResult<()> {
        session.calls.push("snapshot".into());
        fs::write(
            path,
            format!("{}x{} {} pores\n", options.width, options.height, solid.pores.len()),
        )?;
        Ok(())
    }

    fn compute_planar_section(
        &mut self,
        session: &mut FakeSession,
        _solid: &FakeSolid,
        plane: SectionPlane,
        offset: f64,
    ) -> CollaboratorResult<Option<FakeSection>> {
        session.calls.push("section".into());
        if self.empty_plane == Some(plane) {
            return Ok(None);
        }
        Ok(Some(FakeSection { plane, offset }))
    }

    fn capture_section(
        &mut self,
        session: &mut FakeSession,
        section: &FakeSection,
        path: &Path,
        _options: &SnapshotOptions,
    ) -> CollaboratorResult<()> {
        session.calls.push("capture_section".into());
        if self.fail_sections.contains(&session.index) {
            return Err(CollaboratorError::failed("capture_section", "injected failure"));
        }
        fs::write(path, format!("{} {}\n", section.plane.label(), section.offset))?;
        Ok(())
    }
}

/// Ten small spheres in a unit cube.
pub fn unit_layout() -> LayoutParams {
    LayoutParams::default()
        .with_pore_count(10)
        .with_cube_size(1.0)
        .with_distribution(0.5, 0.15)
        .with_shape(PoreShape::sphere(0.05).unwrap())
        .with_gap(0.01)
}

/// One sphere whose only admissible center is the exact cube center.
pub fn infeasible_layout() -> LayoutParams {
    LayoutParams::default()
        .with_pore_count(1)
        .with_cube_size(1.0)
        .with_shape(PoreShape::sphere(0.5).unwrap())
        .with_gap(0.0)
        .with_max_attempts_per_pore(5)
}

/// Names of the entries directly under `dir`, sorted.
pub fn dir_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = match fs::read_dir(dir) {
        Ok(entries) => entries
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect(),
        Err(_) => Vec::new(),
    };
    names.sort();
    names
}

//! # Artifact Layout
//!
//! File paths of one model's artifacts under `<output_root>/<model>/`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::collaborator::{SectionPlane, StandardView};
use crate::naming::section_label;

/// Paths for one model, given the collaborators' file extensions.
///
/// # Example
///
/// ```rust
/// use std::path::Path;
/// use pore_batch::artifacts::ModelPaths;
/// use pore_batch::{SectionPlane, StandardView};
///
/// let paths = ModelPaths::new("out", "sphere_r0.05_n10_mu0.50_sd0.15_001", "stl", "svg");
/// assert_eq!(
///     paths.section(SectionPlane::XZ, 0.5),
///     Path::new("out/sphere_r0.05_n10_mu0.50_sd0.15_001/sphere_r0.05_n10_mu0.50_sd0.15_001_cross_section_XZ_0.50.svg"),
/// );
/// assert!(paths.snapshot(StandardView::Top).ends_with("sphere_r0.05_n10_mu0.50_sd0.15_001_top.svg"));
/// ```
#[derive(Debug, Clone)]
pub struct ModelPaths {
    dir: PathBuf,
    name: String,
    solid_extension: &'static str,
    image_extension: &'static str,
}

impl ModelPaths {
    /// Creates the path set for `name` under `root`.
    pub fn new(
        root: impl AsRef<Path>,
        name: &str,
        solid_extension: &'static str,
        image_extension: &'static str,
    ) -> Self {
        Self {
            dir: root.as_ref().join(name),
            name: name.to_string(),
            solid_extension,
            image_extension,
        }
    }

    /// Model directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Exported solid.
    pub fn solid(&self) -> PathBuf {
        self.file(&format!("{}.{}", self.name, self.solid_extension))
    }

    /// Plain-text report.
    pub fn report_text(&self) -> PathBuf {
        self.file(&format!("{}_report.txt", self.name))
    }

    /// JSON report.
    pub fn report_json(&self) -> PathBuf {
        self.file(&format!("{}_report.json", self.name))
    }

    /// Snapshot from a standard view.
    pub fn snapshot(&self, view: StandardView) -> PathBuf {
        self.file(&format!("{}_{}.{}", self.name, view.name(), self.image_extension))
    }

    /// Cross-section image.
    pub fn section(&self, plane: SectionPlane, offset: f64) -> PathBuf {
        self.file(&format!(
            "{}_cross_section_{}_{}.{}",
            self.name,
            plane.label(),
            section_label(offset),
            self.image_extension
        ))
    }

    /// Prepares the model directory for one attempt.
    ///
    /// Returns `true` when the directory was created. An existing directory
    /// is reused only while it is empty.
    pub fn create_dir(&self) -> io::Result<bool> {
        match fs::read_dir(&self.dir) {
            Ok(mut entries) => {
                if entries.next().is_some() {
                    return Err(io::Error::new(
                        io::ErrorKind::AlreadyExists,
                        format!("model directory {} is not empty", self.dir.display()),
                    ));
                }
                Ok(false)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                fs::create_dir_all(&self.dir)?;
                Ok(true)
            }
            Err(err) => Err(err),
        }
    }

    /// Removes the files an attempt wrote, then the directory when the
    /// attempt created it. Missing files are skipped.
    pub fn discard(&self, written: &[PathBuf], created: bool) -> io::Result<()> {
        for path in written {
            ignore_missing(fs::remove_file(path))?;
        }
        if created {
            ignore_missing(fs::remove_dir(&self.dir))?;
        }
        Ok(())
    }

    fn file(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }
}

fn ignore_missing(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

/// A written cross-section image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionArtifact {
    /// Section plane label
    pub plane: &'static str,
    /// Offset along the plane normal
    pub offset: f64,
    /// Image path
    pub path: PathBuf,
}

/// Files written for one finalized model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelArtifacts {
    /// Model directory
    pub dir: PathBuf,
    /// Exported solid
    pub solid: PathBuf,
    /// Plain-text report
    pub report_text: PathBuf,
    /// JSON report
    pub report_json: PathBuf,
    /// Snapshot images, one per standard view
    pub snapshots: Vec<PathBuf>,
    /// Cross-section images; sections that missed the solid are absent
    pub sections: Vec<SectionArtifact>,
}

impl ModelArtifacts {
    /// Every file path, in write order.
    pub fn files(&self) -> impl Iterator<Item = &Path> {
        [
            self.solid.as_path(),
            self.report_text.as_path(),
            self.report_json.as_path(),
        ]
        .into_iter()
        .chain(self.snapshots.iter().map(PathBuf::as_path))
        .chain(self.sections.iter().map(|s| s.path.as_path()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_paths() {
        let paths = ModelPaths::new("/tmp/runs", "m_001", "step", "png");
        assert_eq!(paths.solid(), Path::new("/tmp/runs/m_001/m_001.step"));
        assert_eq!(paths.report_text(), Path::new("/tmp/runs/m_001/m_001_report.txt"));
        assert_eq!(paths.report_json(), Path::new("/tmp/runs/m_001/m_001_report.json"));
    }

    #[test]
    fn test_section_paths_unique_per_plane() {
        let paths = ModelPaths::new("r", "m", "stl", "png");
        let xy = paths.section(SectionPlane::XY, 1.0);
        let yz = paths.section(SectionPlane::YZ, 1.0);
        assert_ne!(xy, yz);
        assert!(xy.ends_with("m_cross_section_XY_1.00.png"));
    }

    #[test]
    fn test_discard_missing_dir_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ModelPaths::new(dir.path(), "never_created", "stl", "png");
        assert!(paths.discard(&[paths.solid()], true).is_ok());
    }

    #[test]
    fn test_create_then_discard() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ModelPaths::new(dir.path(), "m_001", "stl", "png");
        assert!(paths.create_dir().unwrap());
        std::fs::write(paths.report_text(), "x").unwrap();
        paths.discard(&[paths.report_text()], true).unwrap();
        assert!(!paths.dir().exists());
    }

    #[test]
    fn test_empty_existing_dir_is_reused_and_kept() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ModelPaths::new(dir.path(), "m_001", "stl", "png");
        std::fs::create_dir(paths.dir()).unwrap();

        assert!(!paths.create_dir().unwrap());
        std::fs::write(paths.solid(), "solid").unwrap();
        paths.discard(&[paths.solid()], false).unwrap();

        assert!(paths.dir().exists());
        assert!(!paths.solid().exists());
    }

    #[test]
    fn test_non_empty_dir_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ModelPaths::new(dir.path(), "m_001", "stl", "png");
        std::fs::create_dir(paths.dir()).unwrap();
        std::fs::write(paths.dir().join("notes.txt"), "keep").unwrap();

        let err = paths.create_dir().unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::AlreadyExists);
        assert!(paths.dir().join("notes.txt").exists());
    }
}

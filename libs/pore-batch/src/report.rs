//! # Report Artifacts
//!
//! Plain-text and JSON renderings of a model's volumetric report.
//!
//! Both carry the model name, the parameters, the seed and every pore
//! placement, so a model can be rebuilt from its report alone.

use std::fmt;
use std::fs;
use std::path::Path;

use pore_layout::{units, Completeness, LayoutConfiguration, LayoutParams, ModelReport, PorePlacement};
use serde::Serialize;

use crate::error::{BatchError, BatchResult};

/// Everything written into a report artifact.
#[derive(Debug, Clone, Serialize)]
pub struct ReportDocument<'a> {
    /// Model name
    pub model: &'a str,
    /// 1-based slot ordinal
    pub ordinal: usize,
    /// Stream seed of the accepted attempt
    pub seed: u64,
    /// Attempt number within the slot
    pub attempt: usize,
    /// Layout parameters
    pub params: &'a LayoutParams,
    /// Whether every requested pore was placed
    pub completeness: Completeness,
    /// Material density in g/cm³
    pub material_density_g_per_cm3: f64,
    /// Volumetric report, density in g/mm³ and mass in g
    pub report: &'a ModelReport,
    /// Accepted placements, in acceptance order
    pub placements: &'a [PorePlacement],
}

impl<'a> ReportDocument<'a> {
    /// Assembles the document for an accepted layout.
    pub fn new(
        model: &'a str,
        ordinal: usize,
        seed: u64,
        attempt: usize,
        layout: &'a LayoutConfiguration,
        report: &'a ModelReport,
    ) -> Self {
        Self {
            model,
            ordinal,
            seed,
            attempt,
            params: layout.params(),
            completeness: layout.completeness(),
            material_density_g_per_cm3: units::g_per_mm3_to_g_per_cm3(report.material_density),
            report,
            placements: layout.placements(),
        }
    }

    /// Human-readable report.
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Pretty-printed JSON report.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Writes the text report to `path`.
    pub fn write_text(&self, path: &Path) -> BatchResult<()> {
        fs::write(path, self.to_text()).map_err(|e| BatchError::io(path, e))
    }

    /// Writes the JSON report to `path`.
    pub fn write_json(&self, path: &Path) -> BatchResult<()> {
        let json = self
            .to_json()
            .map_err(|e| BatchError::io(path, std::io::Error::other(e)))?;
        fs::write(path, json).map_err(|e| BatchError::io(path, e))
    }
}

impl fmt::Display for ReportDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.report;
        let p = self.params;

        writeln!(f, "Model: {}", self.model)?;
        writeln!(f, "Ordinal: {}", self.ordinal)?;
        writeln!(f, "Seed: {} (attempt {})", self.seed, self.attempt)?;
        writeln!(f)?;
        writeln!(f, "Cube size: {:.4} mm", p.cube_size)?;
        writeln!(f, "Pore shape: {}", p.shape.kind())?;
        let axes = p.shape.semi_axes();
        writeln!(f, "Semi-axes: {:.4} x {:.4} x {:.4} mm", axes.x, axes.y, axes.z)?;
        writeln!(f, "Gap: {:.4} mm", p.gap)?;
        writeln!(f, "Distribution: mean {:.4}, std {:.4}", p.mean, p.std_dev)?;
        match self.completeness {
            Completeness::Complete => writeln!(f, "Pores: {}", r.pore_count)?,
            Completeness::Partial { requested } => {
                writeln!(f, "Pores: {} of {} requested (partial)", r.pore_count, requested)?
            }
        }
        writeln!(f)?;
        writeln!(f, "Total pore volume: {:.6} mm^3", r.total_pore_volume)?;
        writeln!(f, "Cube volume: {:.6} mm^3", r.cube_volume)?;
        writeln!(f, "Solid volume: {:.6} mm^3", r.solid_volume())?;
        writeln!(f, "Porosity: {:.4} %", r.porosity_percent())?;
        writeln!(f, "Material density: {:.4} g/cm^3", self.material_density_g_per_cm3)?;
        writeln!(
            f,
            "Effective density: {:.4} g/cm^3",
            units::g_per_mm3_to_g_per_cm3(r.effective_density)
        )?;
        writeln!(f, "Mass: {:.6} g", r.mass)?;
        writeln!(f)?;
        writeln!(f, "Pore centers (mm):")?;
        for (i, placement) in self.placements.iter().enumerate() {
            let c = placement.center;
            writeln!(f, "  {:>4}: {:.6}, {:.6}, {:.6}", i + 1, c.x, c.y, c.z)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use pore_layout::{compute_report, PlacementSampler, PoreShape};

    use super::*;

    fn sample() -> (LayoutConfiguration, ModelReport) {
        let params = LayoutParams::default()
            .with_pore_count(10)
            .with_cube_size(1.0)
            .with_shape(PoreShape::sphere(0.05).unwrap())
            .with_gap(0.01);
        let layout = PlacementSampler::new(params)
            .unwrap()
            .sample_seeded(42)
            .accepted()
            .unwrap();
        let report = compute_report(&layout, units::g_per_cm3_to_g_per_mm3(7.85)).unwrap();
        (layout, report)
    }

    #[test]
    fn test_text_report_contents() {
        let (layout, report) = sample();
        let doc = ReportDocument::new("m_001", 1, 42, 0, &layout, &report);
        let text = doc.to_text();
        assert!(text.starts_with("Model: m_001\n"));
        assert!(text.contains("Pores: 10\n"));
        assert!(text.contains("Porosity: 0.5236 %"));
        assert!(text.contains("Material density: 7.8500 g/cm^3"));
        assert_eq!(text.lines().filter(|l| l.starts_with("  ")).count(), 10);
    }

    #[test]
    fn test_partial_layout_text() {
        let shape = PoreShape::sphere(0.05).unwrap();
        let params = LayoutParams::default()
            .with_pore_count(3)
            .with_cube_size(1.0)
            .with_shape(shape);
        let placement = PorePlacement::new(shape, glam::DVec3::splat(0.5));
        let layout = LayoutConfiguration::from_placements(params, vec![placement], Some(9));
        let report = compute_report(&layout, 0.00785).unwrap();
        let doc = ReportDocument::new("m_002", 2, 9, 4, &layout, &report);

        assert_eq!(doc.to_string(), doc.to_text());
        assert!(doc.to_text().contains("Pores: 1 of 3 requested (partial)\n"));
        assert!(doc.to_text().contains("Seed: 9 (attempt 4)\n"));
    }

    #[test]
    fn test_json_report_fields() {
        let (layout, report) = sample();
        let doc = ReportDocument::new("m_001", 1, 42, 0, &layout, &report);
        let value: serde_json::Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();
        assert_eq!(value["model"], "m_001");
        assert_eq!(value["completeness"]["status"], "complete");
        assert_eq!(value["placements"].as_array().unwrap().len(), 10);
        assert_relative_eq!(
            value["report"]["porosity"].as_f64().unwrap(),
            report.porosity,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_write_both_reports() {
        let (layout, report) = sample();
        let doc = ReportDocument::new("m_001", 1, 42, 0, &layout, &report);
        let dir = tempfile::tempdir().unwrap();
        doc.write_text(&dir.path().join("r.txt")).unwrap();
        doc.write_json(&dir.path().join("r.json")).unwrap();
        assert!(dir.path().join("r.txt").is_file());
        assert!(dir.path().join("r.json").is_file());
    }
}

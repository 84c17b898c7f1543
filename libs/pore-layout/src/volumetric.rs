//! # Volumetric Calculator
//!
//! Pore volume, porosity, effective density and mass of a porous cube.
//!
//! ## Formulas
//!
//! - sphere pore volume: `(4/3)·π·r³`
//! - ellipsoid pore volume: `(4/3)·π·rx·ry·rz`
//! - porosity: `Σ pore volume / cube_size³`
//! - effective density: `material_density × (1 − porosity)`
//! - mass: `effective_density × cube_size³`
//!
//! Porosity at or above 1 is a [`VolumetricError::DomainViolation`].

use serde::{Deserialize, Serialize};

use crate::error::{VolumetricError, VolumetricResult};
use crate::layout::{LayoutConfiguration, PorePlacement};

/// Derived volumetric properties of one model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelReport {
    /// Number of pores in the layout
    pub pore_count: usize,
    /// Sum of pore volumes
    pub total_pore_volume: f64,
    /// Cube volume
    pub cube_volume: f64,
    /// Pore volume over cube volume, in [0, 1)
    pub porosity: f64,
    /// Bulk material density the report was computed with
    pub material_density: f64,
    /// Density of the porous solid
    pub effective_density: f64,
    /// Mass of the porous solid
    pub mass: f64,
}

impl ModelReport {
    /// Porosity as a percentage.
    pub fn porosity_percent(&self) -> f64 {
        self.porosity * 100.0
    }

    /// Volume of material left after removing the pores.
    pub fn solid_volume(&self) -> f64 {
        self.cube_volume - self.total_pore_volume
    }
}

/// Computes the report for a layout.
///
/// `material_density` must be in mass per cube-length³ (see
/// [`crate::units`]).
///
/// # Example
///
/// ```rust
/// use pore_layout::{compute_report, LayoutConfiguration, LayoutParams, PorePlacement, PoreShape};
/// use glam::DVec3;
///
/// let shape = PoreShape::sphere(0.5).unwrap();
/// let params = LayoutParams::default().with_pore_count(1).with_cube_size(10.0).with_shape(shape);
/// let layout = LayoutConfiguration::from_placements(
///     params,
///     vec![PorePlacement::new(shape, DVec3::splat(5.0))],
///     None,
/// );
///
/// let report = compute_report(&layout, 0.00785).unwrap();
/// assert!(report.porosity > 0.0 && report.porosity < 0.001);
/// ```
pub fn compute_report(
    layout: &LayoutConfiguration,
    material_density: f64,
) -> VolumetricResult<ModelReport> {
    compute_report_in_cube(layout.placements(), layout.params().cube_size, material_density)
}

/// Computes the report for explicit placements in a cube of edge `cube_size`.
pub fn compute_report_in_cube(
    placements: &[PorePlacement],
    cube_size: f64,
    material_density: f64,
) -> VolumetricResult<ModelReport> {
    if !(material_density.is_finite() && material_density >= 0.0) {
        return Err(VolumetricError::InvalidDensity(material_density));
    }

    let total_pore_volume: f64 = placements.iter().map(|p| p.shape.volume()).sum();
    let cube_volume = cube_size.powi(3);
    let porosity = total_pore_volume / cube_volume;

    if porosity.is_nan() || porosity >= 1.0 {
        return Err(VolumetricError::DomainViolation {
            porosity,
            pore_volume: total_pore_volume,
            cube_volume,
        });
    }

    let effective_density = material_density * (1.0 - porosity);
    Ok(ModelReport {
        pore_count: placements.len(),
        total_pore_volume,
        cube_volume,
        porosity,
        material_density,
        effective_density,
        mass: effective_density * cube_volume,
    })
}

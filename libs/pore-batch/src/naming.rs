//! # Naming
//!
//! Deterministic model names and cross-section offsets.
//!
//! Names are built from the shape, the key distribution parameters and the
//! zero-padded ordinal. Two models of one run never share a name because
//! their ordinals differ.

use config::constants::{section_count, NAME_PRECISION, ORDINAL_WIDTH, SECTION_OFFSET_PRECISION};
use pore_layout::{LayoutParams, PoreShape};

/// Name of the model in slot `ordinal`.
///
/// # Example
///
/// ```rust
/// use pore_batch::naming::model_name;
/// use pore_layout::{LayoutParams, PoreShape};
///
/// let params = LayoutParams::default()
///     .with_pore_count(10)
///     .with_distribution(0.5, 0.15)
///     .with_shape(PoreShape::sphere(0.05).unwrap());
/// assert_eq!(model_name(&params, 1), "sphere_r0.05_n10_mu0.50_sd0.15_001");
/// ```
pub fn model_name(params: &LayoutParams, ordinal: usize) -> String {
    let p = NAME_PRECISION;
    let shape = match params.shape {
        PoreShape::Sphere { radius } => format!("sphere_r{radius:.p$}"),
        PoreShape::Ellipsoid {
            semi_axis_x,
            semi_axis_y,
            semi_axis_z,
        } => format!("ellipsoid_{semi_axis_x:.p$}x{semi_axis_y:.p$}x{semi_axis_z:.p$}"),
    };
    format!(
        "{shape}_n{}_mu{:.p$}_sd{:.p$}_{ordinal:0w$}",
        params.pore_count,
        params.mean,
        params.std_dev,
        w = ORDINAL_WIDTH,
    )
}

/// Section offsets `0, step, 2·step, …` up to and including `cube_size`.
///
/// The last offset is clamped to `cube_size`.
///
/// # Example
///
/// ```rust
/// use pore_batch::naming::section_offsets;
///
/// let offsets = section_offsets(1.0, 0.3);
/// assert_eq!(offsets.len(), 5);
/// assert_eq!(offsets[4], 1.0);
/// ```
pub fn section_offsets(cube_size: f64, step: f64) -> Vec<f64> {
    (0..section_count(cube_size, step))
        .map(|i| (i as f64 * step).min(cube_size))
        .collect()
}

/// Offset as printed in section file names.
pub fn section_label(offset: f64) -> String {
    format!("{:.*}", SECTION_OFFSET_PRECISION, offset)
}

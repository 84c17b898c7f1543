//! Density unit conversions.
//!
//! The volumetric calculator works in whatever mass/length³ unit the caller
//! supplies; it never converts. With cube sizes in millimetres, a bulk
//! density given in g/cm³ must be converted to g/mm³ first, and the reported
//! mass is then in grams.

use config::constants::MM3_PER_CM3;

/// Converts g/cm³ to g/mm³.
///
/// # Example
///
/// ```rust
/// use pore_layout::units::g_per_cm3_to_g_per_mm3;
///
/// assert!((g_per_cm3_to_g_per_mm3(7.85) - 0.00785).abs() < 1e-15);
/// ```
#[inline]
pub fn g_per_cm3_to_g_per_mm3(density: f64) -> f64 {
    density / MM3_PER_CM3
}

/// Converts g/mm³ to g/cm³.
#[inline]
pub fn g_per_mm3_to_g_per_cm3(density: f64) -> f64 {
    density * MM3_PER_CM3
}

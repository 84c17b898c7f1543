//! # Configuration Constants
//!
//! Centralized constants for the porous cube pipeline. Sampling budgets,
//! artifact naming precision, rendering defaults and unit conversions are
//! defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Sampling**: Rejection sampling and retry budgets
//! - **Tessellation**: Pore mesh resolution for the reference backend
//! - **Artifacts**: Snapshot size, cross-section step, name formatting
//! - **Units**: Density conversions

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Relative tolerance used when comparing derived volumes and porosities.
pub const VOLUME_RELATIVE_TOLERANCE: f64 = 1e-9;

// =============================================================================
// SAMPLING CONSTANTS
// =============================================================================

/// Default number of candidate draws per pore before the sampler gives up.
///
/// Worst-case sampler cost is `pore_count * DEFAULT_MAX_ATTEMPTS_PER_PORE`
/// candidate draws.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_MAX_ATTEMPTS_PER_PORE;
///
/// let pore_count = 10;
/// let worst_case = pore_count * DEFAULT_MAX_ATTEMPTS_PER_PORE;
/// assert_eq!(worst_case, 1000);
/// ```
pub const DEFAULT_MAX_ATTEMPTS_PER_PORE: usize = 100;

/// Default cap on retried model attempts across a whole batch run.
///
/// Infeasible parameters (a gap too large for the cube, say) would otherwise
/// retry forever.
pub const DEFAULT_MAX_TOTAL_RETRIES: usize = 1000;

/// Default Gaussian mean, as a fraction of the cube edge.
pub const DEFAULT_MEAN: f64 = 0.5;

/// Default Gaussian standard deviation, as a fraction of the cube edge.
pub const DEFAULT_STD_DEV: f64 = 0.15;

/// Default clearance gap between pores and between a pore and the cube wall.
pub const DEFAULT_GAP: f64 = 0.1;

/// Default cube edge length (millimetres).
pub const DEFAULT_CUBE_SIZE: f64 = 10.0;

/// Default sphere pore radius (millimetres).
pub const DEFAULT_PORE_RADIUS: f64 = 0.5;

/// Default number of pores per model.
pub const DEFAULT_PORE_COUNT: usize = 10;

/// Default number of models per batch.
pub const DEFAULT_MODEL_COUNT: usize = 1;

// =============================================================================
// TESSELLATION CONSTANTS
// =============================================================================

/// Default segment count for tessellated pore spheres in the mesh backend.
///
/// Follows the `$fn` convention: rings = (segments + 1) / 2.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_PORE_SEGMENTS;
///
/// let rings = (DEFAULT_PORE_SEGMENTS + 1) / 2;
/// assert_eq!(rings, 8);
/// ```
pub const DEFAULT_PORE_SEGMENTS: u32 = 16;

/// Minimum segment count accepted for pore tessellation.
pub const MIN_PORE_SEGMENTS: u32 = 3;

/// Distance below which a point counts as lying on a BSP splitting plane.
///
/// Coarser than [`EPSILON`]: split vertices accumulate rounding error across
/// repeated boolean operations.
pub const BSP_PLANE_EPSILON: f64 = 1e-5;

/// Triangle area below which a triangle is considered degenerate.
pub const VERTEX_MERGE_EPSILON: f64 = 1e-8;

/// Maximum number of triangles in a single solid.
///
/// Safety limit so a pathological batch cannot exhaust memory inside the
/// boolean engine.
pub const MAX_TRIANGLES: usize = 10_000_000;

// =============================================================================
// ARTIFACT CONSTANTS
// =============================================================================

/// Snapshot width in pixels.
pub const SNAPSHOT_WIDTH: u32 = 1024;

/// Snapshot height in pixels.
pub const SNAPSHOT_HEIGHT: u32 = 1024;

/// Snapshot background colour.
pub const SNAPSHOT_BACKGROUND: &str = "#ffffff";

/// Default step between consecutive cross-sections (cube units).
pub const DEFAULT_SECTION_STEP: f64 = 1.0;

/// Most cross-sections allowed per plane.
///
/// Parameters whose cube size and step would exceed it are rejected before
/// any offset is enumerated.
pub const MAX_SECTIONS_PER_PLANE: usize = 1_000;

/// Inset applied to a cross-section lying exactly on a bounding face.
///
/// The cut is taken this far inside the solid so that faces coplanar with
/// the section plane still produce an outline.
pub const SECTION_BOUNDARY_INSET: f64 = 1e-6;

/// Decimal places used for cross-section offsets in file names.
///
/// # Example
///
/// ```rust
/// use config::constants::SECTION_OFFSET_PRECISION;
///
/// let name = format!("{:.*}", SECTION_OFFSET_PRECISION, 2.5);
/// assert_eq!(name, "2.50");
/// ```
pub const SECTION_OFFSET_PRECISION: usize = 2;

/// Decimal places used for shape and distribution parameters in model names.
pub const NAME_PRECISION: usize = 2;

/// Zero-padded width of the model ordinal in model names.
pub const ORDINAL_WIDTH: usize = 3;

// =============================================================================
// UNIT CONSTANTS
// =============================================================================

/// Cubic millimetres per cubic centimetre.
///
/// A density in g/cm³ divided by this factor is a density in g/mm³.
///
/// # Example
///
/// ```rust
/// use config::constants::MM3_PER_CM3;
///
/// let steel_g_per_mm3 = 7.85 / MM3_PER_CM3;
/// assert!((steel_g_per_mm3 - 0.00785).abs() < 1e-12);
/// ```
pub const MM3_PER_CM3: f64 = 1000.0;

/// Default bulk material density in g/cm³ (structural steel).
pub const DEFAULT_MATERIAL_DENSITY_G_PER_CM3: f64 = 7.85;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Number of cross-sections per plane for a cube and step.
///
/// Offsets run from 0 to `cube_size` inclusive, so the count is
/// `ceil(cube_size / step) + 1`.
///
/// # Example
///
/// ```rust
/// use config::constants::section_count;
///
/// assert_eq!(section_count(10.0, 1.0), 11);
/// assert_eq!(section_count(1.0, 0.3), 5);
/// ```
pub fn section_count(cube_size: f64, step: f64) -> usize {
    if cube_size <= 0.0 || step <= 0.0 {
        return 0;
    }
    let steps = (cube_size / step - EPSILON).ceil().max(0.0);
    steps as usize + 1
}

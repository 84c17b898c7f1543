//! # Pore Layout
//!
//! Non-overlapping stochastic pore layouts inside a cube, and the
//! volumetric report derived from them.
//!
//! ## Architecture
//!
//! ```text
//! LayoutParams → PlacementSampler → SampleOutcome
//!                                     ├── Accepted(LayoutConfiguration) → compute_report → ModelReport
//!                                     └── Exhausted(Exhaustion)         → caller retries or accepts partial
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use pore_layout::{compute_report, units, LayoutParams, PlacementSampler, PoreShape};
//!
//! let params = LayoutParams::default()
//!     .with_pore_count(10)
//!     .with_cube_size(1.0)
//!     .with_distribution(0.5, 0.15)
//!     .with_shape(PoreShape::sphere(0.05).unwrap())
//!     .with_gap(0.01);
//!
//! let layout = PlacementSampler::new(params)
//!     .unwrap()
//!     .sample_seeded(42)
//!     .accepted()
//!     .expect("feasible parameters");
//! let report = compute_report(&layout, units::g_per_cm3_to_g_per_mm3(7.85)).unwrap();
//! assert!((report.porosity - 0.005236).abs() < 1e-5);
//! ```

pub mod error;
pub mod gaussian;
pub mod layout;
pub mod sampler;
pub mod shape;
pub mod spatial_index;
pub mod units;
pub mod validate;
pub mod volumetric;

pub use error::{LayoutError, LayoutResult, VolumetricError, VolumetricResult};
pub use layout::{Completeness, LayoutConfiguration, LayoutParams, PorePlacement};
pub use sampler::{Exhaustion, ExhaustionReason, PlacementSampler, SampleOutcome};
pub use shape::PoreShape;
pub use validate::{validate_layout, LayoutViolation};
pub use volumetric::{compute_report, compute_report_in_cube, ModelReport};

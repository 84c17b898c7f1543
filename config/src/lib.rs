//! # Config Crate
//!
//! Centralized configuration constants for the porous cube pipeline.
//! All magic numbers and tunable parameters are defined here to ensure
//! consistency across crates and easy configuration management.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{section_count, DEFAULT_MAX_ATTEMPTS_PER_PORE, SNAPSHOT_WIDTH};
//!
//! // Bounded rejection sampling
//! let attempts: Option<usize> = None;
//! let budget = attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS_PER_PORE);
//! assert_eq!(budget, 100);
//!
//! // Cross-sections are enumerated from 0 to the cube size inclusive
//! assert_eq!(section_count(10.0, 2.5), 5);
//! assert_eq!(SNAPSHOT_WIDTH, 1024);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Reproducible**: Artifact naming precision lives here, not at call sites
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;

#[cfg(test)]
mod tests;

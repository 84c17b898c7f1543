//! # Export
//!
//! Writers for finished solids.

pub mod stl;

pub use stl::{save_stl, write_stl, StlFormat};

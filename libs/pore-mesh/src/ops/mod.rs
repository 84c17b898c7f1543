//! # Mesh Operations
//!
//! Boolean operations on closed triangle meshes.

pub mod boolean;

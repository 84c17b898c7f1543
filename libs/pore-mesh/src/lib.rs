//! # Pore Mesh
//!
//! Reference geometry backend for the porous cube batch: triangle meshes,
//! BSP boolean difference, STL export, planar sections and SVG rendering.
//!
//! ## Architecture
//!
//! ```text
//! PorePlacement → primitives → Mesh ─┐
//! cube size     → primitives → Mesh ─┴→ ops::boolean::difference → Mesh
//!                                          ├→ export::stl
//!                                          ├→ render::svg (snapshots)
//!                                          └→ section → render::svg (sections)
//! ```
//!
//! [`MeshEngine`] and [`SvgRenderer`] plug this into the batch orchestrator.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pore_batch::{run, BatchParams};
//! use pore_mesh::{MeshEngine, SvgRenderer};
//!
//! let params = BatchParams::default().with_output_root("out");
//! let batch = run(&params, &mut MeshEngine::default(), &mut SvgRenderer::new()).unwrap();
//! println!("{} models", batch.models().len());
//! ```

pub mod engine;
pub mod error;
pub mod export;
pub mod mesh;
pub mod ops;
pub mod primitives;
pub mod render;
pub mod section;

pub use engine::{MeshEngine, MeshSession};
pub use error::{MeshError, MeshResult};
pub use mesh::Mesh;
pub use ops::boolean::difference;
pub use render::SvgRenderer;
pub use section::{cross_section, CrossSection};

//! # Separation Index
//!
//! Uniform hash grid over accepted pore centers.
//!
//! The cell edge equals the minimum separation, so any center closer than
//! that lies in one of the 27 cells around the query. Answers are identical
//! to the all-pairs scan.

use std::collections::HashMap;

use glam::{DVec3, IVec3};

/// Hash grid answering "is any accepted center closer than `min_separation`".
#[derive(Debug, Clone)]
pub struct SeparationGrid {
    min_separation: f64,
    cell_size: f64,
    cells: HashMap<IVec3, Vec<DVec3>>,
    len: usize,
}

impl SeparationGrid {
    /// Creates an empty grid for the given separation.
    ///
    /// A zero separation (gap 0, which cannot happen for positive radii)
    /// still gets a usable cell size.
    pub fn new(min_separation: f64) -> Self {
        let cell_size = if min_separation > 0.0 {
            min_separation
        } else {
            1.0
        };
        Self {
            min_separation,
            cell_size,
            cells: HashMap::new(),
            len: 0,
        }
    }

    /// Number of stored centers.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when no center is stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn cell_of(&self, point: DVec3) -> IVec3 {
        (point / self.cell_size).floor().as_ivec3()
    }

    /// Returns true when `candidate` is at least `min_separation` from every
    /// stored center.
    pub fn is_separated(&self, candidate: DVec3) -> bool {
        let cell = self.cell_of(candidate);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let neighbour = cell + IVec3::new(dx, dy, dz);
                    if let Some(centers) = self.cells.get(&neighbour) {
                        if centers
                            .iter()
                            .any(|c| c.distance(candidate) < self.min_separation)
                        {
                            return false;
                        }
                    }
                }
            }
        }
        true
    }

    /// Stores an accepted center.
    pub fn insert(&mut self, center: DVec3) {
        let cell = self.cell_of(center);
        self.cells.entry(cell).or_default().push(center);
        self.len += 1;
    }
}

//! # BSP Tree
//!
//! Binary Space Partitioning tree for CSG boolean operations, after the
//! csg.js algorithm by Evan Wallace.
//!
//! ## Layout
//!
//! Nodes live in a flat arena and refer to their children by index. Every
//! operation is a loop over the arena or an explicit work stack, so deep
//! trees never recurse.
//!
//! ## Operations
//!
//! - `clip_polygons`: Remove the parts of polygons inside this tree's solid
//! - `clip_to`: Clip this tree's polygons against another tree
//! - `invert`: Flip all polygons and swap front/back subtrees
//! - `into_polygons`: Collect all polygons from the tree

use super::plane::Plane;
use super::polygon::{Polygon, SplitResult};

#[derive(Debug, Clone, Default)]
struct BspNode {
    /// Splitting plane, set by the first polygon that reaches the node
    plane: Option<Plane>,
    /// Polygons coplanar with the plane
    polygons: Vec<Polygon>,
    /// Index of the front subtree
    front: Option<usize>,
    /// Index of the back subtree
    back: Option<usize>,
}

/// A BSP tree over convex polygons.
#[derive(Debug, Clone)]
pub struct BspTree {
    nodes: Vec<BspNode>,
}

impl BspTree {
    /// Builds a tree from polygons.
    ///
    /// The first polygon reaching a node chooses its plane.
    pub fn new(polygons: Vec<Polygon>) -> Self {
        let mut tree = Self {
            nodes: vec![BspNode::default()],
        };
        tree.build(polygons);
        tree
    }

    /// Inserts polygons into the tree, extending it as needed.
    pub fn build(&mut self, polygons: Vec<Polygon>) {
        let mut stack: Vec<(usize, Vec<Polygon>)> = vec![(0, polygons)];

        while let Some((index, polys)) = stack.pop() {
            let Some(first) = polys.first() else {
                continue;
            };
            let plane = *self.nodes[index].plane.get_or_insert(*first.plane());

            let mut split = SplitResult::default();
            for poly in polys {
                poly.split(&plane, &mut split);
            }

            let node = &mut self.nodes[index];
            node.polygons.append(&mut split.coplanar_front);
            node.polygons.append(&mut split.coplanar_back);

            if !split.front.is_empty() {
                let child = self.child(index, true);
                stack.push((child, split.front));
            }
            if !split.back.is_empty() {
                let child = self.child(index, false);
                stack.push((child, split.back));
            }
        }
    }

    /// Returns the front or back child of `index`, creating it if missing.
    fn child(&mut self, index: usize, front: bool) -> usize {
        let existing = if front {
            self.nodes[index].front
        } else {
            self.nodes[index].back
        };
        if let Some(child) = existing {
            return child;
        }

        let child = self.nodes.len();
        self.nodes.push(BspNode::default());
        if front {
            self.nodes[index].front = Some(child);
        } else {
            self.nodes[index].back = Some(child);
        }
        child
    }

    /// Turns the solid inside out.
    pub fn invert(&mut self) {
        for node in &mut self.nodes {
            for poly in &mut node.polygons {
                poly.flip();
            }
            node.plane = node.plane.map(|p| p.flip());
            std::mem::swap(&mut node.front, &mut node.back);
        }
    }

    /// Removes the parts of `polygons` inside this tree's solid.
    pub fn clip_polygons(&self, polygons: Vec<Polygon>) -> Vec<Polygon> {
        let mut result = Vec::new();
        let mut stack: Vec<(usize, Vec<Polygon>)> = vec![(0, polygons)];

        while let Some((index, polys)) = stack.pop() {
            if polys.is_empty() {
                continue;
            }
            let node = &self.nodes[index];
            let Some(plane) = node.plane else {
                result.extend(polys);
                continue;
            };

            let mut split = SplitResult::default();
            for poly in polys {
                poly.split(&plane, &mut split);
            }
            let mut front = split.coplanar_front;
            front.append(&mut split.front);
            let mut back = split.coplanar_back;
            back.append(&mut split.back);

            match node.front {
                Some(child) => stack.push((child, front)),
                None => result.extend(front),
            }
            // Without a back subtree the back side is solid: discard
            if let Some(child) = node.back {
                stack.push((child, back));
            }
        }

        result
    }

    /// Removes the parts of this tree's polygons inside `other`.
    pub fn clip_to(&mut self, other: &BspTree) {
        for node in &mut self.nodes {
            node.polygons = other.clip_polygons(std::mem::take(&mut node.polygons));
        }
    }

    /// Number of polygons stored in the tree.
    pub fn polygon_count(&self) -> usize {
        self.nodes.iter().map(|n| n.polygons.len()).sum()
    }

    /// Consumes the tree, returning every polygon.
    pub fn into_polygons(self) -> Vec<Polygon> {
        self.nodes.into_iter().flat_map(|n| n.polygons).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    fn triangle_at(z: f64) -> Polygon {
        Polygon::from_vertices(vec![
            DVec3::new(0.0, 0.0, z),
            DVec3::new(1.0, 0.0, z),
            DVec3::new(0.0, 1.0, z),
        ])
        .unwrap()
    }

    #[test]
    fn test_bsp_new_empty() {
        let tree = BspTree::new(vec![]);
        assert_eq!(tree.polygon_count(), 0);
        assert_eq!(tree.clip_polygons(vec![triangle_at(0.0)]).len(), 1);
    }

    #[test]
    fn test_bsp_keeps_all_polygons() {
        let tree = BspTree::new(vec![triangle_at(0.0), triangle_at(1.0), triangle_at(-1.0)]);
        assert_eq!(tree.polygon_count(), 3);
        assert_eq!(tree.into_polygons().len(), 3);
    }

    #[test]
    fn test_bsp_invert_flips_normals() {
        let mut tree = BspTree::new(vec![triangle_at(0.0)]);
        tree.invert();
        let polys = tree.into_polygons();
        assert_eq!(polys[0].plane().normal, -DVec3::Z);
    }

    #[test]
    fn test_bsp_clip_keeps_front() {
        let tree = BspTree::new(vec![triangle_at(0.0)]);
        assert_eq!(tree.clip_polygons(vec![triangle_at(1.0)]).len(), 1);
    }

    #[test]
    fn test_bsp_clip_discards_back() {
        let tree = BspTree::new(vec![triangle_at(0.0)]);
        assert!(tree.clip_polygons(vec![triangle_at(-1.0)]).is_empty());
    }

    #[test]
    fn test_bsp_clip_after_invert_keeps_back() {
        let mut tree = BspTree::new(vec![triangle_at(0.0)]);
        tree.invert();
        assert_eq!(tree.clip_polygons(vec![triangle_at(-1.0)]).len(), 1);
        assert!(tree.clip_polygons(vec![triangle_at(1.0)]).is_empty());
    }
}

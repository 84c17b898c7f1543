//! Orthographic cameras for the standard views.

use glam::{DVec2, DVec3};
use pore_batch::StandardView;

/// Orthonormal view basis with `right × up = toward_eye`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Screen X direction in world space
    pub right: DVec3,
    /// Screen Y direction in world space
    pub up: DVec3,
    /// Unit vector from the scene toward the viewer
    pub toward_eye: DVec3,
}

impl Camera {
    /// Camera for a standard view.
    pub fn for_view(view: StandardView) -> Self {
        match view {
            StandardView::Front => Self::new(DVec3::NEG_Y, DVec3::Z),
            StandardView::Top => Self::new(DVec3::Z, DVec3::Y),
            StandardView::Right => Self::new(DVec3::X, DVec3::Z),
            StandardView::Isometric => Self::new(DVec3::new(1.0, -1.0, 1.0), DVec3::Z),
        }
    }

    /// Builds a basis looking back along `toward_eye`, with `up_hint`
    /// projected onto the view plane.
    fn new(toward_eye: DVec3, up_hint: DVec3) -> Self {
        let toward_eye = toward_eye.normalize();
        let up = (up_hint - up_hint.dot(toward_eye) * toward_eye).normalize();
        let right = up.cross(toward_eye);
        Self {
            right,
            up,
            toward_eye,
        }
    }

    /// Screen-plane coordinates of a world point.
    #[inline]
    pub fn project(&self, point: DVec3) -> DVec2 {
        DVec2::new(point.dot(self.right), point.dot(self.up))
    }

    /// Distance toward the viewer; larger is nearer.
    #[inline]
    pub fn depth(&self, point: DVec3) -> f64 {
        point.dot(self.toward_eye)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bases_are_right_handed() {
        for view in StandardView::ALL {
            let c = Camera::for_view(view);
            assert!((c.right.cross(c.up) - c.toward_eye).length() < 1e-12);
            assert!(c.right.dot(c.up).abs() < 1e-12);
        }
    }

    #[test]
    fn test_front_view_axes() {
        let c = Camera::for_view(StandardView::Front);
        assert!((c.right - DVec3::X).length() < 1e-12);
        assert_eq!(c.project(DVec3::new(1.0, 7.0, 2.0)), DVec2::new(1.0, 2.0));
    }

    #[test]
    fn test_top_view_depth() {
        let c = Camera::for_view(StandardView::Top);
        assert!(c.depth(DVec3::new(0.0, 0.0, 5.0)) > c.depth(DVec3::ZERO));
    }
}

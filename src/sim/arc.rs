//! Parabolic arc motion for swapping containers
//!
//! A swap moves horizontally at constant speed while the vertical position
//! follows the straight line between the endpoints plus a parabolic bump:
//! - zero offset at both endpoints
//! - `arc_height` offset at the horizontal midpoint
//! - negative heights dip below the line

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{lerp_clamped, move_toward};

/// One arced move from `start` to `target`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcPath {
    pub start: Vec2,
    pub target: Vec2,
    /// Peak vertical offset at the midpoint
    pub height: f32,
}

impl ArcPath {
    pub fn new(start: Vec2, target: Vec2, height: f32) -> Self {
        Self {
            start,
            target,
            height,
        }
    }

    /// Horizontal distance covered by the move
    #[inline]
    pub fn span(&self) -> f32 {
        self.target.x - self.start.x
    }

    /// Position on the path for horizontal coordinate `x`.
    ///
    /// A purely vertical move (`span() == 0`) has no defined fraction or arc;
    /// both collapse to zero, so the point stays level with `start`.
    pub fn point_at(&self, x: f32) -> Vec2 {
        let dx = self.span();

        let mut t = (x - self.start.x) / dx;
        if t.is_nan() {
            t = 0.0;
        }
        let y = lerp_clamped(self.start.y, self.target.y, t);

        let mut arc = self.height * (x - self.start.x) * (x - self.target.x) / (-0.25 * dx * dx);
        if arc.is_nan() {
            arc = 0.0;
        }

        Vec2::new(x, y + arc)
    }

    /// Advance from `current` by `max_dx` horizontally and return the new point
    pub fn step(&self, current: Vec2, max_dx: f32) -> Vec2 {
        let x = move_toward(current.x, self.target.x, max_dx);
        self.point_at(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_have_no_offset() {
        let path = ArcPath::new(Vec2::new(-3.0, 0.0), Vec2::new(3.0, 2.0), 5.0);
        assert_eq!(path.point_at(-3.0), Vec2::new(-3.0, 0.0));
        assert_eq!(path.point_at(3.0), Vec2::new(3.0, 2.0));
    }

    #[test]
    fn test_midpoint_offset_equals_height() {
        let path = ArcPath::new(Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0), 1.5);
        let mid = path.point_at(2.0);
        assert!((mid.y - 1.5).abs() < 1e-5);

        let dip = ArcPath::new(Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0), -1.5);
        assert!((dip.point_at(2.0).y + 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_arc_is_symmetric_for_reverse_moves() {
        let fwd = ArcPath::new(Vec2::new(0.0, 0.0), Vec2::new(6.0, 0.0), 2.0);
        let back = ArcPath::new(Vec2::new(6.0, 0.0), Vec2::new(0.0, 0.0), 2.0);
        for x in [1.0, 2.5, 4.0] {
            assert!((fwd.point_at(x).y - back.point_at(x).y).abs() < 1e-5);
        }
    }

    #[test]
    fn test_vertical_move_is_flat_not_nan() {
        let path = ArcPath::new(Vec2::new(1.0, 0.0), Vec2::new(1.0, 5.0), 3.0);
        let p = path.point_at(1.0);
        assert!(p.is_finite());
        assert_eq!(p, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_step_never_overshoots() {
        let path = ArcPath::new(Vec2::ZERO, Vec2::new(1.0, 0.0), 1.0);
        let p = path.step(Vec2::new(0.9, 0.0), 10.0);
        assert_eq!(p, Vec2::new(1.0, 0.0));
    }
}

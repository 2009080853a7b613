//! Axis-aligned rectangles for every body in the world
//!
//! Screen space: x grows right, y grows down, `pos` is the top-left corner.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box in screen space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Horizontal spans intersect (touching edges do not count)
    #[inline]
    pub fn overlaps_x(&self, other: &Aabb) -> bool {
        self.left() < other.right() && self.right() > other.left()
    }

    /// Vertical spans intersect (touching edges do not count)
    #[inline]
    pub fn overlaps_y(&self, other: &Aabb) -> bool {
        self.top() < other.bottom() && self.bottom() > other.top()
    }

    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.overlaps_x(other) && self.overlaps_y(other)
    }

    /// True if `other`'s horizontal span lies entirely inside this box's span
    pub fn contains_span_x(&self, other: &Aabb) -> bool {
        other.left() >= self.left() && other.right() <= self.right()
    }

    /// Copy shifted by `offset`
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            pos: self.pos + offset,
            size: self.size,
        }
    }

    /// Split off the bottom `height` pixels, returning `(upper, lower)`.
    ///
    /// The lower part is clamped to the box, so a gap taller than the box
    /// leaves an empty upper part.
    pub fn split_bottom(&self, height: f32) -> (Aabb, Aabb) {
        let lower_h = height.clamp(0.0, self.size.y);
        let upper_h = self.size.y - lower_h;
        (
            Aabb::new(self.pos.x, self.pos.y, self.size.x, upper_h),
            Aabb::new(self.pos.x, self.pos.y + upper_h, self.size.x, lower_h),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let b = Aabb::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(b.left(), 10.0);
        assert_eq!(b.right(), 40.0);
        assert_eq!(b.top(), 20.0);
        assert_eq!(b.bottom(), 60.0);
    }

    #[test]
    fn test_overlap_and_touching() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(5.0, 5.0, 10.0, 10.0);
        let touching = Aabb::new(10.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps_y(&touching));
        assert!(!a.overlaps_x(&touching));
    }

    #[test]
    fn test_contains_span_x() {
        let hole = Aabb::new(100.0, 340.0, 80.0, 60.0);
        assert!(hole.contains_span_x(&Aabb::new(120.0, 0.0, 30.0, 50.0)));
        assert!(!hole.contains_span_x(&Aabb::new(90.0, 0.0, 30.0, 50.0)));
    }

    #[test]
    fn test_split_bottom() {
        let tunnel = Aabb::new(0.0, 250.0, 100.0, 90.0);
        let (solid, gap) = tunnel.split_bottom(35.0);
        assert_eq!(solid.bottom(), gap.top());
        assert_eq!(gap.bottom(), tunnel.bottom());
        assert_eq!(gap.height(), 35.0);

        let (solid, gap) = tunnel.split_bottom(500.0);
        assert_eq!(solid.height(), 0.0);
        assert_eq!(gap.height(), 90.0);
    }
}

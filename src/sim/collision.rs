//! Axis-aligned collision boxes
//!
//! The bird is drawn rotated but always collides as an unrotated box.

use glam::Vec2;

/// Axis-aligned bounding box in surface pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Strict overlap: boxes that only touch along an edge do not collide
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap() {
        let a = Aabb::from_center(Vec2::new(80.0, 300.0), Vec2::new(40.0, 30.0));
        let b = Aabb::new(Vec2::new(70.0, 0.0), Vec2::new(140.0, 310.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Aabb::new(Vec2::new(10.0, 0.0), Vec2::new(20.0, 10.0));
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_separated_vertically() {
        let bird = Aabb::from_center(Vec2::new(80.0, 330.0), Vec2::new(40.0, 30.0));
        let top = Aabb::new(Vec2::new(60.0, -150.0), Vec2::new(130.0, 250.0));
        let bottom = Aabb::new(Vec2::new(60.0, 410.0), Vec2::new(130.0, 600.0));
        assert!(!bird.overlaps(&top));
        assert!(!bird.overlaps(&bottom));
    }
}

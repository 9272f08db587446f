//! Positions and bounding boxes in world pixels.

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

/// Side length of the square bounding box every entity occupies.
pub const ENTITY_SIZE: f32 = 32.0;

/// A 2D vector in world pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    /// Horizontal component.
    pub x: f32,
    /// Vertical component (grows downward).
    pub y: f32,
}

impl Vec2 {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a new vector.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean length.
    #[must_use]
    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Unit vector in the same direction, or zero for the zero vector.
    #[must_use]
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len > 0.0 {
            Self::new(self.x / len, self.y / len)
        } else {
            Self::ZERO
        }
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub w: f32,
    /// Height.
    pub h: f32,
}

impl Aabb {
    /// Box of `size x size` centered on `center`.
    #[must_use]
    pub fn centered(center: Vec2, size: f32) -> Self {
        let half = size / 2.0;
        Self {
            x: center.x - half,
            y: center.y - half,
            w: size,
            h: size,
        }
    }

    /// The standard entity box centered on `center`.
    #[must_use]
    pub fn entity(center: Vec2) -> Self {
        Self::centered(center, ENTITY_SIZE)
    }

    /// Strict overlap test: boxes that only share an edge do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_diagonal() {
        let v = Vec2::new(1.0, 1.0).normalized();
        assert!((v.length() - 1.0).abs() < 1e-6);
        assert!((v.x - v.y).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_zero() {
        assert_eq!(Vec2::ZERO.normalized(), Vec2::ZERO);
    }

    #[test]
    fn test_overlap() {
        let a = Aabb::entity(Vec2::new(100.0, 100.0));
        let b = Aabb::entity(Vec2::new(120.0, 110.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Aabb::entity(Vec2::new(100.0, 100.0));
        let b = Aabb::entity(Vec2::new(132.0, 100.0));
        assert!(!a.overlaps(&b));
    }
}

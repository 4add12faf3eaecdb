//! Geometry basics

use std::ops::{Add, Sub};

/// A point in 2D space
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new Point
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
    /// Squared length of the vector from the origin
    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y
    }
    /// Dot product
    pub fn dot(self, other: Point) -> f32 {
        self.x * other.x + self.y * other.y
    }
}

/// Grow a min/max pair to include `p`
pub fn extend(min: &mut Point, max: &mut Point, p: Point) {
    if p.x < min.x { min.x = p.x; }
    if p.y < min.y { min.y = p.y; }
    if p.x > max.x { max.x = p.x; }
    if p.y > max.y { max.y = p.y; }
}

impl Add for Point {
    type Output = Point;
    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

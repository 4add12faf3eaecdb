//! Trapezoid list output

use crate::clip::IntRect;

/// One filled trapezoid in device coordinates
///
/// Top and bottom sides are horizontal, `top_y < bottom_y` (y grows
/// downward), and on each side the left X never exceeds the right X.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Trapezoid {
    pub top_y: f32,
    pub top_left_x: f32,
    pub top_right_x: f32,
    pub bottom_y: f32,
    pub bottom_left_x: f32,
    pub bottom_right_x: f32,
}

/// Classification of a finished trapezoid list
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ShapeType {
    /// General case
    Any,
    /// Exactly one axis-aligned rectangle
    Rect,
}

/// Ordered trapezoid list with its bounding box and classification
///
/// A consumer drawing two triangles per trapezoid (or one quad for
/// [`ShapeType::Rect`]) reproduces the filled path.
#[derive(Debug)]
pub struct TrapezoidList {
    trapezoids: Vec<Trapezoid>,
    bounds: IntRect,
    shape: ShapeType,
}

impl TrapezoidList {
    pub(crate) fn with_capacity(count: usize) -> Self {
        Self {
            trapezoids: Vec::with_capacity(count),
            bounds: IntRect::default(),
            shape: ShapeType::Any,
        }
    }
    pub(crate) fn push(&mut self, trapezoid: Trapezoid) {
        self.trapezoids.push(trapezoid);
    }
    pub(crate) fn set_bounds(&mut self, bounds: IntRect) {
        self.bounds = bounds;
    }
    pub(crate) fn set_shape(&mut self, shape: ShapeType) {
        self.shape = shape;
    }
    /// Trapezoids in emission order
    pub fn trapezoids(&self) -> &[Trapezoid] {
        &self.trapezoids
    }
    /// Number of trapezoids
    pub fn len(&self) -> usize {
        self.trapezoids.len()
    }
    /// True if nothing was filled
    pub fn is_empty(&self) -> bool {
        self.trapezoids.is_empty()
    }
    /// Bounding box over all trapezoids, in whole device pixels
    pub fn bounds(&self) -> IntRect {
        self.bounds
    }
    /// Fast-path classification
    pub fn shape(&self) -> ShapeType {
        self.shape
    }
}

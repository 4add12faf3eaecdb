//! Clip rectangle and integer rectangles

/// Integer clip rectangle in device pixels
///
/// Half-open on both axes: a pixel is inside when `x1 <= x < x2` and
/// `y1 <= y < y2`. `x1 >= x2` or `y1 >= y2` describes an empty region;
/// the rasterizer short-circuits on it.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct ClipBox {
    /// Left bound
    pub x1: i32,
    /// Top bound
    pub y1: i32,
    /// Right bound
    pub x2: i32,
    /// Bottom bound
    pub y2: i32,
}

impl ClipBox {
    /// Create a new ClipBox
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }
    /// Clip box covering `width` by `height` pixels from the origin
    pub fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }
    /// True if the region contains no pixels
    pub fn is_empty(&self) -> bool {
        self.x1 >= self.x2 || self.y1 >= self.y2
    }
}

/// Rectangle as origin plus extent, in device pixels
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct IntRect {
    /// Minimum x value
    pub x: i32,
    /// Minimum y value
    pub y: i32,
    /// Horizontal extent
    pub width: i32,
    /// Vertical extent
    pub height: i32,
}

impl IntRect {
    /// Create a new IntRect
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }
    /// One past the rightmost column
    pub fn right(&self) -> i32 {
        self.x + self.width
    }
    /// One past the bottom row
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }
    /// True if the rectangle has no area
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

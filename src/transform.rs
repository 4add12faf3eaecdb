//! Transformations

use crate::math::Point;

use std::ops::Mul;

/// Affine transformation
///
/// Maps `(x,y)` to `(x*sx + y*shx + tx, x*shy + y*sy + ty)`
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub sx: f32,
    pub sy: f32,
    pub shx: f32,
    pub shy: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Transform {
    /// Creates a new identity Transform
    pub fn new() -> Self {
        Self { sx: 1.0,  sy: 1.0,
               shx: 0.0, shy: 0.0,
               tx: 0.0,  ty: 0.0,
        }
    }
    /// Add a translation in local coordinates
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.tx += self.sx * dx + self.shx * dy;
        self.ty += self.shy * dx + self.sy * dy;
    }
    /// Add a scaling in local coordinates
    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.sx  *= sx;
        self.shy *= sx;
        self.shx *= sy;
        self.sy  *= sy;
    }
    /// Add a rotation in local coordinates
    ///
    /// angle is in radians
    pub fn rotate(&mut self, angle: f32) {
        let ca = angle.cos();
        let sa = angle.sin();
        let t0   = self.sx * ca + self.shx * sa;
        let t1   = self.shy * ca + self.sy * sa;
        self.shx = self.shx * ca - self.sx * sa;
        self.sy  = self.sy * ca - self.shy * sa;
        self.sx  = t0;
        self.shy = t1;
    }

    /// Map a point through the transform
    pub fn transform(&self, p: Point) -> Point {
        Point::new(p.x * self.sx  + p.y * self.shx + self.tx,
                   p.x * self.shy + p.y * self.sy  + self.ty)
    }
    /// Compose with `m`, `m` being applied first
    pub fn mul_transform(&self, m: &Transform) -> Self {
        Transform {
            sx:  self.sx * m.sx  + self.shx * m.shy,
            shy: self.shy * m.sx + self.sy * m.shy,
            shx: self.sx * m.shx + self.shx * m.sy,
            sy:  self.shy * m.shx + self.sy * m.sy,
            tx:  self.sx * m.tx  + self.shx * m.ty + self.tx,
            ty:  self.shy * m.tx + self.sy * m.ty + self.ty,
        }
    }
    pub fn new_scale(sx: f32, sy: f32) -> Transform {
        let mut t = Self::new();
        t.scale(sx, sy);
        t
    }
    pub fn new_translate(tx: f32, ty: f32) -> Transform {
        let mut t = Self::new();
        t.translate(tx, ty);
        t
    }
    pub fn new_rotate(ang: f32) -> Transform {
        let mut t = Self::new();
        t.rotate(ang);
        t
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

impl Mul<Transform> for Transform {
    type Output = Transform;
    fn mul(self, rhs: Transform) -> Self {
        self.mul_transform(&rhs)
    }
}

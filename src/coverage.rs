//! Coverage rasterization of trapezoid lists
//!
//! A [`CoverageMap`] samples every trapezoid of a list at sub-scanline
//! resolution and accumulates an 8 bit coverage image. Consumers normally
//! hand the list straight to the GPU; the map exists so tests and debugging
//! sessions can look at what a list fills.

use std::path::Path;

use crate::trap::{Trapezoid, TrapezoidList};
use crate::SUBSCANLINES;

/// 8 bit antialiased coverage image
#[derive(Debug, Clone)]
pub struct CoverageMap {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl CoverageMap {
    pub fn new(width: usize, height: usize) -> Self {
        CoverageMap {
            width,
            height,
            data: vec![0u8; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw pixels, row major, one byte per pixel
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Coverage of the pixel at (x, y), 0 empty to 255 full
    pub fn coverage_at(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    /// Accumulate the coverage of every trapezoid in `list`
    pub fn draw(&mut self, list: &TrapezoidList) {
        for trapezoid in list.trapezoids() {
            self.draw_trapezoid(trapezoid);
        }
    }

    /// Sample one trapezoid at each sub-scanline center it spans
    fn draw_trapezoid(&mut self, t: &Trapezoid) {
        let dy = t.bottom_y - t.top_y;
        if dy <= 0.0 {
            return;
        }

        let scale = SUBSCANLINES as f32;
        let mut first = (t.top_y * scale).round() as i32;
        let mut last = (t.bottom_y * scale).round() as i32;
        if first < 0 {
            first = 0;
        }
        let limit = (self.height * SUBSCANLINES as usize) as i32;
        if last > limit {
            last = limit;
        }

        for k in first..last {
            let y = (k as f32 + 0.5) / scale;
            let left = t.top_left_x + (y - t.top_y) * (t.bottom_left_x - t.top_left_x) / dy;
            let right = t.top_right_x + (y - t.top_y) * (t.bottom_right_x - t.top_right_x) / dy;
            let row = (k / SUBSCANLINES) as usize;
            self.fill_span(row, left, right);
        }
    }

    /// Add one sub-scanline worth of coverage over [left, right)
    ///
    /// A fully covered pixel receives [`SUBSCANLINES`] units per call, so
    /// saturating addition tops out at full coverage.
    ///
    /// [`SUBSCANLINES`]: crate::SUBSCANLINES
    fn fill_span(&mut self, row: usize, left: f32, right: f32) {
        let left = left.max(0.0);
        let right = right.min(self.width as f32);
        if left >= right {
            return;
        }

        let first = left.floor() as usize;
        let last = (right.ceil() as usize).min(self.width);
        let base = row * self.width;
        for px in first..last {
            let lo = left.max(px as f32);
            let hi = right.min(px as f32 + 1.0);
            let weight = ((hi - lo) * SUBSCANLINES as f32).round() as i32;
            if weight <= 0 {
                continue;
            }
            let sample = &mut self.data[base + px];
            *sample = sample.saturating_add(weight as u8);
        }
    }

    pub fn write_file<P: AsRef<Path>>(&self, filename: P) -> Result<(), std::io::Error> {
        image::save_buffer(
            filename,
            &self.data,
            self.width as u32,
            self.height as u32,
            image::Gray(8),
        )
    }

    pub fn read_file<P: AsRef<Path>>(filename: P) -> Result<CoverageMap, image::ImageError> {
        let img = image::open(filename)?.to_luma();
        let (w, h) = img.dimensions();
        Ok(CoverageMap {
            width: w as usize,
            height: h as usize,
            data: img.into_raw(),
        })
    }
}

pub fn img_diff<P: AsRef<Path>>(f1: P, f2: P) -> Result<bool, image::ImageError> {
    let m1 = CoverageMap::read_file(f1)?;
    let m2 = CoverageMap::read_file(f2)?;
    if m1.width != m2.width || m1.height != m2.height {
        return Ok(false);
    }
    let mut flag = true;
    for (i, (v1, v2)) in m1.data.iter().zip(m2.data.iter()).enumerate() {
        if v1 != v2 {
            println!("{} [{},{}]: {} {}", i, i % m1.width, i / m1.width, v1, v2);
            flag = false;
        }
    }
    Ok(flag)
}

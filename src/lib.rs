//! Scanline trapezoidation of vector paths
//!
//! A vector path (lines, quadratic/cubic curves, elliptical arcs) plus a
//! fill rule and a clip rectangle turn into an ordered list of trapezoids
//! with horizontal top and bottom sides, the unit a triangle-based
//! compositor consumes (two triangles per trapezoid, one quad for the
//! single-rectangle fast path).
//!
//! How does this work
//!    path = Path::new()         -- move_to / line_to / quad_to / cubic_to
//!                                  / arc / arc_to / close
//!    TrapezoidBuilder::new(&path, clip, transform, rule).build()
//!      insert_line / insert_cubic / insert_arc
//!                               -- flatten, clip, round to sub-scanlines
//!      EdgeTree                 -- red-black tree keyed (top y, top x, slope),
//!                                  coincident edges merge their directions
//!      sorted_list              -- one in-order walk, fill-rule filter
//!      update_active_edges      -- merge pending edges into the sorted
//!                                  active list, schedule the next event row
//!      emit_band                -- fill-level walk, one trapezoid per span,
//!                                  exact-match merge with the band above
//!    Output: TrapezoidList with device-pixel bounding box and shape class
//!
//! Coordinates are y-down device pixels. The sweep runs on integer Y in
//! sub-scanline units (16 per pixel row) with single-precision slopes.

pub mod arena;
pub mod clip;
pub mod coverage;
pub mod curve;
mod edge;
pub mod math;
pub mod path;
pub mod raster;
pub mod transform;
pub mod trap;

pub use crate::arena::*;
pub use crate::clip::*;
pub use crate::coverage::*;
pub use crate::curve::*;
pub use crate::math::*;
pub use crate::path::*;
pub use crate::raster::*;
pub use crate::transform::*;
pub use crate::trap::*;

/// Vertical sub-scanlines per device pixel row
pub const SUBSCANLINES: i32 = 16;
/// Curve and arc deviation tolerance, in device units
pub const TOLERANCE: f32 = 1.0 / SUBSCANLINES as f32;

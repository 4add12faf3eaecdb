//! Curve flattening and evaluation
//!
//! Cubics are flattened by midpoint subdivision against a fixed flatness
//! test; arcs are approximated by cubic segments whose count is chosen
//! from the sweep angle and the transformed radius so the deviation stays
//! under [`TOLERANCE`](crate::TOLERANCE).

use crate::math::{extend, Point};
use crate::TOLERANCE;

/// Flatness bound for the line-segment test, in path units
const FLATNESS: f32 = 1.0;

/// True if the cubic in `p[0..4]` deviates from its chord by less than
/// the flatness bound
pub fn is_line_segment(p: &[Point]) -> bool {
    let (x0, y0) = (p[0].x, p[0].y);
    let (x1, y1) = (p[1].x, p[1].y);
    let (x2, y2) = (p[2].x, p[2].y);
    let (x3, y3) = (p[3].x, p[3].y);

    let dt1 = ((x3 - x0) * (y0 - y1) - (x0 - x1) * (y3 - y0)).abs();
    let dt2 = ((x3 - x0) * (y0 - y2) - (x0 - x2) * (y3 - y0)).abs();

    if dt1 > FLATNESS || dt2 > FLATNESS {
        return false;
    }

    let (min_x, max_x) = if x0 < x3 {
        (x0 - FLATNESS, x3 + FLATNESS)
    } else {
        (x3 - FLATNESS, x0 + FLATNESS)
    };
    let (min_y, max_y) = if y0 < y3 {
        (y0 - FLATNESS, y3 + FLATNESS)
    } else {
        (y3 - FLATNESS, y0 + FLATNESS)
    };

    !(x1 < min_x || x1 > max_x || y1 < min_y || y1 > max_y
        || x2 < min_x || x2 > max_x || y2 < min_y || y2 > max_y)
}

fn midpoint(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Split the cubic in `p[0..4]` at its midpoint, in place
///
/// On return `p[0..4]` holds the first half and `p[3..7]` the second,
/// sharing the split point at `p[3]`.
pub fn split_in_place(p: &mut [Point]) {
    let ab = midpoint(p[0], p[1]);
    let bc = midpoint(p[1], p[2]);
    let cd = midpoint(p[2], p[3]);
    let abbc = midpoint(ab, bc);
    let bccd = midpoint(bc, cd);
    let mid = midpoint(abbc, bccd);

    p[6] = p[3];
    p[5] = cd;
    p[4] = bccd;
    p[3] = mid;
    p[2] = abbc;
    p[1] = ab;
}

/// Elevate a quadratic control point to the two cubic control points
pub fn quad_to_cubic(start: Point, control: Point, end: Point) -> (Point, Point) {
    let two_third = 2.0 / 3.0;
    let control1 = Point::new(start.x + two_third * (control.x - start.x),
                              start.y + two_third * (control.y - start.y));
    let control2 = Point::new(end.x + two_third * (control.x - end.x),
                              end.y + two_third * (control.y - end.y));
    (control1, control2)
}

/// Number of cubic segments needed to keep an arc of the given sweep
/// angle within tolerance at the given radius
pub fn arc_segments(angle: f32, radius: f32) -> i32 {
    let epsilon = TOLERANCE / radius;
    let mut segment;
    let mut i = 1;
    loop {
        segment = std::f32::consts::PI / i as f32;
        i += 1;
        let error = 2.0 / 27.0 * (segment / 4.0).sin().powi(6) / (segment / 4.0).cos().powi(2);
        if !(error > epsilon) {
            break;
        }
    }
    (angle.abs() / segment).ceil() as i32
}

/// Control points and end point of a cubic approximating the unit-circle
/// arc from `start_angle` to `end_angle`
pub fn unit_arc(start_angle: f32, end_angle: f32) -> [Point; 3] {
    let sin_start = start_angle.sin();
    let cos_start = start_angle.cos();
    let sin_end = end_angle.sin();
    let cos_end = end_angle.cos();

    let height = 4.0 / 3.0 * ((end_angle - start_angle) / 4.0).tan();

    [Point::new(cos_start - height * sin_start, sin_start + height * cos_start),
     Point::new(cos_end + height * sin_end, sin_end - height * cos_end),
     Point::new(cos_end, sin_end)]
}

/// Evaluate a quadratic Bézier at `t` (clamped to 1.0)
pub fn eval_quad(t: f32, start: Point, control: Point, end: Point) -> Point {
    let t = if t > 1.0 { 1.0 } else { t };
    let u = 1.0 - t;
    Point::new(start.x * u * u + 2.0 * control.x * u * t + end.x * t * t,
               start.y * u * u + 2.0 * control.y * u * t + end.y * t * t)
}

/// Evaluate a cubic Bézier at `t` (clamped to 1.0)
pub fn eval_cubic(t: f32, start: Point, control1: Point, control2: Point, end: Point) -> Point {
    let t = if t > 1.0 { 1.0 } else { t };
    let u = 1.0 - t;
    Point::new(start.x * u * u * u
                   + 3.0 * control1.x * u * u * t
                   + 3.0 * control2.x * u * t * t
                   + end.x * t * t * t,
               start.y * u * u * u
                   + 3.0 * control1.y * u * u * t
                   + 3.0 * control2.y * u * t * t
                   + end.y * t * t * t)
}

/// Real roots of `a*t^2 + b*t + c`, written into `t`
///
/// Slots are written only when a root exists; callers prefill with a
/// value outside `[0,1]`.
pub fn quadratic_roots(t: &mut [f32], a: f32, b: f32, c: f32) {
    let discriminant = b * b - 4.0 * a * c;

    if discriminant < 0.0 {
        return;
    }
    if a == 0.0 {
        t[0] = -c / b;
        return;
    }
    if discriminant == 0.0 {
        t[0] = -b / (2.0 * a);
        return;
    }
    t[0] = (-b + discriminant.sqrt()) / (2.0 * a);
    t[1] = (-b - discriminant.sqrt()) / (2.0 * a);
}

/// Tight bounding box of a quadratic Bézier
pub fn quad_bounding_box(start: Point, control: Point, end: Point) -> (Point, Point) {
    let mut min = start;
    let mut max = start;

    let t = (start.x - control.x) / (start.x - 2.0 * control.x + end.x);
    if t >= 0.0 && t <= 1.0 {
        extend(&mut min, &mut max, eval_quad(t, start, control, end));
    }

    let t = (start.y - control.y) / (start.y - 2.0 * control.y + end.y);
    if t >= 0.0 && t <= 1.0 {
        extend(&mut min, &mut max, eval_quad(t, start, control, end));
    }

    extend(&mut min, &mut max, end);
    (min, max)
}

/// Tight bounding box of a cubic Bézier
pub fn cubic_bounding_box(start: Point, control1: Point, control2: Point, end: Point) -> (Point, Point) {
    let mut min = start;
    let mut max = start;
    let mut t = [-1.0f32; 4];

    let a = -start.x + 3.0 * control1.x - 3.0 * control2.x + end.x;
    let b = 2.0 * start.x - 4.0 * control1.x + 2.0 * control2.x;
    let c = control1.x - start.x;
    quadratic_roots(&mut t[0..2], a, b, c);

    let a = -start.y + 3.0 * control1.y - 3.0 * control2.y + end.y;
    let b = 2.0 * start.y - 4.0 * control1.y + 2.0 * control2.y;
    let c = control1.y - start.y;
    quadratic_roots(&mut t[2..4], a, b, c);

    for &root in t.iter() {
        if root >= 0.0 && root <= 1.0 {
            extend(&mut min, &mut max, eval_cubic(root, start, control1, control2, end));
        }
    }

    extend(&mut min, &mut max, end);
    (min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_halves_meet_at_midpoint() {
        let mut p = [Point::default(); 7];
        p[0] = Point::new(0.0, 0.0);
        p[1] = Point::new(10.0, 40.0);
        p[2] = Point::new(30.0, 40.0);
        p[3] = Point::new(40.0, 0.0);
        let on_curve = eval_cubic(0.5, p[0], p[1], p[2], p[3]);
        split_in_place(&mut p);
        assert_eq!(p[0], Point::new(0.0, 0.0));
        assert_eq!(p[6], Point::new(40.0, 0.0));
        assert!((p[3].x - on_curve.x).abs() < 1e-4);
        assert!((p[3].y - on_curve.y).abs() < 1e-4);
    }

    #[test]
    fn straight_controls_are_flat() {
        let p = [Point::new(0.0, 0.0), Point::new(10.0, 10.0),
                 Point::new(20.0, 20.0), Point::new(30.0, 30.0)];
        assert!(is_line_segment(&p));
    }

    #[test]
    fn bowed_curve_is_not_flat() {
        let p = [Point::new(0.0, 0.0), Point::new(10.0, 40.0),
                 Point::new(30.0, 40.0), Point::new(40.0, 0.0)];
        assert!(!is_line_segment(&p));
    }

    #[test]
    fn more_segments_for_larger_radius() {
        let quarter = std::f32::consts::FRAC_PI_2;
        let small = arc_segments(quarter, 10.0);
        let large = arc_segments(quarter, 10000.0);
        assert!(small >= 1);
        assert!(large > small);
    }

    #[test]
    fn unit_arc_lands_on_end_angle() {
        let quarter = std::f32::consts::FRAC_PI_2;
        let [_, _, end] = unit_arc(0.0, quarter);
        assert!((end.x - quarter.cos()).abs() < 1e-6);
        assert!((end.y - quarter.sin()).abs() < 1e-6);
    }

    #[test]
    fn cubic_bounding_box_catches_extrema() {
        let start = Point::new(0.0, 0.0);
        let c1 = Point::new(10.0, 40.0);
        let c2 = Point::new(30.0, 40.0);
        let end = Point::new(40.0, 0.0);
        let (min, max) = cubic_bounding_box(start, c1, c2, end);
        assert_eq!(min, Point::new(0.0, 0.0));
        assert_eq!(max.x, 40.0);
        // the curve peaks at y = 30 for these symmetric controls
        assert!((max.y - 30.0).abs() < 1e-3);
    }

    #[test]
    fn quad_bounding_box_catches_extrema() {
        let start = Point::new(0.0, 10.0);
        let control = Point::new(20.0, -10.0);
        let end = Point::new(40.0, 10.0);
        let (min, max) = quad_bounding_box(start, control, end);
        assert_eq!((min.x, max.x), (0.0, 40.0));
        // peak of the parabola at t = 0.5: y = 0.25*10 - 0.5*10 + 0.25*10
        assert!((min.y - 0.0).abs() < 1e-4);
        assert_eq!(max.y, 10.0);
    }
}

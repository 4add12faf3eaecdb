//! Path model and builder
//!
//! A path is an append-only sequence of commands in an arena. Every
//! command after the first continues from the previous command's end
//! point; `Close` carries the point it returns to, so consumers never
//! chase back through the list.

use std::f32::consts::PI;

use crate::arena::Arena;
use crate::curve::{arc_segments, cubic_bounding_box, quad_bounding_box, unit_arc};
use crate::math::{extend, Point};
use crate::transform::Transform;

/// Arc command payload
///
/// An ellipse is the image of the unit circle under
/// [`final_transform`](ArcTo::final_transform). The builder normalizes
/// the stored angles so the sweep never exceeds a full turn; `xform`
/// starts as identity and accumulates whole-path transforms.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ArcTo {
    pub center: Point,
    pub radius: Point,
    pub start_angle: f32,
    pub end_angle: f32,
    pub anticlockwise: bool,
    pub xform: Transform,
    pub to: Point,
}

impl ArcTo {
    fn new(center: Point, radius: Point,
           start_angle: f32, end_angle: f32, anticlockwise: bool) -> Self {
        Self {
            center,
            radius,
            start_angle,
            end_angle,
            anticlockwise,
            xform: Transform::new(),
            to: Point::new(center.x + radius.x * end_angle.cos(),
                           center.y + radius.y * end_angle.sin()),
        }
    }
    /// Unit circle to device mapping for this arc
    pub fn final_transform(&self) -> Transform {
        let axes = Transform {
            sx: self.radius.x, shy: 0.0,
            shx: 0.0, sy: self.radius.y,
            tx: self.center.x, ty: self.center.y,
        };
        self.xform * axes
    }
    /// Radius estimate driving the flattening segment count
    pub fn bounding_radius(&self) -> f32 {
        let t = self.final_transform();
        (t.transform(Point::new(1.0, 1.0)) - t.transform(Point::new(0.0, 0.0))).length_squared()
    }
}

/// One path command
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PathCmd {
    MoveTo(Point),
    LineTo(Point),
    QuadTo { ctrl: Point, to: Point },
    CubicTo { ctrl1: Point, ctrl2: Point, to: Point },
    Arc(ArcTo),
    Close(Point),
}

impl PathCmd {
    /// End point the next command continues from
    pub fn end_point(&self) -> Point {
        match *self {
            PathCmd::MoveTo(p) | PathCmd::LineTo(p) | PathCmd::Close(p) => p,
            PathCmd::QuadTo { to, .. } | PathCmd::CubicTo { to, .. } => to,
            PathCmd::Arc(ref arc) => arc.to,
        }
    }
    pub fn is_move_to(&self) -> bool {
        match *self {
            PathCmd::MoveTo(_) => true,
            _ => false,
        }
    }
}

/// A vector path
///
/// ```
/// use trapeze::Path;
/// let mut path = Path::new();
/// path.move_to(10.0, 10.0);
/// path.line_to(50.0, 10.0);
/// path.line_to(50.0, 40.0);
/// path.close();
/// ```
#[derive(Debug, Default, Clone)]
pub struct Path {
    cmds: Arena<PathCmd>,
    shape_first: Option<u32>,
    has_area: bool,
}

impl Path {
    /// Create an empty path
    pub fn new() -> Self {
        Self::default()
    }

    fn append(&mut self, cmd: PathCmd) -> u32 {
        self.cmds.push(cmd)
    }

    fn last(&self) -> Option<PathCmd> {
        if self.cmds.is_empty() {
            None
        } else {
            Some(self.cmds[self.cmds.len() as u32 - 1])
        }
    }

    /// Start a new subpath at `(x, y)`
    ///
    /// Consecutive moves collapse into one.
    pub fn move_to(&mut self, x: f32, y: f32) {
        let end = Point::new(x, y);
        if let Some(PathCmd::MoveTo(_)) = self.last() {
            let last = self.cmds.len() as u32 - 1;
            self.cmds[last] = PathCmd::MoveTo(end);
            return;
        }
        let id = self.append(PathCmd::MoveTo(end));
        self.shape_first = Some(id);
    }

    /// Line to `(x, y)`
    ///
    /// On an empty path this degrades to a move; a segment back to the
    /// current point is skipped.
    pub fn line_to(&mut self, x: f32, y: f32) {
        let end = Point::new(x, y);
        let last = match self.last() {
            None => {
                self.move_to(x, y);
                return;
            }
            Some(cmd) => cmd,
        };
        if !last.is_move_to() && last.end_point() == end {
            return;
        }
        self.has_area = true;
        self.append(PathCmd::LineTo(end));
    }

    /// Quadratic curve through `(cx, cy)` to `(x, y)`
    ///
    /// On an empty path, first moves to the control point.
    pub fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) {
        if self.cmds.is_empty() {
            self.move_to(cx, cy);
        }
        self.has_area = true;
        self.append(PathCmd::QuadTo {
            ctrl: Point::new(cx, cy),
            to: Point::new(x, y),
        });
    }

    /// Cubic curve through two control points to `(x, y)`
    pub fn cubic_to(&mut self, c1x: f32, c1y: f32, c2x: f32, c2y: f32, x: f32, y: f32) {
        if self.cmds.is_empty() {
            self.move_to(c1x, c1y);
        }
        self.has_area = true;
        self.append(PathCmd::CubicTo {
            ctrl1: Point::new(c1x, c1y),
            ctrl2: Point::new(c2x, c2y),
            to: Point::new(x, y),
        });
    }

    /// Elliptical arc around `(cx, cy)` from `start_angle` to
    /// `end_angle`, radians, y-down screen orientation
    ///
    /// A connecting line is inserted when the current point is not the
    /// arc's start point. Zero radii or equal angles collapse to that
    /// line. Angles are normalized so the stored sweep is at most a
    /// full turn in the requested direction; full circles survive.
    pub fn arc(&mut self, cx: f32, cy: f32, rx: f32, ry: f32,
               start_angle: f32, end_angle: f32, anticlockwise: bool) {
        let start = Point::new(cx + rx * start_angle.cos(), cy + ry * start_angle.sin());
        if self.cmds.is_empty() {
            self.move_to(start.x, start.y);
        }

        if rx == 0.0 || ry == 0.0 || start_angle == end_angle {
            self.line_to(start.x, start.y);
            return;
        }

        if self.current_point() != Some(start) {
            self.line_to(start.x, start.y);
        }

        let two_pi = 2.0 * PI;
        let mut start_angle = start_angle;
        let mut end_angle = end_angle;
        if anticlockwise && start_angle - end_angle >= two_pi {
            start_angle %= two_pi;
            end_angle = start_angle - two_pi;
        } else if !anticlockwise && end_angle - start_angle >= two_pi {
            start_angle %= two_pi;
            end_angle = start_angle + two_pi;
        } else {
            start_angle %= two_pi;
            if start_angle < 0.0 {
                start_angle += two_pi;
            }
            end_angle %= two_pi;
            if end_angle < 0.0 {
                end_angle += two_pi;
            }
            if !anticlockwise {
                if start_angle >= end_angle {
                    end_angle += two_pi;
                }
            } else if start_angle <= end_angle {
                end_angle -= two_pi;
            }
        }

        self.has_area = true;
        self.append(PathCmd::Arc(ArcTo::new(
            Point::new(cx, cy),
            Point::new(rx, ry),
            start_angle,
            end_angle,
            anticlockwise,
        )));
    }

    /// Arc of the circle of the given radius tangent to the lines from
    /// the current point to `(cx, cy)` and from there to `(x, y)`
    /// (HTML canvas `arcTo`)
    ///
    /// Degenerate configurations fall back to a line to the control
    /// point.
    pub fn arc_to(&mut self, cx: f32, cy: f32, x: f32, y: f32, radius: f32) {
        let control = Point::new(cx, cy);
        let end = Point::new(x, y);
        let start = match self.current_point() {
            None => {
                self.move_to(cx, cy);
                return;
            }
            Some(p) => p,
        };

        if start == control || control == end || radius == 0.0 {
            self.line_to(cx, cy);
            return;
        }

        let delta1 = start - control;
        let delta2 = end - control;
        let delta1_length = delta1.length_squared().sqrt();
        let delta2_length = delta2.length_squared().sqrt();

        // Normalized dot product.
        let cos_phi = f64::from(delta1.dot(delta2)) / f64::from(delta1_length * delta2_length);

        // All three points on one straight line (HTML5, 4.8.11.1.8).
        if cos_phi.abs() >= 0.9999 {
            self.line_to(cx, cy);
            return;
        }

        let tangent = radius / ((cos_phi.acos() / 2.0).tan() as f32);
        let delta1_factor = tangent / delta1_length;
        let arc_start = Point::new(control.x + delta1_factor * delta1.x,
                                   control.y + delta1_factor * delta1.y);

        let mut ortho_start = Point::new(delta1.y, -delta1.x);
        let ortho_start_length = ortho_start.length_squared().sqrt();
        let radius_factor = radius / ortho_start_length;

        let cos_alpha =
            f64::from(ortho_start.dot(delta2)) / f64::from(ortho_start_length * delta2_length);
        if cos_alpha < 0.0 {
            ortho_start = Point::new(-ortho_start.x, -ortho_start.y);
        }

        let center = Point::new(arc_start.x + radius_factor * ortho_start.x,
                                arc_start.y + radius_factor * ortho_start.y);

        // Angles for arc().
        ortho_start = Point::new(-ortho_start.x, -ortho_start.y);
        let mut start_angle = (ortho_start.x / ortho_start_length).acos();
        if ortho_start.y < 0.0 {
            start_angle = 2.0 * PI - start_angle;
        }

        let mut anticlockwise = false;

        let delta2_factor = tangent / delta2_length;
        let arc_end = Point::new(control.x + delta2_factor * delta2.x,
                                 control.y + delta2_factor * delta2.y);
        let ortho_end = arc_end - center;
        let ortho_end_length = ortho_end.length_squared().sqrt();
        let mut end_angle = (ortho_end.x / ortho_end_length).acos();
        if ortho_end.y < 0.0 {
            end_angle = 2.0 * PI - end_angle;
        }
        if start_angle > end_angle && start_angle - end_angle < PI {
            anticlockwise = true;
        }
        if start_angle < end_angle && end_angle - start_angle > PI {
            anticlockwise = true;
        }

        self.arc(center.x, center.y, radius, radius, start_angle, end_angle, anticlockwise);
    }

    /// Axis-aligned rectangle as a closed subpath
    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.move_to(x, y);
        self.line_to(x + width, y);
        self.line_to(x + width, y + height);
        self.line_to(x, y + height);
        self.close();
    }

    /// Axis-aligned ellipse as a full-circle arc
    pub fn ellipse(&mut self, cx: f32, cy: f32, rx: f32, ry: f32) {
        self.arc(cx, cy, rx, ry, 0.0, 2.0 * PI, false);
    }

    /// Close the current subpath back to its starting point
    ///
    /// No-op on a path without a subpath start.
    pub fn close(&mut self) {
        let first = match self.shape_first {
            None => return,
            Some(id) => id,
        };
        let end = self.cmds[first].end_point();
        let id = self.append(PathCmd::Close(end));
        self.shape_first = Some(id);
    }

    /// True if no command with fill area has been appended
    ///
    /// A path holding only move commands is still empty.
    pub fn is_empty(&self) -> bool {
        !self.has_area
    }

    /// Number of commands
    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    /// Commands in append order
    pub fn iter(&self) -> impl Iterator<Item = &PathCmd> {
        self.cmds.iter()
    }

    /// End point of the last command, if any
    pub fn current_point(&self) -> Option<Point> {
        self.last().map(|cmd| cmd.end_point())
    }

    /// Discard all commands, retaining allocated blocks
    pub fn clear(&mut self) {
        self.cmds.clear();
        self.shape_first = None;
        self.has_area = false;
    }

    /// Tight bounding box over every drawn command
    ///
    /// `None` for a path with no commands. A move extends the box only
    /// when further commands draw from it.
    pub fn bounding_box(&self) -> Option<(Point, Point)> {
        if self.cmds.is_empty() {
            return None;
        }
        let mut min = self.cmds[0].end_point();
        let mut max = min;
        let mut previous = min;

        let count = self.cmds.len() as u32;
        for i in 1..count {
            let cmd = self.cmds[i];
            match cmd {
                PathCmd::MoveTo(p) => {
                    let drawn_after = i + 1 < count && match self.cmds[i + 1] {
                        PathCmd::Close(_) => false,
                        _ => true,
                    };
                    if drawn_after {
                        extend(&mut min, &mut max, p);
                    }
                }
                PathCmd::LineTo(p) => extend(&mut min, &mut max, p),
                PathCmd::QuadTo { ctrl, to } => {
                    let (lo, hi) = quad_bounding_box(previous, ctrl, to);
                    extend(&mut min, &mut max, lo);
                    extend(&mut min, &mut max, hi);
                }
                PathCmd::CubicTo { ctrl1, ctrl2, to } => {
                    let (lo, hi) = cubic_bounding_box(previous, ctrl1, ctrl2, to);
                    extend(&mut min, &mut max, lo);
                    extend(&mut min, &mut max, hi);
                }
                PathCmd::Arc(arc) => {
                    let transform = arc.final_transform();
                    let delta_angle = if arc.anticlockwise {
                        arc.start_angle - arc.end_angle
                    } else {
                        arc.end_angle - arc.start_angle
                    };
                    let segments = arc_segments(delta_angle, arc.bounding_radius());
                    let mut step = delta_angle / segments as f32;
                    if arc.anticlockwise {
                        step = -step;
                    }

                    let mut angle = arc.start_angle;
                    let mut start = transform.transform(Point::new(angle.cos(), angle.sin()));
                    for segment in 0..segments {
                        let until = if segment == segments - 1 {
                            arc.end_angle
                        } else {
                            angle + step
                        };
                        let [c1, c2, end] = unit_arc(angle, until);
                        let c1 = transform.transform(c1);
                        let c2 = transform.transform(c2);
                        let end = transform.transform(end);
                        let (lo, hi) = cubic_bounding_box(start, c1, c2, end);
                        extend(&mut min, &mut max, lo);
                        extend(&mut min, &mut max, hi);
                        start = end;
                        angle += step;
                    }
                    extend(&mut min, &mut max, start);
                    extend(&mut min, &mut max, arc.to);
                }
                PathCmd::Close(_) => {}
            }
            previous = cmd.end_point();
        }
        Some((min, max))
    }

    /// Transform every stored point in place
    ///
    /// Arcs fold the transform into their local matrix, so repeated
    /// calls stack in application order.
    pub fn transform(&mut self, t: &Transform) {
        let count = self.cmds.len() as u32;
        for i in 0..count {
            let cmd = self.cmds[i];
            self.cmds[i] = match cmd {
                PathCmd::MoveTo(p) => PathCmd::MoveTo(t.transform(p)),
                PathCmd::LineTo(p) => PathCmd::LineTo(t.transform(p)),
                PathCmd::Close(p) => PathCmd::Close(t.transform(p)),
                PathCmd::QuadTo { ctrl, to } => PathCmd::QuadTo {
                    ctrl: t.transform(ctrl),
                    to: t.transform(to),
                },
                PathCmd::CubicTo { ctrl1, ctrl2, to } => PathCmd::CubicTo {
                    ctrl1: t.transform(ctrl1),
                    ctrl2: t.transform(ctrl2),
                    to: t.transform(to),
                },
                PathCmd::Arc(mut arc) => {
                    arc.to = t.transform(arc.to);
                    arc.xform = *t * arc.xform;
                    PathCmd::Arc(arc)
                }
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consecutive_moves_collapse() {
        let mut path = Path::new();
        path.move_to(1.0, 2.0);
        path.move_to(3.0, 4.0);
        assert_eq!(path.len(), 1);
        assert_eq!(path.current_point(), Some(Point::new(3.0, 4.0)));
        assert!(path.is_empty());
    }

    #[test]
    fn line_on_empty_path_degrades_to_move() {
        let mut path = Path::new();
        path.line_to(5.0, 5.0);
        assert_eq!(path.len(), 1);
        assert!(path.is_empty());
    }

    #[test]
    fn repeated_end_point_is_skipped() {
        let mut path = Path::new();
        path.move_to(0.0, 0.0);
        path.line_to(10.0, 0.0);
        path.line_to(10.0, 0.0);
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn close_carries_subpath_start() {
        let mut path = Path::new();
        path.move_to(1.0, 1.0);
        path.line_to(5.0, 1.0);
        path.close();
        assert_eq!(path.current_point(), Some(Point::new(1.0, 1.0)));
    }

    #[test]
    fn close_without_subpath_is_a_noop() {
        let mut path = Path::new();
        path.close();
        assert_eq!(path.len(), 0);
    }

    #[test]
    fn rect_bounding_box() {
        let mut path = Path::new();
        path.rect(10.0, 10.0, 30.0, 20.0);
        let (min, max) = path.bounding_box().unwrap();
        assert_eq!(min, Point::new(10.0, 10.0));
        assert_eq!(max, Point::new(40.0, 30.0));
    }

    #[test]
    fn circle_bounding_box_reaches_the_extremes() {
        let mut path = Path::new();
        path.ellipse(50.0, 50.0, 20.0, 10.0);
        let (min, max) = path.bounding_box().unwrap();
        assert!((min.x - 30.0).abs() < 0.1);
        assert!((min.y - 40.0).abs() < 0.1);
        assert!((max.x - 70.0).abs() < 0.1);
        assert!((max.y - 60.0).abs() < 0.1);
    }

    #[test]
    fn transform_stacks_for_arcs_like_lines() {
        let mut path = Path::new();
        path.ellipse(0.0, 0.0, 10.0, 10.0);
        path.transform(&Transform::new_scale(2.0, 2.0));
        path.transform(&Transform::new_translate(100.0, 0.0));
        let (min, max) = path.bounding_box().unwrap();
        assert!((min.x - 80.0).abs() < 0.2);
        assert!((max.x - 120.0).abs() < 0.2);
    }
}

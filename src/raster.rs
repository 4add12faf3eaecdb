//! Scanline trapezoidation
//!
//! A [`TrapezoidBuilder`] walks a [`Path`], flattens its curves, clips the
//! resulting edges against a [`ClipBox`] and sweeps them top to bottom in
//! sub-scanline bands. Every band contributes horizontal strips, strips from
//! adjacent bands merge when their shared boundary matches exactly, and the
//! result is an ordered [`TrapezoidList`] ready for a GPU consumer.
//!
//! All coordinates are supersampled by [`SUBSCANLINES`] while the sweep
//! runs; the final list is scaled back to device units.
//!
//! [`SUBSCANLINES`]: crate::SUBSCANLINES

use log::debug;

use crate::arena::Arena;
use crate::clip::{ClipBox, IntRect};
use crate::curve::{arc_segments, is_line_segment, quad_to_cubic, split_in_place, unit_arc};
use crate::edge::{Edge, EdgeTree, NIL};
use crate::math::Point;
use crate::path::{ArcTo, Path, PathCmd};
use crate::transform::Transform;
use crate::trap::{ShapeType, Trapezoid, TrapezoidList};
use crate::SUBSCANLINES;

/// Path filling convention
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum FillRule {
    /// Fill where the signed winding number is nonzero
    NonZero,
    /// Fill where the crossing count is odd
    EvenOdd,
}

impl Default for FillRule {
    fn default() -> FillRule {
        FillRule::NonZero
    }
}

/// X of the edge through (x0, y0) with `slope` at scanline `y`
pub(crate) fn compute_x(y: f32, x0: f32, y0: f32, slope: f32) -> i32 {
    ((y - y0) * slope + x0).round() as i32
}

/// Y where the edge through (x0, y0) with `slope` reaches `x`
pub(crate) fn compute_y(x: i32, x0: f32, y0: f32, slope: f32) -> i32 {
    ((x as f32 - x0) / slope + y0).round() as i32
}

fn less_top_position(a: &Edge, b: &Edge) -> bool {
    a.top_x < b.top_x || (a.top_x == b.top_x && a.slope <= b.slope)
}

/// Work-in-progress trapezoid in supersampled coordinates
///
/// Strips live in a doubly linked list so a strip grown downwards can be
/// spliced back to the tail, keeping merge candidates in band order.
#[derive(Debug, Default, Copy, Clone)]
struct Strip {
    prev: u32,
    next: u32,
    top_y: i32,
    top_left_x: i32,
    top_right_x: i32,
    bottom_y: i32,
    bottom_left_x: i32,
    bottom_right_x: i32,
    left_slope: f32,
    right_slope: f32,
}

/// One-shot builder turning a filled path into a trapezoid list
///
/// ```
/// use trapeze::{ClipBox, FillRule, Path, Transform, TrapezoidBuilder};
///
/// let mut path = Path::new();
/// path.rect(10.0, 10.0, 40.0, 30.0);
///
/// let clip = ClipBox::from_size(100, 100);
/// let list = TrapezoidBuilder::new(&path, &clip, &Transform::new(), FillRule::NonZero).build();
/// assert_eq!(list.len(), 1);
/// ```
#[derive(Debug)]
pub struct TrapezoidBuilder<'a> {
    path: &'a Path,
    transform: Transform,
    fill_rule: FillRule,
    tree: EdgeTree,
    strips: Arena<Strip>,
    strip_count: usize,
    clip_top: i32,
    clip_bottom: i32,
    clip_left: i32,
    clip_right: i32,
    clip_everything: bool,
}

impl<'a> TrapezoidBuilder<'a> {
    pub fn new(path: &'a Path, clip: &ClipBox, transform: &Transform, fill_rule: FillRule) -> Self {
        // saturate so an outsized clip box acts as "no clipping"
        let clip_top = clip.y1.saturating_mul(SUBSCANLINES);
        let clip_bottom = clip.y2.saturating_mul(SUBSCANLINES);
        let clip_left = clip.x1.saturating_mul(SUBSCANLINES);
        let clip_right = clip.x2.saturating_mul(SUBSCANLINES);

        let mut strips = Arena::new();
        // slot zero backs the nil index, list heads come later
        strips.push(Strip::default());

        TrapezoidBuilder {
            path,
            transform: *transform,
            fill_rule,
            tree: EdgeTree::new(),
            strips,
            strip_count: 0,
            clip_top,
            clip_bottom,
            clip_left,
            clip_right,
            clip_everything: clip_top >= clip_bottom || clip_left >= clip_right,
        }
    }

    /// Clip `start`-`end` against the box and file the survivor in the tree
    ///
    /// Sections beyond the top and bottom are cut, sections beyond the right
    /// are dropped since nothing fills there, and sections beyond the left
    /// turn into vertical edges on the boundary so the winding they carry
    /// into the box survives.
    fn insert_line(&mut self, start: Point, end: Point) {
        if self.clip_everything {
            return;
        }

        let mut dir = 1;
        let (start, end) = if start.y > end.y {
            dir = -1;
            (end, start)
        } else {
            (start, end)
        };

        let mut x1 = start.x;
        let mut y1 = start.y;
        let x2 = end.x;
        let y2 = end.y;

        let scale = SUBSCANLINES as f32;
        let mut top_y = (y1 * scale).round() as i32;
        let mut bottom_y = (y2 * scale).round() as i32;

        // horizontal edges never change the fill level
        if top_y == bottom_y {
            return;
        }
        if bottom_y <= self.clip_top || top_y >= self.clip_bottom {
            return;
        }

        let mut slope = (x2 - x1) / (y2 - y1);
        x1 *= scale;
        y1 *= scale;

        let mut top_x = if top_y < self.clip_top {
            top_y = self.clip_top;
            compute_x(top_y as f32, x1, y1, slope)
        } else {
            x1.round() as i32
        };

        let mut bottom_x = if bottom_y > self.clip_bottom {
            bottom_y = self.clip_bottom;
            compute_x(bottom_y as f32, x1, y1, slope)
        } else {
            (x2 * scale).round() as i32
        };

        if top_x >= self.clip_right && bottom_x >= self.clip_right {
            return;
        }

        if top_x > self.clip_right {
            top_y = compute_y(self.clip_right, x1, y1, slope);
            if top_y >= bottom_y {
                return;
            }
            top_x = self.clip_right;
            if top_y < self.clip_top {
                top_y = self.clip_top;
                top_x = compute_x(top_y as f32, x1, y1, slope);
                if top_x > self.clip_right {
                    top_x = self.clip_right;
                }
            }
        } else if bottom_x > self.clip_right {
            bottom_y = compute_y(self.clip_right, x1, y1, slope);
            if top_y >= bottom_y {
                return;
            }
            bottom_x = self.clip_right;
            if bottom_y >= self.clip_bottom {
                bottom_y = self.clip_bottom;
                bottom_x = compute_x(bottom_y as f32, x1, y1, slope);
                if bottom_x > self.clip_right {
                    bottom_x = self.clip_right;
                }
            }
        }

        if top_x < self.clip_left {
            if bottom_x <= self.clip_left {
                // entirely outside, keep the winding on the boundary
                x1 = self.clip_left as f32;
                top_x = self.clip_left;
                bottom_x = self.clip_left;
                slope = 0.0;
            } else {
                let mut new_top_y = compute_y(self.clip_left, x1, y1, slope);
                // rounding may push the crossing past the clamped bottom
                if new_top_y > bottom_y {
                    new_top_y = bottom_y;
                }

                let boundary = (self.clip_left / SUBSCANLINES) as f32;
                let (wall_top, wall_bottom) = if dir > 0 {
                    (top_y, new_top_y)
                } else {
                    (new_top_y, top_y)
                };
                self.insert_line(
                    Point::new(boundary, wall_top as f32 / scale),
                    Point::new(boundary, wall_bottom as f32 / scale),
                );

                top_y = new_top_y;
                if bottom_y <= top_y {
                    return;
                }

                top_x = self.clip_left;
                if top_y < self.clip_top {
                    top_y = self.clip_top;
                    top_x = compute_x(top_y as f32, x1, y1, slope);
                    if top_x < self.clip_left {
                        top_x = self.clip_left;
                    }
                }
            }
        } else if bottom_x < self.clip_left {
            let mut new_bottom_y = compute_y(self.clip_left, x1, y1, slope);
            if new_bottom_y < top_y {
                new_bottom_y = top_y;
            }

            let boundary = (self.clip_left / SUBSCANLINES) as f32;
            let (wall_top, wall_bottom) = if dir > 0 {
                (new_bottom_y, bottom_y)
            } else {
                (bottom_y, new_bottom_y)
            };
            self.insert_line(
                Point::new(boundary, wall_top as f32 / scale),
                Point::new(boundary, wall_bottom as f32 / scale),
            );

            bottom_y = new_bottom_y;
            if bottom_y <= top_y {
                return;
            }

            bottom_x = self.clip_left;
            if bottom_y >= self.clip_bottom {
                bottom_y = self.clip_bottom;
                bottom_x = compute_x(bottom_y as f32, x1, y1, slope);
                if bottom_x > self.clip_left {
                    bottom_x = self.clip_left;
                }
            }
        }

        self.tree.insert(Edge {
            top_y,
            top_x,
            bottom_y,
            bottom_x,
            start_x: x1,
            start_y: y1,
            slope,
            dir,
            ..Edge::default()
        });
    }

    fn insert_quad(&mut self, start: Point, control: Point, end: Point) {
        let (control1, control2) = quad_to_cubic(start, control, end);
        self.insert_cubic(start, control1, control2, end);
    }

    /// Flatten a cubic by repeated halving, emitting flat pieces as lines
    ///
    /// The fixed buffer holds the subdivision stack; in the rare case it
    /// fills up the deepest half recurses instead.
    fn insert_cubic(&mut self, start: Point, control1: Point, control2: Point, end: Point) {
        const BUFFER_SIZE: usize = 16 * 3 + 1;
        let mut buffer = [Point::default(); BUFFER_SIZE];
        buffer[0] = start;
        buffer[1] = control1;
        buffer[2] = control2;
        buffer[3] = end;

        let mut at: i32 = 0;
        loop {
            let i = at as usize;
            if is_line_segment(&buffer[i..i + 4]) {
                self.insert_line(buffer[i], buffer[i + 3]);
                at -= 3;
                if at < 0 {
                    break;
                }
                continue;
            }

            split_in_place(&mut buffer[i..i + 7]);
            at += 3;
            if at as usize >= BUFFER_SIZE - 4 {
                let i = at as usize;
                self.insert_cubic(buffer[i], buffer[i + 1], buffer[i + 2], buffer[i + 3]);
                at -= 3;
            }
        }
    }

    /// Insert an arc as a run of cubic segments
    fn insert_arc(&mut self, last_end: Point, arc: &ArcTo) {
        let mut start_angle = arc.start_angle;
        let end_angle = arc.end_angle;

        let transform = self.transform * arc.final_transform();

        let mut start = transform.transform(Point::new(start_angle.cos(), start_angle.sin()));
        self.insert_line(last_end, start);

        let delta_angle = if arc.anticlockwise {
            start_angle - end_angle
        } else {
            end_angle - start_angle
        };

        let segments = arc_segments(delta_angle, arc.bounding_radius());
        let mut step = delta_angle / segments as f32;
        if arc.anticlockwise {
            step = -step;
        }

        for segment in 0..segments {
            let until = if segment == segments - 1 {
                end_angle
            } else {
                start_angle + step
            };

            let [control1, control2, arc_end] = unit_arc(start_angle, until);
            let control1 = transform.transform(control1);
            let control2 = transform.transform(control2);
            // land exactly on the stored end point so the next edge connects
            let end = if segment == segments - 1 {
                self.transform.transform(arc.to)
            } else {
                transform.transform(arc_end)
            };

            self.insert_cubic(start, control1, control2, end);
            start = end;
            start_angle += step;
        }
    }

    /// X of `edge` at `bottom_y`, interpolated from the unclipped start
    fn next_top_x(&self, edge: u32, bottom_y: i32) -> i32 {
        let e = self.tree.edges[edge];
        debug_assert!(bottom_y <= e.bottom_y);
        if bottom_y >= e.bottom_y {
            return e.bottom_x;
        }
        compute_x(bottom_y as f32, e.start_x, e.start_y, e.slope)
    }

    /// Schedule a band split where `left` and `right` swap order
    fn check_intersection(&mut self, left: u32, right: u32, bottom_y: i32, next_bottom_y: &mut i32) {
        let l = self.tree.edges[left];
        let r = self.tree.edges[right];
        debug_assert!(l.top_x < r.top_x);

        // diverging edges never meet
        if l.slope <= r.slope {
            return;
        }

        let intersection_y;
        if l.isect_edge == right {
            // cache hit ratio is usually above 90%
            intersection_y = l.isect_y;
        } else {
            let (y, x1, x2) = if l.start_y == r.start_y {
                (l.start_y, l.start_x, r.start_x)
            } else if l.start_y < r.start_y {
                (r.start_y, l.slope * (r.start_y - l.start_y) + l.start_x, r.start_x)
            } else {
                (l.start_y, l.start_x, r.slope * (l.start_y - r.start_y) + r.start_x)
            };

            let mut y = (y + (x2 - x1) / (l.slope - r.slope)).round() as i32;
            let left_x = compute_x(y as f32, l.start_x, l.start_y, l.slope);
            let right_x = compute_x(y as f32, r.start_x, r.start_y, r.slope);

            // the band below the split must see the pair reordered
            if left_x < right_x && y >= bottom_y {
                y += 1;
            }

            let e = &mut self.tree.edges[left];
            e.isect_edge = right;
            e.isect_y = y;
            intersection_y = y;
        }

        if intersection_y < *next_bottom_y && intersection_y > bottom_y {
            *next_bottom_y = intersection_y;
        }
    }

    /// Advance the active list to the band below `bottom_y`
    ///
    /// Edges ending at `bottom_y` drop out, survivors step to their next top
    /// X, pending edges starting here merge in, and the list stays sorted by
    /// (top X, slope). Neighbor pairs created by an insertion are checked
    /// for intersections, which can pull `next_bottom_y` up.
    fn update_active_edges(
        &mut self,
        mut active: u32,
        pending: &mut u32,
        bottom_y: i32,
        next_bottom_y: &mut i32,
    ) -> u32 {
        let mut first = NIL;
        let mut last = NIL;
        let mut last_with_smaller_top_x = NIL;
        let mut has_pending = *pending != NIL && self.tree.edges[*pending].top_y <= bottom_y;

        loop {
            debug_assert!(*pending == NIL || self.tree.edges[*pending].top_y >= bottom_y);

            let insert;
            if active != NIL
                && (!has_pending
                    || self.tree.edges[*pending].top_x > self.tree.edges[active].next_top_x)
            {
                insert = active;
                active = self.tree.edges[insert].next;
                if self.tree.edges[insert].bottom_y <= bottom_y {
                    debug_assert_eq!(self.tree.edges[insert].bottom_y, bottom_y);
                    continue;
                }
                let next_top_x = self.tree.edges[insert].next_top_x;
                self.tree.edges[insert].top_x = next_top_x;
            } else if has_pending {
                insert = *pending;
                *pending = self.tree.edges[insert].next;
                has_pending = *pending != NIL && self.tree.edges[*pending].top_y <= bottom_y;
            } else {
                break;
            }

            self.tree.edges[insert].next = NIL;
            if self.tree.edges[insert].bottom_y < *next_bottom_y {
                *next_bottom_y = self.tree.edges[insert].bottom_y;
            }

            if first == NIL {
                first = insert;
                last = insert;
                continue;
            }

            if self.tree.edges[last].top_x < self.tree.edges[insert].top_x {
                // fast path, edges mostly arrive in order
                last_with_smaller_top_x = last;
                self.tree.edges[last].next = insert;
                self.check_intersection(last, insert, bottom_y, next_bottom_y);
                last = insert;
                continue;
            }

            if self.tree.edges[last].top_x == self.tree.edges[insert].top_x {
                // edges sharing a top X cannot cross, sort them by slope
                if self.tree.edges[last].slope <= self.tree.edges[insert].slope {
                    self.tree.edges[last].next = insert;
                    last = insert;
                    continue;
                }

                let mut previous;
                if last_with_smaller_top_x == NIL {
                    if self.tree.edges[insert].slope <= self.tree.edges[first].slope {
                        self.tree.edges[insert].next = first;
                        first = insert;
                        continue;
                    }
                    previous = first;
                } else {
                    let after = self.tree.edges[last_with_smaller_top_x].next;
                    if self.tree.edges[insert].slope <= self.tree.edges[after].slope {
                        self.tree.edges[insert].next = after;
                        self.tree.edges[last_with_smaller_top_x].next = insert;
                        self.check_intersection(
                            last_with_smaller_top_x,
                            insert,
                            bottom_y,
                            next_bottom_y,
                        );
                        continue;
                    }
                    previous = after;
                }

                loop {
                    let next = self.tree.edges[previous].next;
                    if next == NIL || self.tree.edges[next].slope >= self.tree.edges[insert].slope {
                        break;
                    }
                    previous = next;
                }
                debug_assert_ne!(previous, last);

                let next = self.tree.edges[previous].next;
                self.tree.edges[insert].next = next;
                self.tree.edges[previous].next = insert;
                continue;
            }

            // the new edge starts left of the tail
            if last_with_smaller_top_x != NIL {
                let at = self.tree.edges[last_with_smaller_top_x];
                let new = self.tree.edges[insert];
                if less_top_position(&at, &new) {
                    self.tree.edges[insert].next = at.next;
                    self.tree.edges[last_with_smaller_top_x].next = insert;
                    last_with_smaller_top_x = insert;
                    continue;
                }
            }

            let new = self.tree.edges[insert];
            if less_top_position(&new, &self.tree.edges[first]) {
                self.tree.edges[insert].next = first;
                first = insert;
                if last_with_smaller_top_x == NIL {
                    last_with_smaller_top_x = insert;
                }
                continue;
            }

            debug_assert_ne!(last_with_smaller_top_x, NIL);

            let mut previous = first;
            loop {
                let next = self.tree.edges[previous].next;
                debug_assert_ne!(next, NIL);
                if !less_top_position(&self.tree.edges[next], &new) {
                    break;
                }
                previous = next;
            }

            let next = self.tree.edges[previous].next;
            self.tree.edges[insert].next = next;
            self.tree.edges[previous].next = insert;
        }

        if *pending != NIL && self.tree.edges[*pending].top_y < *next_bottom_y {
            *next_bottom_y = self.tree.edges[*pending].top_y;
        }

        first
    }

    fn new_strip(
        &mut self,
        top_y: i32,
        top_left_x: i32,
        top_right_x: i32,
        bottom_y: i32,
        bottom_left_x: i32,
        bottom_right_x: i32,
        left_slope: f32,
        right_slope: f32,
        last: u32,
    ) -> u32 {
        debug_assert!(top_y < bottom_y);
        debug_assert!(top_left_x <= top_right_x && bottom_left_x <= bottom_right_x);
        debug_assert!(top_left_x < top_right_x || bottom_left_x < bottom_right_x);

        let strip = self.strips.push(Strip {
            prev: last,
            next: NIL,
            top_y,
            top_left_x,
            top_right_x,
            bottom_y,
            bottom_left_x,
            bottom_right_x,
            left_slope,
            right_slope,
        });
        self.strips[last].next = strip;
        self.strip_count += 1;
        strip
    }

    /// Grow `strip` down to `bottom_y` and splice it back to the list tail
    fn extend_strip(
        &mut self,
        strip: u32,
        bottom_y: i32,
        bottom_left_x: i32,
        bottom_right_x: i32,
        last: u32,
    ) {
        debug_assert!(self.strips[strip].top_y < bottom_y);
        debug_assert!(bottom_left_x <= bottom_right_x);

        {
            let s = &mut self.strips[strip];
            s.bottom_y = bottom_y;
            s.bottom_left_x = bottom_left_x;
            s.bottom_right_x = bottom_right_x;
        }

        if last == strip {
            return;
        }

        let prev = self.strips[strip].prev;
        let next = self.strips[strip].next;
        self.strips[prev].next = next;
        self.strips[next].prev = prev;
        self.strips[last].next = strip;
        self.strips[strip].prev = last;
        self.strips[strip].next = NIL;
    }

    /// Emit the strips of one band and return the first of them
    ///
    /// Walks the active list accumulating the fill level; a span opens when
    /// the level leaves zero and closes when it returns. A closed span grows
    /// a strip from the band above when their shared boundary matches
    /// exactly, otherwise it starts a new strip. Spans with clamped X
    /// ranges go to the separate imprecise list.
    fn emit_band(
        &mut self,
        mut current: u32,
        last_strip: &mut u32,
        mut merge_candidate: u32,
        last_imprecise: &mut u32,
        top_y: i32,
        bottom_y: i32,
    ) -> u32 {
        debug_assert!(merge_candidate == NIL || self.strips[merge_candidate].bottom_y == top_y);

        if current == NIL {
            return NIL;
        }

        let mut min_top_x = self.next_top_x(current, bottom_y);
        self.tree.edges[current].next_top_x = min_top_x;

        let mut band_start = NIL;
        let mut top_left_x = 0;
        let mut bottom_left_x = 0;
        let mut left_slope = 0.0f32;
        let mut imprecise_left = false;
        let mut has_left_side = false;
        let mut fill_level = 0;
        let mut reset_imprecise = true;
        let mut imprecise = false;

        while current != NIL || fill_level != 0 {
            debug_assert!(current == NIL || bottom_y <= self.tree.edges[current].bottom_y);

            if reset_imprecise {
                imprecise = false;
            }
            reset_imprecise = true;

            let top_x;
            let mut bottom_x;
            let slope;
            if current != NIL {
                let edge = self.tree.edges[current];
                top_x = edge.top_x;
                bottom_x = edge.next_top_x;
                slope = edge.slope;

                // bottom X values must not decrease across the band
                if bottom_x < min_top_x {
                    bottom_x = min_top_x;
                    imprecise = true;
                } else {
                    min_top_x = bottom_x;
                }

                match self.fill_rule {
                    FillRule::NonZero => fill_level += edge.dir,
                    FillRule::EvenOdd => fill_level ^= 1,
                }

                current = edge.next;
                if current != NIL {
                    let next_top_x = self.next_top_x(current, bottom_y);
                    self.tree.edges[current].next_top_x = next_top_x;
                    // coincident boundaries collapse into one
                    if top_x == self.tree.edges[current].top_x && bottom_x >= next_top_x {
                        reset_imprecise = false;
                        continue;
                    }
                }
            } else {
                debug_assert!(has_left_side);
                // close the last span on the clip's right wall
                top_x = self.clip_right;
                bottom_x = self.clip_right;
                slope = 0.0;
                fill_level = 0;
            }

            if !has_left_side {
                if fill_level != 0 {
                    top_left_x = top_x;
                    bottom_left_x = bottom_x;
                    left_slope = slope;
                    imprecise_left = imprecise;
                    has_left_side = true;
                }
            } else if fill_level == 0 {
                has_left_side = false;
                if top_left_x == top_x && bottom_left_x == bottom_x {
                    // zero area
                    continue;
                }

                if imprecise_left || imprecise {
                    let strip = self.new_strip(
                        top_y,
                        top_left_x,
                        top_x,
                        bottom_y,
                        bottom_left_x,
                        bottom_x,
                        left_slope,
                        slope,
                        *last_imprecise,
                    );
                    *last_imprecise = strip;
                    continue;
                }

                let mut merge_with = NIL;
                while merge_candidate != NIL {
                    let candidate = self.strips[merge_candidate];
                    if candidate.bottom_y != top_y {
                        merge_candidate = NIL;
                        break;
                    }
                    let left_x = candidate.bottom_left_x;
                    if left_x >= top_left_x && left_x != candidate.bottom_right_x {
                        if left_x == top_left_x
                            && candidate.bottom_right_x == top_x
                            && candidate.left_slope == left_slope
                            && candidate.right_slope == slope
                        {
                            merge_with = merge_candidate;
                        }
                        break;
                    }
                    merge_candidate = candidate.next;
                }

                let strip;
                if merge_with != NIL {
                    strip = merge_with;
                    merge_candidate = self.strips[strip].next;
                    self.extend_strip(strip, bottom_y, bottom_left_x, bottom_x, *last_strip);
                } else {
                    strip = self.new_strip(
                        top_y,
                        top_left_x,
                        top_x,
                        bottom_y,
                        bottom_left_x,
                        bottom_x,
                        left_slope,
                        slope,
                        *last_strip,
                    );
                }

                *last_strip = strip;
                if band_start == NIL {
                    band_start = strip;
                }
            }
        }

        debug_assert!(!has_left_side);
        band_start
    }

    /// Run the sweep and hand back the finished list
    pub fn build(mut self) -> TrapezoidList {
        let path = self.path;
        let transform = self.transform;

        let mut shape_first: Option<Point> = None;
        let mut start = Point::default();
        for cmd in path.iter() {
            let end = transform.transform(cmd.end_point());
            match *cmd {
                PathCmd::MoveTo(_) => {
                    if let Some(first) = shape_first {
                        self.insert_line(start, transform.transform(first));
                    }
                    shape_first = Some(cmd.end_point());
                }
                PathCmd::Close(_) => {
                    shape_first = Some(cmd.end_point());
                    self.insert_line(start, end);
                }
                PathCmd::LineTo(_) => {
                    self.insert_line(start, end);
                }
                PathCmd::QuadTo { ctrl, .. } => {
                    self.insert_quad(start, transform.transform(ctrl), end);
                }
                PathCmd::CubicTo { ctrl1, ctrl2, .. } => {
                    self.insert_cubic(
                        start,
                        transform.transform(ctrl1),
                        transform.transform(ctrl2),
                        end,
                    );
                }
                PathCmd::Arc(arc) => {
                    self.insert_arc(start, &arc);
                }
            }
            start = end;
        }
        if let Some(first) = shape_first {
            self.insert_line(start, transform.transform(first));
        }

        let rule = self.fill_rule;
        let mut pending = self.tree.sorted_list(rule);

        if pending == NIL {
            let mut list = TrapezoidList::with_capacity(0);
            list.set_bounds(IntRect::new(
                self.clip_left / SUBSCANLINES,
                self.clip_top / SUBSCANLINES,
                0,
                0,
            ));
            return list;
        }

        let first_strip = self.strips.push(Strip::default());
        let mut last_strip = first_strip;
        let first_imprecise = self.strips.push(Strip::default());
        let mut last_imprecise = first_imprecise;

        let mut band_start = NIL;
        let mut active = NIL;
        let mut top_y = self.tree.edges[pending].top_y;
        let mut bottom_y = top_y;
        let mut bands = 0u32;

        while pending != NIL || active != NIL {
            band_start = self.emit_band(
                active,
                &mut last_strip,
                band_start,
                &mut last_imprecise,
                top_y,
                bottom_y,
            );

            let mut next_bottom_y = self.clip_bottom;
            active = self.update_active_edges(active, &mut pending, bottom_y, &mut next_bottom_y);

            top_y = bottom_y;
            debug_assert!(next_bottom_y > bottom_y || next_bottom_y == self.clip_bottom);
            bottom_y = next_bottom_y;
            bands += 1;
        }

        // imprecise strips go after the precise ones
        let imprecise_head = self.strips[first_imprecise].next;
        self.strips[last_strip].next = imprecise_head;

        let mut list = TrapezoidList::with_capacity(self.strip_count);

        let mut current = self.strips[first_strip].next;
        if current == NIL {
            debug_assert_eq!(self.strip_count, 0);
            list.set_bounds(IntRect::new(
                self.clip_left / SUBSCANLINES,
                self.clip_top / SUBSCANLINES,
                0,
                0,
            ));
            return list;
        }

        {
            let first = self.strips[current];
            if self.strip_count == 1
                && first.top_left_x == first.bottom_left_x
                && first.top_right_x == first.bottom_right_x
            {
                list.set_shape(ShapeType::Rect);
            }
        }

        let mut min_x = self.clip_right;
        let mut min_y = self.clip_bottom;
        let mut max_x = self.clip_left;
        let mut max_y = self.clip_top;

        let scale = SUBSCANLINES as f32;
        while current != NIL {
            let strip = self.strips[current];

            if min_y > strip.top_y {
                min_y = strip.top_y;
            }
            if max_y < strip.bottom_y {
                max_y = strip.bottom_y;
            }
            if min_x > strip.top_left_x {
                min_x = strip.top_left_x;
            }
            if min_x > strip.bottom_left_x {
                min_x = strip.bottom_left_x;
            }
            if max_x < strip.top_right_x {
                max_x = strip.top_right_x;
            }
            if max_x < strip.bottom_right_x {
                max_x = strip.bottom_right_x;
            }

            list.push(Trapezoid {
                top_y: strip.top_y as f32 / scale,
                top_left_x: strip.top_left_x as f32 / scale,
                top_right_x: strip.top_right_x as f32 / scale,
                bottom_y: strip.bottom_y as f32 / scale,
                bottom_left_x: strip.bottom_left_x as f32 / scale,
                bottom_right_x: strip.bottom_right_x as f32 / scale,
            });
            current = strip.next;
        }

        let min_x = min_x.div_euclid(SUBSCANLINES);
        let min_y = min_y.div_euclid(SUBSCANLINES);
        let max_x = (max_x + SUBSCANLINES - 1).div_euclid(SUBSCANLINES);
        let max_y = (max_y + SUBSCANLINES - 1).div_euclid(SUBSCANLINES);
        list.set_bounds(IntRect::new(min_x, min_y, max_x - min_x, max_y - min_y));

        debug!(
            "trapezoidated {} edges into {} trapezoids over {} bands",
            self.tree.edges.len() - 1,
            list.len(),
            bands
        );

        list
    }
}

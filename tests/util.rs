use trapeze::{Trapezoid, TrapezoidList};

/// Area covered by a list, in square device pixels
pub fn area(list: &TrapezoidList) -> f32 {
    list.trapezoids()
        .iter()
        .map(|t| {
            (t.bottom_y - t.top_y)
                * ((t.top_right_x - t.top_left_x) + (t.bottom_right_x - t.bottom_left_x))
                / 2.0
        })
        .sum()
}

/// Left and right X of `t` at scanline `y`
pub fn span_at(t: &Trapezoid, y: f32) -> (f32, f32) {
    let f = (y - t.top_y) / (t.bottom_y - t.top_y);
    (
        t.top_left_x + f * (t.bottom_left_x - t.top_left_x),
        t.top_right_x + f * (t.bottom_right_x - t.top_right_x),
    )
}

/// Every trapezoid has positive height, ordered sides and some area,
/// and sits inside the list's bounding box
pub fn assert_well_formed(list: &TrapezoidList) {
    let bounds = list.bounds();
    let left = bounds.x as f32;
    let right = bounds.right() as f32;
    let top = bounds.y as f32;
    let bottom = bounds.bottom() as f32;

    for (i, t) in list.trapezoids().iter().enumerate() {
        assert!(t.top_y < t.bottom_y, "trapezoid {} has no height: {:?}", i, t);
        assert!(
            t.top_left_x <= t.top_right_x && t.bottom_left_x <= t.bottom_right_x,
            "trapezoid {} has crossed sides: {:?}",
            i,
            t
        );
        assert!(
            t.top_left_x < t.top_right_x || t.bottom_left_x < t.bottom_right_x,
            "trapezoid {} has no area: {:?}",
            i,
            t
        );

        assert!(
            t.top_y >= top && t.bottom_y <= bottom,
            "trapezoid {} leaves the bounds vertically: {:?} vs {:?}",
            i,
            t,
            bounds
        );
        for x in &[t.top_left_x, t.top_right_x, t.bottom_left_x, t.bottom_right_x] {
            assert!(
                *x >= left && *x <= right,
                "trapezoid {} leaves the bounds horizontally: {:?} vs {:?}",
                i,
                t,
                bounds
            );
        }
    }
}

/// No two trapezoids of the list cover the same region
///
/// Pairs with overlapping Y ranges are sampled at interior scanlines;
/// touching boundaries are fine, anything wider than rounding slack fails.
pub fn assert_disjoint(list: &TrapezoidList) {
    let traps = list.trapezoids();
    for i in 0..traps.len() {
        for j in i + 1..traps.len() {
            let top = traps[i].top_y.max(traps[j].top_y);
            let bottom = traps[i].bottom_y.min(traps[j].bottom_y);
            if top >= bottom {
                continue;
            }
            for step in 1..8 {
                let y = top + (bottom - top) * step as f32 / 8.0;
                let a = span_at(&traps[i], y);
                let b = span_at(&traps[j], y);
                let overlap = a.1.min(b.1) - a.0.max(b.0);
                assert!(
                    overlap < 0.08,
                    "trapezoids {} and {} overlap by {} at y={}: {:?} {:?}",
                    i,
                    j,
                    overlap,
                    y,
                    traps[i],
                    traps[j]
                );
            }
        }
    }
}

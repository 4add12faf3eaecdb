use trapeze::{ClipBox, FillRule, IntRect, Path, ShapeType, Transform, Trapezoid, TrapezoidBuilder};

mod util;

fn build(path: &Path, clip: &ClipBox, rule: FillRule) -> trapeze::TrapezoidList {
    TrapezoidBuilder::new(path, clip, &Transform::new(), rule).build()
}

#[test]
fn axis_aligned_rect_is_one_quad() {
    let mut path = Path::new();
    path.rect(10.0, 10.0, 40.0, 30.0);

    let clip = ClipBox::from_size(100, 100);
    let list = build(&path, &clip, FillRule::NonZero);

    assert_eq!(list.len(), 1);
    assert_eq!(list.shape(), ShapeType::Rect);
    assert_eq!(
        list.trapezoids()[0],
        Trapezoid {
            top_y: 10.0,
            top_left_x: 10.0,
            top_right_x: 50.0,
            bottom_y: 40.0,
            bottom_left_x: 10.0,
            bottom_right_x: 50.0,
        }
    );
    assert_eq!(list.bounds(), IntRect::new(10, 10, 40, 30));
    util::assert_well_formed(&list);
}

#[test]
fn bands_merge_back_into_one_quad() {
    // a collinear point on the left side splits the sweep into two bands
    let mut path = Path::new();
    path.move_to(10.0, 10.0);
    path.line_to(10.0, 25.0);
    path.line_to(10.0, 40.0);
    path.line_to(50.0, 40.0);
    path.line_to(50.0, 10.0);
    path.close();

    let clip = ClipBox::from_size(100, 100);
    let list = build(&path, &clip, FillRule::NonZero);

    assert_eq!(list.len(), 1);
    assert_eq!(list.shape(), ShapeType::Rect);
    assert_eq!(
        list.trapezoids()[0],
        Trapezoid {
            top_y: 10.0,
            top_left_x: 10.0,
            top_right_x: 50.0,
            bottom_y: 40.0,
            bottom_left_x: 10.0,
            bottom_right_x: 50.0,
        }
    );
}

#[test]
fn half_pixel_rect_keeps_sub_scanline_precision() {
    let mut path = Path::new();
    path.rect(10.25, 10.25, 4.5, 4.5);

    let clip = ClipBox::from_size(100, 100);
    let list = build(&path, &clip, FillRule::NonZero);

    assert_eq!(list.len(), 1);
    let t = list.trapezoids()[0];
    assert_eq!(t.top_y, 10.25);
    assert_eq!(t.bottom_y, 14.75);
    assert_eq!(t.top_left_x, 10.25);
    assert_eq!(t.top_right_x, 14.75);
    // bounds round outwards to whole pixels
    assert_eq!(list.bounds(), IntRect::new(10, 10, 5, 5));
}

#[test]
fn repeated_runs_are_identical() {
    let mut path = Path::new();
    path.move_to(20.0, 5.0);
    path.line_to(80.0, 35.0);
    path.line_to(45.0, 90.0);
    path.line_to(5.0, 50.0);
    path.close();

    let clip = ClipBox::from_size(100, 100);
    let first = build(&path, &clip, FillRule::NonZero);
    let second = build(&path, &clip, FillRule::NonZero);

    assert_eq!(first.trapezoids(), second.trapezoids());
    assert_eq!(first.bounds(), second.bounds());
    assert_eq!(first.shape(), second.shape());
    util::assert_well_formed(&first);
    util::assert_disjoint(&first);
}

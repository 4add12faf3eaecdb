use trapeze::{ClipBox, FillRule, IntRect, Path, ShapeType, Transform, TrapezoidBuilder, TrapezoidList};

mod util;

fn build(path: &Path, clip: &ClipBox) -> TrapezoidList {
    TrapezoidBuilder::new(path, clip, &Transform::new(), FillRule::NonZero).build()
}

#[test]
fn output_stays_inside_the_clip() {
    let mut path = Path::new();
    path.rect(-100.0, -100.0, 300.0, 300.0);

    let clip = ClipBox::from_size(100, 100);
    let list = build(&path, &clip);

    // a rect swallowing the clip collapses to the clip itself
    assert_eq!(list.len(), 1);
    assert_eq!(list.shape(), ShapeType::Rect);
    assert_eq!(list.bounds(), IntRect::new(0, 0, 100, 100));
    let area = util::area(&list);
    assert!((area - 10000.0).abs() < 0.01, "area {}", area);
}

#[test]
fn left_overhang_keeps_its_winding() {
    // triangle poking out of the left side; the part beyond the boundary
    // collapses onto it without losing the filled region inside
    let mut path = Path::new();
    path.move_to(-30.0, 0.0);
    path.line_to(30.0, 0.0);
    path.line_to(30.0, 60.0);
    path.close();

    let clip = ClipBox::from_size(100, 100);
    let list = build(&path, &clip);

    assert_eq!(list.len(), 2);
    let area = util::area(&list);
    assert!((area - 1350.0).abs() < 0.01, "area {}", area);
    util::assert_well_formed(&list);
    util::assert_disjoint(&list);
}

#[test]
fn geometry_outside_the_clip_is_empty() {
    let clip = ClipBox::from_size(100, 100);

    let mut left = Path::new();
    left.rect(-50.0, 10.0, 20.0, 20.0);
    let list = build(&left, &clip);
    assert!(list.is_empty());
    assert!(list.bounds().is_empty());

    let mut right = Path::new();
    right.rect(150.0, 10.0, 20.0, 20.0);
    assert!(build(&right, &clip).is_empty());

    let mut above = Path::new();
    above.rect(10.0, -50.0, 20.0, 20.0);
    assert!(build(&above, &clip).is_empty());

    let mut below = Path::new();
    below.rect(10.0, 150.0, 20.0, 20.0);
    assert!(build(&below, &clip).is_empty());
}

#[test]
fn degenerate_clip_yields_nothing() {
    let mut path = Path::new();
    path.rect(10.0, 10.0, 40.0, 30.0);

    assert!(build(&path, &ClipBox::from_size(0, 0)).is_empty());

    let flat = ClipBox { x1: 50, y1: 10, x2: 50, y2: 90 };
    assert!(flat.is_empty());
    assert!(build(&path, &flat).is_empty());
}

#[test]
fn oversized_clip_box_passes_everything_through() {
    let mut path = Path::new();
    path.rect(10.0, 10.0, 40.0, 30.0);

    // these bounds overflow an i32 when scaled to sub-scanline units
    let clip = ClipBox {
        x1: -2_000_000_000,
        y1: -2_000_000_000,
        x2: 2_000_000_000,
        y2: 2_000_000_000,
    };
    let list = build(&path, &clip);

    assert_eq!(list.len(), 1);
    assert_eq!(list.shape(), ShapeType::Rect);
    assert_eq!(list.bounds(), IntRect::new(10, 10, 40, 30));
    let area = util::area(&list);
    assert!((area - 1200.0).abs() < 0.01, "area {}", area);
}

#[test]
fn offset_clip_box() {
    let mut path = Path::new();
    path.rect(0.0, 0.0, 100.0, 100.0);

    let clip = ClipBox { x1: 20, y1: 20, x2: 60, y2: 60 };
    let list = build(&path, &clip);

    assert_eq!(list.len(), 1);
    assert_eq!(list.bounds(), IntRect::new(20, 20, 40, 40));
    let area = util::area(&list);
    assert!((area - 1600.0).abs() < 0.01, "area {}", area);

    // an empty result is still anchored at the clip origin
    let mut missing = Path::new();
    missing.rect(150.0, 0.0, 10.0, 10.0);
    let empty = build(&missing, &clip);
    assert!(empty.is_empty());
    assert_eq!(empty.bounds(), IntRect::new(20, 20, 0, 0));
}

use trapeze::{ClipBox, CoverageMap, FillRule, Path, Transform, TrapezoidBuilder, TrapezoidList};

mod util;

fn build(path: &Path) -> TrapezoidList {
    let clip = ClipBox::from_size(100, 100);
    TrapezoidBuilder::new(path, &clip, &Transform::new(), FillRule::NonZero).build()
}

#[test]
fn coverage_sums_to_the_trapezoid_area() {
    let mut path = Path::new();
    path.ellipse(50.0, 50.0, 30.0, 30.0);
    let list = build(&path);

    let mut map = CoverageMap::new(100, 100);
    map.draw(&list);

    let covered: f64 = map.data().iter().map(|&v| v as f64 / 255.0).sum();
    let area = util::area(&list) as f64;
    assert!(
        (covered - area).abs() < 40.0,
        "covered {} vs area {}",
        covered,
        area
    );
}

#[test]
fn round_trips_through_png() {
    let mut path = Path::new();
    path.rect(12.0, 8.0, 40.0, 25.5);
    let list = build(&path);

    let mut map = CoverageMap::new(64, 48);
    map.draw(&list);

    let file = std::env::temp_dir().join("trapeze_coverage_roundtrip.png");
    map.write_file(&file).unwrap();
    let back = CoverageMap::read_file(&file).unwrap();
    std::fs::remove_file(&file).ok();

    assert_eq!(back.width(), 64);
    assert_eq!(back.height(), 48);
    assert_eq!(back.data(), map.data());
}

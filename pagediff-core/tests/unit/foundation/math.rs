use super::*;

fn r(x: f64, y: f64, w: f64, h: f64) -> Rect {
    Rect::new(x, y, x + w, y + h)
}

#[test]
fn touching_edges_do_not_intersect() {
    assert!(!intersects(r(0.0, 0.0, 10.0, 10.0), r(10.0, 0.0, 5.0, 5.0)));
    assert!(intersects(r(0.0, 0.0, 10.0, 10.0), r(9.0, 9.0, 5.0, 5.0)));
}

#[test]
fn near_respects_per_axis_margin() {
    let margin = Size::new(5.0, 50.0);
    let a = r(0.0, 0.0, 10.0, 10.0);
    // 4px gap horizontally: inside the 5px margin.
    assert!(near(a, r(14.0, 0.0, 10.0, 10.0), margin));
    // 6px gap horizontally: outside it.
    assert!(!near(a, r(16.0, 0.0, 10.0, 10.0), margin));
    // 40px gap vertically: inside the 50px margin.
    assert!(near(a, r(0.0, 50.0, 10.0, 10.0), margin));
}

#[test]
fn near_is_symmetric() {
    let margin = Size::new(40.0, 200.0);
    let cases = [
        (r(0.0, 0.0, 10.0, 10.0), r(45.0, 0.0, 3.0, 3.0)),
        (r(0.0, 0.0, 10.0, 10.0), r(55.0, 0.0, 3.0, 3.0)),
        (r(100.0, 300.0, 1.0, 1.0), r(60.0, 99.0, 1.0, 1.0)),
        (r(5.0, 5.0, 100.0, 2.0), r(0.0, 500.0, 300.0, 300.0)),
    ];
    for (a, b) in cases {
        assert_eq!(near(a, b, margin), near(b, a, margin), "{a:?} vs {b:?}");
    }
}

#[test]
fn union_contains_both_inputs() {
    let a = r(3.0, 8.0, 4.0, 4.0);
    let b = r(20.0, 1.0, 2.0, 30.0);
    let u = union(a, b);
    assert_eq!(u.union(a), u);
    assert_eq!(u.union(b), u);
    assert_eq!(u, Rect::new(3.0, 1.0, 22.0, 31.0));
}

#[test]
fn min_size_keeps_origin_and_only_grows() {
    let floor = Size::new(20.0, 20.0);
    assert_eq!(
        min_size(r(7.0, 9.0, 3.0, 40.0), floor),
        r(7.0, 9.0, 20.0, 40.0)
    );
    assert_eq!(
        min_size(r(7.0, 9.0, 30.0, 40.0), floor),
        r(7.0, 9.0, 30.0, 40.0)
    );
}

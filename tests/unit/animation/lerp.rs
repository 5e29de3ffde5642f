use super::*;

#[test]
fn rect_lerp_hits_endpoints_and_midpoint() {
    let a = Rect::from_origin_size((320.0, 0.0), (160.0, 480.0));
    let b = Rect::from_origin_size((160.0, 0.0), (160.0, 480.0));
    assert_eq!(<Rect as Lerp>::lerp(&a, &b, 0.0), a);
    assert_eq!(<Rect as Lerp>::lerp(&a, &b, 1.0), b);
    let mid = <Rect as Lerp>::lerp(&a, &b, 0.5);
    assert_eq!(mid.x0, 240.0);
    assert_eq!(mid.width(), 160.0);
}

#[test]
fn transform_lerp_interpolates_rotation_linearly() {
    let frame = Rect::new(0.0, 0.0, 192.0, 288.0);
    let settled = Transform2D::about_center(frame);
    let collapsed = settled.scaled_rotated(0.001, 0.001, 8.0 * std::f64::consts::PI);

    let quarter = Transform2D::lerp(&collapsed, &settled, 0.75);
    assert!((quarter.rotation_rad - 2.0 * std::f64::consts::PI).abs() < 1e-9);
    assert!((quarter.scale.x - (0.001 + 0.999 * 0.75)).abs() < 1e-12);
    assert_eq!(quarter.pivot, settled.pivot);
    assert_eq!(Transform2D::lerp(&collapsed, &settled, 1.0), settled);
}

#[test]
fn point_lerp_is_exact_at_ends() {
    let a = Point::new(0.1, 0.7);
    let b = Point::new(96.0, 144.0);
    assert_eq!(<Point as Lerp>::lerp(&a, &b, 0.0), a);
    assert_eq!(<Point as Lerp>::lerp(&a, &b, 1.0), b);
}

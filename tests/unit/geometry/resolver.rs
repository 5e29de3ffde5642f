use super::*;
use crate::foundation::core::Point;

fn container() -> Rect {
    Rect::new(0.0, 0.0, 320.0, 480.0)
}

#[test]
fn drawer_keeps_the_unscaled_axis() {
    let c = Size::new(333.0, 517.0);
    for ratio in [0.0, 0.25, 0.5, 0.99, 7.0] {
        for side in [Side::Left, Side::Right] {
            let s = GeometryResolver::target_size(&PresentationStyle::drawer(side, ratio), c);
            assert_eq!(s.height, c.height);
            assert_eq!(s.width, (c.width * clamp_ratio(ratio)).floor());
        }
        for side in [Side::Top, Side::Bottom] {
            let s = GeometryResolver::target_size(&PresentationStyle::drawer(side, ratio), c);
            assert_eq!(s.width, c.width);
            assert_eq!(s.height, (c.height * clamp_ratio(ratio)).floor());
        }
    }
}

#[test]
fn drawer_frames_are_anchored_to_their_side() {
    let f = |side| {
        GeometryResolver::presented_frame(&PresentationStyle::drawer(side, 0.25), container())
    };
    assert_eq!(f(Side::Left), Rect::new(0.0, 0.0, 80.0, 480.0));
    assert_eq!(f(Side::Right), Rect::new(240.0, 0.0, 320.0, 480.0));
    assert_eq!(f(Side::Top), Rect::new(0.0, 0.0, 320.0, 120.0));
    assert_eq!(f(Side::Bottom), Rect::new(0.0, 360.0, 320.0, 480.0));
}

#[test]
fn right_drawer_dismissed_frame_round_trips() {
    let presented =
        GeometryResolver::presented_frame(&PresentationStyle::DEFAULT_DRAWER, container());
    assert_eq!(presented, Rect::from_origin_size((160.0, 0.0), (160.0, 480.0)));

    let dismissed = GeometryResolver::dismissed_frame(presented, Side::Right);
    assert_eq!(dismissed, Rect::from_origin_size((320.0, 0.0), (160.0, 480.0)));
    assert_eq!(offset_frame(dismissed, Vec2::new(-160.0, 0.0)), presented);
}

#[test]
fn dismissed_frames_leave_the_container() {
    let bounds = container();
    for side in Side::ALL {
        let presented =
            GeometryResolver::presented_frame(&PresentationStyle::drawer(side, 0.4), bounds);
        let dismissed = GeometryResolver::dismissed_frame(presented, side);
        assert_eq!(dismissed.size(), presented.size());
        assert!(dismissed.intersect(bounds).area() == 0.0, "{side:?}");
    }
}

#[test]
fn form_sheet_is_centered() {
    let frame =
        GeometryResolver::presented_frame(&PresentationStyle::DEFAULT_FORM_SHEET, container());
    assert_eq!(frame.size(), Size::new(192.0, 288.0));
    assert_eq!(frame.origin(), Point::new(64.0, 96.0));
}

#[test]
fn form_sheet_ratios_are_clamped_independently() {
    let style = PresentationStyle::form_sheet(5.0, 0.0, AnimationStyle::ExpandFromCenter);
    let size = GeometryResolver::target_size(&style, Size::new(320.0, 480.0));
    assert_eq!(size, Size::new(320.0, 48.0));
}

#[test]
fn presented_frame_follows_container_origin() {
    let bounds = Rect::from_origin_size((10.0, 20.0), (320.0, 480.0));
    let frame = GeometryResolver::presented_frame(&PresentationStyle::DEFAULT_DRAWER, bounds);
    assert_eq!(frame.origin(), Point::new(170.0, 20.0));
}

#[test]
fn left_slide_travels_full_container_width() {
    let presented = Rect::from_origin_size((80.0, 0.0), (160.0, 480.0));
    let offsets = GeometryResolver::slide_offset_frames(presented, Side::Left, 0.5);
    assert_eq!(offsets.dismissed.x0, 80.0 - 320.0);
    assert_eq!(offsets.opposite.x0, 80.0 + 320.0);
    assert_eq!(offsets.dismissed.y0, 0.0);
    assert_eq!(offsets.opposite.size(), presented.size());
}

#[test]
fn vertical_slide_uses_clamped_ratio() {
    let presented = Rect::from_origin_size((0.0, 100.0), (320.0, 20.0));
    let offsets = GeometryResolver::slide_offset_frames(presented, Side::Bottom, 0.0);
    assert_eq!(offsets.dismissed.y0, 100.0 + 200.0);
    assert_eq!(offsets.opposite.y0, 100.0 - 200.0);
}

#[test]
fn slide_offsets_pick_the_axis_ratio() {
    let style = PresentationStyle::form_sheet(
        0.5,
        0.25,
        AnimationStyle::Slide {
            dismiss_opposite: false,
            side: Side::Top,
        },
    );
    let presented = GeometryResolver::presented_frame(&style, container());
    let offsets = GeometryResolver::slide_offsets_for(&style, presented).unwrap();
    assert_eq!(offsets.dismissed.y0, presented.y0 - 480.0);
    assert_eq!(offsets.opposite.y0, presented.y0 + 480.0);
}

#[test]
fn mismatched_styles_are_contract_violations() {
    let presented = Rect::new(0.0, 0.0, 10.0, 10.0);
    let err = GeometryResolver::slide_offsets_for(&PresentationStyle::DEFAULT_DRAWER, presented)
        .unwrap_err();
    assert!(err.is_contract());
    let err = GeometryResolver::slide_offsets_for(&PresentationStyle::DEFAULT_FORM_SHEET, presented)
        .unwrap_err();
    assert!(err.is_contract());
    let err =
        GeometryResolver::dismissed_frame_for(&PresentationStyle::DEFAULT_FORM_SHEET, presented)
            .unwrap_err();
    assert!(err.is_contract());
}

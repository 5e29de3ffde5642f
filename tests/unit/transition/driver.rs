use std::collections::BTreeMap;

use super::*;
use crate::{
    animation::scheduler::ManualScheduler,
    foundation::core::{Point, Size},
    host::headless::{HeadlessHost, HostTransition},
    host::protocol::SurfaceTree,
    style::model::Side,
};

const STEP: Duration = Duration::from_millis(16);

struct Fixture {
    host: Rc<RefCell<HeadlessHost>>,
    presenting: SurfaceId,
    presented: SurfaceId,
    presented_frame: Rect,
}

fn fixture(style: &PresentationStyle, direction: TransitionDirection) -> Fixture {
    let mut host = HeadlessHost::new(Size::new(320.0, 480.0));
    let container = host.container();
    let bounds = host.bounds(container);
    let presenting = host.create_surface(bounds);
    host.add_child(container, presenting);
    let presented = host.create_surface(Rect::ZERO);
    let presented_frame = GeometryResolver::presented_frame(style, bounds);

    let mut final_frames = BTreeMap::new();
    final_frames.insert(presented, presented_frame);
    let transition = match direction {
        TransitionDirection::Presenting => HostTransition {
            outgoing: Some(presenting),
            incoming: Some(presented),
            final_frames,
        },
        TransitionDirection::Dismissing => {
            host.add_child(container, presented);
            host.set_frame(presented, presented_frame);
            HostTransition {
                outgoing: Some(presented),
                incoming: Some(presenting),
                final_frames,
            }
        }
    };
    host.begin_transition(transition);

    Fixture {
        host: Rc::new(RefCell::new(host)),
        presenting,
        presented,
        presented_frame,
    }
}

fn run(style: PresentationStyle, direction: TransitionDirection) -> (Fixture, TransitionHandle) {
    let fx = fixture(&style, direction);
    let mut scheduler = ManualScheduler::new();
    let handle = TransitionDriver::new(direction, style)
        .run(&fx.host, &mut scheduler)
        .unwrap();
    assert_eq!(handle.state(), DriverState::Animating);
    scheduler.run_to_completion(STEP, &*fx.host);
    assert!(handle.is_completed());
    (fx, handle)
}

#[test]
fn duration_is_fixed() {
    let driver = TransitionDriver::presenting(PresentationStyle::DEFAULT_DRAWER);
    assert_eq!(driver.duration(), Duration::from_millis(500));
    assert_eq!(driver.state(), DriverState::Idle);
    assert!(driver.is_presentation());
}

#[test]
fn presenting_drawer_slides_in_from_its_side() {
    let style = PresentationStyle::DEFAULT_DRAWER;
    let fx = fixture(&style, TransitionDirection::Presenting);
    let mut scheduler = ManualScheduler::new();
    let handle = TransitionDriver::presenting(style)
        .run(&fx.host, &mut scheduler)
        .unwrap();

    {
        let host = fx.host.borrow();
        let container = host.container();
        assert_eq!(host.children(container).last(), Some(&fx.presented));
        assert_eq!(
            host.frame(fx.presented),
            Rect::from_origin_size((320.0, 0.0), (160.0, 480.0))
        );
        assert!(host.completions().is_empty());
    }

    scheduler.advance(Duration::from_millis(250), &*fx.host);
    let mid = fx.host.borrow().frame(fx.presented);
    assert!(mid.x0 > 160.0 && mid.x0 < 320.0);

    scheduler.run_to_completion(STEP, &*fx.host);
    let host = fx.host.borrow();
    assert_eq!(host.frame(fx.presented), fx.presented_frame);
    assert_eq!(host.completions(), &[true]);
    assert!(host.is_child_of(fx.presenting, host.container()));
    assert!(handle.is_completed());
}

#[test]
fn dismissing_drawer_exits_and_removes_outgoing() {
    let style = PresentationStyle::drawer(Side::Bottom, 0.5);
    let (fx, handle) = run(style, TransitionDirection::Dismissing);
    let host = fx.host.borrow();
    assert_eq!(
        host.frame(fx.presented),
        Rect::from_origin_size((0.0, 480.0), (320.0, 240.0))
    );
    assert!(!host.is_child_of(fx.presented, host.container()));
    assert_eq!(handle.plan().remove_on_completion, Some(fx.presented));
    assert_eq!(host.completions(), &[true]);
}

#[test]
fn presenting_never_removes_outgoing() {
    for style in [
        PresentationStyle::DEFAULT_DRAWER,
        PresentationStyle::DEFAULT_FORM_SHEET,
    ] {
        let (fx, handle) = run(style, TransitionDirection::Presenting);
        let host = fx.host.borrow();
        assert!(handle.plan().remove_on_completion.is_none());
        assert!(host.is_child_of(fx.presenting, host.container()));
        assert!(host.is_child_of(fx.presented, host.container()));
    }
}

#[test]
fn expand_from_center_keeps_frame_and_spins_transform() {
    let style = PresentationStyle::DEFAULT_FORM_SHEET;
    let fx = fixture(&style, TransitionDirection::Presenting);
    let mut scheduler = ManualScheduler::new();
    TransitionDriver::presenting(style)
        .run(&fx.host, &mut scheduler)
        .unwrap();

    assert_eq!(
        fx.host.borrow().transform(fx.presented),
        collapsed_transform(fx.presented_frame)
    );
    assert_eq!(fx.host.borrow().frame(fx.presented), fx.presented_frame);

    scheduler.advance(Duration::from_millis(100), &*fx.host);
    {
        let host = fx.host.borrow();
        let t = host.transform(fx.presented);
        assert!(t.rotation_rad < EXPAND_ROTATION_RAD);
        assert!(t.rotation_rad > 0.0);
        assert_eq!(host.frame(fx.presented), fx.presented_frame);
    }

    scheduler.run_to_completion(STEP, &*fx.host);
    let settled = fx.host.borrow().transform(fx.presented);
    assert!(settled.is_identity());
    assert_eq!(settled, Transform2D::about_center(fx.presented_frame));
}

#[test]
fn collapsed_sheet_spins_about_its_own_center() {
    let style = PresentationStyle::DEFAULT_FORM_SHEET;
    let fx = fixture(&style, TransitionDirection::Presenting);
    let mut scheduler = ManualScheduler::new();
    let handle = TransitionDriver::presenting(style)
        .run(&fx.host, &mut scheduler)
        .unwrap();

    let frame = fx.presented_frame;
    let local_center = Point::new(frame.width() / 2.0, frame.height() / 2.0);
    let AnimatedProperty::Transform { from, to } = handle.plan().property else {
        panic!("expand-from-center animates a transform");
    };
    for t in [from, to] {
        let mapped = t.to_affine() * local_center;
        assert!((mapped - local_center).hypot() < 1e-9, "{mapped:?}");
    }

    let collapsed = fx.host.borrow().visual_bounds(fx.presented);
    assert!((collapsed.center() - frame.center()).hypot() < 1e-9);
    assert!(collapsed.width() < 1.0 && collapsed.height() < 1.0);

    scheduler.advance(Duration::from_millis(100), &*fx.host);
    let growing = fx.host.borrow().visual_bounds(fx.presented);
    assert!((growing.center() - frame.center()).hypot() < 1e-9);
    assert!(growing.width() > collapsed.width());
}

#[test]
fn expand_from_center_dismissal_collapses() {
    let (fx, handle) = run(
        PresentationStyle::DEFAULT_FORM_SHEET,
        TransitionDirection::Dismissing,
    );
    let host = fx.host.borrow();
    let collapsed = collapsed_transform(fx.presented_frame);
    assert_eq!(host.transform(fx.presented), collapsed);
    assert_eq!(host.frame(fx.presented), fx.presented_frame);
    assert_eq!(
        handle.plan().property,
        AnimatedProperty::Transform {
            from: Transform2D::about_center(fx.presented_frame),
            to: collapsed,
        }
    );
}

fn slide(dismiss_opposite: bool) -> PresentationStyle {
    PresentationStyle::form_sheet(
        0.5,
        0.5,
        AnimationStyle::Slide {
            dismiss_opposite,
            side: Side::Left,
        },
    )
}

#[test]
fn slide_presents_from_its_side() {
    let (fx, handle) = run(slide(true), TransitionDirection::Presenting);
    assert_eq!(fx.presented_frame.x0, 80.0);
    assert_eq!(handle.plan().initial_frame.x0, 80.0 - 320.0);
    assert_eq!(fx.host.borrow().frame(fx.presented), fx.presented_frame);
}

#[test]
fn slide_dismissal_honours_dismiss_opposite() {
    let (fx, _) = run(slide(true), TransitionDirection::Dismissing);
    assert_eq!(fx.host.borrow().frame(fx.presented).x0, 80.0 + 320.0);

    let (fx, _) = run(slide(false), TransitionDirection::Dismissing);
    assert_eq!(fx.host.borrow().frame(fx.presented).x0, 80.0 - 320.0);
}

#[test]
fn non_animating_surface_is_untouched() {
    let (fx, _) = run(PresentationStyle::DEFAULT_DRAWER, TransitionDirection::Presenting);
    let host = fx.host.borrow();
    assert_eq!(host.frame(fx.presenting), Rect::new(0.0, 0.0, 320.0, 480.0));
    assert!(host.transform(fx.presenting).is_identity());
}

#[test]
fn missing_incoming_surface_aborts_before_mutation() {
    let host = Rc::new(RefCell::new(HeadlessHost::new(Size::new(320.0, 480.0))));
    host.borrow_mut().begin_transition(HostTransition::default());
    let mut scheduler = ManualScheduler::new();

    let err = match TransitionDriver::presenting(PresentationStyle::DEFAULT_DRAWER)
        .run(&host, &mut scheduler)
    {
        Ok(_) => panic!("expected a contract violation"),
        Err(e) => e,
    };
    assert!(err.is_contract());
    assert!(scheduler.history().is_empty());
    let host = host.borrow();
    assert!(host.children(host.container()).is_empty());
    assert!(host.completions().is_empty());
}

#[test]
fn missing_outgoing_surface_aborts_dismissal() {
    let host = Rc::new(RefCell::new(HeadlessHost::new(Size::new(320.0, 480.0))));
    let mut scheduler = ManualScheduler::new();
    let err = TransitionDriver::dismissing(PresentationStyle::DEFAULT_FORM_SHEET)
        .plan(&*host.borrow())
        .unwrap_err();
    assert!(err.is_contract());
    assert!(scheduler.is_idle());
    scheduler.run_to_completion(STEP, &*host);
    assert!(host.borrow().completions().is_empty());
}

#[test]
fn stalled_scheduler_leaves_transition_animating() {
    let style = PresentationStyle::DEFAULT_DRAWER;
    let fx = fixture(&style, TransitionDirection::Dismissing);
    let mut scheduler = ManualScheduler::new();
    let handle = TransitionDriver::dismissing(style)
        .run(&fx.host, &mut scheduler)
        .unwrap();
    scheduler.advance(Duration::from_millis(499), &*fx.host);
    assert_eq!(handle.state(), DriverState::Animating);
    assert!(fx.host.borrow().completions().is_empty());
    scheduler.advance(Duration::from_millis(1), &*fx.host);
    assert!(handle.is_completed());
    assert_eq!(fx.host.borrow().completions(), &[true]);
}

#[test]
fn request_carries_tuned_spring() {
    let fx = fixture(&PresentationStyle::DEFAULT_DRAWER, TransitionDirection::Presenting);
    let mut scheduler = ManualScheduler::new();
    TransitionDriver::presenting(PresentationStyle::DEFAULT_DRAWER)
        .run(&fx.host, &mut scheduler)
        .unwrap();
    let req = scheduler.history()[0];
    assert_eq!(req.surface, fx.presented);
    assert_eq!(req.duration, Duration::from_millis(500));
    assert_eq!(req.spring, SpringParams::default());
    assert_eq!(req.options, AnimationOptions::INTERACTIVE);
}

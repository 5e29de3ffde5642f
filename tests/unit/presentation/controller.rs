use super::*;
use crate::{
    host::headless::{HeadlessHost, HostEvent, QueuedCoordinator},
    style::model::{AnimationStyle, Side},
};

fn setup(style: PresentationStyle) -> (HeadlessHost, PresentationLifecycleController) {
    let mut host = HeadlessHost::new(Size::new(320.0, 480.0));
    let container = host.container();
    let bounds = host.bounds(container);
    let presenting = host.create_surface(bounds);
    host.add_child(container, presenting);
    let presented = host.create_surface(Rect::ZERO);
    host.add_child(container, presented);
    let overlay = host.create_surface(Rect::ZERO);
    let controller = PresentationLifecycleController::new(
        style,
        PresentationSurfaces {
            presenting,
            presented,
            container,
            overlay,
        },
    );
    (host, controller)
}

#[test]
fn instant_fallback_fades_overlay_in_and_out() {
    let (mut host, mut c) = setup(PresentationStyle::DEFAULT_DRAWER);
    let s = c.surfaces();

    c.presentation_transition_will_begin(&mut host, None);
    assert_eq!(host.opacity(s.overlay), 1.0);
    assert_eq!(host.children(s.container)[0], s.overlay);
    assert_eq!(host.frame(s.overlay), Rect::new(0.0, 0.0, 320.0, 480.0));
    c.presentation_transition_did_end(&mut host, true);
    assert_eq!(c.phase(), SessionPhase::Presented);

    c.dismissal_transition_will_begin(&mut host, None);
    assert_eq!(host.opacity(s.overlay), 0.0);
    c.dismissal_transition_did_end(&mut host, true);
    assert!(!host.is_child_of(s.overlay, s.container));
    assert_eq!(c.phase(), SessionPhase::Dismissed);
}

#[test]
fn coordinator_path_reaches_same_opacity() {
    let (mut host, mut c) = setup(PresentationStyle::DEFAULT_FORM_SHEET);
    let overlay = c.surfaces().overlay;

    let mut coordinator = QueuedCoordinator::new();
    c.presentation_transition_will_begin(&mut host, Some(&mut coordinator));
    assert_eq!(host.opacity(overlay), 0.0);
    assert_eq!(coordinator.pending(), 1);
    coordinator.finish(&mut host, true);
    assert_eq!(host.opacity(overlay), 1.0);

    let mut coordinator = QueuedCoordinator::new();
    c.dismissal_transition_will_begin(&mut host, Some(&mut coordinator));
    assert_eq!(host.opacity(overlay), 1.0);
    coordinator.finish(&mut host, true);
    assert_eq!(host.opacity(overlay), 0.0);
}

#[test]
fn aborted_presentation_detaches_overlay() {
    let (mut host, mut c) = setup(PresentationStyle::DEFAULT_DRAWER);
    let s = c.surfaces();
    c.presentation_transition_will_begin(&mut host, None);
    c.presentation_transition_did_end(&mut host, false);
    assert!(!host.is_child_of(s.overlay, s.container));
}

#[test]
fn cancelled_dismissal_keeps_session_presented() {
    let (mut host, mut c) = setup(PresentationStyle::DEFAULT_DRAWER);
    let s = c.surfaces();
    c.presentation_transition_will_begin(&mut host, None);
    c.dismissal_transition_will_begin(&mut host, None);
    c.dismissal_transition_did_end(&mut host, false);
    assert_eq!(c.phase(), SessionPhase::Presented);
    assert!(host.is_child_of(s.overlay, s.container));
}

#[test]
fn layout_follows_container_resizes() {
    let (mut host, mut c) = setup(PresentationStyle::DEFAULT_DRAWER);
    let s = c.surfaces();
    c.container_will_layout_subviews(&mut host);
    assert_eq!(host.frame(s.presented), Rect::new(160.0, 0.0, 320.0, 480.0));

    host.resize_container(Size::new(480.0, 320.0));
    c.container_will_layout_subviews(&mut host);
    assert_eq!(host.frame(s.presented), Rect::new(240.0, 0.0, 480.0, 320.0));
    assert_eq!(host.frame(s.overlay), Rect::new(0.0, 0.0, 480.0, 320.0));
    assert_eq!(
        c.frame_of_presented_view_in_container_view(&host),
        host.frame(s.presented)
    );
}

#[test]
fn child_content_size_matches_target_size() {
    let (_, c) = setup(PresentationStyle::drawer(Side::Top, 0.25));
    assert_eq!(
        c.size_for_child_content_container(Size::new(320.0, 480.0)),
        Size::new(320.0, 120.0)
    );
}

#[test]
fn adaptive_fallback_only_for_full_screen_drawers() {
    let full = PresentationStyle::Drawer {
        side: Side::Left,
        phone_wants_full_screen: true,
        screen_ratio: 0.3,
    };
    let (_, c) = setup(full);
    assert_eq!(c.adaptive_style_fallback(), AdaptiveStyle::ForceFullScreenOverlay);
    assert_eq!(
        c.adaptive_presentation_style(SizeClass::Compact).modal_style(),
        Some(ModalPresentationStyle::OverFullScreen)
    );
    assert_eq!(
        c.adaptive_presentation_style(SizeClass::Regular),
        AdaptiveStyle::Unchanged
    );

    for style in [
        PresentationStyle::DEFAULT_DRAWER,
        PresentationStyle::DEFAULT_FORM_SHEET,
        PresentationStyle::form_sheet(
            0.5,
            0.5,
            AnimationStyle::Slide {
                dismiss_opposite: true,
                side: Side::Bottom,
            },
        ),
    ] {
        let (_, c) = setup(style);
        assert_eq!(c.adaptive_style_fallback(), AdaptiveStyle::Unchanged);
        assert_eq!(c.adaptive_style_fallback().modal_style(), None);
    }
}

#[test]
fn always_presents_in_full_screen_container() {
    let (_, c) = setup(PresentationStyle::DEFAULT_FORM_SHEET);
    assert!(c.should_present_in_fullscreen());
}

#[test]
fn overlay_tap_requests_animated_dismissal() {
    let (mut host, c) = setup(PresentationStyle::DEFAULT_FORM_SHEET);
    c.overlay_tapped(&mut host);
    assert_eq!(
        host.events(),
        &[HostEvent::DismissRequested {
            presenting: c.surfaces().presenting,
            animated: true,
        }]
    );
}

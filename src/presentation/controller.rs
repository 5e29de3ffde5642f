//! Container-level concerns of one presentation session: the dimming overlay,
//! layout of the presented surface on every container pass, size negotiation
//! and adaptive fallback.

use crate::{
    foundation::core::{Rect, Size, SurfaceId},
    geometry::resolver::GeometryResolver,
    host::protocol::{
        AlongsideUpdate, ModalPresentationStyle, PresentationHost, SizeClass, SurfaceTree,
        TransitionCoordinator,
    },
    style::model::PresentationStyle,
};

/// Alpha of the black tint the host paints the overlay with.
pub const DIMMING_TINT_ALPHA: f64 = 0.4;

/// Surfaces a presentation session works with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PresentationSurfaces {
    /// Surface the modal is presented over.
    pub presenting: SurfaceId,
    /// The modal surface itself.
    pub presented: SurfaceId,
    /// Container both live in while presented.
    pub container: SurfaceId,
    /// Host surface used as the dimming overlay.
    pub overlay: SurfaceId,
}

/// Outcome of adapting to a size-class change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdaptiveStyle {
    /// Keep the custom presentation.
    Unchanged,
    /// Let the host present full screen instead.
    ForceFullScreenOverlay,
}

impl AdaptiveStyle {
    /// Host presentation mode to switch to, if any.
    pub fn modal_style(self) -> Option<ModalPresentationStyle> {
        match self {
            Self::Unchanged => None,
            Self::ForceFullScreenOverlay => Some(ModalPresentationStyle::OverFullScreen),
        }
    }
}

/// Where a presentation session is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    /// No transition has started.
    Created,
    /// Presenting transition in flight.
    Presenting,
    /// On screen.
    Presented,
    /// Dismissing transition in flight.
    Dismissing,
    /// Off screen, overlay detached.
    Dismissed,
}

/// Presentation-controller protocol the host drives.
pub trait PresentationController {
    /// The presenting transition is about to start.
    fn presentation_transition_will_begin(
        &mut self,
        tree: &mut dyn SurfaceTree,
        coordinator: Option<&mut dyn TransitionCoordinator>,
    );
    /// The presenting transition ended; `completed` is `false` when aborted.
    fn presentation_transition_did_end(&mut self, tree: &mut dyn SurfaceTree, completed: bool);
    /// The dismissing transition is about to start.
    fn dismissal_transition_will_begin(
        &mut self,
        tree: &mut dyn SurfaceTree,
        coordinator: Option<&mut dyn TransitionCoordinator>,
    );
    /// The dismissing transition ended; `completed` is `false` when cancelled.
    fn dismissal_transition_did_end(&mut self, tree: &mut dyn SurfaceTree, completed: bool);
    /// The container is about to lay out its children.
    fn container_will_layout_subviews(&mut self, tree: &mut dyn SurfaceTree);
    /// Size the presented content should take inside `parent_size`.
    fn size_for_child_content_container(&self, parent_size: Size) -> Size;
    /// Presentation to switch to for the given horizontal size class.
    fn adaptive_presentation_style(&self, horizontal: SizeClass) -> AdaptiveStyle;
    /// Whether the host should present in a full-screen container.
    fn should_present_in_fullscreen(&self) -> bool;
    /// Frame of the presented surface inside the current container.
    fn frame_of_presented_view_in_container_view(&self, tree: &dyn SurfaceTree) -> Rect;
}

/// Overlay and layout owner for one presentation session.
pub struct PresentationLifecycleController {
    style: PresentationStyle,
    surfaces: PresentationSurfaces,
    phase: SessionPhase,
}

impl PresentationLifecycleController {
    /// Controller for a session that has not started yet.
    pub fn new(style: PresentationStyle, surfaces: PresentationSurfaces) -> Self {
        Self {
            style,
            surfaces,
            phase: SessionPhase::Created,
        }
    }

    /// Style of the session.
    pub fn style(&self) -> &PresentationStyle {
        &self.style
    }

    /// Surfaces of the session.
    pub fn surfaces(&self) -> PresentationSurfaces {
        self.surfaces
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Size the overlay to the container, slide it beneath the presented
    /// surface and fade it in.
    #[tracing::instrument(skip_all)]
    pub fn will_begin_presentation(
        &mut self,
        tree: &mut dyn SurfaceTree,
        coordinator: Option<&mut dyn TransitionCoordinator>,
    ) {
        let overlay = self.surfaces.overlay;
        let bounds = tree.bounds(self.surfaces.container);
        tree.set_frame(overlay, bounds);
        tree.set_opacity(overlay, 0.0);
        tree.insert_child(self.surfaces.container, overlay, 0);
        self.phase = SessionPhase::Presenting;
        self.fade_overlay(tree, coordinator, 1.0);
    }

    /// Fade the overlay out.
    #[tracing::instrument(skip_all)]
    pub fn will_begin_dismissal(
        &mut self,
        tree: &mut dyn SurfaceTree,
        coordinator: Option<&mut dyn TransitionCoordinator>,
    ) {
        self.phase = SessionPhase::Dismissing;
        self.fade_overlay(tree, coordinator, 0.0);
    }

    /// Re-derive overlay and presented frames from the current container.
    pub fn layout_subviews(&mut self, tree: &mut dyn SurfaceTree) {
        let bounds = tree.bounds(self.surfaces.container);
        let frame = GeometryResolver::presented_frame(&self.style, bounds);
        tracing::debug!(container = ?bounds, presented = ?frame, "layout pass");
        tree.set_frame(self.surfaces.overlay, bounds);
        tree.set_frame(self.surfaces.presented, frame);
    }

    /// Target size of the presented surface inside `parent_size`.
    pub fn child_content_size(&self, parent_size: Size) -> Size {
        GeometryResolver::target_size(&self.style, parent_size)
    }

    /// Presented frame inside `container_bounds`.
    pub fn presented_frame(&self, container_bounds: Rect) -> Rect {
        GeometryResolver::presented_frame(&self.style, container_bounds)
    }

    /// Only a drawer that asks for it goes full screen on compact widths.
    pub fn adaptive_style_fallback(&self) -> AdaptiveStyle {
        match self.style {
            PresentationStyle::Drawer {
                phone_wants_full_screen: true,
                ..
            } => AdaptiveStyle::ForceFullScreenOverlay,
            PresentationStyle::Drawer { .. } | PresentationStyle::FormSheet { .. } => {
                AdaptiveStyle::Unchanged
            }
        }
    }

    /// Presented content manages its own containment; the host must not clip.
    pub fn should_use_full_screen_container(&self) -> bool {
        true
    }

    /// Tap on the dimming overlay: ask the host for an animated dismissal.
    pub fn overlay_tapped(&self, host: &mut dyn PresentationHost) {
        tracing::debug!(presenting = self.surfaces.presenting.0, "dimming overlay tapped");
        host.dismiss_presented(self.surfaces.presenting, true);
    }

    fn fade_overlay(
        &self,
        tree: &mut dyn SurfaceTree,
        coordinator: Option<&mut dyn TransitionCoordinator>,
        opacity: f64,
    ) {
        let overlay = self.surfaces.overlay;
        let update: AlongsideUpdate =
            Box::new(move |tree: &mut dyn SurfaceTree| tree.set_opacity(overlay, opacity));
        match coordinator {
            Some(coordinator) => coordinator.animate_alongside(update, None),
            None => {
                tracing::warn!(opacity, "no transition coordinator, dimming changed instantly");
                update(tree);
            }
        }
    }

    fn detach_overlay(&self, tree: &mut dyn SurfaceTree) {
        tree.remove_from_parent(self.surfaces.overlay);
    }
}

impl PresentationController for PresentationLifecycleController {
    fn presentation_transition_will_begin(
        &mut self,
        tree: &mut dyn SurfaceTree,
        coordinator: Option<&mut dyn TransitionCoordinator>,
    ) {
        self.will_begin_presentation(tree, coordinator);
    }

    fn presentation_transition_did_end(&mut self, tree: &mut dyn SurfaceTree, completed: bool) {
        if completed {
            self.phase = SessionPhase::Presented;
        } else {
            self.detach_overlay(tree);
            self.phase = SessionPhase::Dismissed;
        }
    }

    fn dismissal_transition_will_begin(
        &mut self,
        tree: &mut dyn SurfaceTree,
        coordinator: Option<&mut dyn TransitionCoordinator>,
    ) {
        self.will_begin_dismissal(tree, coordinator);
    }

    fn dismissal_transition_did_end(&mut self, tree: &mut dyn SurfaceTree, completed: bool) {
        if completed {
            self.detach_overlay(tree);
            self.phase = SessionPhase::Dismissed;
        } else {
            self.phase = SessionPhase::Presented;
        }
    }

    fn container_will_layout_subviews(&mut self, tree: &mut dyn SurfaceTree) {
        self.layout_subviews(tree);
    }

    fn size_for_child_content_container(&self, parent_size: Size) -> Size {
        self.child_content_size(parent_size)
    }

    fn adaptive_presentation_style(&self, horizontal: SizeClass) -> AdaptiveStyle {
        match horizontal {
            SizeClass::Compact => self.adaptive_style_fallback(),
            SizeClass::Regular => AdaptiveStyle::Unchanged,
        }
    }

    fn should_present_in_fullscreen(&self) -> bool {
        self.should_use_full_screen_container()
    }

    fn frame_of_presented_view_in_container_view(&self, tree: &dyn SurfaceTree) -> Rect {
        self.presented_frame(tree.bounds(self.surfaces.container))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/presentation/controller.rs"]
mod tests;

//! In-memory host used by the CLI preview and the test-suite.

use std::{collections::BTreeMap, rc::Rc};

use crate::{
    animation::scheduler::Completion,
    foundation::core::{Point, Rect, Size, SurfaceId, Transform2D},
    host::protocol::{
        AlongsideUpdate, ModalPresentationStyle, PresentationHost, SurfaceTree,
        TransitionContext, TransitionCoordinator,
    },
    presentation::delegate::TransitioningDelegate,
};

/// Everything the headless host remembers about one surface.
#[derive(Clone, Debug)]
pub struct SurfaceState {
    /// Frame in the parent's coordinates.
    pub frame: Rect,
    /// Visual transform applied on top of `frame`.
    pub transform: Transform2D,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Current parent, if attached.
    pub parent: Option<SurfaceId>,
    /// Children, bottom-most first.
    pub children: Vec<SurfaceId>,
}

impl Default for SurfaceState {
    fn default() -> Self {
        Self {
            frame: Rect::ZERO,
            transform: Transform2D::IDENTITY,
            opacity: 1.0,
            parent: None,
            children: Vec::new(),
        }
    }
}

/// Surfaces taking part in the transition the host is currently running.
#[derive(Clone, Debug, Default)]
pub struct HostTransition {
    /// Surface leaving the screen.
    pub outgoing: Option<SurfaceId>,
    /// Surface entering the screen.
    pub incoming: Option<SurfaceId>,
    /// Frames the toolkit wants surfaces to end up in.
    pub final_frames: BTreeMap<SurfaceId, Rect>,
}

/// Modal requests recorded by [`HeadlessHost`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostEvent {
    /// `present` was called.
    Presented {
        /// Surface presenting the modal.
        presenting: SurfaceId,
        /// Surface being presented.
        presented: SurfaceId,
        /// Whether an animated presentation was asked for.
        animated: bool,
    },
    /// `dismiss_presented` was called.
    DismissRequested {
        /// Surface whose modal should go away.
        presenting: SurfaceId,
        /// Whether an animated dismissal was asked for.
        animated: bool,
    },
}

/// In-memory surface tree, transition context and modal host.
pub struct HeadlessHost {
    surfaces: BTreeMap<SurfaceId, SurfaceState>,
    next_id: u64,
    container: SurfaceId,
    transition: Option<HostTransition>,
    completions: Vec<bool>,
    delegates: BTreeMap<SurfaceId, Rc<dyn TransitioningDelegate>>,
    modal_styles: BTreeMap<SurfaceId, ModalPresentationStyle>,
    events: Vec<HostEvent>,
}

impl HeadlessHost {
    /// Host with a single container surface of `container_size`.
    pub fn new(container_size: Size) -> Self {
        let mut host = Self {
            surfaces: BTreeMap::new(),
            next_id: 0,
            container: SurfaceId(0),
            transition: None,
            completions: Vec::new(),
            delegates: BTreeMap::new(),
            modal_styles: BTreeMap::new(),
            events: Vec::new(),
        };
        host.container = host.create_surface(Rect::from_origin_size(Point::ZERO, container_size));
        host
    }

    /// New detached surface laid out in `frame`.
    pub fn create_surface(&mut self, frame: Rect) -> SurfaceId {
        let id = SurfaceId(self.next_id);
        self.next_id += 1;
        self.surfaces.insert(
            id,
            SurfaceState {
                frame,
                ..SurfaceState::default()
            },
        );
        id
    }

    /// The root container surface.
    pub fn container(&self) -> SurfaceId {
        self.container
    }

    /// Change the container size, keeping its origin.
    pub fn resize_container(&mut self, size: Size) {
        let container = self.container;
        let origin = self.frame(container).origin();
        self.set_frame(container, Rect::from_origin_size(origin, size));
    }

    /// Stored state of `surface`.
    pub fn state(&self, surface: SurfaceId) -> Option<&SurfaceState> {
        self.surfaces.get(&surface)
    }

    /// Opacity of `surface`, `1.0` when unknown.
    pub fn opacity(&self, surface: SurfaceId) -> f64 {
        self.surfaces.get(&surface).map_or(1.0, |s| s.opacity)
    }

    /// Children of `parent`, bottom-most first.
    pub fn children(&self, parent: SurfaceId) -> &[SurfaceId] {
        self.surfaces
            .get(&parent)
            .map_or(&[][..], |s| s.children.as_slice())
    }

    /// `true` when `child` is attached directly to `parent`.
    pub fn is_child_of(&self, child: SurfaceId, parent: SurfaceId) -> bool {
        self.surfaces.get(&child).and_then(|s| s.parent) == Some(parent)
    }

    /// Area `surface` visibly covers in its parent once its transform is
    /// applied.
    pub fn visual_bounds(&self, surface: SurfaceId) -> Rect {
        self.transform(surface).visual_bounds(self.frame(surface))
    }

    /// Start a transition; completions of the previous one are forgotten.
    pub fn begin_transition(&mut self, transition: HostTransition) {
        self.completions.clear();
        self.transition = Some(transition);
    }

    /// Completion signals received for the current transition, in order.
    pub fn completions(&self) -> &[bool] {
        &self.completions
    }

    /// Transitioning delegate installed on `surface`.
    pub fn delegate_for(&self, surface: SurfaceId) -> Option<Rc<dyn TransitioningDelegate>> {
        self.delegates.get(&surface).cloned()
    }

    /// Modal presentation style requested for `surface`.
    pub fn modal_style_for(&self, surface: SurfaceId) -> Option<ModalPresentationStyle> {
        self.modal_styles.get(&surface).copied()
    }

    /// Modal requests received so far, oldest first.
    pub fn events(&self) -> &[HostEvent] {
        &self.events
    }

    fn surface_mut(&mut self, surface: SurfaceId) -> &mut SurfaceState {
        self.surfaces.entry(surface).or_default()
    }

    fn detach(&mut self, surface: SurfaceId) {
        let Some(parent) = self.surfaces.get_mut(&surface).and_then(|s| s.parent.take()) else {
            return;
        };
        if let Some(p) = self.surfaces.get_mut(&parent) {
            p.children.retain(|c| *c != surface);
        }
    }
}

impl SurfaceTree for HeadlessHost {
    fn add_child(&mut self, parent: SurfaceId, child: SurfaceId) {
        let index = self.children(parent).len();
        self.insert_child(parent, child, index);
    }

    fn insert_child(&mut self, parent: SurfaceId, child: SurfaceId, index: usize) {
        self.detach(child);
        let siblings = &mut self.surface_mut(parent).children;
        let index = index.min(siblings.len());
        siblings.insert(index, child);
        self.surface_mut(child).parent = Some(parent);
    }

    fn remove_from_parent(&mut self, surface: SurfaceId) {
        self.detach(surface);
    }

    fn bounds(&self, surface: SurfaceId) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.frame(surface).size())
    }

    fn frame(&self, surface: SurfaceId) -> Rect {
        self.surfaces.get(&surface).map_or(Rect::ZERO, |s| s.frame)
    }

    fn set_frame(&mut self, surface: SurfaceId, frame: Rect) {
        self.surface_mut(surface).frame = frame;
    }

    fn transform(&self, surface: SurfaceId) -> Transform2D {
        self.surfaces
            .get(&surface)
            .map_or(Transform2D::IDENTITY, |s| s.transform)
    }

    fn set_transform(&mut self, surface: SurfaceId, transform: Transform2D) {
        self.surface_mut(surface).transform = transform;
    }

    fn set_opacity(&mut self, surface: SurfaceId, opacity: f64) {
        self.surface_mut(surface).opacity = opacity;
    }
}

impl TransitionContext for HeadlessHost {
    fn final_frame(&self, surface: SurfaceId) -> Rect {
        self.transition
            .as_ref()
            .and_then(|t| t.final_frames.get(&surface).copied())
            .unwrap_or_else(|| self.frame(surface))
    }

    fn outgoing_surface(&self) -> Option<SurfaceId> {
        self.transition.as_ref().and_then(|t| t.outgoing)
    }

    fn incoming_surface(&self) -> Option<SurfaceId> {
        self.transition.as_ref().and_then(|t| t.incoming)
    }

    fn container_surface(&self) -> SurfaceId {
        self.container
    }

    fn complete_transition(&mut self, success: bool) {
        tracing::debug!(success, "transition completed");
        self.completions.push(success);
    }
}

impl PresentationHost for HeadlessHost {
    fn set_transitioning_delegate(
        &mut self,
        surface: SurfaceId,
        delegate: Rc<dyn TransitioningDelegate>,
    ) {
        self.delegates.insert(surface, delegate);
    }

    fn set_modal_presentation_style(&mut self, surface: SurfaceId, style: ModalPresentationStyle) {
        self.modal_styles.insert(surface, style);
    }

    fn present(&mut self, presenting: SurfaceId, presented: SurfaceId, animated: bool) {
        self.events.push(HostEvent::Presented {
            presenting,
            presented,
            animated,
        });
    }

    fn dismiss_presented(&mut self, presenting: SurfaceId, animated: bool) {
        self.events.push(HostEvent::DismissRequested {
            presenting,
            animated,
        });
    }
}

/// Coordinator that queues alongside updates until the host transition ends.
#[derive(Default)]
pub struct QueuedCoordinator {
    queued: Vec<(AlongsideUpdate, Option<Completion>)>,
}

impl QueuedCoordinator {
    /// Empty coordinator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of queued updates.
    pub fn pending(&self) -> usize {
        self.queued.len()
    }

    /// Apply every queued update, then report `completed` to their completions.
    pub fn finish(&mut self, tree: &mut dyn SurfaceTree, completed: bool) {
        let queued = std::mem::take(&mut self.queued);
        let mut completions = Vec::new();
        for (update, completion) in queued {
            update(&mut *tree);
            completions.extend(completion);
        }
        for completion in completions {
            completion(completed);
        }
    }
}

impl TransitionCoordinator for QueuedCoordinator {
    fn animate_alongside(&mut self, update: AlongsideUpdate, completion: Option<Completion>) {
        self.queued.push((update, completion));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/headless.rs"]
mod tests;

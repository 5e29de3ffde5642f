//! Capabilities consumed from the host windowing toolkit.
//!
//! Everything here is implemented by the host. The engine only reads and
//! mutates surfaces through these traits, always on the UI thread.

use std::rc::Rc;

use crate::{
    animation::scheduler::Completion,
    foundation::core::{Rect, SurfaceId, Transform2D},
    presentation::delegate::TransitioningDelegate,
};

/// Mutable view of the host's surface hierarchy.
pub trait SurfaceTree {
    /// Append `child` as the topmost child of `parent`.
    fn add_child(&mut self, parent: SurfaceId, child: SurfaceId);
    /// Insert `child` into `parent` at `index` (0 is bottom-most).
    fn insert_child(&mut self, parent: SurfaceId, child: SurfaceId, index: usize);
    /// Detach `surface` from its parent. No-op when detached.
    fn remove_from_parent(&mut self, surface: SurfaceId);

    /// Bounds in the surface's own coordinate space.
    fn bounds(&self, surface: SurfaceId) -> Rect;
    /// Frame in the parent's coordinates.
    fn frame(&self, surface: SurfaceId) -> Rect;
    /// Move or resize `surface`.
    fn set_frame(&mut self, surface: SurfaceId, frame: Rect);
    /// Visual transform of `surface`.
    fn transform(&self, surface: SurfaceId) -> Transform2D;
    /// Replace the visual transform of `surface`.
    fn set_transform(&mut self, surface: SurfaceId, transform: Transform2D);
    /// Set the opacity of `surface`, in `[0, 1]`.
    fn set_opacity(&mut self, surface: SurfaceId, opacity: f64);
}

/// Per-transition capability handed to a transition driver.
///
/// Valid only while that transition runs.
pub trait TransitionContext: SurfaceTree {
    /// Frame the toolkit wants `surface` to end up in.
    fn final_frame(&self, surface: SurfaceId) -> Rect;
    /// Surface leaving the screen, if the toolkit has one.
    fn outgoing_surface(&self) -> Option<SurfaceId>;
    /// Surface entering the screen, if the toolkit has one.
    fn incoming_surface(&self) -> Option<SurfaceId>;
    /// Surface both participants live in during the transition.
    fn container_surface(&self) -> SurfaceId;
    /// Tell the toolkit the transition is over. Called exactly once.
    fn complete_transition(&mut self, success: bool);
}

/// Deferred surface mutation run in step with the host's own transition.
pub type AlongsideUpdate = Box<dyn FnOnce(&mut dyn SurfaceTree)>;

/// Optional host coordinator that animates extra changes alongside a transition.
pub trait TransitionCoordinator {
    /// Run `update` in step with the host transition, then `completion`.
    fn animate_alongside(&mut self, update: AlongsideUpdate, completion: Option<Completion>);
}

/// Horizontal size class of the host environment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeClass {
    /// Phone-width environment.
    Compact,
    /// Anything wider.
    Regular,
}

/// Host modal presentation mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalPresentationStyle {
    /// Geometry and transitions come from the transitioning delegate.
    Custom,
    /// Host-managed full-screen overlay.
    OverFullScreen,
}

/// Modal presentation operations of the host.
pub trait PresentationHost {
    /// Install the delegate that supplies controllers for `surface`.
    fn set_transitioning_delegate(
        &mut self,
        surface: SurfaceId,
        delegate: Rc<dyn TransitioningDelegate>,
    );
    /// Choose how `surface` is presented modally.
    fn set_modal_presentation_style(&mut self, surface: SurfaceId, style: ModalPresentationStyle);
    /// Present `presented` over `presenting`.
    fn present(&mut self, presenting: SurfaceId, presented: SurfaceId, animated: bool);
    /// Dismiss whatever `presenting` currently presents.
    fn dismiss_presented(&mut self, presenting: SurfaceId, animated: bool);
}

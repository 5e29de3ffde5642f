//! modalmotion computes geometry for custom modal presentations and drives
//! their entrance/exit transitions.
//!
//! # Layers
//!
//! 1. **Style**: [`PresentationStyle`] describes a drawer or a form sheet.
//! 2. **Geometry**: [`GeometryResolver`] turns `(style, container)` into a target
//!    size and presented/off-screen frames. Pure and uncached.
//! 3. **Transition**: [`TransitionDriver`] animates one presentation or dismissal
//!    through the host's [`AnimationScheduler`] and signals completion once.
//! 4. **Lifecycle**: [`PresentationLifecycleController`] owns the dimming overlay
//!    and re-lays the presented surface out on every container pass.
//!
//! The host toolkit is reached only through the traits in [`SurfaceTree`],
//! [`TransitionContext`], [`TransitionCoordinator`] and [`PresentationHost`].
//! [`HeadlessHost`] and [`HeadlessSession`] implement them in memory.
//!
//! Everything runs on one UI thread; nothing here is `Send`.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod foundation;
mod geometry;
mod host;
mod presentation;
mod style;
mod transition;

pub use animation::lerp::Lerp;
pub use animation::scheduler::{
    AnimatedProperty, AnimationOptions, AnimationRequest, AnimationScheduler, Completion,
    ManualScheduler, PropertyValue,
};
pub use animation::spring::{
    SPRING_DAMPING, SPRING_INITIAL_VELOCITY, SpringParams, TRANSITION_DURATION,
};
pub use foundation::core::{Affine, Point, Rect, Size, SurfaceId, Transform2D, Vec2, offset_frame};
pub use foundation::error::{ModalError, ModalResult};
pub use geometry::resolver::{GeometryResolver, SlideOffsets};
pub use host::headless::{HeadlessHost, HostEvent, HostTransition, QueuedCoordinator, SurfaceState};
pub use host::protocol::{
    AlongsideUpdate, ModalPresentationStyle, PresentationHost, SizeClass, SurfaceTree,
    TransitionContext, TransitionCoordinator,
};
pub use host::session::{HeadlessSession, SessionSample};
pub use presentation::controller::{
    AdaptiveStyle, DIMMING_TINT_ALPHA, PresentationController, PresentationLifecycleController,
    PresentationSurfaces, SessionPhase,
};
pub use presentation::delegate::{Transitioner, TransitioningDelegate};
pub use presentation::presenter::Presenter;
pub use style::model::{AnimationStyle, PresentationStyle, RATIO_MAX, RATIO_MIN, Side, clamp_ratio};
pub use transition::driver::{
    DriverState, EXPAND_COLLAPSED_SCALE, EXPAND_ROTATION_RAD, TransitionDirection,
    TransitionDriver, TransitionHandle, TransitionPlan, collapsed_transform,
};

//! One-shot entrance/exit animation of a presented surface.
//!
//! A [`TransitionDriver`] is configured once and consumed by
//! [`TransitionDriver::run`], so a driver can never animate twice. All
//! geometry is resolved and validated before the first surface mutation.

use std::{cell::Cell, cell::RefCell, f64::consts::PI, rc::Rc, time::Duration};

use crate::{
    animation::{
        scheduler::{AnimatedProperty, AnimationOptions, AnimationRequest, AnimationScheduler},
        spring::{SpringParams, TRANSITION_DURATION},
    },
    foundation::core::{Rect, SurfaceId, Transform2D},
    foundation::error::{ModalError, ModalResult},
    geometry::resolver::GeometryResolver,
    host::protocol::TransitionContext,
    style::model::{AnimationStyle, PresentationStyle},
};

/// Rotation of a collapsed expand-from-center sheet: four full turns.
pub const EXPAND_ROTATION_RAD: f64 = 8.0 * PI;

/// Scale of a collapsed expand-from-center sheet. Not zero, so the affine
/// stays invertible.
pub const EXPAND_COLLAPSED_SCALE: f64 = 0.001;

/// Which way a transition moves the presented surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionDirection {
    /// The presented surface enters the container.
    Presenting,
    /// The presented surface leaves the container.
    Dismissing,
}

impl TransitionDirection {
    /// `true` for [`TransitionDirection::Presenting`].
    pub fn is_presentation(self) -> bool {
        self == Self::Presenting
    }
}

/// Lifecycle of one transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    /// Configured, not started.
    Idle,
    /// Handed to the scheduler, completion pending.
    Animating,
    /// Completion signalled to the host. Terminal.
    Completed,
}

/// Transform of an expand-from-center sheet laid out in `presented` while it
/// is off screen: shrunk to a dot and turned about the sheet's own center.
pub fn collapsed_transform(presented: Rect) -> Transform2D {
    Transform2D::about_center(presented).scaled_rotated(
        EXPAND_COLLAPSED_SCALE,
        EXPAND_COLLAPSED_SCALE,
        EXPAND_ROTATION_RAD,
    )
}

/// Everything a transition will do, resolved up front.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionPlan {
    /// Direction the plan was resolved for.
    pub direction: TransitionDirection,
    /// Container the incoming surface is appended to.
    pub container: SurfaceId,
    /// Incoming surface to append to the container before animating.
    pub insert: Option<SurfaceId>,
    /// The only surface whose geometry the transition touches.
    pub animating: SurfaceId,
    /// Outgoing surface removed from the container on completion.
    pub remove_on_completion: Option<SurfaceId>,
    /// On-screen frame of the animating surface.
    pub presented_frame: Rect,
    /// Frame assigned before the animation starts.
    pub initial_frame: Rect,
    /// What the scheduler interpolates.
    pub property: AnimatedProperty,
}

/// Single-use driver for one presentation or dismissal.
pub struct TransitionDriver {
    direction: TransitionDirection,
    style: PresentationStyle,
}

impl TransitionDriver {
    /// Driver for `direction`, fully configured up front.
    pub fn new(direction: TransitionDirection, style: PresentationStyle) -> Self {
        Self { direction, style }
    }

    /// Driver that brings a surface presented with `style` on screen.
    pub fn presenting(style: PresentationStyle) -> Self {
        Self::new(TransitionDirection::Presenting, style)
    }

    /// Driver that takes a surface presented with `style` off screen.
    pub fn dismissing(style: PresentationStyle) -> Self {
        Self::new(TransitionDirection::Dismissing, style)
    }

    /// Configured direction.
    pub fn direction(&self) -> TransitionDirection {
        self.direction
    }

    /// `true` when this driver presents.
    pub fn is_presentation(&self) -> bool {
        self.direction.is_presentation()
    }

    /// Configured style.
    pub fn style(&self) -> &PresentationStyle {
        &self.style
    }

    /// An unstarted driver is always idle; running it consumes it.
    pub fn state(&self) -> DriverState {
        DriverState::Idle
    }

    /// Fixed transition length, [`TRANSITION_DURATION`].
    pub fn duration(&self) -> Duration {
        TRANSITION_DURATION
    }

    /// Resolve the transition against `ctx` without mutating anything.
    pub fn plan<C>(&self, ctx: &C) -> ModalResult<TransitionPlan>
    where
        C: TransitionContext + ?Sized,
    {
        let presenting = self.is_presentation();
        let incoming = ctx.incoming_surface();
        let outgoing = ctx.outgoing_surface();

        let animating = if presenting {
            incoming.ok_or_else(|| {
                ModalError::contract("presenting transition has no incoming surface")
            })?
        } else {
            outgoing.ok_or_else(|| {
                ModalError::contract("dismissing transition has no outgoing surface")
            })?
        };

        let presented = ctx.final_frame(animating);
        let pick = |dismissed: Rect, exit: Rect| {
            if presenting {
                (dismissed, presented)
            } else {
                (presented, exit)
            }
        };

        let (initial_frame, property) = match self.style {
            PresentationStyle::Drawer { .. } => {
                let dismissed = GeometryResolver::dismissed_frame_for(&self.style, presented)?;
                let (from, to) = pick(dismissed, dismissed);
                (from, AnimatedProperty::Frame { from, to })
            }
            PresentationStyle::FormSheet {
                animation_style: AnimationStyle::ExpandFromCenter,
                ..
            } => {
                let collapsed = collapsed_transform(presented);
                let settled = Transform2D::about_center(presented);
                let (from, to) = if presenting {
                    (collapsed, settled)
                } else {
                    (settled, collapsed)
                };
                (presented, AnimatedProperty::Transform { from, to })
            }
            PresentationStyle::FormSheet {
                animation_style: AnimationStyle::Slide {
                    dismiss_opposite, ..
                },
                ..
            } => {
                let offsets = GeometryResolver::slide_offsets_for(&self.style, presented)?;
                let exit = if dismiss_opposite {
                    offsets.opposite
                } else {
                    offsets.dismissed
                };
                let (from, to) = pick(offsets.dismissed, exit);
                (from, AnimatedProperty::Frame { from, to })
            }
        };

        Ok(TransitionPlan {
            direction: self.direction,
            container: ctx.container_surface(),
            insert: if presenting { Some(animating) } else { None },
            animating,
            remove_on_completion: if presenting { None } else { outgoing },
            presented_frame: presented,
            initial_frame,
            property,
        })
    }

    /// Start the transition.
    ///
    /// On success the animation is in flight; the scheduler's completion
    /// removes the outgoing surface (dismissals only) and signals
    /// `complete_transition(true)` once. On error nothing was mutated.
    ///
    /// If the scheduler never calls back, the transition stays
    /// [`DriverState::Animating`] forever.
    #[tracing::instrument(
        skip_all,
        fields(direction = ?self.direction, style = self.style.kind_name())
    )]
    pub fn run<C, A>(
        self,
        ctx: &Rc<RefCell<C>>,
        scheduler: &mut A,
    ) -> ModalResult<TransitionHandle>
    where
        C: TransitionContext + ?Sized + 'static,
        A: AnimationScheduler + ?Sized,
    {
        let plan = self.plan(&*ctx.borrow())?;
        tracing::debug!(
            animating = plan.animating.0,
            presented = ?plan.presented_frame,
            initial = ?plan.initial_frame,
            "transition planned"
        );

        {
            let mut c = ctx.borrow_mut();
            if let Some(incoming) = plan.insert {
                c.add_child(plan.container, incoming);
            }
            c.set_frame(plan.animating, plan.initial_frame);
            if let AnimatedProperty::Transform { from, .. } = plan.property {
                c.set_transform(plan.animating, from);
            }
        }

        let state = Rc::new(Cell::new(DriverState::Animating));
        let completion = {
            let state = Rc::clone(&state);
            let ctx = Rc::clone(ctx);
            let remove = plan.remove_on_completion;
            Box::new(move |_finished: bool| {
                let mut c = ctx.borrow_mut();
                if let Some(outgoing) = remove {
                    c.remove_from_parent(outgoing);
                }
                c.complete_transition(true);
                state.set(DriverState::Completed);
            })
        };

        scheduler.animate(
            AnimationRequest {
                surface: plan.animating,
                property: plan.property,
                duration: self.duration(),
                spring: SpringParams::default(),
                options: AnimationOptions::INTERACTIVE,
            },
            completion,
        );

        Ok(TransitionHandle { state, plan })
    }
}

/// Observer for a started transition.
pub struct TransitionHandle {
    state: Rc<Cell<DriverState>>,
    plan: TransitionPlan,
}

impl TransitionHandle {
    /// Current state; flips to [`DriverState::Completed`] from the completion.
    pub fn state(&self) -> DriverState {
        self.state.get()
    }

    /// `true` once completion was signalled to the host.
    pub fn is_completed(&self) -> bool {
        self.state() == DriverState::Completed
    }

    /// The resolved plan the transition is running.
    pub fn plan(&self) -> &TransitionPlan {
        &self.plan
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transition/driver.rs"]
mod tests;

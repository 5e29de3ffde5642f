//! Animation requests handed to the host scheduler, plus a cooperative
//! reference scheduler for headless hosts and tests.

use std::{cell::RefCell, time::Duration};

use crate::{
    animation::{lerp::Lerp, spring::SpringParams},
    foundation::core::{Rect, SurfaceId, Transform2D},
    host::protocol::SurfaceTree,
};

/// Invoked once when an animation ends. The flag reports whether it ran to the end.
pub type Completion = Box<dyn FnOnce(bool)>;

/// Surface property a request interpolates, with both end values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimatedProperty {
    /// Geometry frame in the parent's coordinates.
    Frame {
        /// Value at the start.
        from: Rect,
        /// Value at the end.
        to: Rect,
    },
    /// Visual transform on top of an unchanged frame.
    Transform {
        /// Value at the start.
        from: Transform2D,
        /// Value at the end.
        to: Transform2D,
    },
}

/// One sampled value of an [`AnimatedProperty`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PropertyValue {
    /// A frame.
    Frame(Rect),
    /// A transform.
    Transform(Transform2D),
}

impl AnimatedProperty {
    /// Value at spring progress `p` (0 = `from`, 1 = `to`).
    pub fn sample(&self, p: f64) -> PropertyValue {
        match self {
            Self::Frame { from, to } => PropertyValue::Frame(<Rect as Lerp>::lerp(from, to, p)),
            Self::Transform { from, to } => {
                PropertyValue::Transform(<Transform2D as Lerp>::lerp(from, to, p))
            }
        }
    }

    /// The `to` value, unsampled.
    pub fn end_value(&self) -> PropertyValue {
        match *self {
            Self::Frame { to, .. } => PropertyValue::Frame(to),
            Self::Transform { to, .. } => PropertyValue::Transform(to),
        }
    }
}

impl PropertyValue {
    /// Write the value to `surface`.
    pub fn apply_to<T: SurfaceTree + ?Sized>(self, tree: &mut T, surface: SurfaceId) {
        match self {
            Self::Frame(frame) => tree.set_frame(surface, frame),
            Self::Transform(transform) => tree.set_transform(surface, transform),
        }
    }
}

/// Host animation flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationOptions {
    /// Keep touch handling live while animating.
    pub allow_user_interaction: bool,
    /// Start from the surface's current presentation state.
    pub begin_from_current_state: bool,
}

impl AnimationOptions {
    /// Touches stay live during the animation and it picks up from whatever
    /// state the surface is currently in.
    pub const INTERACTIVE: Self = Self {
        allow_user_interaction: true,
        begin_from_current_state: true,
    };
}

/// Opaque animation handed to an [`AnimationScheduler`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationRequest {
    /// Surface to animate.
    pub surface: SurfaceId,
    /// Property and its end values.
    pub property: AnimatedProperty,
    /// Total length.
    pub duration: Duration,
    /// Timing curve.
    pub spring: SpringParams,
    /// Host flags.
    pub options: AnimationOptions,
}

/// Host animation primitive: interpolates `request.property` on
/// `request.surface` over `request.duration`, then calls `completion`.
///
/// Implementations must call `completion` exactly once and never from inside
/// `animate` itself.
pub trait AnimationScheduler {
    /// Start `request`; `completion` runs once it ends.
    fn animate(&mut self, request: AnimationRequest, completion: Completion);
}

struct InFlight {
    request: AnimationRequest,
    elapsed: Duration,
    completion: Completion,
}

/// Cooperative scheduler driven by explicit clock ticks.
#[derive(Default)]
pub struct ManualScheduler {
    in_flight: Vec<InFlight>,
    history: Vec<AnimationRequest>,
}

impl ManualScheduler {
    /// Scheduler with nothing in flight.
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` when no animation is in flight.
    pub fn is_idle(&self) -> bool {
        self.in_flight.is_empty()
    }

    /// Number of animations in flight.
    pub fn in_flight_len(&self) -> usize {
        self.in_flight.len()
    }

    /// Every request accepted so far, oldest first.
    pub fn history(&self) -> &[AnimationRequest] {
        &self.history
    }

    /// Advance the clock by `dt`, write sampled values into `surfaces` and
    /// run the completions of animations that reached their duration.
    ///
    /// Returns how many animations completed during this tick.
    pub fn advance<S>(&mut self, dt: Duration, surfaces: &RefCell<S>) -> usize
    where
        S: SurfaceTree + ?Sized,
    {
        {
            let mut tree = surfaces.borrow_mut();
            for anim in &mut self.in_flight {
                let duration = anim.request.duration;
                anim.elapsed = (anim.elapsed + dt).min(duration);
                let t = if duration.is_zero() {
                    1.0
                } else {
                    anim.elapsed.as_secs_f64() / duration.as_secs_f64()
                };
                let p = anim.request.spring.progress(t);
                let value = if t >= 1.0 {
                    anim.request.property.end_value()
                } else {
                    anim.request.property.sample(p)
                };
                tracing::trace!(surface = anim.request.surface.0, t, p, "animation tick");
                value.apply_to(&mut *tree, anim.request.surface);
            }
        }

        let (finished, pending): (Vec<_>, Vec<_>) = self
            .in_flight
            .drain(..)
            .partition(|a| a.elapsed >= a.request.duration);
        self.in_flight = pending;

        // The surface borrow is released; completions may mutate the tree.
        let n = finished.len();
        for anim in finished {
            (anim.completion)(true);
        }
        n
    }

    /// Tick in steps of `step` until every in-flight animation has completed.
    pub fn run_to_completion<S>(&mut self, step: Duration, surfaces: &RefCell<S>) -> usize
    where
        S: SurfaceTree + ?Sized,
    {
        let step = if step.is_zero() {
            Duration::from_millis(1)
        } else {
            step
        };
        let mut completed = 0;
        while !self.is_idle() {
            completed += self.advance(step, surfaces);
        }
        completed
    }
}

impl AnimationScheduler for ManualScheduler {
    fn animate(&mut self, request: AnimationRequest, completion: Completion) {
        tracing::debug!(
            surface = request.surface.0,
            duration_ms = request.duration.as_millis() as u64,
            "animation scheduled"
        );
        self.history.push(request);
        self.in_flight.push(InFlight {
            request,
            elapsed: Duration::ZERO,
            completion,
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/scheduler.rs"]
mod tests;

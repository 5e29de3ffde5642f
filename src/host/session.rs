//! Drives a full present/dismiss cycle against [`HeadlessHost`] the way a
//! windowing toolkit would: delegate lookup, lifecycle hooks, transition
//! drivers and layout passes.

use std::{
    cell::{Ref, RefCell},
    rc::Rc,
    time::Duration,
};

use crate::{
    animation::scheduler::ManualScheduler,
    foundation::core::{Rect, Size, Transform2D},
    foundation::error::{ModalError, ModalResult},
    host::headless::{HeadlessHost, HostTransition, QueuedCoordinator},
    host::protocol::{SurfaceTree, TransitionCoordinator},
    presentation::controller::{
        PresentationController, PresentationLifecycleController, PresentationSurfaces,
    },
    presentation::delegate::TransitioningDelegate,
    presentation::presenter::Presenter,
    style::model::PresentationStyle,
    transition::driver::{TransitionDirection, TransitionHandle},
};

/// Snapshot of the animating surface and the overlay after a tick.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SessionSample {
    /// Time since the running transition started.
    pub elapsed_ms: u64,
    /// Presented frame as `[x, y, width, height]`.
    pub frame: [f64; 4],
    /// Area the transformed surface covers, as `[x, y, width, height]`.
    pub visual_bounds: [f64; 4],
    /// Rotation of the presented surface.
    pub rotation_rad: f64,
    /// Scale of the presented surface.
    pub scale: [f64; 2],
    /// Opacity of the dimming overlay.
    pub overlay_opacity: f64,
}

fn rect_array(r: Rect) -> [f64; 4] {
    [r.x0, r.y0, r.width(), r.height()]
}

struct ActiveTransition {
    direction: TransitionDirection,
    handle: TransitionHandle,
    coordinator: Option<QueuedCoordinator>,
}

/// One presented surface over one presenting surface, on a [`HeadlessHost`]
/// ticked by a [`ManualScheduler`].
pub struct HeadlessSession {
    host: Rc<RefCell<HeadlessHost>>,
    scheduler: ManualScheduler,
    delegate: Rc<dyn TransitioningDelegate>,
    controller: PresentationLifecycleController,
    use_coordinator: bool,
    active: Option<ActiveTransition>,
    elapsed: Duration,
}

impl HeadlessSession {
    /// Session with a fresh host of `container_size`. The presenter has
    /// already asked the host to present; no transition is running yet.
    pub fn new(container_size: Size, style: PresentationStyle) -> Self {
        let mut host = HeadlessHost::new(container_size);
        let container = host.container();
        let presenting = host.create_surface(host.bounds(container));
        host.add_child(container, presenting);
        let presented = host.create_surface(Rect::ZERO);
        let overlay = host.create_surface(Rect::ZERO);

        let presenter = Presenter::new(presenting, presented, style);
        presenter.present_animated_controller(&mut host);
        let delegate: Rc<dyn TransitioningDelegate> = presenter.transitioner();
        let controller = delegate.presentation_controller(PresentationSurfaces {
            presenting,
            presented,
            container,
            overlay,
        });

        Self {
            host: Rc::new(RefCell::new(host)),
            scheduler: ManualScheduler::new(),
            delegate,
            controller,
            use_coordinator: true,
            active: None,
            elapsed: Duration::ZERO,
        }
    }

    /// Run overlay fades alongside transitions (default) or apply them instantly.
    pub fn with_coordinator(mut self, enabled: bool) -> Self {
        self.use_coordinator = enabled;
        self
    }

    /// Borrow the host.
    pub fn host(&self) -> Ref<'_, HeadlessHost> {
        self.host.borrow()
    }

    /// Lifecycle controller of the session.
    pub fn controller(&self) -> &PresentationLifecycleController {
        &self.controller
    }

    /// Surfaces of the session.
    pub fn surfaces(&self) -> PresentationSurfaces {
        self.controller.surfaces()
    }

    /// `true` while a transition is running.
    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    /// Start presenting. Fails if a transition is already running.
    pub fn begin_presentation(&mut self) -> ModalResult<()> {
        self.begin(TransitionDirection::Presenting)
    }

    /// Start dismissing. Fails if a transition is already running.
    pub fn begin_dismissal(&mut self) -> ModalResult<()> {
        self.begin(TransitionDirection::Dismissing)
    }

    fn begin(&mut self, direction: TransitionDirection) -> ModalResult<()> {
        if self.active.is_some() {
            return Err(ModalError::contract(
                "a transition is already running on this presented surface",
            ));
        }
        let s = self.controller.surfaces();
        let driver = match direction {
            TransitionDirection::Presenting => self.delegate.animation_controller_for_presented(),
            TransitionDirection::Dismissing => self.delegate.animation_controller_for_dismissed(),
        };

        let mut coordinator = self.use_coordinator.then(QueuedCoordinator::new);
        {
            let mut host = self.host.borrow_mut();
            let final_frame = self.controller.frame_of_presented_view_in_container_view(&*host);
            let mut transition = HostTransition::default();
            transition.final_frames.insert(s.presented, final_frame);
            match direction {
                TransitionDirection::Presenting => {
                    transition.outgoing = Some(s.presenting);
                    transition.incoming = Some(s.presented);
                }
                TransitionDirection::Dismissing => {
                    transition.outgoing = Some(s.presented);
                    transition.incoming = Some(s.presenting);
                }
            }
            host.begin_transition(transition);

            let coordinator = coordinator
                .as_mut()
                .map(|c| c as &mut dyn TransitionCoordinator);
            match direction {
                TransitionDirection::Presenting => self
                    .controller
                    .presentation_transition_will_begin(&mut *host, coordinator),
                TransitionDirection::Dismissing => self
                    .controller
                    .dismissal_transition_will_begin(&mut *host, coordinator),
            }
        }

        let handle = driver.run(&self.host, &mut self.scheduler)?;
        self.elapsed = Duration::ZERO;
        self.active = Some(ActiveTransition {
            direction,
            handle,
            coordinator,
        });
        Ok(())
    }

    /// Advance the clock. Returns `true` when the running transition finished
    /// during this tick.
    pub fn step(&mut self, dt: Duration) -> bool {
        if self.active.is_none() {
            return false;
        }
        self.elapsed += dt;
        self.scheduler.advance(dt, &*self.host);

        let done = self
            .active
            .as_ref()
            .is_some_and(|a| a.handle.is_completed());
        if !done {
            return false;
        }
        let Some(active) = self.active.take() else {
            return false;
        };

        let mut host = self.host.borrow_mut();
        if let Some(mut coordinator) = active.coordinator {
            coordinator.finish(&mut *host, true);
        }
        match active.direction {
            TransitionDirection::Presenting => {
                self.controller
                    .presentation_transition_did_end(&mut *host, true);
                self.controller.container_will_layout_subviews(&mut *host);
            }
            TransitionDirection::Dismissing => {
                self.controller.dismissal_transition_did_end(&mut *host, true);
            }
        }
        tracing::info!(direction = ?active.direction, "transition finished");
        true
    }

    /// Step until the running transition finishes.
    pub fn settle(&mut self, dt: Duration) {
        let dt = if dt.is_zero() {
            Duration::from_millis(1)
        } else {
            dt
        };
        while self.is_animating() {
            self.step(dt);
        }
    }

    /// Resize the container and run a layout pass.
    pub fn resize(&mut self, size: Size) {
        let mut host = self.host.borrow_mut();
        host.resize_container(size);
        self.controller.container_will_layout_subviews(&mut *host);
    }

    /// Tap on the dimming overlay.
    pub fn tap_overlay(&mut self) {
        self.controller.overlay_tapped(&mut *self.host.borrow_mut());
    }

    /// Snapshot of the presented surface and the overlay.
    pub fn sample(&self) -> SessionSample {
        let host = self.host.borrow();
        let s = self.controller.surfaces();
        let transform: Transform2D = host.transform(s.presented);
        SessionSample {
            elapsed_ms: self.elapsed.as_millis() as u64,
            frame: rect_array(host.frame(s.presented)),
            visual_bounds: rect_array(host.visual_bounds(s.presented)),
            rotation_rad: transform.rotation_rad,
            scale: [transform.scale.x, transform.scale.y],
            overlay_opacity: host.opacity(s.overlay),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/session.rs"]
mod tests;

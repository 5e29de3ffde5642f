use crate::{
    presentation::controller::{PresentationLifecycleController, PresentationSurfaces},
    style::model::PresentationStyle,
    transition::driver::TransitionDriver,
};

/// Hands the host a lifecycle controller and one fresh, fully configured
/// driver per transition.
pub trait TransitioningDelegate {
    /// Lifecycle controller for a new presentation session.
    fn presentation_controller(
        &self,
        surfaces: PresentationSurfaces,
    ) -> PresentationLifecycleController;
    /// Driver for the presenting transition.
    fn animation_controller_for_presented(&self) -> TransitionDriver;
    /// Driver for the dismissing transition.
    fn animation_controller_for_dismissed(&self) -> TransitionDriver;
}

/// Delegate that configures everything from one style.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transitioner {
    style: PresentationStyle,
}

impl Transitioner {
    /// Delegate for `style`.
    pub fn new(style: PresentationStyle) -> Self {
        Self { style }
    }

    /// Style every controller is built with.
    pub fn style(&self) -> &PresentationStyle {
        &self.style
    }
}

impl TransitioningDelegate for Transitioner {
    fn presentation_controller(
        &self,
        surfaces: PresentationSurfaces,
    ) -> PresentationLifecycleController {
        PresentationLifecycleController::new(self.style, surfaces)
    }

    fn animation_controller_for_presented(&self) -> TransitionDriver {
        TransitionDriver::presenting(self.style)
    }

    fn animation_controller_for_dismissed(&self) -> TransitionDriver {
        TransitionDriver::dismissing(self.style)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/presentation/delegate.rs"]
mod tests;

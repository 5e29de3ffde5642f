use std::rc::Rc;

use crate::{
    foundation::core::SurfaceId,
    host::protocol::{ModalPresentationStyle, PresentationHost},
    presentation::delegate::{Transitioner, TransitioningDelegate},
    style::model::PresentationStyle,
};

/// Entry point: presents one surface over another with a custom style.
pub struct Presenter {
    presenting: SurfaceId,
    presented: SurfaceId,
    transitioner: Rc<Transitioner>,
}

impl Presenter {
    /// `style` is explicit; pass [`PresentationStyle::DEFAULT_FORM_SHEET`] for
    /// the stock look.
    pub fn new(presenting: SurfaceId, presented: SurfaceId, style: PresentationStyle) -> Self {
        Self {
            presenting,
            presented,
            transitioner: Rc::new(Transitioner::new(style)),
        }
    }

    /// Surface presenting the modal.
    pub fn presenting(&self) -> SurfaceId {
        self.presenting
    }

    /// Surface being presented.
    pub fn presented(&self) -> SurfaceId {
        self.presented
    }

    /// Delegate shared by both surfaces.
    pub fn transitioner(&self) -> Rc<Transitioner> {
        Rc::clone(&self.transitioner)
    }

    /// Install the transitioning delegate on both surfaces and ask the host
    /// for an animated custom modal presentation.
    #[tracing::instrument(skip_all, fields(style = self.transitioner.style().kind_name()))]
    pub fn present_animated_controller(&self, host: &mut dyn PresentationHost) {
        let delegate: Rc<dyn TransitioningDelegate> = self.transitioner();
        host.set_transitioning_delegate(self.presented, Rc::clone(&delegate));
        host.set_transitioning_delegate(self.presenting, delegate);
        host.set_modal_presentation_style(self.presented, ModalPresentationStyle::Custom);
        host.present(self.presenting, self.presented, true);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/presentation/presenter.rs"]
mod tests;

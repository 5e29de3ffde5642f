//! Pure geometry for presented surfaces.
//!
//! Every frame is re-derived from `(style, container)`; nothing is cached, so a
//! layout pass after a resize or rotation picks up the new container size.

use crate::{
    foundation::core::{Rect, Size, Vec2, offset_frame},
    foundation::error::{ModalError, ModalResult},
    style::model::{AnimationStyle, PresentationStyle, Side, clamp_ratio},
};

/// Resting frames of a sliding form sheet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlideOffsets {
    /// Off-screen frame on the `side` the sheet enters from.
    pub dismissed: Rect,
    /// Off-screen frame on the mirror edge.
    pub opposite: Rect,
}

/// Stateless geometry resolver.
pub struct GeometryResolver;

impl GeometryResolver {
    /// Size of the presented surface inside a container of `container` size.
    pub fn target_size(style: &PresentationStyle, container: Size) -> Size {
        match *style {
            PresentationStyle::Drawer {
                side, screen_ratio, ..
            } => {
                let ratio = clamp_ratio(screen_ratio);
                if side.is_horizontal() {
                    Size::new((container.width * ratio).floor(), container.height)
                } else {
                    Size::new(container.width, (container.height * ratio).floor())
                }
            }
            PresentationStyle::FormSheet {
                horizontal_ratio,
                vertical_ratio,
                ..
            } => Size::new(
                (container.width * clamp_ratio(horizontal_ratio)).floor(),
                (container.height * clamp_ratio(vertical_ratio)).floor(),
            ),
        }
    }

    /// On-screen frame of the presented surface.
    pub fn presented_frame(style: &PresentationStyle, container_bounds: Rect) -> Rect {
        let container = container_bounds.size();
        let size = Self::target_size(style, container);
        let (x, y) = match *style {
            PresentationStyle::Drawer { side, .. } => match side {
                Side::Left => (0.0, 0.0),
                Side::Right => (container.width - size.width, 0.0),
                Side::Top => (0.0, 0.0),
                Side::Bottom => (0.0, container.height - size.height),
            },
            PresentationStyle::FormSheet { .. } => (
                (container.width - size.width) / 2.0,
                (container.height - size.height) / 2.0,
            ),
        };
        Rect::from_origin_size(
            (container_bounds.x0 + x, container_bounds.y0 + y),
            (size.width, size.height),
        )
    }

    /// Fully off-screen frame of a drawer: `presented` pushed out past `side`
    /// by its own extent.
    pub fn dismissed_frame(presented: Rect, side: Side) -> Rect {
        let extent = if side.is_horizontal() {
            presented.width()
        } else {
            presented.height()
        };
        offset_frame(presented, Self::axis_delta(side, extent))
    }

    /// Off-screen frames of a sliding sheet.
    ///
    /// The travel distance is `extent / clamp(axis_ratio)`, i.e. the sheet moves
    /// by the full container extent it was derived from.
    pub fn slide_offset_frames(presented: Rect, side: Side, axis_ratio: f64) -> SlideOffsets {
        let extent = if side.is_horizontal() {
            presented.width()
        } else {
            presented.height()
        };
        let distance = extent / clamp_ratio(axis_ratio);
        SlideOffsets {
            dismissed: offset_frame(presented, Self::axis_delta(side, distance)),
            opposite: offset_frame(presented, Self::axis_delta(side.opposite(), distance)),
        }
    }

    /// Slide offsets for a style, picking the ratio on the slide's axis.
    ///
    /// Only `FormSheet` + `Slide` has slide geometry; any other style is a
    /// contract violation.
    pub fn slide_offsets_for(
        style: &PresentationStyle,
        presented: Rect,
    ) -> ModalResult<SlideOffsets> {
        match *style {
            PresentationStyle::FormSheet {
                horizontal_ratio,
                vertical_ratio,
                animation_style: AnimationStyle::Slide { side, .. },
            } => {
                let axis_ratio = if side.is_horizontal() {
                    horizontal_ratio
                } else {
                    vertical_ratio
                };
                Ok(Self::slide_offset_frames(presented, side, axis_ratio))
            }
            PresentationStyle::FormSheet {
                animation_style: AnimationStyle::ExpandFromCenter,
                ..
            } => Err(ModalError::contract(
                "slide offsets requested for an expand-from-center form sheet",
            )),
            PresentationStyle::Drawer { .. } => Err(ModalError::contract(
                "slide offsets requested for a drawer style",
            )),
        }
    }

    /// Drawer dismissed frame for a style. Form sheets are a contract violation.
    pub fn dismissed_frame_for(style: &PresentationStyle, presented: Rect) -> ModalResult<Rect> {
        match *style {
            PresentationStyle::Drawer { side, .. } => Ok(Self::dismissed_frame(presented, side)),
            PresentationStyle::FormSheet { .. } => Err(ModalError::contract(
                "drawer dismissed frame requested for a form sheet style",
            )),
        }
    }

    fn axis_delta(side: Side, distance: f64) -> Vec2 {
        let signed = side.outward_sign() * distance;
        if side.is_horizontal() {
            Vec2::new(signed, 0.0)
        } else {
            Vec2::new(0.0, signed)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/resolver.rs"]
mod tests;

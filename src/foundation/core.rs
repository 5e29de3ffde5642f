pub use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Opaque handle to a host-owned surface (a view, layer or window region).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct SurfaceId(pub u64);

/// Visual transform of a surface, applied about `pivot` on top of its frame.
///
/// Stored decomposed so that interpolation runs per component: a rotation of
/// several turns really spins instead of collapsing to the matrix delta.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform2D {
    /// Rotation in radians, counter-clockwise in a y-up space.
    pub rotation_rad: f64,
    /// Per-axis scale factors.
    pub scale: Vec2,
    /// Pivot in the surface's local space; the origin is its top-left corner.
    pub pivot: Point,
}

impl Transform2D {
    /// No rotation, unit scale, pivot at the local origin.
    pub const IDENTITY: Self = Self {
        rotation_rad: 0.0,
        scale: Vec2::new(1.0, 1.0),
        pivot: Point::ZERO,
    };

    /// Identity transform pivoting on the center of a surface laid out in `frame`.
    pub fn about_center(frame: Rect) -> Self {
        Self {
            pivot: Point::new(frame.width() / 2.0, frame.height() / 2.0),
            ..Self::IDENTITY
        }
    }

    /// Same pivot, with the given scale and rotation.
    pub fn scaled_rotated(self, sx: f64, sy: f64, rotation_rad: f64) -> Self {
        Self {
            rotation_rad,
            scale: Vec2::new(sx, sy),
            ..self
        }
    }

    /// `true` when the transform leaves every point in place. The pivot is
    /// irrelevant then.
    pub fn is_identity(self) -> bool {
        self.rotation_rad == 0.0 && self.scale == Vec2::new(1.0, 1.0)
    }

    /// Local-space matrix: scale, then rotate, both about `pivot`.
    pub fn to_affine(self) -> Affine {
        let pivot = self.pivot.to_vec2();
        Affine::translate(pivot)
            * Affine::rotate(self.rotation_rad)
            * Affine::scale_non_uniform(self.scale.x, self.scale.y)
            * Affine::translate(-pivot)
    }

    /// Axis-aligned area a surface laid out in `frame` covers once transformed,
    /// in the parent's coordinates.
    pub fn visual_bounds(self, frame: Rect) -> Rect {
        let local = Rect::from_origin_size(Point::ZERO, frame.size());
        offset_frame(
            self.to_affine().transform_rect_bbox(local),
            frame.origin().to_vec2(),
        )
    }
}

/// Offset a frame along a signed vector, keeping its size.
#[inline]
pub fn offset_frame(frame: Rect, delta: Vec2) -> Rect {
    frame + delta
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

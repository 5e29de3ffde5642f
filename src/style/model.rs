//! Declarative presentation-style descriptors.
//!
//! Styles are plain values: ratios are stored exactly as configured and only
//! clamped into `[RATIO_MIN, RATIO_MAX]` when geometry is derived from them.

use std::path::Path;

use crate::foundation::error::{ModalError, ModalResult};

/// Smallest ratio a style may resolve to.
pub const RATIO_MIN: f64 = 0.1;
/// Largest ratio a style may resolve to.
pub const RATIO_MAX: f64 = 1.0;

/// Clamp a screen ratio into `[RATIO_MIN, RATIO_MAX]`.
///
/// Out-of-range values are corrected, never rejected. `NaN` resolves to
/// `RATIO_MIN`.
#[inline]
pub fn clamp_ratio(ratio: f64) -> f64 {
    RATIO_MAX.min(RATIO_MIN.max(ratio))
}

/// Screen edge a surface enters from or moves toward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// Leading x edge.
    Left,
    /// Trailing x edge.
    Right,
    /// Leading y edge.
    Top,
    /// Trailing y edge.
    Bottom,
}

impl Side {
    /// Every side.
    pub const ALL: [Side; 4] = [Side::Left, Side::Right, Side::Top, Side::Bottom];

    /// The mirror edge.
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
        }
    }

    /// `true` for the edges that move a surface along the x axis.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// `-1.0` for edges at the origin (left/top), `1.0` for the far edges.
    pub fn outward_sign(self) -> f64 {
        match self {
            Self::Left | Self::Top => -1.0,
            Self::Right | Self::Bottom => 1.0,
        }
    }
}

/// Entrance/exit animation of a form sheet.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnimationStyle {
    /// Scale up from a point while spinning.
    ExpandFromCenter,
    /// Slide in from `side`. On dismissal the sheet exits toward the mirror
    /// edge when `dismiss_opposite` is set, otherwise back toward `side`.
    Slide {
        /// Exit toward the mirror edge instead of `side`.
        dismiss_opposite: bool,
        /// Edge the sheet enters from.
        side: Side,
    },
}

/// How a modal surface is sized, placed and animated.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PresentationStyle {
    /// Edge-anchored surface covering `screen_ratio` of the container along
    /// the axis perpendicular to `side`.
    Drawer {
        /// Edge the drawer is anchored to.
        side: Side,
        /// Go full screen on compact widths.
        #[serde(default)]
        phone_wants_full_screen: bool,
        /// Share of the container on the scaled axis.
        screen_ratio: f64,
    },
    /// Centered surface sized by two independent ratios.
    FormSheet {
        /// Share of the container width.
        horizontal_ratio: f64,
        /// Share of the container height.
        vertical_ratio: f64,
        /// Entrance and exit animation.
        animation_style: AnimationStyle,
    },
}

impl PresentationStyle {
    /// Centered 60% × 60% sheet that expands from the center.
    pub const DEFAULT_FORM_SHEET: Self = Self::FormSheet {
        horizontal_ratio: 0.6,
        vertical_ratio: 0.6,
        animation_style: AnimationStyle::ExpandFromCenter,
    };

    /// Half-width drawer anchored to the right edge.
    pub const DEFAULT_DRAWER: Self = Self::Drawer {
        side: Side::Right,
        phone_wants_full_screen: false,
        screen_ratio: 0.5,
    };

    /// Drawer without the compact full-screen fallback.
    pub fn drawer(side: Side, screen_ratio: f64) -> Self {
        Self::Drawer {
            side,
            phone_wants_full_screen: false,
            screen_ratio,
        }
    }

    /// Form sheet with the given ratios and animation.
    pub fn form_sheet(
        horizontal_ratio: f64,
        vertical_ratio: f64,
        animation_style: AnimationStyle,
    ) -> Self {
        Self::FormSheet {
            horizontal_ratio,
            vertical_ratio,
            animation_style,
        }
    }

    /// Short name for logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Drawer { .. } => "drawer",
            Self::FormSheet {
                animation_style: AnimationStyle::ExpandFromCenter,
                ..
            } => "form_sheet/expand_from_center",
            Self::FormSheet {
                animation_style: AnimationStyle::Slide { .. },
                ..
            } => "form_sheet/slide",
        }
    }

    /// Parse a style from JSON.
    pub fn from_json_str(s: &str) -> ModalResult<Self> {
        serde_json::from_str(s).map_err(|e| ModalError::serde(e.to_string()))
    }

    /// Read and parse a JSON style file.
    pub fn from_path(path: impl AsRef<Path>) -> ModalResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).map_err(|e| {
            ModalError::validation(format!("read style '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&s)
    }

    /// Pretty-printed JSON.
    pub fn to_json_string(&self) -> ModalResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ModalError::serde(e.to_string()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/model.rs"]
mod tests;

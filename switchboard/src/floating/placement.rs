//! Overlay placement relative to an anchor.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::rect::{Rect, Size};

/// Side of the anchor the overlay is placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    #[default]
    Top,
    Right,
    Bottom,
    Left,
}

impl FromStr for Placement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Placement::Top),
            "right" => Ok(Placement::Right),
            "bottom" => Ok(Placement::Bottom),
            "left" => Ok(Placement::Left),
            other => Err(format!("unknown placement: {other}")),
        }
    }
}

/// Place an overlay of `overlay` size next to `anchor`.
///
/// The overlay is centered on the anchor's cross axis and separated from it by
/// `offset` along the placement axis. Both boxes are in the same coordinate space.
/// No flipping or viewport clamping is done; an overlay that would overflow stays
/// where it was computed.
pub fn compute_position(anchor: Rect, overlay: Size, placement: Placement, offset: f64) -> Rect {
    let (top, left) = match placement {
        Placement::Top => (
            anchor.top - overlay.height - offset,
            anchor.left + (anchor.width - overlay.width) / 2.0,
        ),
        Placement::Right => (
            anchor.top + (anchor.height - overlay.height) / 2.0,
            anchor.right() + offset,
        ),
        Placement::Bottom => (
            anchor.bottom() + offset,
            anchor.left + (anchor.width - overlay.width) / 2.0,
        ),
        Placement::Left => (
            anchor.top + (anchor.height - overlay.height) / 2.0,
            anchor.left - overlay.width - offset,
        ),
    };
    Rect::at(top, left, overlay)
}

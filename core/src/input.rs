use serde::{Deserialize, Serialize};

use crate::*;

/// Player intent carried by a pointer event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    /// Reveal, usually the left button.
    Primary,
    /// Toggle a flag, usually the right button.
    Secondary,
}

impl Intent {
    /// Maps a DOM `MouseEvent.button` value.
    pub const fn from_button(button: i16) -> Option<Self> {
        match button {
            0 => Some(Self::Primary),
            2 => Some(Self::Secondary),
            _ => None,
        }
    }

    pub const fn at(self, coords: Coord2) -> Input {
        match self {
            Self::Primary => Input::Reveal(coords),
            Self::Secondary => Input::ToggleFlag(coords),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Input {
    Reveal(Coord2),
    ToggleFlag(Coord2),
    Reset,
}

/// Turns a pointer offset inside a board of `extent` pixels into the cell under it.
///
/// Each axis is `floor(offset / extent * size)`. Anything outside the board, including NaN and degenerate extents,
/// yields `None`.
pub fn locate(offset: (f64, f64), extent: (f64, f64), size: Coord) -> Option<Coord2> {
    Some((
        locate_axis(offset.0, extent.0, size)?,
        locate_axis(offset.1, extent.1, size)?,
    ))
}

fn locate_axis(offset: f64, extent: f64, size: Coord) -> Option<Coord> {
    if size == 0 || !(extent > 0.0) || !(offset >= 0.0) || offset >= extent {
        return None;
    }
    // offset is non-negative here, so truncation is floor
    let cell = (offset / extent * f64::from(size)) as Coord;
    Some(cell.min(size - 1))
}

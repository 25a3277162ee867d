use alloc::vec::Vec;

use crate::*;

/// What a renderer should draw in one cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Glyph {
    /// Covered square.
    Blank,
    Flag,
    Mine,
    /// Uncovered square without a number.
    Cleared,
    Number(u8),
}

impl Glyph {
    pub const fn for_cell(cell: Cell, result: GameResult) -> Self {
        use Cell::*;
        match (cell, result) {
            (FlaggedSafe | FlaggedMine, _) => Self::Flag,
            (Mine, GameResult::Won) => Self::Flag,
            (Hidden | Mine, _) => Self::Blank,
            (Exposed, _) => Self::Mine,
            (Revealed(0), _) => Self::Cleared,
            (Revealed(count), _) => Self::Number(count),
        }
    }
}

/// CSS color used for a revealed cell's adjacent-mine number.
pub const fn number_color(count: u8) -> Option<&'static str> {
    Some(match count {
        1 => "blue",
        2 => "green",
        3 => "red",
        4 => "purple",
        5 => "yellow",
        6 => "teal",
        7 => "darkslategrey",
        8 => "slategrey",
        _ => return None,
    })
}

pub trait Renderer {
    fn draw_cell(&mut self, coords: Coord2, glyph: Glyph);
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn draw_cell(&mut self, coords: Coord2, glyph: Glyph) {
        (**self).draw_cell(coords, glyph)
    }
}

/// Records draw calls in order, handy for headless hosts.
impl Renderer for Vec<(Coord2, Glyph)> {
    fn draw_cell(&mut self, coords: Coord2, glyph: Glyph) {
        self.push((coords, glyph));
    }
}

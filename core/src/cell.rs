use serde::{Deserialize, Serialize};

/// State of a single board cell.
///
/// Mine-ness is fixed when the board is generated: `Mine`, `FlaggedMine` and `Exposed` always hold a mine, the other
/// states never do. Only flag and reveal status change during play.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Hidden,
    Mine,
    FlaggedSafe,
    FlaggedMine,
    /// Cleared safe cell with the number of adjacent mines.
    Revealed(u8),
    /// Mine shown after the game was lost.
    Exposed,
}

impl Cell {
    pub const fn from_mine(has_mine: bool) -> Self {
        if has_mine { Self::Mine } else { Self::Hidden }
    }

    pub const fn has_mine(self) -> bool {
        matches!(self, Self::Mine | Self::FlaggedMine | Self::Exposed)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::FlaggedSafe | Self::FlaggedMine)
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed(_))
    }

    /// The state a flag toggle moves this cell to, `None` when the cell can't be flagged.
    pub const fn toggled_flag(self) -> Option<Self> {
        use Cell::*;
        match self {
            Hidden => Some(FlaggedSafe),
            FlaggedSafe => Some(Hidden),
            Mine => Some(FlaggedMine),
            FlaggedMine => Some(Mine),
            Revealed(_) | Exposed => None,
        }
    }
}

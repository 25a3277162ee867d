#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use input::*;
pub use render::*;
pub use session::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod generator;
mod input;
mod render;
mod session;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord,
    pub frequency: MineFrequency,
}

impl GameConfig {
    pub const DEFAULT_SIZE: Coord = 10;

    pub const fn new_unchecked(size: Coord, frequency: MineFrequency) -> Self {
        Self { size, frequency }
    }

    pub fn new(size: Coord, frequency: MineFrequency) -> Self {
        if size == 0 {
            log::warn!("Board size must be positive, using 1");
        }
        Self::new_unchecked(size.max(1), frequency)
    }

    pub const fn total_cells(&self) -> CellCount {
        square(self.size)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(Self::DEFAULT_SIZE, MineFrequency::default())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Changed,
    Won,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed | Self::Won => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Revealed | Self::HitMine | Self::Won => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_clamps_zero_size() {
        let config = GameConfig::new(0, MineFrequency::default());
        assert_eq!(config.size, 1);
        assert_eq!(config.total_cells(), 1);
    }

    #[test]
    fn config_deserializes_from_json() {
        let config: GameConfig = serde_json::from_str(
            r#"{"size":12,"frequency":{"ratio":6.0,"odds":"Legacy"}}"#,
        )
        .unwrap();

        assert_eq!(config.size, 12);
        assert_eq!(config.frequency.odds(), Odds::Legacy);
        assert_eq!(config.frequency.mine_probability(), 0.1);
    }
}

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

pub trait LayoutGenerator {
    fn generate(&mut self, config: GameConfig) -> Board;
}

/// How a [`MineFrequency`] ratio turns into per-cell mine odds.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Odds {
    /// Each cell holds a mine with probability `1 / ratio`.
    #[default]
    Exact,
    /// `round(uniform(0, ratio - 1)) < 1`, the rounding-based odds of the first release.
    Legacy,
}

/// Average number of cells per mine. Higher ratios make mines rarer.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineFrequency {
    ratio: f64,
    odds: Odds,
}

impl MineFrequency {
    pub const MIN_RATIO: f64 = 1.0;

    pub fn new(ratio: f64) -> Self {
        Self::with_odds(ratio, Odds::Exact)
    }

    pub fn with_odds(ratio: f64, odds: Odds) -> Self {
        let clamped = ratio.max(Self::MIN_RATIO);
        if clamped != ratio {
            log::warn!("Mine frequency {ratio} out of range, using {clamped}");
        }
        Self {
            ratio: clamped,
            odds,
        }
    }

    pub const fn ratio(self) -> f64 {
        self.ratio
    }

    pub const fn odds(self) -> Odds {
        self.odds
    }

    /// Probability that a single cell receives a mine.
    pub fn mine_probability(self) -> f64 {
        match self.odds {
            Odds::Exact => 1.0 / self.ratio,
            Odds::Legacy => {
                // round(u) < 1 holds exactly when u < 0.5
                let span = self.ratio - 1.0;
                if span <= 0.5 { 1.0 } else { 0.5 / span }
            }
        }
    }

    /// Draws one independent Bernoulli trial for a cell.
    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> bool {
        match self.odds {
            Odds::Exact => rng.random_bool(self.mine_probability().clamp(0.0, 1.0)),
            Odds::Legacy => rng.random::<f64>() * (self.ratio - 1.0) < 0.5,
        }
    }
}

impl Default for MineFrequency {
    fn default() -> Self {
        Self::new(5.0)
    }
}

/// Hands out untouched copies of one prepared board, for replays and fixed puzzles.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedLayout {
    template: Board,
}

impl FixedLayout {
    pub fn new(size: Coord, mines: &[Coord2]) -> Result<Self> {
        Ok(Self {
            template: Board::from_mine_coords(size, mines)?,
        })
    }
}

impl LayoutGenerator for FixedLayout {
    fn generate(&mut self, config: GameConfig) -> Board {
        if config.size != self.template.size() {
            log::warn!(
                "Fixed layout is {} cells wide, ignoring requested size {}",
                self.template.size(),
                config.size
            );
        }
        self.template.clone()
    }
}

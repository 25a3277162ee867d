use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::*;

/// Generation strategy that runs one independent trial per cell with the configured [`MineFrequency`].
///
/// The generator owns its RNG, so successive boards from the same seed differ from each other but the whole sequence
/// is reproducible.
#[derive(Clone, Debug)]
pub struct RandomLayoutGenerator {
    rng: SmallRng,
}

impl RandomLayoutGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl LayoutGenerator for RandomLayoutGenerator {
    fn generate(&mut self, config: GameConfig) -> Board {
        let side = config.size;
        let mut mine_mask: Array2<bool> = Array2::default((side, side).to_nd_index());
        for is_mine in mine_mask.iter_mut() {
            *is_mine = config.frequency.sample(&mut self.rng);
        }

        let board = Board::from_mine_mask(side, mine_mask);
        log::debug!(
            "Generated {side}x{side} board with {} mines (ratio {})",
            board.mine_count(),
            config.frequency.ratio()
        );
        board
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_boards() {
        let config = GameConfig::new(12, MineFrequency::new(5.0));
        let mut a = RandomLayoutGenerator::new(42);
        let mut b = RandomLayoutGenerator::new(42);

        assert_eq!(a.generate(config), b.generate(config));
        assert_eq!(a.generate(config), b.generate(config));
    }

    #[test]
    fn generated_board_starts_untouched() {
        let config = GameConfig::new(10, MineFrequency::new(3.0));
        let board = RandomLayoutGenerator::new(7).generate(config);

        assert_eq!(board.size(), 10);
        assert_eq!(board.result(), GameResult::InProgress);
        assert_eq!(board.revealed_count(), 0);
        assert!(
            board
                .iter_cells()
                .all(|(_, cell)| matches!(cell, Cell::Hidden | Cell::Mine))
        );
    }

    #[test]
    fn mine_density_tracks_frequency() {
        let config = GameConfig::new(100, MineFrequency::new(4.0));
        let board = RandomLayoutGenerator::new(1).generate(config);

        // 10000 trials at p = 0.25; anything outside this window is far beyond noise
        let mines = board.mine_count();
        assert!((2200..2800).contains(&mines), "got {mines} mines");
    }

    #[test]
    fn legacy_density_tracks_rounded_odds() {
        let frequency = MineFrequency::with_odds(6.0, Odds::Legacy);
        let config = GameConfig::new(100, frequency);
        let board = RandomLayoutGenerator::new(5).generate(config);

        // 10000 trials at p = 0.1
        let mines = board.mine_count();
        assert_eq!(frequency.mine_probability(), 0.1);
        assert!((800..1200).contains(&mines), "got {mines} mines");
    }
}

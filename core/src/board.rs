use alloc::vec;
use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl GameResult {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    /// Text shown to the player when the game ends.
    pub const fn message(self) -> &'static str {
        match self {
            Self::InProgress => "",
            Self::Won => "You won!",
            Self::Lost => "Game over",
        }
    }
}

/// Square minesweeper grid together with the state of the game played on it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoardRecord")]
pub struct Board {
    cells: Array2<Cell>,
    size: Coord,
    mine_count: CellCount,
    revealed_count: CellCount,
    flag_count: CellCount,
    result: GameResult,
    triggered_mine: Option<Coord2>,
    #[serde(skip)]
    changes: Vec<Coord2>,
}

/// Serialized form of a [`Board`]. Counters are derived from the cells again on load.
#[derive(Deserialize)]
struct BoardRecord {
    cells: Array2<Cell>,
    size: Coord,
    result: GameResult,
    triggered_mine: Option<Coord2>,
}

impl TryFrom<BoardRecord> for Board {
    type Error = GameError;

    fn try_from(record: BoardRecord) -> Result<Self> {
        let BoardRecord {
            cells,
            size,
            result,
            triggered_mine,
        } = record;

        let side = usize::from(size);
        if cells.dim() != (side, side) {
            return Err(GameError::InvalidBoardShape);
        }
        if triggered_mine.is_some_and(|(x, y)| x >= size || y >= size) {
            return Err(GameError::InvalidCoords);
        }

        let count = |keep: fn(Cell) -> bool| -> CellCount {
            // at most 255 * 255 cells, so this always fits
            cells.iter().filter(|&&cell| keep(cell)).count() as CellCount
        };
        Ok(Self {
            mine_count: count(Cell::has_mine),
            revealed_count: count(Cell::is_revealed),
            flag_count: count(Cell::is_flagged),
            cells,
            size,
            result,
            triggered_mine,
            changes: Vec::new(),
        })
    }
}

impl Board {
    pub(crate) fn from_mine_mask(size: Coord, mine_mask: Array2<bool>) -> Self {
        let cells = mine_mask.mapv(Cell::from_mine);
        let mine_count = cells
            .iter()
            .filter(|cell| cell.has_mine())
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX);
        Self {
            cells,
            size,
            mine_count,
            revealed_count: 0,
            flag_count: 0,
            result: GameResult::InProgress,
            triggered_mine: None,
            changes: Vec::new(),
        }
    }

    pub fn from_mine_coords(size: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default((size, size).to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size || coords.1 >= size {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(size, mine_mask))
    }

    pub fn generate(config: GameConfig, seed: u64) -> Self {
        RandomLayoutGenerator::new(seed).generate(config)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.size && coords.1 < self.size {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord {
        self.size
    }

    pub fn result(&self) -> GameResult {
        self.result
    }

    pub fn is_finished(&self) -> bool {
        self.result.is_finished()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        square(self.size) - self.mine_count
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flag_count(&self) -> CellCount {
        self.flag_count
    }

    /// Mines not yet accounted for by a flag. Goes negative when the player over-flags.
    pub fn mines_left(&self) -> i32 {
        i32::from(self.mine_count) - i32::from(self.flag_count)
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<Cell> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    pub fn has_mine_at(&self, coords: Coord2) -> bool {
        self.cell_at(coords).is_some_and(Cell::has_mine)
    }

    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((x, y), &cell)| ((x as Coord, y as Coord), cell))
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> Result<u8> {
        let coords = self.validate_coords(coords)?;
        Ok(self.count_adjacent_mines(coords))
    }

    /// Every safe cell has been revealed. Mines may still be hidden or flagged.
    pub fn is_won(&self) -> bool {
        self.revealed_count == self.safe_cell_count()
    }

    /// Locations mutated since the previous call, in mutation order.
    pub fn take_changes(&mut self) -> Vec<Coord2> {
        core::mem::take(&mut self.changes)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.validate_coords(coords)?;
        self.check_in_progress()?;

        let Some(toggled) = self[coords].toggled_flag() else {
            return Ok(FlagOutcome::NoChange);
        };
        self.set(coords, toggled);
        if toggled.is_flagged() {
            self.flag_count += 1;
        } else {
            self.flag_count -= 1;
        }

        if toggled == Cell::FlaggedMine && self.is_won() {
            self.result = GameResult::Won;
            return Ok(FlagOutcome::Won);
        }
        Ok(FlagOutcome::Changed)
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        use Cell::*;

        let coords = self.validate_coords(coords)?;
        self.check_in_progress()?;

        Ok(match self[coords] {
            Hidden => self.clear_from(coords),
            Mine => {
                self.detonate(coords);
                RevealOutcome::HitMine
            }
            FlaggedSafe | FlaggedMine | Revealed(_) | Exposed => RevealOutcome::NoChange,
        })
    }

    /// Reveals `start` and, through an explicit worklist, every hidden cell reachable over zero-count cells.
    fn clear_from(&mut self, start: Coord2) -> RevealOutcome {
        let mut frontier = vec![];
        if self.uncover(start) == 0 {
            frontier.push(start);
        }

        while let Some(coords) = frontier.pop() {
            for pos in self.neighbors(coords) {
                // cells are uncovered before they are queued, so nothing is visited twice
                if self[pos] == Cell::Hidden && self.uncover(pos) == 0 {
                    frontier.push(pos);
                }
            }
        }

        if self.is_won() {
            self.result = GameResult::Won;
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    fn uncover(&mut self, coords: Coord2) -> u8 {
        let count = self.count_adjacent_mines(coords);
        self.set(coords, Cell::Revealed(count));
        self.revealed_count += 1;
        count
    }

    fn detonate(&mut self, trigger: Coord2) {
        self.triggered_mine = Some(trigger);
        self.result = GameResult::Lost;

        for ((x, y), cell) in self.cells.indexed_iter_mut() {
            if !matches!(cell, Cell::Mine | Cell::FlaggedMine) {
                continue;
            }
            if cell.is_flagged() {
                self.flag_count -= 1;
            }
            *cell = Cell::Exposed;
            self.changes.push((x as Coord, y as Coord));
        }
    }

    fn set(&mut self, coords: Coord2, cell: Cell) {
        self.cells[coords.to_nd_index()] = cell;
        self.changes.push(coords);
    }

    fn count_adjacent_mines(&self, coords: Coord2) -> u8 {
        let count = self
            .neighbors(coords)
            .filter(|&pos| self[pos].has_mine())
            .count();
        count as u8
    }

    fn neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    fn check_in_progress(&self) -> Result<()> {
        if self.result.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn board(size: Coord, mines: &[Coord2]) -> Board {
        Board::from_mine_coords(size, mines).unwrap()
    }

    fn in_bounds_neighbors(size: Coord, (x, y): Coord2) -> usize {
        let span = |c: Coord| {
            let lo = c.saturating_sub(1);
            let hi = (c + 1).min(size - 1);
            usize::from(hi - lo + 1)
        };
        span(x) * span(y) - 1
    }

    #[test]
    fn single_safe_cell_wins_on_reveal() {
        let mut board = board(1, &[]);

        assert_eq!(board.reveal((0, 0)).unwrap(), RevealOutcome::Won);
        assert_eq!(board.cell_at((0, 0)), Some(Cell::Revealed(0)));
        assert_eq!(board.result(), GameResult::Won);
    }

    #[test]
    fn center_mine_border_cells_count_one_and_win() {
        let mut board = board(3, &[(1, 1)]);

        assert_eq!(board.reveal((0, 0)).unwrap(), RevealOutcome::Revealed);
        assert_eq!(board.cell_at((0, 0)), Some(Cell::Revealed(1)));
        assert_eq!(board.revealed_count(), 1);

        let border = [(1, 0), (2, 0), (0, 1), (2, 1), (0, 2), (1, 2)];
        for coords in border {
            assert_eq!(board.reveal(coords).unwrap(), RevealOutcome::Revealed);
        }
        assert_eq!(board.reveal((2, 2)).unwrap(), RevealOutcome::Won);

        for (coords, cell) in board.iter_cells() {
            if coords == (1, 1) {
                assert_eq!(cell, Cell::Mine);
            } else {
                assert_eq!(cell, Cell::Revealed(1));
            }
        }
    }

    #[test]
    fn flood_fill_stops_at_numbered_border() {
        // mine in the far corner leaves a zero region bounded by three numbered cells
        let mut board = board(4, &[(3, 3)]);

        assert_eq!(board.reveal((0, 0)).unwrap(), RevealOutcome::Won);
        assert_eq!(board.cell_at((0, 0)), Some(Cell::Revealed(0)));
        assert_eq!(board.cell_at((2, 2)), Some(Cell::Revealed(1)));
        assert_eq!(board.cell_at((3, 2)), Some(Cell::Revealed(1)));
        assert_eq!(board.cell_at((2, 3)), Some(Cell::Revealed(1)));
        assert_eq!(board.cell_at((3, 3)), Some(Cell::Mine));
    }

    #[test]
    fn flood_fill_reveals_only_the_connected_region() {
        // a wall of mines down column 2 splits the board
        let mut board = board(5, &[(2, 0), (2, 1), (2, 2), (2, 3), (2, 4)]);

        assert_eq!(board.reveal((0, 2)).unwrap(), RevealOutcome::Revealed);

        for (coords, cell) in board.iter_cells() {
            match coords.0 {
                0 => assert_eq!(cell, Cell::Revealed(0)),
                1 => assert!(matches!(cell, Cell::Revealed(n) if n > 0), "{coords:?}"),
                2 => assert_eq!(cell, Cell::Mine),
                _ => assert_eq!(cell, Cell::Hidden),
            }
        }
        assert_eq!(board.revealed_count(), 10);
        assert!(!board.is_won());
    }

    #[test]
    fn flood_fill_skips_flagged_cells() {
        let mut board = board(3, &[]);
        board.toggle_flag((2, 2)).unwrap();

        assert_eq!(board.reveal((0, 0)).unwrap(), RevealOutcome::Revealed);
        assert_eq!(board.cell_at((2, 2)), Some(Cell::FlaggedSafe));
        assert_eq!(board.revealed_count(), 8);
        assert!(!board.is_won());
    }

    #[test]
    fn flood_fill_handles_large_open_board() {
        let mut board = board(Coord::MAX, &[]);

        assert_eq!(board.reveal((127, 127)).unwrap(), RevealOutcome::Won);
        assert_eq!(board.revealed_count(), square(Coord::MAX));
    }

    #[test]
    fn hitting_a_mine_exposes_every_mine() {
        let mut board = board(3, &[(0, 0), (2, 2), (2, 0)]);
        board.toggle_flag((2, 2)).unwrap();
        board.take_changes();

        assert_eq!(board.reveal((0, 0)).unwrap(), RevealOutcome::HitMine);
        assert_eq!(board.result(), GameResult::Lost);
        assert_eq!(board.triggered_mine(), Some((0, 0)));
        for coords in [(0, 0), (2, 2), (2, 0)] {
            assert_eq!(board.cell_at(coords), Some(Cell::Exposed));
        }
        assert_eq!(board.cell_at((1, 1)), Some(Cell::Hidden));
        assert_eq!(board.take_changes().len(), 3);
        assert_eq!(board.flag_count(), 0);
    }

    #[test]
    fn flagged_cells_are_shielded_from_reveal() {
        let mut board = board(2, &[(0, 0)]);
        board.toggle_flag((0, 0)).unwrap();
        board.toggle_flag((1, 1)).unwrap();

        assert_eq!(board.reveal((0, 0)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(board.reveal((1, 1)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(board.result(), GameResult::InProgress);
    }

    #[test]
    fn double_flag_toggle_restores_cell() {
        let mut board = board(2, &[(0, 0)]);
        let before = board.clone();

        for coords in [(0, 0), (1, 0)] {
            assert_eq!(board.toggle_flag(coords).unwrap(), FlagOutcome::Changed);
            assert_eq!(board.toggle_flag(coords).unwrap(), FlagOutcome::Changed);
        }
        board.take_changes();

        assert_eq!(board, before);
    }

    #[test]
    fn revealed_cells_ignore_flags_and_reveals() {
        let mut board = board(2, &[(0, 0)]);
        board.reveal((1, 1)).unwrap();

        assert_eq!(board.toggle_flag((1, 1)).unwrap(), FlagOutcome::NoChange);
        assert_eq!(board.reveal((1, 1)).unwrap(), RevealOutcome::NoChange);
    }

    #[test]
    fn flagging_a_mine_can_finish_the_game() {
        let mut board = board(1, &[(0, 0)]);

        assert_eq!(board.toggle_flag((0, 0)).unwrap(), FlagOutcome::Won);
        assert_eq!(board.result(), GameResult::Won);
    }

    #[test]
    fn out_of_bounds_is_rejected_without_change() {
        let mut board = board(2, &[(0, 0)]);
        let before = board.clone();

        assert_eq!(board.reveal((2, 0)), Err(GameError::InvalidCoords));
        assert_eq!(board.toggle_flag((0, 5)), Err(GameError::InvalidCoords));
        assert_eq!(board.adjacent_mine_count((9, 9)), Err(GameError::InvalidCoords));
        assert_eq!(board, before);
    }

    #[test]
    fn finished_game_rejects_moves() {
        let mut board = board(2, &[(0, 0)]);
        board.reveal((0, 0)).unwrap();

        assert_eq!(board.reveal((1, 1)), Err(GameError::AlreadyEnded));
        assert_eq!(board.toggle_flag((1, 1)), Err(GameError::AlreadyEnded));
    }

    #[test]
    fn adjacent_count_never_exceeds_in_bounds_neighbors() {
        let size = 6;
        let mines: Vec<Coord2> = (0..size)
            .flat_map(|x| (0..size).map(move |y| (x, y)))
            .filter(|&(x, y)| (x + y) % 2 == 0 || x == 0)
            .collect();
        let board = board(size, &mines);

        for (coords, _) in board.iter_cells() {
            let count = board.adjacent_mine_count(coords).unwrap();
            assert!(usize::from(count) <= in_bounds_neighbors(size, coords));
        }

        let full = Board::from_mine_coords(3, &[
            (0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1), (0, 2), (1, 2), (2, 2),
        ])
        .unwrap();
        assert_eq!(full.adjacent_mine_count((0, 0)), Ok(3));
        assert_eq!(full.adjacent_mine_count((1, 0)), Ok(5));
        assert_eq!(full.adjacent_mine_count((1, 1)), Ok(8));
    }

    #[test]
    fn is_won_matches_revealed_against_safe_cells() {
        let mut board = board(3, &[(0, 0), (2, 2)]);
        let safe: Vec<Coord2> = board
            .iter_cells()
            .filter(|(_, cell)| !cell.has_mine())
            .map(|(coords, _)| coords)
            .collect();

        for coords in safe {
            assert_eq!(board.is_won(), board.revealed_count() == 9 - 2);
            if board.is_finished() {
                break;
            }
            board.reveal(coords).unwrap();
        }
        assert!(board.is_won());
        assert_eq!(board.result(), GameResult::Won);
    }

    #[test]
    fn deserialized_board_keeps_its_state() {
        let mut board = board(3, &[(0, 0)]);
        board.reveal((1, 1)).unwrap();
        board.toggle_flag((0, 0)).unwrap();
        board.take_changes();

        let json = serde_json::to_string(&board).unwrap();
        let restored: Board = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, board);
        assert_eq!(restored.flag_count(), 1);
        assert_eq!(restored.revealed_count(), board.revealed_count());
    }

    #[test]
    fn deserializing_rejects_size_that_does_not_match_cells() {
        let json = serde_json::to_string(&board(2, &[])).unwrap();
        let resized = json.replace("\"size\":2", "\"size\":5");
        assert_ne!(json, resized);

        let err = serde_json::from_str::<Board>(&resized).unwrap_err();
        assert!(
            err.to_string().contains("Board shape does not match declared size"),
            "{err}"
        );
    }

    #[test]
    fn deserializing_recomputes_tampered_counters() {
        let json = serde_json::to_string(&board(2, &[])).unwrap();
        let tampered = json.replace("\"mine_count\":0", "\"mine_count\":60000");
        assert_ne!(json, tampered);

        let mut restored: Board = serde_json::from_str(&tampered).unwrap();

        assert_eq!(restored.mine_count(), 0);
        assert_eq!(restored.safe_cell_count(), 4);
        assert_eq!(restored.reveal((5, 5)), Err(GameError::InvalidCoords));
        assert_eq!(restored.reveal((0, 0)).unwrap(), RevealOutcome::Won);
    }

    #[test]
    fn mines_left_tracks_flags() {
        let mut board = board(3, &[(0, 0)]);
        board.toggle_flag((1, 1)).unwrap();
        board.toggle_flag((2, 2)).unwrap();

        assert_eq!(board.mines_left(), -1);
    }
}

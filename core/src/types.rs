use ndarray::Array2;

/// Single coordinate axis used for the board side length and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional location `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// Number of cells on a square board with `side` cells per row.
pub const fn square(side: Coord) -> CellCount {
    let side = side as CellCount;
    side * side
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter {
        let (rows, cols) = self.dim();
        let clip = |len: usize| Coord::try_from(len).unwrap_or(Coord::MAX);
        NeighborIter::new(center, (clip(rows), clip(cols)))
    }
}

/// Walks the 3x3 block around `center` row by row, skipping the center itself
/// and anything that falls off the board.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    step: u8,
}

impl NeighborIter {
    const CENTER_STEP: u8 = 4;
    const BLOCK: u8 = 9;

    pub(crate) fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            step: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while self.step < Self::BLOCK {
            let step = self.step;
            self.step += 1;
            if step == Self::CENTER_STEP {
                continue;
            }

            // shifted by one so the left/top column never underflows
            let x = u16::from(self.center.0) + u16::from(step % 3);
            let y = u16::from(self.center.1) + u16::from(step / 3);
            if x == 0 || y == 0 {
                continue;
            }

            let (x, y) = (x - 1, y - 1);
            if x < u16::from(self.bounds.0) && y < u16::from(self.bounds.1) {
                return Some((x as Coord, y as Coord));
            }
        }
        None
    }
}

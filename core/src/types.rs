/// Column or row position. Boards are at most 255 cells on a side.
pub type Coord = u8;

/// Enough to count every cell of the largest board.
pub type CellCount = u16;

/// `(column, row)`, used as `[x, y]` into every cell grid.
pub type Coord2 = (Coord, Coord);

/// Position into an `ndarray` grid laid out as `[column, row]`.
pub trait GridIndex {
    fn grid_index(self) -> [usize; 2];
}

impl GridIndex for Coord2 {
    fn grid_index(self) -> [usize; 2] {
        [self.0.into(), self.1.into()]
    }
}

/// Number of cells on a board of `size`.
pub const fn cell_count(size: Coord2) -> CellCount {
    size.0 as CellCount * size.1 as CellCount
}

const OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Iterates the up-to-8 cells surrounding `center` that fall inside `bounds`.
pub fn neighbors(center: Coord2, bounds: Coord2) -> NeighborIter {
    NeighborIter {
        center,
        bounds,
        next: 0,
    }
}

#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    next: usize,
}

impl NeighborIter {
    fn shifted(&self, (dx, dy): (i8, i8)) -> Option<Coord2> {
        let x = self.center.0.checked_add_signed(dx)?;
        let y = self.center.1.checked_add_signed(dy)?;
        (x < self.bounds.0 && y < self.bounds.1).then_some((x, y))
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&offset) = OFFSETS.get(self.next) {
            self.next += 1;
            if let Some(coords) = self.shifted(offset) {
                return Some(coords);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_has_three_neighbors() {
        assert_eq!(neighbors((0, 0), (3, 3)).count(), 3);
        assert_eq!(neighbors((2, 2), (3, 3)).count(), 3);
    }

    #[test]
    fn center_has_eight_neighbors() {
        assert_eq!(neighbors((1, 1), (3, 3)).count(), 8);
        assert!(neighbors((1, 1), (3, 3)).all(|coords| coords != (1, 1)));
    }

    #[test]
    fn single_row_board() {
        assert_eq!(neighbors((1, 0), (4, 1)).count(), 2);
        assert_eq!(neighbors((0, 0), (1, 1)).count(), 0);
    }

    #[test]
    fn largest_board_cell_count_fits() {
        assert_eq!(cell_count((255, 255)), 65025);
        assert_eq!(cell_count((7, 1)), 7);
    }
}

use alloc::collections::VecDeque;
use alloc::vec;
use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// The playing field. Mines are placed lazily on the first interaction so the
/// first touched cell is never a mine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoardRepr")]
pub struct Board {
    config: BoardConfig,
    cells: Array2<Cell>,
    source: MineSource,
    initialized: bool,
    marked_count: CellCount,
}

/// Unchecked form of [`Board`] as it arrives from a deserializer.
#[derive(Deserialize)]
struct BoardRepr {
    config: BoardConfig,
    cells: Array2<Cell>,
    source: MineSource,
    initialized: bool,
    marked_count: CellCount,
}

impl TryFrom<BoardRepr> for Board {
    type Error = GameError;

    fn try_from(repr: BoardRepr) -> Result<Self> {
        let BoardRepr {
            config,
            cells,
            source,
            initialized,
            marked_count,
        } = repr;
        config.validate()?;
        if cells.dim() != (usize::from(config.width()), usize::from(config.height())) {
            return Err(GameError::InvalidBoardShape);
        }
        if let MineSource::Fixed(mines) = &source {
            FixedPlacer::new(mines).validate(config.size)?;
            if mines.len() != usize::from(config.mines) {
                return Err(GameError::InvalidLayout);
            }
        }

        let mut marked: CellCount = 0;
        let mut mines: CellCount = 0;
        for cell in cells.iter() {
            if cell.is_opened() && cell.is_marked() {
                return Err(GameError::InvalidBoardShape);
            }
            if initialized != cell.value().is_some() {
                return Err(GameError::InvalidBoardShape);
            }
            if !initialized && (cell.is_opened() || cell.is_marked()) {
                return Err(GameError::InvalidBoardShape);
            }
            marked += CellCount::from(cell.is_marked());
            mines += CellCount::from(cell.has_mine());
        }
        if marked != marked_count || (initialized && mines != config.mines) {
            return Err(GameError::InvalidBoardShape);
        }

        Ok(Self {
            config,
            cells,
            source,
            initialized,
            marked_count,
        })
    }
}

impl Board {
    /// Creates an uninitialized board with randomly placed mines.
    pub fn new(config: BoardConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_source(config, MineSource::Random { seed }))
    }

    /// Creates a board whose mines sit exactly on `mines`.
    pub fn with_mines(size: Coord2, mines: &[Coord2]) -> Result<Self> {
        FixedPlacer::new(mines).validate(size)?;
        let count = CellCount::try_from(mines.len()).map_err(|_| GameError::InvalidLayout)?;
        let config = BoardConfig::new(size, count)?;
        Ok(Self::with_source(config, MineSource::Fixed(mines.to_vec())))
    }

    fn with_source(config: BoardConfig, source: MineSource) -> Self {
        Self {
            config,
            cells: Array2::default(config.size.grid_index()),
            source,
            initialized: false,
            marked_count: 0,
        }
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn mine_count(&self) -> CellCount {
        self.config.mines
    }

    pub fn marked_count(&self) -> CellCount {
        self.marked_count
    }

    /// How many mines have not been marked yet, negative when over-marked.
    pub fn mines_left(&self) -> isize {
        (self.config.mines as isize) - (self.marked_count as isize)
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn source(&self) -> &MineSource {
        &self.source
    }

    pub fn cell(&self, coords: Coord2) -> Result<&Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(&self[coords])
    }

    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, &Cell)> {
        self.cells
            .indexed_iter()
            .map(|((x, y), cell)| ((x as Coord, y as Coord), cell))
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (width, height) = self.size();
        if coords.0 < width && coords.1 < height {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoordinate)
        }
    }

    /// Places mines away from `exclude` and derives every adjacent count.
    /// Does nothing once the board is initialized.
    pub fn initialize(&mut self, exclude: Coord2) -> Result<()> {
        let exclude = self.validate_coords(exclude)?;
        if self.initialized {
            return Ok(());
        }

        let mask = self.source.place(self.config, exclude);
        let size = self.size();
        for ((x, y), cell) in self.cells.indexed_iter_mut() {
            let coords = (x as Coord, y as Coord);
            if mask[coords.grid_index()] {
                cell.set_value(CellValue::Mine);
            } else {
                let count = neighbors(coords, size)
                    .filter(|pos| mask[pos.grid_index()])
                    .count();
                cell.set_value(CellValue::Count(count as u8));
            }
        }

        self.initialized = true;
        log::debug!("Board initialized, first cell {:?}", exclude);
        Ok(())
    }

    /// Replaces the seed used by the next random initialization.
    pub fn reseed(&mut self, seed: u64) {
        if let MineSource::Random { seed: current } = &mut self.source {
            *current = seed;
        }
    }

    /// Resets every cell so a new round can start on the same board.
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(Cell::clear);
        self.initialized = false;
        self.marked_count = 0;
    }

    /// Opens a closed cell. Opening a zero cell cascades over its neighbours.
    ///
    /// Marked cells are never opened, not even by the cascade, so a mark on a
    /// zero cell cuts the region short. The opened cells form the whole
    /// connected zero region and its border only while no marks are present.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealResult> {
        let coords = self.validate_coords(coords)?;
        self.initialize(coords)?;

        let cell = &mut self.cells[coords.grid_index()];
        if cell.is_opened() {
            return Err(GameError::AlreadyOpened);
        }
        if cell.is_marked() {
            return Err(GameError::CellMarked);
        }
        cell.open();
        let has_mine = cell.has_mine();
        let count = cell.adjacent_count();

        let mut result = RevealResult {
            opened: vec![coords],
            triggered_mine: has_mine,
        };
        if has_mine {
            log::debug!("Mine opened at {:?}", coords);
            return Ok(result);
        }

        log::debug!("Open cell at {:?}, mine count: {:?}", coords, count);
        if count == Some(0) {
            self.flood_open(coords, &mut result.opened);
        }
        Ok(result)
    }

    fn flood_open(&mut self, origin: Coord2, opened: &mut Vec<Coord2>) {
        let size = self.size();
        let mut to_visit = VecDeque::from([origin]);

        while let Some(center) = to_visit.pop_front() {
            for coords in neighbors(center, size) {
                let cell = &mut self.cells[coords.grid_index()];
                if cell.is_opened() || cell.is_marked() {
                    continue;
                }

                cell.open();
                opened.push(coords);
                log::trace!(
                    "Flood opened cell at {:?}, mine count: {:?}",
                    coords,
                    cell.adjacent_count()
                );

                if cell.adjacent_count() == Some(0) {
                    to_visit.push_back(coords);
                }
            }
        }
    }

    pub fn mark(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;
        self.initialize(coords)?;

        let cell = &mut self.cells[coords.grid_index()];
        if cell.is_opened() {
            return Err(GameError::AlreadyOpened);
        }
        if cell.is_marked() {
            return Ok(MarkOutcome::NoChange);
        }
        cell.mark();
        self.marked_count += 1;
        Ok(MarkOutcome::Changed)
    }

    pub fn unmark(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;

        let cell = &mut self.cells[coords.grid_index()];
        if cell.is_opened() {
            return Err(GameError::AlreadyOpened);
        }
        if !cell.is_marked() {
            return Ok(MarkOutcome::NoChange);
        }
        cell.unmark();
        self.marked_count -= 1;
        Ok(MarkOutcome::Changed)
    }

    /// Flips the mark on a closed cell, returning whether it is now marked.
    pub fn toggle_mark(&mut self, coords: Coord2) -> Result<bool> {
        let coords = self.validate_coords(coords)?;
        if self[coords].is_marked() {
            self.unmark(coords)?;
            Ok(false)
        } else {
            self.mark(coords)?;
            Ok(true)
        }
    }

    /// Any opened mine loses. Winning needs every safe cell opened and every
    /// mine marked.
    pub fn status(&self) -> GameStatus {
        let mut opened_safe: CellCount = 0;
        let mut marked_mines: CellCount = 0;

        for cell in self.cells.iter() {
            match (cell.has_mine(), cell.is_opened()) {
                (true, true) => return GameStatus::Lost,
                (true, false) if cell.is_marked() => marked_mines += 1,
                (false, true) => opened_safe += 1,
                _ => {}
            }
        }

        if self.initialized
            && marked_mines == self.config.mines
            && opened_safe == self.config.safe_cells()
        {
            GameStatus::Won
        } else {
            GameStatus::InProgress
        }
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.grid_index()]
    }
}

use thiserror::Error;

use crate::{CellCount, Coord2};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoordinate,
    #[error("Cell is already open")]
    AlreadyOpened,
    #[error("Cell is marked, unmark it first")]
    CellMarked,
    #[error("Cannot place {mines} mines on a {}x{} board", .size.0, .size.1)]
    Configuration { size: Coord2, mines: CellCount },
    #[error("Mine layout repeats a cell")]
    InvalidLayout,
    #[error("Board cells do not match its configuration")]
    InvalidBoardShape,
    #[error("Round already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;

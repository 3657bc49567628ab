use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Decides where mines go. `exclude` is the cell the player touched first.
pub trait MinePlacer {
    fn place(self, config: BoardConfig, exclude: Coord2) -> Array2<bool>;
}

/// Where a board gets its mines from when it is initialized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MineSource {
    Random { seed: u64 },
    Fixed(Vec<Coord2>),
}

impl MineSource {
    pub fn place(&self, config: BoardConfig, exclude: Coord2) -> Array2<bool> {
        match self {
            Self::Random { seed } => RandomPlacer::new(*seed).place(config, exclude),
            Self::Fixed(coords) => FixedPlacer::new(coords).place(config, exclude),
        }
    }
}

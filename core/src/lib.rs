#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod generator;
mod session;
mod types;

/// Board dimensions and mine count.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl BoardConfig {
    /// Board used when nothing else is requested.
    pub const DEFAULT: Self = Self::new_unchecked((8, 8), 10);
    /// Layout for the regular web page.
    pub const WEB: Self = Self::new_unchecked((10, 10), 8);
    /// Smaller layout with bigger cells for direct-games embedding.
    pub const DIRECT_GAMES: Self = Self::new_unchecked((7, 7), 6);

    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, mines);
        config.validate()?;
        Ok(config)
    }

    /// At least one cell has to stay free so the first click can always be excluded.
    pub fn validate(&self) -> Result<()> {
        let (width, height) = self.size;
        if width == 0 || height == 0 || self.mines >= self.total_cells() {
            return Err(GameError::Configuration {
                size: self.size,
                mines: self.mines,
            });
        }
        Ok(())
    }

    pub const fn width(&self) -> Coord {
        self.size.0
    }

    pub const fn height(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cells(&self) -> CellCount {
        cell_count(self.size)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Whether a mark or unmark request flipped the cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

/// Cells opened by a single reveal, in the order they were opened.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RevealResult {
    pub opened: Vec<Coord2>,
    pub triggered_mine: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        for config in [
            BoardConfig::DEFAULT,
            BoardConfig::WEB,
            BoardConfig::DIRECT_GAMES,
        ] {
            assert_eq!(config.validate(), Ok(()));
        }
        assert_eq!(BoardConfig::WEB.safe_cells(), 92);
    }

    #[test]
    fn config_rejects_full_board() {
        assert_eq!(
            BoardConfig::new((3, 3), 9),
            Err(GameError::Configuration {
                size: (3, 3),
                mines: 9
            })
        );
        assert!(BoardConfig::new((3, 3), 8).is_ok());
    }

    #[test]
    fn config_rejects_empty_dimensions() {
        assert!(BoardConfig::new((0, 5), 0).is_err());
        assert!(BoardConfig::new((5, 0), 0).is_err());
    }
}

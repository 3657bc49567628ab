use super::*;

/// Places mines on a predetermined set of cells. The excluded cell is not
/// honored, a forced layout is exactly what it says.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedPlacer<'a> {
    coords: &'a [Coord2],
}

impl<'a> FixedPlacer<'a> {
    pub fn new(coords: &'a [Coord2]) -> Self {
        Self { coords }
    }

    /// Checks the coordinates fit `size` and never repeat.
    pub fn validate(&self, size: Coord2) -> Result<()> {
        let mut seen: Array2<bool> = Array2::default(size.grid_index());
        for &coords in self.coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoordinate);
            }
            if core::mem::replace(&mut seen[coords.grid_index()], true) {
                return Err(GameError::InvalidLayout);
            }
        }
        Ok(())
    }
}

impl MinePlacer for FixedPlacer<'_> {
    fn place(self, config: BoardConfig, _exclude: Coord2) -> Array2<bool> {
        let mut mask: Array2<bool> = Array2::default(config.size.grid_index());
        for &coords in self.coords {
            if let Some(slot) = mask.get_mut(coords.grid_index()) {
                *slot = true;
            } else {
                log::warn!("Ignoring mine outside the board at {:?}", coords);
            }
        }
        mask
    }
}

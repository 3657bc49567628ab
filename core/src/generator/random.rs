use super::*;

/// Uniform placement: keep drawing random cells, skipping the excluded cell and
/// cells that already hold a mine, until every mine is down.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomPlacer {
    seed: u64,
}

impl RandomPlacer {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinePlacer for RandomPlacer {
    fn place(self, config: BoardConfig, exclude: Coord2) -> Array2<bool> {
        use rand::prelude::*;

        let (width, height) = config.size;
        let mut mask: Array2<bool> = Array2::default(config.size.grid_index());

        // the excluded cell always has to remain free
        let free_cells = config.total_cells().saturating_sub(1);
        let mines = if config.mines > free_cells {
            log::warn!(
                "Too many mines requested, placing {} instead of {}",
                free_cells,
                config.mines
            );
            free_cells
        } else {
            config.mines
        };

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut placed: CellCount = 0;
        while placed < mines {
            let coords: Coord2 = (rng.random_range(0..width), rng.random_range(0..height));
            if coords == exclude || mask[coords.grid_index()] {
                continue;
            }
            mask[coords.grid_index()] = true;
            placed += 1;
        }

        log::debug!(
            "Placed {} mines on {}x{} board (seed {}, excluded {:?})",
            placed,
            width,
            height,
            self.seed,
            exclude
        );
        mask
    }
}

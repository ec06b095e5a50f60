//! Food placement under the "never inside the snake" constraint.

use rand::Rng;
use tracing::{debug, warn};

use super::error::GameError;
use super::grid::{Grid, Position};
use super::state::Occupant;

/// Random draws per grid cell before falling back to scanning free cells
pub const RELOCATE_SAMPLE_ATTEMPTS_PER_CELL: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Food {
    position: Position,
}

impl Food {
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Place food on a random cell outside `forbidden`
    pub fn spawn<O, R>(grid: &Grid, forbidden: &O, rng: &mut R) -> Result<Self, GameError>
    where
        O: Occupant + ?Sized,
        R: Rng + ?Sized,
    {
        let mut food = Self::new(grid.center());
        food.relocate(grid, forbidden, rng)?;
        Ok(food)
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn is_consumed(&self, head: Position) -> bool {
        head == self.position
    }

    /// Move to a uniformly random cell not in `forbidden`.
    ///
    /// Rejection sampling runs for a bounded number of draws; if those all hit
    /// the snake, the free cells are enumerated and one is picked uniformly.
    /// On a full board the position is left untouched and an error returned.
    pub fn relocate<O, R>(
        &mut self,
        grid: &Grid,
        forbidden: &O,
        rng: &mut R,
    ) -> Result<(), GameError>
    where
        O: Occupant + ?Sized,
        R: Rng + ?Sized,
    {
        let attempts = grid.cell_count() * RELOCATE_SAMPLE_ATTEMPTS_PER_CELL;
        for _ in 0..attempts {
            let candidate = random_cell(grid, rng);
            if !forbidden.covers(candidate) {
                debug!(x = candidate.x, y = candidate.y, "food relocated");
                self.position = candidate;
                return Ok(());
            }
        }

        let free: Vec<Position> = grid.cells().filter(|c| !forbidden.covers(*c)).collect();
        if free.is_empty() {
            return Err(GameError::FoodPlacementExhausted {
                width: grid.width(),
                height: grid.height(),
                occupied: forbidden.cells().len(),
            });
        }
        warn!(
            free = free.len(),
            attempts,
            "random food placement kept hitting the snake, scanning free cells"
        );
        self.position = free[rng.gen_range(0..free.len())];
        Ok(())
    }
}

impl Occupant for Food {
    fn cells(&self) -> &[Position] {
        std::slice::from_ref(&self.position)
    }
}

fn random_cell<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Position {
    Position::new(
        rng.gen_range(0..grid.width()) as i32,
        rng.gen_range(0..grid.height()) as i32,
    )
}

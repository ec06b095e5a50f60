//! Grid geometry shared by the snake and the food
//!
//! The board is a torus: stepping off one edge re-enters on the opposite one.

use super::action::Direction;
use super::error::ConfigError;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta, without wrapping
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction, without wrapping
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// Dimensions of the toroidal board, in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyGrid { width, height });
        }
        match (i32::try_from(width), i32::try_from(height)) {
            (Ok(w), Ok(h)) => Ok(Self {
                width: w,
                height: h,
            }),
            _ => Err(ConfigError::GridTooLarge { width, height }),
        }
    }

    /// Derive the cell grid from a screen size and a square cell size.
    /// Partial cells at the right and bottom edges are dropped.
    pub fn from_screen(
        screen_width: u32,
        screen_height: u32,
        cell_size: u32,
    ) -> Result<Self, ConfigError> {
        if cell_size == 0 || screen_width < cell_size || screen_height < cell_size {
            return Err(ConfigError::ScreenSmallerThanCell {
                screen_width,
                screen_height,
                cell_size,
            });
        }
        Self::new(
            (screen_width / cell_size) as usize,
            (screen_height / cell_size) as usize,
        )
    }

    pub fn width(&self) -> usize {
        self.width as usize
    }

    pub fn height(&self) -> usize {
        self.height as usize
    }

    pub fn cell_count(&self) -> usize {
        self.width() * self.height()
    }

    pub fn center(&self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    pub fn contains(&self, pos: Position) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }

    /// Fold any position back onto the board
    pub fn wrap(&self, pos: Position) -> Position {
        Position::new(pos.x.rem_euclid(self.width), pos.y.rem_euclid(self.height))
    }

    /// The neighbouring cell in `direction`, wrapping at the edges
    pub fn step(&self, pos: Position, direction: Direction) -> Position {
        self.wrap(pos.moved_in_direction(direction))
    }

    /// Every cell in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Position::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_by(0, 1), Position::new(5, 6));
        assert_eq!(pos.moved_by(0, -1), Position::new(5, 4));
    }

    #[test]
    fn test_from_screen_default_size() {
        let grid = Grid::from_screen(640, 480, 20).unwrap();
        assert_eq!(grid.width(), 32);
        assert_eq!(grid.height(), 24);
        assert_eq!(grid.center(), Position::new(16, 12));
    }

    #[test]
    fn test_from_screen_drops_partial_cells() {
        let grid = Grid::from_screen(650, 495, 20).unwrap();
        assert_eq!((grid.width(), grid.height()), (32, 24));
    }

    #[test]
    fn test_invalid_grids() {
        assert!(matches!(Grid::new(0, 10), Err(ConfigError::EmptyGrid { .. })));
        assert!(matches!(
            Grid::from_screen(10, 480, 20),
            Err(ConfigError::ScreenSmallerThanCell { .. })
        ));
        assert!(Grid::from_screen(640, 480, 0).is_err());
    }

    #[test]
    fn test_wrap_at_every_edge() {
        let grid = Grid::new(32, 24).unwrap();
        assert_eq!(
            grid.step(Position::new(31, 7), Direction::Right),
            Position::new(0, 7)
        );
        assert_eq!(
            grid.step(Position::new(0, 7), Direction::Left),
            Position::new(31, 7)
        );
        assert_eq!(
            grid.step(Position::new(3, 0), Direction::Up),
            Position::new(3, 23)
        );
        assert_eq!(
            grid.step(Position::new(3, 23), Direction::Down),
            Position::new(3, 0)
        );
    }

    #[test]
    fn test_cells_enumerates_whole_grid() {
        let grid = Grid::new(3, 2).unwrap();
        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(cells.len(), grid.cell_count());
        assert_eq!(cells[0], Position::new(0, 0));
        assert_eq!(cells[5], Position::new(2, 1));
    }

    proptest! {
        #[test]
        fn prop_step_stays_on_grid(
            w in 1usize..64,
            h in 1usize..64,
            x in 0i32..64,
            y in 0i32..64,
            d in 0usize..4,
        ) {
            let grid = Grid::new(w, h).unwrap();
            let start = grid.wrap(Position::new(x, y));
            let next = grid.step(start, Direction::ALL[d]);
            prop_assert!(grid.contains(next));
        }

        #[test]
        fn prop_step_then_opposite_returns(
            w in 1usize..64,
            h in 1usize..64,
            x in 0i32..64,
            y in 0i32..64,
            d in 0usize..4,
        ) {
            let grid = Grid::new(w, h).unwrap();
            let start = grid.wrap(Position::new(x, y));
            let dir = Direction::ALL[d];
            prop_assert_eq!(grid.step(grid.step(start, dir), dir.opposite()), start);
        }
    }
}

//! Snake entity: direction buffering, movement, growth and self-collision.

use super::action::Direction;
use super::grid::{Grid, Position};
use super::state::Occupant;

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    body: Vec<Position>,
    /// Current direction of movement
    direction: Direction,
    /// Turn requested by input, applied on the next step
    pending_direction: Option<Direction>,
    /// Length the body converges to when advancing
    target_length: usize,
}

impl Snake {
    /// Create a length-1 snake at `head`
    pub fn new(head: Position, direction: Direction) -> Self {
        Self {
            body: vec![head],
            direction,
            pending_direction: None,
            target_length: 1,
        }
    }

    /// Build a snake from explicit segments, head first.
    /// The target length matches the given body; `None` if it is empty.
    pub fn from_body(body: Vec<Position>, direction: Direction) -> Option<Self> {
        if body.is_empty() {
            return None;
        }
        let target_length = body.len();
        Some(Self {
            body,
            direction,
            pending_direction: None,
            target_length,
        })
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub fn body(&self) -> &[Position] {
        &self.body
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    pub fn target_length(&self) -> usize {
        self.target_length
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false: a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Latch a turn for the next step. A reversal of the active direction is
    /// dropped and leaves any earlier request in place.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if self.direction.is_opposite(direction) {
            return false;
        }
        self.pending_direction = Some(direction);
        true
    }

    /// Drop a latched turn without applying it
    pub fn clear_pending_direction(&mut self) {
        self.pending_direction = None;
    }

    /// Apply the latched turn, if any
    pub fn update_direction(&mut self) {
        if let Some(direction) = self.pending_direction.take() {
            self.direction = direction;
        }
    }

    /// Prepend the next head cell and trim the tail down to the target length
    pub fn advance(&mut self, grid: &Grid) {
        let new_head = grid.step(self.head(), self.direction);
        self.body.insert(0, new_head);
        self.body.truncate(self.target_length);
    }

    /// Keep one extra tail cell on the next advance
    pub fn grow(&mut self) {
        self.target_length += 1;
    }

    /// True when the head overlaps any segment from index `skip` onward
    pub fn detect_self_collision(&self, skip: usize) -> bool {
        let head = self.head();
        self.body
            .iter()
            .skip(skip.max(1))
            .any(|segment| *segment == head)
    }

    /// Back to a single cell at `center`
    pub fn reset(&mut self, center: Position, direction: Direction) {
        self.body.clear();
        self.body.push(center);
        self.target_length = 1;
        self.direction = direction;
        self.pending_direction = None;
    }
}

impl Occupant for Snake {
    fn cells(&self) -> &[Position] {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::new(32, 24).unwrap()
    }

    /// A coiled body that bites its own segment at index 6 after turning Up
    fn coiled_snake() -> Snake {
        Snake::from_body(
            vec![
                Position::new(5, 5),
                Position::new(6, 5),
                Position::new(6, 4),
                Position::new(6, 3),
                Position::new(5, 3),
                Position::new(5, 4),
                Position::new(4, 4),
            ],
            Direction::Left,
        )
        .unwrap()
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(16, 12), Direction::Right);
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.target_length(), 1);
        assert_eq!(snake.head(), snake.tail());
        assert_eq!(snake.pending_direction(), None);
    }

    #[test]
    fn test_from_body_needs_a_head() {
        assert!(Snake::from_body(Vec::new(), Direction::Up).is_none());

        let snake = Snake::from_body(vec![Position::new(2, 2)], Direction::Up).unwrap();
        assert_eq!(snake.target_length(), 1);
    }

    #[test]
    fn test_advance_without_growth_shifts_body() {
        let grid = grid();
        let mut snake = Snake::from_body(
            vec![Position::new(5, 5), Position::new(4, 5), Position::new(3, 5)],
            Direction::Right,
        )
        .unwrap();

        snake.advance(&grid);

        assert_eq!(
            snake.body(),
            &[Position::new(6, 5), Position::new(5, 5), Position::new(4, 5)]
        );
    }

    #[test]
    fn test_grow_retains_tail_once() {
        let grid = grid();
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right);

        snake.grow();
        snake.advance(&grid);
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.tail(), Position::new(5, 5));

        snake.advance(&grid);
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.tail(), Position::new(6, 5));
    }

    #[test]
    fn test_advance_wraps_right_edge() {
        let grid = grid();
        let mut snake = Snake::new(Position::new(31, 3), Direction::Right);
        snake.advance(&grid);
        assert_eq!(snake.head(), Position::new(0, 3));
    }

    #[test]
    fn test_request_direction_rejects_reversal() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right);

        assert!(!snake.request_direction(Direction::Left));
        assert_eq!(snake.pending_direction(), None);

        assert!(snake.request_direction(Direction::Up));
        assert!(!snake.request_direction(Direction::Left));
        assert_eq!(snake.pending_direction(), Some(Direction::Up));
    }

    #[test]
    fn test_last_request_wins() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right);
        snake.request_direction(Direction::Up);
        snake.request_direction(Direction::Down);
        snake.update_direction();
        assert_eq!(snake.direction(), Direction::Down);
        assert_eq!(snake.pending_direction(), None);
    }

    #[test]
    fn test_clear_pending_direction() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right);
        snake.request_direction(Direction::Up);
        snake.clear_pending_direction();
        snake.update_direction();
        assert_eq!(snake.direction(), Direction::Right);
    }

    #[test]
    fn test_update_direction_without_pending_is_noop() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Up);
        snake.update_direction();
        assert_eq!(snake.direction(), Direction::Up);
    }

    #[test]
    fn test_collision_beyond_skip_window() {
        let grid = grid();
        let mut snake = coiled_snake();
        snake.request_direction(Direction::Up);
        snake.update_direction();
        snake.advance(&grid);

        // Head (5,4) now equals body[6] after the shift
        assert_eq!(snake.head(), Position::new(5, 4));
        assert!(snake.detect_self_collision(4));
    }

    #[test]
    fn test_collision_inside_skip_window_is_ignored() {
        let snake = Snake::from_body(
            vec![
                Position::new(2, 2),
                Position::new(3, 2),
                Position::new(2, 2),
                Position::new(1, 2),
            ],
            Direction::Left,
        )
        .unwrap();
        assert!(!snake.detect_self_collision(4));
        assert!(snake.detect_self_collision(2));
    }

    #[test]
    fn test_skip_zero_never_matches_head_itself() {
        let snake = Snake::new(Position::new(1, 1), Direction::Up);
        assert!(!snake.detect_self_collision(0));
    }

    #[test]
    fn test_reset() {
        let mut snake = coiled_snake();
        snake.grow();
        snake.request_direction(Direction::Up);

        snake.reset(Position::new(16, 12), Direction::Right);

        assert_eq!(snake.body(), &[Position::new(16, 12)]);
        assert_eq!(snake.target_length(), 1);
        assert_eq!(snake.direction(), Direction::Right);
        assert_eq!(snake.pending_direction(), None);
    }
}

use super::grid::Position;

/// Something that covers cells on the board and can be drawn there
pub trait Occupant {
    /// Occupied cells; for the snake the head comes first
    fn cells(&self) -> &[Position];

    fn covers(&self, pos: Position) -> bool {
        self.cells().contains(&pos)
    }
}

impl Occupant for [Position] {
    fn cells(&self) -> &[Position] {
        self
    }
}

/// Lifecycle of the simulation controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Stepping normally
    Running,
    /// Rebuilding the episode after a self-collision, only seen inside a step
    Resetting,
    /// Quit was requested; further steps are no-ops
    Terminated,
}

/// What a renderer needs to draw one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot<'a> {
    /// Snake cells, head first
    pub body: &'a [Position],
    pub food: Position,
    pub score: u32,
    pub episode: u32,
}

impl Snapshot<'_> {
    pub fn head(&self) -> Position {
        self.body[0]
    }
}

impl Occupant for Snapshot<'_> {
    fn cells(&self) -> &[Position] {
        self.body
    }
}

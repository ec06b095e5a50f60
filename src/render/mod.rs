pub mod renderer;

pub use renderer::{CellKind, Overlay, Renderer};

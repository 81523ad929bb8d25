mod grid;
mod ui;

pub use grid::GridState;
pub use ui::UIState;

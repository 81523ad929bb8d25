pub mod grid;
pub mod menu_bar;
pub mod status;

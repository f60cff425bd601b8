pub mod grid;
pub mod spanning;

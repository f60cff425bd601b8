pub mod cache;
pub mod shapes;

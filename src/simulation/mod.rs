mod cell;
mod grid;
pub mod patterns;

pub use grid::{EdgeWrap, Grid};

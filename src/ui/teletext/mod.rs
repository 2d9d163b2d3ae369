pub mod colors;
pub mod renderer;

pub use renderer::{Screen, compose_screen, render_buffered};

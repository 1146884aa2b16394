pub mod console;
pub mod engine;
pub mod error;
pub mod input;
pub mod level;
pub mod placement;
pub mod render;
pub mod tui;

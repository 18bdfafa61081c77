//! Interactive A* visualiser for the terminal.
//!
//! Left click places the start, then the end, then barriers; right click
//! erases. `Space` animates a search between the endpoints.

pub mod app;
pub mod config;
pub mod model;

pub use app::App;
pub use config::Args;
pub use model::{Effect, Status, Visualizer};

//! Terminal front end for gridstar.
//!
//! Provides input [`Msg`]s, a [`Canvas`] with frame diffing, grid drawing
//! helpers, the [`Driver`] trait with its [`Context`] cancellation token,
//! and a crossterm implementation in [`CrosstermDriver`].

pub mod canvas;
pub mod crossterm;
pub mod driver;
pub mod messages;
pub mod view;

pub use self::crossterm::CrosstermDriver;
pub use canvas::{Canvas, Color, Frame, FrameCell, Glyph, compute_frame};
pub use driver::{Context, Driver};
pub use messages::{Key, Msg, MouseAction};

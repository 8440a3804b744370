//! **gridsearch-term** is a small terminal toolkit for visualizing grid
//! searches.
//!
//! - [`Canvas`] / [`Frame`]: an owned glyph buffer and its diff.
//! - [`Msg`]: keyboard, mouse, resize and tick events.
//! - [`App`]: the Model-View-Update loop with tick pacing.
//! - [`CrosstermDriver`]: the crossterm back-end.

pub mod app;
pub mod canvas;
pub mod driver;
pub mod messages;
pub mod style;

pub use app::{App, AppConfig, Driver, Effect, Model};
pub use canvas::{Canvas, Frame, FrameCell, Glyph};
pub use driver::CrosstermDriver;
pub use messages::{Key, ModMask, MouseAction, Msg};
pub use style::{AttrMask, Color, Style};

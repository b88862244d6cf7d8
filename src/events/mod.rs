//! Terminal events for the viewer loop.

mod handler;

use crossterm::event::{KeyEvent, MouseEvent};

pub use handler::EventHandler;

/// An event delivered to the viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// No input within the tick rate; drives the spinner.
    Tick,
    /// Ctrl+C.
    Quit,
}

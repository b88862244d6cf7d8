//! Event handler implementation.
//!
//! Polls crossterm and converts terminal input to viewer events.

use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind,
};

use super::Event;

/// The tick rate for the event loop in milliseconds.
const TICK_RATE_MS: u64 = 80;

/// Polls crossterm for terminal events on a fixed tick.
pub struct EventHandler {
    tick_rate: Duration,
    last_tick: Instant,
}

impl EventHandler {
    /// Create a new event handler with the default tick rate.
    pub fn new() -> Self {
        Self::with_tick_rate(TICK_RATE_MS)
    }

    pub fn with_tick_rate(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
            last_tick: Instant::now(),
        }
    }

    /// Time left until the next tick is due.
    fn timeout(&self) -> Duration {
        self.tick_rate.saturating_sub(self.last_tick.elapsed())
    }

    /// Block until input arrives or a tick is due.
    ///
    /// Ticks are emitted on schedule even while input keeps arriving, so
    /// the spinner keeps turning during mouse movement.
    pub fn next(&mut self) -> std::io::Result<Event> {
        loop {
            if !event::poll(self.timeout())? {
                self.last_tick = Instant::now();
                return Ok(Event::Tick);
            }
            let converted = match event::read()? {
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                        Some(Event::Quit)
                    } else {
                        Some(Event::Key(key))
                    }
                }
                CrosstermEvent::Mouse(mouse) if mouse.kind != MouseEventKind::Moved => {
                    Some(Event::Mouse(mouse))
                }
                CrosstermEvent::Resize(width, height) => Some(Event::Resize(width, height)),
                _ => None,
            };
            if let Some(event) = converted {
                return Ok(event);
            }
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

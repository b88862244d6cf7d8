//! Progress-or-error indicator.
//!
//! Drawn by the table overlay while a fetch is pending: an animated spinner
//! when there is something to wait for, the caller's error when the fetch
//! failed, or nothing at all.

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use serde::{Deserialize, Serialize};

use super::table::OverlayState;
use crate::ui::theme::TableTheme;

/// Spinner animation frames.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Alternative spinner using simple characters for compatibility.
const SIMPLE_SPINNER_FRAMES: &[&str] = &["|", "/", "-", "\\"];

/// Dots spinner animation.
const DOTS_SPINNER_FRAMES: &[&str] = &["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// Prefix of the error line.
const ERROR_ICON: &str = "✗";

/// The type of spinner to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpinnerStyle {
    /// Braille dots spinner (default).
    #[default]
    Braille,
    /// Simple ASCII spinner for compatibility.
    Simple,
    /// Dots spinner.
    Dots,
}

impl SpinnerStyle {
    /// Get the frames for this spinner style.
    pub fn frames(&self) -> &'static [&'static str] {
        match self {
            SpinnerStyle::Braille => SPINNER_FRAMES,
            SpinnerStyle::Simple => SIMPLE_SPINNER_FRAMES,
            SpinnerStyle::Dots => DOTS_SPINNER_FRAMES,
        }
    }
}

/// Spinner or error display used by the loading overlay.
#[derive(Debug, Clone)]
pub struct ProgressOrError {
    /// Text next to the spinner.
    message: String,
    /// Current spinner frame index.
    frame: usize,
    spinner_style: SpinnerStyle,
}

impl Default for ProgressOrError {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressOrError {
    pub fn new() -> Self {
        Self {
            message: "Loading...".to_string(),
            frame: 0,
            spinner_style: SpinnerStyle::default(),
        }
    }

    pub fn with_style(mut self, style: SpinnerStyle) -> Self {
        self.spinner_style = style;
        self.frame = 0;
        self
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    /// Advance the spinner animation. Call on every tick.
    pub fn tick(&mut self) {
        let frames = self.spinner_style.frames();
        self.frame = (self.frame + 1) % frames.len();
    }

    pub fn spinner_frame(&self) -> &'static str {
        self.spinner_style.frames()[self.frame]
    }

    /// The line to display for an overlay, if any.
    ///
    /// An error takes precedence over the spinner.
    pub fn line(&self, overlay: &OverlayState, theme: &TableTheme) -> Option<Line<'static>> {
        if let Some(error) = &overlay.error {
            return Some(Line::from(vec![
                Span::styled(format!("{} ", ERROR_ICON), theme.error),
                Span::styled(error.clone(), theme.error),
            ]));
        }
        overlay.progress.then(|| {
            Line::styled(
                format!("{} {}", self.spinner_frame(), self.message),
                theme.spinner,
            )
        })
    }

    /// Dim `area` and draw the indicator centered in it.
    pub fn render(&self, frame: &mut Frame, area: Rect, overlay: &OverlayState, theme: &TableTheme) {
        frame.buffer_mut().set_style(area, theme.overlay);

        let Some(line) = self.line(overlay, theme) else {
            return;
        };
        if area.height == 0 {
            return;
        }
        let middle = Rect::new(area.x, area.y + area.height / 2, area.width, 1);
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), middle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn busy() -> OverlayState {
        OverlayState {
            progress: true,
            error: None,
        }
    }

    #[test]
    fn test_spinner_style_frames() {
        assert_eq!(SpinnerStyle::Braille.frames().len(), 10);
        assert_eq!(SpinnerStyle::Simple.frames().len(), 4);
        assert_eq!(SpinnerStyle::Dots.frames().len(), 8);
    }

    #[test]
    fn test_tick_advances_and_wraps() {
        let mut progress = ProgressOrError::new().with_style(SpinnerStyle::Simple);
        let first = progress.spinner_frame();
        progress.tick();
        assert_ne!(progress.spinner_frame(), first);
        for _ in 0..3 {
            progress.tick();
        }
        assert_eq!(progress.spinner_frame(), first);
    }

    #[test]
    fn test_line_shows_spinner_and_message() {
        let mut progress = ProgressOrError::new();
        progress.set_message("Fetching claims");
        let line = progress.line(&busy(), &TableTheme::default()).unwrap();
        assert!(line.to_string().contains("Fetching claims"));
    }

    #[test]
    fn test_error_takes_precedence() {
        let overlay = OverlayState {
            progress: true,
            error: Some("Server unavailable".to_string()),
        };
        let line = ProgressOrError::new()
            .line(&overlay, &TableTheme::default())
            .unwrap();
        let text = line.to_string();
        assert!(text.contains("Server unavailable"));
        assert!(!text.contains("Loading"));
    }

    #[test]
    fn test_nothing_to_show() {
        let overlay = OverlayState {
            progress: false,
            error: None,
        };
        assert!(ProgressOrError::new()
            .line(&overlay, &TableTheme::default())
            .is_none());
    }

    #[test]
    fn test_spinner_style_deserializes_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            spinner: SpinnerStyle,
        }
        let parsed: Wrapper = toml::from_str("spinner = \"dots\"").unwrap();
        assert_eq!(parsed.spinner, SpinnerStyle::Dots);
    }
}

//! Loading overlay composition.

/// What the overlay shows while a fetch is pending or has failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayState {
    /// Show the busy indicator.
    pub progress: bool,
    /// The caller's error, displayed as is.
    pub error: Option<String>,
}

impl OverlayState {
    /// Compose the overlay for the current props.
    ///
    /// Returns `None` unless a fetch is pending or an error is present. The
    /// busy indicator is suppressed when the rendered item list is empty, so
    /// an empty result never shows a spinner.
    pub fn compose(fetching: bool, error: Option<&str>, item_count: usize) -> Option<Self> {
        if !fetching && error.is_none() {
            return None;
        }
        Some(Self {
            progress: fetching && item_count > 0,
            error: error.map(str::to_string),
        })
    }
}

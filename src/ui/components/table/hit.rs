//! Click targets recorded during the last render.

use ratatui::layout::Rect;

/// What a screen position maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Hit {
    /// A body row, by index into the rendered items.
    Row(usize),
    /// The delete trigger of a row.
    Delete(usize),
    /// A header with a clickable action, by column key.
    Header(String),
    PreviousPage,
    NextPage,
    RowsPerPage,
    /// The loading or error overlay; swallows clicks underneath it.
    Overlay,
}

/// Regions in render order; later regions sit on top of earlier ones.
#[derive(Debug, Clone, Default)]
pub(crate) struct HitMap {
    regions: Vec<(Rect, Hit)>,
}

impl HitMap {
    pub(crate) fn clear(&mut self) {
        self.regions.clear();
    }

    pub(crate) fn push(&mut self, area: Rect, hit: Hit) {
        if area.width > 0 && area.height > 0 {
            self.regions.push((area, hit));
        }
    }

    /// The topmost target at a position.
    pub(crate) fn at(&self, x: u16, y: u16) -> Option<&Hit> {
        self.regions
            .iter()
            .rev()
            .find(|(r, _)| x >= r.x && x < r.right() && y >= r.y && y < r.bottom())
            .map(|(_, hit)| hit)
    }
}

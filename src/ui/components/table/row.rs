//! Row presentation: per-item visual state and cell placement.

use std::fmt;

use ratatui::{layout::Rect, style::Style};

use crate::ui::theme::TableTheme;

type Predicate<T> = Box<dyn Fn(&T) -> bool>;

/// Caller-supplied row predicates.
///
/// Absent predicates are treated as always false. Predicates are evaluated
/// on every render and never cached.
pub struct RowPredicates<T> {
    highlighted: Option<Predicate<T>>,
    highlighted_alt: Option<Predicate<T>>,
    disabled: Option<Predicate<T>>,
    locked: Option<Predicate<T>>,
}

impl<T> RowPredicates<T> {
    pub fn new() -> Self {
        Self {
            highlighted: None,
            highlighted_alt: None,
            disabled: None,
            locked: None,
        }
    }

    pub fn highlighted(mut self, f: impl Fn(&T) -> bool + 'static) -> Self {
        self.highlighted = Some(Box::new(f));
        self
    }

    pub fn highlighted_alt(mut self, f: impl Fn(&T) -> bool + 'static) -> Self {
        self.highlighted_alt = Some(Box::new(f));
        self
    }

    pub fn disabled(mut self, f: impl Fn(&T) -> bool + 'static) -> Self {
        self.disabled = Some(Box::new(f));
        self
    }

    pub fn locked(mut self, f: impl Fn(&T) -> bool + 'static) -> Self {
        self.locked = Some(Box::new(f));
        self
    }

    /// Evaluate every predicate for an item.
    pub fn resolve(&self, item: &T, selected: bool) -> RowState {
        let eval = |p: &Option<Predicate<T>>| p.as_ref().is_some_and(|f| f(item));
        RowState {
            selected,
            locked: eval(&self.locked),
            highlighted: eval(&self.highlighted),
            highlighted_alt: eval(&self.highlighted_alt),
            disabled: eval(&self.disabled),
        }
    }
}

impl<T> Default for RowPredicates<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for RowPredicates<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowPredicates")
            .field("highlighted", &self.highlighted.is_some())
            .field("highlighted_alt", &self.highlighted_alt.is_some())
            .field("disabled", &self.disabled.is_some())
            .field("locked", &self.locked.is_some())
            .finish()
    }
}

/// Visual state of one row.
///
/// The flags are independent; every true flag contributes its style token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowState {
    pub selected: bool,
    pub locked: bool,
    pub highlighted: bool,
    pub highlighted_alt: bool,
    pub disabled: bool,
}

impl RowState {
    /// Style of the whole row line.
    ///
    /// Tokens are patched lowest precedence first (disabled, highlighted alt,
    /// highlighted, locked) so that `locked` wins conflicting attributes.
    /// Selection and cursor go on top.
    pub fn row_style(&self, theme: &TableTheme, cursor: bool) -> Style {
        let mut style = theme.row;
        for (on, token) in [
            (self.disabled, theme.disabled_row),
            (self.highlighted_alt, theme.highlighted_alt_row),
            (self.highlighted, theme.highlighted_row),
            (self.locked, theme.locked_row),
        ] {
            if on {
                style = style.patch(token);
            }
        }
        if cursor {
            style = style.patch(theme.cursor_row);
        }
        if self.selected {
            style = style.patch(theme.selected_row);
        }
        style
    }

    /// Style of each cell in the row, in the same precedence as the row.
    pub fn cell_style(&self, theme: &TableTheme) -> Style {
        [
            (self.disabled, theme.disabled_cell),
            (self.highlighted_alt, theme.highlighted_alt_cell),
            (self.highlighted, theme.highlighted_cell),
            (self.locked, theme.locked_cell),
        ]
        .into_iter()
        .filter(|(on, _)| *on)
        .fold(Style::default(), |style, (_, token)| style.patch(token))
    }
}

/// Where each cell of a row lands.
///
/// Walks `spans` in column order with a slot cursor: `None` takes one slot,
/// `Some(0)` skips the cell without consuming a slot, `Some(n)` merges `n`
/// slots. Cells that start past the last slot are dropped and spans are
/// clamped to the remaining slots. Returns `(column_index, rect)` pairs.
pub fn place_cells(spans: &[Option<u16>], slots: &[Rect]) -> Vec<(usize, Rect)> {
    let mut placed = Vec::with_capacity(spans.len());
    let mut slot = 0usize;

    for (column, span) in spans.iter().enumerate() {
        let span = usize::from(span.unwrap_or(1));
        if span == 0 {
            continue;
        }
        if slot >= slots.len() {
            break;
        }
        let last = (slot + span).min(slots.len()) - 1;
        placed.push((column, slots[slot].union(slots[last])));
        slot += span;
    }

    placed
}

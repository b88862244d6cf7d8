//! Pagination footer.
//!
//! The footer only reports page and page-size changes; the caller owns the
//! real page state and slices the items it passes to the table.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    Frame,
};

use super::hit::{Hit, HitMap};
use crate::i18n::{LabelResolver, CORE_MODULE};
use crate::ui::theme::TableTheme;

/// Row-count options used when none are configured.
pub const DEFAULT_ROWS_PER_PAGE_OPTIONS: [usize; 3] = [10, 20, 50];

const PREV: &str = "‹";
const NEXT: &str = "›";

/// Pagination props supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    /// Zero-based page index.
    pub page: usize,
    /// Explicit page size; the first option is used when unset.
    pub page_size: Option<usize>,
    /// Total number of items across all pages.
    pub count: usize,
    /// Selectable page sizes.
    pub rows_per_page_options: Vec<usize>,
}

impl Pagination {
    pub fn new(page: usize, count: usize) -> Self {
        Self {
            page,
            page_size: None,
            count,
            rows_per_page_options: DEFAULT_ROWS_PER_PAGE_OPTIONS.to_vec(),
        }
    }

    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = Some(size);
        self
    }

    pub fn rows_per_page_options(mut self, options: Vec<usize>) -> Self {
        self.rows_per_page_options = options;
        self
    }

    /// The page size in effect: the explicit one, else the first option.
    pub fn effective_page_size(&self) -> usize {
        self.page_size
            .filter(|size| *size > 0)
            .or_else(|| self.rows_per_page_options.first().copied())
            .unwrap_or(DEFAULT_ROWS_PER_PAGE_OPTIONS[0])
    }

    /// One-based first and last item numbers shown on the current page.
    pub fn displayed_range(&self) -> (usize, usize) {
        if self.count == 0 {
            return (0, 0);
        }
        let size = self.effective_page_size();
        let from = self.page * size + 1;
        let to = self.count.min((self.page + 1) * size);
        (from, to)
    }

    /// The next page index, if there is one.
    pub fn next_page(&self) -> Option<usize> {
        let next = self.page + 1;
        (next * self.effective_page_size() < self.count).then_some(next)
    }

    /// The previous page index, if there is one.
    pub fn previous_page(&self) -> Option<usize> {
        self.page.checked_sub(1)
    }

    /// The neighbouring rows-per-page option, wrapping around.
    ///
    /// A current size that is not among the options moves to the first one.
    pub fn cycle_page_size(&self, forward: bool) -> Option<usize> {
        let options = &self.rows_per_page_options;
        if options.is_empty() {
            return None;
        }
        let current = self.effective_page_size();
        let next = match options.iter().position(|o| *o == current) {
            Some(idx) if forward => (idx + 1) % options.len(),
            Some(idx) => (idx + options.len() - 1) % options.len(),
            None => 0,
        };
        let size = options[next];
        (size != current).then_some(size)
    }
}

/// Whether the footer is shown: pagination requested and a non-zero count.
pub fn footer_visible(pagination: Option<&Pagination>) -> bool {
    pagination.is_some_and(|p| p.count > 0)
}

/// Build the footer line and the column offsets of its clickable parts.
fn footer_line(
    pagination: &Pagination,
    labels: &dyn LabelResolver,
    theme: &TableTheme,
) -> (Line<'static>, Vec<(u16, u16, Hit)>) {
    let (from, to) = pagination.displayed_range();
    let rows_label = labels.format_message(CORE_MODULE, "rowsPerPage");
    let of = labels.format_message_with_values(CORE_MODULE, "ofPages", &[]);
    let size = pagination.effective_page_size().to_string();
    let displayed = format!("{}-{} {} {}", from, to, of, pagination.count);

    let dim = |enabled: bool| {
        if enabled {
            theme.pager
        } else {
            theme.footer
        }
    };
    let parts: Vec<(String, ratatui::style::Style, Option<Hit>)> = vec![
        (format!("{}: ", rows_label), theme.footer, None),
        (format!("{} ▾", size), theme.pager, Some(Hit::RowsPerPage)),
        ("   ".to_string(), theme.footer, None),
        (displayed, theme.footer, None),
        ("   ".to_string(), theme.footer, None),
        (
            PREV.to_string(),
            dim(pagination.previous_page().is_some()),
            Some(Hit::PreviousPage),
        ),
        ("  ".to_string(), theme.footer, None),
        (
            NEXT.to_string(),
            dim(pagination.next_page().is_some()),
            Some(Hit::NextPage),
        ),
    ];

    let mut offset = 0u16;
    let mut spans = Vec::with_capacity(parts.len());
    let mut hits = Vec::new();
    for (text, style, hit) in parts {
        let width = Line::from(text.as_str()).width() as u16;
        if let Some(hit) = hit {
            hits.push((offset, width, hit));
        }
        offset = offset.saturating_add(width);
        spans.push(Span::styled(text, style));
    }
    (Line::from(spans), hits)
}

/// Render the footer right-aligned in `area` and record its click targets.
pub(crate) fn render_footer(
    frame: &mut Frame,
    area: Rect,
    pagination: &Pagination,
    labels: &dyn LabelResolver,
    theme: &TableTheme,
    hits: &mut HitMap,
) {
    let (line, targets) = footer_line(pagination, labels, theme);
    let width = (line.width() as u16).min(area.width);
    let x = area.x + area.width - width;
    let line_area = Rect::new(x, area.y, width, 1);

    frame.render_widget(line, line_area);

    for (offset, len, hit) in targets {
        let start = x.saturating_add(offset);
        if start >= area.right() {
            continue;
        }
        let len = len.min(area.right() - start);
        hits.push(Rect::new(start, area.y, len, 1), hit);
    }
}

//! Data-driven record table.
//!
//! The table renders an already paginated slice of records against a set of
//! column descriptors. It owns only two pieces of state across renders: the
//! selection and the keyboard cursor. Everything else comes from
//! [`TableProps`] on every frame.
//!
//! User interaction is reported through [`TableAction`]s returned from the
//! input handlers; the table never changes pages or deletes records itself.
//!
//! Bulk selection is driven by generation counters in [`BulkSignals`]: bump
//! `select_all` to merge the visible items into the selection, bump
//! `clear_all` to empty it. [`DataTable::sync`] acts on a counter only when
//! it differs from the value seen on the previous sync.

mod column;
mod filter;
mod hit;
mod overlay;
mod pagination;
mod row;
mod selection;

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::Paragraph,
    Frame,
};
use tracing::{debug, trace};

pub use column::{
    formatter, Align, Column, Formatter, Header, HeaderAction, HeaderContext, ParallelColumns,
    DELETE_COLUMN_KEY, DELETE_GLYPH,
};
pub use filter::filter_columns;
pub use overlay::OverlayState;
pub use pagination::{footer_visible, Pagination, DEFAULT_ROWS_PER_PAGE_OPTIONS};
pub use row::{place_cells, RowPredicates, RowState};
pub use selection::{Interaction, Selection, SelectionMode};

use hit::{Hit, HitMap};

use super::progress::{ProgressOrError, SpinnerStyle};
use crate::i18n::{LabelResolver, Messages};
use crate::modules::{ModuleVisibility, NoHiddenFields};
use crate::record::Record;
use crate::ui::theme::TableTheme;

/// Default maximum delay between two clicks of a double click.
pub const DEFAULT_DOUBLE_CLICK_MS: u64 = 400;

/// Events reported by the table.
#[derive(Debug, Clone, PartialEq)]
pub enum TableAction<T> {
    /// The selection changed; carries the selected items in set order.
    SelectionChanged(Vec<T>),
    /// The user asked for another page.
    PageChanged(usize),
    /// The user picked another page size.
    PageSizeChanged(usize),
    /// A row was double clicked (or opened with Enter).
    DoubleClicked(T),
    /// The delete trigger of a row was activated.
    DeleteRequested(usize),
    /// A clickable header action was activated; carries the column key.
    HeaderClicked(String),
}

/// Generation counters for bulk selection requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BulkSignals {
    /// Bump to merge the visible items into the selection.
    pub select_all: u64,
    /// Bump to clear the selection.
    pub clear_all: u64,
}

/// Row density.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TableSize {
    #[default]
    Medium,
    Small,
}

impl TableSize {
    fn column_spacing(self) -> u16 {
        match self {
            TableSize::Medium => 2,
            TableSize::Small => 1,
        }
    }
}

/// Per-render configuration of a table.
pub struct TableProps<'a, T> {
    /// Module used for label resolution and field visibility.
    pub module: &'a str,
    /// Optional title drawn above the table.
    pub title: Option<&'a str>,
    pub columns: &'a [Column<T>],
    /// The items of the current page, in display order.
    pub items: &'a [T],
    pub predicates: Option<&'a RowPredicates<T>>,
    /// Pagination footer; `None` disables it.
    pub pagination: Option<Pagination>,
    pub signals: BulkSignals,
    /// Report double clicks.
    pub double_click: bool,
    /// Append the delete column and report delete requests.
    pub delete: bool,
    pub fetching: bool,
    pub error: Option<&'a str>,
    pub size: TableSize,
    /// Whether the keyboard cursor is drawn.
    pub focused: bool,
}

impl<'a, T> TableProps<'a, T> {
    pub fn new(module: &'a str, columns: &'a [Column<T>], items: &'a [T]) -> Self {
        Self {
            module,
            title: None,
            columns,
            items,
            predicates: None,
            pagination: None,
            signals: BulkSignals::default(),
            double_click: false,
            delete: false,
            fetching: false,
            error: None,
            size: TableSize::default(),
            focused: true,
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    pub fn predicates(mut self, predicates: &'a RowPredicates<T>) -> Self {
        self.predicates = Some(predicates);
        self
    }

    pub fn pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub fn signals(mut self, signals: BulkSignals) -> Self {
        self.signals = signals;
        self
    }

    pub fn double_click(mut self, enabled: bool) -> Self {
        self.double_click = enabled;
        self
    }

    pub fn delete(mut self, enabled: bool) -> Self {
        self.delete = enabled;
        self
    }

    pub fn fetching(mut self, fetching: bool) -> Self {
        self.fetching = fetching;
        self
    }

    pub fn error(mut self, error: Option<&'a str>) -> Self {
        self.error = error;
        self
    }

    pub fn size(mut self, size: TableSize) -> Self {
        self.size = size;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

/// Vertical sections of a rendered table.
#[derive(Debug, Default)]
struct Sections {
    title: Option<Rect>,
    divider: Option<Rect>,
    pre_header: Option<Rect>,
    header: Option<Rect>,
    header_rule: Option<Rect>,
    body: Rect,
    footer: Option<Rect>,
}

impl Sections {
    fn split(area: Rect, title: bool, pre_header: bool, header: bool, footer: bool) -> Self {
        // Title and header each take a rule line below them.
        let rows = [title, title, pre_header, header, header];
        let mut constraints: Vec<Constraint> = rows
            .iter()
            .filter(|on| **on)
            .map(|_| Constraint::Length(1))
            .collect();
        constraints.push(Constraint::Min(0));
        if footer {
            constraints.push(Constraint::Length(1));
        }

        let chunks = Layout::vertical(constraints).split(area);
        let mut chunks = chunks.iter().copied();
        let mut take = |on: bool| if on { chunks.next() } else { None };

        let title_area = take(title);
        let divider = take(title);
        let pre_header_area = take(pre_header);
        let header_area = take(header);
        let header_rule = take(header);
        let body = take(true).unwrap_or_default();
        let footer_area = take(footer);

        Self {
            title: title_area,
            divider,
            pre_header: pre_header_area,
            header: header_area,
            header_rule,
            body,
            footer: footer_area,
        }
    }
}

/// A record table component.
pub struct DataTable<T> {
    selection: Selection<T>,
    identifier: Option<Box<dyn Fn(&T) -> String>>,
    visibility: Box<dyn ModuleVisibility>,
    labels: Box<dyn LabelResolver>,
    theme: TableTheme,
    progress: ProgressOrError,
    cursor: usize,
    offset: usize,
    last_signals: Option<BulkSignals>,
    last_click: Option<(usize, Instant)>,
    double_click_window: Duration,
    hits: HitMap,
}

impl<T: Record + 'static> DataTable<T> {
    /// Create a table with the given selection mode.
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            selection: Selection::new(mode),
            identifier: None,
            visibility: Box::new(NoHiddenFields),
            labels: Box::new(Messages::new()),
            theme: TableTheme::default(),
            progress: ProgressOrError::new(),
            cursor: 0,
            offset: 0,
            last_signals: None,
            last_click: None,
            double_click_window: Duration::from_millis(DEFAULT_DOUBLE_CLICK_MS),
            hits: HitMap::default(),
        }
    }

    /// Use a custom identifier instead of [`Record::uuid`].
    ///
    /// Set this before seeding a selection.
    pub fn with_identifier(mut self, identifier: impl Fn(&T) -> String + 'static) -> Self {
        self.identifier = Some(Box::new(identifier));
        self
    }

    /// Seed the selection with pre-selected items.
    pub fn with_selection(mut self, items: impl IntoIterator<Item = T>) -> Self {
        let entries: Vec<_> = items
            .into_iter()
            .map(|item| (self.item_identifier(&item), item))
            .collect();
        self.selection.seed(entries);
        self
    }

    pub fn with_visibility(mut self, visibility: impl ModuleVisibility + 'static) -> Self {
        self.visibility = Box::new(visibility);
        self
    }

    pub fn with_labels(mut self, labels: impl LabelResolver + 'static) -> Self {
        self.progress
            .set_message(labels.format_message(crate::i18n::CORE_MODULE, "loading"));
        self.labels = Box::new(labels);
        self
    }

    pub fn with_theme(mut self, theme: TableTheme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_spinner(mut self, style: SpinnerStyle) -> Self {
        self.progress = self.progress.with_style(style);
        self
    }

    pub fn with_double_click_window(mut self, window: Duration) -> Self {
        self.double_click_window = window;
        self
    }

    pub fn mode(&self) -> SelectionMode {
        self.selection.mode()
    }

    /// The identifier of an item.
    pub fn item_identifier(&self, item: &T) -> String {
        match &self.identifier {
            Some(identifier) => identifier(item),
            None => item.uuid(),
        }
    }

    /// Whether an item is selected. Always false without selection.
    pub fn is_selected(&self, item: &T) -> bool {
        self.selection.contains(&self.item_identifier(item))
    }

    /// The selected items in set order.
    pub fn selected(&self) -> Vec<T> {
        self.selection.values()
    }

    /// The keyboard cursor row.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Toggle an item.
    ///
    /// Only primary interactions toggle, and never without selection.
    pub fn toggle(&mut self, item: &T, interaction: Interaction) -> Option<TableAction<T>> {
        if !interaction.is_primary() {
            return None;
        }
        let id = self.item_identifier(item);
        if !self.selection.toggle(id.clone(), item) {
            return None;
        }
        debug!(id = %id, selected = self.selection.len(), "Row selection toggled");
        Some(self.selection_changed())
    }

    /// Merge every visible item into the selection.
    pub fn select_all_visible(&mut self, items: &[T]) -> Option<TableAction<T>> {
        let visible: Vec<_> = items
            .iter()
            .map(|item| (self.item_identifier(item), item.clone()))
            .collect();
        if !self.selection.merge_visible(visible) {
            return None;
        }
        debug!(
            visible = items.len(),
            selected = ?self.selection.ids(),
            "Selected all visible rows"
        );
        Some(self.selection_changed())
    }

    /// Empty the selection.
    pub fn clear_selection(&mut self) -> Option<TableAction<T>> {
        if !self.selection.clear() {
            return None;
        }
        debug!("Selection cleared");
        Some(self.selection_changed())
    }

    /// Apply bulk selection requests whose generation changed.
    ///
    /// The first call only records the generations. Select-all is applied
    /// before clear-all when both changed.
    pub fn sync(&mut self, props: &TableProps<'_, T>) -> Vec<TableAction<T>> {
        let current = props.signals;
        let Some(previous) = self.last_signals.replace(current) else {
            return Vec::new();
        };

        let mut actions = Vec::new();
        if previous.select_all != current.select_all {
            actions.extend(self.select_all_visible(props.items));
        }
        if previous.clear_all != current.clear_all {
            actions.extend(self.clear_selection());
        }
        actions
    }

    fn selection_changed(&self) -> TableAction<T> {
        TableAction::SelectionChanged(self.selection.values())
    }

    /// Advance the loading spinner.
    pub fn tick(&mut self) {
        self.progress.tick();
    }

    fn move_down(&mut self, len: usize) {
        if len > 0 && self.cursor + 1 < len {
            self.cursor += 1;
        }
    }

    fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn clamp_cursor(&mut self, len: usize) {
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    /// Handle keyboard input.
    pub fn handle_input(&mut self, key: KeyEvent, props: &TableProps<'_, T>) -> Option<TableAction<T>> {
        let len = props.items.len();
        self.clamp_cursor(len);

        match (key.code, key.modifiers) {
            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
                self.move_down(len);
                None
            }
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
                self.move_up();
                None
            }
            (KeyCode::Char('g'), KeyModifiers::NONE) | (KeyCode::Home, _) => {
                self.cursor = 0;
                None
            }
            (KeyCode::Char('G'), _) | (KeyCode::End, _) => {
                self.cursor = len.saturating_sub(1);
                None
            }
            (KeyCode::Char(' '), KeyModifiers::NONE) => {
                let item = props.items.get(self.cursor)?;
                self.toggle(item, Interaction::Primary)
            }
            (KeyCode::Enter, _) if props.double_click => props
                .items
                .get(self.cursor)
                .map(|item| TableAction::DoubleClicked(item.clone())),
            (KeyCode::Char('d'), KeyModifiers::NONE) | (KeyCode::Delete, _)
                if props.delete && self.cursor < len =>
            {
                Some(TableAction::DeleteRequested(self.cursor))
            }
            (KeyCode::Char(']'), _) | (KeyCode::PageDown, _) => props
                .pagination
                .as_ref()
                .filter(|p| p.count > 0)
                .and_then(Pagination::next_page)
                .map(TableAction::PageChanged),
            (KeyCode::Char('['), _) | (KeyCode::PageUp, _) => props
                .pagination
                .as_ref()
                .filter(|p| p.count > 0)
                .and_then(Pagination::previous_page)
                .map(TableAction::PageChanged),
            (KeyCode::Char('+'), _) => props
                .pagination
                .as_ref()
                .and_then(|p| p.cycle_page_size(true))
                .map(TableAction::PageSizeChanged),
            (KeyCode::Char('-'), _) => props
                .pagination
                .as_ref()
                .and_then(|p| p.cycle_page_size(false))
                .map(TableAction::PageSizeChanged),
            _ => None,
        }
    }

    /// Handle mouse input against the geometry of the last render.
    ///
    /// A single click can report more than one action: the second click of
    /// a double click toggles the row like any primary click, then reports
    /// `DoubleClicked`.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, props: &TableProps<'_, T>) -> Vec<TableAction<T>> {
        let interaction = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => Interaction::Primary,
            MouseEventKind::Down(MouseButton::Right) => Interaction::Secondary,
            MouseEventKind::Down(MouseButton::Middle) => Interaction::Middle,
            MouseEventKind::ScrollDown => {
                self.move_down(props.items.len());
                return Vec::new();
            }
            MouseEventKind::ScrollUp => {
                self.move_up();
                return Vec::new();
            }
            _ => return Vec::new(),
        };

        let Some(hit) = self.hits.at(mouse.column, mouse.row).cloned() else {
            return Vec::new();
        };
        trace!(?hit, ?interaction, "Table click");
        let primary = interaction.is_primary();

        let action = match hit {
            Hit::Row(idx) => return self.click_row(idx, interaction, props, Instant::now()),
            Hit::Delete(idx) if primary && props.delete && idx < props.items.len() => {
                Some(TableAction::DeleteRequested(idx))
            }
            Hit::Header(key) if primary => Some(TableAction::HeaderClicked(key)),
            Hit::PreviousPage if primary => props
                .pagination
                .as_ref()
                .and_then(Pagination::previous_page)
                .map(TableAction::PageChanged),
            Hit::NextPage if primary => props
                .pagination
                .as_ref()
                .and_then(Pagination::next_page)
                .map(TableAction::PageChanged),
            Hit::RowsPerPage if primary => props
                .pagination
                .as_ref()
                .and_then(|p| p.cycle_page_size(true))
                .map(TableAction::PageSizeChanged),
            _ => None,
        };
        action.into_iter().collect()
    }

    /// A click on a row body.
    ///
    /// Every primary click toggles. With double click enabled, a second
    /// primary click on the same row inside the window also reports
    /// `DoubleClicked`, and the next click starts a new sequence.
    fn click_row(
        &mut self,
        idx: usize,
        interaction: Interaction,
        props: &TableProps<'_, T>,
        now: Instant,
    ) -> Vec<TableAction<T>> {
        let Some(item) = props.items.get(idx) else {
            return Vec::new();
        };
        self.cursor = idx;

        if !interaction.is_primary() {
            self.last_click = None;
            return Vec::new();
        }

        let mut actions: Vec<_> = self.toggle(item, interaction).into_iter().collect();

        if props.double_click {
            let repeated = self
                .last_click
                .take()
                .is_some_and(|(row, at)| row == idx && now.duration_since(at) <= self.double_click_window);
            if repeated {
                debug!(row = idx, "Row double clicked");
                actions.push(TableAction::DoubleClicked(item.clone()));
            } else {
                self.last_click = Some((idx, now));
            }
        }

        actions
    }

    fn header_label(&self, header: &Header<T>, module: &str, items: &[T]) -> String {
        match header {
            Header::Literal(text) => text.clone(),
            Header::TranslationKey(key) => self.labels.format_message(module, key),
            Header::Computed { render, .. } => render(&HeaderContext {
                module,
                selection: &self.selection,
                items,
            }),
        }
    }

    /// Render the table into `area`.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, props: &TableProps<'_, T>) {
        self.hits.clear();

        let columns = filter_columns(props.columns, props.module, self.visibility.as_ref(), props.delete);
        let has_pre_header = columns.iter().any(|c| c.pre_header_text().is_some());
        let has_footer = footer_visible(props.pagination.as_ref());
        let sections = Sections::split(
            area,
            props.title.is_some(),
            has_pre_header,
            !columns.is_empty(),
            has_footer,
        );

        let slots = Layout::horizontal(columns.iter().map(Column::width_constraint))
            .spacing(props.size.column_spacing())
            .split(Rect::new(area.x, area.y, area.width, 1));
        let slots_at = |y: u16| -> Vec<Rect> { slots.iter().map(|s| Rect { y, ..*s }).collect() };

        if let (Some(title_area), Some(title)) = (sections.title, props.title) {
            frame.render_widget(Paragraph::new(title).style(self.theme.title), title_area);
        }
        if let Some(divider) = sections.divider {
            self.render_rule(frame, divider);
        }

        if let Some(pre_area) = sections.pre_header {
            let spans: Vec<_> = columns.iter().map(Column::header_span_value).collect();
            for (idx, rect) in place_cells(&spans, &slots_at(pre_area.y)) {
                let column = &columns[idx];
                let text = column.pre_header_text().unwrap_or_default();
                let align = column.alignment().unwrap_or_default().alignment();
                frame.render_widget(
                    Paragraph::new(text.to_string())
                        .style(self.theme.header)
                        .alignment(align),
                    rect,
                );
            }
        }

        if let Some(header_area) = sections.header {
            self.render_headers(frame, &columns, &slots_at(header_area.y), props);
        }
        if let Some(rule) = sections.header_rule {
            self.render_rule(frame, rule);
        }

        self.render_body(frame, sections.body, &columns, &slots, props);

        if let (Some(footer_area), Some(pagination)) = (sections.footer, props.pagination.as_ref()) {
            pagination::render_footer(
                frame,
                footer_area,
                pagination,
                self.labels.as_ref(),
                &self.theme,
                &mut self.hits,
            );
        }

        if let Some(overlay) = OverlayState::compose(props.fetching, props.error, props.items.len()) {
            self.progress.render(frame, area, &overlay, &self.theme);
            self.hits.push(area, Hit::Overlay);
        }

        trace!(
            module = props.module,
            columns = columns.len(),
            items = props.items.len(),
            "Rendered table"
        );
    }

    fn render_rule(&self, frame: &mut Frame, area: Rect) {
        let rule = "─".repeat(usize::from(area.width));
        frame.render_widget(Line::styled(rule, self.theme.divider), area);
    }

    fn render_headers(
        &mut self,
        frame: &mut Frame,
        columns: &[Column<T>],
        slots: &[Rect],
        props: &TableProps<'_, T>,
    ) {
        let spans: Vec<_> = columns.iter().map(Column::header_span_value).collect();

        for (idx, rect) in place_cells(&spans, slots) {
            let column = &columns[idx];
            if column.header().is_blank() {
                continue;
            }
            let label = self.header_label(column.header(), props.module, props.items);
            let align = column.alignment().unwrap_or_default().alignment();

            let label_area = match column.header_action() {
                Some(action) => {
                    let width = (Line::from(action.indicator.as_str()).width() as u16).min(rect.width);
                    let indicator_area = Rect {
                        x: rect.right() - width,
                        width,
                        ..rect
                    };
                    frame.render_widget(
                        Line::styled(action.indicator.clone(), self.theme.header),
                        indicator_area,
                    );
                    if action.clickable {
                        self.hits.push(rect, Hit::Header(column.key().to_string()));
                    }
                    Rect {
                        width: rect.width - width,
                        ..rect
                    }
                }
                None => rect,
            };

            frame.render_widget(
                Paragraph::new(label).style(self.theme.header).alignment(align),
                label_area,
            );
        }
    }

    fn render_body(
        &mut self,
        frame: &mut Frame,
        body: Rect,
        columns: &[Column<T>],
        slots: &[Rect],
        props: &TableProps<'_, T>,
    ) {
        let len = props.items.len();
        self.clamp_cursor(len);

        let height = usize::from(body.height);
        if height == 0 || len == 0 {
            return;
        }
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + height {
            self.offset = self.cursor + 1 - height;
        }
        self.offset = self.offset.min(len.saturating_sub(1));

        let no_predicates = RowPredicates::new();
        let predicates = props.predicates.unwrap_or(&no_predicates);
        let spans: Vec<_> = columns.iter().map(Column::col_span_value).collect();

        for (line, (idx, item)) in props
            .items
            .iter()
            .enumerate()
            .skip(self.offset)
            .take(height)
            .enumerate()
        {
            let y = body.y + line as u16;
            let row_area = Rect::new(body.x, y, body.width, 1);
            let state = predicates.resolve(item, self.is_selected(item));
            let cursor = props.focused && idx == self.cursor;

            frame
                .buffer_mut()
                .set_style(row_area, state.row_style(&self.theme, cursor));
            self.hits.push(row_area, Hit::Row(idx));

            let cell_style = state.cell_style(&self.theme);
            let row_slots: Vec<Rect> = slots.iter().map(|s| Rect { y, ..*s }).collect();
            for (col, rect) in place_cells(&spans, &row_slots) {
                let column = &columns[col];
                let align = column.alignment().unwrap_or_default().alignment();
                frame.render_widget(
                    Paragraph::new(column.format(item, idx))
                        .style(cell_style)
                        .alignment(align),
                    rect,
                );
                if column.is_delete() {
                    self.hits.push(rect, Hit::Delete(idx));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::HiddenFields;
    use ratatui::{backend::TestBackend, Terminal};

    #[derive(Debug, Clone, PartialEq)]
    struct Claim {
        id: u32,
        code: &'static str,
        amount: u32,
    }

    impl Record for Claim {
        fn uuid(&self) -> String {
            self.id.to_string()
        }
    }

    fn claim(id: u32) -> Claim {
        Claim {
            id,
            code: ["C-1", "C-2", "C-3", "C-4"][(id as usize - 1) % 4],
            amount: id * 100,
        }
    }

    fn items() -> Vec<Claim> {
        vec![claim(1), claim(2), claim(3)]
    }

    fn columns() -> Vec<Column<Claim>> {
        vec![
            Column::literal("Code", |c: &Claim, _| Line::from(c.code)),
            Column::translated("claim.amount", |c: &Claim, _| Line::from(c.amount.to_string()))
                .align(Align::Right),
        ]
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16, button: MouseButton) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(button),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn selected_ids(action: Option<TableAction<Claim>>) -> Vec<u32> {
        match action {
            Some(TableAction::SelectionChanged(items)) => items.iter().map(|c| c.id).collect(),
            other => panic!("expected selection change, got {:?}", other),
        }
    }

    /// The only action of a click that reports at most one.
    fn single(mut actions: Vec<TableAction<Claim>>) -> Option<TableAction<Claim>> {
        assert!(actions.len() <= 1, "expected one action, got {:?}", actions);
        actions.pop()
    }

    fn draw(table: &mut DataTable<Claim>, props: &TableProps<'_, Claim>, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| table.render(frame, frame.area(), props))
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(usize::from(buffer.area.width))
            .map(|line| line.iter().map(|c| c.symbol()).collect::<String>())
            .collect()
    }

    #[test]
    fn test_multiple_toggle_scenario() {
        let items = items();
        let mut table = DataTable::new(SelectionMode::Multiple);
        table.toggle(&items[0], Interaction::Primary);
        table.toggle(&items[1], Interaction::Primary);
        let last = table.toggle(&items[0], Interaction::Primary);
        assert_eq!(selected_ids(last), vec![2]);
    }

    #[test]
    fn test_single_toggle_scenario() {
        let items = items();
        let mut table = DataTable::new(SelectionMode::Single);
        table.toggle(&items[0], Interaction::Primary);
        let last = table.toggle(&items[1], Interaction::Primary);
        assert_eq!(selected_ids(last), vec![2]);
        assert!(!table.is_selected(&items[0]));
    }

    #[test]
    fn test_non_primary_and_none_mode_are_ignored() {
        let items = items();
        let mut table = DataTable::new(SelectionMode::Multiple);
        assert_eq!(table.toggle(&items[0], Interaction::Secondary), None);
        assert_eq!(table.toggle(&items[0], Interaction::Middle), None);
        assert!(table.selected().is_empty());

        let mut table = DataTable::new(SelectionMode::None);
        assert_eq!(table.toggle(&items[0], Interaction::Primary), None);
        assert!(!table.is_selected(&items[0]));
    }

    #[test]
    fn test_custom_identifier() {
        let mut table = DataTable::new(SelectionMode::Multiple).with_identifier(|c: &Claim| c.code.to_string());
        let a = claim(1);
        let same_code = claim(5);
        table.toggle(&a, Interaction::Primary);
        assert!(table.is_selected(&same_code));
        assert_eq!(table.item_identifier(&a), "C-1");
    }

    #[test]
    fn test_seeded_selection() {
        let table = DataTable::new(SelectionMode::Multiple).with_selection(vec![claim(2), claim(3)]);
        assert!(table.is_selected(&claim(2)));
        assert_eq!(table.selected().len(), 2);

        let table = DataTable::new(SelectionMode::None).with_selection(vec![claim(2)]);
        assert!(table.selected().is_empty());
    }

    #[test]
    fn test_sync_first_call_adopts_generations() {
        let items = items();
        let columns = columns();
        let mut table = DataTable::new(SelectionMode::Multiple);
        let props = TableProps::new("claim", &columns, &items).signals(BulkSignals {
            select_all: 3,
            clear_all: 7,
        });
        assert!(table.sync(&props).is_empty());
        assert!(table.sync(&props).is_empty());
        assert!(table.selected().is_empty());
    }

    #[test]
    fn test_sync_select_all_is_additive_and_edge_triggered() {
        let items = items();
        let columns = columns();
        let outside = claim(4);
        let mut table = DataTable::new(SelectionMode::Multiple);
        table.sync(&TableProps::new("claim", &columns, &items));
        table.toggle(&outside, Interaction::Primary);

        let props = TableProps::new("claim", &columns, &items).signals(BulkSignals {
            select_all: 1,
            clear_all: 0,
        });
        let actions = table.sync(&props);
        assert_eq!(actions.len(), 1);
        assert_eq!(selected_ids(actions.into_iter().next()), vec![4, 1, 2, 3]);

        // Same generation again: nothing fires.
        assert!(table.sync(&props).is_empty());
    }

    #[test]
    fn test_sync_clear_all_fires_once() {
        let items = items();
        let columns = columns();
        let mut table = DataTable::new(SelectionMode::Multiple).with_selection(items.clone());
        table.sync(&TableProps::new("claim", &columns, &items));

        let props = TableProps::new("claim", &columns, &items).signals(BulkSignals {
            select_all: 0,
            clear_all: 1,
        });
        let actions = table.sync(&props);
        assert_eq!(actions, vec![TableAction::SelectionChanged(vec![])]);
        assert!(table.sync(&props).is_empty());
        assert!(table.selected().is_empty());
    }

    #[test]
    fn test_clear_on_empty_selection_still_notifies() {
        let mut table: DataTable<Claim> = DataTable::new(SelectionMode::Single);
        assert_eq!(
            table.clear_selection(),
            Some(TableAction::SelectionChanged(vec![]))
        );
    }

    #[test]
    fn test_sync_ignored_without_selection() {
        let items = items();
        let columns = columns();
        let mut table = DataTable::new(SelectionMode::None);
        table.sync(&TableProps::new("claim", &columns, &items));
        let props = TableProps::new("claim", &columns, &items).signals(BulkSignals {
            select_all: 1,
            clear_all: 1,
        });
        assert!(table.sync(&props).is_empty());
    }

    #[test]
    fn test_keyboard_navigation_and_toggle() {
        let items = items();
        let columns = columns();
        let props = TableProps::new("claim", &columns, &items);
        let mut table = DataTable::new(SelectionMode::Multiple);

        assert_eq!(table.handle_input(key(KeyCode::Down), &props), None);
        assert_eq!(table.cursor(), 1);
        table.handle_input(key(KeyCode::End), &props);
        assert_eq!(table.cursor(), 2);
        table.handle_input(key(KeyCode::Down), &props);
        assert_eq!(table.cursor(), 2);

        let action = table.handle_input(key(KeyCode::Char(' ')), &props);
        assert_eq!(selected_ids(action), vec![3]);
    }

    #[test]
    fn test_keyboard_open_and_delete_require_opt_in() {
        let items = items();
        let columns = columns();
        let mut table = DataTable::new(SelectionMode::None);

        let plain = TableProps::new("claim", &columns, &items);
        assert_eq!(table.handle_input(key(KeyCode::Enter), &plain), None);
        assert_eq!(table.handle_input(key(KeyCode::Delete), &plain), None);

        let enabled = TableProps::new("claim", &columns, &items)
            .double_click(true)
            .delete(true);
        table.handle_input(key(KeyCode::Down), &enabled);
        assert_eq!(
            table.handle_input(key(KeyCode::Enter), &enabled),
            Some(TableAction::DoubleClicked(claim(2)))
        );
        assert_eq!(
            table.handle_input(key(KeyCode::Char('d')), &enabled),
            Some(TableAction::DeleteRequested(1))
        );
    }

    #[test]
    fn test_keyboard_paging_reports_without_changing_state() {
        let items = items();
        let columns = columns();
        let props = TableProps::new("claim", &columns, &items).pagination(Pagination::new(0, 25));
        let mut table = DataTable::new(SelectionMode::None);

        assert_eq!(
            table.handle_input(key(KeyCode::PageDown), &props),
            Some(TableAction::PageChanged(1))
        );
        // The caller did not move to page 1, so asking again yields the same page.
        assert_eq!(
            table.handle_input(key(KeyCode::Char(']')), &props),
            Some(TableAction::PageChanged(1))
        );
        assert_eq!(table.handle_input(key(KeyCode::PageUp), &props), None);
        assert_eq!(
            table.handle_input(key(KeyCode::Char('+')), &props),
            Some(TableAction::PageSizeChanged(20))
        );
        assert_eq!(
            table.handle_input(key(KeyCode::Char('-')), &props),
            Some(TableAction::PageSizeChanged(50))
        );
    }

    #[test]
    fn test_paging_keys_ignored_when_count_is_zero() {
        let items: Vec<Claim> = vec![];
        let columns = columns();
        let props = TableProps::new("claim", &columns, &items).pagination(Pagination::new(0, 0));
        let mut table = DataTable::new(SelectionMode::None);
        assert_eq!(table.handle_input(key(KeyCode::PageDown), &props), None);
    }

    #[test]
    fn test_render_headers_and_rows() {
        let items = items();
        let columns = columns();
        let mut messages = Messages::new();
        messages.insert("claim", "claim.amount", "Amount");
        let mut table = DataTable::new(SelectionMode::Multiple).with_labels(messages);
        let props = TableProps::new("claim", &columns, &items).title("Claims");

        let lines = draw(&mut table, &props, 30, 10);
        assert!(lines[0].starts_with("Claims"));
        assert!(lines[1].starts_with("───"));
        assert!(lines[2].starts_with("Code"));
        assert!(lines[2].trim_end().ends_with("Amount"));
        assert!(lines[4].starts_with("C-1"));
        assert!(lines[4].trim_end().ends_with("100"));
        assert!(lines[6].starts_with("C-3"));
    }

    #[test]
    fn test_render_hides_columns_by_policy() {
        let items = items();
        let columns = columns();
        let mut table =
            DataTable::new(SelectionMode::None).with_visibility(HiddenFields::new().hide("claim", "Code"));
        let props = TableProps::new("claim", &columns, &items);

        let lines = draw(&mut table, &props, 30, 8);
        assert!(!lines.iter().any(|l| l.contains("Code")));
        assert!(!lines.iter().any(|l| l.contains("C-1")));
        assert!(lines[0].contains("claim.amount"));
        assert!(lines[2].contains("100"));
    }

    #[test]
    fn test_render_delete_column_last_and_clickable() {
        let items = items();
        let columns = columns();
        let mut table = DataTable::new(SelectionMode::Multiple);
        let props = TableProps::new("claim", &columns, &items).delete(true);

        let lines = draw(&mut table, &props, 30, 8);
        assert!(lines[2].trim_end().ends_with(DELETE_GLYPH));
        assert!(lines[2].contains("100"));

        let x = lines[3].chars().position(|c| c.to_string() == DELETE_GLYPH).unwrap() as u16;
        assert_eq!(
            table.handle_mouse(click(x, 3, MouseButton::Left), &props),
            vec![TableAction::DeleteRequested(1)]
        );
        assert!(table.selected().is_empty());
    }

    #[test]
    fn test_mouse_click_toggles_primary_only() {
        let items = items();
        let columns = columns();
        let mut table = DataTable::new(SelectionMode::Multiple);
        let props = TableProps::new("claim", &columns, &items);
        draw(&mut table, &props, 30, 8);

        assert!(table.handle_mouse(click(1, 2, MouseButton::Right), &props).is_empty());
        assert_eq!(table.cursor(), 0);
        let action = single(table.handle_mouse(click(1, 3, MouseButton::Left), &props));
        assert_eq!(selected_ids(action), vec![2]);
        assert_eq!(table.cursor(), 1);
        assert!(table.handle_mouse(click(1, 0, MouseButton::Left), &props).is_empty());
    }

    #[test]
    fn test_mouse_double_click() {
        let items = items();
        let columns = columns();
        let mut table = DataTable::new(SelectionMode::Multiple)
            .with_double_click_window(Duration::from_secs(60));
        let props = TableProps::new("claim", &columns, &items).double_click(true);
        draw(&mut table, &props, 30, 8);

        let first = single(table.handle_mouse(click(1, 2, MouseButton::Left), &props));
        assert_eq!(selected_ids(first), vec![1]);

        // The second click still toggles, then reports the double click.
        let second = table.handle_mouse(click(1, 2, MouseButton::Left), &props);
        assert_eq!(
            second,
            vec![
                TableAction::SelectionChanged(vec![]),
                TableAction::DoubleClicked(claim(1)),
            ]
        );
        assert!(!table.is_selected(&items[0]));

        // A third click starts a new sequence.
        let third = single(table.handle_mouse(click(1, 2, MouseButton::Left), &props));
        assert_eq!(selected_ids(third), vec![1]);
    }

    #[test]
    fn test_double_click_needs_same_row() {
        let items = items();
        let columns = columns();
        let mut table = DataTable::new(SelectionMode::Single)
            .with_double_click_window(Duration::from_secs(60));
        let props = TableProps::new("claim", &columns, &items).double_click(true);
        draw(&mut table, &props, 30, 8);

        table.handle_mouse(click(1, 2, MouseButton::Left), &props);
        let other = single(table.handle_mouse(click(1, 3, MouseButton::Left), &props));
        assert_eq!(selected_ids(other), vec![2]);
    }

    #[test]
    fn test_overlay_blocks_clicks() {
        let items = items();
        let columns = columns();
        let mut table = DataTable::new(SelectionMode::Multiple);
        let busy = TableProps::new("claim", &columns, &items)
            .fetching(true)
            .pagination(Pagination::new(0, 57));
        draw(&mut table, &busy, 60, 8);

        assert!(table.handle_mouse(click(1, 2, MouseButton::Left), &busy).is_empty());
        assert!(table.handle_mouse(click(1, 7, MouseButton::Left), &busy).is_empty());
        assert!(table.selected().is_empty());

        let idle = TableProps::new("claim", &columns, &items).pagination(Pagination::new(0, 57));
        draw(&mut table, &idle, 60, 8);
        let action = single(table.handle_mouse(click(1, 2, MouseButton::Left), &idle));
        assert_eq!(selected_ids(action), vec![1]);
    }

    #[test]
    fn test_header_action_click() {
        let items = items();
        let columns = vec![
            Column::literal("Code", |c: &Claim, _| Line::from(c.code)).action(HeaderAction::new("↑")),
            Column::literal("Amount", |c: &Claim, _| Line::from(c.amount.to_string()))
                .action(HeaderAction::decoration("•")),
        ];
        let mut table = DataTable::new(SelectionMode::None);
        let props = TableProps::new("claim", &columns, &items);
        let lines = draw(&mut table, &props, 30, 8);
        assert!(lines[0].contains('↑'));

        assert_eq!(
            table.handle_mouse(click(0, 0, MouseButton::Left), &props),
            vec![TableAction::HeaderClicked("Code".to_string())]
        );
        assert!(table.handle_mouse(click(20, 0, MouseButton::Left), &props).is_empty());
    }

    #[test]
    fn test_computed_header_sees_selection() {
        let items = items();
        let columns = vec![Column::computed(
            "count",
            |ctx: &HeaderContext<'_, Claim>| format!("{} selected", ctx.selection.len()),
            |c: &Claim, _| Line::from(c.code),
        )];
        let mut table = DataTable::new(SelectionMode::Multiple);
        table.toggle(&items[0], Interaction::Primary);
        let props = TableProps::new("claim", &columns, &items);
        let lines = draw(&mut table, &props, 20, 6);
        assert!(lines[0].starts_with("1 selected"));
    }

    #[test]
    fn test_computed_header_sees_items() {
        let items = items();
        let columns = vec![Column::computed(
            "page",
            |ctx: &HeaderContext<'_, Claim>| {
                let total: u32 = ctx.items.iter().map(|c| c.amount).sum();
                format!("{} rows {}", ctx.items.len(), total)
            },
            |c: &Claim, _| Line::from(c.code),
        )];
        let mut table = DataTable::new(SelectionMode::None);
        let props = TableProps::new("claim", &columns, &items);
        let lines = draw(&mut table, &props, 20, 6);
        assert!(lines[0].starts_with("3 rows 600"));
    }

    #[test]
    fn test_spans_merge_and_skip_cells() {
        let items = items();
        let columns = vec![
            Column::literal("Wide", |c: &Claim, _| Line::from(format!("{}-wide-cell", c.code)))
                .width(Constraint::Length(5))
                .col_span(2),
            Column::literal("Skipped", |_: &Claim, _| Line::from("XX"))
                .width(Constraint::Length(5))
                .col_span(0),
        ];
        let mut table = DataTable::new(SelectionMode::None);
        let props = TableProps::new("claim", &columns, &items).size(TableSize::Small);
        let lines = draw(&mut table, &props, 20, 6);
        assert!(lines[2].starts_with("C-1-wide-c"));
        assert!(!lines[2].contains("XX"));
    }

    #[test]
    fn test_row_indices_passed_to_formatters() {
        let items = items();
        let columns = vec![Column::literal("#", |_: &Claim, idx| Line::from(format!("row{}", idx)))];
        let mut table = DataTable::new(SelectionMode::None);
        let props = TableProps::new("claim", &columns, &items);
        let lines = draw(&mut table, &props, 10, 6);
        assert!(lines[2].starts_with("row0"));
        assert!(lines[4].starts_with("row2"));
    }

    #[test]
    fn test_footer_shown_only_with_count() {
        let items = items();
        let columns = columns();
        let mut table = DataTable::new(SelectionMode::None);

        let with_count = TableProps::new("claim", &columns, &items).pagination(Pagination::new(0, 3));
        let lines = draw(&mut table, &with_count, 50, 8);
        assert!(lines[7].contains("Rows per page"));
        assert!(lines[7].contains("1-3 of 3"));

        let zero = TableProps::new("claim", &columns, &items).pagination(Pagination::new(0, 0));
        let lines = draw(&mut table, &zero, 50, 8);
        assert!(!lines.iter().any(|l| l.contains("Rows per page")));
    }

    #[test]
    fn test_footer_clicks() {
        let items = items();
        let columns = columns();
        let mut table = DataTable::new(SelectionMode::None);
        let props = TableProps::new("claim", &columns, &items).pagination(Pagination::new(1, 57));
        let lines = draw(&mut table, &props, 60, 8);

        let footer = &lines[7];
        let next = footer.chars().position(|c| c == '›').unwrap() as u16;
        let prev = footer.chars().position(|c| c == '‹').unwrap() as u16;
        let size = footer.chars().position(|c| c == '▾').unwrap() as u16;
        assert_eq!(
            table.handle_mouse(click(next, 7, MouseButton::Left), &props),
            vec![TableAction::PageChanged(2)]
        );
        assert_eq!(
            table.handle_mouse(click(prev, 7, MouseButton::Left), &props),
            vec![TableAction::PageChanged(0)]
        );
        assert_eq!(
            table.handle_mouse(click(size, 7, MouseButton::Left), &props),
            vec![TableAction::PageSizeChanged(20)]
        );
    }

    #[test]
    fn test_overlay_spinner_only_with_items() {
        let items = items();
        let empty: Vec<Claim> = vec![];
        let columns = columns();
        let mut table = DataTable::new(SelectionMode::None);

        let busy = TableProps::new("claim", &columns, &items).fetching(true);
        let lines = draw(&mut table, &busy, 30, 8);
        assert!(lines.iter().any(|l| l.contains("Loading...")));

        let busy_empty = TableProps::new("claim", &columns, &empty).fetching(true);
        let lines = draw(&mut table, &busy_empty, 30, 8);
        assert!(!lines.iter().any(|l| l.contains("Loading...")));
    }

    #[test]
    fn test_overlay_shows_error() {
        let empty: Vec<Claim> = vec![];
        let columns = columns();
        let mut table = DataTable::new(SelectionMode::None);
        let props = TableProps::new("claim", &columns, &empty).error(Some("Request failed"));
        let lines = draw(&mut table, &props, 30, 8);
        assert!(lines.iter().any(|l| l.contains("Request failed")));
    }

    #[test]
    fn test_cursor_clamped_when_items_shrink() {
        let items = items();
        let columns = columns();
        let mut table = DataTable::new(SelectionMode::Multiple);
        let props = TableProps::new("claim", &columns, &items);
        table.handle_input(key(KeyCode::End), &props);
        assert_eq!(table.cursor(), 2);

        let fewer = vec![claim(1)];
        let props = TableProps::new("claim", &columns, &fewer);
        let action = table.handle_input(key(KeyCode::Char(' ')), &props);
        assert_eq!(selected_ids(action), vec![1]);
    }
}

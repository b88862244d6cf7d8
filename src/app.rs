//! Record viewer state and event loop logic.
//!
//! The viewer follows The Elm Architecture: [`App::update`] folds events into
//! state and [`App::view`] draws it. It owns everything the table treats as
//! caller state: the full record list, the page, the sort order, the bulk
//! selection generations and the fetching flag.

use std::cmp::Ordering;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{
    layout::{Constraint, Layout},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use serde_json::Value;
use tracing::{debug, info, trace};

use crate::config::Settings;
use crate::events::Event;
use crate::i18n::Messages;
use crate::record::{JsonRecord, Record};
use crate::ui::components::table::{
    Align, BulkSignals, Column, DataTable, HeaderAction, Pagination, RowPredicates,
    SelectionMode, TableAction, TableProps,
};
use crate::ui::theme::TableTheme;

/// Fields that drive row presentation instead of being shown as columns.
const PRESENTATION_FIELDS: [&str; 5] = ["route", "locked", "disabled", "highlighted", "highlightedAlt"];

/// Ticks a simulated refresh stays in the fetching state.
const REFRESH_TICKS: u8 = 12;

/// Viewer options taken from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerOptions {
    /// Module used for labels and hidden fields.
    pub module: String,
    pub mode: SelectionMode,
    /// Columns to show; all fields of the first record when unset.
    pub columns: Option<Vec<String>>,
    pub page_size: Option<usize>,
    pub delete: bool,
    pub title: Option<String>,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            module: "records".to_string(),
            mode: SelectionMode::Multiple,
            columns: None,
            page_size: None,
            delete: false,
            title: None,
        }
    }
}

/// Sort direction of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Ascending,
    Descending,
}

/// Everything the table reads on each frame.
struct Page {
    module: String,
    title: Option<String>,
    fields: Vec<String>,
    columns: Vec<Column<JsonRecord>>,
    predicates: RowPredicates<JsonRecord>,
    records: Vec<JsonRecord>,
    items: Vec<JsonRecord>,
    page: usize,
    page_size: usize,
    rows_per_page_options: Vec<usize>,
    sort: Option<(String, Direction)>,
    signals: BulkSignals,
    delete: bool,
    fetching: bool,
    error: Option<String>,
}

impl Page {
    fn props(&self) -> TableProps<'_, JsonRecord> {
        let mut props = TableProps::new(&self.module, &self.columns, &self.items)
            .predicates(&self.predicates)
            .pagination(self.pagination())
            .signals(self.signals)
            .double_click(true)
            .delete(self.delete)
            .fetching(self.fetching)
            .error(self.error.as_deref());
        if let Some(title) = &self.title {
            props = props.title(title);
        }
        props
    }

    fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.records.len())
            .page_size(self.page_size)
            .rows_per_page_options(self.rows_per_page_options.clone())
    }

    /// Clamp the page and cut the visible slice out of the records.
    fn refresh_items(&mut self) {
        let size = self.page_size.max(1);
        let last_page = self.records.len().saturating_sub(1) / size;
        self.page = self.page.min(last_page);
        self.items = self
            .records
            .iter()
            .skip(self.page * size)
            .take(size)
            .cloned()
            .collect();
    }

    fn rebuild_columns(&mut self) {
        let sample = self.records.first();
        self.columns = self
            .fields
            .iter()
            .map(|field| {
                let indicator = match &self.sort {
                    Some((key, Direction::Ascending)) if key == field => "▲",
                    Some((key, Direction::Descending)) if key == field => "▼",
                    _ => "↕",
                };
                let numeric = sample.and_then(|r| r.get(field)).is_some_and(Value::is_number);
                let key = field.clone();
                Column::translated(field.clone(), move |record: &JsonRecord, _| {
                    Line::from(record.display(&key))
                })
                .align(if numeric { Align::Right } else { Align::Left })
                .action(HeaderAction::new(indicator))
            })
            .collect();
    }

    /// Sort by a field, flipping the direction on repeated requests.
    fn sort_by(&mut self, field: &str) {
        let direction = match &self.sort {
            Some((key, Direction::Ascending)) if key == field => Direction::Descending,
            _ => Direction::Ascending,
        };
        self.records.sort_by(|a, b| {
            let ordering = compare_field(a, b, field);
            match direction {
                Direction::Ascending => ordering,
                Direction::Descending => ordering.reverse(),
            }
        });
        self.sort = Some((field.to_string(), direction));
        self.page = 0;
        self.rebuild_columns();
        self.refresh_items();
    }
}

/// Order two records by a field: numbers numerically, everything else as text.
fn compare_field(a: &JsonRecord, b: &JsonRecord, field: &str) -> Ordering {
    match (
        a.get(field).and_then(Value::as_f64),
        b.get(field).and_then(Value::as_f64),
    ) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => a.display(field).cmp(&b.display(field)),
    }
}

/// The field names shown as columns.
fn visible_fields(records: &[JsonRecord], requested: Option<&[String]>) -> Vec<String> {
    match requested {
        Some(fields) => fields.to_vec(),
        None => records
            .first()
            .map(JsonRecord::field_names)
            .unwrap_or_default()
            .into_iter()
            .filter(|f| !PRESENTATION_FIELDS.contains(&f.as_str()))
            .collect(),
    }
}

/// The main application struct that holds all state.
pub struct App {
    should_quit: bool,
    page: Page,
    table: DataTable<JsonRecord>,
    refresh_ticks: u8,
    status: String,
}

impl App {
    /// Create a viewer over `records`.
    pub fn new(records: Vec<JsonRecord>, options: ViewerOptions, settings: &Settings) -> Self {
        let fields = visible_fields(&records, options.columns.as_deref());
        let page_size = options
            .page_size
            .or_else(|| settings.rows_per_page_options.first().copied())
            .unwrap_or(10);
        let hidden_fields = settings.hidden_fields();
        info!(
            records = records.len(),
            columns = fields.len(),
            module = %options.module,
            hidden = hidden_fields.hidden_count(&options.module),
            "Opening record viewer"
        );

        let mut page = Page {
            module: options.module,
            title: options.title,
            fields,
            columns: Vec::new(),
            predicates: RowPredicates::new()
                .disabled(|r: &JsonRecord| r.flag("disabled"))
                .highlighted_alt(|r: &JsonRecord| r.flag("highlightedAlt"))
                .highlighted(|r: &JsonRecord| r.flag("highlighted"))
                .locked(|r: &JsonRecord| r.flag("locked")),
            records,
            items: Vec::new(),
            page: 0,
            page_size,
            rows_per_page_options: settings.rows_per_page_options.clone(),
            sort: None,
            signals: BulkSignals::default(),
            delete: options.delete,
            fetching: false,
            error: None,
        };
        page.rebuild_columns();
        page.refresh_items();

        let mut table = DataTable::new(options.mode)
            .with_visibility(hidden_fields)
            .with_labels(Messages::new().with_overrides(&settings.labels))
            .with_theme(TableTheme::named(&settings.theme).unwrap_or_default())
            .with_spinner(settings.spinner)
            .with_double_click_window(Duration::from_millis(settings.double_click_ms));
        table.sync(&page.props());

        Self {
            should_quit: false,
            page,
            table,
            refresh_ticks: 0,
            status: String::new(),
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// The last status message.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// The currently selected records.
    pub fn selected(&self) -> Vec<JsonRecord> {
        self.table.selected()
    }

    /// The records on the current page.
    pub fn page_items(&self) -> &[JsonRecord] {
        &self.page.items
    }

    pub fn current_page(&self) -> usize {
        self.page.page
    }

    /// Update state from an event.
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Quit => {
                info!("Quit event received");
                self.should_quit = true;
            }
            Event::Key(key) => {
                trace!(key = ?key.code, modifiers = ?key.modifiers, "Key event");
                self.handle_key_event(key);
            }
            Event::Mouse(mouse) => self.handle_mouse_event(mouse),
            Event::Resize(width, height) => {
                trace!(width, height, "Terminal resize event");
            }
            Event::Tick => self.handle_tick(),
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::NONE) | (KeyCode::Esc, _) => {
                self.should_quit = true;
            }
            (KeyCode::Char('a'), KeyModifiers::NONE) => {
                self.page.signals.select_all += 1;
                self.sync_signals();
            }
            (KeyCode::Char('c'), KeyModifiers::NONE) => {
                self.page.signals.clear_all += 1;
                self.sync_signals();
            }
            (KeyCode::Char('r'), KeyModifiers::NONE) => {
                debug!("Simulated refresh started");
                self.page.fetching = true;
                self.page.error = None;
                self.refresh_ticks = REFRESH_TICKS;
            }
            (KeyCode::Char('e'), KeyModifiers::NONE) => {
                self.page.error = match self.page.error {
                    Some(_) => None,
                    None => Some("Could not load records".to_string()),
                };
            }
            _ => {
                let action = self.table.handle_input(key, &self.page.props());
                self.apply(action);
            }
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        let actions = self.table.handle_mouse(mouse, &self.page.props());
        for action in actions {
            self.apply(Some(action));
        }
    }

    fn handle_tick(&mut self) {
        if self.page.fetching {
            self.table.tick();
            self.refresh_ticks = self.refresh_ticks.saturating_sub(1);
            if self.refresh_ticks == 0 {
                debug!("Simulated refresh finished");
                self.page.fetching = false;
            }
        }
    }

    fn sync_signals(&mut self) {
        let actions = self.table.sync(&self.page.props());
        for action in actions {
            self.apply(Some(action));
        }
    }

    /// React to what the table reported.
    fn apply(&mut self, action: Option<TableAction<JsonRecord>>) {
        let Some(action) = action else {
            return;
        };
        debug!(?action, "Table action");

        match action {
            TableAction::SelectionChanged(selected) => {
                self.status = format!("{} selected", selected.len());
            }
            TableAction::PageChanged(page) => {
                self.page.page = page;
                self.page.refresh_items();
                self.status = format!("Page {}", self.page.page + 1);
            }
            TableAction::PageSizeChanged(size) => {
                self.page.page_size = size;
                self.page.page = 0;
                self.page.refresh_items();
                self.status = format!("{} rows per page", size);
            }
            TableAction::DoubleClicked(record) => {
                let target = record.route().unwrap_or_else(|| record.uuid());
                self.status = format!("Opened {}", target);
            }
            TableAction::DeleteRequested(idx) => {
                let absolute = self.page.page * self.page.page_size.max(1) + idx;
                if absolute < self.page.records.len() {
                    let removed = self.page.records.remove(absolute);
                    info!(id = %removed.uuid(), "Record deleted");
                    self.page.refresh_items();
                    self.status = format!("Deleted {}", removed.uuid());
                }
            }
            TableAction::HeaderClicked(field) => {
                self.page.sort_by(&field);
                self.status = format!("Sorted by {}", field);
            }
        }
    }

    /// Render the viewer.
    pub fn view(&mut self, frame: &mut Frame) {
        let [table_area, status_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

        let props = self.page.props();
        self.table.render(frame, table_area, &props);

        let help = Line::from(vec![
            Span::raw(" a select all  c clear  r refresh  e error  d delete  q quit"),
            Span::raw("   "),
            Span::raw(self.status.as_str()),
        ]);
        frame.render_widget(Paragraph::new(help), status_area);
    }
}

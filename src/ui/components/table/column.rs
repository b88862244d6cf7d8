//! Column descriptors.
//!
//! Each column carries all of its own attributes, so hiding a column removes
//! one element instead of coordinating several arrays by index.

use std::fmt;
use std::rc::Rc;

use ratatui::{layout::Constraint, text::Line};

use super::selection::{Selection, SelectionMode};

/// Key of the synthetic delete column.
pub const DELETE_COLUMN_KEY: &str = "__delete";

/// Glyph rendered in the delete column.
pub const DELETE_GLYPH: &str = "✕";

/// Horizontal alignment of a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Right,
    Center,
}

impl Align {
    pub(crate) fn alignment(self) -> ratatui::layout::Alignment {
        match self {
            Align::Left => ratatui::layout::Alignment::Left,
            Align::Right => ratatui::layout::Alignment::Right,
            Align::Center => ratatui::layout::Alignment::Center,
        }
    }
}

impl std::str::FromStr for Align {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Align::Left),
            "right" => Ok(Align::Right),
            "center" => Ok(Align::Center),
            other => Err(format!("unknown alignment '{}'", other)),
        }
    }
}

/// What a computed header can see.
pub struct HeaderContext<'a, T> {
    /// The module the table belongs to.
    pub module: &'a str,
    /// The current selection.
    pub selection: &'a Selection<T>,
    /// The items of the current page, in display order.
    pub items: &'a [T],
}

impl<T> HeaderContext<'_, T> {
    /// The selection mode of the table.
    pub fn mode(&self) -> SelectionMode
    where
        T: Clone,
    {
        self.selection.mode()
    }
}

type ComputedHeader<T> = Rc<dyn Fn(&HeaderContext<'_, T>) -> String>;

/// A column header.
pub enum Header<T> {
    /// Text shown as is.
    Literal(String),
    /// Key resolved through the label resolver for the table's module.
    TranslationKey(String),
    /// Text computed from the table state on every render.
    Computed {
        /// Key used for visibility decisions.
        key: String,
        render: ComputedHeader<T>,
    },
}

impl<T> Header<T> {
    /// The key used to ask the visibility policy about this column.
    pub fn key(&self) -> &str {
        match self {
            Header::Literal(text) => text,
            Header::TranslationKey(key) => key,
            Header::Computed { key, .. } => key,
        }
    }

    /// Whether the header renders nothing.
    pub fn is_blank(&self) -> bool {
        match self {
            Header::Literal(text) | Header::TranslationKey(text) => text.is_empty(),
            Header::Computed { .. } => false,
        }
    }
}

impl<T> Clone for Header<T> {
    fn clone(&self) -> Self {
        match self {
            Header::Literal(text) => Header::Literal(text.clone()),
            Header::TranslationKey(key) => Header::TranslationKey(key.clone()),
            Header::Computed { key, render } => Header::Computed {
                key: key.clone(),
                render: Rc::clone(render),
            },
        }
    }
}

impl<T> fmt::Debug for Header<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Header::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
            Header::TranslationKey(key) => f.debug_tuple("TranslationKey").field(key).finish(),
            Header::Computed { key, .. } => f.debug_struct("Computed").field("key", key).finish(),
        }
    }
}

/// An indicator drawn at the right edge of a header cell.
///
/// Clicking a clickable action emits `TableAction::HeaderClicked` with the
/// column key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderAction {
    /// Text of the indicator, e.g. a sort arrow.
    pub indicator: String,
    /// Whether clicking the header reports an action.
    pub clickable: bool,
}

impl HeaderAction {
    /// A clickable indicator.
    pub fn new(indicator: impl Into<String>) -> Self {
        Self {
            indicator: indicator.into(),
            clickable: true,
        }
    }

    /// An indicator with no click behaviour.
    pub fn decoration(indicator: impl Into<String>) -> Self {
        Self {
            indicator: indicator.into(),
            clickable: false,
        }
    }
}

/// Renders the cell of a column for `(item, row_index)`.
pub type Formatter<T> = Rc<dyn Fn(&T, usize) -> Line<'static>>;

/// Box a closure as a [`Formatter`].
pub fn formatter<T>(f: impl Fn(&T, usize) -> Line<'static> + 'static) -> Formatter<T> {
    Rc::new(f)
}

/// A table column.
///
/// Spans follow table semantics: unset means one slot, `0` means the cell is
/// skipped and consumes no slot, `n` merges `n` slots.
pub struct Column<T> {
    header: Header<T>,
    pre_header: Option<String>,
    align: Option<Align>,
    header_span: Option<u16>,
    action: Option<HeaderAction>,
    col_span: Option<u16>,
    width: Constraint,
    formatter: Formatter<T>,
    delete: bool,
}

impl<T: 'static> Column<T> {
    /// Create a column from a header and a cell formatter.
    pub fn new(header: Header<T>, formatter: impl Fn(&T, usize) -> Line<'static> + 'static) -> Self {
        Self {
            header,
            pre_header: None,
            align: None,
            header_span: None,
            action: None,
            col_span: None,
            width: Constraint::Fill(1),
            formatter: Rc::new(formatter),
            delete: false,
        }
    }

    /// Column with a header shown as is.
    pub fn literal(
        text: impl Into<String>,
        formatter: impl Fn(&T, usize) -> Line<'static> + 'static,
    ) -> Self {
        Self::new(Header::Literal(text.into()), formatter)
    }

    /// Column whose header is a translation key.
    pub fn translated(
        key: impl Into<String>,
        formatter: impl Fn(&T, usize) -> Line<'static> + 'static,
    ) -> Self {
        Self::new(Header::TranslationKey(key.into()), formatter)
    }

    /// Column whose header is computed from the table state.
    pub fn computed(
        key: impl Into<String>,
        render: impl Fn(&HeaderContext<'_, T>) -> String + 'static,
        formatter: impl Fn(&T, usize) -> Line<'static> + 'static,
    ) -> Self {
        Self::new(
            Header::Computed {
                key: key.into(),
                render: Rc::new(render),
            },
            formatter,
        )
    }

    /// A column whose cells are empty.
    pub fn blank(header: Header<T>) -> Self {
        Self::new(header, |_, _| Line::default())
    }

    /// The synthetic trailing column holding the delete trigger.
    pub fn delete_trigger() -> Self {
        let mut column = Self::literal("", |_, _| Line::from(DELETE_GLYPH));
        column.width = Constraint::Length(3);
        column.align = Some(Align::Center);
        column.delete = true;
        column
    }

    pub fn pre_header(mut self, text: impl Into<String>) -> Self {
        self.pre_header = Some(text.into());
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }

    pub fn header_span(mut self, span: u16) -> Self {
        self.header_span = Some(span);
        self
    }

    pub fn action(mut self, action: HeaderAction) -> Self {
        self.action = Some(action);
        self
    }

    pub fn col_span(mut self, span: u16) -> Self {
        self.col_span = Some(span);
        self
    }

    pub fn width(mut self, width: Constraint) -> Self {
        self.width = width;
        self
    }

    /// The key used for visibility decisions.
    pub fn key(&self) -> &str {
        if self.delete {
            DELETE_COLUMN_KEY
        } else {
            self.header.key()
        }
    }

    pub fn header(&self) -> &Header<T> {
        &self.header
    }

    pub fn pre_header_text(&self) -> Option<&str> {
        self.pre_header.as_deref()
    }

    pub fn alignment(&self) -> Option<Align> {
        self.align
    }

    pub fn header_action(&self) -> Option<&HeaderAction> {
        self.action.as_ref()
    }

    pub fn header_span_value(&self) -> Option<u16> {
        self.header_span
    }

    pub fn col_span_value(&self) -> Option<u16> {
        self.col_span
    }

    pub fn width_constraint(&self) -> Constraint {
        self.width
    }

    /// Whether this is the synthetic delete column.
    pub fn is_delete(&self) -> bool {
        self.delete
    }

    /// Render the cell for an item.
    pub fn format(&self, item: &T, row: usize) -> Line<'static> {
        (self.formatter)(item, row)
    }

    /// Set the pre-header only if none is set yet.
    pub(crate) fn ensure_pre_header(&mut self) {
        self.pre_header.get_or_insert_with(String::new);
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            header: self.header.clone(),
            pre_header: self.pre_header.clone(),
            align: self.align,
            header_span: self.header_span,
            action: self.action.clone(),
            col_span: self.col_span,
            width: self.width,
            formatter: Rc::clone(&self.formatter),
            delete: self.delete,
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("header", &self.header)
            .field("pre_header", &self.pre_header)
            .field("align", &self.align)
            .field("header_span", &self.header_span)
            .field("action", &self.action)
            .field("col_span", &self.col_span)
            .field("delete", &self.delete)
            .finish()
    }
}

/// Column configuration in the legacy parallel-array shape.
///
/// `into_columns` zips the arrays by position. Auxiliary arrays shorter than
/// `headers` leave the attribute unset for the missing positions rather than
/// failing, and a missing formatter yields an empty cell.
pub struct ParallelColumns<T> {
    pub headers: Vec<Header<T>>,
    pub pre_headers: Option<Vec<String>>,
    pub aligns: Vec<Align>,
    pub header_spans: Vec<u16>,
    pub header_actions: Vec<HeaderAction>,
    pub col_spans: Vec<u16>,
    pub formatters: Vec<Formatter<T>>,
}

impl<T> Default for ParallelColumns<T> {
    fn default() -> Self {
        Self {
            headers: Vec::new(),
            pre_headers: None,
            aligns: Vec::new(),
            header_spans: Vec::new(),
            header_actions: Vec::new(),
            col_spans: Vec::new(),
            formatters: Vec::new(),
        }
    }
}

impl<T: 'static> ParallelColumns<T> {
    /// Convert into one descriptor per header.
    pub fn into_columns(self) -> Vec<Column<T>> {
        let ParallelColumns {
            headers,
            pre_headers,
            aligns,
            header_spans,
            header_actions,
            col_spans,
            formatters,
        } = self;
        let mut pre_headers = pre_headers.map(Vec::into_iter);
        let mut aligns = aligns.into_iter();
        let mut header_spans = header_spans.into_iter();
        let mut header_actions = header_actions.into_iter();
        let mut col_spans = col_spans.into_iter();
        let mut formatters = formatters.into_iter();

        headers
            .into_iter()
            .map(|header| {
                let mut column = match formatters.next() {
                    Some(formatter) => Column {
                        formatter,
                        ..Column::blank(header)
                    },
                    None => Column::blank(header),
                };
                column.pre_header = pre_headers.as_mut().and_then(Iterator::next);
                column.align = aligns.next();
                column.header_span = header_spans.next();
                column.action = header_actions.next();
                column.col_span = col_spans.next();
                column
            })
            .collect()
    }
}

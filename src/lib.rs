//! A data-driven record table for ratatui.
//!
//! The table renders a page of records against column descriptors, keeps a
//! selection across renders, decorates rows from caller predicates and
//! reports interaction as [`TableAction`]s. The viewer binary in this crate
//! drives it over a JSON file.

pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod i18n;
pub mod logging;
pub mod modules;
pub mod record;
pub mod ui;

pub use record::{JsonRecord, Record};
pub use ui::components::table::{
    Column, DataTable, Header, Pagination, RowPredicates, SelectionMode, TableAction, TableProps,
};

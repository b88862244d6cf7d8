//! Reusable UI components.

mod progress;
pub mod table;

pub use progress::{ProgressOrError, SpinnerStyle};
pub use table::{DataTable, TableAction, TableProps};

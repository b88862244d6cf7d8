//! Column filtering.
//!
//! Reduces the declared columns to the ones the module visibility policy
//! allows, then appends synthetic trailing columns.

use tracing::trace;

use super::column::Column;
use crate::modules::ModuleVisibility;

/// Remove hidden columns and append the delete column when requested.
///
/// Positions are visited from last to first so that removing a column never
/// shifts a position that has not been visited yet. The policy is asked once
/// per declared column. The delete column is always last and gets an empty
/// pre-header when any remaining column has one, so the pre-header row stays
/// aligned.
pub fn filter_columns<T: 'static>(
    columns: &[Column<T>],
    module: &str,
    visibility: &dyn ModuleVisibility,
    with_delete: bool,
) -> Vec<Column<T>> {
    let mut visible = columns.to_vec();
    let mut hidden = 0usize;

    for idx in (0..visible.len()).rev() {
        if visibility.hide_field(module, visible[idx].key()) {
            visible.remove(idx);
            hidden += 1;
        }
    }

    if with_delete {
        let mut delete = Column::delete_trigger();
        if visible.iter().any(|c| c.pre_header_text().is_some()) {
            delete.ensure_pre_header();
        }
        visible.push(delete);
    }

    trace!(
        module,
        declared = columns.len(),
        hidden,
        rendered = visible.len(),
        "Filtered table columns"
    );

    visible
}

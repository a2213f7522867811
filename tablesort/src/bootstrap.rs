use tabledom::Document;

use crate::TableSort;
use crate::error::SortError;

/// Arrange for `sorter` to initialize every sortable table once `doc` is
/// ready, or right away if it already is.
///
/// Without a document the failure is logged once and nothing is bound.
pub fn bootstrap(doc: Option<&mut Document>, sorter: TableSort) -> Result<(), SortError> {
    let Some(doc) = doc else {
        let err = SortError::DocumentUnavailable;
        log::error!("[tablesort] {err}");
        return Err(err);
    };

    doc.on_ready(move |doc| {
        let count = sorter.init_all(doc);
        log::debug!("[tablesort] document ready, {count} table(s) initialized");
    });
    Ok(())
}

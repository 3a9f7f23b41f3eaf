use tonlib_core::cell::{Cell, TonCellError};

pub(crate) fn ensure_reference_count(cell: &Cell, expected: usize) -> Result<(), TonCellError> {
    let ref_count = cell.references().len();
    if ref_count != expected {
        Err(TonCellError::cell_parser_error(format!(
            "Cell should contain {} reference cells, actual: {}",
            expected, ref_count
        )))
    } else {
        Ok(())
    }
}

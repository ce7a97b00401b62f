use score_tally::grid::OutputGrid;

use crate::tally::sheets::{CellStyle, SheetWriter, WorksheetCreator};
use crate::tally::*;

/// Capacity of the results worksheet, grown if the grid does not fit.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct Capacity {
    pub rows: u32,
    pub cols: u32,
}

impl Capacity {
    pub fn fitting(&self, grid: &OutputGrid) -> Capacity {
        Capacity {
            rows: self.rows.max(grid.height() as u32),
            cols: self.cols.max(grid.width() as u32),
        }
    }
}

/// Creates the worksheet `title` and writes the grid to it: the data rows first,
/// then the header, which is set in bold.
///
/// Nothing is written if the worksheet already exists. Writes that succeeded
/// before an error are not undone.
pub fn emit_grid<B: SheetWriter + WorksheetCreator>(
    book: &mut B,
    grid: &OutputGrid,
    title: &str,
    capacity: Capacity,
) -> TallyResult<()> {
    let cap = capacity.fitting(grid);
    book.add_worksheet(title, cap.rows, cap.cols)?;
    info!(
        "Created worksheet {:?} ({} rows, {} columns)",
        title, cap.rows, cap.cols
    );

    let data_rows = grid
        .rows
        .iter()
        .enumerate()
        .filter_map(|(idx, row)| grid.row_region(idx).map(|region| (region, row)));
    for (region, row) in data_rows {
        info!("{}: {:?}", region, row);
        book.update(title, &region, std::slice::from_ref(row))?;
    }

    let header_region = grid.header_region();
    debug!("emit_grid: header {}: {:?}", header_region, grid.header);
    book.update(title, &header_region, std::slice::from_ref(&grid.header))?;
    book.format(title, &header_region, CellStyle::Bold)?;
    Ok(())
}

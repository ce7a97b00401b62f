// Loading and saving Excel workbooks.

use calamine::DataType;
use rust_xlsxwriter::Format;

use crate::tally::sheets::{Workbook, Worksheet, WorksheetCreator};
use crate::tally::*;

/// Loads the values of all the worksheets of the workbook at `path`.
///
/// Formatting, formulas and charts are not loaded.
pub fn load_workbook(path: &Path) -> TallyResult<Workbook> {
    let p = path.display().to_string();
    debug!("load_workbook: path: {:?}", p);
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path: &p })?;

    let mut book = Workbook::new();
    for (worksheet_name, wrange) in workbook.worksheets() {
        // The range only covers the used cells, which may not start at A1.
        let (row_offset, col_offset) = wrange
            .start()
            .map(|(r, c)| (r as usize, c as usize))
            .unwrap_or((0, 0));
        let mut cells: Vec<Vec<CellValue>> = vec![Vec::new(); row_offset];
        for row in wrange.rows() {
            let mut r: Vec<CellValue> = vec![CellValue::Empty; col_offset];
            r.extend(row.iter().map(read_cell_calamine));
            cells.push(r);
        }
        debug!(
            "load_workbook: worksheet {:?}: {} rows",
            worksheet_name,
            cells.len()
        );
        book = book.with_sheet(Worksheet::from_cells(&worksheet_name, cells));
    }
    info!(
        "Loaded workbook {:?} with worksheets {:?}",
        p,
        book.worksheet_titles()
    );
    Ok(book)
}

fn read_cell_calamine(cell: &DataType) -> CellValue {
    match cell {
        DataType::Empty => CellValue::Empty,
        DataType::Int(i) => CellValue::Int(*i),
        DataType::Float(f) => CellValue::Float(*f),
        // Serial date, only found in the timestamp column.
        DataType::DateTime(f) => CellValue::Float(*f),
        DataType::String(s) => CellValue::Text(s.clone()),
        DataType::Bool(b) => CellValue::Bool(*b),
        other => CellValue::Text(format!("{:?}", other)),
    }
}

/// Writes all the worksheets of `book` to a new file at `path`.
pub fn save_workbook(book: &Workbook, path: &Path) -> TallyResult<()> {
    let p = path.display().to_string();
    let bold = Format::new().set_bold();
    let mut workbook = rust_xlsxwriter::Workbook::new();
    for sheet in book.sheets() {
        let ws = workbook.add_worksheet();
        ws.set_name(&sheet.title)
            .context(SavingExcelSnafu { path: &p })?;
        for (r, row) in sheet.cells().iter().enumerate() {
            for (c, v) in row.iter().enumerate() {
                let format = if sheet.is_bold((r + 1) as u32, (c + 1) as u32) {
                    Some(&bold)
                } else {
                    None
                };
                write_cell(ws, r as u32, c as u16, v, format)
                    .context(SavingExcelSnafu { path: &p })?;
            }
        }
    }
    workbook
        .save(path)
        .context(SavingExcelSnafu { path: &p })?;
    info!("Saved workbook {:?}", p);
    Ok(())
}

fn write_cell(
    ws: &mut rust_xlsxwriter::Worksheet,
    row: u32,
    col: u16,
    value: &CellValue,
    format: Option<&Format>,
) -> Result<(), rust_xlsxwriter::XlsxError> {
    match (value, format) {
        (CellValue::Empty, None) => {}
        (CellValue::Empty, Some(f)) => {
            ws.write_blank(row, col, f)?;
        }
        (CellValue::Int(i), None) => {
            ws.write_number(row, col, *i as f64)?;
        }
        (CellValue::Int(i), Some(f)) => {
            ws.write_number_with_format(row, col, *i as f64, f)?;
        }
        (CellValue::Float(x), None) => {
            ws.write_number(row, col, *x)?;
        }
        (CellValue::Float(x), Some(f)) => {
            ws.write_number_with_format(row, col, *x, f)?;
        }
        (CellValue::Text(s), None) => {
            ws.write_string(row, col, s)?;
        }
        (CellValue::Text(s), Some(f)) => {
            ws.write_string_with_format(row, col, s, f)?;
        }
        (CellValue::Bool(b), None) => {
            ws.write_boolean(row, col, *b)?;
        }
        (CellValue::Bool(b), Some(f)) => {
            ws.write_boolean_with_format(row, col, *b, f)?;
        }
    }
    Ok(())
}

// Turns the raw rows of a worksheet into records, the same way for every backend.

use std::collections::HashSet;

use crate::tally::*;

// Largest float that still holds every integer exactly.
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

/// Reads numbers out of text cells, and turns whole floats into integers.
///
/// Spreadsheet files store all numbers as floats, so a score of 8 comes back as
/// `8.0`.
pub fn numericise(value: &CellValue) -> CellValue {
    match value {
        CellValue::Text(s) => {
            let t = s.trim();
            if t.is_empty() {
                CellValue::Empty
            } else if let Ok(i) = t.parse::<i64>() {
                CellValue::Int(i)
            } else {
                match t.parse::<f64>() {
                    Ok(f) if f.is_finite() => numericise(&CellValue::Float(f)),
                    _ => value.clone(),
                }
            }
        }
        CellValue::Float(f) if f.fract() == 0.0 && f.abs() <= MAX_EXACT_INT => {
            CellValue::Int(*f as i64)
        }
        _ => value.clone(),
    }
}

fn header_label(cell: &CellValue) -> String {
    match cell {
        CellValue::Empty => "".to_string(),
        CellValue::Text(s) => s.clone(),
        other => numericise(other).to_string(),
    }
}

fn is_empty_cell(cell: &CellValue) -> bool {
    match cell {
        CellValue::Empty => true,
        CellValue::Text(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn is_empty_row(row: &[CellValue]) -> bool {
    row.iter().all(is_empty_cell)
}

/// Builds one record per non-empty row, keyed by the labels of the first row.
///
/// Columns without a label are dropped when they contain no data; when they do,
/// they are kept under the empty label so that the aggregation reports them.
pub fn records_from_rows(
    worksheet: &str,
    rows: &[Vec<CellValue>],
) -> TallyResult<Vec<ResponseRow>> {
    let (header, data) = rows
        .split_first()
        .context(EmptyWorksheetSnafu { name: worksheet })?;
    debug!("records_from_rows: {:?}: header: {:?}", worksheet, header);

    let mut columns: Vec<(usize, String)> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for (idx, cell) in header.iter().enumerate() {
        let label = header_label(cell);
        if label.is_empty() && data.iter().all(|r| r.get(idx).map_or(true, is_empty_cell)) {
            continue;
        }
        ensure!(
            seen.insert(label.clone()),
            DuplicateHeaderSnafu {
                name: worksheet,
                label,
            }
        );
        columns.push((idx, label));
    }

    let mut res: Vec<ResponseRow> = Vec::new();
    for (lineno, row) in data.iter().enumerate() {
        if is_empty_row(row) {
            debug!("records_from_rows: skipping empty row {}", lineno + 2);
            continue;
        }
        let record: ResponseRow = columns
            .iter()
            .map(|(idx, label)| {
                let v = row.get(*idx).map(numericise).unwrap_or(CellValue::Empty);
                (label.clone(), v)
            })
            .collect();
        res.push(record);
    }
    info!("Read {} records from worksheet {:?}", res.len(), worksheet);
    Ok(res)
}

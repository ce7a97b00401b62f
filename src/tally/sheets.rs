// The spreadsheet operations needed by a run, and an in-memory workbook that
// implements them.

use score_tally::grid::Region;

use crate::tally::io_common::records_from_rows;
use crate::tally::*;

/// Provides the responses of a worksheet.
pub trait RowSource {
    /// All the records of the worksheet: the first row is the header, each of the
    /// following non-empty rows is one record.
    fn get_all_records(&self, worksheet: &str) -> TallyResult<Vec<ResponseRow>>;
}

pub trait WorksheetCreator {
    fn worksheet_titles(&self) -> Vec<String>;

    /// Fails if a worksheet with the same title already exists.
    fn add_worksheet(&mut self, title: &str, rows: u32, cols: u32) -> TallyResult<()>;
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum CellStyle {
    Bold,
}

pub trait SheetWriter {
    /// Writes `values` (one vector per row) to `region`. The values must have
    /// the shape of the region.
    fn update(
        &mut self,
        worksheet: &str,
        region: &Region,
        values: &[Vec<CellValue>],
    ) -> TallyResult<()>;

    fn format(&mut self, worksheet: &str, region: &Region, style: CellStyle) -> TallyResult<()>;
}

static EMPTY_CELL: CellValue = CellValue::Empty;

// Worksheet titles are case-insensitive in spreadsheet files.
fn same_title(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// A worksheet: a capacity and the cells written so far.
#[derive(PartialEq, Debug, Clone)]
pub struct Worksheet {
    pub title: String,
    pub rows: u32,
    pub cols: u32,
    // Row-major, 0-based. Rows may have different lengths.
    cells: Vec<Vec<CellValue>>,
    bold: Vec<Region>,
}

impl Worksheet {
    pub fn new(title: &str, rows: u32, cols: u32) -> Worksheet {
        Worksheet {
            title: title.to_string(),
            rows,
            cols,
            cells: Vec::new(),
            bold: Vec::new(),
        }
    }

    /// A worksheet holding exactly the given cells.
    pub fn from_cells(title: &str, cells: Vec<Vec<CellValue>>) -> Worksheet {
        let rows = cells.len() as u32;
        let cols = cells.iter().map(|r| r.len()).max().unwrap_or(0) as u32;
        Worksheet {
            title: title.to_string(),
            rows,
            cols,
            cells,
            bold: Vec::new(),
        }
    }

    pub fn cells(&self) -> &[Vec<CellValue>] {
        &self.cells
    }

    /// The cell at (row, col), 1-based. Cells never written are empty.
    pub fn cell(&self, row: u32, col: u32) -> &CellValue {
        if row == 0 || col == 0 {
            return &EMPTY_CELL;
        }
        self.cells
            .get((row - 1) as usize)
            .and_then(|r| r.get((col - 1) as usize))
            .unwrap_or(&EMPTY_CELL)
    }

    pub fn is_bold(&self, row: u32, col: u32) -> bool {
        self.bold.iter().any(|r| r.contains(row, col))
    }

    fn set(&mut self, row: u32, col: u32, value: CellValue) {
        let (r, c) = ((row - 1) as usize, (col - 1) as usize);
        if self.cells.len() <= r {
            self.cells.resize(r + 1, Vec::new());
        }
        let cells_row = &mut self.cells[r];
        if cells_row.len() <= c {
            cells_row.resize(c + 1, CellValue::Empty);
        }
        cells_row[c] = value;
    }

    fn check_bounds(&self, region: &Region) -> TallyResult<()> {
        ensure!(
            region.start_row >= 1
                && region.start_col >= 1
                && region.end_row() <= self.rows
                && region.end_col() <= self.cols,
            RangeOutOfBoundsSnafu {
                worksheet: &self.title,
                range: region.to_a1(),
                rows: self.rows,
                cols: self.cols,
            }
        );
        Ok(())
    }
}

/// All the worksheets of a spreadsheet, in order.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct Workbook {
    sheets: Vec<Worksheet>,
}

impl Workbook {
    pub fn new() -> Workbook {
        Workbook::default()
    }

    pub fn with_sheet(mut self, sheet: Worksheet) -> Workbook {
        self.sheets.push(sheet);
        self
    }

    pub fn sheets(&self) -> &[Worksheet] {
        &self.sheets
    }

    pub fn worksheet(&self, title: &str) -> TallyResult<&Worksheet> {
        self.sheets
            .iter()
            .find(|s| same_title(&s.title, title))
            .context(MissingWorksheetSnafu { name: title })
    }

    fn worksheet_mut(&mut self, title: &str) -> TallyResult<&mut Worksheet> {
        self.sheets
            .iter_mut()
            .find(|s| same_title(&s.title, title))
            .context(MissingWorksheetSnafu { name: title })
    }
}

impl RowSource for Workbook {
    fn get_all_records(&self, worksheet: &str) -> TallyResult<Vec<ResponseRow>> {
        let sheet = self.worksheet(worksheet)?;
        records_from_rows(worksheet, sheet.cells())
    }
}

impl WorksheetCreator for Workbook {
    fn worksheet_titles(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.title.clone()).collect()
    }

    fn add_worksheet(&mut self, title: &str, rows: u32, cols: u32) -> TallyResult<()> {
        ensure!(
            !self.sheets.iter().any(|s| same_title(&s.title, title)),
            DuplicateWorksheetSnafu { title }
        );
        debug!("add_worksheet: {:?} ({} x {})", title, rows, cols);
        self.sheets.push(Worksheet::new(title, rows, cols));
        Ok(())
    }
}

impl SheetWriter for Workbook {
    fn update(
        &mut self,
        worksheet: &str,
        region: &Region,
        values: &[Vec<CellValue>],
    ) -> TallyResult<()> {
        let sheet = self.worksheet_mut(worksheet)?;
        ensure!(
            values.len() == region.height as usize
                && values.iter().all(|r| r.len() == region.width as usize),
            RegionShapeSnafu {
                worksheet,
                range: region.to_a1(),
            }
        );
        sheet.check_bounds(region)?;
        for (dr, row) in values.iter().enumerate() {
            for (dc, v) in row.iter().enumerate() {
                sheet.set(
                    region.start_row + dr as u32,
                    region.start_col + dc as u32,
                    v.clone(),
                );
            }
        }
        Ok(())
    }

    fn format(&mut self, worksheet: &str, region: &Region, style: CellStyle) -> TallyResult<()> {
        let sheet = self.worksheet_mut(worksheet)?;
        sheet.check_bounds(region)?;
        match style {
            CellStyle::Bold => sheet.bold.push(*region),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_titles_are_rejected() {
        let mut book = Workbook::new().with_sheet(Worksheet::new("Results", 10, 10));
        let e = book.add_worksheet("Results", 100, 20).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::DuplicateWorksheet);
        book.add_worksheet("Results 2", 100, 20).unwrap();
        assert_eq!(book.worksheet_titles(), vec!["Results", "Results 2"]);
    }

    #[test]
    fn titles_ignore_case() {
        let mut book = Workbook::new().with_sheet(Worksheet::new("results", 10, 10));
        let e = book.add_worksheet("Results", 100, 20).unwrap_err();
        assert!(matches!(e, TallyError::DuplicateWorksheet { .. }));
        let e = book.add_worksheet("ŠT. REZULTATI", 100, 20);
        assert!(e.is_ok());
        let e = book.add_worksheet("št. rezultati", 100, 20).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::DuplicateWorksheet);
        assert_eq!(book.worksheet("RESULTS").unwrap().title, "results");
        assert_eq!(book.worksheet_titles().len(), 2);
    }

    #[test]
    fn update_and_format() {
        let mut book = Workbook::new();
        book.add_worksheet("Out", 3, 4).unwrap();
        let region = Region::for_row(2, 3);
        book.update(
            "Out",
            &region,
            &[vec![CellValue::Int(1), "a".into(), CellValue::Float(2.5)]],
        )
        .unwrap();
        book.format("Out", &Region::for_row(1, 4), CellStyle::Bold)
            .unwrap();

        let sheet = book.worksheet("Out").unwrap();
        assert_eq!(sheet.cell(2, 1), &CellValue::Int(1));
        assert_eq!(sheet.cell(2, 2), &CellValue::from("a"));
        assert_eq!(sheet.cell(2, 3), &CellValue::Float(2.5));
        assert_eq!(sheet.cell(1, 1), &CellValue::Empty);
        assert_eq!(sheet.cell(9, 9), &CellValue::Empty);
        assert!(sheet.is_bold(1, 4));
        assert!(!sheet.is_bold(2, 1));
    }

    #[test]
    fn writes_must_fit() {
        let mut book = Workbook::new();
        book.add_worksheet("Out", 2, 2).unwrap();
        let e = book
            .update("Out", &Region::for_row(3, 1), &[vec![CellValue::Int(1)]])
            .unwrap_err();
        assert!(matches!(e, TallyError::RangeOutOfBounds { .. }));
        let three = vec![CellValue::Int(1), CellValue::Int(2), CellValue::Int(3)];
        let e = book
            .update("Out", &Region::for_row(1, 3), &[three])
            .unwrap_err();
        assert_eq!(
            e.to_string(),
            "Range A1:C1 does not fit in worksheet \"Out\" (2 rows, 2 columns)"
        );
        let e = book
            .update("Out", &Region::for_row(1, 2), &[vec![CellValue::Int(1)]])
            .unwrap_err();
        assert!(matches!(e, TallyError::RegionShape { .. }));
        let e = book
            .update("Nope", &Region::for_row(1, 1), &[vec![CellValue::Int(1)]])
            .unwrap_err();
        assert_eq!(e.kind(), ErrorKind::ExternalService);
    }
}
